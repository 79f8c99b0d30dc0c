//! Core module for `optsuite`.
//! See the `optsuite` crate documentation for full details.
#![deny(missing_docs)]
mod api;
mod model;
mod parser;

pub use api::*;
pub use model::*;
pub use parser::{Parsed, Suite, ValuePolicy};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
