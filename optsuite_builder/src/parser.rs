mod base;
mod interface;
mod printer;

pub use base::*;
#[cfg(test)]
pub(crate) use interface::util;
pub(crate) use printer::*;
