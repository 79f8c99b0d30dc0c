//! `optsuite` extracts typed command line options from a flat list of tokens.
//!
//! Each option is described by a short name (`-x`), a long name (`--name`), or both, along with a default value.
//! The default value decides the option's type:
//! * A boolean default makes a *toggle*; when present, the option's value becomes the negation of the default.
//! * An integer, float, or text default makes a *typed* option, which takes an argument converted to that type.
//!
//! Everything that isn't consumed by an option is passed through as a *positional* token, in its original order.
//!
//! # Usage
//! ```
//! use optsuite::{OptionDescriptor, Suite, Value};
//!
//! let suite = Suite::new()
//!     .add(OptionDescriptor::new(Some('v'), Some("verbose"), false).unwrap())
//!     .add(OptionDescriptor::new(Some('n'), Some("name"), "").unwrap())
//!     .add(OptionDescriptor::new(None, Some("level"), 0).unwrap().default_accept(1).unwrap());
//!
//! let parsed = suite.extract_all(&["-v", "--name=Alice", "--level", "extra"]).unwrap();
//!
//! assert_eq!(parsed.get("verbose"), Some(&Value::Boolean(true)));
//! assert_eq!(parsed.get("name"), Some(&Value::from("Alice")));
//! assert_eq!(parsed.get("level"), Some(&Value::Integer(1)));
//! assert_eq!(parsed.positionals(), &["extra".to_string()]);
//! ```
//!
//! In a program, use [`Suite::parse`] to extract from the Cli [`std::env::args`]:
//! ```no_run
//! use optsuite::{OptionDescriptor, Suite};
//!
//! let parsed = Suite::new()
//!     .add(OptionDescriptor::new(Some('p'), Some("port"), 8080).unwrap())
//!     .parse();
//! let port = parsed.get("port").and_then(|v| v.as_integer()).unwrap();
//! println!("Listening on {port} with {:?}", parsed.positionals());
//! ```
//!
//! ```console
//! $ server --port=abc
//! Parse error: --port took 'abc' as its argument, but it cannot be coerced to integer.
//! --port=abc
//! ^
//! ```
//!
//! # Builder Api
//! Configure `optsuite` by starting with a [`Suite`] and `add`ing [`OptionDescriptor`]s.
//! The order in which options are added is their matching priority.
//!
//! Option values are one of a closed set of [`Value`] variants: [`Value::Boolean`], [`Value::Integer`] (`i64`), [`Value::Float`] (`f64`), and [`Value::Text`].
//! Definition mistakes (ex: no name at all) are reported as a [`DefinitionError`] when the descriptor is constructed, before any tokens are seen.
//!
//! # Loose Api
//! The [loose Api](./loose/index.html) builds a [`Suite`] from loosely shaped items (names, sequences, records).
//!
//! # Cli Semantics
//! `optsuite` extracts the tokens according to the following set of rules.
//!
//! * A token refers to an option when it starts with `-` followed by the short name, or `--` followed by the long name.
//! The short form is tried first.
//! Only the start of the token is compared, so `--verbosely` refers to `--verbose`.
//! * The rest of the token, after the name, is the option's *conjoined* argument.
//! A leading `=` is dropped, so `-x5`, `-x=5`, and `--count=5` all carry the argument `5`.
//! * A toggle never accepts an argument; `-v=1` is an error.
//! * A typed option uses its conjoined argument if there is one.
//! Otherwise, if it has a *default accept* value, it takes that value and never looks at the next token.
//! Otherwise the next token is its argument; `--count 5` is equivalent to `--count=5`.
//! * The remaining tokens are scanned from the front.
//! Each option is offered the front of the stream, in the order they were added; the first option to consume tokens wins and the scan restarts.
//! When no option consumes the front token, it becomes a positional.
//! * An option may appear many times; its last occurrence wins.
//! Toggles always become the negation of their default, so `-v -v` is still `true` for a `false` default.
//! * By default ([`ValuePolicy::Strict`]), the token after an option is never taken as its argument if that token refers to any other option in the suite.
//! For example, `--name --verbose` fails with `--name requires an argument.`, while `--name -n` sets `name` to `-n`.
//! Negative numbers are tokens too: with a `-1` toggle in the suite, write `--offset=-10` rather than `--offset -10`.
//! Use [`ValuePolicy::Permissive`] to take it anyway.
//!
//! Any error aborts the whole extraction; there are no partial results.
//!
//! ### Option Kinds
//! ```console
//! Default     | Default accept | Syntax                                   | Description
//! ---------------------------------------------------------------------------------------------------
//! bool        |                | [--NAME]                                 | toggle, never an argument
//! T           |                | [--NAME VALUE], [--NAME=VALUE], [-NVALUE] | precisely 1 argument
//! T           | A              | [--NAME], [--NAME=VALUE], [-NVALUE]       | 0 or 1 conjoined argument
//! ```
//!
//! # Features
//! * `unit_test`: For features that help with unit testing.
//! * `tracing_debug`: Emit `tracing` debug events while matching tokens.
pub mod loose;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

pub use loose::{extract_all, Error};
pub use optsuite_builder::*;
