//! Loose Api for `optsuite` configuration.
//!
//! The [builder Api](../index.html#builder-api) asks for canonical [`OptionDescriptor`]s.
//! The loose Api instead accepts a list of [`SpecItem`]s, roughly shaped like the option, and normalizes each into a descriptor.
//!
//! ```
//! use optsuite::loose::{extract_all, SpecItem};
//! use optsuite::Value;
//!
//! let parsed = extract_all(
//!     "-v --name=Alice extra",
//!     vec![
//!         SpecItem::from(vec![Value::from("-v"), Value::from("--verbose"), Value::from(false)]),
//!         SpecItem::from(vec![Value::from("-n"), Value::from("--name"), Value::from("")]),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(parsed.positionals(), &["extra".to_string()]);
//! assert_eq!(parsed.get("verbose"), Some(&Value::Boolean(true)));
//! assert_eq!(parsed.get("name"), Some(&Value::from("Alice")));
//! ```
//!
//! ### Item Shapes
//! ```console
//! Shape                        | Example                                   | Normalization
//! ----------------------------------------------------------------------------------------------------------------
//! SpecItem::Name               | "-v", "--verbose", "verbose"              | 1 character (hyphens stripped) is short, else long
//! SpecItem::Sequence (1 item)  | ["--verbose"], ["-v"], ["v"]              | leading "--" is long, "-" is short, bare is by length
//! SpecItem::Sequence           | ["-v", "--verbose", DEFAULT, ACCEPT]      | 1 character name is short, the other long
//! SpecItem::Sequence           | ["count", DEFAULT, ACCEPT]                | 1 character name is short, else long
//! SpecItem::Record             | {"short_name": "v", "default": false}     | keys: short_name, long_name, default, default_accept
//! SpecItem::Descriptor         | OptionDescriptor::new(..)                 | as-is
//! SpecItem::Other              | Value::Integer(3)                         | skipped
//! ```
//!
//! Missing defaults are `false` (a toggle).
use std::collections::BTreeMap;

use optsuite_builder::{DefinitionError, ExtractionError, OptionDescriptor, Parsed, Suite, Value};
use thiserror::Error;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// One loosely shaped option specification.
#[derive(Debug, Clone, PartialEq)]
pub enum SpecItem {
    /// A bare option name.
    Name(String),
    /// One or two names, optionally followed by the default and the default accept.
    Sequence(Vec<Value>),
    /// Named fields: `short_name`, `long_name`, `default`, `default_accept`.
    Record(BTreeMap<String, Value>),
    /// An already canonical descriptor.
    Descriptor(OptionDescriptor),
    /// Anything else; skipped during normalization.
    Other(Value),
}

impl From<&str> for SpecItem {
    fn from(value: &str) -> Self {
        SpecItem::Name(value.to_string())
    }
}

impl From<String> for SpecItem {
    fn from(value: String) -> Self {
        SpecItem::Name(value)
    }
}

impl From<Vec<Value>> for SpecItem {
    fn from(value: Vec<Value>) -> Self {
        SpecItem::Sequence(value)
    }
}

impl From<BTreeMap<String, Value>> for SpecItem {
    fn from(value: BTreeMap<String, Value>) -> Self {
        SpecItem::Record(value)
    }
}

impl From<OptionDescriptor> for SpecItem {
    fn from(value: OptionDescriptor) -> Self {
        SpecItem::Descriptor(value)
    }
}

impl From<Value> for SpecItem {
    fn from(value: Value) -> Self {
        match value {
            Value::Text(name) => SpecItem::Name(name),
            other => SpecItem::Other(other),
        }
    }
}

/// Either failure of [`extract_all`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A [`SpecItem`] could not be normalized into a descriptor.
    #[error("Definition error: {0}")]
    Definition(#[from] DefinitionError),
    /// The tokens could not be extracted.
    #[error("Parse error: {0}")]
    Extraction(#[from] ExtractionError),
}

/// The tokens to extract from: a whitespace separated line, or tokens that are already split.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens(Vec<String>);

impl Tokens {
    /// The tokens, in order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<&str> for Tokens {
    fn from(line: &str) -> Self {
        Tokens(line.split_whitespace().map(str::to_string).collect())
    }
}

impl From<String> for Tokens {
    fn from(line: String) -> Self {
        Tokens::from(line.as_str())
    }
}

impl From<Vec<String>> for Tokens {
    fn from(tokens: Vec<String>) -> Self {
        Tokens(tokens)
    }
}

impl From<Vec<&str>> for Tokens {
    fn from(tokens: Vec<&str>) -> Self {
        Tokens(tokens.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Tokens {
    fn from(tokens: &[&str]) -> Self {
        Tokens(tokens.iter().map(|s| s.to_string()).collect())
    }
}

/// Normalize `items` into a [`Suite`], in order.
///
/// [`SpecItem::Other`] (and a single non-text [`SpecItem::Sequence`] entry) is skipped.
/// Fails on the first item that does not make a valid descriptor.
pub fn create_suite<I, T>(items: I) -> Result<Suite, DefinitionError>
where
    I: IntoIterator<Item = T>,
    T: Into<SpecItem>,
{
    let mut suite = Suite::new();

    for item in items.into_iter() {
        if let Some(descriptor) = normalize(item.into())? {
            suite = suite.add(descriptor);
        }
    }

    Ok(suite)
}

/// Normalize `items` into a [`Suite`] and extract it from `tokens`.
///
/// ### Example
/// ```
/// use optsuite::loose::extract_all;
/// use optsuite::Value;
///
/// let parsed = extract_all(vec!["--count", "5", "file"], vec!["count"]).unwrap();
///
/// // `count` has no default, so it is a toggle; "5" and "file" remain positional.
/// assert_eq!(parsed.get("count"), Some(&Value::Boolean(true)));
/// assert_eq!(parsed.positionals(), &["5".to_string(), "file".to_string()]);
/// ```
pub fn extract_all<I, T>(tokens: impl Into<Tokens>, items: I) -> Result<Parsed, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<SpecItem>,
{
    let suite = create_suite(items)?;
    let tokens = tokens.into();
    Ok(suite.extract_all(tokens.as_slice())?)
}

#[derive(Debug, Default)]
struct Shape {
    short_name: Option<String>,
    long_name: Option<String>,
    default: Option<Value>,
    default_accept: Option<Value>,
}

impl Shape {
    fn named(short_name: Option<&str>, long_name: Option<&str>) -> Self {
        Self {
            short_name: short_name.map(str::to_string),
            long_name: long_name.map(str::to_string),
            ..Self::default()
        }
    }

    fn into_descriptor(self) -> Result<OptionDescriptor, DefinitionError> {
        let short_name = match self.short_name.as_deref() {
            None | Some("") => None,
            Some(name) => {
                let mut characters = name.chars();
                match (characters.next(), characters.next()) {
                    (Some(single), None) => Some(single),
                    _ => {
                        return Err(DefinitionError::ShortNameLength {
                            name: name.to_string(),
                        })
                    }
                }
            }
        };
        let default = self.default.unwrap_or(Value::Boolean(false));
        let descriptor = OptionDescriptor::new(short_name, self.long_name.as_deref(), default)?;

        match self.default_accept {
            Some(accept) => descriptor.default_accept(accept),
            None => Ok(descriptor),
        }
    }
}

fn normalize(item: SpecItem) -> Result<Option<OptionDescriptor>, DefinitionError> {
    let shape = match item {
        SpecItem::Name(name) => by_length(strip_hyphens(&name)),
        SpecItem::Sequence(values) => match sequence_shape(values) {
            Some(shape) => shape,
            None => return Ok(None),
        },
        SpecItem::Record(fields) => record_shape(fields)?,
        SpecItem::Descriptor(descriptor) => return Ok(Some(descriptor)),
        SpecItem::Other(_other) => {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Skipping unrecognized spec item {_other:?}.");
            }

            return Ok(None);
        }
    };

    shape.into_descriptor().map(Some)
}

fn sequence_shape(values: Vec<Value>) -> Option<Shape> {
    let mut values = values.into_iter().peekable();

    let mut shape = match values.next() {
        None => Shape::default(),
        Some(Value::Text(first)) => match values.peek() {
            None => explicit(&first),
            Some(Value::Text(_)) => {
                let second = match values.next() {
                    Some(Value::Text(second)) => second,
                    _ => unreachable!("internal error - peeked a text value"),
                };
                let (first, second) = (strip_hyphens(&first), strip_hyphens(&second));

                if second.chars().count() == 1 {
                    Shape::named(Some(second), Some(first))
                } else {
                    Shape::named(Some(first), Some(second))
                }
            }
            Some(_) => by_length(strip_hyphens(&first)),
        },
        // A lone non-text entry names nothing at all.
        Some(other) => match values.peek() {
            None => return None,
            Some(_) => Shape {
                default: Some(other),
                ..Shape::default()
            },
        },
    };

    if shape.default.is_none() {
        shape.default = values.next();
    }

    shape.default_accept = values.next();
    Some(shape)
}

fn record_shape(mut fields: BTreeMap<String, Value>) -> Result<Shape, DefinitionError> {
    let short_name = record_name(&mut fields, "short_name")?;
    let long_name = record_name(&mut fields, "long_name")?;

    Ok(Shape {
        short_name,
        long_name,
        default: fields.remove("default"),
        default_accept: fields.remove("default_accept"),
    })
}

fn record_name(
    fields: &mut BTreeMap<String, Value>,
    field: &str,
) -> Result<Option<String>, DefinitionError> {
    match fields.remove(field) {
        None => Ok(None),
        Some(Value::Text(name)) => Ok(Some(strip_hyphens(&name).to_string())),
        Some(other) => Err(DefinitionError::NameType {
            field: field.to_string(),
            found: other.value_type(),
        }),
    }
}

// `--name` is long and `-n` is short; a bare word is decided by its length.
fn explicit(name: &str) -> Shape {
    if let Some(long) = name.strip_prefix("--") {
        Shape::named(None, Some(long))
    } else if let Some(short) = name.strip_prefix('-') {
        Shape::named(Some(short), None)
    } else {
        by_length(name)
    }
}

fn by_length(name: &str) -> Shape {
    if name.chars().count() == 1 {
        Shape::named(Some(name), None)
    } else {
        Shape::named(None, Some(name))
    }
}

fn strip_hyphens(name: &str) -> &str {
    name.trim_start_matches('-')
}
