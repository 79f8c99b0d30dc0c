use thiserror::Error;

use crate::api::OptionDescriptor;
use crate::model::{Value, ValueType};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A failure while consuming tokens for an option.
///
/// Each variant names the option as it was written on the command line (ex: `-p` or `--count`).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    /// A toggle was given a conjoined argument (ex: `-v=yes`).
    #[error(
        "{name} passed with conjoined argument '{argument}', but does not accept one."
    )]
    UnexpectedArgument {
        /// The option as written.
        name: String,
        /// The conjoined argument.
        argument: String,
    },

    /// The option needs an argument, but none was available.
    #[error("{name} requires an argument.")]
    MissingArgument {
        /// The option as written.
        name: String,
    },

    /// The option's argument could not be coerced to the option's type.
    #[error(
        "{name} took '{token}' as its argument, but it cannot be coerced to {value_type}."
    )]
    InvalidConversion {
        /// The option as written.
        name: String,
        /// The argument.
        token: String,
        /// The option's type.
        value_type: ValueType,
    },
}

/// The outcome of a descriptor consuming the head of a token stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// The number of leading tokens consumed (1 or 2).
    pub consumed: usize,
    /// The extracted value.
    pub value: Value,
}

impl OptionDescriptor {
    /// The name prefix by which `token` refers to this option, if any.
    ///
    /// The short form `-x` is tried before the long form `--name`.
    ///
    /// ### Example
    /// ```
    /// # use optsuite_builder as optsuite;
    /// use optsuite::OptionDescriptor;
    ///
    /// let descriptor = OptionDescriptor::new(Some('n'), Some("name"), "").unwrap();
    /// assert_eq!(descriptor.matching_name("-nAlice"), Some("-n".to_string()));
    /// assert_eq!(descriptor.matching_name("--name=Alice"), Some("--name".to_string()));
    /// assert_eq!(descriptor.matching_name("name"), None);
    /// ```
    pub fn matching_name(&self, token: &str) -> Option<String> {
        self.split_name(token).map(|(name, _)| name)
    }

    /// Whether the first of `tokens` refers to this option.
    pub fn matches<S: AsRef<str>>(&self, tokens: &[S]) -> bool {
        match tokens.first() {
            Some(token) => self.split_name(token.as_ref()).is_some(),
            None => false,
        }
    }

    /// The argument attached to `token`, if it refers to this option.
    ///
    /// `-x=VALUE` and `--name=VALUE` yield everything after the `=` (even if empty).
    /// `-xVALUE` yields everything after the name.
    pub fn conjoined_argument<'t>(&self, token: &'t str) -> Option<&'t str> {
        let (_, remainder) = self.split_name(token)?;

        if remainder.is_empty() {
            None
        } else {
            Some(remainder.strip_prefix('=').unwrap_or(remainder))
        }
    }

    /// Consume this option from the head of `tokens`.
    ///
    /// Returns `Ok(None)` when the first token does not refer to this option (or there are no tokens).
    /// Otherwise returns the number of tokens consumed along with the extracted value.
    ///
    /// ### Example
    /// ```
    /// # use optsuite_builder as optsuite;
    /// use optsuite::{OptionDescriptor, Value};
    ///
    /// let count = OptionDescriptor::new(Some('c'), Some("count"), 0).unwrap();
    ///
    /// let extraction = count.extract(&["--count", "5", "rest"]).unwrap().unwrap();
    /// assert_eq!(extraction.consumed, 2);
    /// assert_eq!(extraction.value, Value::Integer(5));
    ///
    /// assert_eq!(count.extract(&["rest"]).unwrap(), None);
    /// assert!(count.extract(&["--count"]).is_err());
    /// ```
    pub fn extract<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> Result<Option<Extraction>, ExtractionError> {
        self.extract_guarded(tokens, |_| false)
    }

    /// Like [`OptionDescriptor::extract`], but a following token for which `ineligible` holds is never taken as this option's argument.
    pub(crate) fn extract_guarded<S: AsRef<str>>(
        &self,
        tokens: &[S],
        ineligible: impl Fn(&str) -> bool,
    ) -> Result<Option<Extraction>, ExtractionError> {
        let token = match tokens.first() {
            Some(token) => token.as_ref(),
            None => return Ok(None),
        };
        let name = match self.matching_name(token) {
            Some(name) => name,
            None => return Ok(None),
        };
        let argument = self.conjoined_argument(token);

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Token '{token}' matched {name} (conjoined: {argument:?}).");
        }

        if self.value_type() == ValueType::Boolean {
            return match argument {
                Some(argument) => Err(ExtractionError::UnexpectedArgument {
                    name,
                    argument: argument.to_string(),
                }),
                None => {
                    let toggled = match self.default_value() {
                        Value::Boolean(default) => Value::Boolean(!default),
                        _ => unreachable!(
                            "internal error - boolean descriptor must have a boolean default"
                        ),
                    };
                    Ok(Some(Extraction {
                        consumed: 1,
                        value: toggled,
                    }))
                }
            };
        }

        if let Some(argument) = argument {
            let value = self.coerce(&name, argument)?;
            return Ok(Some(Extraction { consumed: 1, value }));
        }

        if let Some(accept) = self.default_accept_value() {
            return Ok(Some(Extraction {
                consumed: 1,
                value: accept.clone(),
            }));
        }

        match tokens.get(1).map(|next| next.as_ref()) {
            Some(next) if !ineligible(next) => {
                let value = self.coerce(&name, next)?;
                Ok(Some(Extraction { consumed: 2, value }))
            }
            _ => Err(ExtractionError::MissingArgument { name }),
        }
    }

    fn coerce(&self, name: &str, token: &str) -> Result<Value, ExtractionError> {
        self.value_type()
            .coerce(token)
            .map_err(|error| ExtractionError::InvalidConversion {
                name: name.to_string(),
                token: error.token,
                value_type: error.value_type,
            })
    }

    fn split_name<'t>(&self, token: &'t str) -> Option<(String, &'t str)> {
        if let Some(short) = self.short_name() {
            if let Some(remainder) = token.strip_prefix('-').and_then(|t| t.strip_prefix(short)) {
                return Some((format!("-{short}"), remainder));
            }
        }

        if let Some(long) = self.long_name() {
            if let Some(remainder) = token.strip_prefix("--").and_then(|t| t.strip_prefix(long)) {
                return Some((format!("--{long}"), remainder));
            }
        }

        None
    }
}
