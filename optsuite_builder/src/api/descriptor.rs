use thiserror::Error;

use crate::model::{Value, ValueType};

/// An invalid option definition, caught when the option is constructed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DefinitionError {
    /// Neither a short nor a long name was given.
    #[error("option must have at least a short name or a long name.")]
    MissingName,

    /// The short name was `-`.
    #[error("short name cannot be the hyphen character.")]
    HyphenShortName,

    /// A textual short name was not precisely one character.
    #[error("short name must be a single character, '{name}' is not.")]
    ShortNameLength {
        /// The offending short name.
        name: String,
    },

    /// A boolean option was given a default accept value.
    #[error(
        "option '{name}' is a boolean; default accept values are only for non-boolean options."
    )]
    DefaultAcceptOnBoolean {
        /// The option's preferred name.
        name: String,
    },

    /// The default accept value's type differs from the default's type.
    #[error(
        "option '{name}' has a default accept of type {found}, but its default is {expected}."
    )]
    DefaultAcceptType {
        /// The option's preferred name.
        name: String,
        /// The type of the default.
        expected: ValueType,
        /// The type of the default accept.
        found: ValueType,
    },

    /// A name field was given a non-text value.
    #[error("{field} must be text, not {found}.")]
    NameType {
        /// The name field (`short_name` or `long_name`).
        field: String,
        /// The type actually given.
        found: ValueType,
    },
}

/// The canonical description of one recognized option.
///
/// The option's [`ValueType`] is taken from its default value:
/// * A [`Value::Boolean`] default makes a toggle; matching sets the value to the negation of the default.
/// * Any other default makes a typed option, which takes an argument either conjoined (`-xVALUE`, `-x=VALUE`, `--name=VALUE`) or as the following token.
///
/// A typed option may declare a *default accept* value, used when the option appears without a conjoined argument.
/// Such an option never takes the following token as its argument.
///
/// ### Example
/// ```
/// # use optsuite_builder as optsuite;
/// use optsuite::{OptionDescriptor, Value, ValueType};
///
/// let verbose = OptionDescriptor::new(Some('v'), Some("verbose"), false).unwrap();
/// assert_eq!(verbose.value_type(), ValueType::Boolean);
/// assert_eq!(verbose.name(), "verbose");
///
/// let level = OptionDescriptor::new(None, Some("level"), 0)
///     .unwrap()
///     .default_accept(1)
///     .unwrap();
/// assert_eq!(level.default_accept_value(), Some(&Value::Integer(1)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OptionDescriptor {
    short_name: Option<char>,
    long_name: Option<String>,
    value_type: ValueType,
    default: Value,
    default_accept: Option<Value>,
}

impl OptionDescriptor {
    /// Create an option descriptor.
    ///
    /// An empty long name counts as no long name.
    /// Fails when neither name is present, or when the short name is `-`.
    pub fn new(
        short_name: Option<char>,
        long_name: Option<&str>,
        default: impl Into<Value>,
    ) -> Result<Self, DefinitionError> {
        let long_name = long_name.filter(|n| !n.is_empty()).map(str::to_string);

        if short_name.is_none() && long_name.is_none() {
            return Err(DefinitionError::MissingName);
        }

        if short_name == Some('-') {
            return Err(DefinitionError::HyphenShortName);
        }

        let default = default.into();

        Ok(Self {
            short_name,
            long_name,
            value_type: default.value_type(),
            default,
            default_accept: None,
        })
    }

    /// Declare the value to use when this option appears without an argument.
    ///
    /// Fails for boolean options, and for values whose type differs from the default's.
    pub fn default_accept(mut self, value: impl Into<Value>) -> Result<Self, DefinitionError> {
        let value = value.into();

        if self.value_type == ValueType::Boolean {
            return Err(DefinitionError::DefaultAcceptOnBoolean { name: self.name() });
        }

        if value.value_type() != self.value_type {
            return Err(DefinitionError::DefaultAcceptType {
                name: self.name(),
                expected: self.value_type,
                found: value.value_type(),
            });
        }

        self.default_accept.replace(value);
        Ok(self)
    }

    /// The name a program uses to refer to this option: the long name if present, otherwise the short name.
    pub fn name(&self) -> String {
        match (&self.long_name, &self.short_name) {
            (Some(long), _) => long.clone(),
            (None, Some(short)) => short.to_string(),
            (None, None) => unreachable!("internal error - descriptor must have a name"),
        }
    }

    /// The short name, as in `-x`.
    pub fn short_name(&self) -> Option<char> {
        self.short_name
    }

    /// The long name, as in `--name`.
    pub fn long_name(&self) -> Option<&str> {
        self.long_name.as_deref()
    }

    /// The type of this option's value.
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// The value held before any extraction.
    pub fn default_value(&self) -> &Value {
        &self.default
    }

    /// The value used when the option appears without an argument.
    pub fn default_accept_value(&self) -> Option<&Value> {
        self.default_accept.as_ref()
    }
}

impl std::fmt::Display for OptionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.short_name, &self.long_name) {
            (Some(short), Some(long)) => write!(f, "-{short}, --{long}")?,
            (Some(short), None) => write!(f, "-{short}")?,
            (None, Some(long)) => write!(f, "--{long}")?,
            (None, None) => unreachable!("internal error - descriptor must have a name"),
        };

        match (&self.value_type, &self.default_accept) {
            (ValueType::Boolean, _) => Ok(()),
            (value_type, None) => write!(f, " {value_type} (default: {})", self.default),
            (value_type, Some(accept)) => write!(
                f,
                " [{value_type}] (default: {}, accept: {accept})",
                self.default
            ),
        }
    }
}
