use std::collections::HashMap;
use std::env;

use crate::api::{Extraction, ExtractionError, OptionDescriptor};
use crate::model::Value;
use crate::parser::interface::{ConsoleInterface, UserInterface};
use crate::parser::ErrorContext;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Whether a token that refers to an option may be taken as another option's argument.
///
/// This only affects options that take their argument from the following token (ex: `--count 5`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValuePolicy {
    /// A following token which refers to any other option in the suite is never taken as an argument.
    /// For example, `--name --verbose` fails with `--name requires an argument.`
    ///
    /// The option's own names don't count, so `--name -n` sets `name` to `"-n"`.
    /// Beware of short names that look like numbers: with a `-1` toggle in the suite, `--offset -10` fails.
    #[default]
    Strict,
    /// The following token is always taken as the argument.
    /// For example, `--name --verbose` sets `name` to `"--verbose"`.
    Permissive,
}

/// The result of extracting a suite from a token stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parsed {
    positionals: Vec<String>,
    options: HashMap<String, Value>,
}

impl Parsed {
    /// The tokens matched by no option, in their original order.
    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    /// Every option's final value, keyed by [`OptionDescriptor::name`].
    pub fn options(&self) -> &HashMap<String, Value> {
        &self.options
    }

    /// The final value of the option named `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }

    /// Split into the positionals and the option values.
    pub fn into_parts(self) -> (Vec<String>, HashMap<String, Value>) {
        (self.positionals, self.options)
    }
}

/// An ordered collection of options, extracted together from a token stream.
///
/// The order of the options is their matching priority: when several options could match the same token, the first one added wins.
///
/// ### Example
/// ```
/// # use optsuite_builder as optsuite;
/// use optsuite::{OptionDescriptor, Suite, Value};
///
/// let suite = Suite::new()
///     .add(OptionDescriptor::new(Some('v'), Some("verbose"), false).unwrap())
///     .add(OptionDescriptor::new(Some('n'), Some("name"), "").unwrap());
///
/// let parsed = suite.extract_all(&["-v", "--name=Alice", "extra"]).unwrap();
///
/// assert_eq!(parsed.positionals(), &["extra".to_string()]);
/// assert_eq!(parsed.get("verbose"), Some(&Value::Boolean(true)));
/// assert_eq!(parsed.get("name"), Some(&Value::from("Alice")));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Suite {
    descriptors: Vec<OptionDescriptor>,
    value_policy: ValuePolicy,
}

impl Suite {
    /// Create an empty suite.
    pub fn new() -> Self {
        Self::default()
    }

    /// *Available using 'unit_test' crate feature only.*</br></br>
    /// An empty suite, for testing functions that configure a [`Suite`].
    ///
    /// ### Example
    /// ```
    /// # use optsuite_builder as optsuite;
    /// use optsuite::{OptionDescriptor, Suite, Value};
    ///
    /// // Function under test.
    /// pub fn setup_fn(suite: Suite) -> Suite {
    ///     suite.add(OptionDescriptor::new(Some('x'), None, 0).unwrap())
    /// }
    ///
    /// let parsed = setup_fn(Suite::test_dummy()).extract_all(&["-x", "2"]).unwrap();
    /// assert_eq!(parsed.get("x"), Some(&Value::Integer(2)));
    /// ```
    #[cfg(feature = "unit_test")]
    pub fn test_dummy() -> Self {
        Self::default()
    }

    /// Add an option to the end of the suite (lowest matching priority).
    pub fn add(mut self, descriptor: OptionDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Configure the [`ValuePolicy`] (default: [`ValuePolicy::Strict`]).
    pub fn value_policy(mut self, value_policy: ValuePolicy) -> Self {
        self.value_policy = value_policy;
        self
    }

    /// The options in matching priority order.
    pub fn descriptors(&self) -> &[OptionDescriptor] {
        &self.descriptors
    }

    /// Extract every option from `tokens`.
    ///
    /// Repeatedly offers the remaining tokens to each option in order; the first option to consume tokens restarts the scan.
    /// When no option consumes anything, the first remaining token becomes a positional.
    /// Options that never match keep their default value.
    ///
    /// Any error aborts the whole extraction.
    pub fn extract_all<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Parsed, ExtractionError> {
        self.consume(tokens).map_err(|(_, error)| error)
    }

    /// Run [`Suite::extract_all`], reporting any error to the user.
    ///
    /// If an error is encountered, it is printed along with the offending position in `tokens`, and `Err(1)` is returned.
    pub fn parse_tokens(&self, tokens: &[&str]) -> Result<Parsed, i32> {
        self.parse_tokens_with(tokens, &ConsoleInterface::default())
    }

    /// Run [`Suite::extract_all`] against the Cli [`env::args`] (skipping the program name).
    ///
    /// If an error is encountered, it is printed and the process exits with error code `1` (via [`std::process::exit`]).
    pub fn parse(&self) -> Parsed {
        let command_input: Vec<String> = env::args().skip(1).collect();
        match self.parse_tokens(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        ) {
            Ok(parsed) => parsed,
            Err(exit_code) => {
                std::process::exit(exit_code);
            }
        }
    }

    pub(crate) fn parse_tokens_with(
        &self,
        tokens: &[&str],
        user_interface: &(impl UserInterface + ?Sized),
    ) -> Result<Parsed, i32> {
        match self.consume(tokens) {
            Ok(parsed) => Ok(parsed),
            Err((offset, error)) => {
                user_interface.print_error(error);
                user_interface.print_error_context(ErrorContext::new(offset, tokens));
                Err(1)
            }
        }
    }

    fn consume<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Parsed, (usize, ExtractionError)> {
        let mut values: Vec<Value> = self
            .descriptors
            .iter()
            .map(|d| d.default_value().clone())
            .collect();
        let mut positionals = Vec::default();
        let mut position = 0;

        while position < tokens.len() {
            let remaining = &tokens[position..];
            let mut consumed = 0;

            for (index, descriptor) in self.descriptors.iter().enumerate() {
                let ineligible = |token: &str| self.claimed_by_other(index, token);
                let extraction = match self.value_policy {
                    ValuePolicy::Strict => descriptor.extract_guarded(remaining, ineligible),
                    ValuePolicy::Permissive => descriptor.extract(remaining),
                }
                .map_err(|error| (position, error))?;

                if let Some(Extraction { consumed: n, value }) = extraction {
                    values[index] = value;
                    consumed = n;
                    break;
                }
            }

            if consumed == 0 {
                let token = remaining[0].as_ref().to_string();

                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Token '{token}' matched no option; routing to positionals.");
                }

                positionals.push(token);
                position += 1;
            } else {
                position += consumed;
            }
        }

        let options = self
            .descriptors
            .iter()
            .map(OptionDescriptor::name)
            .zip(values)
            .collect();

        Ok(Parsed {
            positionals,
            options,
        })
    }

    fn claimed_by_other(&self, index: usize, token: &str) -> bool {
        self.descriptors
            .iter()
            .enumerate()
            .any(|(i, d)| i != index && d.matching_name(token).is_some())
    }
}

impl FromIterator<OptionDescriptor> for Suite {
    fn from_iter<I: IntoIterator<Item = OptionDescriptor>>(iter: I) -> Self {
        Self {
            descriptors: iter.into_iter().collect(),
            value_policy: ValuePolicy::default(),
        }
    }
}

impl From<Vec<OptionDescriptor>> for Suite {
    fn from(descriptors: Vec<OptionDescriptor>) -> Self {
        Self {
            descriptors,
            value_policy: ValuePolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ValueType;
    use crate::parser::util::InMemoryInterface;
    use crate::test::assert_contains;
    use rand::distributions::Alphanumeric;
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    fn verbose_name() -> Suite {
        Suite::new()
            .add(OptionDescriptor::new(Some('v'), Some("verbose"), false).unwrap())
            .add(OptionDescriptor::new(Some('n'), Some("name"), "").unwrap())
    }

    fn mixed() -> Suite {
        Suite::new()
            .add(OptionDescriptor::new(Some('v'), Some("verbose"), false).unwrap())
            .add(OptionDescriptor::new(Some('x'), None, 0).unwrap())
            .add(OptionDescriptor::new(None, Some("ratio"), 1.0).unwrap())
            .add(
                OptionDescriptor::new(None, Some("level"), 0)
                    .unwrap()
                    .default_accept(1)
                    .unwrap(),
            )
    }

    #[test]
    fn extract_all_empty() {
        // Setup
        let suite = mixed();

        // Execute
        let parsed = suite.extract_all(&[] as &[&str]).unwrap();

        // Verify
        assert_eq!(parsed.positionals(), &[] as &[String]);
        assert_eq!(parsed.get("verbose"), Some(&Value::Boolean(false)));
        assert_eq!(parsed.get("x"), Some(&Value::Integer(0)));
        assert_eq!(parsed.get("ratio"), Some(&Value::Float(1.0)));
        assert_eq!(parsed.get("level"), Some(&Value::Integer(0)));
        assert_eq!(parsed.options().len(), 4);
    }

    #[test]
    fn extract_all_empty_suite() {
        let parsed = Suite::new().extract_all(&["-v", "a"]).unwrap();
        assert_eq!(parsed.positionals(), &["-v".to_string(), "a".to_string()]);
        assert!(parsed.options().is_empty());
    }

    #[test]
    fn extract_all_positionals_only() {
        let suite = mixed();

        for _ in 0..100 {
            // Setup
            let length = thread_rng().gen_range(0..10);
            let tokens: Vec<String> = (0..length)
                .map(|_| {
                    let size = thread_rng().gen_range(1..8);
                    thread_rng()
                        .sample_iter(&Alphanumeric)
                        .take(size)
                        .map(char::from)
                        .collect()
                })
                .collect();

            // Execute
            let parsed = suite.extract_all(&tokens).unwrap();

            // Verify
            assert_eq!(parsed.positionals(), tokens.as_slice());
            for descriptor in suite.descriptors() {
                assert_eq!(
                    parsed.get(&descriptor.name()),
                    Some(descriptor.default_value())
                );
            }
        }
    }

    #[rstest]
    #[case(vec!["-v", "--name=Alice", "extra"], vec!["extra"], true, "Alice")]
    #[case(vec!["extra", "-v", "--name", "Alice"], vec!["extra"], true, "Alice")]
    #[case(vec!["a", "-nBob", "b"], vec!["a", "b"], false, "Bob")]
    #[case(vec!["-n=", "a"], vec!["a"], false, "")]
    #[case(vec!["a", "b", "c"], vec!["a", "b", "c"], false, "")]
    #[case(vec!["--name", "x", "--name", "y"], vec![], false, "y")]
    #[case(vec!["-v", "-v"], vec![], true, "")]
    fn extract_all(
        #[case] tokens: Vec<&str>,
        #[case] positionals: Vec<&str>,
        #[case] verbose: bool,
        #[case] name: &str,
    ) {
        // Execute
        let parsed = verbose_name().extract_all(&tokens).unwrap();

        // Verify
        assert_eq!(parsed.positionals(), positionals.as_slice());
        assert_eq!(parsed.get("verbose"), Some(&Value::Boolean(verbose)));
        assert_eq!(parsed.get("name"), Some(&Value::from(name)));
    }

    #[rstest]
    #[case(vec!["-x=5"])]
    #[case(vec!["-x", "5"])]
    #[case(vec!["-x5"])]
    fn extract_all_integer_forms(#[case] tokens: Vec<&str>) {
        let parsed = mixed().extract_all(&tokens).unwrap();
        assert_eq!(parsed.get("x"), Some(&Value::Integer(5)));
        assert!(parsed.positionals().is_empty());
    }

    #[rstest]
    #[case(vec!["--ratio", "2.5"], 2.5)]
    #[case(vec!["--ratio=2.5"], 2.5)]
    #[case(vec!["--ratio-0.5"], -0.5)]
    #[case(vec!["--ratio", "3"], 3.0)]
    fn extract_all_float_forms(#[case] tokens: Vec<&str>, #[case] expected: f64) {
        let parsed = mixed().extract_all(&tokens).unwrap();
        assert_eq!(parsed.get("ratio"), Some(&Value::Float(expected)));
        assert!(parsed.positionals().is_empty());
    }

    #[test]
    fn extract_all_default_accept() {
        // Execute
        let parsed = mixed().extract_all(&["--level", "5"]).unwrap();

        // Verify
        assert_eq!(parsed.get("level"), Some(&Value::Integer(1)));
        assert_eq!(parsed.positionals(), &["5".to_string()]);
    }

    #[test]
    fn extract_all_definition_order() {
        // Setup
        // Both options match `-a..`; the first one added wins.
        let suite = Suite::new()
            .add(OptionDescriptor::new(Some('a'), None, "").unwrap())
            .add(OptionDescriptor::new(None, Some("all"), false).unwrap())
            .add(OptionDescriptor::new(None, Some("al"), 0).unwrap());

        // Execute
        let parsed = suite.extract_all(&["-all", "--all", "--al=3"]).unwrap();

        // Verify
        assert_eq!(parsed.get("a"), Some(&Value::from("ll")));
        assert_eq!(parsed.get("all"), Some(&Value::Boolean(true)));
        assert_eq!(parsed.get("al"), Some(&Value::Integer(3)));
    }

    #[test]
    fn extract_all_earlier_prefix_wins() {
        // `--al` precedes `--all`, so `--all` is read as `--al` with conjoined argument `l`.
        let suite = Suite::new()
            .add(OptionDescriptor::new(None, Some("al"), "").unwrap())
            .add(OptionDescriptor::new(None, Some("all"), false).unwrap());

        let parsed = suite.extract_all(&["--all"]).unwrap();

        assert_eq!(parsed.get("al"), Some(&Value::from("l")));
        assert_eq!(parsed.get("all"), Some(&Value::Boolean(false)));
    }

    #[test]
    fn extract_all_shared_name() {
        // The later option owns the shared result slot.
        let suite = Suite::new()
            .add(OptionDescriptor::new(Some('n'), Some("name"), "first").unwrap())
            .add(OptionDescriptor::new(Some('m'), Some("name"), "second").unwrap());

        let parsed = suite.extract_all(&["-n", "x"]).unwrap();

        assert_eq!(parsed.options().len(), 1);
        assert_eq!(parsed.get("name"), Some(&Value::from("second")));
    }

    #[rstest]
    #[case(vec!["--count"], "--count requires an argument.")]
    #[case(vec!["a", "-p=abc"], "-p took 'abc' as its argument, but it cannot be coerced to integer.")]
    #[case(vec!["-q=1"], "-q passed with conjoined argument '1', but does not accept one.")]
    #[case(
        vec!["-p", "9223372036854775808"],
        "-p took '9223372036854775808' as its argument, but it cannot be coerced to integer."
    )]
    #[case(
        vec!["--ratio", "abc"],
        "--ratio took 'abc' as its argument, but it cannot be coerced to float."
    )]
    fn extract_all_error(#[case] tokens: Vec<&str>, #[case] message: &str) {
        // Setup
        let suite = Suite::new()
            .add(OptionDescriptor::new(None, Some("count"), 0).unwrap())
            .add(OptionDescriptor::new(Some('p'), None, 80).unwrap())
            .add(OptionDescriptor::new(Some('q'), None, false).unwrap())
            .add(OptionDescriptor::new(None, Some("ratio"), 1.0).unwrap());

        // Execute
        let error = suite.extract_all(&tokens).unwrap_err();

        // Verify
        assert_eq!(error.to_string(), message);
    }

    #[rstest]
    #[case(vec!["--count", "--verbose"], "--count")]
    #[case(vec!["--count", "-v"], "--count")]
    #[case(vec!["--name", "--count"], "--name")]
    #[case(vec!["--count", "-n"], "--count")]
    fn extract_all_strict(#[case] tokens: Vec<&str>, #[case] name: &str) {
        // Setup
        let suite = verbose_name().add(OptionDescriptor::new(None, Some("count"), 0).unwrap());

        // Execute
        let error = suite.extract_all(&tokens).unwrap_err();

        // Verify
        assert_eq!(
            error,
            ExtractionError::MissingArgument {
                name: name.to_string(),
            }
        );
    }

    #[rstest]
    #[case(vec!["--name", "-n"], "-n")]
    #[case(vec!["-n", "--name"], "--name")]
    #[case(vec!["--name", "--name"], "--name")]
    fn extract_all_strict_own_name(#[case] tokens: Vec<&str>, #[case] expected: &str) {
        // Setup
        let suite = verbose_name();

        // Execute
        let parsed = suite.extract_all(&tokens).unwrap();

        // Verify
        assert_eq!(parsed.get("name"), Some(&Value::from(expected)));
        assert_eq!(parsed.positionals(), &[] as &[String]);
    }

    #[test]
    fn extract_all_strict_numeric_short_name() {
        // Setup
        let suite = Suite::new()
            .add(OptionDescriptor::new(Some('1'), None, false).unwrap())
            .add(OptionDescriptor::new(None, Some("offset"), 0).unwrap());

        // Execute
        let error = suite.extract_all(&["--offset", "-10"]).unwrap_err();
        let parsed = suite.extract_all(&["--offset=-10"]).unwrap();

        // Verify
        assert_eq!(
            error,
            ExtractionError::MissingArgument {
                name: "--offset".to_string(),
            }
        );
        assert_eq!(parsed.get("offset"), Some(&Value::Integer(-10)));
    }

    #[test]
    fn extract_all_strict_unclaimed() {
        let suite = verbose_name();

        let parsed = suite.extract_all(&["--name", "-x"]).unwrap();

        assert_eq!(parsed.get("name"), Some(&Value::from("-x")));
    }

    #[test]
    fn extract_all_permissive() {
        // Setup
        let suite = verbose_name()
            .add(OptionDescriptor::new(None, Some("count"), 0).unwrap())
            .value_policy(ValuePolicy::Permissive);

        // Execute
        let parsed = suite.extract_all(&["--name", "--verbose"]).unwrap();
        let error = suite.extract_all(&["--count", "--verbose"]).unwrap_err();

        // Verify
        assert_eq!(parsed.get("name"), Some(&Value::from("--verbose")));
        assert_eq!(parsed.get("verbose"), Some(&Value::Boolean(false)));
        assert_matches!(error, ExtractionError::InvalidConversion { name, token, value_type } => {
            assert_eq!(name, "--count");
            assert_eq!(token, "--verbose");
            assert_eq!(value_type, ValueType::Integer);
        });
    }

    #[test]
    fn extract_all_reusable() {
        let suite = verbose_name();

        let first = suite.extract_all(&["-v", "-nAlice"]).unwrap();
        let second = suite.extract_all(&["b"]).unwrap();

        assert_eq!(first.get("verbose"), Some(&Value::Boolean(true)));
        assert_eq!(second.get("verbose"), Some(&Value::Boolean(false)));
        assert_eq!(second.get("name"), Some(&Value::from("")));
    }

    #[test]
    fn from_iter() {
        let suite: Suite = vec![
            OptionDescriptor::new(Some('v'), None, false).unwrap(),
            OptionDescriptor::new(Some('n'), None, "").unwrap(),
        ]
        .into_iter()
        .collect();

        assert_eq!(suite.descriptors().len(), 2);
        assert_eq!(suite, Suite::from(suite.descriptors().to_vec()));
    }

    #[test]
    fn into_parts() {
        let (positionals, options) = verbose_name()
            .extract_all(&["a", "-v"])
            .unwrap()
            .into_parts();

        assert_eq!(positionals, vec!["a".to_string()]);
        assert_eq!(options.get("verbose"), Some(&Value::Boolean(true)));
    }

    #[test]
    fn parse_tokens() {
        // Setup
        let interface = InMemoryInterface::default();

        // Execute
        let parsed = verbose_name()
            .parse_tokens_with(&["-v", "x"], &interface)
            .unwrap();

        // Verify
        assert_eq!(parsed.positionals(), &["x".to_string()]);
        let (error, error_context) = interface.consume();
        assert_eq!(error, None);
        assert_eq!(error_context, None);
    }

    #[rstest]
    #[case(vec!["--bogus", "-x=abc"], 1)]
    #[case(vec!["-x"], 0)]
    #[case(vec!["a", "b", "-v=1"], 2)]
    fn parse_tokens_error(#[case] tokens: Vec<&str>, #[case] offset: usize) {
        // Setup
        let interface = InMemoryInterface::default();

        // Execute
        let exit_code = mixed()
            .parse_tokens_with(&tokens, &interface)
            .unwrap_err();

        // Verify
        assert_eq!(exit_code, 1);
        let (error, error_context) = interface.consume();
        let message = error.unwrap();
        assert_contains!(message, tokens[offset].split('=').next().unwrap());
        assert_eq!(error_context.unwrap(), ErrorContext::new(offset, &tokens));
    }
}
