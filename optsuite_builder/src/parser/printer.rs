/// The command line, annotated with a caret under the token at fault.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ErrorContext {
    offset: usize,
    tokens: Vec<String>,
}

impl ErrorContext {
    /// `offset` is the index of the token at fault.
    pub(crate) fn new<S: AsRef<str>>(offset: usize, tokens: &[S]) -> Self {
        Self {
            offset,
            tokens: tokens.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut projection = String::default();
        let mut projection_offset = None;

        for (i, token) in self.tokens.iter().enumerate() {
            if i == self.offset {
                projection_offset.replace(projection.chars().count());
            }

            projection.push_str(token);

            if i + 1 < self.tokens.len() {
                projection.push(' ');
            }
        }

        write!(
            f,
            "{projection}\n{:width$}^",
            "",
            width = projection_offset.unwrap_or_else(|| projection.chars().count())
        )
    }
}
