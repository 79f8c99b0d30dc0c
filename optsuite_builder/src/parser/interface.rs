use crate::api::ExtractionError;
use crate::parser::ErrorContext;

pub(crate) trait UserInterface {
    fn print_error(&self, error: ExtractionError);
    fn print_error_context(&self, error_context: ErrorContext);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print_error(&self, error: ExtractionError) {
        eprintln!("Parse error: {error}");
    }

    fn print_error_context(&self, error_context: ErrorContext) {
        eprintln!("{error_context}");
    }
}
