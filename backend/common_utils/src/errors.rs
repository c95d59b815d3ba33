//! Errors and error specific types for universal use

pub type CustomResult<T, E> = error_stack::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ParsingError {
    #[error("Failed to parse struct: {0}")]
    StructParseFailure(&'static str),
    #[error("Failed to parse email")]
    EmailParsingError,
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Incorrect value provided for field: {field_name}")]
    IncorrectValueProvided { field_name: &'static str },

    #[error("{message}")]
    InvalidValue { message: String },
}
