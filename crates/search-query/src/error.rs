use thiserror::Error;

/// Errors raised while building a query from source text or configuration.
///
/// Facade operations on an already-built query never return this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Query parse error near byte {position}: {message}")]
    Parse { message: String, position: usize },

    #[error("Unrecognized field: {0}")]
    UnknownField(String),

    #[error("Invalid value {value:?} for field {field}: {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Field may not be negated: {0}")]
    NegationNotAllowed(String),

    #[error("Field may only be used once: {0}")]
    DuplicateField(String),

    #[error("Query must contain at least one term")]
    EmptyQuery,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl QueryError {
    pub(crate) fn parse(message: impl Into<String>, position: usize) -> Self {
        Self::Parse {
            message: message.into(),
            position,
        }
    }
}

pub type Result<T> = std::result::Result<T, QueryError>;
