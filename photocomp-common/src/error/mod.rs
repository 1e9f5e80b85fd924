#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Sort parameter [{0}] is not known.")]
    InvalidSortField(String),

    #[error("Random sorting cannot be combined with other sorting.")]
    InvalidSortCombination,

    #[error("Database Error: {0}")]
    Database(String),

    #[error("Serialization Error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Resource Not Found: {resource_type} with ID {resource_id}")]
    NotFound {
        resource_type: String,
        resource_id: String,
    },

    #[error("Invalid Input: {0}")]
    InvalidInput(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Internal Error: {0}")]
    Internal(String),

    #[error("Conflict Error: {0}")]
    Conflict(String),
}

impl Error {
    pub fn not_found(resource_type: &str, resource_id: impl ToString) -> Self {
        Error::NotFound {
            resource_type: resource_type.to_string(),
            resource_id: resource_id.to_string(),
        }
    }

    /// Whether the error was caused by the caller and must not be retried.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidSortField(_)
                | Error::InvalidSortCombination
                | Error::InvalidInput(_)
                | Error::NotFound { .. }
                | Error::Forbidden(_)
                | Error::Conflict(_)
        )
    }
}
