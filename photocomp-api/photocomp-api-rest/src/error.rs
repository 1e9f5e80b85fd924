use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use photocomp_common::error::Error;
use serde_json::json;
use tracing::error;

pub const ERROR_VOTING_IS_NOT_OPEN_FOR_COMPETITION: u32 = 120;
pub const ERROR_VOTE_FROM_IP_ADDRESS_EXISTS: u32 = 121;

/// Error body returned by every endpoint.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub developer_message: String,
    pub user_message: Option<String>,
    pub error_code: Option<u32>,
}

impl ApiError {
    pub fn new(status: StatusCode, developer_message: impl Into<String>) -> Self {
        Self {
            status,
            developer_message: developer_message.into(),
            user_message: None,
            error_code: None,
        }
    }

    pub fn forbidden(developer_message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, developer_message)
    }

    pub fn with_user_message(mut self, user_message: impl Into<String>) -> Self {
        self.user_message = Some(user_message.into());
        self
    }

    pub fn with_error_code(mut self, error_code: u32) -> Self {
        self.error_code = Some(error_code);
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "StatusCode": self.status.as_u16(),
            "DeveloperMessage": self.developer_message,
            "UserMessage": self.user_message,
            "ErrorCode": self.error_code,
        }));

        (self.status, body).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::InvalidSortField(_) | Error::InvalidSortCombination | Error::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Forbidden(_) | Error::Conflict(_) => StatusCode::FORBIDDEN,
            Error::Database(_)
            | Error::Serialization(_)
            | Error::Config(_)
            | Error::Internal(_) => {
                error!(error = %err, "request failed");
                return Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
            }
        };

        Self::new(status, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(Error::InvalidSortField("x".into())).status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(Error::InvalidSortCombination).status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(Error::not_found("Competition", 3)).status,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(Error::Conflict("dup".into())).status,
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_internal_details_are_not_leaked() {
        let err = ApiError::from(Error::Database("password authentication failed".into()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.developer_message.contains("password"));
    }
}
