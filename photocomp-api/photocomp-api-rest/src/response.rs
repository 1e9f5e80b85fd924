use axum::{
    Json,
    response::{IntoResponse, Response},
};
use photocomp_common::common::pagination::StandardPagination;
use serde::Serialize;
use photocomp_common::error::Error;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// `{"data": {...}, "pagination": {...}}` envelope shared by all endpoints.
#[derive(Debug, Default, Serialize)]
pub struct ApiResponse {
    data: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pagination: Option<StandardPagination>,
}

impl ApiResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(mut self, key: &str, value: impl Serialize) -> Result<Self, ApiError> {
        let value = serde_json::to_value(value)
            .map_err(|e| ApiError::from(Error::from(e)))?;
        self.data.insert(key.to_string(), value);
        Ok(self)
    }

    pub fn with_pagination(mut self, pagination: StandardPagination) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
