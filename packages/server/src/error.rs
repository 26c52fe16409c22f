use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use formbuilder_document::DocumentError;
use formbuilder_forms::SubmissionError;
use formbuilder_storage::StorageError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Invalid document: {0}")]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error("No document at {0}")]
    NotFound(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Storage(StorageError::InvalidKey(_)) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Document(_) => StatusCode::BAD_REQUEST,
            ApiError::Submission(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        let mut body = json!({ "error": self.to_string() });
        if let ApiError::Submission(SubmissionError::MissingRequired(fields)) = &self {
            body["fields"] = json!(fields);
        }

        (status, Json(body)).into_response()
    }
}
