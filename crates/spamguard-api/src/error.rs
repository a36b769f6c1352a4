//! HTTP error mapping

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use spamguard_core::{Error, ErrorBody};
use tracing::{error, warn};

pub const NOT_LOADED_DETAIL: &str = "Model not loaded. Please try again in a few seconds.";

/// Error returned by request handlers
#[derive(Debug)]
pub enum AppError {
    /// Failure raised by the classifier or request validation
    Classifier(Error),
    /// Body could not be decoded into a request
    InvalidRequest(String),
    /// No route matched
    NotFound,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Classifier(Error::Validation(_)) | AppError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Classifier(Error::NotLoaded) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Classifier(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Classifier(err) => err.kind(),
            AppError::InvalidRequest(_) => "validation_error",
            AppError::NotFound => "not_found",
        }
    }

    fn detail(&self) -> String {
        match self {
            AppError::Classifier(Error::Validation(msg)) => msg.clone(),
            AppError::Classifier(Error::NotLoaded) => NOT_LOADED_DETAIL.to_string(),
            AppError::Classifier(err) => format!("Classification error: {err}"),
            AppError::InvalidRequest(msg) => msg.clone(),
            AppError::NotFound => "Not found".to_string(),
        }
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        AppError::Classifier(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_type = self.error_type();
        let detail = self.detail();

        if status.is_server_error() {
            error!(error_type, %detail, "Request failed");
        } else if status != StatusCode::NOT_FOUND {
            warn!(error_type, %detail, "Request rejected");
        }
        metrics::counter!("spamguard_errors_total", "type" => error_type).increment(1);

        (status, Json(ErrorBody::new(detail, error_type))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::from(Error::validation("too short")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidRequest("bad json".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(Error::NotLoaded).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::from(Error::unsupported_model("RandomForest")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::from(Error::internal("NaN margin")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_details() {
        assert_eq!(AppError::from(Error::NotLoaded).detail(), NOT_LOADED_DETAIL);
        assert_eq!(
            AppError::from(Error::validation("message is empty")).detail(),
            "message is empty"
        );
        assert!(AppError::from(Error::internal("boom"))
            .detail()
            .starts_with("Classification error:"));
        assert_eq!(
            AppError::from(Error::unsupported_model("x")).error_type(),
            "unsupported_model"
        );
    }
}
