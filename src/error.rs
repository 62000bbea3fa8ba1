use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use service::ServiceError;

/// Wire form of the service error taxonomy: a status code plus a
/// machine-readable kind and human message.
pub struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match &self.0 {
            ServiceError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "unauthorized", self.0.to_string())
            }
            ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", self.0.to_string()),
            ServiceError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden", self.0.to_string()),
            ServiceError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, "bad_request", self.0.to_string())
            }
            ServiceError::Db(err) => {
                tracing::error!(error = %err, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "internal server error".to_owned(),
                )
            }
        };

        (
            status,
            Json(json!({ "error": { "kind": kind, "message": message } })),
        )
            .into_response()
    }
}
