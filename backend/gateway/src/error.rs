//! Error → HTTP response mapping.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::warn;

use rconbridge_core::{BridgeError, SessionError};

/// A [`BridgeError`] on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub BridgeError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BridgeError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            BridgeError::NotFound(_) => StatusCode::NOT_FOUND,
            BridgeError::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BridgeError::Parse(_) => StatusCode::BAD_GATEWAY,
            BridgeError::Session(SessionError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            BridgeError::Session(_) => StatusCode::SERVICE_UNAVAILABLE,
            BridgeError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl<E: Into<BridgeError>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(error = %self.0, code = self.0.kind(), "Request failed");
        }
        let body = Json(json!({
            "error": self.0.to_string(),
            "code": self.0.kind(),
        }));
        (status, body).into_response()
    }
}

pub(crate) fn bad_query(rejection: QueryRejection) -> ApiError {
    ApiError(BridgeError::invalid(rejection.body_text()))
}

pub(crate) fn bad_body(rejection: JsonRejection) -> ApiError {
    ApiError(BridgeError::invalid(rejection.body_text()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn maps_error_kinds_to_status_codes() {
        let cases = [
            (BridgeError::invalid("x"), StatusCode::BAD_REQUEST),
            (BridgeError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (BridgeError::Rejected("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (BridgeError::parse("x"), StatusCode::BAD_GATEWAY),
            (
                SessionError::Timeout(Duration::from_secs(1)).into(),
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (SessionError::Disconnected.into(), StatusCode::SERVICE_UNAVAILABLE),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status(), status);
        }
    }
}
