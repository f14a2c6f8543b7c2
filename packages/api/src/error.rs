use axum::{
    Json,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Error surfaced to API clients. Everything stored here is safe to
/// show; internal causes are logged where they arise and never leave
/// the process.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: Option<String>,
}

impl ApiError {
    fn new(status: StatusCode, code: &'static str, message: Option<String>) -> Self {
        Self {
            status,
            code,
            message,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::warn!("Bad request: {message}");
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", Some(message))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::warn!("Not found: {message}");
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", Some(message))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::warn!("Unauthorized: {message}");
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", Some(message))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::warn!("Forbidden: {message}");
        Self::new(StatusCode::FORBIDDEN, "FORBIDDEN", Some(message))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::warn!("Conflict: {message}");
        Self::new(StatusCode::CONFLICT, "CONFLICT", Some(message))
    }
}

/// Wire shape: `{"error":{"code":..,"id"?:..,"message":..}}`. Server
/// errors additionally mint an id, echoed in the `x-error-id` header,
/// so a support ticket can be matched to the log line.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct Envelope<'a> {
            error: Body<'a>,
        }

        #[derive(Serialize)]
        struct Body<'a> {
            code: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            id: Option<&'a str>,
            message: &'a str,
        }

        let message = self
            .message
            .as_deref()
            .unwrap_or_else(|| self.status.canonical_reason().unwrap_or("Error"));

        let error_id = if self.status.is_server_error() {
            let id = kirana_types::create_id();
            tracing::error!(error_id = %id, code = self.code, "{}", message);
            Some(id)
        } else {
            None
        };

        let mut response = (
            self.status,
            Json(Envelope {
                error: Body {
                    code: self.code,
                    id: error_id.as_deref(),
                    message,
                },
            }),
        )
            .into_response();

        if let Some(id) = error_id
            && let Ok(value) = HeaderValue::from_str(&id)
        {
            response.headers_mut().insert("x-error-id", value);
        }

        response
    }
}

impl From<kirana_types::Error> for ApiError {
    fn from(err: kirana_types::Error) -> Self {
        tracing::error!("Internal error: {err:?}");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", None)
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(err: sea_orm::DbErr) -> Self {
        tracing::error!("Database error: {err:?}");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR", None)
    }
}

/// Unwraps transaction failures: connection trouble maps like any
/// other database error, an aborting `ApiError` passes through as-is.
impl From<sea_orm::TransactionError<ApiError>> for ApiError {
    fn from(err: sea_orm::TransactionError<ApiError>) -> Self {
        match err {
            sea_orm::TransactionError::Connection(db_err) => db_err.into(),
            sea_orm::TransactionError::Transaction(api_err) => api_err,
        }
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        tracing::error!("Password hashing error: {err:?}");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", None)
    }
}

impl From<qrcode::types::QrError> for ApiError {
    fn from(err: qrcode::types::QrError) -> Self {
        tracing::error!("QR encoding error: {err:?}");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "QR_ERROR", None)
    }
}

impl std::error::Error for ApiError {}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.code)
    }
}

#[macro_export]
macro_rules! bad_request {
    ($($arg:tt)*) => { $crate::error::ApiError::bad_request(format!($($arg)*)) };
}

#[macro_export]
macro_rules! not_found {
    ($($arg:tt)*) => { $crate::error::ApiError::not_found(format!($($arg)*)) };
}

#[macro_export]
macro_rules! conflict {
    ($($arg:tt)*) => { $crate::error::ApiError::conflict(format!($($arg)*)) };
}
