use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use crm::domain::{customer::CustomerError, DataAccessError};
use derive_more::Display;
use serde_json::json;
use tracing::debug;

/// リクエスト境界で返すエラー
#[derive(Debug, Display, PartialEq, Eq)]
pub enum ApiError {
    /// パスのIDが整数ではない
    #[display(fmt = "invalid id")]
    InvalidIdentifier,
    /// リクエストボディが不正、または必須項目が欠けている
    #[display(fmt = "invalid payload: {}", _0)]
    InvalidPayload(String),
    /// 該当する顧客がいない
    #[display(fmt = "customer not found")]
    NotFound,
    /// 静的ファイルが読めない
    #[display(fmt = "file not found")]
    FileNotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidIdentifier | ApiError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound | ApiError::FileNotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        debug!(error = %self, "リクエストを拒否しました");
        let status = self.status();
        let body = match self {
            ApiError::InvalidIdentifier => json!({
                "status": status.as_u16(),
                "message": "Invalid ID!",
            }),
            ApiError::InvalidPayload(err) => json!({
                "status": status.as_u16(),
                "message": "Invalid request!",
                "err": err,
            }),
            ApiError::NotFound => json!({
                "status": status.as_u16(),
                "message": "Customer not found!",
            }),
            ApiError::FileNotFound => json!({
                "status": status.as_u16(),
                "message": "File not found!",
            }),
        };
        (status, Json(body)).into_response()
    }
}

impl From<DataAccessError> for ApiError {
    fn from(value: DataAccessError) -> Self {
        match value {
            DataAccessError::NotFound { .. } => ApiError::NotFound,
        }
    }
}

impl From<CustomerError> for ApiError {
    fn from(value: CustomerError) -> Self {
        ApiError::InvalidPayload(value.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(value: serde_json::Error) -> Self {
        ApiError::InvalidPayload(value.to_string())
    }
}
