use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::client::ClientError;

#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for AppError {}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self(anyhow::Error::new(err))
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        Self(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "request failed");
        let body = crate::templates::error_page(self.to_string());
        (StatusCode::BAD_GATEWAY, Html(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
