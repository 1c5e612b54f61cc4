use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use crate::db::DbLockError;
use crate::suffix::PersistError;

/// Error HTML for failed requests
const ERROR_HTML: &str = r#"<!DOCTYPE html><html><head><title>Error</title></head><body><h1>The website encountered an unexpected error.</h1><p>Please try again later.</p></body></html>"#;

/// Failure that ends a request with a 500 page
#[derive(Debug, Error)]
pub enum AppError {
  #[error(transparent)]
  DbLock(#[from] DbLockError),

  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("failed to save configuration: {0}")]
  Persist(#[from] PersistError),

  #[error("failed to render template: {0}")]
  Template(#[from] askama::Error),
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    tracing::error!("{}", self);
    (StatusCode::INTERNAL_SERVER_ERROR, Html(ERROR_HTML)).into_response()
  }
}
