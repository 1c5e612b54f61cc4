pub mod detection;
mod error;
pub mod suffix_form;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::paths;
use crate::state::AppState;

pub use detection::{detection_page, selected_page, update_selected};
pub use error::AppError;
pub use suffix_form::{submit_suffix_form, suffix_form_page};

/// Admin routes for language detection settings
pub fn router(state: AppState) -> Router {
  Router::new()
    .route(paths::DETECTION_ROUTE, get(detection_page))
    .route(paths::URL_SUFFIX_ROUTE, get(suffix_form_page).post(submit_suffix_form))
    .route(paths::SELECTED_ROUTE, get(selected_page).post(update_selected))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

#[cfg(test)]
mod tests;
