//! Language detection overview and the fallback language setting.

use askama::Template;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use crate::db::{self, try_lock, LogOnError};
use crate::domain::LanguageEntry;
use crate::paths;
use crate::state::AppState;

use super::AppError;

/// Shown after a successful save
const SAVED_MESSAGE: &str = "The configuration options have been saved.";

/// Language row on the overview page
pub struct LanguageRow {
  pub code: String,
  pub name: String,
  pub suffix: String,
  pub is_default: bool,
  pub is_fallback: bool,
}

#[derive(Template)]
#[template(path = "detection.html")]
pub struct DetectionTemplate {
  pub status_message: String,
  pub rows: Vec<LanguageRow>,
  pub field_prefix: String,
  pub suffix_url: &'static str,
  pub selected_url: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct DetectionQuery {
  pub status: Option<String>,
}

pub async fn detection_page(
  State(state): State<AppState>,
  Query(query): Query<DetectionQuery>,
) -> Result<Html<String>, AppError> {
  let conn = try_lock(&state.db)?;
  let languages = db::get_languages(&conn)?;
  let fallback = db::fallback_langcode(&conn, &languages)?;
  // Unreadable mapping shows as "not configured" rather than failing the page
  let suffixes = db::get_url_suffixes(&conn)
    .log_warn_default("Failed to read URL suffixes")
    .unwrap_or_default();

  let rows = languages
    .into_iter()
    .map(|language| LanguageRow {
      suffix: suffixes.get(&language.code).unwrap_or_default().to_string(),
      is_fallback: language.code == fallback,
      code: language.code,
      name: language.name,
      is_default: language.is_default,
    })
    .collect();

  let status_message = match query.status.as_deref() {
    Some("saved") => SAVED_MESSAGE.to_string(),
    _ => String::new(),
  };

  let template = DetectionTemplate {
    status_message,
    rows,
    field_prefix: state.field_prefix(),
    suffix_url: paths::URL_SUFFIX_ROUTE,
    selected_url: paths::SELECTED_ROUTE,
  };
  Ok(Html(template.render()?))
}

// ============================================================================
// Fallback language
// ============================================================================

/// Option in the fallback language select
pub struct LanguageOption {
  pub code: String,
  pub name: String,
  pub selected: bool,
}

#[derive(Template)]
#[template(path = "selected.html")]
pub struct SelectedTemplate {
  pub action: &'static str,
  pub options: Vec<LanguageOption>,
  pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectedForm {
  pub selected_langcode: String,
}

fn render_selected(languages: &[LanguageEntry], selected: &str, error: &str) -> Result<Html<String>, AppError> {
  let options = languages
    .iter()
    .map(|language| LanguageOption {
      code: language.code.clone(),
      name: language.name.clone(),
      selected: language.code == selected,
    })
    .collect();

  let template = SelectedTemplate {
    action: paths::SELECTED_ROUTE,
    options,
    error: error.to_string(),
  };
  Ok(Html(template.render()?))
}

pub async fn selected_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
  let conn = try_lock(&state.db)?;
  let languages = db::get_languages(&conn)?;
  let fallback = db::fallback_langcode(&conn, &languages)?;

  render_selected(&languages, &fallback, "")
}

pub async fn update_selected(
  State(state): State<AppState>,
  Form(form): Form<SelectedForm>,
) -> Result<Response, AppError> {
  let conn = try_lock(&state.db)?;
  let languages = db::get_languages(&conn)?;

  if !languages.iter().any(|l| l.code == form.selected_langcode) {
    tracing::debug!("Rejected unknown fallback language '{}'", form.selected_langcode);
    let fallback = db::fallback_langcode(&conn, &languages)?;
    let page = render_selected(
      &languages,
      &fallback,
      "An illegal choice has been detected. Please contact the site administrator.",
    )?;
    return Ok(page.into_response());
  }

  db::set_selected_langcode(&conn, &form.selected_langcode)?;
  tracing::info!("Detection fallback language set to '{}'", form.selected_langcode);
  Ok(Redirect::to(&paths::detection_saved_url()).into_response())
}
