//! Path suffix configuration form.

use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;

use crate::config::SUFFIX_MAX_LENGTH;
use crate::db::{self, try_lock};
use crate::domain::{LanguageEntry, SuffixAssignment};
use crate::paths;
use crate::state::AppState;
use crate::suffix::{SuffixConfigManager, SuffixErrorKind, ValidationResult};

use super::AppError;

/// One text field of the form
pub struct SuffixField {
  pub name: String,
  pub title: String,
  pub value: String,
  pub has_error: bool,
  pub error: String,
  /// Blank-suffix errors link to the fallback language page
  pub links_selected: bool,
}

#[derive(Template)]
#[template(path = "url_suffix_form.html")]
pub struct SuffixFormTemplate {
  pub action: &'static str,
  pub selected_url: &'static str,
  pub field_prefix: String,
  pub max_length: usize,
  pub fields: Vec<SuffixField>,
  pub error_count: usize,
}

/// Form field name for a language, e.g. `suffix[de]`
pub fn field_name(langcode: &str) -> String {
  format!("suffix[{}]", langcode)
}

fn field_title(language: &LanguageEntry) -> String {
  if language.is_default {
    format!("{} ({}) path suffix (Default language)", language.name, language.code)
  } else {
    format!("{} ({}) path suffix", language.name, language.code)
  }
}

fn render_form(
  state: &AppState,
  languages: &[LanguageEntry],
  values: &SuffixAssignment,
  result: &ValidationResult,
) -> Result<Html<String>, AppError> {
  let fields = languages
    .iter()
    .map(|language| {
      let violation = result.for_language(&language.code);
      SuffixField {
        name: field_name(&language.code),
        title: field_title(language),
        value: values.get(&language.code).unwrap_or_default().to_string(),
        has_error: violation.is_some(),
        error: violation.map(|v| v.message.clone()).unwrap_or_default(),
        links_selected: violation
          .is_some_and(|v| v.kind == SuffixErrorKind::BlankSuffixNotAllowed),
      }
    })
    .collect();

  let template = SuffixFormTemplate {
    action: paths::URL_SUFFIX_ROUTE,
    selected_url: paths::SELECTED_ROUTE,
    field_prefix: state.field_prefix(),
    max_length: SUFFIX_MAX_LENGTH,
    fields,
    error_count: result.violations().len(),
  };
  Ok(Html(template.render()?))
}

/// Build the candidate mapping from submitted `suffix[<langcode>]` fields.
///
/// Every registry language gets an entry (blank when not submitted); unknown
/// codes are dropped. Line breaks are stripped as for any single-line field.
pub fn candidate_from_form(languages: &[LanguageEntry], fields: &[(String, String)]) -> SuffixAssignment {
  languages
    .iter()
    .map(|language| {
      let name = field_name(&language.code);
      let value = fields
        .iter()
        .rev()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.replace(['\r', '\n'], ""))
        .unwrap_or_default();
      (language.code.clone(), value)
    })
    .collect()
}

pub async fn suffix_form_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
  let conn = try_lock(&state.db)?;
  let languages = db::get_languages(&conn)?;
  let manager = SuffixConfigManager::new(&languages, &*conn);

  render_form(&state, &languages, &manager.get_defaults(), &ValidationResult::Valid)
}

pub async fn submit_suffix_form(
  State(state): State<AppState>,
  Form(fields): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
  let conn = try_lock(&state.db)?;
  let languages = db::get_languages(&conn)?;
  let fallback = db::fallback_langcode(&conn, &languages)?;
  let candidate = candidate_from_form(&languages, &fields);
  let manager = SuffixConfigManager::new(&languages, &*conn);

  let result = manager.validate(&candidate, &fallback);
  if result.is_valid() {
    manager.save(&candidate)?;
    return Ok(Redirect::to(&paths::detection_saved_url()).into_response());
  }

  let summary: Vec<String> = result
    .violations()
    .iter()
    .map(|v| format!("{}={}", v.langcode, v.kind.as_str()))
    .collect();
  tracing::debug!("Rejected URL suffixes: {}", summary.join(", "));
  Ok(render_form(&state, &languages, &candidate, &result)?.into_response())
}
