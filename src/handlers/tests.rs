use axum::http::StatusCode;
use axum_test::TestServer;

use super::router;
use crate::config::LanguageSeed;
use crate::db;
use crate::domain::SuffixAssignment;
use crate::paths;
use crate::testing::TestEnv;

fn server(env: &TestEnv) -> TestServer {
  TestServer::new(router(env.state())).unwrap()
}

fn stored(env: &TestEnv) -> Option<SuffixAssignment> {
  db::get_url_suffixes(&env.pool.lock().unwrap()).unwrap()
}

fn location(response: &axum_test::TestResponse) -> String {
  response.header("location").to_str().unwrap().to_string()
}

#[tokio::test]
async fn test_form_shows_default_suffixes() {
  let env = TestEnv::new().unwrap();
  let response = server(&env).get(paths::URL_SUFFIX_ROUTE).await;

  response.assert_status_ok();
  let body = response.text();
  assert!(body.contains("Path suffix configuration"));
  assert!(body.contains("English (en) path suffix (Default language)"));
  assert!(body.contains("German (de) path suffix"));
  assert!(body.contains(r#"name="suffix[fr]" value="fr""#));
  assert!(body.contains("https://example.com/index_"));
  assert!(body.contains(r#"maxlength="64""#));
}

#[tokio::test]
async fn test_form_shows_stored_suffixes() {
  let env = TestEnv::new().unwrap();
  {
    let conn = env.pool.lock().unwrap();
    let suffixes: SuffixAssignment = [("de", "deutsch")].into_iter().collect();
    crate::suffix::ConfigStore::set_mapping(&*conn, crate::config::URL_SUFFIXES_KEY, &suffixes).unwrap();
  }

  let body = server(&env).get(paths::URL_SUFFIX_ROUTE).await.text();
  assert!(body.contains(r#"name="suffix[de]" value="deutsch""#));
  assert!(body.contains(r#"name="suffix[en]" value="en""#));
}

#[tokio::test]
async fn test_valid_submission_saves_and_redirects() {
  let env = TestEnv::new().unwrap();
  let server = server(&env);

  let response = server
    .post(paths::URL_SUFFIX_ROUTE)
    .form(&[("suffix[en]", ""), ("suffix[fr]", "francais"), ("suffix[de]", "deutsch")])
    .await;

  response.assert_status(StatusCode::SEE_OTHER);
  assert_eq!(location(&response), paths::detection_saved_url());

  let expected: SuffixAssignment =
    [("en", ""), ("fr", "francais"), ("de", "deutsch")].into_iter().collect();
  assert_eq!(stored(&env), Some(expected));

  let overview = server.get(&paths::detection_saved_url()).await;
  overview.assert_status_ok();
  let body = overview.text();
  assert!(body.contains("The configuration options have been saved."));
  assert!(body.contains("https://example.com/index_deutsch"));
}

#[tokio::test]
async fn test_duplicate_submission_rejected_without_saving() {
  let env = TestEnv::new().unwrap();

  let response = server(&env)
    .post(paths::URL_SUFFIX_ROUTE)
    .form(&[("suffix[en]", ""), ("suffix[fr]", "x"), ("suffix[de]", "x")])
    .await;

  response.assert_status_ok();
  let body = response.text();
  assert!(body.contains("The suffix for French, x, is not unique."));
  assert!(body.contains("The suffix for German, x, is not unique."));
  // Submitted values are kept in the re-rendered form
  assert!(body.contains(r#"name="suffix[de]" value="x""#));
  assert_eq!(stored(&env), None);
}

#[tokio::test]
async fn test_blank_suffix_links_to_fallback_setting() {
  let env = TestEnv::new().unwrap();

  let response = server(&env)
    .post(paths::URL_SUFFIX_ROUTE)
    .form(&[("suffix[en]", "en"), ("suffix[fr]", ""), ("suffix[de]", "de")])
    .await;

  let body = response.text();
  assert!(body.contains(&format!(
    r#"<a href="{}">The suffix may only be left blank for the selected detection fallback language.</a>"#,
    paths::SELECTED_ROUTE
  )));
  assert_eq!(stored(&env), None);
}

#[tokio::test]
async fn test_slash_rejected() {
  let env = TestEnv::new().unwrap();

  let body = server(&env)
    .post(paths::URL_SUFFIX_ROUTE)
    .form(&[("suffix[en]", "a/b"), ("suffix[fr]", "fr"), ("suffix[de]", "de")])
    .await
    .text();

  assert!(body.contains("The suffix may not contain a slash."));
  assert_eq!(stored(&env), None);
}

#[tokio::test]
async fn test_changed_fallback_allows_its_blank_suffix() {
  let env = TestEnv::new().unwrap();
  let server = server(&env);

  let response = server
    .post(paths::SELECTED_ROUTE)
    .form(&[("selected_langcode", "fr")])
    .await;
  response.assert_status(StatusCode::SEE_OTHER);

  let response = server
    .post(paths::URL_SUFFIX_ROUTE)
    .form(&[("suffix[en]", "en"), ("suffix[fr]", ""), ("suffix[de]", "de")])
    .await;
  response.assert_status(StatusCode::SEE_OTHER);
  assert_eq!(stored(&env).unwrap().get("fr"), Some(""));

  // English is no longer the fallback
  let body = server
    .post(paths::URL_SUFFIX_ROUTE)
    .form(&[("suffix[en]", ""), ("suffix[fr]", ""), ("suffix[de]", "de")])
    .await
    .text();
  assert!(body.contains("The suffix may only be left blank"));
}

#[tokio::test]
async fn test_unknown_fallback_rejected() {
  let env = TestEnv::new().unwrap();
  let server = server(&env);

  let response = server
    .post(paths::SELECTED_ROUTE)
    .form(&[("selected_langcode", "xx")])
    .await;

  response.assert_status_ok();
  assert!(response.text().contains("An illegal choice has been detected."));
  let conn = env.pool.lock().unwrap();
  assert_eq!(db::get_selected_langcode(&conn).unwrap(), None);
}

#[tokio::test]
async fn test_selected_page_marks_current_fallback() {
  let env = TestEnv::new().unwrap();

  let body = server(&env).get(paths::SELECTED_ROUTE).await.text();
  assert!(body.contains(r#"<option value="en" selected>English</option>"#));
  assert!(body.contains(r#"<option value="fr">French</option>"#));
}

#[tokio::test]
async fn test_store_failure_returns_server_error() {
  let env = TestEnv::new().unwrap();
  env
    .pool
    .lock()
    .unwrap()
    .execute_batch(
      "CREATE TRIGGER settings_read_only BEFORE INSERT ON settings BEGIN SELECT RAISE(ABORT, 'read-only'); END;",
    )
    .unwrap();

  let response = server(&env)
    .post(paths::URL_SUFFIX_ROUTE)
    .form(&[("suffix[en]", "en"), ("suffix[fr]", "fr"), ("suffix[de]", "de")])
    .await;

  response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
  assert!(response.text().contains("unexpected error"));
  assert_eq!(stored(&env), None);
}

#[tokio::test]
async fn test_rejected_submission_keeps_stored_mapping() {
  let env = TestEnv::new().unwrap();
  let server = server(&env);

  server
    .post(paths::URL_SUFFIX_ROUTE)
    .form(&[("suffix[en]", ""), ("suffix[fr]", "francais"), ("suffix[de]", "deutsch")])
    .await
    .assert_status(StatusCode::SEE_OTHER);
  let saved = stored(&env);

  let response = server
    .post(paths::URL_SUFFIX_ROUTE)
    .form(&[("suffix[en]", "a/b"), ("suffix[fr]", "x"), ("suffix[de]", "x")])
    .await;

  response.assert_status_ok();
  assert!(response.text().contains("The suffix may not contain a slash."));
  assert_eq!(stored(&env), saved);
  assert_eq!(stored(&env).unwrap().get("de"), Some("deutsch"));
}

#[tokio::test]
async fn test_unregistered_selection_falls_back_to_default_language() {
  let env = TestEnv::new().unwrap();
  db::set_selected_langcode(&env.pool.lock().unwrap(), "xx").unwrap();
  let server = server(&env);

  let body = server.get(paths::SELECTED_ROUTE).await.text();
  assert!(body.contains(r#"<option value="en" selected>English</option>"#));

  server
    .post(paths::URL_SUFFIX_ROUTE)
    .form(&[("suffix[en]", ""), ("suffix[fr]", "fr"), ("suffix[de]", "de")])
    .await
    .assert_status(StatusCode::SEE_OTHER);
  assert_eq!(stored(&env).unwrap().get("en"), Some(""));
}

#[tokio::test]
async fn test_reseeded_registry_drives_the_form() {
  let env = TestEnv::new().unwrap();
  db::seed_languages(
    &env.pool.lock().unwrap(),
    &[
      LanguageSeed::new("en", "English", 0, true),
      LanguageSeed::new("de", "Deutsch", 1, false),
    ],
  )
  .unwrap();
  let server = server(&env);

  let body = server.get(paths::URL_SUFFIX_ROUTE).await.text();
  assert!(body.contains("Deutsch (de) path suffix"));
  assert!(!body.contains("suffix[fr]"));

  server
    .post(paths::URL_SUFFIX_ROUTE)
    .form(&[("suffix[en]", ""), ("suffix[de]", "deutsch")])
    .await
    .assert_status(StatusCode::SEE_OTHER);

  let expected: SuffixAssignment = [("en", ""), ("de", "deutsch")].into_iter().collect();
  assert_eq!(stored(&env), Some(expected));
}
