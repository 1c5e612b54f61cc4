use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use url_suffix::db::LogOnError;
use url_suffix::{config, db, handlers, state::AppState};

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "url_suffix=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let config = config::load();
  tracing::info!("Using database at {}", config.database_path.display());
  let pool = db::init_db(&config.database_path).expect("Failed to initialize database");

  {
    let conn = pool.lock().expect("Database lock failed during startup");
    db::seed_languages(&conn, &config.languages).expect("Failed to seed languages");
    let default_language = db::get_default_language(&conn)
      .log_warn("Failed to read default language")
      .flatten();
    if let Some(language) = default_language {
      tracing::info!("Default language: {} ({})", language.name, language.code);
    }

    // Configured fallback only applies until an admin picks one
    if let Some(code) = &config.fallback_langcode {
      db::apply_configured_fallback(&conn, code).expect("Failed to set fallback language");
    }
  }

  let app = handlers::router(AppState::new(pool, &config.base_url));

  let bind_addr = config.bind_addr();
  let listener = tokio::net::TcpListener::bind(&bind_addr)
    .await
    .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

  tracing::info!("Server running on http://{}", bind_addr);

  axum::serve(listener, app)
    .await
    .expect("Server failed to start");
}
