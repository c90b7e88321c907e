use anyhow::Context;
use axum::http::{HeaderValue, Method, header::CONTENT_TYPE};
use restaurant_search_api::api::AppState;
use restaurant_search_api::config::AppConfig;
use restaurant_search_api::storage::Store;
use restaurant_search_api::{app, importer};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("🚀 Starting Restaurant Search API Server");

    // Load configuration
    let config = AppConfig::load()?;
    info!("📋 Configuration loaded");
    info!("   - Database: {}", config.storage.db_path.display());
    info!("   - Spreadsheet export: {}", config.import.csv_path.display());
    info!("   - Server: {}:{}", config.server.host, config.server.port);

    // Initialize storage
    info!("💾 Initializing storage...");
    if let Some(parent) = config.storage.db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let store = Store::new(&config.storage.db_path);
    store.ensure_table()?;
    info!("✅ Storage ready ({} restaurants)", store.count()?);

    // Refresh the table when a spreadsheet export is present
    if config.import.csv_path.exists() {
        match importer::load_rows(&config.import.csv_path) {
            Ok(rows) if rows.is_empty() => {
                info!("📄 Export has no data rows, skipping import");
            }
            Ok(rows) => {
                let imported = store.replace_all(&rows)?;
                info!("📄 Imported {} restaurants from export", imported);
            }
            Err(e) => warn!("⚠️  Startup import failed: {e:#}"),
        }
    }

    // CORS: only the configured origins may call the API
    let origins = config
        .cors
        .allowed_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .context("invalid CORS origin in configuration")?;
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    // Create application state
    let state = AppState {
        store,
        csv_path: config.import.csv_path.clone(),
    };

    // Build router with modular routes
    let app = app(state).layer(cors).layer(TraceLayer::new_for_http());

    // Start server
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(config.server.port);
    let addr = format!("{}:{}", config.server.host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📡 Available endpoints:");
    info!("   GET  /api/hello           - Health/greeting");
    info!("   GET  /api/areas           - Distinct areas");
    info!("   GET  /api/genres          - Distinct genres");
    info!("   GET  /api/restaurants     - List all restaurants");
    info!("   POST /api/restaurants     - Filter by area/genre/people");
    info!("   GET  /api/search          - Full filtered search");
    info!("   GET  /restaurant/{{id}}     - Single restaurant");
    info!("   GET  /restaurant/{{id}}/menu - Menu sub-resource");
    info!("   GET  /api/check-db        - First 5 raw rows");
    info!("   POST /api/import          - Reload from spreadsheet export");
    info!("");
    info!("✨ Server is ready to accept requests!");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutting down gracefully");

    Ok(())
}

/// Graceful shutdown handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutdown signal received");
}
