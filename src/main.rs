//! Application entry point and server initialization
//!
//! This module contains the main function that:
//! - Loads environment configuration
//! - Builds the backend client and the list views
//! - Starts the HTTP server with graceful shutdown support

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

use locadora::config::Config;
use locadora::route::create_app;
use locadora::state::init_state;

/// Application entry point
///
/// # Environment Variables
///
/// - `API_BASE_URL` - Backend REST API (default: `http://localhost:8080`)
/// - `PORT` - Server port number (default: 3000)
///
/// See [`Config::from_env`] for the remaining knobs.
#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter("locadora=debug,tower_http=debug")
        .init();

    let config = Config::from_env();
    let port = config.port;
    let api_base_url = config.api_base_url.clone();

    let state = init_state(config).expect("Failed to build the backend client");

    // Views refresh themselves whenever an action changes their data
    let _watchers = state.watch();

    let app = create_app(state).layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind the server address");

    tracing::info!("server running at http://localhost:{}", port);
    tracing::info!("using backend: {}", api_base_url);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Returns when SIGINT (Ctrl+C) or, on Unix, SIGTERM is received
///
/// Requests in flight are allowed to complete before the process exits.
async fn shutdown_signal() {
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

    tracing::info!("shutdown signal received, stopping server");
}
