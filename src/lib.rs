// src/lib.rs
pub mod cli;
pub mod config;
pub mod decompile;
pub mod elf;
pub mod routes;

// Re-export state and config so integration tests can build routers easily.
pub use config::{Config, ConfigStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}

pub mod server {
    use axum::extract::DefaultBodyLimit;
    use axum::{
        Router,
        http::{Method, header},
        routing::{get, post},
    };
    use tower_http::cors::{Any, CorsLayer};
    use tower_http::trace::TraceLayer;

    use crate::{AppState, Config, routes};

    /// Router over the binary-analysis routes; split out so tests can
    /// drive it with `tower::ServiceExt::oneshot`.
    pub fn app(state: AppState) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]);

        Router::new()
            .route("/health", get(routes::health_check))
            .route("/binary/upload", post(routes::upload_binary))
            .route("/binary/analyze", get(routes::analyze_binary))
            .route("/binary/checksec", get(routes::checksec_binary))
            .route("/binary/strings", get(routes::strings_binary))
            .route("/binary/strings/saved", get(routes::read_saved_strings))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .layer(DefaultBodyLimit::max(64 * 1024 * 1024))
            .with_state(state)
    }

    pub async fn run_server(config: Config) -> anyhow::Result<()> {
        // The upload and logs trees must exist before the first request.
        tokio::fs::create_dir_all(&config.upload_dir).await?;
        tokio::fs::create_dir_all(&config.logs_dir).await?;

        let port = config.port;
        let state = AppState { config };
        let app = app(state);

        let listener = tokio::net::TcpListener::bind(&format!("0.0.0.0:{}", port)).await?;
        tracing::info!("Server starting on port {}", port);

        axum::serve(listener, app).await?;
        Ok(())
    }
}
