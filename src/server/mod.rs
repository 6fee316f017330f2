/// HTTP server: routes, middleware and startup
///
/// | Method | Path | Handler |
/// |---|---|---|
/// | GET | `/`, `/index.html` | study page |
/// | GET | `/api/flashcards` | filtered list |
/// | POST | `/api/flashcards` | create |
/// | PUT | `/api/flashcards/{id}` | record a review |
/// | GET | `/api/categories` | category counts |
/// | OPTIONS | any | CORS preflight, empty body |
///
/// Anything else is a plain-text 404. Every response carries a wildcard
/// `Access-Control-Allow-Origin`.

pub mod error;
pub mod routes;
pub mod state;

use crate::config::Config;
use crate::db::Database;
use crate::error::Result;
use axum::http::{header::CONTENT_TYPE, Method};
use axum::middleware::from_fn_with_state;
use axum::routing::{get, put};
use axum::Router;
use error::{error_boundary, panic_response};
use routes::{
    categories_handler, create_flashcard_handler, index_handler, list_flashcards_handler,
    not_found_handler, update_progress_handler,
};
use state::AppState;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

pub fn app(state: Arc<AppState>) -> Router {
    let router = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route(
            "/api/flashcards",
            get(list_flashcards_handler).post(create_flashcard_handler),
        )
        .route("/api/flashcards/{id}", put(update_progress_handler))
        .route("/api/categories", get(categories_handler))
        .fallback(not_found_handler)
        .method_not_allowed_fallback(not_found_handler);

    with_layers(router, state)
}

/// Layers, innermost first: panic catcher, error boundary, request tracing, CORS
fn with_layers(router: Router<Arc<AppState>>, state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]);

    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(from_fn_with_state(state.clone(), error_boundary))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        fmt().with_env_filter(filter).json().init();
    } else {
        fmt().with_env_filter(filter).init();
    }
}

pub async fn start_server(config: Config) -> Result<()> {
    info!("Opening database at {}", config.db_path.display());
    let db = Database::new(&config.db_path).await?;

    let address = config.address();
    let state = AppState::new(config, db);

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app(state.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.db.close().await;
    info!("Server shut down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
