//! # campus-rest - Course and Student REST API
//!
//! This crate serves the Campus API: CRUD over courses, with each course
//! carrying the ids of the students enrolled in it, plus the supporting
//! student endpoints that make enrollment possible.
//!
//! ## Features
//!
//! - **Course CRUD**: list, retrieve, create, replace, partial update, delete
//! - **Filtering**: exact match on `id` and `name` for the course list
//! - **Enrollment**: validated student ids with a per-course cap
//! - **Students**: list, retrieve, create, delete
//!
//! ## Backend Support
//!
//! - `sqlite` - SQLite backend (default)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use campus_rest::{create_app, ServerConfig};
//! use campus_persistence::backends::sqlite::SqliteBackend;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SqliteBackend::open("campus.db")?;
//!     backend.init_schema()?;
//!
//!     let app = create_app(backend);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! Every path is served with and without its trailing slash. Write bodies
//! may be JSON, `application/x-www-form-urlencoded` or `multipart/form-data`.
//!
//! | Interaction | HTTP Method | URL Pattern | Success |
//! |------------|-------------|-------------|---------|
//! | list | GET | `/api/v1/courses/` | 200 |
//! | create | POST | `/api/v1/courses/` | 201 |
//! | retrieve | GET | `/api/v1/courses/[id]/` | 200 |
//! | replace | PUT | `/api/v1/courses/[id]/` | 200 |
//! | partial update | PATCH | `/api/v1/courses/[id]/` | 200 |
//! | delete | DELETE | `/api/v1/courses/[id]/` | 204 |
//! | student list / create | GET / POST | `/api/v1/students/` | 200 / 201 |
//! | student retrieve / delete | GET / DELETE | `/api/v1/students/[id]/` | 200 / 204 |
//! | health | GET | `/health` | 200 |
//!
//! ## Error Handling
//!
//! | HTTP Status | Body | Description |
//! |-------------|------|-------------|
//! | 400 | `{"<field>": ["..."], ...}` or `{"detail": "..."}` | Validation or malformed request |
//! | 404 | `{"detail": "Not found."}` | Unknown id or path |
//! | 405 | `{"detail": "Method \"X\" not allowed."}` | Known path, unsupported method |
//! | 408 | | Request timed out |
//! | 413 | `{"detail": "..."}` | Body over the size limit |
//! | 415 | `{"detail": "..."}` | Body is neither JSON nor a form |
//! | 503 | `{"detail": "..."}` | Storage unavailable |
//! | 500 | `{"detail": "A server error occurred."}` | Internal error |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and JSON error bodies
//! - [`config`] - Server configuration
//! - [`state`] - Application state (storage, configuration)
//! - [`payload`] - Request payloads and field validation
//! - [`handlers`] - HTTP request handlers for each interaction
//! - [`extractors`] - Axum extractors for request bodies, filters and ids
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod payload;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit};
use campus_persistence::core::{Backend, CourseStorage, StudentStorage};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
///
/// # Example
///
/// ```rust,ignore
/// use campus_rest::create_app;
/// use campus_persistence::backends::sqlite::SqliteBackend;
///
/// let backend = SqliteBackend::in_memory()?;
/// backend.init_schema()?;
/// let app = create_app(backend);
/// ```
pub fn create_app<S>(storage: S) -> Router
where
    S: CourseStorage + StudentStorage + Backend + Send + Sync + 'static,
{
    create_app_with_config(storage, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use campus_rest::{create_app_with_config, ServerConfig};
/// use campus_persistence::backends::sqlite::SqliteBackend;
///
/// let backend = SqliteBackend::in_memory()?;
/// let config = ServerConfig {
///     port: 3000,
///     max_students_per_course: 30,
///     ..Default::default()
/// };
/// let app = create_app_with_config(backend, config);
/// ```
pub fn create_app_with_config<S>(storage: S, config: ServerConfig) -> Router
where
    S: CourseStorage + StudentStorage + Backend + Send + Sync + 'static,
{
    build_app(AppState::new(Arc::new(storage), config))
}

/// Builds the routes and middleware stack around an existing state.
///
/// Callers that keep their own handle on the storage (tests, embedding
/// servers) share it through the state's `Arc`.
pub fn build_app<S>(state: AppState<S>) -> Router
where
    S: CourseStorage + StudentStorage + Backend + Send + Sync + 'static,
{
    let config = state.config().clone();

    info!(
        backend = state.storage().backend_name(),
        max_students_per_course = config.max_students_per_course,
        "Creating REST API server"
    );

    let router = routing::create_routes(state);

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    let router = router.layer(DefaultBodyLimit::max(config.max_body_size));

    // Add CORS if enabled
    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    let router = router.layer(service_builder);

    // Request ids wrap everything so the trace span and every response see them
    if config.enable_request_id {
        router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    } else {
        router
    }
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    // Configure origins
    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    // Configure methods
    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    // Configure headers
    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` overrides
/// `level` when set.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "campus_rest={level},campus_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
