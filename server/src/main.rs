mod api;
mod auth;
mod config;
mod db;
mod models;
mod schema;
mod store;
mod telemetry;

use std::env;
use std::sync::Arc;

use axum::extract::MatchedPath;
use axum::http::{header, HeaderValue, Method, Request};
use axum::Router;
use ladle_core::generate::{RecipeGenerator, WebhookGenerator};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Span;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::AuthMode;
use crate::config::Config;

/// Application state shared across all handlers.
pub struct AppContext {
    pub pool: db::DbPool,
    pub auth: AuthMode,
    pub generator: Arc<dyn RecipeGenerator>,
}

pub type AppState = Arc<AppContext>;

/// The single CORS policy for every route, built from configuration.
/// Origins are declared once here rather than per route.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

#[tokio::main]
async fn main() {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        let spec = api::openapi().to_pretty_json().unwrap();
        println!("{}", spec);
        return;
    }

    telemetry::init();

    let config = Config::load();
    let cors = cors_layer(&config.allowed_origins);

    let pool = db::init_pool(&config.database_url);
    let generator: Arc<dyn RecipeGenerator> =
        Arc::new(WebhookGenerator::new(config.webhook_url.clone()));

    let state: AppState = Arc::new(AppContext {
        pool,
        auth: config.auth.clone(),
        generator,
    });

    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    let app = Router::new()
        .merge(api::public::router())
        .merge(api::generate::router())
        .nest("/recipes", api::recipes::router())
        .merge(swagger_ui)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());

                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %matched_path,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &Span| {
                        let status = response.status().as_u16();
                        if status >= 500 {
                            tracing::error!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request failed with server error"
                            );
                        } else {
                            tracing::info!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request completed"
                            );
                        }
                    },
                ),
        );

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .unwrap();

    tracing::info!("Server listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}

#[cfg(test)]
pub mod test_support {
    use super::{AppContext, AppState};
    use crate::auth::AuthMode;
    use diesel::r2d2::ConnectionManager;
    use diesel::PgConnection;
    use ladle_core::{FakeGenerator, RecipeGenerator};
    use std::sync::Arc;

    /// State for handler tests. The pool is built lazily and never
    /// connected; tests that would touch it must fail before the store.
    pub fn test_state_with(generator: Arc<FakeGenerator>, auth: AuthMode) -> AppState {
        let manager = ConnectionManager::<PgConnection>::new("postgres://localhost/unused");
        let pool = diesel::r2d2::Pool::builder().build_unchecked(manager);
        let generator: Arc<dyn RecipeGenerator> = generator;

        Arc::new(AppContext {
            pool,
            auth,
            generator,
        })
    }

    pub fn test_state(generator: FakeGenerator, auth: AuthMode) -> AppState {
        test_state_with(Arc::new(generator), auth)
    }
}
