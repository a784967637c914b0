//! API router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{middleware, routing::get, routing::post, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{IdentityService, TariffService};
use crate::interfaces::http::error::{ErrorBody, ErrorData};
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::{auth, cars, health, metrics, request_id, tariffs};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from POST /auth/token"))
                        .build(),
                ),
            );
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Basic)
                        .description(Some("Configured username and password"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::issue_token,
        tariffs::update_tariffs,
        tariffs::get_tariffs,
        cars::list_cars,
    ),
    components(schemas(
        ErrorBody,
        ErrorData,
        auth::TokenRequest,
        auth::TokenResponse,
        auth::UserInfo,
        tariffs::UpdateTariffsRequest,
        tariffs::UpdateTariffsResponse,
        tariffs::DailyRateResponse,
        cars::CarResponse,
        health::HealthResponse,
        health::ComponentHealth,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and store reachability"),
        (name = "Authentication", description = "Token issuance"),
        (name = "Tariffs", description = "Per-vehicle daily rates"),
        (name = "Cars", description = "Fleet listing"),
    ),
    info(
        title = "Rental Tariffs API",
        version = "1.0.0",
        description = "Vehicle listing and daily-rate tariff maintenance for a rental fleet",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// OpenAPI document with the API paths moved under `route_prefix`.
///
/// `/health` stays at the root, like the router.
pub fn api_doc(route_prefix: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    let prefix = route_prefix.trim_end_matches('/');

    for (path, item) in std::mem::take(&mut doc.paths.paths) {
        let path = if path == "/health" {
            path
        } else {
            format!("{}{}", prefix, path)
        };
        doc.paths.paths.insert(path, item);
    }
    doc
}

/// Everything the HTTP layer needs from the runtime
#[derive(Clone)]
pub struct ApiContext {
    pub tariffs: Arc<TariffService>,
    pub identity: Arc<IdentityService>,
    pub db: DatabaseConnection,
    /// `None` when no Prometheus recorder is installed
    pub metrics: Option<PrometheusHandle>,
    pub route_prefix: String,
}

/// Create the API router with all routes
pub fn create_api_router(ctx: ApiContext) -> Router {
    let auth_state = AuthState {
        identity: ctx.identity.clone(),
    };

    // Protected tariff and car routes
    let tariff_routes = Router::new()
        .route(
            "/tariffs",
            get(tariffs::get_tariffs).post(tariffs::update_tariffs),
        )
        .route("/cars", get(cars::list_cars))
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(tariffs::TariffAppState {
            service: ctx.tariffs.clone(),
        });

    // Public token route
    let auth_routes = Router::new()
        .route("/auth/token", post(auth::issue_token))
        .with_state(auth_state);

    let api_routes = Router::new().merge(tariff_routes).merge(auth_routes);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db: ctx.db.clone(),
            started_at: Arc::new(Instant::now()),
        });

    let swagger_routes =
        SwaggerUi::new("/docs").url("/api-doc/openapi.json", api_doc(&ctx.route_prefix));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let prefix = ctx.route_prefix.trim_end_matches('/');
    let mut router = Router::new().merge(swagger_routes).merge(health_routes);

    router = if prefix.is_empty() {
        router.merge(api_routes)
    } else {
        router.nest(prefix, api_routes)
    };

    if let Some(handle) = ctx.metrics {
        router = router.route(
            "/metrics",
            get(metrics::prometheus_metrics).with_state(metrics::MetricsState { handle }),
        );
    }

    router
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ── Tests ──────────────────────────────────────────────────────
