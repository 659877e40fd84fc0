use crate::{BasicCredentials, ServerState, auth, events, health};

use mh_config::Config;
use mh_ws::OriginPolicy;

use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
};
use log::warn;
use tower_http::cors::{Any, CorsLayer};

/// Mounting options that shape the router
#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    /// Leading slash, no trailing slash; empty mounts the API at the root
    pub route_prefix: String,
    pub basic_auth: Option<BasicCredentials>,
}

impl RouterOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            route_prefix: config.ui.route_prefix(),
            basic_auth: config
                .auth
                .credentials()
                .map(|(user, pass)| BasicCredentials::new(user, pass)),
        }
    }
}

/// Build the application router with all endpoints
pub fn build_router(state: ServerState, options: &RouterOptions) -> Router {
    let cors = cors_layer(state.hub().origin_policy());

    let mut api = Router::new()
        // Subscriber endpoint
        .route("/api/v2/websocket", get(mh_ws::handler))
        // Producer endpoint
        .route("/api/v2/events", post(events::publish));

    if let Some(credentials) = &options.basic_auth {
        api = api.layer(middleware::from_fn_with_state(
            credentials.clone(),
            auth::require_basic_auth,
        ));
    }

    let app = if options.route_prefix.is_empty() {
        api
    } else {
        Router::new().nest(&options.route_prefix, api)
    };

    app
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        .route("/metrics", get(health::metrics))
        .with_state(state)
        .layer(cors)
}

/// HTTP CORS layer matching the hub's subscriber origin policy
pub fn cors_layer(policy: &OriginPolicy) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    if policy.allows_all() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = policy
        .allowed_origins()
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Skipping CORS origin that is not a valid header value: {origin}");
                None
            }
        })
        .collect();

    layer.allow_origin(origins)
}
