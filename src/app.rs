use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::{get, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::JwtAuth;
use crate::config::{AppConfig, Environment, SecurityConfig};
use crate::database::ContactStore;
use crate::handlers::{contacts, root};
use crate::middleware::{auth::AUTH_TOKEN_HEADER, jwt_auth_middleware};
use crate::services::ContactService;

/// Shared handler dependencies, cloned into every request
#[derive(Clone)]
pub struct AppState {
    pub contacts: ContactService,
    pub auth: Arc<JwtAuth>,
}

impl AppState {
    pub fn new(store: Arc<dyn ContactStore>, auth: JwtAuth) -> Self {
        Self {
            contacts: ContactService::new(store),
            auth: Arc::new(auth),
        }
    }
}

pub fn app(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        // Public
        .route("/", get(root::root))
        .route("/health", get(root::health))
        // Protected API
        .merge(contact_routes(state.clone()))
        // Global middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(config.environment, &config.security))
                .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes)),
        )
        .with_state(state)
}

fn contact_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/contacts", get(contacts::list).post(contacts::create))
        .route("/api/contacts/:id", put(contacts::update).delete(contacts::delete))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(environment: Environment, security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }
    if environment == Environment::Development {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(AUTH_TOKEN_HEADER),
        ])
}
