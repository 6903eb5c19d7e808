/**
 * Router Configuration
 *
 * This module assembles the full Axum router: public account routes, the
 * auth-protected API surface, and the shared middleware stack (request
 * tracing and the CORS policy).
 */

use axum::{middleware, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::auth::auth_middleware;
use crate::routes::api_routes::{configure_protected_routes, configure_public_routes};
use crate::server::config::cors_layer;
use crate::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// Protected routes sit behind the authentication middleware; requests
/// without a valid bearer token never reach their handlers. The tracing and
/// CORS layers wrap everything.
pub fn create_router(app_state: AppState) -> Router<()> {
    let public = configure_public_routes(Router::new());

    let protected = configure_protected_routes(Router::new()).route_layer(
        middleware::from_fn_with_state(app_state.clone(), auth_middleware),
    );

    let router = public
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer()),
        )
        .fallback(|| async { "404 Not Found" });

    router.with_state(app_state)
}
