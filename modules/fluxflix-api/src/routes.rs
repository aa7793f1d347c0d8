//! The route table and the router built from it.
//!
//! Every route names the role it requires. Requests pass through
//! authenticate → require_role → handler. A known path hit with the wrong
//! method is authorized against that route's role before it gets a 405, and
//! unmatched paths are authorized against `FALLBACK_ROLE` before a 404.

use std::sync::Arc;

use axum::{
    extract::Request,
    handler::Handler,
    http::Method,
    middleware,
    routing::{get, MethodRouter},
    Router,
};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tracing::debug;

use fluxflix_common::{Principal, Role};

use crate::auth;
use crate::error::ApiError;
use crate::rest;
use crate::AppState;

pub const FALLBACK_ROLE: Role = Role::Admin;

pub struct Route {
    pub method: Method,
    pub path: &'static str,
    pub role: Role,
    handler: MethodRouter<Arc<AppState>>,
}

impl Route {
    fn get<H, T>(path: &'static str, role: Role, handler: H) -> Self
    where
        H: Handler<T, Arc<AppState>>,
        T: 'static,
    {
        Self {
            method: Method::GET,
            path,
            role,
            handler: get(handler),
        }
    }
}

pub fn route_table() -> Vec<Route> {
    vec![
        // Movies
        Route::get("/movies", Role::Admin, rest::list_movies),
        Route::get("/movies/{id}", Role::Admin, rest::get_movie),
        Route::get("/movies/{id}/events", Role::Admin, rest::movie_events),
        // Users
        Route::get("/users/me", Role::Admin, rest::current_user),
        Route::get("/users/{name}", Role::Admin, rest::get_user),
    ]
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new();
    for route in route_table() {
        debug!(method = %route.method, path = route.path, role = %route.role, "Registering route");
        let role = route.role;
        let guard = middleware::from_fn_with_state(role, auth::require_role);
        let handler = route
            .handler
            .route_layer(guard)
            .fallback(move |req: Request| rejection(req, role, ApiError::MethodNotAllowed));
        router = router.route(route.path, handler);
    }

    router
        .fallback(fallback)
        .layer(middleware::from_fn_with_state(state.clone(), auth::authenticate))
        // Logging layer: method + path + status + latency only (no headers)
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
        .with_state(state)
}

/// The router wrapped so that `/movies/` and `/movies` are the same route.
pub fn build_app(state: Arc<AppState>) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state))
}

async fn fallback(req: Request) -> ApiError {
    rejection(req, FALLBACK_ROLE, ApiError::NotFound).await
}

/// `otherwise` once the caller holds `role`, the auth failure before that.
async fn rejection(req: Request, role: Role, otherwise: ApiError) -> ApiError {
    match auth::authorize(req.extensions().get::<Principal>(), role) {
        Ok(()) => otherwise,
        Err(e) => e,
    }
}
