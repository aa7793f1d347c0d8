//! HTTP Basic authentication and role authorization.
//!
//! `authenticate` runs on every request and attaches the matching `Principal`
//! as a request extension. `require_role` is layered per route from the route
//! table and turns a missing principal into 401 and a missing role into 403.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

use fluxflix_common::{Principal, Role};

use crate::error::ApiError;
use crate::AppState;

/// Username and password taken from an `Authorization: Basic` header.
#[derive(Debug, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Parse an `Authorization` header value of the form `Basic <base64(user:pass)>`.
pub fn parse_basic(header_value: &str) -> Option<Credentials> {
    let (scheme, encoded) = header_value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Constant-time comparison to prevent timing attacks.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

/// The fixed set of principals, keyed by username.
#[derive(Clone)]
pub struct UserDirectory {
    users: Arc<HashMap<String, Principal>>,
}

impl UserDirectory {
    pub fn new(principals: impl IntoIterator<Item = Principal>) -> Self {
        let users = principals
            .into_iter()
            .map(|p| (p.username.clone(), p))
            .collect();
        Self {
            users: Arc::new(users),
        }
    }

    pub fn get(&self, username: &str) -> Option<&Principal> {
        self.users.get(username)
    }

    pub fn authenticate(&self, credentials: &Credentials) -> Option<&Principal> {
        let principal = self.users.get(&credentials.username)?;
        constant_time_eq(principal.password.as_bytes(), credentials.password.as_bytes())
            .then_some(principal)
    }

    fn resolve(&self, headers: &HeaderMap) -> Option<Principal> {
        let value = headers.get(header::AUTHORIZATION)?;
        let resolved = value
            .to_str()
            .ok()
            .and_then(parse_basic)
            .and_then(|credentials| self.authenticate(&credentials));

        if resolved.is_none() {
            debug!("Rejected Authorization header");
        }
        resolved.cloned()
    }
}

/// Middleware: attach the authenticated `Principal`, if any.
pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(principal) = state.users.resolve(req.headers()) {
        req.extensions_mut().insert(principal);
    }
    next.run(req).await
}

/// Middleware: reject requests whose principal lacks `role`.
pub async fn require_role(
    State(role): State<Role>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    authorize(req.extensions().get::<Principal>(), role)?;
    Ok(next.run(req).await)
}

pub fn authorize(principal: Option<&Principal>, role: Role) -> Result<(), ApiError> {
    match principal {
        None => Err(ApiError::Unauthorized),
        Some(p) if p.has_role(role) => Ok(()),
        Some(p) => {
            debug!(username = %p.username, %role, "Missing required role");
            Err(ApiError::Forbidden)
        }
    }
}

/// The authenticated principal. Extract this in handlers behind `require_role`.
pub struct CurrentUser(pub Principal);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(CurrentUser)
            .ok_or(ApiError::Unauthorized)
    }
}
