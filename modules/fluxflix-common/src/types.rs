use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Catalog ---

/// A movie document as stored in the catalog and served over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
}

/// One tick of a per-movie event stream. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieEvent {
    pub movie_id: String,
    pub date: DateTime<Utc>,
}

impl MovieEvent {
    /// Stamp an event for `movie_id` with the current time.
    pub fn now(movie_id: &str) -> Self {
        Self {
            movie_id: movie_id.to_string(),
            date: Utc::now(),
        }
    }
}

// --- Security ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::User => write!(f, "USER"),
        }
    }
}

/// An authenticated identity. Built once from `Config` and shared read-only.
#[derive(Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub password: String,
    pub roles: BTreeSet<Role>,
}

impl Principal {
    pub fn new(username: &str, password: &str, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            roles: roles.into_iter().collect(),
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            username: self.username.clone(),
            roles: self.roles.iter().copied().collect(),
        }
    }
}

// Keep the password out of logs.
impl std::fmt::Debug for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Principal")
            .field("username", &self.username)
            .field("roles", &self.roles)
            .finish_non_exhaustive()
    }
}

/// Public view of a principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub roles: Vec<Role>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_event_uses_wire_field_names() {
        let event = MovieEvent::now("m-1");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["movieId"], "m-1");
        assert!(json["date"].is_string());
        assert!(json.get("movie_id").is_none());
    }

    #[test]
    fn role_serializes_as_label() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(Role::User.to_string(), "USER");
    }

    #[test]
    fn principal_roles() {
        let rod = Principal::new("springrod", "pw", [Role::Admin, Role::User]);
        assert!(rod.has_role(Role::Admin));
        assert!(rod.has_role(Role::User));

        let josh = Principal::new("starbuxman", "pw", [Role::User]);
        assert!(!josh.has_role(Role::Admin));
    }

    #[test]
    fn profile_omits_password() {
        let rod = Principal::new("springrod", "secret", [Role::User, Role::Admin]);
        let json = serde_json::to_string(&rod.profile()).unwrap();
        assert_eq!(json, r#"{"username":"springrod","roles":["ADMIN","USER"]}"#);
        assert!(!format!("{rod:?}").contains("secret"));
    }
}
