use std::env;
use std::time::Duration;

use crate::error::FluxflixError;
use crate::types::{Principal, Role};

/// A fixed login known to the service.
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub username: String,
    pub password: String,
    pub roles: Vec<Role>,
}

impl UserAccount {
    pub fn principal(&self) -> Principal {
        Principal::new(&self.username, &self.password, self.roles.iter().copied())
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Web server
    pub web_host: String,
    pub web_port: u16,

    // Document store. `None` selects the in-memory catalog.
    pub database_url: Option<String>,

    // Event streams
    pub event_interval: Duration,

    // Bootstrap
    pub seed_on_startup: bool,

    // Logins
    pub users: Vec<UserAccount>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web_host: "0.0.0.0".to_string(),
            web_port: 8080,
            database_url: None,
            event_interval: Duration::from_secs(1),
            seed_on_startup: true,
            users: vec![
                UserAccount {
                    username: "springrod".to_string(),
                    password: "pw".to_string(),
                    roles: vec![Role::Admin, Role::User],
                },
                UserAccount {
                    username: "starbuxman".to_string(),
                    password: "pw".to_string(),
                    roles: vec![Role::User],
                },
            ],
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, FluxflixError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup. Unset keys fall back
    /// to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, FluxflixError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let web_port = match lookup("WEB_PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| FluxflixError::Config(format!("WEB_PORT must be a number, got {raw:?}")))?,
            None => defaults.web_port,
        };

        let event_interval = match lookup("EVENT_INTERVAL_MS") {
            Some(raw) => {
                let ms: u64 = raw.parse().map_err(|_| {
                    FluxflixError::Config(format!("EVENT_INTERVAL_MS must be a number, got {raw:?}"))
                })?;
                if ms == 0 {
                    return Err(FluxflixError::Config(
                        "EVENT_INTERVAL_MS must be greater than zero".to_string(),
                    ));
                }
                Duration::from_millis(ms)
            }
            None => defaults.event_interval,
        };

        let seed_on_startup = match lookup("SEED_ON_STARTUP") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                FluxflixError::Config(format!("SEED_ON_STARTUP must be true or false, got {raw:?}"))
            })?,
            None => defaults.seed_on_startup,
        };

        let users = vec![
            UserAccount {
                username: var("ADMIN_USERNAME", "springrod"),
                password: var("ADMIN_PASSWORD", "pw"),
                roles: vec![Role::Admin, Role::User],
            },
            UserAccount {
                username: var("VIEWER_USERNAME", "starbuxman"),
                password: var("VIEWER_PASSWORD", "pw"),
                roles: vec![Role::User],
            },
        ];
        if users[0].username == users[1].username {
            return Err(FluxflixError::Config(
                "ADMIN_USERNAME and VIEWER_USERNAME must differ".to_string(),
            ));
        }

        Ok(Self {
            web_host: var("WEB_HOST", &defaults.web_host),
            web_port,
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            event_interval,
            seed_on_startup,
            users,
        })
    }

    pub fn principals(&self) -> Vec<Principal> {
        self.users.iter().map(UserAccount::principal).collect()
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
