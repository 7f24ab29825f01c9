use serde::Deserialize;

/// Session lifetime bounds, in minutes. The upper bound is one year.
pub const MIN_SESSION_TTL_MINUTES: i64 = 1;
pub const MAX_SESSION_TTL_MINUTES: i64 = 60 * 24 * 365;
const DEFAULT_SESSION_TTL_MINUTES: i64 = 60 * 24;

/// Parses `SESSION_TTL_MINUTES`, falling back to one day and clamping to
/// [`MIN_SESSION_TTL_MINUTES`]..=[`MAX_SESSION_TTL_MINUTES`].
pub fn session_ttl_minutes(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(DEFAULT_SESSION_TTL_MINUTES)
        .clamp(MIN_SESSION_TTL_MINUTES, MAX_SESSION_TTL_MINUTES)
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let session = SessionConfig {
            secret: std::env::var("SESSION_SECRET")?,
            issuer: std::env::var("SESSION_ISSUER").unwrap_or_else(|_| "dish-harness".into()),
            audience: std::env::var("SESSION_AUDIENCE")
                .unwrap_or_else(|_| "dish-harness-users".into()),
            ttl_minutes: session_ttl_minutes(std::env::var("SESSION_TTL_MINUTES").ok().as_deref()),
        };
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = std::env::var("APP_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(3000);
        Ok(Self {
            host,
            port,
            session,
        })
    }

    /// Loopback config with a throwaway secret, for tests and local runs.
    pub fn ephemeral() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            session: SessionConfig {
                secret: uuid::Uuid::new_v4().to_string(),
                issuer: "dish-harness-test".into(),
                audience: "dish-harness-test-users".into(),
                ttl_minutes: 30,
            },
        }
    }
}

/// Where the API helpers send their requests. A path prefix in `base_url`
/// is kept in front of every endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct HarnessConfig {
    pub base_url: String,
}

impl HarnessConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
        }
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".into(),
        }
    }
}
