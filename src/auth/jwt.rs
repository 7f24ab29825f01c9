use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::auth::claims::Claims;
use crate::config::{SessionConfig, MAX_SESSION_TTL_MINUTES, MIN_SESSION_TTL_MINUTES};
use crate::state::AppState;

/// Signing material for session cookies.
#[derive(Clone)]
pub struct SessionKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub ttl: Duration,
}

impl FromRef<AppState> for SessionKeys {
    fn from_ref(state: &AppState) -> Self {
        let SessionConfig {
            secret,
            issuer,
            audience,
            ttl_minutes,
        } = state.config.session.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            audience,
            // configs built in code skip `from_env`, so clamp again here
            ttl: Duration::from_secs(
                ttl_minutes.clamp(MIN_SESSION_TTL_MINUTES, MAX_SESSION_TTL_MINUTES) as u64 * 60,
            ),
        }
    }
}

impl SessionKeys {
    pub fn sign(&self, user_id: i64, sid: Uuid) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            sub: user_id,
            sid,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id, %sid, "session token signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(user_id = data.claims.sub, sid = %data.claims.sid, "session token verified");
        Ok(data.claims)
    }

    /// `Set-Cookie` value carrying a fresh session token.
    pub fn cookie(&self, token: &str) -> String {
        format!(
            "session={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            token,
            self.ttl.as_secs()
        )
    }
}

/// `Set-Cookie` value that makes the browser drop the session.
pub fn cleared_cookie() -> &'static str {
    "session=; Path=/; HttpOnly; SameSite=Lax; Expires=Thu, 01 Jan 1970 00:00:00 GMT"
}
