//! Wire shapes of the two resources the API exposes, as the client sees them.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub nationality: String,
    pub phone: String,
    /// Only ever a hash, and only from some backends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishRecord {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub quick_prep: bool,
    pub prep_time: i64,
    pub cook_time: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub calories: Option<i64>,
    pub user_id: i64,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub nationality: String,
    pub phone: String,
    pub password: String,
}

impl RegisterUserRequest {
    pub fn login_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDishRequest {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quick_prep: Option<bool>,
    pub prep_time: i64,
    pub cook_time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<i64>,
}

/// Partial dish update. Unset fields are left out of the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDishRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quick_prep: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<i64>,
}

impl From<CreateDishRequest> for UpdateDishRequest {
    fn from(d: CreateDishRequest) -> Self {
        Self {
            name: Some(d.name),
            description: Some(d.description),
            quick_prep: d.quick_prep,
            prep_time: Some(d.prep_time),
            cook_time: Some(d.cook_time),
            image_url: d.image_url,
            steps: d.steps,
            calories: d.calories,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthEnvelope {
    pub user: Option<UserRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DishEnvelope {
    pub dish: Option<DishRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DishesEnvelope {
    pub dishes: Option<Vec<DishRecord>>,
}

/// Opaque `session=<token>` credential returned by login.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionHandle(String);

impl SessionHandle {
    pub(crate) fn from_token(token: &str) -> Self {
        Self(format!("session={}", token))
    }

    /// Wraps an arbitrary `Cookie` header value, for probing how the backend
    /// treats forged or malformed sessions.
    pub fn from_raw(cookie: impl Into<String>) -> Self {
        Self(cookie.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn token(&self) -> Option<&str> {
        self.0.strip_prefix("session=")
    }
}

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // tokens end up in test logs
        let shown = self.0.get(..16).unwrap_or(&self.0);
        write!(f, "SessionHandle({}…)", shown)
    }
}

/// Everything a test needs after register + login.
#[derive(Debug, Clone)]
pub struct TestUserContext {
    pub user_data: RegisterUserRequest,
    pub login_data: LoginRequest,
    pub session: SessionHandle,
    pub user: UserRecord,
}
