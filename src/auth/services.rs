use lazy_static::lazy_static;
use regex::Regex;

use crate::auth::dto::{LoginRequest, RegisterRequest};
use crate::error::ApiError;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub const MIN_PASSWORD_LEN: usize = 8;

/// Registration payload after presence and format checks.
#[derive(Debug)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub nationality: String,
    pub phone: String,
    pub password: String,
}

fn required(field: Option<String>) -> Result<String, ApiError> {
    match field {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::missing_fields()),
    }
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = ApiError;

    fn try_from(req: RegisterRequest) -> Result<Self, Self::Error> {
        let reg = Registration {
            first_name: required(req.first_name)?,
            last_name: required(req.last_name)?,
            email: required(req.email)?,
            nationality: required(req.nationality)?,
            phone: required(req.phone)?,
            password: required(req.password)?,
        };
        if !is_valid_email(&reg.email) {
            return Err(ApiError::bad_request("Invalid email"));
        }
        if reg.password.len() < MIN_PASSWORD_LEN {
            return Err(ApiError::bad_request("Password too short"));
        }
        Ok(reg)
    }
}

/// Login credentials after presence checks.
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for Credentials {
    type Error = ApiError;

    fn try_from(req: LoginRequest) -> Result<Self, Self::Error> {
        Ok(Credentials {
            email: required(req.email)?,
            password: required(req.password)?,
        })
    }
}
