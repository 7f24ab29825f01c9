//! Structural assertions over response bodies.
//!
//! Each validator returns `Ok(())` or the first violation it finds; tests
//! propagate it with `?`, which fails the test on the spot.

use lazy_static::lazy_static;
use regex::Regex;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::harness::client::ApiResponse;
use crate::harness::error::{HarnessError, Result};

lazy_static! {
    static ref MAILBOX_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

#[derive(Clone, Copy, Debug)]
enum Kind {
    Integer,
    String,
    Bool,
    StringArray,
}

impl Kind {
    fn matches(self, value: &Value) -> bool {
        match self {
            Kind::Integer => value.is_i64() || value.is_u64(),
            Kind::String => value.is_string(),
            Kind::Bool => value.is_boolean(),
            Kind::StringArray => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Kind::Integer => "an integer",
            Kind::String => "a string",
            Kind::Bool => "a boolean",
            Kind::StringArray => "an array of strings",
        }
    }
}

fn structure(record: &'static str, field: &'static str, problem: impl Into<String>) -> HarnessError {
    HarnessError::Structure {
        record,
        field,
        problem: problem.into(),
    }
}

fn to_object<T: Serialize + ?Sized>(
    record: &'static str,
    value: &T,
) -> Result<serde_json::Map<String, Value>> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(structure(record, "<root>", format!("expected an object, got {other}"))),
        Err(source) => Err(HarnessError::Decode {
            what: record,
            source,
        }),
    }
}

fn required(
    record: &'static str,
    map: &serde_json::Map<String, Value>,
    fields: &[(&'static str, Kind)],
) -> Result<()> {
    for &(field, kind) in fields {
        match map.get(field) {
            None | Some(Value::Null) => return Err(structure(record, field, "missing")),
            Some(v) if !kind.matches(v) => {
                return Err(structure(record, field, format!("expected {}, got {v}", kind.name())))
            }
            Some(_) => {}
        }
    }
    Ok(())
}

fn optional(
    record: &'static str,
    map: &serde_json::Map<String, Value>,
    fields: &[(&'static str, Kind)],
) -> Result<()> {
    for &(field, kind) in fields {
        match map.get(field) {
            None | Some(Value::Null) => {}
            Some(v) if !kind.matches(v) => {
                return Err(structure(record, field, format!("expected {}, got {v}", kind.name())))
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// Checks every required user field and the mailbox format of `email`.
/// Accepts a raw JSON body or a typed record.
pub fn validate_user_structure<T: Serialize + ?Sized>(user: &T) -> Result<()> {
    const RECORD: &str = "user";
    let map = to_object(RECORD, user)?;
    required(
        RECORD,
        &map,
        &[
            ("id", Kind::Integer),
            ("firstName", Kind::String),
            ("lastName", Kind::String),
            ("email", Kind::String),
            ("nationality", Kind::String),
            ("phone", Kind::String),
        ],
    )?;
    let email = map.get("email").and_then(Value::as_str).unwrap_or_default();
    if !MAILBOX_RE.is_match(email) {
        return Err(structure(RECORD, "email", format!("{email:?} is not a mailbox")));
    }
    Ok(())
}

/// Checks every required dish field; `imageUrl` and `calories` only when non-null.
pub fn validate_dish_structure<T: Serialize + ?Sized>(dish: &T) -> Result<()> {
    const RECORD: &str = "dish";
    let map = to_object(RECORD, dish)?;
    required(
        RECORD,
        &map,
        &[
            ("id", Kind::Integer),
            ("name", Kind::String),
            ("description", Kind::String),
            ("quickPrep", Kind::Bool),
            ("prepTime", Kind::Integer),
            ("cookTime", Kind::Integer),
            ("userId", Kind::Integer),
            ("steps", Kind::StringArray),
        ],
    )?;
    optional(
        RECORD,
        &map,
        &[("imageUrl", Kind::String), ("calories", Kind::Integer)],
    )
}

/// The one way negative cases check a failure: exact status, a string
/// `error` field, and, when given, `fragment` somewhere inside it.
pub fn validate_error_response(
    response: &ApiResponse,
    expected_status: StatusCode,
    fragment: Option<&str>,
) -> Result<()> {
    const OP: &str = "error response";
    if response.status != expected_status {
        return Err(HarnessError::UnexpectedStatus {
            operation: OP,
            expected: expected_status.to_string(),
            actual: response.status,
            body: response.body.to_string(),
        });
    }
    let message = match response.body.get("error") {
        Some(Value::String(s)) => s,
        Some(other) => {
            return Err(structure(OP, "error", format!("expected a string, got {other}")))
        }
        None => {
            return Err(HarnessError::MissingField {
                operation: OP,
                field: "error",
            })
        }
    };
    if let Some(fragment) = fragment {
        if !message.contains(fragment) {
            return Err(HarnessError::Mismatch {
                operation: OP,
                field: "error",
                expected: format!("message containing {fragment:?}"),
                actual: message.clone(),
            });
        }
    }
    Ok(())
}
