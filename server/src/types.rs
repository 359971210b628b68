//! Wire types for the todo service.
//!
//! # Design
//! Request payloads are decoded from a loosely typed `serde_json::Value`
//! rather than derived structs: a field with the wrong JSON type must not
//! reject the whole request. `CreateTodo` keeps a missing or non-string
//! `text` as `None` so the store reports it as a validation failure, and
//! `TodoPatch` drops mistyped fields so `update` leaves them untouched.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// A single todo item as stored and returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub text: String,
    pub completed: bool,
    #[serde(serialize_with = "iso8601_millis")]
    pub created_at: DateTime<Utc>,
}

/// Serialize as `2024-01-01T00:00:00.000Z`, the format browsers emit for
/// `Date.toISOString()`.
fn iso8601_millis<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Input for `TodoList::create`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateTodo {
    /// `None` when the payload had no `text` or it was not a string.
    pub text: Option<String>,
}

impl CreateTodo {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// Extract `text` from a decoded request body. Non-object bodies yield
    /// an empty input.
    pub fn from_json(body: &Value) -> Self {
        Self {
            text: body.get("text").and_then(Value::as_str).map(str::to_owned),
        }
    }
}

/// Partial update for `TodoList::update`. Absent fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub completed: Option<bool>,
    pub text: Option<String>,
}

impl TodoPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            text: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            completed: None,
            text: Some(text.into()),
        }
    }

    /// Keep only the fields that carry the expected JSON type.
    pub fn from_json(body: &Value) -> Self {
        Self {
            completed: body.get("completed").and_then(Value::as_bool),
            text: body.get("text").and_then(Value::as_str).map(str::to_owned),
        }
    }
}

/// Body of every error response: `{"error": "..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
