//! Frontend Models
//!
//! Data structures matching backend payloads.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a todo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum TodoState {
    #[default]
    Todo,
    Doing,
    Done,
    Archived,
}

impl TodoState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoState::Todo => "TODO",
            TodoState::Doing => "DOING",
            TodoState::Done => "DONE",
            TodoState::Archived => "ARCHIVED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "TODO" => Some(TodoState::Todo),
            "DOING" => Some(TodoState::Doing),
            "DONE" => Some(TodoState::Done),
            "ARCHIVED" => Some(TodoState::Archived),
            _ => None,
        }
    }

    /// Human label
    pub fn label(&self) -> &'static str {
        match self {
            TodoState::Todo => "TO DO",
            TodoState::Doing => "DOING",
            TodoState::Done => "DONE",
            TodoState::Archived => "ARCHIVED",
        }
    }

    /// Archived todos never appear on the board
    pub fn is_visible(&self) -> bool {
        !matches!(self, TodoState::Archived)
    }
}

/// Todo data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Todo {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub state: TodoState,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub deadline: Option<NaiveDateTime>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: NaiveDateTime,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub updated_at: NaiveDateTime,
    pub owner_id: u32,
}

/// Body of `POST /todos`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodoCreate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDateTime>,
}

/// Body of `PATCH /todos/{id}`; only present fields are sent
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TodoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<TodoState>,
}

/// Response of `POST /auth/token`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Body of `POST /auth/register`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Form fields of `POST /auth/token`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Backend date-times arrive with or without an offset and with optional
/// fractional seconds; `datetime-local` inputs drop the seconds entirely.
/// Values are kept as wall-clock time in the browser's zone.
pub mod timestamp {
    use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
    use serde::{de, Deserialize, Deserializer};

    const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

    pub fn parse(raw: &str) -> Option<NaiveDateTime> {
        parse_in(raw, &Local)
    }

    /// Offset-carrying values are shifted into `tz`; naive ones are taken
    /// as already being wall-clock time there.
    pub fn parse_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(tz).naive_local())
            .ok()
            .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok())
            .or_else(|| NaiveDateTime::parse_from_str(raw, INPUT_FORMAT).ok())
    }

    /// Value for a `datetime-local` input
    pub fn to_input(ts: &NaiveDateTime) -> String {
        ts.format(INPUT_FORMAT).to_string()
    }

    /// Current local minute, as a `datetime-local` lower bound
    pub fn now_input() -> String {
        to_input(&Local::now().naive_local())
    }

    pub fn display(ts: &NaiveDateTime) -> String {
        ts.format("%Y-%m-%d %H:%M").to_string()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw)))
    }

    pub fn deserialize_option<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw))),
            None => Ok(None),
        }
    }
}
