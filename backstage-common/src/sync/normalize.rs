//! Mapping from booking-API events to [`ExternalShow`] records
//!
//! The mapping is total: every field of [`RemoteEvent`] is optional and each
//! output field has a fallback. Empty strings count as missing.
//!
//! Field decoding is lenient. A field of an unexpected JSON type never
//! rejects the event: numbers are read as text, `lineUp` arrays are joined,
//! `tba` follows truthiness and anything else falls back to absent.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use crate::ids;
use crate::model::{ExternalShow, ShowSource};

/// Venue used when neither the location nor the event carries a title
pub const UNKNOWN_VENUE: &str = "TBA";

/// Status assumed when the event omits one
pub const DEFAULT_STATUS: &str = "confirmed";

/// Separator used when a line-up arrives as a list of names
const LINE_UP_SEPARATOR: &str = ", ";

/// Remote ids arrive as numbers or strings depending on the account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RemoteId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteId::Number(n) => write!(f, "{}", n),
            RemoteId::Text(s) => f.write_str(s),
        }
    }
}

/// Nested location of an event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteLocation {
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub country: Option<String>,
}

/// Public event as returned by the booking API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteEvent {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Option<RemoteId>,
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_location")]
    pub location: Option<RemoteLocation>,
    /// ISO 8601 start timestamp
    #[serde(deserialize_with = "lenient_text")]
    pub start: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub end: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub event_type: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub website: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub ticket_link: Option<String>,
    /// Plain text, or a list of names
    #[serde(deserialize_with = "lenient_text")]
    pub line_up: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub public_notes: Option<String>,
    /// Date not yet final
    #[serde(deserialize_with = "lenient_flag")]
    pub tba: Option<bool>,
}

/// Strings as-is, numbers as their decimal text, lists of scalars joined
fn text_of(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .into_iter()
                .filter(|item| !item.is_array())
                .filter_map(text_of)
                .filter(|s| !s.is_empty())
                .collect();
            Some(parts.join(LINE_UP_SEPARATOR))
        }
        Value::Null | Value::Bool(_) | Value::Object(_) => None,
    }
}

/// Truthiness: zero, empty text and null are false
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_of(Value::deserialize(deserializer)?))
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(truthy(&Value::deserialize(deserializer)?)))
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<RemoteId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Number(n) => Some(RemoteId::Number(n)),
        Value::String(s) => Some(RemoteId::Text(s)),
        other => Some(RemoteId::Text(other.to_string())),
    })
}

fn lenient_location<'de, D>(deserializer: D) -> Result<Option<RemoteLocation>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Date part of a timestamp: everything before the first `T`
fn date_part(start: &str) -> &str {
    start.split('T').next().unwrap_or_default()
}

/// Map one remote event into the external-show shape
pub fn normalize(event: RemoteEvent) -> ExternalShow {
    let location = event.location.unwrap_or_default();
    let title = present(event.title);
    let start = present(event.start).unwrap_or_default();
    let remote_id = event.id.map(|id| id.to_string()).unwrap_or_default();

    let venue = present(location.title)
        .or_else(|| title.clone())
        .unwrap_or_else(|| UNKNOWN_VENUE.to_string());

    ExternalShow {
        id: ids::external(&remote_id),
        remote_id,
        venue,
        city: present(location.city).unwrap_or_default(),
        country: present(location.country).unwrap_or_default(),
        date: date_part(&start).to_string(),
        date_time: start,
        end_date_time: present(event.end).unwrap_or_default(),
        status: present(event.status).unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        event_type: present(event.event_type).unwrap_or_default(),
        title: title.unwrap_or_default(),
        website: present(event.website).unwrap_or_default(),
        ticket_link: present(event.ticket_link).unwrap_or_default(),
        line_up: present(event.line_up).unwrap_or_default(),
        public_notes: present(event.public_notes).unwrap_or_default(),
        tba: event.tba.unwrap_or(false),
        source: ShowSource::External,
    }
}

/// Normalize a whole response
pub fn normalize_all(events: Vec<RemoteEvent>) -> Vec<ExternalShow> {
    events.into_iter().map(normalize).collect()
}
