//! Show records: manually entered bookings and shows pulled from the booking API

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{ids, Error};

/// Where a show record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShowSource {
    #[default]
    Manual,
    External,
}

/// Booking status of a manually entered show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShowStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl ShowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShowStatus::Pending => "pending",
            ShowStatus::Confirmed => "confirmed",
            ShowStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ShowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShowStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(ShowStatus::Pending),
            "confirmed" => Ok(ShowStatus::Confirmed),
            "cancelled" => Ok(ShowStatus::Cancelled),
            _ => Err(Error::InvalidInput(format!("unknown show status '{}'", s))),
        }
    }
}

/// A show entered by hand
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Show {
    pub id: String,
    pub artist_id: String,
    pub venue: String,
    pub city: String,
    pub country: String,
    pub date: String,
    /// Free text in whatever currency was negotiated (`$8,500`, `¥1,200,000`)
    pub fee: String,
    pub status: ShowStatus,
    pub notes: String,
    pub source: ShowSource,
}

impl Show {
    pub fn new(artist_id: impl Into<String>, venue: impl Into<String>) -> Self {
        Self {
            id: ids::generate(),
            artist_id: artist_id.into(),
            venue: venue.into(),
            city: String::new(),
            country: String::new(),
            date: String::new(),
            fee: String::new(),
            status: ShowStatus::default(),
            notes: String::new(),
            source: ShowSource::Manual,
        }
    }
}

/// A show derived from a booking-API event
///
/// Built only by [`crate::sync::normalize`]. The whole collection is replaced
/// on every successful sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExternalShow {
    /// `aboss-{remote id}`
    pub id: String,
    pub remote_id: String,
    pub venue: String,
    pub city: String,
    pub country: String,
    /// Date part of `date_time`, or empty
    pub date: String,
    pub date_time: String,
    pub end_date_time: String,
    /// Remote vocabulary (`confirmed`, `Option`, `Offer`, ...)
    pub status: String,
    pub event_type: String,
    pub title: String,
    pub website: String,
    pub ticket_link: String,
    pub line_up: String,
    pub public_notes: String,
    /// Date still to be announced
    pub tba: bool,
    pub source: ShowSource,
}

impl Default for ExternalShow {
    fn default() -> Self {
        Self {
            id: String::new(),
            remote_id: String::new(),
            venue: String::new(),
            city: String::new(),
            country: String::new(),
            date: String::new(),
            date_time: String::new(),
            end_date_time: String::new(),
            status: String::new(),
            event_type: String::new(),
            title: String::new(),
            website: String::new(),
            ticket_link: String::new(),
            line_up: String::new(),
            public_notes: String::new(),
            tba: false,
            source: ShowSource::External,
        }
    }
}

impl ExternalShow {
    /// Minimal record for a remote id; every other field empty
    pub fn for_remote_id(remote_id: impl Into<String>) -> Self {
        let remote_id = remote_id.into();
        Self {
            id: ids::external(&remote_id),
            remote_id,
            ..Self::default()
        }
    }
}

/// Borrowed view over either kind of show, for listings that mix both
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShowRef<'a> {
    Manual(&'a Show),
    External(&'a ExternalShow),
}

impl<'a> ShowRef<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            ShowRef::Manual(s) => &s.id,
            ShowRef::External(s) => &s.id,
        }
    }

    pub fn venue(&self) -> &'a str {
        match self {
            ShowRef::Manual(s) => &s.venue,
            ShowRef::External(s) => &s.venue,
        }
    }

    pub fn city(&self) -> &'a str {
        match self {
            ShowRef::Manual(s) => &s.city,
            ShowRef::External(s) => &s.city,
        }
    }

    pub fn country(&self) -> &'a str {
        match self {
            ShowRef::Manual(s) => &s.country,
            ShowRef::External(s) => &s.country,
        }
    }

    pub fn date(&self) -> &'a str {
        match self {
            ShowRef::Manual(s) => &s.date,
            ShowRef::External(s) => &s.date,
        }
    }

    pub fn status(&self) -> &'a str {
        match self {
            ShowRef::Manual(s) => s.status.as_str(),
            ShowRef::External(s) => &s.status,
        }
    }

    pub fn source(&self) -> ShowSource {
        match self {
            ShowRef::Manual(s) => s.source,
            ShowRef::External(s) => s.source,
        }
    }
}
