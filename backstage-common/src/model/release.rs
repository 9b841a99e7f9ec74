//! Release records

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{ids, Error};

/// Kind of release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReleaseType {
    #[default]
    Single,
    #[serde(rename = "EP")]
    Ep,
    Album,
    Remix,
    Mixtape,
}

impl ReleaseType {
    pub const ALL: [ReleaseType; 5] = [
        ReleaseType::Single,
        ReleaseType::Ep,
        ReleaseType::Album,
        ReleaseType::Remix,
        ReleaseType::Mixtape,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseType::Single => "Single",
            ReleaseType::Ep => "EP",
            ReleaseType::Album => "Album",
            ReleaseType::Remix => "Remix",
            ReleaseType::Mixtape => "Mixtape",
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReleaseType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidInput(format!("unknown release type '{}'", s)))
    }
}

/// Production status of a release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReleaseStatus {
    #[default]
    Upcoming,
    InProgress,
    Released,
}

impl ReleaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseStatus::Upcoming => "upcoming",
            ReleaseStatus::InProgress => "in-progress",
            ReleaseStatus::Released => "released",
        }
    }
}

impl fmt::Display for ReleaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReleaseStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "upcoming" => Ok(ReleaseStatus::Upcoming),
            "in-progress" => Ok(ReleaseStatus::InProgress),
            "released" => Ok(ReleaseStatus::Released),
            _ => Err(Error::InvalidInput(format!("unknown release status '{}'", s))),
        }
    }
}

/// A single, EP, album or other release belonging to one artist
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Release {
    pub id: String,
    pub artist_id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub release_type: ReleaseType,
    pub status: ReleaseStatus,
    /// `YYYY-MM-DD`, may be empty while undated
    pub date: String,
    pub label: String,
    pub notes: String,
}

impl Release {
    /// Create an undated, unlabelled release with a fresh id
    pub fn new(artist_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: ids::generate(),
            artist_id: artist_id.into(),
            title: title.into(),
            release_type: ReleaseType::default(),
            status: ReleaseStatus::default(),
            date: String::new(),
            label: String::new(),
            notes: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_wire_names() {
        let mut release = Release::new("cyril", "New Single");
        release.release_type = ReleaseType::Ep;
        release.status = ReleaseStatus::InProgress;

        let json = serde_json::to_value(&release).unwrap();
        assert_eq!(json["artistId"], "cyril");
        assert_eq!(json["type"], "EP");
        assert_eq!(json["status"], "in-progress");
    }

    #[test]
    fn test_parse_release_type_and_status() {
        assert_eq!("ep".parse::<ReleaseType>().unwrap(), ReleaseType::Ep);
        assert_eq!("Mixtape".parse::<ReleaseType>().unwrap(), ReleaseType::Mixtape);
        assert!("bootleg".parse::<ReleaseType>().is_err());
        assert_eq!(
            "in-progress".parse::<ReleaseStatus>().unwrap(),
            ReleaseStatus::InProgress
        );
        assert!("late".parse::<ReleaseStatus>().is_err());
    }
}
