//! User settings: connection details for the booking-API integration

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Kind of booking account the credential belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    #[default]
    Artist,
    Agency,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Artist => "artist",
            AccountType::Agency => "agency",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "artist" => Ok(AccountType::Artist),
            "agency" => Ok(AccountType::Agency),
            _ => Err(Error::InvalidInput(format!("unknown account type '{}'", s))),
        }
    }
}

/// Booking-API connection settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntegrationSettings {
    /// Opaque bearer credential
    pub token: String,
    pub project_id: String,
    pub account_type: AccountType,
    /// Only used with [`AccountType::Agency`]
    pub agency_id: String,
    /// Set after the first successful sync, never by saving a token
    pub connected: bool,
    pub last_sync: Option<DateTime<Utc>>,
}

impl IntegrationSettings {
    /// Token and project id are both present
    pub fn is_configured(&self) -> bool {
        !self.token.is_empty() && !self.project_id.is_empty()
    }
}

/// Settings snapshot, persisted separately from dashboard data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub integration: IntegrationSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.integration.account_type, AccountType::Artist);
        assert!(!settings.integration.connected);
        assert!(settings.integration.last_sync.is_none());
        assert!(!settings.integration.is_configured());
    }

    #[test]
    fn test_wire_layout() {
        let mut settings = Settings::default();
        settings.integration.token = "t".into();
        settings.integration.project_id = "99".into();

        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["integration"]["projectId"], "99");
        assert_eq!(json["integration"]["accountType"], "artist");
        assert_eq!(json["integration"]["agencyId"], "");
        assert_eq!(json["integration"]["connected"], false);
        assert!(json["integration"]["lastSync"].is_null());
    }

    #[test]
    fn test_partial_blob_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"integration":{"token":"abc"}}"#).unwrap();
        assert_eq!(settings.integration.token, "abc");
        assert_eq!(settings.integration.project_id, "");
        assert!(!settings.integration.is_configured());
    }
}
