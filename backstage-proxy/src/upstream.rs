//! Booking API public-events request construction

use backstage_common::model::AccountType;
use reqwest::Url;

use crate::error::ProxyError;

/// Production booking API base
pub const DEFAULT_UPSTREAM_URL: &str = "https://data.a-boss.net/v1";

/// Validated inputs for one forwarded request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventsRequest {
    pub token: String,
    pub account_type: AccountType,
    pub project_id: String,
    pub agency_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl EventsRequest {
    /// Path segments under the upstream base
    ///
    /// Agency accounts need an agency id; without one the artist route is used.
    fn segments(&self) -> Vec<&str> {
        match (&self.account_type, &self.agency_id) {
            (AccountType::Agency, Some(agency_id)) => {
                vec!["agency", agency_id.as_str(), self.project_id.as_str(), "public_events"]
            }
            _ => vec!["artist", self.project_id.as_str(), "public_events"],
        }
    }

    /// Full upstream URL including the optional date window
    pub fn url(&self, base: &str) -> Result<Url, ProxyError> {
        let mut url = Url::parse(base)
            .map_err(|e| ProxyError::Transport(format!("Invalid upstream URL {}: {}", base, e)))?;

        url.path_segments_mut()
            .map_err(|_| ProxyError::Transport(format!("Upstream URL {} cannot have a path", base)))?
            .pop_if_empty()
            .extend(self.segments());

        if self.from.is_some() || self.to.is_some() {
            let mut query = url.query_pairs_mut();
            if let Some(from) = &self.from {
                query.append_pair("from", from);
            }
            if let Some(to) = &self.to {
                query.append_pair("to", to);
            }
        }

        Ok(url)
    }
}
