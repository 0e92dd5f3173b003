use std::convert::Infallible;

use axum::async_trait;
use axum::extract::FromRequestParts;
use http::request::Parts;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// What we remember about a browser between requests.
///
/// "Connected" simply means both `access_token` and `gplus_id` are present.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Anti-forgery token issued with the last rendered page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Federated identity of the signed-in user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gplus_id: Option<String>,
}

impl Session {
    /// True when `submitted` equals the stored anti-forgery token.
    pub fn state_matches(&self, submitted: Option<&str>) -> bool {
        match (self.state.as_deref(), submitted) {
            (Some(stored), Some(submitted)) => !stored.is_empty() && stored == submitted,
            _ => false,
        }
    }

    pub fn is_connected_as(&self, gplus_id: &str) -> bool {
        self.access_token.is_some() && self.gplus_id.as_deref() == Some(gplus_id)
    }
}

/// Extractor: loads the session from the request cookie. Never fails; an absent or
/// invalid cookie yields an empty session.
#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Infallible> {
        Ok(state.sessions.load(&parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_must_be_present_on_both_sides() {
        let session = Session {
            state: Some("abc".into()),
            ..Default::default()
        };
        assert!(session.state_matches(Some("abc")));
        assert!(!session.state_matches(Some("abd")));
        assert!(!session.state_matches(None));
        assert!(!Session::default().state_matches(Some("abc")));
        assert!(!Session::default().state_matches(None));
    }

    #[test]
    fn test_connected_requires_token_and_matching_id() {
        let mut session = Session {
            gplus_id: Some("X".into()),
            ..Default::default()
        };
        assert!(!session.is_connected_as("X"));
        session.access_token = Some("ya29".into());
        assert!(session.is_connected_as("X"));
        assert!(!session.is_connected_as("Y"));
    }
}
