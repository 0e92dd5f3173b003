use serde::{Deserialize, Serialize};

/// An OAuth token response from the identity provider's token endpoint.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub id_token: String,
}

/// The claims we read out of an ID token payload.
#[derive(Deserialize, Debug, Default)]
pub struct ClaimSet {
    #[serde(default, alias = "Sub")]
    pub sub: String,
}

/// Response of the token-info endpoint used to validate bearer tokens.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ValidationResponse {
    #[serde(default)]
    pub issued_to: Option<String>,
    #[serde(default)]
    pub audience: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub access_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_tolerates_missing_optional_fields() {
        let token: Token = serde_json::from_str(r#"{"access_token": "ya29.abc"}"#).unwrap();
        assert_eq!(token.access_token, "ya29.abc");
        assert!(token.id_token.is_empty());
        assert_eq!(token.expires_in, 0);
    }

    #[test]
    fn test_claim_set_accepts_both_spellings() {
        let lower: ClaimSet = serde_json::from_str(r#"{"sub": "110169484474386276334"}"#).unwrap();
        let upper: ClaimSet = serde_json::from_str(r#"{"Sub": "110169484474386276334"}"#).unwrap();
        assert_eq!(lower.sub, upper.sub);
    }
}
