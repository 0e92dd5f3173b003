use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Client registration and endpoints of the federated identity provider.
///
/// Endpoints default to Google's OAuth2 API; tests point them at a mock server.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct IdentityConfig {
    /// Web client id, rendered into the sign-in page and sent on code exchange.
    pub client_id: String,
    pub client_secret: String,
    /// Client id that bearer tokens presented to `/paste` must have been issued to.
    pub expected_audience: String,
    /// "postmessage" is the redirect for the server-side code flow.
    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,
    #[serde(default = "default_scope")]
    pub scope: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    #[serde(default = "default_revoke_url")]
    pub revoke_url: String,
    #[serde(default = "default_tokeninfo_url")]
    pub tokeninfo_url: String,
}

fn default_redirect_uri() -> String {
    "postmessage".to_string()
}

fn default_scope() -> String {
    "https://www.googleapis.com/auth/plus.login".to_string()
}

fn default_token_url() -> String {
    "https://accounts.google.com/o/oauth2/token".to_string()
}

fn default_revoke_url() -> String {
    "https://accounts.google.com/o/oauth2/revoke".to_string()
}

fn default_tokeninfo_url() -> String {
    "https://www.googleapis.com/oauth2/v1/tokeninfo".to_string()
}
