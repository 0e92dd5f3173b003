use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Settings for the signed session cookie.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// HMAC key used to sign the cookie contents.
    pub secret: String,
    #[serde(default = "default_max_age_secs")]
    pub max_age_secs: i64,
    #[serde(default)]
    pub secure: bool,
}

fn default_cookie_name() -> String {
    "sessionName".to_string()
}

fn default_max_age_secs() -> i64 {
    // 30 days
    86400 * 30
}
