use chrono::Utc;
use http::header::COOKIE;
use http::{HeaderMap, HeaderValue};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::Session;
use crate::config::SessionConfig;
use crate::utils::http_helpers::AppError;

/// Cookie payload: the session fields plus an expiry.
#[derive(Serialize, Deserialize)]
struct SessionClaims {
    #[serde(flatten)]
    session: Session,
    exp: i64,
}

/// Stores sessions client-side as an HS256-signed JWT inside a cookie.
///
/// Nothing is persisted on the server; the signature only stops the browser from
/// editing its own session.
pub struct SessionStore {
    config: SessionConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionStore {
    pub fn new(config: &SessionConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;

        SessionStore {
            config: config.clone(),
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    /// Reads the session from the request's `Cookie` headers.
    pub fn load(&self, headers: &HeaderMap) -> Session {
        let Some(value) = self.cookie_value(headers) else {
            debug!("No session cookie, starting an empty session");
            return Session::default();
        };

        match decode::<SessionClaims>(value, &self.decoding_key, &self.validation) {
            Ok(data) => data.claims.session,
            Err(e) => {
                warn!("Discarding invalid session cookie: {}", e);
                Session::default()
            }
        }
    }

    /// Serializes `session` into a `Set-Cookie` header value.
    pub fn save(&self, session: &Session) -> Result<HeaderValue, AppError> {
        let claims = SessionClaims {
            session: session.clone(),
            exp: Utc::now().timestamp() + self.config.max_age_secs,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign session: {}", e)))?;

        let mut cookie = format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
            self.config.cookie_name, token, self.config.max_age_secs
        );
        if self.config.secure {
            cookie.push_str("; Secure");
        }

        HeaderValue::from_str(&cookie)
            .map_err(|e| AppError::Internal(format!("Invalid session cookie: {}", e)))
    }

    fn cookie_value<'a>(&self, headers: &'a HeaderMap) -> Option<&'a str> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.config.cookie_name)
            .map(|(_, value)| value.trim())
    }
}
