use std::time::Instant;

use tracing::{debug, info, warn};
use url::Url;

use crate::config::IdentityConfig;
use crate::metrics::{Metrics, MetricsRecorder};
use crate::models::{Token, ValidationResponse};
use crate::utils::http_helpers::AppError;

/// HTTP client for the identity provider's token, revoke and token-info endpoints.
///
/// Each operation is a single request with no retry.
pub struct IdentityClient {
    config: IdentityConfig,
    http: reqwest::Client,
    metrics: Metrics,
}

/// Shortens a credential so it can appear in logs.
pub(crate) fn redact(token: &str) -> String {
    let prefix: String = token.chars().take(8).collect();
    format!("{}...", prefix)
}

impl IdentityClient {
    pub fn new(config: &IdentityConfig, metrics: Metrics) -> Self {
        info!(
            "Creating identity client for client_id='{}', token endpoint='{}'",
            config.client_id, config.token_url
        );
        Self {
            config: config.clone(),
            http: reqwest::Client::new(),
            metrics,
        }
    }

    pub fn config(&self) -> &IdentityConfig {
        &self.config
    }

    /// Exchanges a one-time authorization code for an access token and ID token.
    pub async fn exchange(&self, code: &str) -> Result<Token, AppError> {
        debug!("Exchanging authorization code at '{}'", self.config.token_url);
        let started = Instant::now();
        let result = self.request_token(code).await;
        self.observe("exchange", started, &result);
        result
    }

    async fn request_token(&self, code: &str) -> Result<Token, AppError> {
        let params = [
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let token = self
            .http
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalCall(format!("Exchanging code: {}", e)))?
            .error_for_status()
            .map_err(|e| AppError::ExternalCall(format!("Exchanging code: {}", e)))?
            .json::<Token>()
            .await
            .map_err(|e| AppError::ExternalCall(format!("Decoding access token: {}", e)))?;

        debug!(
            "Received token of type '{}' expiring in {}s: {}",
            token.token_type,
            token.expires_in,
            redact(&token.access_token)
        );
        Ok(token)
    }

    /// Revokes `access_token`.
    ///
    /// Only a transport failure is an error; the provider's status and body are not inspected
    /// beyond a warning.
    pub async fn revoke(&self, access_token: &str) -> Result<(), AppError> {
        let url = endpoint_with_query(&self.config.revoke_url, "token", access_token)?;
        debug!("Revoking token {}", redact(access_token));

        let started = Instant::now();
        let result = match self.http.get(url).send().await {
            Ok(resp) => {
                if !resp.status().is_success() {
                    warn!(status = %resp.status(), "Revoke endpoint returned a non-success status");
                }
                Ok(())
            }
            Err(e) => Err(AppError::ExternalCall(format!("Revoking token: {}", e))),
        };
        self.observe("revoke", started, &result);
        result
    }

    /// Validates a bearer token through the token-info endpoint and returns its user id.
    ///
    /// The token must have been issued to the configured `expected_audience`.
    pub async fn validate_token(&self, token: &str) -> Result<String, AppError> {
        let started = Instant::now();
        let result = self.request_token_info(token).await;
        self.observe("tokeninfo", started, &result);
        result
    }

    async fn request_token_info(&self, token: &str) -> Result<String, AppError> {
        let url = endpoint_with_query(&self.config.tokeninfo_url, "access_token", token)?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalCall(format!("Failed to validate token with error: {}", e))
            })?
            .json::<ValidationResponse>()
            .await
            .map_err(|e| AppError::ExternalCall(format!("Decoding validation response: {}", e)))?;

        info!(
            "Audience: {:?}, expected audience: {}",
            response.audience, self.config.expected_audience
        );
        if response.audience.as_deref() != Some(self.config.expected_audience.as_str()) {
            return Err(AppError::Authentication(
                "Validating token failed: audience mismatch".to_string(),
            ));
        }

        response
            .user_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::ExternalCall("token info response has no user_id".to_string()))
    }

    fn observe<T>(&self, operation: &str, started: Instant, result: &Result<T, AppError>) {
        let outcome = if result.is_ok() { "success" } else { "error" };
        self.metrics.record_identity_call(operation, outcome);
        self.metrics
            .record_identity_duration(operation, started.elapsed().as_secs_f64());
    }
}

fn endpoint_with_query(base: &str, key: &str, value: &str) -> Result<Url, AppError> {
    Url::parse_with_params(base, &[(key, value)])
        .map_err(|e| AppError::Internal(format!("Invalid identity endpoint '{}': {}", base, e)))
}
