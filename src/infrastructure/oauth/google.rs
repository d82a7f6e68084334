use crate::infrastructure::repositories::RepositoryError;
use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Google accepts assertions valid for at most one hour
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Access tokens live for an hour; refresh well before that
const ACCESS_TOKEN_TTL: Duration = Duration::from_secs(45 * 60);

/// The subset of a Google service-account key file we need
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// Never print the private key
impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("project_id", &self.project_id)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

/// Claims of the self-signed JWT exchanged for an access token
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

impl AssertionClaims {
    pub fn new(key: &ServiceAccountKey, issued_at: DateTime<Utc>) -> Self {
        let iat = issued_at.timestamp();
        Self {
            iss: key.client_email.clone(),
            scope: CLOUD_PLATFORM_SCOPE.to_string(),
            aud: key.token_uri.clone(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GoogleAccessToken {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub token_type: String,
}

/// Obtains OAuth2 access tokens for a service account (JWT bearer grant)
pub struct GoogleServiceAccountClient {
    key: ServiceAccountKey,
    http_client: reqwest::Client,
    tokens: Cache<String, String>,
}

impl GoogleServiceAccountClient {
    pub fn new(key: ServiceAccountKey, http_client: reqwest::Client) -> Self {
        Self {
            key,
            http_client,
            tokens: Cache::builder()
                .max_capacity(1)
                .time_to_live(ACCESS_TOKEN_TTL)
                .build(),
        }
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    /// Return a bearer token, exchanging a fresh assertion when the cached one expired.
    /// Concurrent callers share a single in-flight exchange.
    pub async fn access_token(&self) -> Result<String, RepositoryError> {
        self.tokens
            .try_get_with(self.key.client_email.clone(), self.exchange_assertion())
            .await
            .map_err(|e| (*e).clone())
    }

    fn sign_assertion(&self) -> Result<String, RepositoryError> {
        let claims = AssertionClaims::new(&self.key, Utc::now());

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        let encoding_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .map_err(|e| {
                RepositoryError::NotConfigured(format!(
                    "invalid service account private key: {}",
                    e
                ))
            })?;

        encode(&header, &claims, &encoding_key)
            .map_err(|e| RepositoryError::Upstream(format!("Failed to sign assertion: {}", e)))
    }

    async fn exchange_assertion(&self) -> Result<String, RepositoryError> {
        let assertion = self.sign_assertion()?;
        let params = [
            ("grant_type", JWT_BEARER_GRANT_TYPE),
            ("assertion", assertion.as_str()),
        ];

        tracing::debug!(
            client_email = %self.key.client_email,
            token_uri = %self.key.token_uri,
            "Exchanging service account assertion for access token"
        );

        let response = self
            .http_client
            .post(&self.key.token_uri)
            .header("Accept", "application/json")
            .form(&params)
            .send()
            .await
            .map_err(|e| RepositoryError::Upstream(format!("Google token exchange failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(
                status = %status,
                client_email = %self.key.client_email,
                "Google token exchange rejected"
            );
            return Err(RepositoryError::Upstream(format!(
                "Google token exchange failed: {}",
                error_text
            )));
        }

        let token = response
            .json::<GoogleAccessToken>()
            .await
            .map_err(|e| RepositoryError::Upstream(format!("Failed to parse Google token: {}", e)))?;

        tracing::info!(
            client_email = %self.key.client_email,
            expires_in = token.expires_in,
            token_type = %token.token_type,
            "Google access token obtained"
        );

        Ok(token.access_token)
    }
}
