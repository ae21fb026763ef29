use std::fmt;
use std::time::Duration;

use reqwest::{Client as ReqwestClient, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::error::ApiError;
use crate::domain::models::config::{CredentialsConfig, HttpConfig};

/// Shared credential for HTTP basic auth.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl From<&CredentialsConfig> for Credentials {
    fn from(config: &CredentialsConfig) -> Self {
        Self {
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }
}

// Keep the password out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// HTTP client for the command and query sides.
///
/// Performs exactly one network attempt per call and attaches the shared
/// basic-auth credential; retrying is the convergence poller's concern, not
/// the transport's. Cloneable and safe for concurrent use: there is no
/// mutable per-call state.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: ReqwestClient,
    credentials: Credentials,
}

impl ApiClient {
    pub fn new(config: &HttpConfig, credentials: Credentials) -> Result<Self, ApiError> {
        let http = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(10)
            .tcp_nodelay(true)
            .build()?;

        Ok(Self { http, credentials })
    }

    /// Authenticated GET, response deserialized into `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        debug!(%url, "GET");
        self.execute(self.http.get(url), true).await
    }

    /// Authenticated POST with a JSON body, response deserialized into `T`.
    pub async fn post_json<B, T>(&self, url: Url, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(%url, "POST");
        self.execute(self.http.post(url).json(body), true).await
    }

    /// Unauthenticated POST. Customer creation is the one call made without
    /// the shared credential.
    pub async fn post_json_anonymous<B, T>(&self, url: Url, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(%url, "POST (anonymous)");
        self.execute(self.http.post(url).json(body), false).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        authenticated: bool,
    ) -> Result<T, ApiError> {
        let request = if authenticated {
            request.basic_auth(&self.credentials.username, Some(&self.credentials.password))
        } else {
            request
        };

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_string());
            return Err(ApiError::Status { status, body });
        }

        // Read the body first so a shape mismatch can report what arrived.
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| ApiError::Decode { body, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_from_default_config() {
        let client = ApiClient::new(
            &HttpConfig::default(),
            Credentials::from(&CredentialsConfig::default()),
        );
        assert!(client.is_ok());
    }

    #[test]
    fn debug_output_redacts_password() {
        let credentials = Credentials {
            username: "end_user".to_string(),
            password: "hunter2".to_string(),
        };
        let output = format!("{credentials:?}");
        assert!(output.contains("end_user"));
        assert!(!output.contains("hunter2"));
        assert!(output.contains("[REDACTED]"));
    }
}
