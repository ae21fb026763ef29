use reqwest::StatusCode;
use thiserror::Error;

/// Errors from one HTTP call against a command or query side.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection, DNS, or timeout failure before a response arrived.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The response body does not match the expected shape. This is a
    /// contract break with the external service, not a convergence issue.
    #[error("failed to decode response body: {source}; body: {body}")]
    Decode {
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Returns true if the poller may treat this error as not-yet-satisfied.
    ///
    /// Transport and status errors are retryable: the service may not be up
    /// or caught up yet. Decode errors are fatal everywhere.
    ///
    /// # Examples
    ///
    /// ```
    /// use converge::infrastructure::http::ApiError;
    /// use reqwest::StatusCode;
    ///
    /// let error = ApiError::Status {
    ///     status: StatusCode::NOT_FOUND,
    ///     body: String::new(),
    /// };
    /// assert!(error.is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Decode { .. })
    }
}
