//! Retry policy for release downloads with error classification.

use reqwest::StatusCode;

/// Maximum number of attempts for a download.
pub const MAX_RETRIES: usize = 3;

/// Delay between attempts in milliseconds.
pub const RETRY_DELAY_MS: u64 = 1000;

/// Errors that should not be retried.
#[derive(Debug)]
pub enum NonRetryableError {
    /// HTTP 429
    RateLimitExceeded(String),
    /// HTTP 401
    AuthenticationFailed(String),
    /// HTTP 404: no such release or no asset for this platform
    NotFound(String),
    /// HTTP 403
    Forbidden(String),
    /// Any other 4xx
    ClientError(String),
}

impl std::fmt::Display for NonRetryableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NonRetryableError::RateLimitExceeded(msg) => {
                write!(f, "Rate limit exceeded: {}. Try again later.", msg)
            }
            NonRetryableError::AuthenticationFailed(msg) => {
                write!(f, "Authentication failed: {}", msg)
            }
            NonRetryableError::NotFound(msg) => {
                write!(
                    f,
                    "Not found: {}. Check KUBERNETES_MCP_SERVER_VERSION names a published release.",
                    msg
                )
            }
            NonRetryableError::Forbidden(msg) => {
                write!(f, "Access forbidden: {}", msg)
            }
            NonRetryableError::ClientError(msg) => {
                write!(f, "Request error: {}", msg)
            }
        }
    }
}

impl std::error::Error for NonRetryableError {}

/// Classifies an HTTP error as retryable or non-retryable.
/// Returns Ok(()) if the error is retryable, Err with a user-friendly message if not.
pub fn classify_error(error: &reqwest::Error) -> Result<(), NonRetryableError> {
    let Some(status) = error.status() else {
        // Connection errors, timeouts, etc.
        return Ok(());
    };

    match status {
        StatusCode::UNAUTHORIZED => Err(NonRetryableError::AuthenticationFailed(
            "the release server rejected the request".to_string(),
        )),
        StatusCode::FORBIDDEN => Err(NonRetryableError::Forbidden(
            "the release asset is not accessible".to_string(),
        )),
        StatusCode::TOO_MANY_REQUESTS => Err(NonRetryableError::RateLimitExceeded(
            "too many requests".to_string(),
        )),
        StatusCode::NOT_FOUND => Err(NonRetryableError::NotFound(
            "the release asset does not exist".to_string(),
        )),
        s if s.is_client_error() => Err(NonRetryableError::ClientError(format!(
            "HTTP {} error",
            s.as_u16()
        ))),
        // 5xx
        _ => Ok(()),
    }
}

/// Converts an error from `error_for_status()` for the retry loop.
/// Returns the original error if retryable, or a user-friendly NonRetryableError if not.
pub fn check_retryable(error: reqwest::Error) -> anyhow::Error {
    match classify_error(&error) {
        Ok(()) => anyhow::Error::from(error),
        Err(non_retryable) => anyhow::Error::from(non_retryable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn status_error(status: usize) -> reqwest::Error {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/")
            .with_status(status)
            .create_async()
            .await;

        let response = reqwest::Client::new()
            .get(server.url())
            .send()
            .await
            .unwrap();
        response.error_for_status().unwrap_err()
    }

    #[test]
    fn test_non_retryable_error_display() {
        let err = NonRetryableError::RateLimitExceeded("test".to_string());
        assert!(err.to_string().contains("Rate limit"));

        let err = NonRetryableError::NotFound("test".to_string());
        assert!(err.to_string().contains("Not found"));
        assert!(err.to_string().contains("KUBERNETES_MCP_SERVER_VERSION"));

        let err = NonRetryableError::ClientError("HTTP 400".to_string());
        assert!(err.to_string().contains("HTTP 400"));
    }

    #[tokio::test]
    async fn test_classify_error_client_errors() {
        let err = status_error(401).await;
        assert!(matches!(
            classify_error(&err),
            Err(NonRetryableError::AuthenticationFailed(_))
        ));

        let err = status_error(403).await;
        assert!(matches!(
            classify_error(&err),
            Err(NonRetryableError::Forbidden(_))
        ));

        let err = status_error(404).await;
        assert!(matches!(
            classify_error(&err),
            Err(NonRetryableError::NotFound(_))
        ));

        let err = status_error(429).await;
        assert!(matches!(
            classify_error(&err),
            Err(NonRetryableError::RateLimitExceeded(_))
        ));

        let err = status_error(410).await;
        assert!(matches!(
            classify_error(&err),
            Err(NonRetryableError::ClientError(_))
        ));
    }

    #[tokio::test]
    async fn test_classify_error_uses_status_only() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/")
            .with_status(403)
            .with_body("API rate limit exceeded")
            .create_async()
            .await;

        let response = reqwest::Client::new()
            .get(server.url())
            .send()
            .await
            .unwrap();
        let err = response.error_for_status().unwrap_err();

        assert!(matches!(
            classify_error(&err),
            Err(NonRetryableError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_classify_error_server_error_is_retryable() {
        let err = status_error(502).await;
        assert!(classify_error(&err).is_ok());
    }

    #[tokio::test]
    async fn test_check_retryable() {
        let err = check_retryable(status_error(404).await);
        assert!(err.downcast_ref::<NonRetryableError>().is_some());

        let err = check_retryable(status_error(503).await);
        // Server errors stay as reqwest::Error so they are retried
        assert!(err.downcast_ref::<NonRetryableError>().is_none());
    }
}
