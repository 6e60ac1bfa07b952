use reqwest::StatusCode;

/// Errors that can occur while talking to an external API
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    /// Missing key, endpoint or model
    #[error("Not configured: {0}")]
    NotConfigured(String),
    /// Service unreachable or timeout
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
    /// Authentication error (401/403)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// Rate limited or exceeded quota
    #[error("Rate limited: {0}")]
    RateLimited(String),
    /// Any other non-success status
    #[error("HTTP error {status}: {body}")]
    HttpError { status: u16, body: String },
    /// Invalid response format from external service
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ConnectorError {
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized(body),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited(body),
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
                Self::ServiceUnavailable(body)
            }
            _ => Self::HttpError {
                status: status.as_u16(),
                body,
            },
        }
    }
}

impl From<reqwest::Error> for ConnectorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::ServiceUnavailable(format!("Request timeout: {}", err))
        } else if err.is_connect() {
            Self::ServiceUnavailable(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::HttpError {
                status: err.status().map(|s| s.as_u16()).unwrap_or(0),
                body: err.to_string(),
            }
        }
    }
}
