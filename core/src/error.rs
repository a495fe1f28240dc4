//! Error types for `RequestClient` calls.
//!
//! # Design
//! Every failure aborts the call and is returned to the caller as-is; nothing
//! is retried. HTTP status codes are data, not errors, unless the client opts
//! into strict status checking. Certificate failures get their own variant so
//! the remediation hint is attached exactly once, wherever they are detected.

use thiserror::Error;

/// Remediation text appended to certificate failures.
pub const INSECURE_HINT: &str =
    "you may try running it using --insecure to skip certificate validation";

pub type Result<T> = std::result::Result<T, HttpCallError>;

/// Errors returned by `RequestClient` operations and the reachability probe.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HttpCallError {
    /// The TLS handshake rejected the server certificate.
    #[error("{source}\n\n{hint}", hint = INSECURE_HINT)]
    InvalidCertificate {
        url: String,
        #[source]
        source: ureq::Error,
    },

    /// The host could not be resolved or connected to.
    #[error("{url} is unreachable: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: ureq::Error,
    },

    /// The request could not be built from the method, URL and headers.
    #[error("invalid request: {0}")]
    Construction(#[source] ureq::Error),

    /// Sending the request or receiving the response head failed.
    #[error("transport error: {0}")]
    Transport(#[source] ureq::Error),

    /// Reading the response body failed.
    #[error("failed to read response body: {0}")]
    Io(#[source] ureq::Error),

    /// The response body is not valid JSON for the requested type.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request payload could not be serialized to JSON.
    #[error("failed to encode payload: {0}")]
    Encode(#[source] serde_json::Error),

    /// A 4xx/5xx status was returned while strict status checking is enabled.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

impl HttpCallError {
    /// Whether this error carries the certificate remediation hint.
    pub fn is_certificate(&self) -> bool {
        matches!(self, HttpCallError::InvalidCertificate { .. })
    }

    /// Whether the target could not be reached at all.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            HttpCallError::InvalidCertificate { .. } | HttpCallError::Unreachable { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn certificate_error_ends_with_hint() {
        let err = HttpCallError::InvalidCertificate {
            url: "https://self-signed.local".to_string(),
            source: ureq::Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "invalid peer certificate: UnknownIssuer",
            )),
        };
        let text = err.to_string();
        assert!(text.contains("invalid peer certificate"));
        assert!(text.ends_with(&format!("\n\n{INSECURE_HINT}")));
        assert!(err.is_certificate());
        assert!(err.is_connectivity());
    }

    #[test]
    fn status_error_shows_code_and_body() {
        let err = HttpCallError::Status {
            status: 503,
            body: "down".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503: down");
        assert!(!err.is_connectivity());
    }

    #[test]
    fn unreachable_is_connectivity_without_hint() {
        let err = HttpCallError::Unreachable {
            url: "http://127.0.0.1:1".to_string(),
            source: ureq::Error::ConnectionFailed,
        };
        assert!(err.is_connectivity());
        assert!(!err.to_string().contains(INSECURE_HINT));
    }
}
