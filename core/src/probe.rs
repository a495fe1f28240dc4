//! Reachability probe and transport error classification.
//!
//! A failed call is classified once, after the fact: certificate problems get
//! the `--insecure` hint, connection failures become `Unreachable`, malformed
//! requests become `Construction`, and everything else is a plain transport
//! error. `probe` is only used when a client asks for a preflight round trip.

use std::io::ErrorKind;

use tracing::{debug, warn};
use ureq::Timeout;

use crate::config::ClientConfig;
use crate::error::{HttpCallError, Result};

/// Issue a plain GET against `url` with the probe timeout.
///
/// Any HTTP response, whatever its status, counts as reachable.
pub fn probe(url: &str, config: &ClientConfig) -> Result<()> {
    let agent = config.agent(Some(config.probe_timeout));
    match agent.get(url).call() {
        Ok(response) => {
            debug!(url, status = response.status().as_u16(), "probe succeeded");
            Ok(())
        }
        Err(err) => Err(classify(url, err)),
    }
}

/// Whether an error message describes a TLS certificate failure.
pub fn is_certificate_error(text: &str) -> bool {
    text.to_ascii_lowercase().contains("certificate")
}

/// Map a transport failure for `url` onto `HttpCallError`.
pub fn classify(url: &str, err: ureq::Error) -> HttpCallError {
    if is_certificate_error(&err.to_string()) {
        warn!(url, error = %err, "certificate validation failed");
        return HttpCallError::InvalidCertificate {
            url: url.to_string(),
            source: err,
        };
    }

    let unreachable = match &err {
        ureq::Error::HostNotFound | ureq::Error::ConnectionFailed => true,
        ureq::Error::Timeout(Timeout::Connect | Timeout::Resolve) => true,
        ureq::Error::Io(io) => matches!(
            io.kind(),
            ErrorKind::ConnectionRefused
                | ErrorKind::ConnectionReset
                | ErrorKind::ConnectionAborted
                | ErrorKind::NotConnected
                | ErrorKind::AddrNotAvailable
        ),
        _ => false,
    };
    if unreachable {
        return HttpCallError::Unreachable {
            url: url.to_string(),
            source: err,
        };
    }

    match err {
        ureq::Error::BadUri(_) | ureq::Error::Http(_) => HttpCallError::Construction(err),
        other => HttpCallError::Transport(other),
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn certificate_text_is_detected_case_insensitively() {
        assert!(is_certificate_error("invalid peer certificate: UnknownIssuer"));
        assert!(is_certificate_error("x509: Certificate signed by unknown authority"));
        assert!(!is_certificate_error("connection refused"));
    }

    #[test]
    fn certificate_failure_gets_hint() {
        let err = ureq::Error::Io(io::Error::new(
            ErrorKind::InvalidData,
            "invalid peer certificate: NotValidForName",
        ));
        let classified = classify("https://internal.local", err);
        assert!(classified.is_certificate());
        assert!(classified
            .to_string()
            .contains(crate::error::INSECURE_HINT));
    }

    #[test]
    fn refused_connection_is_unreachable() {
        let err = ureq::Error::Io(io::Error::from(ErrorKind::ConnectionRefused));
        let classified = classify("http://127.0.0.1:1", err);
        assert!(matches!(classified, HttpCallError::Unreachable { .. }));
    }

    #[test]
    fn unknown_host_is_unreachable() {
        let classified = classify("http://nowhere.invalid", ureq::Error::HostNotFound);
        assert!(matches!(classified, HttpCallError::Unreachable { .. }));
    }

    #[test]
    fn connect_and_resolve_timeouts_are_unreachable() {
        for timeout in [Timeout::Connect, Timeout::Resolve] {
            let classified = classify("http://10.255.255.1", ureq::Error::Timeout(timeout));
            assert!(classified.is_connectivity(), "{timeout:?}");
        }
    }

    #[test]
    fn response_timeout_is_transport_error() {
        let classified = classify("http://h", ureq::Error::Timeout(Timeout::RecvResponse));
        assert!(matches!(classified, HttpCallError::Transport(_)));
    }

    #[test]
    fn bad_uri_is_construction_error() {
        let classified = classify("::", ureq::Error::BadUri("::".to_string()));
        assert!(matches!(classified, HttpCallError::Construction(_)));
    }

    #[test]
    fn other_failures_are_transport_errors() {
        let classified = classify("http://h", ureq::Error::TooManyRedirects);
        assert!(matches!(classified, HttpCallError::Transport(_)));
    }

    #[test]
    fn probe_against_closed_port_fails_without_hint() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = probe(&format!("http://{addr}"), &ClientConfig::default()).unwrap_err();
        assert!(err.is_connectivity());
        assert!(!err.is_certificate());
    }
}
