//! Per-client transport configuration.
//!
//! # Design
//! TLS verification, timeouts and status handling live on each client rather
//! than in process-wide state. Two clients with different settings can run on
//! different threads at the same time without affecting each other. A fresh
//! `ureq::Agent` is built from this value for every call, so the client holds
//! no connection state between calls.

use std::time::Duration;

use ureq::tls::TlsConfig;
use ureq::Agent;

/// Fixed timeout for the reachability probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(15);

/// Default whole-call timeout for the main request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default cap on the number of response body bytes held in memory.
pub const DEFAULT_BODY_LIMIT: u64 = 10 * 1024 * 1024;

/// Transport settings owned by a single `RequestClient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Skip certificate chain and hostname verification.
    pub insecure: bool,
    /// Timeout for the main request. `None` leaves the call unbounded.
    pub timeout: Option<Duration>,
    /// Timeout for the preflight probe.
    pub probe_timeout: Duration,
    /// Issue a probe GET against the base URL before every call.
    pub preflight: bool,
    /// Turn 4xx/5xx responses into `HttpCallError::Status`.
    pub strict_status: bool,
    /// Maximum response body size.
    pub body_limit: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            insecure: false,
            timeout: Some(DEFAULT_TIMEOUT),
            probe_timeout: PROBE_TIMEOUT,
            preflight: false,
            strict_status: false,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl ClientConfig {
    /// Build a blocking agent for one call.
    ///
    /// Status codes are never reported as transport errors; the client decides
    /// what to do with them after the body has been read.
    pub fn agent(&self, timeout: Option<Duration>) -> Agent {
        Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .tls_config(
                TlsConfig::builder()
                    .disable_verification(self.insecure)
                    .build(),
            )
            .build()
            .new_agent()
    }
}
