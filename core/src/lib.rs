//! Blocking JSON-over-HTTP helper.
//!
//! # Overview
//! `RequestClient` carries a target (`base_url + api + args`), an optional
//! payload, extra headers, and the raw body of its last call. It offers GET
//! with JSON decoding, POST, DELETE, and a GraphQL query helper built on POST.
//!
//! # Design
//! - One code path (`RequestClient::execute`) sends every request.
//! - TLS verification, timeouts and status handling are per-client
//!   (`ClientConfig`); there is no global state.
//! - HTTP error statuses are returned as data unless strict status checking
//!   is enabled.
//! - Certificate failures carry a hint recommending insecure mode.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod probe;
pub mod types;

pub use client::RequestClient;
pub use config::{ClientConfig, DEFAULT_TIMEOUT, PROBE_TIMEOUT};
pub use error::{HttpCallError, Result, INSECURE_HINT};
pub use http::{Header, HttpMethod};
pub use probe::probe;
pub use types::GraphQLRequest;
