//! Wire-level types shared by the client and the probe.
//!
//! # Design
//! The request URL is never parsed or normalized here. `base_url`, `api` and
//! `args` are glued together verbatim and handed to the transport, so callers
//! own every slash and `?` in the final target.

use std::fmt;

/// Value of the `Content-Type` header sent with every request.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single request header. Headers are sent in the order the client holds them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Parse a `NAME:VALUE` pair. Whitespace around the value is trimmed.
    pub fn parse(raw: &str) -> Option<Self> {
        let (name, value) = raw.split_once(':')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self::new(name, value.trim()))
    }
}

/// Build the full request target as `base + api + args`.
pub fn request_url(base: &str, api: &str, args: &str) -> String {
    let mut url = String::with_capacity(base.len() + api.len() + args.len());
    url.push_str(base);
    url.push_str(api);
    url.push_str(args);
    url
}
