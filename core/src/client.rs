//! Blocking HTTP client that keeps the raw body of its last call.
//!
//! # Design
//! `RequestClient` is a plain struct with public fields. Callers fill in the
//! target, payload and headers, then call `get`, `post`, `delete` or
//! `query_graphql`. All four run through `execute`, which sends exactly one
//! request and stores the whole response body in `result`.
//!
//! `result` is replaced only after the body has been read completely, so a
//! failed call leaves the previous value untouched. Status codes are recorded
//! in `status` but do not fail the call unless `config.strict_status` is set.
//!
//! A client is not meant to be shared across threads while calls are in
//! flight; use one instance per thread.

use serde::de::DeserializeOwned;
use tracing::debug;
use ureq::http::Response;
use ureq::{Agent, Body, RequestBuilder};

use crate::config::ClientConfig;
use crate::error::{HttpCallError, Result};
use crate::http::{request_url, Header, HttpMethod, CONTENT_TYPE_JSON};
use crate::probe::{classify, probe};
use crate::types::GraphQLRequest;

/// Connection parameters plus the body of the most recent response.
#[derive(Debug, Clone, Default)]
pub struct RequestClient {
    /// Scheme and host, e.g. `https://api.example.com`.
    pub base_url: String,
    /// API section appended to `base_url`, e.g. `/api/facts`.
    pub api: String,
    /// Extra arguments appended after `api`, e.g. `?limit=10`.
    pub args: String,
    /// Request body. GET and DELETE only send it when it is non-empty.
    pub payload: Option<Vec<u8>>,
    /// Extra headers, sent in order. Entries with an empty name are skipped.
    pub headers: Vec<Header>,
    /// Raw body of the most recent successful call.
    pub result: Vec<u8>,
    /// Status code of the most recent successful call.
    pub status: Option<u16>,
    /// TLS, timeout and status handling for this client's calls.
    pub config: ClientConfig,
}

impl RequestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Add an authorization header such as `Authorization: Basic xyz`.
    ///
    /// Does nothing when `name` is empty.
    pub fn set_auth(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if name.is_empty() {
            return;
        }
        self.headers.push(Header::new(name, value));
    }

    /// The full request target.
    pub fn url(&self) -> String {
        request_url(&self.base_url, &self.api, &self.args)
    }

    /// GET the target and decode the response body as JSON.
    pub fn get<T: DeserializeOwned>(&mut self) -> Result<T> {
        self.execute(HttpMethod::Get)?;
        self.json()
    }

    /// POST `payload` to the target. The response is left in `result`.
    pub fn post(&mut self) -> Result<()> {
        self.execute(HttpMethod::Post)
    }

    /// DELETE the target. The response is left in `result`.
    pub fn delete(&mut self) -> Result<()> {
        self.execute(HttpMethod::Delete)
    }

    /// POST `{"query": query}` and decode the response body as JSON.
    ///
    /// GraphQL `errors` in the response are not inspected; include them in `T`
    /// to see them.
    pub fn query_graphql<T: DeserializeOwned>(&mut self, query: &str) -> Result<T> {
        let body = serde_json::to_vec(&GraphQLRequest { query }).map_err(HttpCallError::Encode)?;
        self.payload = Some(body);
        self.post()?;
        self.json()
    }

    /// Decode `result` as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.result).map_err(HttpCallError::Decode)
    }

    /// Send one request and store the response body in `result`.
    pub fn execute(&mut self, method: HttpMethod) -> Result<()> {
        let url = self.url();

        if self.config.preflight {
            probe(&self.base_url, &self.config)?;
        }

        let agent = self.config.agent(self.config.timeout);
        debug!(%method, url = %url, "sending request");

        let mut response = self
            .send(&agent, method, &url)
            .map_err(|err| classify(&url, err))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .with_config()
            .limit(self.config.body_limit)
            .read_to_vec()
            .map_err(HttpCallError::Io)?;
        debug!(%method, url = %url, status, bytes = body.len(), "received response");

        self.result = body;
        self.status = Some(status);

        if self.config.strict_status && status >= 400 {
            return Err(HttpCallError::Status {
                status,
                body: String::from_utf8_lossy(&self.result).into_owned(),
            });
        }
        Ok(())
    }

    fn send(
        &self,
        agent: &Agent,
        method: HttpMethod,
        url: &str,
    ) -> std::result::Result<Response<Body>, ureq::Error> {
        let payload = self.payload.as_deref().filter(|body| !body.is_empty());
        match method {
            HttpMethod::Get => {
                let request = self.with_headers(agent.get(url));
                match payload {
                    Some(body) => request.force_send_body().send(body),
                    None => request.call(),
                }
            }
            HttpMethod::Delete => {
                let request = self.with_headers(agent.delete(url));
                match payload {
                    Some(body) => request.force_send_body().send(body),
                    None => request.call(),
                }
            }
            HttpMethod::Post => {
                let request = self.with_headers(agent.post(url));
                match payload {
                    Some(body) => request.send(body),
                    None => request.send_empty(),
                }
            }
        }
    }

    fn with_headers<B>(&self, request: RequestBuilder<B>) -> RequestBuilder<B> {
        self.headers
            .iter()
            .filter(|header| !header.name.is_empty())
            .fold(
                request.header("Content-Type", CONTENT_TYPE_JSON),
                |request, header| request.header(header.name.as_str(), header.value.as_str()),
            )
    }
}
