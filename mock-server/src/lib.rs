use std::collections::BTreeMap;

use axum::{
    body::Bytes,
    extract::Path,
    http::{HeaderMap, Method, StatusCode, Uri},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Everything the server saw of a request, returned by the echo fallback.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EchoedRequest {
    pub method: String,
    pub uri: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

#[derive(Deserialize)]
pub struct GraphQLBody {
    pub query: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/fact", get(fact))
        .route("/plain", get(plain))
        .route("/status/{code}", get(status).post(status).delete(status))
        .route("/graphql", post(graphql))
        .fallback(echo)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn fact() -> Json<Value> {
    Json(json!({ "a": 1 }))
}

async fn plain() -> &'static str {
    "this is not json"
}

async fn status(Path(code): Path<u16>) -> (StatusCode, Json<Value>) {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "status": status.as_u16() })))
}

/// Answers `{"data": {"query": <received query>}}`, or a GraphQL-style
/// `errors` array when the query is blank.
async fn graphql(Json(input): Json<GraphQLBody>) -> Json<Value> {
    if input.query.trim().is_empty() {
        return Json(json!({ "errors": [{ "message": "empty query" }] }));
    }
    Json(json!({ "data": { "query": input.query } }))
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Json<EchoedRequest> {
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    Json(EchoedRequest {
        method: method.as_str().to_string(),
        uri: uri.to_string(),
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echoed_request_serializes_to_json() {
        let echoed = EchoedRequest {
            method: "GET".to_string(),
            uri: "/x?y=1".to_string(),
            headers: BTreeMap::from([("accept".to_string(), "*/*".to_string())]),
            body: String::new(),
        };
        let json = serde_json::to_value(&echoed).unwrap();
        assert_eq!(json["method"], "GET");
        assert_eq!(json["uri"], "/x?y=1");
        assert_eq!(json["headers"]["accept"], "*/*");
        assert_eq!(json["body"], "");
    }

    #[test]
    fn graphql_body_rejects_missing_query() {
        let result: Result<GraphQLBody, _> = serde_json::from_str(r#"{"variables":{}}"#);
        assert!(result.is_err());
    }
}
