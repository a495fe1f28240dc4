//! Request payload DTOs.

use serde::Serialize;

/// Body of a GraphQL POST. Only `query` is sent; variables and operation
/// names are not supported.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQLRequest<'a> {
    pub query: &'a str,
}
