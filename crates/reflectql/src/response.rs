//! The response envelope.

use serde::Serialize;
use std::fmt;

/// A serializable error, as found in a GraphQL response.
///
/// Locations and paths are not emitted yet; only the message is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GraphQLError {
    /// The error message.
    pub message: String,
}

impl GraphQLError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for GraphQLError {}

impl From<reflectql_parser::Error> for GraphQLError {
    fn from(error: reflectql_parser::Error) -> Self {
        Self {
            message: error.message().to_string(),
        }
    }
}

/// Frame an already-serialised `data` fragment and the accumulated errors
/// into the response envelope.
///
/// `errors` is omitted when empty.
pub fn generate_response(data: &str, errors: &[GraphQLError]) -> String {
    let mut response = String::with_capacity(data.len() + 16);
    response.push_str("{\"data\":");
    response.push_str(data);
    if !errors.is_empty() {
        response.push_str(",\"errors\":[");
        for (i, error) in errors.iter().enumerate() {
            if i > 0 {
                response.push(',');
            }
            response.push_str("{\"message\":");
            let escaped = serde_json::to_string(&error.message)
                .unwrap_or_else(|_| String::from("\"\""));
            response.push_str(&escaped);
            response.push('}');
        }
        response.push(']');
    }
    response.push('}');
    response
}
