//! Interchange format with the worker: one JSON object on stdin, one on stdout.

use super::error::ExchangeError;
use super::types::{Request, Response};

/// Serialize a request for the worker's stdin.
pub fn encode_request(request: &Request) -> Result<String, ExchangeError> {
    serde_json::to_string(request).map_err(|e| ExchangeError::WorkerLaunch(e.to_string()))
}

/// Parse the worker's stdout into a response record.
///
/// Anything other than a single JSON object (plain text, truncated output,
/// arrays, trailing garbage) is a `ResponseFormat` error carrying the raw
/// parser message.
pub fn parse_response(stdout: &str) -> Result<Response, ExchangeError> {
    serde_json::from_str::<Response>(stdout)
        .map_err(|e| ExchangeError::ResponseFormat(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_request_field_names() {
        let request = Request {
            query: "q".to_string(),
            context: "c".to_string(),
            file_path: "/tmp/a.rs".to_string(),
            file_syntax: "Rust".to_string(),
        };

        let encoded = encode_request(&request).unwrap();
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "query": "q",
                "context": "c",
                "file_path": "/tmp/a.rs",
                "file_syntax": "Rust",
            })
        );
    }

    #[test]
    fn test_parse_response_full() {
        let stdout = r#"{"query":"hi","response":"hello","timestamp":"2024-01-01T00:00:00.000Z"}"#;
        let response = parse_response(stdout).unwrap();
        assert_eq!(response.query, "hi");
        assert_eq!(response.response, "hello");
        assert_eq!(response.timestamp, "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_parse_response_trailing_newline() {
        let response = parse_response("{\"response\":\"ok\"}\n").unwrap();
        assert_eq!(response.response, "ok");
    }

    #[test]
    fn test_parse_response_missing_fields_default_to_empty() {
        let response = parse_response(r#"{"response":"only this"}"#).unwrap();
        assert_eq!(response.query, "");
        assert_eq!(response.timestamp, "");

        let response = parse_response("{}").unwrap();
        assert_eq!(response, Response::default());
    }

    #[test]
    fn test_parse_response_ignores_extra_fields() {
        let stdout = r#"{"query":"q","response":"r","timestamp":"t","provider":"groq","model":"mixtral-8x7b-32768"}"#;
        let response = parse_response(stdout).unwrap();
        assert_eq!(response.response, "r");
    }

    #[test]
    fn test_parse_response_not_json() {
        let err = parse_response("not json").unwrap_err();
        assert!(matches!(err, ExchangeError::ResponseFormat(_)));
    }

    #[test]
    fn test_parse_response_truncated() {
        let err = parse_response(r#"{"query":"q","respo"#).unwrap_err();
        assert!(matches!(err, ExchangeError::ResponseFormat(_)));
    }

    #[test]
    fn test_parse_response_empty_stdout() {
        let err = parse_response("").unwrap_err();
        assert!(matches!(err, ExchangeError::ResponseFormat(_)));
    }

    #[test]
    fn test_parse_response_wrong_shape() {
        assert!(parse_response("[1, 2]").is_err());
        assert!(parse_response(r#"{"response": 42}"#).is_err());
    }
}
