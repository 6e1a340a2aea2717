//! # Request Command Parsing
//!
//! Extracts method, path and body from a request line such as
//! `GET /_search {"query": {"match_all": {}}}`.

use crate::repl::error::ShellError;

/// Methods the shell will send
pub const SUPPORTED_METHODS: [&str; 7] = ["GET", "POST", "PUT", "DELETE", "HEAD", "PATCH", "OPTIONS"];

/// Parser for a single free-form request line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParser {
    method: String,
    url: String,
    body: String,
}

impl RequestParser {
    /// Split a request line into `METHOD PATH [BODY]`.
    ///
    /// The body is everything after the path, kept verbatim apart from
    /// surrounding whitespace, so JSON with inner spaces survives.
    pub fn new(line: &str) -> Result<Self, ShellError> {
        let (method, rest) = split_token(line.trim());
        let (url, body) = split_token(rest);

        if method.is_empty() || url.is_empty() {
            return Err(ShellError::parse(
                "Invalid request format. Use: METHOD PATH [BODY]",
            ));
        }

        let url = if url.starts_with('/') {
            url.to_string()
        } else {
            format!("/{url}")
        };

        Ok(Self {
            method: method.to_uppercase(),
            url,
            body: body.trim().to_string(),
        })
    }

    /// Reject methods the shell does not know how to send
    pub fn validate(&self) -> Result<(), ShellError> {
        if SUPPORTED_METHODS.contains(&self.method.as_str()) {
            Ok(())
        } else {
            Err(ShellError::parse(format!(
                "{} is not a supported HTTP method",
                self.method
            )))
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Split off the first whitespace-delimited token, returning it and the remainder
fn split_token(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(idx) => (&text[..idx], text[idx..].trim_start()),
        None => (text, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request_simple() {
        let parser = RequestParser::new("GET /").unwrap();
        assert_eq!(parser.method(), "GET");
        assert_eq!(parser.url(), "/");
        assert_eq!(parser.body(), "");
        assert!(parser.validate().is_ok());
    }

    #[test]
    fn test_parse_request_with_body() {
        let parser =
            RequestParser::new(r#"post /logs/_doc  {"message": "hello world", "level": 3}"#)
                .unwrap();
        assert_eq!(parser.method(), "POST");
        assert_eq!(parser.url(), "/logs/_doc");
        assert_eq!(
            parser.body(),
            r#"{"message": "hello world", "level": 3}"#
        );
    }

    #[test]
    fn test_parse_request_adds_leading_slash() {
        let parser = RequestParser::new("GET _cat/indices?v").unwrap();
        assert_eq!(parser.url(), "/_cat/indices?v");
    }

    #[test]
    fn test_parse_request_missing_path() {
        let result = RequestParser::new("GET");
        assert!(matches!(result, Err(ShellError::Parse(_))));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Invalid request format. Use: METHOD PATH [BODY]"
        );
    }

    #[test]
    fn test_validate_rejects_unknown_method() {
        let parser = RequestParser::new("FETCH /index").unwrap();
        let err = parser.validate().unwrap_err();
        assert_eq!(err.to_string(), "FETCH is not a supported HTTP method");
    }
}
