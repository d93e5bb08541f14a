use anyhow::Result;
use serde_json::Value;

use crate::domain::MatchPayload;
use crate::errors::ResultExt;

/// Decode a match API response body
pub fn parse_match_payload(text: &str) -> Result<MatchPayload> {
    serde_json::from_str(text).parse_context("match API response")
}

/// Decode an already parsed (e.g. cached) match API response
pub fn match_payload_from_value(value: Value) -> MatchPayload {
    MatchPayload::from(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_payload() {
        let body = r#"{"result":[{"match2id":"abc_R01-M001","match2opponents":[{"name":"MOUZ"},{"name":"G2"}],"winner":"2","finished":1}]}"#;
        let payload = parse_match_payload(body).unwrap();

        assert_eq!(payload.len(), 1);
        let matches = payload.into_matches();
        assert_eq!(matches[0].id(), "abc_R01-M001");
        assert_eq!(matches[0].opponents()[1].resolved_name(), "G2");
    }

    #[test]
    fn test_invalid_body_is_an_error() {
        let err = parse_match_payload("<html>rate limited</html>").unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse match API response");
    }

    #[test]
    fn test_mistyped_record_does_not_drop_the_payload() {
        let body = r#"{"result":[
            {"match2id":"M1","match2opponents":[{"name":"MOUZ"},{"name":"G2"}],"winner":"1","finished":1},
            {"match2id":42,"match2opponents":[{"name":1337,"template":false},{"name":"FaZe"}],"winner":"2","finished":1}
        ]}"#;
        let matches = parse_match_payload(body).unwrap().into_matches();

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].id(), "M1");
        assert_eq!(matches[1].id(), "42");
        assert_eq!(matches[1].opponents()[0].resolved_name(), "1337");
    }

    #[test]
    fn test_from_value() {
        let payload = match_payload_from_value(json!({ "result": [] }));
        assert!(payload.is_empty());
    }
}
