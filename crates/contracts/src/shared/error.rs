use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error payload returned by the gateway for 4xx/5xx responses.
///
/// `detail` is either a plain message or, for request validation failures,
/// a list of `{loc, msg, type}` objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Value,
}

impl ErrorBody {
    /// Human readable message, if the payload carries one.
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Array(items) => {
                let parts: Vec<String> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join("; "))
                }
            }
            _ => None,
        }
    }

    /// Parse a raw response body; returns `None` for non-JSON bodies.
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_detail() {
        let body = ErrorBody::parse(r#"{"detail":"Insufficient balance"}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("Insufficient balance"));
    }

    #[test]
    fn validation_detail_joins_messages() {
        let body = ErrorBody::parse(
            r#"{"detail":[{"loc":["body","prompt"],"msg":"field required","type":"missing"},
                          {"loc":["body","models"],"msg":"too short","type":"value_error"}]}"#,
        )
        .unwrap();
        assert_eq!(body.message().as_deref(), Some("field required; too short"));
    }

    #[test]
    fn missing_or_blank_detail() {
        assert_eq!(ErrorBody::parse("{}").unwrap().message(), None);
        assert_eq!(ErrorBody::parse(r#"{"detail":"  "}"#).unwrap().message(), None);
        assert!(ErrorBody::parse("<html>502</html>").is_none());
    }
}
