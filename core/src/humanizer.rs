//! The seam to the external humanization capability.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::BackendError;
use crate::request::HumanizeRequest;

#[async_trait]
pub trait Humanizer: Send + Sync {
    fn name(&self) -> &str;

    /// Runs the backend. A JSON string result is used verbatim; any other
    /// value is stringified by the caller.
    async fn humanize(&self, request: &HumanizeRequest) -> Result<Value, BackendError>;

    /// Human-readable problems that would prevent `humanize` from working.
    async fn check_dependencies(&self) -> Vec<String> {
        Vec::new()
    }

    /// Installation guidance printed alongside a failing dependency report.
    fn install_hint(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Turns a backend result into the response text.
pub fn stringify_result(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strings_pass_through_unquoted() {
        assert_eq!(stringify_result(json!("héllo")), "héllo");
    }

    #[test]
    fn other_values_use_compact_json() {
        assert_eq!(stringify_result(json!(42)), "42");
        assert_eq!(stringify_result(json!(null)), "null");
        assert_eq!(stringify_result(json!({"a": [1, 2]})), r#"{"a":[1,2]}"#);
    }
}
