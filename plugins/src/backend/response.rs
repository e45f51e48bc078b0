use serde_json::Value;

/// Decodes a backend's raw output.
///
/// JSON bodies are searched for a text field; other JSON is returned whole and
/// anything that is not JSON is treated as plain text.
pub fn decode_response(body: &[u8]) -> Value {
    match serde_json::from_slice::<Value>(body) {
        Ok(v) => extract_textish(&v).map(Value::String).unwrap_or(v),
        Err(_) => Value::String(String::from_utf8_lossy(body).into_owned()),
    }
}

fn extract_textish(v: &Value) -> Option<String> {
    for key in ["humanized_text", "text", "output"] {
        if let Some(s) = v.get(key).and_then(|x| x.as_str()) {
            return Some(s.to_string());
        }
    }
    // OpenAI-ish: { choices: [ { message: { content: "..." } } ] }
    v.get("choices")
        .and_then(|x| x.get(0))
        .and_then(|x| x.get("message"))
        .and_then(|x| x.get("content"))
        .and_then(|x| x.as_str())
        .map(str::to_string)
}
