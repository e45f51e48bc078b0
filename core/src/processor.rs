//! Request processing: stdin JSON in, one compact JSON line out.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::HumanizeError;
use crate::humanizer::{stringify_result, Humanizer};
use crate::request::HumanizeRequest;
use crate::util::current_timestamp;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HumanizeResponse {
    pub humanized_text: String,
    pub timestamp: String,
    pub success: bool,
}

impl HumanizeResponse {
    pub fn new(humanized_text: String) -> Self {
        Self {
            humanized_text,
            timestamp: current_timestamp(),
            success: true,
        }
    }
}

/// Reads the whole stream and decodes it as JSON.
pub fn read_input<R: Read>(reader: &mut R) -> Result<Value, HumanizeError> {
    let mut buf = Vec::new();
    reader
        .read_to_end(&mut buf)
        .map_err(|e| HumanizeError::Input(format!("Failed to read input: {e}")))?;
    let raw = String::from_utf8(buf)
        .map_err(|e| HumanizeError::Input(format!("Failed to read input: {e}")))?;

    let raw = raw.trim();
    if raw.is_empty() {
        return Err(HumanizeError::Input(
            "Failed to read input: No input received from stdin".to_string(),
        ));
    }

    serde_json::from_str(raw).map_err(|e| HumanizeError::Input(format!("Invalid JSON input: {e}")))
}

pub fn validate(input: &Value) -> Result<HumanizeRequest, HumanizeError> {
    HumanizeRequest::from_value(input)
}

pub async fn transform(
    humanizer: &dyn Humanizer,
    request: &HumanizeRequest,
) -> Result<String, HumanizeError> {
    tracing::debug!(
        backend = humanizer.name(),
        strength = %request.strength,
        personality = ?request.personality,
        text_len = request.text.len(),
        "invoking humanizer"
    );
    let value = humanizer.humanize(request).await?;
    Ok(stringify_result(value).trim().to_string())
}

pub fn write_output<W: Write>(
    writer: &mut W,
    response: &HumanizeResponse,
) -> Result<(), HumanizeError> {
    let line = serde_json::to_string(response).map_err(|e| HumanizeError::Output(e.to_string()))?;
    writeln!(writer, "{line}")
        .and_then(|_| writer.flush())
        .map_err(|e| HumanizeError::Output(e.to_string()))
}

/// Runs one request end to end. Nothing is written on failure.
#[tracing::instrument(
    name = "processor.process",
    skip_all,
    fields(request_id = %uuid::Uuid::new_v4(), backend = humanizer.name())
)]
pub async fn process<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    humanizer: &dyn Humanizer,
) -> Result<HumanizeResponse, HumanizeError> {
    let input = read_input(reader)?;
    let request = validate(&input)?;
    let humanized_text = transform(humanizer, &request).await?;

    let response = HumanizeResponse::new(humanized_text);
    write_output(writer, &response)?;
    tracing::info!(
        output_len = response.humanized_text.len(),
        "request humanized"
    );
    Ok(response)
}
