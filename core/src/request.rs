use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::HumanizeError;

/// Coarse intensity knob handed to the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Low,
    #[default]
    Medium,
    High,
    Maximum,
}

impl Strength {
    pub fn as_str(self) -> &'static str {
        match self {
            Strength::Low => "low",
            Strength::Medium => "medium",
            Strength::High => "high",
            Strength::Maximum => "maximum",
        }
    }

    /// Exact, case-sensitive match; anything else yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "low" => Some(Strength::Low),
            "medium" => Some(Strength::Medium),
            "high" => Some(Strength::High),
            "maximum" => Some(Strength::Maximum),
            _ => None,
        }
    }

    /// Unknown or non-string values fall back to [`Strength::Medium`].
    pub fn coerce(raw: Option<&Value>) -> Self {
        match raw {
            None | Some(Value::Null) => Strength::default(),
            Some(Value::String(s)) => Strength::parse(s).unwrap_or_else(|| {
                tracing::debug!(strength = %s, "unknown strength, using medium");
                Strength::default()
            }),
            Some(other) => {
                tracing::debug!(strength = %other, "non-string strength, using medium");
                Strength::default()
            }
        }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated request, ready for a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HumanizeRequest {
    pub text: String,
    pub strength: Strength,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personality: Option<String>,
}

impl HumanizeRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            strength: Strength::default(),
            personality: None,
        }
    }

    pub fn with_strength(mut self, strength: Strength) -> Self {
        self.strength = strength;
        self
    }

    pub fn with_personality(mut self, personality: impl Into<String>) -> Self {
        self.personality = normalize_personality(Some(&Value::String(personality.into())));
        self
    }

    /// Extracts and validates the three request fields from a decoded JSON object.
    pub fn from_value(value: &Value) -> Result<Self, HumanizeError> {
        let obj = value.as_object().ok_or_else(|| {
            HumanizeError::Input("Invalid JSON input: expected a JSON object".to_string())
        })?;

        let text = match obj.get("text") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                return Err(HumanizeError::Validation(
                    "Field 'text' must be a string".to_string(),
                ))
            }
        };

        if text.trim().is_empty() {
            return Err(HumanizeError::Validation(
                "No text provided for humanization".to_string(),
            ));
        }

        Ok(Self {
            text,
            strength: Strength::coerce(obj.get("strength")),
            personality: normalize_personality(obj.get("personality")),
        })
    }
}

fn normalize_personality(raw: Option<&Value>) -> Option<String> {
    match raw {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        _ => None,
    }
}
