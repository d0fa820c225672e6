use serde_json::Value;
use tracing::warn;

use super::domain::{Recommendation, Verdict};

pub(crate) const PARSE_FALLBACK_REASONING: &str = "Failed to parse AI response";
pub(crate) const EMPTY_RESPONSE_REASONING: &str = "Empty AI response";
const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Turns a raw completion envelope into a verdict. Every malformed input
/// degrades to a decline with the failure description preserved in the
/// reasoning text; this function never fails.
pub fn normalize_completion(raw: &str) -> Verdict {
    match extract_content(raw) {
        Ok(content) if content.is_empty() => {
            warn!("empty completion content in reasoning-service envelope");
            Verdict::decline(EMPTY_RESPONSE_REASONING, FALLBACK_CONFIDENCE)
        }
        Ok(content) => verdict_from_text(&content),
        Err(detail) => {
            warn!(%detail, "failed to extract completion content from envelope");
            Verdict::decline(
                format!("AI response parsing failed - [{detail}]"),
                FALLBACK_CONFIDENCE,
            )
        }
    }
}

/// Pulls the model text out of the envelope at the fixed structural path
/// `candidates[0].content.parts[0].text`.
fn extract_content(raw: &str) -> Result<String, String> {
    let envelope: Value = serde_json::from_str(raw).map_err(|err| err.to_string())?;
    envelope
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(|text| text.trim().to_string())
        .ok_or_else(|| "envelope missing candidates[0].content.parts[0].text".to_string())
}

/// Parses the model's own output: an optional fenced code block wrapping a
/// JSON object with up to three keys. Missing or malformed keys take defaults
/// rather than failing the evaluation.
pub(crate) fn verdict_from_text(content: &str) -> Verdict {
    let cleaned = strip_fences(content);
    match serde_json::from_str::<Value>(cleaned) {
        Ok(parsed) => Verdict {
            recommendation: parsed
                .get("recommendation")
                .and_then(Value::as_str)
                .map(Recommendation::from_label)
                .unwrap_or(Recommendation::Decline),
            reasoning: parsed
                .get("reasoning")
                .and_then(Value::as_str)
                .unwrap_or(PARSE_FALLBACK_REASONING)
                .to_string(),
            confidence: parsed
                .get("confidence")
                .and_then(Value::as_f64)
                .unwrap_or(FALLBACK_CONFIDENCE),
            cached: false,
        },
        Err(err) => {
            warn!(%err, "completion content was not valid JSON");
            Verdict::decline(
                format!("AI response parsing failed - [{err}]"),
                FALLBACK_CONFIDENCE,
            )
        }
    }
}

fn strip_fences(content: &str) -> &str {
    let mut cleaned = content.trim();
    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest;
    } else if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest;
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest;
    }
    cleaned.trim()
}
