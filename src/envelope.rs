//! The record threaded through all three stages.
//!
//! Every stage returns `{"statusCode": 200, "body": <Envelope>}` and accepts the
//! same shape. Older deployments stringified the body (and nested the whole
//! previous event inside it), so `body` is decoded leniently; output is always
//! the canonical object form.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::GateRejection;

pub const STATUS_OK: u16 = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub s3_bucket: String,
    pub s3_key: String,
    #[serde(default)]
    pub image_data: String,
    #[serde(default)]
    pub inferences: Inferences,
}

/// Prediction scores, either structured or in the printed `"[a, b]"` form
/// returned verbatim by the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Inferences {
    Scores(Vec<f64>),
    Text(String),
}

impl Default for Inferences {
    fn default() -> Self {
        Inferences::Scores(Vec::new())
    }
}

impl Inferences {
    pub fn scores(&self) -> Result<Vec<f64>, GateRejection> {
        match self {
            Inferences::Scores(scores) if scores.is_empty() => {
                Err(GateRejection::ParseError("no scores present".to_string()))
            }
            Inferences::Scores(scores) => {
                if let Some(bad) = scores.iter().find(|s| !s.is_finite()) {
                    return Err(GateRejection::ParseError(format!("non-finite score {bad}")));
                }
                Ok(scores.clone())
            }
            Inferences::Text(text) => parse_scores(text),
        }
    }
}

// Parses a printed list such as "[0.97, 0.03]". Any non-empty list of
// finite numbers is accepted; arity is not checked.
pub fn parse_scores(text: &str) -> Result<Vec<f64>, GateRejection> {
    let trimmed = text.trim();
    let inner = trimmed.strip_prefix('[').unwrap_or(trimmed);
    let inner = inner.strip_suffix(']').unwrap_or(inner);

    inner
        .split(',')
        .map(|piece| {
            let piece = piece.trim();
            match piece.parse::<f64>() {
                Ok(score) if score.is_finite() => Ok(score),
                _ => Err(GateRejection::ParseError(format!(
                    "{piece:?} is not a finite number in {text:?}"
                ))),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageResponse {
    #[serde(rename = "statusCode", default = "default_status")]
    pub status_code: u16,
    #[serde(deserialize_with = "deserialize_body")]
    pub body: Envelope,
}

impl StageResponse {
    pub fn ok(body: Envelope) -> Self {
        Self {
            status_code: STATUS_OK,
            body,
        }
    }
}

fn default_status() -> u16 {
    STATUS_OK
}

fn deserialize_body<'de, D>(deserializer: D) -> Result<Envelope, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    envelope_from_value(value).map_err(de::Error::custom)
}

fn envelope_from_value(value: Value) -> serde_json::Result<Envelope> {
    match value {
        Value::String(text) => envelope_from_value(serde_json::from_str(&text)?),
        Value::Object(map) if is_wrapped_event(&map) => unwrap_event(map),
        other => serde_json::from_value(other),
    }
}

// A whole stage event (`{statusCode, body, inferences}`) rather than an envelope.
fn is_wrapped_event(map: &Map<String, Value>) -> bool {
    map.contains_key("body") && !map.contains_key("s3_bucket")
}

fn unwrap_event(mut map: Map<String, Value>) -> serde_json::Result<Envelope> {
    let outer_inferences = map.remove("inferences");
    let body = map.remove("body").unwrap_or(Value::Null);
    let mut envelope = envelope_from_value(body)?;
    if let Some(inferences) = outer_inferences {
        envelope.inferences = serde_json::from_value(inferences)?;
    }
    Ok(envelope)
}
