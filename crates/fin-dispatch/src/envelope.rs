use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::DispatchError;

/// Outcome of one call: exactly one of `{"result": number}` or `{"error": string}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Envelope {
    Result(f64),
    Error(String),
}

impl Envelope {
    pub fn result(&self) -> Option<f64> {
        match self {
            Envelope::Result(v) => Some(*v),
            Envelope::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Envelope::Result(_) => None,
            Envelope::Error(msg) => Some(msg),
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            Envelope::Result(v) => serde_json::json!({ "result": v }),
            Envelope::Error(msg) => serde_json::json!({ "error": msg }),
        }
    }
}

impl From<Result<f64, DispatchError>> for Envelope {
    fn from(outcome: Result<f64, DispatchError>) -> Self {
        match outcome {
            Ok(v) => Envelope::Result(v),
            Err(err) => Envelope::Error(err.to_string()),
        }
    }
}
