//! Category-specific result payloads.
//!
//! Constructors derive the dependent metrics so a payload can never carry
//! an `f1` inconsistent with its precision/recall, or a `categoryWiseASR`
//! disagreeing with its own `asr`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Round to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Harmonic mean of precision and recall, rounded to 3 decimals.
///
/// Returns `0.0` when both inputs are zero.
pub fn f1_score(precision: f64, recall: f64) -> f64 {
    let sum = precision + recall;
    if sum == 0.0 {
        return 0.0;
    }
    round_to(2.0 * precision * recall / sum, 3)
}

// ---------------------------------------------------------------------------
// White box
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhiteBoxResults {
    pub asr: f64,
    pub accuracy: f64,
    pub recall: f64,
    pub precision: f64,
    pub f1: f64,
}

impl WhiteBoxResults {
    pub fn new(asr: f64, accuracy: f64, recall: f64, precision: f64) -> Self {
        Self {
            asr,
            accuracy,
            recall,
            precision,
            f1: f1_score(precision, recall),
        }
    }
}

// ---------------------------------------------------------------------------
// Black box
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlackBoxResults {
    pub asr: f64,
    pub latency: f64,
    #[serde(rename = "tokenUsage")]
    pub token_usage: u32,
    /// Exactly one entry: the submitted attack category mapped to `asr`.
    #[serde(rename = "categoryWiseASR")]
    pub category_wise_asr: BTreeMap<String, f64>,
}

impl BlackBoxResults {
    pub fn new(asr: f64, latency: f64, token_usage: u32, attack_category: &str) -> Self {
        Self {
            asr,
            latency,
            token_usage,
            category_wise_asr: BTreeMap::from([(attack_category.to_string(), asr)]),
        }
    }
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// Result of a completed run, serialized as the bare metric map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultPayload {
    WhiteBox(WhiteBoxResults),
    BlackBox(BlackBoxResults),
}

impl From<WhiteBoxResults> for ResultPayload {
    fn from(results: WhiteBoxResults) -> Self {
        Self::WhiteBox(results)
    }
}

impl From<BlackBoxResults> for ResultPayload {
    fn from(results: BlackBoxResults) -> Self {
        Self::BlackBox(results)
    }
}
