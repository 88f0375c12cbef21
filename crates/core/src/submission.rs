//! Job submissions and their validation.
//!
//! [`JobSubmission`] is the loosely-typed wire shape accepted from the
//! request gateway. [`JobSubmission::validate`] turns it into a [`TestJob`],
//! whose [`TestKind`] carries exactly the parameters its category needs.
//! A submission that fails validation never produces a `TestJob`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::error::CoreError;
use crate::types::TestId;

/// Number of samples evaluated when the submission does not say.
pub const DEFAULT_MAX_SAMPLES: u32 = 5;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Closed set of test categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    White,
    Black,
}

impl Category {
    /// Parse the wire value (`"white"` / `"black"`).
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "white" => Ok(Self::White),
            "black" => Ok(Self::Black),
            other => Err(CoreError::UnsupportedCategory(format!(
                "Invalid category '{other}'. Must be 'white' or 'black'"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Wire shape
// ---------------------------------------------------------------------------

/// Inbound submission as sent by the request gateway.
///
/// Every field defaults so that absent values reach [`validate`](Self::validate)
/// and are reported by name instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobSubmission {
    pub test_id: String,
    pub category: String,
    pub model_id: Option<String>,
    pub custom_dataset_path: Option<String>,
    pub curl_endpoint: Option<String>,
    pub attack_category: Option<String>,
    pub defense_type: Option<String>,
    pub max_samples: Option<u32>,
}

// ---------------------------------------------------------------------------
// Validated shape
// ---------------------------------------------------------------------------

/// Parameters of a white box test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhiteBoxParams {
    pub model_id: String,
    pub dataset_path: String,
}

/// Parameters of a black box test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlackBoxParams {
    pub endpoint: String,
    pub attack_category: String,
}

/// Category-specific parameters of a validated job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestKind {
    WhiteBox(WhiteBoxParams),
    BlackBox(BlackBoxParams),
}

impl TestKind {
    pub fn category(&self) -> Category {
        match self {
            Self::WhiteBox(_) => Category::White,
            Self::BlackBox(_) => Category::Black,
        }
    }
}

/// Options shared by both categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub max_samples: u32,
    pub defense: Option<String>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            max_samples: DEFAULT_MAX_SAMPLES,
            defense: None,
        }
    }
}

/// A submission that passed validation and is ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestJob {
    pub test_id: TestId,
    pub kind: TestKind,
    pub options: RunOptions,
}

impl TestJob {
    pub fn category(&self) -> Category {
        self.kind.category()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

impl JobSubmission {
    /// Validate the submission and build the matching [`TestJob`].
    ///
    /// The category is checked first; an unknown category yields
    /// [`CoreError::UnsupportedCategory`]. Everything else yields
    /// [`CoreError::Validation`] with a message naming the offending fields.
    pub fn validate(&self) -> Result<TestJob, CoreError> {
        let category = Category::parse(self.category.trim())?;

        let test_id = self.test_id.trim();
        if test_id.is_empty() {
            return Err(CoreError::Validation("testId is required".to_string()));
        }

        let kind = match category {
            Category::White => {
                let model_id = present(&self.model_id);
                let dataset_path = present(&self.custom_dataset_path);
                match (model_id, dataset_path) {
                    (Some(model_id), Some(dataset_path)) => TestKind::WhiteBox(WhiteBoxParams {
                        model_id: model_id.to_string(),
                        dataset_path: dataset_path.to_string(),
                    }),
                    (model_id, dataset_path) => {
                        return Err(missing_fields(
                            "White box tests require modelId and customDatasetPath",
                            &[
                                ("modelId", model_id.is_none()),
                                ("customDatasetPath", dataset_path.is_none()),
                            ],
                        ))
                    }
                }
            }
            Category::Black => {
                let endpoint = present(&self.curl_endpoint);
                let attack_category = present(&self.attack_category);
                match (endpoint, attack_category) {
                    (Some(endpoint), Some(attack_category)) => {
                        TestKind::BlackBox(BlackBoxParams {
                            endpoint: endpoint.to_string(),
                            attack_category: attack_category.to_string(),
                        })
                    }
                    (endpoint, attack_category) => {
                        return Err(missing_fields(
                            "Black box tests require curlEndpoint and attackCategory",
                            &[
                                ("curlEndpoint", endpoint.is_none()),
                                ("attackCategory", attack_category.is_none()),
                            ],
                        ))
                    }
                }
            }
        };

        let options = self.validate_options()?;

        Ok(TestJob {
            test_id: test_id.to_string(),
            kind,
            options,
        })
    }

    fn validate_options(&self) -> Result<RunOptions, CoreError> {
        let max_samples = match self.max_samples {
            Some(0) => {
                return Err(CoreError::Validation(
                    "maxSamples must be greater than zero".to_string(),
                ))
            }
            Some(n) => n,
            None => DEFAULT_MAX_SAMPLES,
        };

        let defense = match present(&self.defense_type) {
            Some(name) if catalog::is_known_defense(name) => Some(name.to_string()),
            Some(name) => {
                return Err(CoreError::Validation(format!(
                    "Unknown defenseType '{name}'. Must be one of: {}",
                    catalog::DEFENSE_TYPES.join(", ")
                )))
            }
            None => None,
        };

        Ok(RunOptions {
            max_samples,
            defense,
        })
    }
}

/// A field counts as present only when it holds non-blank text.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn missing_fields(requirement: &str, fields: &[(&str, bool)]) -> CoreError {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, is_missing)| *is_missing)
        .map(|(name, _)| *name)
        .collect();
    CoreError::Validation(format!("{requirement} (missing: {})", missing.join(", ")))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn white(model: Option<&str>, dataset: Option<&str>) -> JobSubmission {
        JobSubmission {
            test_id: "t1".into(),
            category: "white".into(),
            model_id: model.map(Into::into),
            custom_dataset_path: dataset.map(Into::into),
            ..Default::default()
        }
    }

    fn black(endpoint: Option<&str>, attack: Option<&str>) -> JobSubmission {
        JobSubmission {
            test_id: "t2".into(),
            category: "black".into(),
            curl_endpoint: endpoint.map(Into::into),
            attack_category: attack.map(Into::into),
            ..Default::default()
        }
    }

    #[test]
    fn valid_white_box_submission() {
        let job = white(Some("bert-base-uncased"), Some("/data/x"))
            .validate()
            .unwrap();
        assert_eq!(job.test_id, "t1");
        assert_eq!(job.category(), Category::White);
        assert_eq!(
            job.kind,
            TestKind::WhiteBox(WhiteBoxParams {
                model_id: "bert-base-uncased".into(),
                dataset_path: "/data/x".into(),
            })
        );
        assert_eq!(job.options, RunOptions::default());
    }

    #[test]
    fn valid_black_box_submission() {
        let job = black(Some("curl https://llm.example/v1"), Some("Phishing"))
            .validate()
            .unwrap();
        assert_matches!(job.kind, TestKind::BlackBox(ref p) if p.attack_category == "Phishing");
    }

    #[test]
    fn white_box_missing_dataset_names_the_field() {
        let err = white(Some("gpt-2"), None).validate().unwrap_err();
        assert_matches!(err, CoreError::Validation(ref msg) if msg.ends_with("(missing: customDatasetPath)"));
    }

    #[test]
    fn black_box_missing_both_names_both_fields() {
        let err = black(None, None).validate().unwrap_err();
        assert_matches!(
            err,
            CoreError::Validation(ref msg)
                if msg.contains("curlEndpoint") && msg.contains("(missing: curlEndpoint, attackCategory)")
        );
    }

    #[test]
    fn blank_required_field_counts_as_missing() {
        let err = white(Some("   "), Some("/data/x")).validate().unwrap_err();
        assert_matches!(err, CoreError::Validation(ref msg) if msg.ends_with("(missing: modelId)"));
    }

    #[test]
    fn unknown_category_is_unsupported() {
        let mut submission = white(Some("gpt-2"), Some("/d"));
        submission.category = "grey".into();
        assert_matches!(
            submission.validate(),
            Err(CoreError::UnsupportedCategory(ref msg)) if msg.contains("'grey'")
        );
    }

    #[test]
    fn category_is_checked_before_test_id() {
        let submission = JobSubmission::default();
        assert_matches!(submission.validate(), Err(CoreError::UnsupportedCategory(_)));
    }

    #[test]
    fn empty_test_id_is_rejected() {
        let mut submission = white(Some("gpt-2"), Some("/d"));
        submission.test_id = " ".into();
        assert_matches!(submission.validate(), Err(CoreError::Validation(ref msg)) if msg == "testId is required");
    }

    #[test]
    fn options_are_validated() {
        let mut submission = white(Some("gpt-2"), Some("/d"));
        submission.max_samples = Some(0);
        assert_matches!(submission.validate(), Err(CoreError::Validation(_)));

        submission.max_samples = Some(20);
        submission.defense_type = Some("Firewall".into());
        assert_matches!(submission.validate(), Err(CoreError::Validation(ref msg)) if msg.contains("Firewall"));

        submission.defense_type = Some("SmoothLLM".into());
        let job = submission.validate().unwrap();
        assert_eq!(job.options.max_samples, 20);
        assert_eq!(job.options.defense.as_deref(), Some("SmoothLLM"));
    }

    #[test]
    fn submission_deserializes_from_camel_case_with_absent_fields() {
        let submission: JobSubmission = serde_json::from_value(serde_json::json!({
            "testId": "t2",
            "category": "black"
        }))
        .unwrap();
        assert_eq!(submission.test_id, "t2");
        assert!(submission.curl_endpoint.is_none());
        assert!(submission.attack_category.is_none());
    }
}
