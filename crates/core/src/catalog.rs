//! Static catalogs served to clients building a submission.
//!
//! These are fixed enumerations, independent of any run state.

/// Model identifiers supported by white box tests.
pub const SUPPORTED_MODELS: &[&str] = &[
    "gpt-2",
    "bert-base-uncased",
    "roberta-base",
    "distilbert-base-uncased",
    "t5-small",
];

/// Attack category labels supported by black box tests.
pub const ATTACK_CATEGORIES: &[&str] = &[
    "Phishing",
    "Prompt Injection",
    "Jailbreaking",
    "Data Extraction",
];

/// Defense strategies a submission may request.
pub const DEFENSE_TYPES: &[&str] = &[
    "SmoothLLM",
    "Perplexity filtering",
    "Removal of non-dictionary words",
    "Synonym substitution",
];

/// Whether `name` is one of [`DEFENSE_TYPES`] (exact match).
pub fn is_known_defense(name: &str) -> bool {
    DEFENSE_TYPES.contains(&name)
}
