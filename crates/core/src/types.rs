/// Caller-supplied opaque identifier of a test.
pub type TestId = String;

/// Progress percentage in `0..=100`.
pub type Progress = u8;

/// Upper bound of [`Progress`].
pub const PROGRESS_COMPLETE: Progress = 100;
