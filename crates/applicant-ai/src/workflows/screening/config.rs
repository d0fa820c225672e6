use std::time::Duration;

/// Screening policy knobs. Everything here is deployment configuration, not
/// logic: thresholds, the launcher denylist, and prompt shaping can change
/// without touching the rules themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningConfig {
    /// Applicants younger than this (whole years) are declined outright.
    pub minimum_age: i32,
    /// Launcher identifiers that trigger an automatic decline. Matching is
    /// case-insensitive and accepts substrings.
    pub launcher_denylist: Vec<String>,
    /// Per-field cap applied to every free-text answer embedded in the prompt.
    pub answer_truncate_length: usize,
    /// Language the reasoning service is instructed to write its rationale in.
    pub reasoning_language: String,
    /// Retention window for cached verdicts, reset on every write.
    pub cache_retention: Duration,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            minimum_age: 14,
            launcher_denylist: vec![
                "tlauncher".to_string(),
                "klauncher".to_string(),
                "tlegacy".to_string(),
            ],
            answer_truncate_length: 200,
            reasoning_language: "Ukrainian".to_string(),
            cache_retention: Duration::from_secs(24 * 60 * 60),
        }
    }
}
