use chrono::NaiveDate;

use super::config::ScreeningConfig;
use super::domain::{ApplicationRecord, Verdict};

/// Deterministic pre-filter evaluated before any reasoning call. First match
/// wins; a `None` result passes the application through to AI evaluation.
/// Pure function of the record, the policy configuration, and `today`.
pub(crate) fn quick_reject(
    record: &ApplicationRecord,
    config: &ScreeningConfig,
    today: NaiveDate,
) -> Option<Verdict> {
    if let Some(age) = record.age_on(today) {
        if age < config.minimum_age {
            return Some(Verdict::decline(
                format!("Age below minimum requirement ({age} years)"),
                1.0,
            ));
        }
    }

    if let Some(launcher) = record.launcher.as_deref() {
        let lowered = launcher.to_lowercase();
        let banned = config.launcher_denylist.iter().any(|entry| {
            let entry = entry.to_lowercase();
            lowered == entry || lowered.contains(&entry)
        });
        if banned {
            return Some(Verdict::decline(
                format!("Using banned launcher: {launcher}"),
                1.0,
            ));
        }
    }

    None
}
