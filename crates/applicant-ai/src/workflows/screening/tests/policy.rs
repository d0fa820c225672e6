use chrono::{NaiveDate, NaiveTime};

use super::common::*;
use crate::workflows::screening::domain::{ApplicationRecord, Recommendation};
use crate::workflows::screening::policy::quick_reject;

fn birth(year: i32, month: u32, day: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("valid date")
        .and_time(NaiveTime::MIN)
}

#[test]
fn underage_applicant_is_declined_with_full_confidence() {
    let config = screening_config();
    let record = ApplicationRecord {
        birth_date: Some(birth(2013, 1, 15)),
        ..adult_record()
    };

    let verdict = quick_reject(&record, &config, fixed_today()).expect("age rule fires");
    assert_eq!(verdict.recommendation, Recommendation::Decline);
    assert_eq!(verdict.confidence, 1.0);
    assert!(verdict.reasoning.contains("13 years"));
    assert!(!verdict.cached);
}

#[test]
fn age_exactly_at_threshold_passes_the_age_rule() {
    let config = screening_config();
    let today = fixed_today();
    // Fourteenth birthday is today.
    let record = ApplicationRecord {
        birth_date: Some(birth(2012, 8, 26)),
        ..adult_record()
    };

    assert!(quick_reject(&record, &config, today).is_none());
}

#[test]
fn age_counts_whole_years_not_calendar_years() {
    let config = screening_config();
    // Born 14 calendar years ago but the birthday is tomorrow, so the
    // applicant is still 13.
    let record = ApplicationRecord {
        birth_date: Some(birth(2012, 8, 27)),
        ..adult_record()
    };

    let verdict = quick_reject(&record, &config, fixed_today()).expect("age rule fires");
    assert!(verdict.reasoning.contains("13 years"));
}

#[test]
fn missing_birth_date_skips_the_age_rule() {
    let config = screening_config();
    let record = ApplicationRecord {
        birth_date: None,
        ..adult_record()
    };

    assert!(quick_reject(&record, &config, fixed_today()).is_none());
}

#[test]
fn denylisted_launcher_is_declined_case_insensitively() {
    let config = screening_config();
    let record = ApplicationRecord {
        launcher: Some("TLauncher".to_string()),
        ..adult_record()
    };

    let verdict = quick_reject(&record, &config, fixed_today()).expect("launcher rule fires");
    assert_eq!(verdict.recommendation, Recommendation::Decline);
    assert_eq!(verdict.confidence, 1.0);
    assert!(verdict.reasoning.contains("TLauncher"));
}

#[test]
fn denylist_matches_substrings() {
    let config = screening_config();
    let record = ApplicationRecord {
        launcher: Some("TLegacy Launcher 2.1".to_string()),
        ..adult_record()
    };

    assert!(quick_reject(&record, &config, fixed_today()).is_some());
}

#[test]
fn age_rule_takes_precedence_over_launcher_rule() {
    let config = screening_config();
    let record = ApplicationRecord {
        birth_date: Some(birth(2015, 3, 1)),
        launcher: Some("tlauncher".to_string()),
        ..adult_record()
    };

    let verdict = quick_reject(&record, &config, fixed_today()).expect("a rule fires");
    assert!(verdict.reasoning.contains("Age below minimum requirement"));
}

#[test]
fn clean_record_passes_through_to_ai_evaluation() {
    let config = screening_config();
    assert!(quick_reject(&adult_record(), &config, fixed_today()).is_none());
}
