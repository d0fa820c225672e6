use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Inbound application payload. Field names mirror the intake platform's JSON
/// export; unknown fields are ignored so schema additions upstream do not break
/// deserialization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApplicationRecord {
    pub id: u64,
    pub user_id: Option<u64>,
    #[serde(deserialize_with = "lenient_optional_datetime")]
    pub birth_date: Option<NaiveDateTime>,
    pub launcher: Option<String>,
    pub version: Option<String>,
    pub server_source: Option<String>,
    pub quiz_answer: Option<String>,

    // Survival track: wiped server for casual play.
    pub russian_word_reaction: Option<String>,
    pub admin_decision_attitude: Option<String>,
    pub conflict_reaction: Option<String>,
    pub new_rule_reaction: Option<String>,
    pub server_experience_negative: Option<String>,
    pub useful_skills: Option<String>,
    pub useful_skills_detailed: Option<String>,

    // Evervault track: permanent server for long-term projects.
    pub community_projects_readiness: Option<String>,
    pub healthy_community_definition: Option<String>,
    pub ideal_server_description: Option<String>,
    pub long_project_experience: Option<String>,
    pub private_server_experience: Option<String>,

    pub editable_fields: Vec<String>,
    #[serde(deserialize_with = "lenient_optional_datetime")]
    pub updated_at: Option<NaiveDateTime>,
}

impl ApplicationRecord {
    /// Whole years between the birth date and `today`, calendar-aware.
    pub fn age_on(&self, today: NaiveDate) -> Option<i32> {
        self.birth_date
            .map(|birth| age_in_years(birth.date(), today))
    }
}

pub(crate) fn age_in_years(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years
}

/// Terminal recommendation for an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    Accept,
    Decline,
}

impl Recommendation {
    /// Lenient decoding for reasoning-service output. Anything that is not an
    /// explicit accept is treated as a decline.
    pub fn from_label(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("ACCEPT") {
            Recommendation::Accept
        } else {
            Recommendation::Decline
        }
    }
}

/// Structured evaluation result returned to the caller and stored in the
/// result cache. `cached` is always false at construction; the orchestrator
/// flips it only when serving a cache hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub recommendation: Recommendation,
    pub reasoning: String,
    pub confidence: f64,
    #[serde(rename = "is_cached", default)]
    pub cached: bool,
}

impl Verdict {
    pub fn decline(reasoning: impl Into<String>, confidence: f64) -> Self {
        Self {
            recommendation: Recommendation::Decline,
            reasoning: reasoning.into(),
            confidence,
            cached: false,
        }
    }
}

fn lenient_optional_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    raw.map(|value| parse_datetime(&value).map_err(serde::de::Error::custom))
        .transpose()
}

/// Accepts ISO-8601 timestamps with or without fractional seconds, the
/// space-separated variant, and bare dates (midnight assumed).
pub(crate) fn parse_datetime(raw: &str) -> Result<NaiveDateTime, String> {
    let trimmed = raw.trim();
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f"))
        .or_else(|_| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .map_err(|err| format!("failed to parse '{raw}' as a timestamp ({err})"))
}
