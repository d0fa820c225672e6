use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Days, Local, Months, NaiveDate, NaiveTime};
use serde_json::json;

use crate::workflows::screening::cache::{CacheError, InMemoryVerdictCache, VerdictCache};
use crate::workflows::screening::client::{CompletionClient, CompletionError};
use crate::workflows::screening::config::ScreeningConfig;
use crate::workflows::screening::domain::{ApplicationRecord, Verdict};
use crate::workflows::screening::service::ScreeningService;

pub(super) fn screening_config() -> ScreeningConfig {
    ScreeningConfig::default()
}

pub(super) fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 26).expect("valid date")
}

/// Birth date for an applicant who turned `age` comfortably before today, so
/// tests are stable regardless of the wall clock.
pub(super) fn birth_date_for_age(age: u32) -> chrono::NaiveDateTime {
    let today = Local::now().date_naive();
    let birth = today - Months::new(12 * age) - Days::new(30);
    birth.and_time(NaiveTime::MIN)
}

pub(super) fn adult_record() -> ApplicationRecord {
    // Age 20 relative to `fixed_today`, comfortably adult on the wall clock.
    let birth = NaiveDate::from_ymd_opt(2006, 7, 15)
        .expect("valid date")
        .and_time(NaiveTime::MIN);
    ApplicationRecord {
        id: 42,
        user_id: Some(7),
        birth_date: Some(birth),
        launcher: Some("officiallauncher".to_string()),
        version: Some("1.21".to_string()),
        server_source: Some("A friend recommended the server.".to_string()),
        quiz_answer: Some("Looked up the rules before applying.".to_string()),
        russian_word_reaction: Some("I would stay calm and move on.".to_string()),
        admin_decision_attitude: Some("Admins keep order; I respect that.".to_string()),
        conflict_reaction: Some("Talk it through, involve staff if needed.".to_string()),
        new_rule_reaction: Some("Rules evolve, I adapt.".to_string()),
        server_experience_negative: Some("Griefing on a public server once.".to_string()),
        useful_skills: Some("Redstone, building.".to_string()),
        useful_skills_detailed: Some("I design compact sorting systems.".to_string()),
        community_projects_readiness: Some("Happy to join town builds.".to_string()),
        healthy_community_definition: Some("Respectful, active, collaborative.".to_string()),
        ideal_server_description: Some("Stable world with long-term projects.".to_string()),
        long_project_experience: Some("Ran a year-long castle build.".to_string()),
        private_server_experience: Some("Hosted a server for friends.".to_string()),
        editable_fields: vec!["quiz_answer".to_string()],
        updated_at: None,
    }
}

pub(super) fn underage_record() -> ApplicationRecord {
    ApplicationRecord {
        birth_date: Some(birth_date_for_age(13)),
        ..adult_record()
    }
}

/// Canned reasoning-service envelope carrying the given completion text.
pub(super) fn envelope(text: &str) -> String {
    json!({
        "candidates": [{
            "content": {
                "parts": [{ "text": text }]
            }
        }]
    })
    .to_string()
}

pub(super) fn accept_envelope(reasoning: &str, confidence: f64) -> String {
    envelope(
        &json!({
            "recommendation": "ACCEPT",
            "reasoning": reasoning,
            "confidence": confidence,
        })
        .to_string(),
    )
}

/// Completion client double that replays queued responses and counts calls.
#[derive(Default)]
pub(super) struct ScriptedClient {
    responses: Mutex<VecDeque<Result<String, CompletionError>>>,
    calls: AtomicUsize,
}

impl ScriptedClient {
    pub(super) fn respond_with(self, raw: String) -> Self {
        self.responses
            .lock()
            .expect("scripted client mutex poisoned")
            .push_back(Ok(raw));
        self
    }

    pub(super) fn fail_next(self) -> Self {
        self.responses
            .lock()
            .expect("scripted client mutex poisoned")
            .push_back(Err(CompletionError::Status {
                status: 503,
                body: "upstream unavailable".to_string(),
            }));
        self
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.responses
            .lock()
            .expect("scripted client mutex poisoned")
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected completion call"))
    }
}

/// Cache double whose every operation fails, for outage-path tests.
#[derive(Default)]
pub(super) struct FailingCache;

impl VerdictCache for FailingCache {
    fn get(&self, _key: &str) -> Result<Option<Verdict>, CacheError> {
        Err(CacheError::Unavailable("store offline".to_string()))
    }

    fn put(&self, _key: &str, _verdict: &Verdict, _retention: Duration) -> Result<(), CacheError> {
        Err(CacheError::Unavailable("store offline".to_string()))
    }
}

pub(super) fn build_service(
    client: ScriptedClient,
) -> (
    ScreeningService<ScriptedClient, InMemoryVerdictCache>,
    Arc<ScriptedClient>,
    Arc<InMemoryVerdictCache>,
) {
    let client = Arc::new(client);
    let cache = Arc::new(InMemoryVerdictCache::default());
    let service = ScreeningService::new(client.clone(), cache.clone(), screening_config());
    (service, client, cache)
}
