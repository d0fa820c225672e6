use std::sync::Arc;

use chrono::Local;
use tracing::{error, info, warn};

use super::cache::{cache_key, VerdictCache};
use super::client::{CompletionClient, CompletionError};
use super::config::ScreeningConfig;
use super::domain::{ApplicationRecord, Verdict};
use super::normalizer::normalize_completion;
use super::policy::quick_reject;
use super::prompt::build_prompt;

pub(crate) const EVALUATION_FAILED_REASONING: &str = "AI evaluation failed";
const EVALUATION_FAILED_CONFIDENCE: f64 = 0.5;

/// Orchestrates the end-to-end evaluate operation: cached verdict reuse, the
/// deterministic quick-reject filter, and delegation to the reasoning service.
/// Never errors outward; every failure path resolves to a decline verdict.
pub struct ScreeningService<C, K> {
    client: Arc<C>,
    cache: Arc<K>,
    config: ScreeningConfig,
}

impl<C, K> ScreeningService<C, K>
where
    C: CompletionClient + 'static,
    K: VerdictCache + 'static,
{
    pub fn new(client: Arc<C>, cache: Arc<K>, config: ScreeningConfig) -> Self {
        Self {
            client,
            cache,
            config,
        }
    }

    /// Evaluate one application. With `force_refresh` the cache read is
    /// skipped and the stored entry is overwritten by the fresh result.
    pub async fn evaluate(&self, record: &ApplicationRecord, force_refresh: bool) -> Verdict {
        info!(
            application_id = record.id,
            force_refresh, "starting application evaluation"
        );
        let key = cache_key(record.id);

        if !force_refresh {
            match self.cache.get(&key) {
                Ok(Some(mut verdict)) => {
                    info!(application_id = record.id, "returning cached verdict");
                    verdict.cached = true;
                    return verdict;
                }
                Ok(None) => {}
                Err(err) => {
                    warn!(
                        application_id = record.id,
                        %err,
                        "cache read failed, treating as miss"
                    );
                }
            }
        }

        let today = Local::now().date_naive();

        if let Some(verdict) = quick_reject(record, &self.config, today) {
            info!(
                application_id = record.id,
                reasoning = %verdict.reasoning,
                "quick validation rejected application"
            );
            self.store(record.id, &key, &verdict);
            return verdict;
        }

        let prompt = build_prompt(record, &self.config, today);
        match self.client.complete(&prompt).await {
            Ok(raw) => {
                let verdict = normalize_completion(&raw);
                info!(
                    application_id = record.id,
                    recommendation = ?verdict.recommendation,
                    confidence = verdict.confidence,
                    "reasoning service returned verdict"
                );
                self.store(record.id, &key, &verdict);
                verdict
            }
            // A failed call is deliberately not cached so the next request
            // retries instead of replaying a transient outage for 24 hours.
            Err(err) => self.call_failure(record.id, err),
        }
    }

    fn store(&self, application_id: u64, key: &str, verdict: &Verdict) {
        if let Err(err) = self
            .cache
            .put(key, verdict, self.config.cache_retention)
        {
            warn!(
                application_id,
                %err,
                "cache write failed, verdict not persisted"
            );
        }
    }

    fn call_failure(&self, application_id: u64, err: CompletionError) -> Verdict {
        error!(application_id, %err, "reasoning service call failed");
        Verdict::decline(EVALUATION_FAILED_REASONING, EVALUATION_FAILED_CONFIDENCE)
    }
}
