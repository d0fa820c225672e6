use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use super::domain::Verdict;

pub const CACHE_KEY_PREFIX: &str = "eval:";

/// Cache key for an application's verdict.
pub fn cache_key(application_id: u64) -> String {
    format!("{CACHE_KEY_PREFIX}{application_id}")
}

/// Narrow storage abstraction over the shared result cache. Stored verdicts
/// always carry `cached = false`; the flag is set by the reader, never by the
/// store. Writes replace the value wholesale and reset the retention window.
pub trait VerdictCache: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Verdict>, CacheError>;
    fn put(&self, key: &str, verdict: &Verdict, retention: Duration) -> Result<(), CacheError>;
}

/// Cache backend failure. The orchestrator treats this as a miss and keeps
/// evaluating rather than failing the request.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache unavailable: {0}")]
    Unavailable(String),
}

/// Process-local cache with per-entry expiry. Backs the service when no
/// external store is wired in, and the tests everywhere else.
#[derive(Default, Clone)]
pub struct InMemoryVerdictCache {
    entries: Arc<Mutex<HashMap<String, StoredVerdict>>>,
}

struct StoredVerdict {
    verdict: Verdict,
    expires_at: Instant,
}

impl VerdictCache for InMemoryVerdictCache {
    fn get(&self, key: &str) -> Result<Option<Verdict>, CacheError> {
        let mut guard = self.entries.lock().expect("cache mutex poisoned");
        match guard.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Ok(Some(entry.verdict.clone())),
            Some(_) => {
                guard.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn put(&self, key: &str, verdict: &Verdict, retention: Duration) -> Result<(), CacheError> {
        let mut guard = self.entries.lock().expect("cache mutex poisoned");
        guard.insert(
            key.to_string(),
            StoredVerdict {
                verdict: verdict.clone(),
                expires_at: Instant::now() + retention,
            },
        );
        Ok(())
    }
}
