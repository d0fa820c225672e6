//! Application screening workflow: deterministic pre-filtering, cached verdict
//! reuse, and delegation to an external reasoning service for everything the
//! rules cannot decide on their own.

pub mod cache;
pub mod client;
pub mod config;
pub mod domain;
pub mod normalizer;
pub(crate) mod policy;
pub(crate) mod prompt;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use cache::{cache_key, CacheError, InMemoryVerdictCache, VerdictCache, CACHE_KEY_PREFIX};
pub use client::{CompletionClient, CompletionError, GeminiClient, ReasoningConfig};
pub use config::ScreeningConfig;
pub use domain::{ApplicationRecord, Recommendation, Verdict};
pub use normalizer::normalize_completion;
pub use router::screening_router;
pub use service::ScreeningService;
