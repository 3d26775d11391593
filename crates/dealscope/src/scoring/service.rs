use std::sync::Arc;

use tracing::info;

use super::domain::{DealScore, ZipMetrics};
use super::engine::ScoringEngine;
use super::repository::{DealScoreRepository, RepositoryError};
use super::weights::Scenario;
use super::ScoringError;

/// Service composing the scoring engine with a deal-score repository:
/// batch refreshes write superseding scores, listings read them back
/// ranked and filtered.
pub struct DealService<R> {
    engine: ScoringEngine,
    repository: Arc<R>,
}

/// Caller-side filters for a ranked listing. The engine's ordering is pure
/// list in / list out, so these compose as plain retain/truncate passes.
#[derive(Debug, Clone, Default)]
pub struct DealFilter {
    pub state: Option<String>,
    pub min_score: Option<u8>,
    pub limit: Option<usize>,
}

/// Outcome of a batch refresh across every ZIP and scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSummary {
    pub zips: usize,
    pub scores_written: usize,
}

impl<R> DealService<R>
where
    R: DealScoreRepository + 'static,
{
    pub fn new(engine: ScoringEngine, repository: Arc<R>) -> Self {
        Self { engine, repository }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Score one record under a scenario without touching the repository.
    pub fn score(
        &self,
        metrics: &ZipMetrics,
        scenario: Scenario,
    ) -> Result<DealScore, DealServiceError> {
        Ok(self.engine.score(metrics, scenario)?)
    }

    /// Recompute every (ZIP, scenario) pair and supersede the stored
    /// scores. Run whenever the underlying metrics are refreshed.
    pub fn refresh(&self, metrics: &[ZipMetrics]) -> Result<RefreshSummary, DealServiceError> {
        let mut scores_written = 0;
        for record in metrics {
            for scenario in Scenario::ALL {
                let score = self.engine.score(record, scenario)?;
                self.repository.upsert(score)?;
                scores_written += 1;
            }
        }

        let summary = RefreshSummary {
            zips: metrics.len(),
            scores_written,
        };
        info!(
            zips = summary.zips,
            scores = summary.scores_written,
            "deal scores refreshed"
        );
        Ok(summary)
    }

    /// Current scores for a scenario, ranked (descending score, ascending
    /// ZIP on ties) and filtered.
    pub fn ranked(
        &self,
        scenario: Scenario,
        filter: &DealFilter,
    ) -> Result<Vec<DealScore>, DealServiceError> {
        let mut deals = self.repository.for_scenario(scenario)?;

        if let Some(state) = &filter.state {
            deals.retain(|deal| deal.state.eq_ignore_ascii_case(state));
        }
        if let Some(min_score) = filter.min_score {
            deals.retain(|deal| deal.score >= min_score);
        }

        deals.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.zip_code.cmp(&b.zip_code))
        });

        if let Some(limit) = filter.limit {
            deals.truncate(limit);
        }

        Ok(deals)
    }

    /// Current score for one ZIP under a scenario.
    pub fn current(
        &self,
        zip_code: &str,
        scenario: Scenario,
    ) -> Result<Option<DealScore>, DealServiceError> {
        Ok(self.repository.current(zip_code, scenario)?)
    }
}

/// Error raised by the deal service.
#[derive(Debug, thiserror::Error)]
pub enum DealServiceError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
