use super::domain::DealScore;
use super::weights::Scenario;

/// Storage boundary for computed deal scores. Implementations keep at most
/// one current score per (zip, scenario) pair; an upsert supersedes the
/// previous computation outright rather than merging with it.
pub trait DealScoreRepository: Send + Sync {
    fn upsert(&self, score: DealScore) -> Result<(), RepositoryError>;

    fn current(
        &self,
        zip_code: &str,
        scenario: Scenario,
    ) -> Result<Option<DealScore>, RepositoryError>;

    /// All current scores for a scenario, in no particular order.
    fn for_scenario(&self, scenario: Scenario) -> Result<Vec<DealScore>, RepositoryError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("deal score not found")]
    NotFound,
    #[error("deal score storage failed: {0}")]
    Storage(String),
}
