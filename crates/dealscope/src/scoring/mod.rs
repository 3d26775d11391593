mod catalog;
mod domain;
mod engine;
mod ladders;
mod repository;
mod router;
mod service;
mod weights;

pub use catalog::{CatalogError, MetricsCatalog};
pub use domain::{DealScore, Dimension, DimensionContribution, ZipMetrics};
pub use engine::ScoringEngine;
pub use repository::{DealScoreRepository, RepositoryError};
pub use router::{deal_router, DealsQuery, DealsResponse, ScoreRequest};
pub use service::{DealFilter, DealService, DealServiceError, RefreshSummary};
pub use weights::{Scenario, ScenarioWeights, ScenarioWeightsTable};

/// Errors the scoring engine can surface. Missing optional metrics are not
/// errors; they contribute zero.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("unknown scenario '{name}': expected S1, S2, or S3")]
    InvalidScenario { name: String },
    #[error("metrics record has an empty zip code")]
    EmptyZipCode,
    #[error("{scenario:?} weights sum to {sum}, expected 1.0")]
    UnbalancedWeights { scenario: Scenario, sum: f64 },
}
