use chrono::Utc;

use super::domain::{DealScore, Dimension, DimensionContribution, ZipMetrics};
use super::weights::{Scenario, ScenarioWeightsTable};
use super::{ladders, ScoringError};

/// Magnitude the flood-flag weight is applied against when the ZIP sits in
/// a FEMA special-flood-hazard area.
const FLOOD_PENALTY: f64 = 100.0;

/// Stateless engine applying an injected weights table to metrics records.
pub struct ScoringEngine {
    weights: ScenarioWeightsTable,
}

impl ScoringEngine {
    /// Engine over the production weighting profiles.
    pub fn standard() -> Self {
        Self {
            weights: ScenarioWeightsTable::standard(),
        }
    }

    /// Engine over a caller-supplied table, rejected unless every scenario's
    /// weights sum to 1.0.
    pub fn new(weights: ScenarioWeightsTable) -> Result<Self, ScoringError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &ScenarioWeightsTable {
        &self.weights
    }

    /// Score one metrics record under a scenario.
    ///
    /// Ladder dimensions contribute weight × sub-score; an unknown metric
    /// contributes 0. A set flood flag subtracts weight × 100 instead of
    /// adding. The total is clamped to [0, 100] and truncated to an integer.
    pub fn score(
        &self,
        metrics: &ZipMetrics,
        scenario: Scenario,
    ) -> Result<DealScore, ScoringError> {
        if metrics.zip_code.trim().is_empty() {
            return Err(ScoringError::EmptyZipCode);
        }

        let weights = self.weights.for_scenario(scenario);
        let mut breakdown = Vec::with_capacity(Dimension::ALL.len());
        let mut total = 0.0_f64;

        for dimension in Dimension::ALL {
            let weight = weights.weight(dimension);
            let (sub_score, contribution) = if weight == 0.0 {
                (0.0, 0.0)
            } else if dimension == Dimension::FloodFlag {
                if metrics.flood_flag == Some(true) {
                    (FLOOD_PENALTY, -(weight * FLOOD_PENALTY))
                } else {
                    (0.0, 0.0)
                }
            } else {
                match metrics.dimension_value(dimension) {
                    Some(value) => {
                        let sub_score = ladders::for_pair(scenario, dimension)
                            .map(|ladder| ladder.sub_score(value))
                            .unwrap_or(0.0);
                        (sub_score, weight * sub_score)
                    }
                    None => (0.0, 0.0),
                }
            };

            total += contribution;
            breakdown.push(DimensionContribution {
                dimension,
                weight,
                sub_score,
                contribution,
            });
        }

        let score = total.clamp(0.0, 100.0).floor() as u8;

        Ok(DealScore {
            zip_code: metrics.zip_code.clone(),
            city: metrics.city.clone(),
            state: metrics.state.clone(),
            scenario,
            score,
            breakdown,
            metrics: metrics.clone(),
            computed_at: Utc::now(),
        })
    }

    /// Score a collection and order it for listing: descending score,
    /// ties broken by ascending ZIP so the ranking is deterministic.
    pub fn rank(
        &self,
        metrics: &[ZipMetrics],
        scenario: Scenario,
    ) -> Result<Vec<DealScore>, ScoringError> {
        let mut scored = metrics
            .iter()
            .map(|record| self.score(record, scenario))
            .collect::<Result<Vec<_>, _>>()?;

        scored.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.zip_code.cmp(&b.zip_code))
        });

        Ok(scored)
    }
}
