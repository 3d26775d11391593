use serde::{Deserialize, Serialize};

use super::domain::Dimension;
use super::ScoringError;

/// Named weighting profile expressing an investment risk appetite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scenario {
    /// Conservative: stability and proven markets.
    S1,
    /// Balanced: mix of growth and stability.
    S2,
    /// Aggressive: high growth potential.
    S3,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Scenario::S1, Scenario::S2, Scenario::S3];

    pub const fn label(self) -> &'static str {
        match self {
            Scenario::S1 => "S1",
            Scenario::S2 => "S2",
            Scenario::S3 => "S3",
        }
    }

    /// Parse a scenario name from an external surface (query string, CSV,
    /// CLI flag). This boundary is the only place an invalid scenario can
    /// exist; past it the type system takes over.
    pub fn parse(value: &str) -> Result<Self, ScoringError> {
        match value.trim().to_ascii_uppercase().as_str() {
            "S1" => Ok(Scenario::S1),
            "S2" => Ok(Scenario::S2),
            "S3" => Ok(Scenario::S3),
            _ => Err(ScoringError::InvalidScenario {
                name: value.trim().to_string(),
            }),
        }
    }
}

/// Weight assignment over all six dimensions for one scenario.
/// Each weight is in [0, 1]; a weight of 0 means the dimension is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioWeights {
    pub permit_count: f64,
    pub rent_growth: f64,
    pub value_growth: f64,
    pub news_count: f64,
    pub flood_flag: f64,
    pub income: f64,
}

impl ScenarioWeights {
    pub fn weight(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::PermitCount => self.permit_count,
            Dimension::RentGrowth => self.rent_growth,
            Dimension::ValueGrowth => self.value_growth,
            Dimension::NewsCount => self.news_count,
            Dimension::FloodFlag => self.flood_flag,
            Dimension::Income => self.income,
        }
    }

    pub fn sum(&self) -> f64 {
        Dimension::ALL
            .iter()
            .map(|dimension| self.weight(*dimension))
            .sum()
    }
}

/// Immutable weights configuration covering all three scenarios. Injected
/// into the engine so scoring stays a pure function of
/// (metrics, scenario, weights).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioWeightsTable {
    pub s1: ScenarioWeights,
    pub s2: ScenarioWeights,
    pub s3: ScenarioWeights,
}

impl ScenarioWeightsTable {
    /// The production weighting profiles.
    pub const fn standard() -> Self {
        Self {
            s1: ScenarioWeights {
                permit_count: 0.25,
                rent_growth: 0.20,
                value_growth: 0.20,
                news_count: 0.15,
                flood_flag: 0.10,
                income: 0.10,
            },
            s2: ScenarioWeights {
                permit_count: 0.20,
                rent_growth: 0.25,
                value_growth: 0.25,
                news_count: 0.20,
                flood_flag: 0.05,
                income: 0.05,
            },
            s3: ScenarioWeights {
                permit_count: 0.15,
                rent_growth: 0.30,
                value_growth: 0.30,
                news_count: 0.25,
                flood_flag: 0.00,
                income: 0.00,
            },
        }
    }

    pub fn for_scenario(&self, scenario: Scenario) -> &ScenarioWeights {
        match scenario {
            Scenario::S1 => &self.s1,
            Scenario::S2 => &self.s2,
            Scenario::S3 => &self.s3,
        }
    }

    /// Every scenario must assign weights that sum to exactly 1.0.
    pub fn validate(&self) -> Result<(), ScoringError> {
        for scenario in Scenario::ALL {
            let sum = self.for_scenario(scenario).sum();
            if (sum - 1.0).abs() > 1e-9 {
                return Err(ScoringError::UnbalancedWeights { scenario, sum });
            }
        }
        Ok(())
    }
}
