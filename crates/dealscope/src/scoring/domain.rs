use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::weights::Scenario;

/// Per-ZIP metrics record published by the ingestion jobs.
///
/// Optional fields mean the metric is unknown for that ZIP, never zero;
/// scoring gives unknown dimensions a zero contribution instead of imputing
/// a magnitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZipMetrics {
    pub zip_code: String,
    pub city: String,
    pub state: String,
    /// Permits issued in the trailing 12-month window.
    pub permit_count: u32,
    #[serde(default)]
    pub rent_index: Option<f64>,
    #[serde(default)]
    pub home_value_index: Option<f64>,
    #[serde(default)]
    pub rent_growth: Option<f64>,
    #[serde(default)]
    pub value_growth: Option<f64>,
    #[serde(default)]
    pub income: Option<f64>,
    #[serde(default)]
    pub population: Option<u64>,
    #[serde(default)]
    pub news_count: Option<u32>,
    /// True when the ZIP has at least one FEMA special-flood-hazard record.
    #[serde(default)]
    pub flood_flag: Option<bool>,
}

impl ZipMetrics {
    /// Raw value for a ladder-scored dimension, or `None` when unknown.
    /// Flood risk is a penalty dimension and never resolves to a value here.
    pub(crate) fn dimension_value(&self, dimension: Dimension) -> Option<f64> {
        match dimension {
            Dimension::PermitCount => Some(f64::from(self.permit_count)),
            Dimension::RentGrowth => self.rent_growth,
            Dimension::ValueGrowth => self.value_growth,
            Dimension::NewsCount => self.news_count.map(f64::from),
            Dimension::Income => self.income,
            Dimension::FloodFlag => None,
        }
    }
}

/// The six dimensions every scenario assigns a weight to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    PermitCount,
    RentGrowth,
    ValueGrowth,
    NewsCount,
    FloodFlag,
    Income,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::PermitCount,
        Dimension::RentGrowth,
        Dimension::ValueGrowth,
        Dimension::NewsCount,
        Dimension::FloodFlag,
        Dimension::Income,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Dimension::PermitCount => "permit_count",
            Dimension::RentGrowth => "rent_growth",
            Dimension::ValueGrowth => "value_growth",
            Dimension::NewsCount => "news_count",
            Dimension::FloodFlag => "flood_flag",
            Dimension::Income => "income",
        }
    }
}

/// Discrete contribution of one dimension to a deal score, allowing
/// transparent audits of how a total came together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionContribution {
    pub dimension: Dimension,
    /// Weight the scenario assigns to this dimension.
    pub weight: f64,
    /// Ladder sub-score in [0, 100], or the penalty magnitude for flood risk.
    /// Zero when the underlying metric is unknown.
    pub sub_score: f64,
    /// Signed weight × sub-score actually added to the total.
    pub contribution: f64,
}

/// Scored deal for one (ZIP, scenario) pair, with the metrics snapshot it
/// was computed from. Superseded wholesale on the next batch refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealScore {
    pub zip_code: String,
    pub city: String,
    pub state: String,
    pub scenario: Scenario,
    pub score: u8,
    pub breakdown: Vec<DimensionContribution>,
    pub metrics: ZipMetrics,
    pub computed_at: DateTime<Utc>,
}
