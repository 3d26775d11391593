use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use super::domain::ZipMetrics;

/// Collection of ZIP metrics records hydrated from the CSV shape the
/// ingestion jobs publish. Empty cells become unknown metrics, never zero.
#[derive(Debug, Clone, Default)]
pub struct MetricsCatalog {
    records: Vec<ZipMetrics>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("unable to open metrics csv: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed metrics csv: {0}")]
    Csv(#[from] csv::Error),
}

impl MetricsCatalog {
    pub fn from_records(records: Vec<ZipMetrics>) -> Self {
        Self { records }
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for row in csv_reader.deserialize::<MetricsRow>() {
            let row = row?;
            if row.zip_code.is_empty() {
                warn!(city = %row.city, "skipping metrics row without a zip code");
                continue;
            }
            records.push(row.into_metrics());
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[ZipMetrics] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ZipMetrics> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct MetricsRow {
    zip_code: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    permit_count: u32,
    #[serde(default)]
    rent_index: Option<f64>,
    #[serde(default)]
    home_value_index: Option<f64>,
    #[serde(default)]
    rent_growth: Option<f64>,
    #[serde(default)]
    value_growth: Option<f64>,
    #[serde(default)]
    income: Option<f64>,
    #[serde(default)]
    population: Option<u64>,
    #[serde(default)]
    news_count: Option<u32>,
    #[serde(default, deserialize_with = "flexible_bool")]
    flood_flag: Option<bool>,
}

impl MetricsRow {
    fn into_metrics(self) -> ZipMetrics {
        ZipMetrics {
            zip_code: self.zip_code,
            city: self.city,
            state: self.state,
            permit_count: self.permit_count,
            rent_index: self.rent_index,
            home_value_index: self.home_value_index,
            rent_growth: self.rent_growth,
            value_growth: self.value_growth,
            income: self.income,
            population: self.population,
            news_count: self.news_count,
            flood_flag: self.flood_flag,
        }
    }
}

/// The flood exports use a mix of true/false, t/f, and 1/0 spellings.
fn flexible_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|raw| {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "1" | "yes" => Some(true),
            "false" | "f" | "0" | "no" => Some(false),
            _ => None,
        }
    }))
}
