use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use dealscope::scoring::{DealScore, DealScoreRepository, RepositoryError, Scenario, ZipMetrics};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Keeps at most one current score per (zip, scenario); an upsert replaces
/// the prior computation wholesale.
#[derive(Default, Clone)]
pub(crate) struct InMemoryDealScoreRepository {
    scores: Arc<Mutex<HashMap<(String, Scenario), DealScore>>>,
}

fn poisoned() -> RepositoryError {
    RepositoryError::Storage("score store mutex poisoned".to_string())
}

impl DealScoreRepository for InMemoryDealScoreRepository {
    fn upsert(&self, score: DealScore) -> Result<(), RepositoryError> {
        let mut guard = self.scores.lock().map_err(|_| poisoned())?;
        guard.insert((score.zip_code.clone(), score.scenario), score);
        Ok(())
    }

    fn current(
        &self,
        zip_code: &str,
        scenario: Scenario,
    ) -> Result<Option<DealScore>, RepositoryError> {
        let guard = self.scores.lock().map_err(|_| poisoned())?;
        Ok(guard.get(&(zip_code.to_string(), scenario)).cloned())
    }

    fn for_scenario(&self, scenario: Scenario) -> Result<Vec<DealScore>, RepositoryError> {
        let guard = self.scores.lock().map_err(|_| poisoned())?;
        Ok(guard
            .values()
            .filter(|score| score.scenario == scenario)
            .cloned()
            .collect())
    }
}

fn zip(
    zip_code: &str,
    city: &str,
    state: &str,
    permit_count: u32,
    rent_growth: Option<f64>,
    value_growth: Option<f64>,
    income: Option<f64>,
    news_count: Option<u32>,
    flood_flag: Option<bool>,
) -> ZipMetrics {
    ZipMetrics {
        zip_code: zip_code.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        permit_count,
        rent_index: None,
        home_value_index: None,
        rent_growth,
        value_growth,
        income,
        population: None,
        news_count,
        flood_flag,
    }
}

/// NJ/PA sample metrics used when no ingestion CSV is configured, so the
/// service and demo have something to score out of the box.
pub(crate) fn sample_metrics() -> Vec<ZipMetrics> {
    vec![
        zip(
            "08608",
            "Trenton",
            "NJ",
            42,
            Some(6.1),
            Some(8.4),
            Some(52_000.0),
            Some(14),
            Some(false),
        ),
        zip(
            "19103",
            "Philadelphia",
            "PA",
            77,
            Some(9.2),
            Some(11.8),
            Some(68_000.0),
            Some(22),
            Some(false),
        ),
        zip(
            "07030",
            "Hoboken",
            "NJ",
            18,
            Some(4.8),
            Some(6.2),
            Some(91_000.0),
            Some(9),
            Some(true),
        ),
        zip(
            "08102",
            "Camden",
            "NJ",
            9,
            Some(2.2),
            Some(3.1),
            Some(34_000.0),
            Some(3),
            Some(true),
        ),
        zip(
            "18015",
            "Bethlehem",
            "PA",
            31,
            Some(7.4),
            Some(9.9),
            Some(55_000.0),
            Some(11),
            None,
        ),
        zip("08701", "Lakewood", "NJ", 96, None, None, None, Some(28), Some(false)),
    ]
}
