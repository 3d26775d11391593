use super::domain::Dimension;
use super::weights::Scenario;

/// Ordered (lower_bound, sub_score) bands evaluated highest-bound-first.
/// The first band whose bound the value meets or exceeds wins; a value
/// below every bound scores 0.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ThresholdLadder {
    rungs: &'static [(f64, f64)],
}

impl ThresholdLadder {
    pub(crate) fn sub_score(&self, value: f64) -> f64 {
        self.rungs
            .iter()
            .find(|(lower_bound, _)| value >= *lower_bound)
            .map(|(_, sub_score)| *sub_score)
            .unwrap_or(0.0)
    }
}

const fn ladder(rungs: &'static [(f64, f64)]) -> ThresholdLadder {
    ThresholdLadder { rungs }
}

// Aggressive scenarios demand more of a metric for the same band: S3 needs
// 80 permits for a 100 where S1 needs 50. The permit ladders bottom out at
// 1 so a ZIP with no permit activity contributes nothing.
const PERMITS_S1: ThresholdLadder =
    ladder(&[(50.0, 100.0), (30.0, 80.0), (20.0, 60.0), (10.0, 40.0), (1.0, 20.0)]);
const PERMITS_S2: ThresholdLadder =
    ladder(&[(60.0, 100.0), (40.0, 80.0), (25.0, 60.0), (15.0, 40.0), (1.0, 20.0)]);
const PERMITS_S3: ThresholdLadder =
    ladder(&[(80.0, 100.0), (50.0, 80.0), (30.0, 60.0), (15.0, 40.0), (1.0, 20.0)]);

// Growth ladders are percentages; negative growth falls below every band.
const RENT_GROWTH_S1: ThresholdLadder =
    ladder(&[(8.0, 100.0), (6.0, 80.0), (4.0, 60.0), (2.0, 40.0), (0.0, 20.0)]);
const RENT_GROWTH_S2: ThresholdLadder =
    ladder(&[(10.0, 100.0), (7.0, 80.0), (5.0, 60.0), (3.0, 40.0), (0.0, 20.0)]);
const RENT_GROWTH_S3: ThresholdLadder =
    ladder(&[(15.0, 100.0), (10.0, 80.0), (7.0, 60.0), (4.0, 40.0), (0.0, 20.0)]);

const VALUE_GROWTH_S1: ThresholdLadder =
    ladder(&[(10.0, 100.0), (7.0, 80.0), (5.0, 60.0), (3.0, 40.0), (0.0, 20.0)]);
const VALUE_GROWTH_S2: ThresholdLadder =
    ladder(&[(12.0, 100.0), (9.0, 80.0), (6.0, 60.0), (4.0, 40.0), (0.0, 20.0)]);
const VALUE_GROWTH_S3: ThresholdLadder =
    ladder(&[(18.0, 100.0), (12.0, 80.0), (8.0, 60.0), (5.0, 40.0), (0.0, 20.0)]);

const NEWS_S1: ThresholdLadder =
    ladder(&[(20.0, 100.0), (15.0, 80.0), (10.0, 60.0), (5.0, 40.0), (0.0, 20.0)]);
const NEWS_S2: ThresholdLadder =
    ladder(&[(25.0, 100.0), (18.0, 80.0), (12.0, 60.0), (6.0, 40.0), (0.0, 20.0)]);
const NEWS_S3: ThresholdLadder =
    ladder(&[(30.0, 100.0), (20.0, 80.0), (15.0, 60.0), (8.0, 40.0), (0.0, 20.0)]);

const INCOME_S1: ThresholdLadder = ladder(&[
    (80_000.0, 100.0),
    (60_000.0, 80.0),
    (45_000.0, 60.0),
    (35_000.0, 40.0),
    (0.0, 20.0),
]);
const INCOME_S2: ThresholdLadder = ladder(&[
    (70_000.0, 100.0),
    (55_000.0, 80.0),
    (40_000.0, 60.0),
    (30_000.0, 40.0),
    (0.0, 20.0),
]);
// S3 assigns income a zero weight; the ladder exists so the table stays
// total over (scenario, dimension).
const INCOME_S3: ThresholdLadder = ladder(&[
    (90_000.0, 100.0),
    (70_000.0, 80.0),
    (50_000.0, 60.0),
    (40_000.0, 40.0),
    (0.0, 20.0),
]);

/// Ladder for a (scenario, dimension) pair. Flood risk is a penalty
/// dimension and has no ladder.
pub(crate) fn for_pair(scenario: Scenario, dimension: Dimension) -> Option<ThresholdLadder> {
    let ladder = match (dimension, scenario) {
        (Dimension::PermitCount, Scenario::S1) => PERMITS_S1,
        (Dimension::PermitCount, Scenario::S2) => PERMITS_S2,
        (Dimension::PermitCount, Scenario::S3) => PERMITS_S3,
        (Dimension::RentGrowth, Scenario::S1) => RENT_GROWTH_S1,
        (Dimension::RentGrowth, Scenario::S2) => RENT_GROWTH_S2,
        (Dimension::RentGrowth, Scenario::S3) => RENT_GROWTH_S3,
        (Dimension::ValueGrowth, Scenario::S1) => VALUE_GROWTH_S1,
        (Dimension::ValueGrowth, Scenario::S2) => VALUE_GROWTH_S2,
        (Dimension::ValueGrowth, Scenario::S3) => VALUE_GROWTH_S3,
        (Dimension::NewsCount, Scenario::S1) => NEWS_S1,
        (Dimension::NewsCount, Scenario::S2) => NEWS_S2,
        (Dimension::NewsCount, Scenario::S3) => NEWS_S3,
        (Dimension::Income, Scenario::S1) => INCOME_S1,
        (Dimension::Income, Scenario::S2) => INCOME_S2,
        (Dimension::Income, Scenario::S3) => INCOME_S3,
        (Dimension::FloodFlag, _) => return None,
    };
    Some(ladder)
}
