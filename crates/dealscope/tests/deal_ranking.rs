use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use dealscope::scoring::{
    deal_router, DealFilter, DealScore, DealScoreRepository, DealService, MetricsCatalog,
    RepositoryError, Scenario, ScoringEngine, ZipMetrics,
};

#[derive(Default)]
struct TestRepository {
    scores: Mutex<HashMap<(String, Scenario), DealScore>>,
}

impl DealScoreRepository for TestRepository {
    fn upsert(&self, score: DealScore) -> Result<(), RepositoryError> {
        let mut guard = self.scores.lock().expect("repository mutex poisoned");
        guard.insert((score.zip_code.clone(), score.scenario), score);
        Ok(())
    }

    fn current(
        &self,
        zip_code: &str,
        scenario: Scenario,
    ) -> Result<Option<DealScore>, RepositoryError> {
        let guard = self.scores.lock().expect("repository mutex poisoned");
        Ok(guard.get(&(zip_code.to_string(), scenario)).cloned())
    }

    fn for_scenario(&self, scenario: Scenario) -> Result<Vec<DealScore>, RepositoryError> {
        let guard = self.scores.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|score| score.scenario == scenario)
            .cloned()
            .collect())
    }
}

const METRICS_CSV: &str = "\
zip_code,city,state,permit_count,rent_index,home_value_index,rent_growth,value_growth,income,population,news_count,flood_flag
08608,Trenton,NJ,42,1450,310000,6.1,8.4,52000,28000,14,false
19103,Philadelphia,PA,77,2100,455000,9.2,11.8,68000,41000,22,false
07030,Hoboken,NJ,18,2950,780000,4.8,6.2,91000,60000,9,true
08102,Camden,NJ,9,1150,145000,2.2,3.1,34000,19000,3,true
18015,Bethlehem,PA,31,1500,265000,7.4,9.9,55000,33000,11,
";

fn catalog() -> MetricsCatalog {
    MetricsCatalog::from_reader(METRICS_CSV.as_bytes()).expect("fixture csv parses")
}

fn service() -> DealService<TestRepository> {
    DealService::new(ScoringEngine::standard(), Arc::new(TestRepository::default()))
}

#[test]
fn ranking_is_deterministic_across_runs() {
    let engine = ScoringEngine::standard();
    let records = catalog().into_records();

    let first = engine.rank(&records, Scenario::S1).expect("ranks cleanly");
    let second = engine.rank(&records, Scenario::S1).expect("ranks cleanly");

    let first_zips: Vec<&str> = first.iter().map(|d| d.zip_code.as_str()).collect();
    let second_zips: Vec<&str> = second.iter().map(|d| d.zip_code.as_str()).collect();
    assert_eq!(first_zips, second_zips);

    for window in first.windows(2) {
        assert!(
            window[0].score > window[1].score
                || (window[0].score == window[1].score
                    && window[0].zip_code < window[1].zip_code),
            "ordering must be descending score with ascending zip tie-break"
        );
    }
}

#[test]
fn ties_break_by_ascending_zip_code() {
    let engine = ScoringEngine::standard();
    let mut a = catalog().into_records()[0].clone();
    let mut b = a.clone();
    a.zip_code = "19999".to_string();
    b.zip_code = "07001".to_string();

    let ranked = engine
        .rank(&[a, b], Scenario::S2)
        .expect("ranks cleanly");
    assert_eq!(ranked[0].score, ranked[1].score);
    assert_eq!(ranked[0].zip_code, "07001");
    assert_eq!(ranked[1].zip_code, "19999");
}

#[test]
fn refresh_supersedes_prior_scores_per_zip_and_scenario() {
    let service = service();
    let mut records = catalog().into_records();

    let summary = service.refresh(&records).expect("refresh succeeds");
    assert_eq!(summary.zips, 5);
    assert_eq!(summary.scores_written, 15);

    let before = service
        .current("08102", Scenario::S1)
        .expect("lookup succeeds")
        .expect("camden scored");

    // Permit surge in Camden; a second refresh must replace, not merge.
    for record in &mut records {
        if record.zip_code == "08102" {
            record.permit_count = 55;
        }
    }
    service.refresh(&records).expect("refresh succeeds");

    let after = service
        .current("08102", Scenario::S1)
        .expect("lookup succeeds")
        .expect("camden rescored");
    assert!(after.score > before.score);
    assert_eq!(after.metrics.permit_count, 55);

    let listed = service
        .ranked(Scenario::S1, &DealFilter::default())
        .expect("listing succeeds");
    assert_eq!(listed.len(), 5, "one current score per zip");
}

#[test]
fn listing_filters_compose_over_the_pure_ranking() {
    let service = service();
    service
        .refresh(&catalog().into_records())
        .expect("refresh succeeds");

    let all = service
        .ranked(Scenario::S2, &DealFilter::default())
        .expect("listing succeeds");
    assert_eq!(all.len(), 5);

    let nj_only = service
        .ranked(
            Scenario::S2,
            &DealFilter {
                state: Some("nj".to_string()),
                ..DealFilter::default()
            },
        )
        .expect("listing succeeds");
    assert_eq!(nj_only.len(), 3);
    assert!(nj_only.iter().all(|deal| deal.state == "NJ"));

    let floor = all[2].score;
    let strong = service
        .ranked(
            Scenario::S2,
            &DealFilter {
                min_score: Some(floor),
                ..DealFilter::default()
            },
        )
        .expect("listing succeeds");
    assert!(strong.iter().all(|deal| deal.score >= floor));
    assert_eq!(
        strong.iter().map(|d| d.zip_code.as_str()).collect::<Vec<_>>(),
        all.iter()
            .filter(|d| d.score >= floor)
            .map(|d| d.zip_code.as_str())
            .collect::<Vec<_>>(),
        "filtering must not disturb the ranking"
    );

    let top_two = service
        .ranked(
            Scenario::S2,
            &DealFilter {
                limit: Some(2),
                ..DealFilter::default()
            },
        )
        .expect("listing succeeds");
    assert_eq!(top_two.len(), 2);
    assert_eq!(top_two[0].zip_code, all[0].zip_code);
}

#[test]
fn every_scenario_scores_the_fixture_within_bounds() {
    let engine = ScoringEngine::standard();
    for record in catalog().records() {
        for scenario in Scenario::ALL {
            let score = engine.score(record, scenario).expect("scores cleanly");
            assert!(score.score <= 100);
            assert_eq!(score.breakdown.len(), 6);
        }
    }
}

#[tokio::test]
async fn deals_endpoint_serves_the_ranked_listing() {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    let service = Arc::new(service());
    service
        .refresh(&catalog().into_records())
        .expect("refresh succeeds");
    let app = deal_router(service);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/deals?scenario=S1&state=NJ&min_score=1")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("handler responds");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(body["scenario"], "S1");
    let deals = body["deals"].as_array().expect("deals array");
    assert!(!deals.is_empty());
    assert!(deals.iter().all(|deal| deal["state"] == "NJ"));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/deals?scenario=S9")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("handler responds");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn score_endpoint_scores_a_single_record() {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    let app = deal_router(Arc::new(service()));
    let metrics: ZipMetrics = catalog().into_records().remove(1);
    let payload = serde_json::json!({ "scenario": "s3", "metrics": metrics });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/score")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .expect("request builds"),
        )
        .await
        .expect("handler responds");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(body["zip_code"], "19103");
    assert_eq!(body["scenario"], "S3");
    let score = body["score"].as_u64().expect("numeric score");
    assert!(score <= 100);
    assert_eq!(body["breakdown"].as_array().expect("breakdown").len(), 6);
}
