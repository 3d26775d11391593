use dealscope::underwriting::{underwrite, underwrite_router, ManagementFee, UnderwritingInput};

// Conventions fixed by the contract and asserted here on purpose:
// cash-on-cash is annual operating NOI over total cash invested (debt
// service is NOT netted out of the numerator), and cap rate is taken over
// after-repair value. Results will not match calculators using other
// conventions; that is expected.

fn reference_deal() -> UnderwritingInput {
    UnderwritingInput {
        purchase_price: 300_000.0,
        rehab_cost: 50_000.0,
        after_repair_value: 400_000.0,
        monthly_rent: 2_500.0,
        property_taxes: 6_000.0,
        insurance: 1_200.0,
        property_management: ManagementFee::FlatMonthly(250.0),
        vacancy_rate: 5.0,
        loan_amount: 240_000.0,
        interest_rate: 7.5,
        loan_term_years: 30,
        closing_costs: 9_000.0,
    }
}

#[test]
fn reference_deal_round_trip() {
    let output = underwrite(&reference_deal()).expect("reference deal underwrites");

    assert!((output.monthly_mortgage - 1_678.0).abs() < 1.5);
    assert!(output.cap_rate > 0.0 && output.cap_rate.is_finite());
    assert!(output.dscr > 0.0 && output.dscr.is_finite());
    assert!((output.total_investment - 359_000.0).abs() < 1e-9);
    assert!((output.annual_noi - 18_300.0).abs() < 1e-9);
}

#[test]
fn output_is_a_pure_function_of_input() {
    let input = reference_deal();
    let first = underwrite(&input).expect("underwrites");
    let second = underwrite(&input).expect("underwrites");
    assert_eq!(first, second);
}

#[test]
fn input_deserializes_with_defaults_and_tagged_management_fee() {
    let payload = serde_json::json!({
        "purchase_price": 250_000.0,
        "monthly_rent": 2_000.0,
        "loan_term_years": 30,
        "property_management": { "percent_of_rent": 8.0 }
    });

    let input: UnderwritingInput =
        serde_json::from_value(payload).expect("partial payload deserializes");
    assert_eq!(input.rehab_cost, 0.0);
    assert_eq!(input.closing_costs, 0.0);
    assert_eq!(input.property_management, ManagementFee::PercentOfRent(8.0));

    let output = underwrite(&input).expect("defaulted deal underwrites");
    // No loan: DSCR is infinite, which serializes as null.
    assert!(output.dscr.is_infinite());
    let body = serde_json::to_value(&output).expect("output serializes");
    assert!(body["dscr"].is_null());
    assert_eq!(body["risk_level"], "High", "ARV of zero floors the cap rate");
}

#[tokio::test]
async fn underwrite_endpoint_round_trips_json() {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    let app = underwrite_router();
    let payload = serde_json::to_string(&reference_deal()).expect("input serializes");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/underwrite")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload))
                .expect("request builds"),
        )
        .await
        .expect("handler responds");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(body["risk_level"], "High");
    assert_eq!(body["flip_margin"], body["flip_roi"]);
    let mortgage = body["monthly_mortgage"].as_f64().expect("numeric mortgage");
    assert!((mortgage - 1_678.0).abs() < 1.5);

    let bad = serde_json::json!({
        "purchase_price": 0.0,
        "loan_term_years": 30
    });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/underwrite")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(bad.to_string()))
                .expect("request builds"),
        )
        .await
        .expect("handler responds");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
