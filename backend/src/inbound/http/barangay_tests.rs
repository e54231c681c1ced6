//! Tests for barangay claim handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::inbound::http::test_utils::{FIXED_NOW_MILLIS, api_app, memory_state, signup_cookie};

const CODE: &str = "PH137401001";

fn claim_request(code: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/api/barangay/claim")
        .set_json(json!({ "barangayCode": code }))
}

#[actix_web::test]
async fn claim_returns_the_new_claim() {
    let app = actix_test::init_service(api_app(memory_state())).await;
    let cookie = signup_cookie(&app, "brgy_org", "secret1").await;

    let res = actix_test::call_service(&app, claim_request(CODE).cookie(cookie).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["claim"]["barangayCode"], CODE);
    assert_eq!(body["claim"]["username"], "brgy_org");
    assert_eq!(body["claim"]["claimedAt"], FIXED_NOW_MILLIS);
}

#[actix_web::test]
async fn second_claimant_gets_conflict_and_first_keeps_the_claim() {
    let app = actix_test::init_service(api_app(memory_state())).await;
    let first = signup_cookie(&app, "first_org", "secret1").await;
    let second = signup_cookie(&app, "second_org", "secret1").await;

    let res = actix_test::call_service(&app, claim_request(CODE).cookie(first).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res =
        actix_test::call_service(&app, claim_request(CODE).cookie(second).to_request()).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "conflict");
    assert_eq!(body["message"], "Barangay already claimed by another user");

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/barangay/claim/{CODE}"))
            .to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["claimed"], true);
    assert_eq!(body["claimant"], "first_org");
}

#[rstest]
#[case(claim_request(CODE))]
#[case(actix_test::TestRequest::post().uri("/api/barangay/claim"))]
#[case(
    actix_test::TestRequest::post()
        .uri("/api/barangay/claim")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
)]
#[actix_web::test]
async fn claim_requires_a_session_whatever_the_body(#[case] request: actix_test::TestRequest) {
    let app = actix_test::init_service(api_app(memory_state())).await;
    let res = actix_test::call_service(&app, request.to_request()).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], "Not authenticated");
}

#[actix_web::test]
async fn signed_in_claim_with_malformed_body_is_invalid() {
    let app = actix_test::init_service(api_app(memory_state())).await;
    let cookie = signup_cookie(&app, "brgy_org", "secret1").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/barangay/claim")
            .cookie(cookie)
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["code"], "malformed_body");
}

#[rstest]
#[case(json!({}), "Barangay code is required")]
#[case(json!({ "barangayCode": "" }), "Barangay code is required")]
#[case(json!({ "barangayCode": "PH 1374" }), "Invalid barangay code")]
#[actix_web::test]
async fn claim_rejects_missing_or_invalid_codes(#[case] payload: Value, #[case] message: &str) {
    let app = actix_test::init_service(api_app(memory_state())).await;
    let cookie = signup_cookie(&app, "brgy_org", "secret1").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/barangay/claim")
            .cookie(cookie)
            .set_json(payload)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], message);
    assert_eq!(body["details"]["field"], "barangayCode");
}

#[rstest]
#[case(CODE)]
#[case("not%20a%20code")]
#[actix_web::test]
async fn unclaimed_status_omits_claimant(#[case] code: &str) {
    let app = actix_test::init_service(api_app(memory_state())).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/barangay/claim/{code}"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!({ "claimed": false }));
}

#[actix_web::test]
async fn list_returns_every_claim() {
    let app = actix_test::init_service(api_app(memory_state())).await;
    let cookie = signup_cookie(&app, "brgy_org", "secret1").await;
    for code in ["PH137401002", "PH137401001"] {
        let res = actix_test::call_service(
            &app,
            claim_request(code).cookie(cookie.clone()).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/barangay/claims")
            .to_request(),
    )
    .await;
    let body: ClaimsResponse = actix_test::read_body_json(res).await;
    let codes: Vec<_> = body
        .claims
        .iter()
        .map(|claim| claim.barangay_code.as_str())
        .collect();
    // Equal timestamps from the fixed clock fall back to code order.
    assert_eq!(codes, ["PH137401001", "PH137401002"]);
}

#[test]
fn status_response_serialises_claimant_only_when_claimed() {
    let unclaimed = serde_json::to_value(ClaimStatusResponse::from(ClaimStatus::Unclaimed))
        .expect("serialise");
    assert_eq!(unclaimed, json!({ "claimed": false }));
}
