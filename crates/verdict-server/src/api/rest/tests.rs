//! Unit tests for the REST API components

use super::router::create_router;
use super::types::*;
use crate::config::BatchSettings;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use verdict_catalog::Catalog;
use verdict_core::{ActionDef, ComparisonOp, Condition, Rule, RuleSet};
use tower::ServiceExt;

fn seeded_router() -> Router {
    let catalog = Catalog::new();
    catalog
        .upsert_ruleset(
            RuleSet::new("fraud_screening")
                .add_rule(
                    Rule::new(
                        "high_amount",
                        Condition::leaf(
                            "amount",
                            ComparisonOp::Gt,
                            verdict_core::Value::Number(1000.0),
                        ),
                    )
                    .with_weight(2.5)
                    .with_actions(vec!["fraud.flag".to_string()]),
                )
                .add_rule(
                    Rule::new(
                        "foreign_card",
                        Condition::leaf(
                            "card.country",
                            ComparisonOp::Ne,
                            verdict_core::Value::String("US".to_string()),
                        ),
                    )
                    .with_weight(1.0),
                ),
        )
        .unwrap();
    catalog
        .upsert_action(ActionDef::literal(
            "fraud.flag",
            verdict_core::Value::String("flagged".to_string()),
        ))
        .unwrap();
    create_router(Arc::new(catalog), BatchSettings::default())
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(
        seeded_router(),
        Request::get("/health").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_execute_scores_and_resolves_actions() {
    let request = post_json(
        "/v1/rules/execute",
        json!({
            "data": {"amount": 5000, "card": {"country": "DE"}},
            "ruleset": "fraud_screening"
        }),
    );
    let (status, body) = send(seeded_router(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["correlation_id"].as_str().unwrap().is_empty());
    assert_eq!(body["result"]["score"], json!(3.5));
    assert_eq!(
        body["result"]["matched_rule_ids"],
        json!(["high_amount", "foreign_card"])
    );
    assert_eq!(body["result"]["actions"][0]["value"], "flagged");
}

#[tokio::test]
async fn test_execute_unknown_ruleset_is_404() {
    let request = post_json(
        "/v1/rules/execute",
        json!({"data": {}, "ruleset": "missing"}),
    );
    let (status, body) = send(seeded_router(), request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "ruleset_not_found");
    assert_eq!(body["status"], 404);
    assert!(!body["correlation_id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_execute_rejects_malformed_json() {
    let request = Request::post("/v1/rules/execute")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(seeded_router(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_request");
}

#[tokio::test]
async fn test_batch_requires_exactly_one_target() {
    let request = post_json("/v1/rules/batch", json!({"data_list": [{}]}));
    let (status, body) = send(seeded_router(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_request");

    let request = post_json(
        "/v1/rules/batch",
        json!({"data_list": [{}], "ruleset": "a", "workflow": "b"}),
    );
    let (status, _) = send(seeded_router(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_batch_preserves_order_and_isolates_nothing_on_success() {
    let request = post_json(
        "/v1/rules/batch",
        json!({
            "data_list": [
                {"amount": 5000, "card": {"country": "US"}},
                {"amount": 10, "card": {"country": "US"}}
            ],
            "ruleset": "fraud_screening"
        }),
    );
    let (status, body) = send(seeded_router(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["batch"]["summary"]["total"], 2);
    assert_eq!(body["batch"]["summary"]["succeeded"], 2);
    assert_eq!(body["batch"]["summary"]["success_rate"], 100.0);
    assert_eq!(body["batch"]["results"][0]["status"], "ok");
    assert_eq!(body["batch"]["results"][0]["output"]["score"], json!(2.5));
    assert_eq!(body["batch"]["results"][1]["output"]["score"], json!(0.0));
    assert!(!body["batch"]["batch_id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_batch_request_timeout_fails_items_with_timeout_error() {
    let request = post_json(
        "/v1/rules/batch",
        json!({
            "data_list": [{"amount": 5000, "card": {"country": "US"}}],
            "ruleset": "fraud_screening",
            "options": {"timeout_ms": 0}
        }),
    );
    let (status, body) = send(seeded_router(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["batch"]["summary"]["failed"], 1);
    assert_eq!(body["batch"]["results"][0]["status"], "error");
    assert_eq!(body["batch"]["results"][0]["error"]["kind"], "timeout_error");
}

#[tokio::test]
async fn test_inline_dmn_execution_commits_nothing() {
    let router = seeded_router();
    let request = post_json(
        "/v1/rules/execute-dmn",
        json!({
            "table": {
                "id": "routing",
                "hit_policy": "FIRST",
                "inputs": [{"field": "country"}],
                "outputs": [{"name": "desk"}],
                "rows": [
                    {"id": "de", "inputs": ["DE"], "outputs": ["eu_desk"]},
                    {"id": "any", "inputs": ["-"], "outputs": ["default_desk"]}
                ]
            },
            "data": {"country": "DE"}
        }),
    );
    let (status, body) = send(router.clone(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["matched_rule_ids"], json!(["routing.de"]));
    assert_eq!(body["result"]["actions"][0]["value"], "eu_desk");

    // The transient table never reached the catalog
    let (_, listing) = send(
        router,
        Request::get("/v1/rulesets").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(listing["items"], json!(["fraud_screening"]));
}

#[tokio::test]
async fn test_inline_dmn_bad_table_is_400() {
    let request = post_json(
        "/v1/rules/execute-dmn",
        json!({
            "table": {
                "id": "bad",
                "hit_policy": "UNIQUE",
                "inputs": [{"field": "x"}],
                "outputs": [],
                "rows": [{"id": "r1", "inputs": [1], "outputs": []}]
            },
            "data": {}
        }),
    );
    let (status, body) = send(seeded_router(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "translation_error");
    assert!(body["error"].as_str().unwrap().contains("UNIQUE"));
}

#[tokio::test]
async fn test_workflow_with_inline_stages() {
    let request = post_json(
        "/v1/workflows/execute",
        json!({
            "process_name": "screening",
            "stages": [
                {"name": "score", "ruleset_ref": "fraud_screening", "on_match": "halt"}
            ],
            "data": {"amount": 5000, "card": {"country": "US"}}
        }),
    );
    let (status, body) = send(seeded_router(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"]["state"], "halted");
    assert_eq!(body["outcome"]["score"], json!(2.5));
    assert_eq!(body["outcome"]["stages"][0]["transition"], "halted_on_match");
}

#[tokio::test]
async fn test_workflow_unknown_process_is_404() {
    let request = post_json(
        "/v1/workflows/execute",
        json!({"process_name": "nope", "data": {}}),
    );
    let (status, body) = send(seeded_router(), request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
}

#[tokio::test]
async fn test_admin_ruleset_crud() {
    let router = seeded_router();

    let ruleset = json!({
        "name": "limits",
        "rules": [{
            "id": "over_limit",
            "conditions": {"field": "count", "operator": "gte", "value": 10}
        }]
    });
    let (status, body) = send(
        router.clone(),
        Request::put("/v1/rulesets/limits")
            .header("content-type", "application/json")
            .body(Body::from(ruleset.to_string()))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], 1);

    let (status, body) = send(
        router.clone(),
        Request::get("/v1/rulesets/limits").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rules"][0]["id"], "over_limit");

    let (status, _) = send(
        router.clone(),
        Request::delete("/v1/rulesets/limits").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        router,
        Request::get("/v1/rulesets/limits").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_put_mismatched_name_is_400() {
    let (status, body) = send(
        seeded_router(),
        Request::put("/v1/rulesets/other")
            .header("content-type", "application/json")
            .body(Body::from(json!({"name": "limits", "rules": []}).to_string()))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_request");
}

#[tokio::test]
async fn test_admin_rule_crud_bumps_ruleset_version() {
    let router = seeded_router();
    let rule = json!({
        "id": "velocity",
        "conditions": {"field": "tx_per_hour", "operator": "gt", "value": 20},
        "weight": 4.0
    });

    let (status, body) = send(
        router.clone(),
        Request::put("/v1/rulesets/fraud_screening/rules/velocity")
            .header("content-type", "application/json")
            .body(Body::from(rule.to_string()))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], 2);

    let (status, body) = send(
        router.clone(),
        Request::get("/v1/rulesets/fraud_screening/rules/velocity")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["weight"], 4.0);

    let (status, body) = send(
        router,
        Request::delete("/v1/rulesets/fraud_screening/rules/velocity")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], 3);
}

#[tokio::test]
async fn test_admin_action_and_workflow_listing() {
    let router = seeded_router();

    let (_, body) = send(
        router.clone(),
        Request::get("/v1/actions").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(body["items"], json!(["fraud.flag"]));

    let (status, _) = send(
        router.clone(),
        Request::put("/v1/workflows/screening")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({
                    "process_name": "screening",
                    "stages": [{"name": "s1", "ruleset_ref": "fraud_screening"}]
                })
                .to_string(),
            ))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(
        router,
        Request::get("/v1/workflows").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(body["items"], json!(["screening"]));
}

#[tokio::test]
async fn test_request_options_stop_on_first_match() {
    let request = post_json(
        "/v1/rules/execute",
        json!({
            "data": {"amount": 5000, "card": {"country": "DE"}},
            "ruleset": "fraud_screening",
            "options": {"stop_on_first_match": true}
        }),
    );
    let (status, body) = send(seeded_router(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["matched_rule_ids"], json!(["high_amount"]));
    assert_eq!(body["result"]["score"], json!(2.5));
}
