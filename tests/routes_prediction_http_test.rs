// ABOUTME: HTTP integration tests for the weight forecast routes
// ABOUTME: Exercises basic and extra forecasts, validation failures, and stored forecast lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::axum_test::AxumTestRequest;
use helpers::fixtures::{self, BrokenModel, RecordingModel};
use pierre_weight_forecast::resources::ServerResources;
use pierre_weight_forecast::routes;
use forecast_intelligence::{FeatureRange, ScriptedRandomProvider};
use serde_json::{json, Value};
use std::sync::Arc;

const BASIC_URI: &str = "/api/v1/users/17/body/prediction/fast-api";
const EXTRA_URI: &str = "/api/v1/users/17/body/prediction/extra/fast-api";

fn app(resources: &Arc<ServerResources>) -> axum::Router {
    routes::router(resources)
}

fn history(days: usize) -> Value {
    let records: Vec<Value> = (0..days)
        .map(|day| {
            let weight = 75.0 + day as f64 * 0.1;
            json!({"sex": 0, "age": 30, "bmi": weight / 3.0, "weight": weight, "calories": 300.0})
        })
        .collect();
    Value::Array(records)
}

// ============================================================================
// POST basic forecast
// ============================================================================

#[tokio::test]
async fn test_basic_forecast_returns_prediction() {
    let resources = fixtures::resources();
    let response = AxumTestRequest::post(BASIC_URI)
        .json(&json!({"exercise_data": history(3)}))
        .send(app(&resources))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["user_id"], 17);
    assert!(body["id"].is_string());
    assert!(body["p30"].is_number());
    assert!(body["p90"].is_number());
    assert!(body.get("exercise").is_none());
    assert!(body["created_at"].is_string());
}

#[tokio::test]
async fn test_basic_forecast_is_persisted_and_served() {
    let resources = fixtures::resources();
    let posted: Value = AxumTestRequest::post(BASIC_URI)
        .json(&json!({"exercise_data": history(7)}))
        .send(app(&resources))
        .await
        .json();

    let response = AxumTestRequest::get("/api/v1/users/17/body/prediction")
        .send(app(&resources))
        .await;
    assert_eq!(response.status(), 200);
    let latest: Value = response.json();
    assert_eq!(latest["id"], posted["id"]);
    assert_eq!(latest["p30"], posted["p30"]);
}

#[tokio::test]
async fn test_basic_forecast_rejects_empty_history() {
    let resources = fixtures::resources();
    let response = AxumTestRequest::post(BASIC_URI)
        .json(&json!({"exercise_data": []}))
        .send(app(&resources))
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_basic_forecast_rejects_non_positive_bmi() {
    let resources = fixtures::resources();
    let response = AxumTestRequest::post(BASIC_URI)
        .json(&json!({"exercise_data": [
            {"sex": 1, "age": 41, "bmi": 0.0, "weight": 80.0, "calories": 200.0}
        ]}))
        .send(app(&resources))
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("record 0"));
}

#[tokio::test]
async fn test_model_failure_maps_to_server_error() {
    let resources = fixtures::resources_with_model(Arc::new(BrokenModel));
    let response = AxumTestRequest::post(BASIC_URI)
        .json(&json!({"exercise_data": history(2)}))
        .send(app(&resources))
        .await;

    assert_eq!(response.status(), 500);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "MODEL_INFERENCE_FAILED");

    // Nothing is stored for a failed forecast
    let latest = AxumTestRequest::get("/api/v1/users/17/body/prediction")
        .send(app(&resources))
        .await;
    assert_eq!(latest.status(), 404);
}

// ============================================================================
// POST extra forecast
// ============================================================================

#[tokio::test]
async fn test_extra_forecast_includes_exercise() {
    let resources = fixtures::resources();
    let response = AxumTestRequest::post(EXTRA_URI)
        .json(&json!({
            "exercise_data": history(3),
            "extra_exercise_data": [
                {"sex": 0, "age": 30, "bmi": 25.2, "weight": 75.6, "calories": 640.0}
            ],
            "exercise_detail": {"exercise_id": 4, "duration": 50, "count": 3}
        }))
        .send(app(&resources))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["exercise"]["exercise_id"], 4);
    assert_eq!(body["exercise"]["duration"], 50);
    assert_eq!(body["exercise"]["count"], 3);

    let latest: Value = AxumTestRequest::get("/api/v1/users/17/body/prediction/extra")
        .send(app(&resources))
        .await
        .json();
    assert_eq!(latest["id"], body["id"]);

    // Extra forecasts live in their own collection
    let basic = AxumTestRequest::get("/api/v1/users/17/body/prediction")
        .send(app(&resources))
        .await;
    assert_eq!(basic.status(), 404);
}

#[tokio::test]
async fn test_extra_forecast_requires_extra_history() {
    let resources = fixtures::resources();
    let response = AxumTestRequest::post(EXTRA_URI)
        .json(&json!({
            "exercise_data": history(3),
            "exercise_detail": {"exercise_id": 4, "duration": 50, "count": 3}
        }))
        .send(app(&resources))
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELD");
}

#[tokio::test]
async fn test_extra_forecast_requires_exercise_detail() {
    let resources = fixtures::resources();
    let response = AxumTestRequest::post(EXTRA_URI)
        .json(&json!({
            "exercise_data": history(3),
            "extra_exercise_data": history(1)
        }))
        .send(app(&resources))
        .await;

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_extra_forecast_rejects_malformed_record_as_json_error() {
    let resources = fixtures::resources();
    let response = AxumTestRequest::post(EXTRA_URI)
        .json(&json!({
            "exercise_data": [{"sex": 0, "age": -4, "bmi": 25.0, "weight": 75.0, "calories": 300.0}],
            "extra_exercise_data": history(1),
            "exercise_detail": {"exercise_id": 4, "duration": 50, "count": 3}
        }))
        .send(app(&resources))
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

// ============================================================================
// Calorie noise per flow
// ============================================================================

/// Pipeline whose model records its input and whose calorie noise is a fixed +40 kcal
fn recording_resources() -> (Arc<ServerResources>, Arc<RecordingModel>, Arc<ScriptedRandomProvider>) {
    let model = Arc::new(RecordingModel::default());
    let random = Arc::new(ScriptedRandomProvider::new([], [40.0; 7]));
    let pipeline = fixtures::pipeline(model.clone(), random.clone());
    (fixtures::resources_with_pipeline(pipeline), model, random)
}

/// Encoded calories in the default mode, which scales with the bmi range
fn encoded_calories(calories: f64) -> f64 {
    FeatureRange::new(15.0, 40.0).transform(calories)
}

#[tokio::test]
async fn test_basic_forecast_perturbs_recorded_calories() {
    let (resources, model, random) = recording_resources();
    let response = AxumTestRequest::post(BASIC_URI)
        .json(&json!({"exercise_data": history(7)}))
        .send(app(&resources))
        .await;
    assert_eq!(response.status(), 200);

    assert_eq!(random.remaining_normals(), 0);
    for value in model.last_calorie_column() {
        assert!((value - encoded_calories(340.0)).abs() < 1e-9);
    }
}

#[tokio::test]
async fn test_extra_forecast_keeps_recorded_calories() {
    let (resources, model, random) = recording_resources();
    let response = AxumTestRequest::post(EXTRA_URI)
        .json(&json!({
            "exercise_data": history(6),
            "extra_exercise_data": history(1),
            "exercise_detail": {"exercise_id": 4, "duration": 50, "count": 3}
        }))
        .send(app(&resources))
        .await;
    assert_eq!(response.status(), 200);

    assert_eq!(random.remaining_normals(), 7);
    for value in model.last_calorie_column() {
        assert!((value - encoded_calories(300.0)).abs() < 1e-9);
    }
}

// ============================================================================
// GET stored forecasts
// ============================================================================

#[tokio::test]
async fn test_latest_forecast_not_found() {
    let resources = fixtures::resources();
    let response = AxumTestRequest::get("/api/v1/users/99/body/prediction")
        .send(app(&resources))
        .await;

    assert_eq!(response.status(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
}
