use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};

use iim_id_manager::router::build_router;

use crate::helpers::{participant_config, setup_state, study_config};

async fn server() -> TestServer {
    let state = setup_state(&[study_config(), participant_config()]).await;
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn should_return_201_then_200_for_same_source_value() {
    let server = server().await;
    let body = json!({ "entityName": "study", "data": { "studyName": "Alpha" } });

    let first = server.post("/identifiers").json(&body).await;
    first.assert_status(StatusCode::CREATED);
    let first: Value = first.json();
    assert_eq!(first["generatedId"], "PCGLST0001");
    assert_eq!(first["newlyIssued"], true);

    let second = server.post("/identifiers").json(&body).await;
    second.assert_status(StatusCode::OK);
    let second: Value = second.json();
    assert_eq!(second["generatedId"], "PCGLST0001");
    assert_eq!(second["newlyIssued"], false);
}

#[tokio::test]
async fn should_return_422_when_source_field_missing() {
    let server = server().await;

    let response = server
        .post("/identifiers")
        .json(&json!({ "entityName": "study", "data": { "title": "Alpha" } }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["kind"], "SOURCE_FIELD_MISSING");
}

#[tokio::test]
async fn should_report_existence() {
    let server = server().await;
    server
        .post("/identifiers")
        .json(&json!({ "entityName": "study", "data": { "studyName": "Alpha" } }))
        .await;

    let present = server.get("/identifiers/study/Alpha/exists").await;
    present.assert_status_ok();
    assert!(present.json::<bool>());

    let absent = server.get("/identifiers/study/Gamma/exists").await;
    absent.assert_status_ok();
    assert!(!absent.json::<bool>());
}

#[tokio::test]
async fn should_return_404_for_unknown_entity() {
    let server = server().await;

    let response = server.get("/identifiers/widget/W-1/exists").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["kind"], "CONFIG_NOT_FOUND");
}

#[tokio::test]
async fn should_get_issued_identifier() {
    let server = server().await;
    server
        .post("/identifiers")
        .json(&json!({ "entityName": "participant", "data": { "submitterParticipantId": "DONOR-1" } }))
        .await;

    let response = server.get("/identifiers/participant/DONOR-1").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["entityName"], "participant");
    assert_eq!(body["generatedId"], "PCGLPT000500");

    let missing = server.get("/identifiers/participant/DONOR-2").await;
    missing.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(missing.json::<Value>()["kind"], "IDENTIFIER_NOT_FOUND");
}

#[tokio::test]
async fn should_process_batch_and_report_stats() {
    let server = server().await;

    let response = server
        .post("/identifiers/batch")
        .json(&json!({
            "inserts": [
                { "entityName": "study", "data": { "studyName": "Alpha" } },
                { "entityName": "study", "data": { "studyName": "Alpha" } },
                { "entityName": "widget", "data": { "name": "W-1" } },
            ]
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, json!({ "issued": 1, "existing": 1, "errored": 1 }));
}

#[tokio::test]
async fn should_list_registered_configs() {
    let server = server().await;

    let response = server.get("/configs").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body[0]["entityName"], "study");
    assert_eq!(body[0]["fieldName"], "studyName");
    assert_eq!(body[0]["paddingLength"], 4);
    assert_eq!(body[1]["sequenceName"], "participant_id_seq");
}

#[tokio::test]
async fn should_answer_health_checks_with_request_id() {
    let server = server().await;

    let response = server.get("/healthz").await;

    response.assert_status_ok();
    assert!(response.headers().get("x-request-id").is_some());
    server.get("/readyz").await.assert_status_ok();
}
