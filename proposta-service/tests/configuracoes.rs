mod common;

use common::TestApp;
use serde_json::{json, Value};

#[tokio::test]
async fn get_creates_zeroed_defaults_on_first_read() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/configuracoes").await;
    assert_eq!(response.status().as_u16(), 200);

    let config: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(config["percentual_urgencia"], 0.0);
    assert_eq!(config["deslocamento_fixo"], 0.0);
    assert_eq!(config["deslocamento_por_km"], 0.0);
    assert_eq!(config["valor_plantao_hora"], 0.0);
    assert_eq!(config["percentual_imposto"], 0.0);

    // Repeated reads return the same record
    let again: Value = app
        .get("/api/configuracoes")
        .await
        .json()
        .await
        .expect("Failed to parse JSON");
    assert_eq!(again["id"], config["id"]);
}

#[tokio::test]
async fn post_replaces_all_knobs_keeping_identity() {
    let app = TestApp::spawn().await;

    let criada: Value = app
        .get("/api/configuracoes")
        .await
        .json()
        .await
        .expect("Failed to parse JSON");

    let response = app
        .post(
            "/api/configuracoes",
            &json!({
                "percentual_urgencia": 20.0,
                "deslocamento_por_km": 2.5,
                "valor_plantao_hora": 120.0,
                "percentual_imposto": 8.0
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let config: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(config["id"], criada["id"]);
    assert_eq!(config["percentual_urgencia"], 20.0);
    // Omitted knobs reset to zero
    assert_eq!(config["deslocamento_fixo"], 0.0);
}

#[tokio::test]
async fn non_numeric_knobs_coerce_to_zero() {
    let app = TestApp::spawn().await;

    let response = app
        .post(
            "/api/configuracoes",
            &json!({
                "percentual_urgencia": "abc",
                "percentual_imposto": "12.5"
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let config: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(config["percentual_urgencia"], 0.0);
    assert_eq!(config["percentual_imposto"], 12.5);
}
