mod common;

use common::TestApp;
use serde_json::{json, Value};

fn empresa_payload() -> Value {
    json!({
        "nome": "TechSol Serviços de TI",
        "cnpj_cpf": "12.345.678/0001-90",
        "endereco": "Av. Paulista, 1000 - São Paulo/SP",
        "telefone": "(11) 99999-0000",
        "email": "contato@techsol.com.br"
    })
}

#[tokio::test]
async fn empresa_starts_empty() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/empresa").await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn post_creates_then_replaces_the_profile() {
    let app = TestApp::spawn().await;

    let response = app.post("/api/empresa", &empresa_payload()).await;
    assert_eq!(response.status().as_u16(), 201);
    let criada: Value = response.json().await.expect("Failed to parse JSON");

    // A second POST replaces the content but keeps the record identity
    let mut payload = empresa_payload();
    payload["nome"] = json!("TechSol Tecnologia LTDA");
    let response = app.post("/api/empresa", &payload).await;
    assert_eq!(response.status().as_u16(), 200);
    let atualizada: Value = response.json().await.expect("Failed to parse JSON");

    assert_eq!(atualizada["id"], criada["id"]);
    assert_eq!(atualizada["nome"], "TechSol Tecnologia LTDA");
}

#[tokio::test]
async fn put_merges_fields() {
    let app = TestApp::spawn().await;

    app.post("/api/empresa", &empresa_payload()).await;

    let response = app
        .put("/api/empresa", &json!({ "telefone": "(11) 98888-1111" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let empresa: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(empresa["telefone"], "(11) 98888-1111");
    assert_eq!(empresa["nome"], "TechSol Serviços de TI");
}

#[tokio::test]
async fn put_without_profile_returns_404() {
    let app = TestApp::spawn().await;

    let response = app.put("/api/empresa", &json!({ "nome": "X" })).await;
    assert_eq!(response.status().as_u16(), 404);
}
