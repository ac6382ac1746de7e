mod common;

use common::{servico_fixo, TestApp};
use serde_json::{json, Value};

#[tokio::test]
async fn create_and_fetch_servico() {
    let app = TestApp::spawn().await;

    let response = app
        .post(
            "/api/servicos",
            &json!({
                "nome": "Suporte remoto",
                "categoria": "Suporte",
                "tipo_cobranca": "remoto",
                "valor_remoto": 80.0
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let criado: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(criado["nome"], "Suporte remoto");
    assert_eq!(criado["ativo"], true);

    let id = criado["id"].as_str().unwrap();
    let response = app.get(&format!("/api/servicos/{}", id)).await;
    assert_eq!(response.status().as_u16(), 200);

    let buscado: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(buscado["valor_remoto"], 80.0);
}

#[tokio::test]
async fn create_servico_without_nome_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .post(
            "/api/servicos",
            &json!({
                "nome": "",
                "categoria": "Suporte",
                "tipo_cobranca": "fixo"
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 422);
}

#[tokio::test]
async fn unknown_servico_returns_404() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/servicos/nao-existe").await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn list_servicos_filters_by_ativo_and_categoria() {
    let app = TestApp::spawn().await;

    let id_backup = app
        .seed_servico(&servico_fixo("Backup", "Infra", 150.0))
        .await;
    app.seed_servico(&servico_fixo("Treinamento", "Consultoria", 300.0))
        .await;

    // Deactivate one of them
    let response = app.delete(&format!("/api/servicos/{}", id_backup)).await;
    assert_eq!(response.status().as_u16(), 204);

    let response = app.get("/api/servicos?ativo=true").await;
    let ativos: Vec<Value> = response.json().await.expect("Failed to parse JSON");
    assert_eq!(ativos.len(), 1);
    assert_eq!(ativos[0]["nome"], "Treinamento");

    let response = app.get("/api/servicos?categoria=Infra").await;
    let infra: Vec<Value> = response.json().await.expect("Failed to parse JSON");
    assert_eq!(infra.len(), 1);
    assert_eq!(infra[0]["ativo"], false);
}

#[tokio::test]
async fn update_servico_merges_fields() {
    let app = TestApp::spawn().await;

    let id = app.seed_servico(&servico_fixo("Backup", "Infra", 150.0)).await;

    let response = app
        .put(
            &format!("/api/servicos/{}", id),
            &json!({ "valor_fixo": 180.0 }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let atualizado: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(atualizado["valor_fixo"], 180.0);
    assert_eq!(atualizado["nome"], "Backup");
}

#[tokio::test]
async fn update_coerces_numeric_strings() {
    let app = TestApp::spawn().await;

    let id = app.seed_servico(&servico_fixo("Backup", "Infra", 150.0)).await;

    let response = app
        .put(
            &format!("/api/servicos/{}", id),
            &json!({ "valor_fixo": "180" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let atualizado: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(atualizado["valor_fixo"], 180.0);
}

#[tokio::test]
async fn delete_is_a_soft_delete() {
    let app = TestApp::spawn().await;

    let id = app.seed_servico(&servico_fixo("Backup", "Infra", 150.0)).await;

    let response = app.delete(&format!("/api/servicos/{}", id)).await;
    assert_eq!(response.status().as_u16(), 204);

    // Still fetchable, just inactive
    let response = app.get(&format!("/api/servicos/{}", id)).await;
    assert_eq!(response.status().as_u16(), 200);
    let servico: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(servico["ativo"], false);
}

#[tokio::test]
async fn categorias_roll_up_active_services_only() {
    let app = TestApp::spawn().await;

    app.seed_servico(&servico_fixo("Backup", "Infra", 150.0))
        .await;
    app.seed_servico(&servico_fixo("Firewall", "Infra", 200.0))
        .await;
    let desativado = app
        .seed_servico(&servico_fixo("Legado", "Infra", 100.0))
        .await;
    app.seed_servico(&servico_fixo("Treinamento", "Consultoria", 300.0))
        .await;

    app.delete(&format!("/api/servicos/{}", desativado)).await;

    let response = app.get("/api/categorias").await;
    assert_eq!(response.status().as_u16(), 200);

    let categorias: Vec<Value> = response.json().await.expect("Failed to parse JSON");
    assert_eq!(categorias.len(), 2);
    assert_eq!(categorias[0]["nome"], "Consultoria");
    assert_eq!(categorias[0]["total_servicos"], 1);
    assert_eq!(categorias[1]["nome"], "Infra");
    assert_eq!(categorias[1]["total_servicos"], 2);
}
