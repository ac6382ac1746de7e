//! Pricing configuration handlers. The configuration is a singleton created
//! with zeroed defaults on first read.

use axum::{extract::State, Json};
use chrono::Utc;

use crate::{dtos::ConfiguracaoPayload, error::AppError, models::Configuracao, AppState};

/// Fetch the configuration, creating the zeroed default if none exists yet.
pub async fn obter_ou_criar_configuracao(state: &AppState) -> Result<Configuracao, AppError> {
    if let Some(configuracao) = state.storage.get_configuracao().await? {
        return Ok(configuracao);
    }

    let configuracao = Configuracao::default();
    state.storage.create_configuracao(&configuracao).await?;
    tracing::info!(configuracao_id = %configuracao.id, "Default pricing configuration created");
    Ok(configuracao)
}

/// Get the pricing configuration.
pub async fn buscar_configuracoes(
    State(state): State<AppState>,
) -> Result<Json<Configuracao>, AppError> {
    let configuracao = obter_ou_criar_configuracao(&state).await?;
    Ok(Json(configuracao))
}

/// Replace every pricing knob, keeping the record identity.
pub async fn salvar_configuracoes(
    State(state): State<AppState>,
    Json(payload): Json<ConfiguracaoPayload>,
) -> Result<Json<Configuracao>, AppError> {
    let mut configuracao = obter_ou_criar_configuracao(&state).await?;

    configuracao.percentual_urgencia = payload.percentual_urgencia;
    configuracao.deslocamento_fixo = payload.deslocamento_fixo;
    configuracao.deslocamento_por_km = payload.deslocamento_por_km;
    configuracao.valor_plantao_hora = payload.valor_plantao_hora;
    configuracao.percentual_imposto = payload.percentual_imposto;
    configuracao.updated_at = Utc::now();

    state.storage.replace_configuracao(&configuracao).await?;

    Ok(Json(configuracao))
}
