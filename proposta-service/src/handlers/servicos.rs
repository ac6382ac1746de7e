//! Service catalog handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    dtos::{ServicoCreate, ServicoListQuery, ServicoUpdate},
    error::AppError,
    models::{CategoriaResumo, Servico},
    AppState,
};

/// Create a catalog service.
pub async fn criar_servico(
    State(state): State<AppState>,
    Json(payload): Json<ServicoCreate>,
) -> Result<(StatusCode, Json<Servico>), AppError> {
    payload.validate()?;

    let mut servico = Servico::new(payload.nome, payload.categoria, payload.tipo_cobranca);
    servico.valor_remoto = payload.valor_remoto;
    servico.valor_presencial = payload.valor_presencial;
    servico.valor_fixo = payload.valor_fixo;
    servico.valor_base_projeto = payload.valor_base_projeto;

    state.storage.create_servico(&servico).await?;

    Ok((StatusCode::CREATED, Json(servico)))
}

/// List catalog services, optionally filtered by active flag and category.
pub async fn listar_servicos(
    State(state): State<AppState>,
    Query(query): Query<ServicoListQuery>,
) -> Result<Json<Vec<Servico>>, AppError> {
    let servicos = state
        .storage
        .list_servicos(query.ativo, query.categoria.as_deref())
        .await?;
    Ok(Json(servicos))
}

/// Get a catalog service by ID.
pub async fn buscar_servico(
    State(state): State<AppState>,
    Path(servico_id): Path<String>,
) -> Result<Json<Servico>, AppError> {
    let servico = state
        .storage
        .get_servico(&servico_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Serviço não encontrado")))?;
    Ok(Json(servico))
}

/// Partially update a catalog service. Omitted fields keep their value.
pub async fn atualizar_servico(
    State(state): State<AppState>,
    Path(servico_id): Path<String>,
    Json(payload): Json<ServicoUpdate>,
) -> Result<Json<Servico>, AppError> {
    let mut servico = state
        .storage
        .get_servico(&servico_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Serviço não encontrado")))?;

    if let Some(nome) = payload.nome {
        servico.nome = nome;
    }
    if let Some(categoria) = payload.categoria {
        servico.categoria = categoria;
    }
    if let Some(tipo_cobranca) = payload.tipo_cobranca {
        servico.tipo_cobranca = tipo_cobranca;
    }
    if let Some(valor_remoto) = payload.valor_remoto {
        servico.valor_remoto = valor_remoto;
    }
    if let Some(valor_presencial) = payload.valor_presencial {
        servico.valor_presencial = valor_presencial;
    }
    if let Some(valor_fixo) = payload.valor_fixo {
        servico.valor_fixo = valor_fixo;
    }
    if let Some(valor_base_projeto) = payload.valor_base_projeto {
        servico.valor_base_projeto = valor_base_projeto;
    }
    if let Some(ativo) = payload.ativo {
        servico.ativo = ativo;
    }
    servico.updated_at = Utc::now();

    state.storage.replace_servico(&servico).await?;

    Ok(Json(servico))
}

/// Deactivate a catalog service. Rows are kept so quote snapshots stay valid.
pub async fn desativar_servico(
    State(state): State<AppState>,
    Path(servico_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut servico = state
        .storage
        .get_servico(&servico_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Serviço não encontrado")))?;

    servico.ativo = false;
    servico.updated_at = Utc::now();
    state.storage.replace_servico(&servico).await?;

    tracing::info!(servico_id = %servico_id, "Service deactivated");

    Ok(StatusCode::NO_CONTENT)
}

/// Roll up active services by category.
pub async fn listar_categorias(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoriaResumo>>, AppError> {
    let categorias = state.storage.list_categorias().await?;
    Ok(Json(categorias))
}
