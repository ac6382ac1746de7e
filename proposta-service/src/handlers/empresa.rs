//! Company profile handlers. The profile is a singleton record.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use validator::Validate;

use crate::{
    dtos::{EmpresaCreate, EmpresaUpdate},
    error::AppError,
    models::DadosEmpresa,
    AppState,
};

/// Get the company profile. 404 until one is created.
pub async fn buscar_empresa(
    State(state): State<AppState>,
) -> Result<Json<DadosEmpresa>, AppError> {
    let empresa = state
        .storage
        .get_empresa()
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Dados da empresa não encontrados")))?;
    Ok(Json(empresa))
}

/// Create or fully replace the company profile.
pub async fn salvar_empresa(
    State(state): State<AppState>,
    Json(payload): Json<EmpresaCreate>,
) -> Result<(StatusCode, Json<DadosEmpresa>), AppError> {
    payload.validate()?;

    match state.storage.get_empresa().await? {
        Some(mut empresa) => {
            empresa.nome = payload.nome;
            empresa.cnpj_cpf = payload.cnpj_cpf;
            empresa.endereco = payload.endereco;
            empresa.telefone = payload.telefone;
            empresa.email = payload.email;
            empresa.logo_url = payload.logo_url;
            empresa.updated_at = Utc::now();

            state.storage.replace_empresa(&empresa).await?;
            Ok((StatusCode::OK, Json(empresa)))
        }
        None => {
            let empresa = DadosEmpresa::new(
                payload.nome,
                payload.cnpj_cpf,
                payload.endereco,
                payload.telefone,
                payload.email,
                payload.logo_url,
            );
            state.storage.create_empresa(&empresa).await?;
            Ok((StatusCode::CREATED, Json(empresa)))
        }
    }
}

/// Partially update the company profile. 404 until one is created.
pub async fn atualizar_empresa(
    State(state): State<AppState>,
    Json(payload): Json<EmpresaUpdate>,
) -> Result<Json<DadosEmpresa>, AppError> {
    let mut empresa = state
        .storage
        .get_empresa()
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Dados da empresa não encontrados")))?;

    if let Some(nome) = payload.nome {
        empresa.nome = nome;
    }
    if let Some(cnpj_cpf) = payload.cnpj_cpf {
        empresa.cnpj_cpf = cnpj_cpf;
    }
    if let Some(endereco) = payload.endereco {
        empresa.endereco = endereco;
    }
    if let Some(telefone) = payload.telefone {
        empresa.telefone = telefone;
    }
    if let Some(email) = payload.email {
        empresa.email = email;
    }
    if let Some(logo_url) = payload.logo_url {
        empresa.logo_url = Some(logo_url);
    }
    empresa.updated_at = Utc::now();

    state.storage.replace_empresa(&empresa).await?;

    Ok(Json(empresa))
}
