//! Quote handlers: history listing, assembly, update with recalculation,
//! duplication and the stateless pricing preview.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    dtos::{ItemPropostaPayload, PreviewPayload, PropostaCreate, PropostaListQuery, PropostaUpdate},
    error::AppError,
    handlers::configuracoes::obter_ou_criar_configuracao,
    models::{
        proposta::{gerar_numero, novo_id},
        CalculoProposta, Configuracao, ItemProposta, Proposta, PropostaFilter,
    },
    pricing::{self, Adicionais, ItemPricing},
    services::metrics::{PREVIEWS_TOTAL, PROPOSTAS_TOTAL},
    AppState,
};

/// Resolve submitted line items against the catalog.
///
/// The service name, category and unit price are snapshotted here; the
/// client-supplied unit price is ignored. An unknown `servico_id` rejects
/// the whole request.
async fn processar_itens(
    state: &AppState,
    itens: &[ItemPropostaPayload],
    config: &Configuracao,
    urgencia_global: bool,
) -> Result<Vec<ItemProposta>, AppError> {
    let mut processados = Vec::with_capacity(itens.len());

    for item in itens {
        let servico = state
            .storage
            .get_servico(&item.servico_id)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(anyhow::anyhow!(
                    "Serviço {} não encontrado",
                    item.servico_id
                ))
            })?;

        let valor_unitario = servico.valor_unitario(item.tipo_atendimento);
        let subtotal = item.quantidade * valor_unitario;
        let urgente = item.urgencia_aplicada || urgencia_global;
        let valor_urgencia = if urgente {
            subtotal * (config.percentual_urgencia / 100.0)
        } else {
            0.0
        };

        processados.push(ItemProposta {
            servico_id: item.servico_id.clone(),
            servico_nome: servico.nome,
            servico_categoria: servico.categoria,
            tipo_atendimento: item.tipo_atendimento,
            quantidade: item.quantidade,
            valor_unitario,
            subtotal,
            urgencia_aplicada: item.urgencia_aplicada,
            valor_urgencia,
            observacoes: item.observacoes.clone(),
        });
    }

    Ok(processados)
}

fn calcular_proposta(proposta: &Proposta, config: &Configuracao) -> CalculoProposta {
    let itens: Vec<ItemPricing> = proposta.itens.iter().map(ItemPricing::from).collect();
    let adicionais = Adicionais {
        deslocamento_km: proposta.deslocamento_km,
        horas_plantao: proposta.horas_plantao,
        urgencia_global: proposta.urgencia_global,
        desconto_tipo: proposta.desconto_tipo,
        desconto_valor: proposta.desconto_valor,
    };
    pricing::calcular(&itens, config, &adicionais)
}

/// Refresh each item's urgency snapshot after add-ons change.
fn atualizar_urgencia_itens(proposta: &mut Proposta, config: &Configuracao) {
    for item in &mut proposta.itens {
        let urgente = item.urgencia_aplicada || proposta.urgencia_global;
        item.valor_urgencia = if urgente {
            item.subtotal * (config.percentual_urgencia / 100.0)
        } else {
            0.0
        };
    }
}

/// List quotes filtered by status and free-text search, sorted and paginated.
pub async fn listar_propostas(
    State(state): State<AppState>,
    Query(query): Query<PropostaListQuery>,
) -> Result<Json<Vec<Proposta>>, AppError> {
    let filter = PropostaFilter {
        status: query.status,
        busca: query.busca.filter(|b| !b.trim().is_empty()),
        ordenacao: query.ordenacao.unwrap_or_default(),
        limit: query.limit.unwrap_or(50).clamp(1, 1000),
        skip: query.skip.unwrap_or(0),
    };

    let propostas = state.storage.list_propostas(&filter).await?;
    Ok(Json(propostas))
}

/// Assemble and price a new quote.
pub async fn criar_proposta(
    State(state): State<AppState>,
    Json(payload): Json<PropostaCreate>,
) -> Result<(StatusCode, Json<Proposta>), AppError> {
    payload.validate()?;

    let config = obter_ou_criar_configuracao(&state).await?;
    let itens = processar_itens(&state, &payload.itens, &config, payload.urgencia_global).await?;

    let now = Utc::now();
    let mut proposta = Proposta {
        id: novo_id(),
        numero: gerar_numero(),
        cliente_nome: payload.cliente_nome,
        cliente_email: payload.cliente_email,
        cliente_telefone: payload.cliente_telefone,
        cliente_endereco: payload.cliente_endereco,
        itens,
        deslocamento_km: payload.deslocamento_km,
        horas_plantao: payload.horas_plantao,
        urgencia_global: payload.urgencia_global,
        subtotal_servicos: 0.0,
        valor_urgencia_total: 0.0,
        valor_deslocamento: 0.0,
        valor_plantao: 0.0,
        subtotal_adicionais: 0.0,
        desconto_tipo: payload.desconto_tipo,
        desconto_valor: payload.desconto_valor,
        desconto_aplicado: 0.0,
        valor_impostos: 0.0,
        valor_total: 0.0,
        observacoes_gerais: payload.observacoes_gerais,
        status: Default::default(),
        created_at: now,
        updated_at: now,
    };

    let calculo = calcular_proposta(&proposta, &config);
    proposta.aplicar_calculo(&calculo);

    state.storage.create_proposta(&proposta).await?;

    PROPOSTAS_TOTAL
        .with_label_values(&[proposta.status.as_str()])
        .inc();

    Ok((StatusCode::CREATED, Json(proposta)))
}

/// Get a quote by ID.
pub async fn buscar_proposta(
    State(state): State<AppState>,
    Path(proposta_id): Path<String>,
) -> Result<Json<Proposta>, AppError> {
    let proposta = state
        .storage
        .get_proposta(&proposta_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Proposta não encontrada")))?;
    Ok(Json(proposta))
}

/// Partially update a quote, recalculating when pricing inputs change.
pub async fn atualizar_proposta(
    State(state): State<AppState>,
    Path(proposta_id): Path<String>,
    Json(payload): Json<PropostaUpdate>,
) -> Result<Json<Proposta>, AppError> {
    let mut proposta = state
        .storage
        .get_proposta(&proposta_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Proposta não encontrada")))?;

    let recalcular = payload.afeta_calculo();

    if let Some(cliente_nome) = payload.cliente_nome {
        proposta.cliente_nome = cliente_nome;
    }
    if let Some(cliente_email) = payload.cliente_email {
        proposta.cliente_email = Some(cliente_email);
    }
    if let Some(cliente_telefone) = payload.cliente_telefone {
        proposta.cliente_telefone = Some(cliente_telefone);
    }
    if let Some(cliente_endereco) = payload.cliente_endereco {
        proposta.cliente_endereco = Some(cliente_endereco);
    }
    if let Some(deslocamento_km) = payload.deslocamento_km {
        proposta.deslocamento_km = deslocamento_km;
    }
    if let Some(horas_plantao) = payload.horas_plantao {
        proposta.horas_plantao = horas_plantao;
    }
    if let Some(urgencia_global) = payload.urgencia_global {
        proposta.urgencia_global = urgencia_global;
    }
    if let Some(desconto_tipo) = payload.desconto_tipo {
        proposta.desconto_tipo = desconto_tipo;
    }
    if let Some(desconto_valor) = payload.desconto_valor {
        proposta.desconto_valor = desconto_valor;
    }
    if let Some(observacoes_gerais) = payload.observacoes_gerais {
        proposta.observacoes_gerais = Some(observacoes_gerais);
    }
    if let Some(status) = payload.status {
        proposta.status = status;
    }

    if recalcular {
        let config = obter_ou_criar_configuracao(&state).await?;

        if let Some(itens) = &payload.itens {
            proposta.itens =
                processar_itens(&state, itens, &config, proposta.urgencia_global).await?;
        } else {
            atualizar_urgencia_itens(&mut proposta, &config);
        }

        let calculo = calcular_proposta(&proposta, &config);
        proposta.aplicar_calculo(&calculo);
    }

    proposta.updated_at = Utc::now();

    state.storage.replace_proposta(&proposta).await?;

    Ok(Json(proposta))
}

/// Delete a quote permanently.
pub async fn deletar_proposta(
    State(state): State<AppState>,
    Path(proposta_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let deleted = state.storage.delete_proposta(&proposta_id).await?;
    if !deleted {
        return Err(AppError::NotFound(anyhow::anyhow!(
            "Proposta não encontrada"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Duplicate a quote as a fresh draft. Line items, add-ons and the priced
/// breakdown are carried over verbatim; identity fields are regenerated and
/// the client name gains a copy prefix.
pub async fn duplicar_proposta(
    State(state): State<AppState>,
    Path(proposta_id): Path<String>,
) -> Result<(StatusCode, Json<Proposta>), AppError> {
    let original = state
        .storage
        .get_proposta(&proposta_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Proposta não encontrada")))?;

    let now = Utc::now();
    let mut copia = original.clone();
    copia.id = novo_id();
    copia.numero = gerar_numero();
    copia.cliente_nome = format!("CÓPIA - {}", original.cliente_nome);
    copia.status = Default::default();
    copia.created_at = now;
    copia.updated_at = now;

    state.storage.create_proposta(&copia).await?;

    PROPOSTAS_TOTAL
        .with_label_values(&[copia.status.as_str()])
        .inc();

    tracing::info!(
        proposta_id = %copia.id,
        origem = %proposta_id,
        "Quote duplicated"
    );

    Ok((StatusCode::CREATED, Json(copia)))
}

/// Price a draft without persisting anything. Unlike quote creation, the
/// client-supplied unit prices are honored so unsaved edits can be previewed.
pub async fn calcular_preview(
    State(state): State<AppState>,
    Json(payload): Json<PreviewPayload>,
) -> Result<Json<CalculoProposta>, AppError> {
    let config = obter_ou_criar_configuracao(&state).await?;

    let itens: Vec<ItemPricing> = payload.itens.iter().map(ItemPricing::from).collect();
    let calculo = pricing::calcular(&itens, &config, &payload.adicionais());

    PREVIEWS_TOTAL.with_label_values(&["ok"]).inc();

    Ok(Json(calculo))
}
