//! Quote ("proposta") aggregate: client info, line items, add-ons, discount
//! and the persisted pricing breakdown.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::servico::TipoAtendimento;

/// Quote lifecycle status. No transition graph is enforced; any status is
/// reachable from any other via an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StatusProposta {
    #[default]
    Rascunho,
    Enviada,
    Aprovada,
    Rejeitada,
}

impl StatusProposta {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusProposta::Rascunho => "rascunho",
            StatusProposta::Enviada => "enviada",
            StatusProposta::Aprovada => "aprovada",
            StatusProposta::Rejeitada => "rejeitada",
        }
    }
}

/// Discount kind. Anything other than `percentual` counts as a flat amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DescontoTipo {
    Percentual,
    #[default]
    Fixo,
}

impl<'de> Deserialize<'de> for DescontoTipo {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tipo = String::deserialize(deserializer)?;
        Ok(match tipo.as_str() {
            "percentual" => DescontoTipo::Percentual,
            _ => DescontoTipo::Fixo,
        })
    }
}

/// One catalog service attached to a quote. Name, category and unit price
/// are snapshotted when the item is added and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemProposta {
    pub servico_id: String,
    pub servico_nome: String,
    pub servico_categoria: String,
    pub tipo_atendimento: TipoAtendimento,
    pub quantidade: f64,
    pub valor_unitario: f64,
    pub subtotal: f64,
    #[serde(default)]
    pub urgencia_aplicada: bool,
    #[serde(default)]
    pub valor_urgencia: f64,
    pub observacoes: Option<String>,
}

/// Itemized monetary breakdown produced by the pricing calculator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalculoProposta {
    pub subtotal_servicos: f64,
    pub valor_urgencia_total: f64,
    pub valor_deslocamento: f64,
    pub valor_plantao: f64,
    pub subtotal_adicionais: f64,
    pub desconto_aplicado: f64,
    pub valor_impostos: f64,
    pub valor_total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposta {
    pub id: String,
    pub numero: String,
    pub cliente_nome: String,
    pub cliente_email: Option<String>,
    pub cliente_telefone: Option<String>,
    pub cliente_endereco: Option<String>,

    pub itens: Vec<ItemProposta>,

    // Add-ons
    #[serde(default)]
    pub deslocamento_km: f64,
    #[serde(default)]
    pub horas_plantao: f64,
    #[serde(default)]
    pub urgencia_global: bool,

    // Computed breakdown (persisted snapshot)
    #[serde(default)]
    pub subtotal_servicos: f64,
    #[serde(default)]
    pub valor_urgencia_total: f64,
    #[serde(default)]
    pub valor_deslocamento: f64,
    #[serde(default)]
    pub valor_plantao: f64,
    #[serde(default)]
    pub subtotal_adicionais: f64,

    // Discount
    #[serde(default)]
    pub desconto_tipo: DescontoTipo,
    #[serde(default)]
    pub desconto_valor: f64,
    #[serde(default)]
    pub desconto_aplicado: f64,

    #[serde(default)]
    pub valor_impostos: f64,
    #[serde(default)]
    pub valor_total: f64,

    pub observacoes_gerais: Option<String>,
    pub status: StatusProposta,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Proposta {
    /// Write a breakdown into the persisted snapshot fields.
    pub fn aplicar_calculo(&mut self, calculo: &CalculoProposta) {
        self.subtotal_servicos = calculo.subtotal_servicos;
        self.valor_urgencia_total = calculo.valor_urgencia_total;
        self.valor_deslocamento = calculo.valor_deslocamento;
        self.valor_plantao = calculo.valor_plantao;
        self.subtotal_adicionais = calculo.subtotal_adicionais;
        self.desconto_aplicado = calculo.desconto_aplicado;
        self.valor_impostos = calculo.valor_impostos;
        self.valor_total = calculo.valor_total;
    }
}

/// Sequential quote number, `PROP-{unix timestamp}`.
pub fn gerar_numero() -> String {
    format!("PROP-{}", Utc::now().timestamp())
}

pub fn novo_id() -> String {
    Uuid::new_v4().to_string()
}

/// Sort keys accepted by the quote history listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrdenacaoProposta {
    #[default]
    CreatedAtDesc,
    CreatedAtAsc,
    ValorDesc,
    ValorAsc,
    Cliente,
}

/// Filter and sort parameters for listing quotes.
#[derive(Debug, Clone, Default)]
pub struct PropostaFilter {
    pub status: Option<StatusProposta>,
    /// Case-insensitive substring match on client name or quote number.
    pub busca: Option<String>,
    pub ordenacao: OrdenacaoProposta,
    pub limit: i64,
    pub skip: u64,
}

impl PropostaFilter {
    pub fn matches(&self, proposta: &Proposta) -> bool {
        if let Some(status) = self.status {
            if proposta.status != status {
                return false;
            }
        }
        if let Some(busca) = &self.busca {
            let busca = busca.to_lowercase();
            if !proposta.cliente_nome.to_lowercase().contains(&busca)
                && !proposta.numero.to_lowercase().contains(&busca)
            {
                return false;
            }
        }
        true
    }

    /// Sort a result set in place according to the requested key.
    pub fn ordenar(&self, propostas: &mut [Proposta]) {
        match self.ordenacao {
            OrdenacaoProposta::CreatedAtDesc => {
                propostas.sort_by(|a, b| b.created_at.cmp(&a.created_at))
            }
            OrdenacaoProposta::CreatedAtAsc => {
                propostas.sort_by(|a, b| a.created_at.cmp(&b.created_at))
            }
            OrdenacaoProposta::ValorDesc => propostas.sort_by(|a, b| {
                b.valor_total
                    .partial_cmp(&a.valor_total)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
            OrdenacaoProposta::ValorAsc => propostas.sort_by(|a, b| {
                a.valor_total
                    .partial_cmp(&b.valor_total)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
            OrdenacaoProposta::Cliente => {
                propostas.sort_by(|a, b| {
                    a.cliente_nome
                        .to_lowercase()
                        .cmp(&b.cliente_nome.to_lowercase())
                })
            }
        }
    }
}
