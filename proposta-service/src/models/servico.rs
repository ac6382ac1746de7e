//! Service catalog model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Billing mode of a catalog service. Exactly one of the four price
/// fields on [`Servico`] is authoritative per mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipoCobranca {
    Remoto,
    Presencial,
    Fixo,
    Projeto,
}

impl TipoCobranca {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoCobranca::Remoto => "remoto",
            TipoCobranca::Presencial => "presencial",
            TipoCobranca::Fixo => "fixo",
            TipoCobranca::Projeto => "projeto",
        }
    }
}

/// How a quoted line item is attended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TipoAtendimento {
    #[default]
    Remoto,
    Presencial,
}

impl TipoAtendimento {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoAtendimento::Remoto => "remoto",
            TipoAtendimento::Presencial => "presencial",
        }
    }
}

/// A billable catalog entry with mode-specific unit prices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Servico {
    pub id: String,
    pub nome: String,
    pub categoria: String,
    pub tipo_cobranca: TipoCobranca,
    #[serde(default)]
    pub valor_remoto: f64,
    #[serde(default)]
    pub valor_presencial: f64,
    #[serde(default)]
    pub valor_fixo: f64,
    #[serde(default)]
    pub valor_base_projeto: f64,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Servico {
    pub fn new(nome: String, categoria: String, tipo_cobranca: TipoCobranca) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            nome,
            categoria,
            tipo_cobranca,
            valor_remoto: 0.0,
            valor_presencial: 0.0,
            valor_fixo: 0.0,
            valor_base_projeto: 0.0,
            ativo: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Resolve the unit price for an attendance mode.
    ///
    /// `fixo` and `projeto` billing are attendance-independent; `remoto` and
    /// `presencial` billing only price their matching attendance mode, any
    /// other combination resolves to zero.
    pub fn valor_unitario(&self, atendimento: TipoAtendimento) -> f64 {
        match (self.tipo_cobranca, atendimento) {
            (TipoCobranca::Remoto, TipoAtendimento::Remoto) => self.valor_remoto,
            (TipoCobranca::Presencial, TipoAtendimento::Presencial) => self.valor_presencial,
            (TipoCobranca::Fixo, _) => self.valor_fixo,
            (TipoCobranca::Projeto, _) => self.valor_base_projeto,
            _ => 0.0,
        }
    }
}

/// One row of the category aggregation (`GET /api/categorias`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriaResumo {
    pub nome: String,
    pub total_servicos: i64,
}
