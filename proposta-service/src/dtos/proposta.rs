use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{DescontoTipo, OrdenacaoProposta, StatusProposta, TipoAtendimento};
use crate::pricing::{Adicionais, ItemPricing};

/// A line item as submitted by the client. Unit prices are resolved
/// server-side from the catalog on create/update; `valor_unitario` is only
/// honored by the stateless preview calculation.
///
/// `Serialize` is needed so validation errors over the item list can carry
/// the offending value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemPropostaPayload {
    #[serde(default)]
    pub servico_id: String,
    #[serde(default)]
    pub tipo_atendimento: TipoAtendimento,
    #[serde(
        default = "super::lenient::one",
        deserialize_with = "super::lenient::f64_or_one"
    )]
    pub quantidade: f64,
    #[serde(default, deserialize_with = "super::lenient::f64_or_zero")]
    pub valor_unitario: f64,
    #[serde(default)]
    pub urgencia_aplicada: bool,
    pub observacoes: Option<String>,
}

impl From<&ItemPropostaPayload> for ItemPricing {
    fn from(item: &ItemPropostaPayload) -> Self {
        Self {
            valor_unitario: item.valor_unitario,
            quantidade: item.quantidade,
            urgencia_aplicada: item.urgencia_aplicada,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PropostaCreate {
    #[validate(length(min = 1, message = "cliente_nome é obrigatório"))]
    pub cliente_nome: String,
    pub cliente_email: Option<String>,
    pub cliente_telefone: Option<String>,
    pub cliente_endereco: Option<String>,
    #[validate(length(min = 1, message = "a proposta precisa de ao menos um item"))]
    pub itens: Vec<ItemPropostaPayload>,
    #[serde(default, deserialize_with = "super::lenient::f64_or_zero")]
    pub deslocamento_km: f64,
    #[serde(default, deserialize_with = "super::lenient::f64_or_zero")]
    pub horas_plantao: f64,
    #[serde(default)]
    pub urgencia_global: bool,
    #[serde(default)]
    pub desconto_tipo: DescontoTipo,
    #[serde(default, deserialize_with = "super::lenient::f64_or_zero")]
    pub desconto_valor: f64,
    pub observacoes_gerais: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropostaUpdate {
    pub cliente_nome: Option<String>,
    pub cliente_email: Option<String>,
    pub cliente_telefone: Option<String>,
    pub cliente_endereco: Option<String>,
    pub itens: Option<Vec<ItemPropostaPayload>>,
    #[serde(default, deserialize_with = "super::lenient::opt_f64")]
    pub deslocamento_km: Option<f64>,
    #[serde(default, deserialize_with = "super::lenient::opt_f64")]
    pub horas_plantao: Option<f64>,
    pub urgencia_global: Option<bool>,
    pub desconto_tipo: Option<DescontoTipo>,
    #[serde(default, deserialize_with = "super::lenient::opt_f64")]
    pub desconto_valor: Option<f64>,
    pub observacoes_gerais: Option<String>,
    pub status: Option<StatusProposta>,
}

impl PropostaUpdate {
    /// Whether any pricing-relevant field changed, requiring a recalculation.
    pub fn afeta_calculo(&self) -> bool {
        self.itens.is_some()
            || self.deslocamento_km.is_some()
            || self.horas_plantao.is_some()
            || self.urgencia_global.is_some()
            || self.desconto_tipo.is_some()
            || self.desconto_valor.is_some()
    }
}

/// Draft inputs for the stateless preview calculation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreviewPayload {
    #[serde(default)]
    pub itens: Vec<ItemPropostaPayload>,
    #[serde(default, deserialize_with = "super::lenient::f64_or_zero")]
    pub deslocamento_km: f64,
    #[serde(default, deserialize_with = "super::lenient::f64_or_zero")]
    pub horas_plantao: f64,
    #[serde(default)]
    pub urgencia_global: bool,
    #[serde(default)]
    pub desconto_tipo: DescontoTipo,
    #[serde(default, deserialize_with = "super::lenient::f64_or_zero")]
    pub desconto_valor: f64,
}

impl PreviewPayload {
    pub fn adicionais(&self) -> Adicionais {
        Adicionais {
            deslocamento_km: self.deslocamento_km,
            horas_plantao: self.horas_plantao,
            urgencia_global: self.urgencia_global,
            desconto_tipo: self.desconto_tipo,
            desconto_valor: self.desconto_valor,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropostaListQuery {
    pub status: Option<StatusProposta>,
    pub busca: Option<String>,
    pub ordenacao: Option<OrdenacaoProposta>,
    pub limit: Option<i64>,
    pub skip: Option<u64>,
}
