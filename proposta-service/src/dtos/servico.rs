use serde::Deserialize;
use validator::Validate;

use crate::models::TipoCobranca;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ServicoCreate {
    #[validate(length(min = 1, message = "nome é obrigatório"))]
    pub nome: String,
    #[validate(length(min = 1, message = "categoria é obrigatória"))]
    pub categoria: String,
    pub tipo_cobranca: TipoCobranca,
    #[serde(default, deserialize_with = "super::lenient::f64_or_zero")]
    pub valor_remoto: f64,
    #[serde(default, deserialize_with = "super::lenient::f64_or_zero")]
    pub valor_presencial: f64,
    #[serde(default, deserialize_with = "super::lenient::f64_or_zero")]
    pub valor_fixo: f64,
    #[serde(default, deserialize_with = "super::lenient::f64_or_zero")]
    pub valor_base_projeto: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServicoUpdate {
    pub nome: Option<String>,
    pub categoria: Option<String>,
    pub tipo_cobranca: Option<TipoCobranca>,
    #[serde(default, deserialize_with = "super::lenient::opt_f64")]
    pub valor_remoto: Option<f64>,
    #[serde(default, deserialize_with = "super::lenient::opt_f64")]
    pub valor_presencial: Option<f64>,
    #[serde(default, deserialize_with = "super::lenient::opt_f64")]
    pub valor_fixo: Option<f64>,
    #[serde(default, deserialize_with = "super::lenient::opt_f64")]
    pub valor_base_projeto: Option<f64>,
    pub ativo: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServicoListQuery {
    pub ativo: Option<bool>,
    pub categoria: Option<String>,
}
