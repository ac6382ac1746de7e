use serde::Deserialize;

/// Full set of pricing knobs; omitted fields fall back to zero, matching the
/// replace-in-place semantics of the configuration singleton.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfiguracaoPayload {
    #[serde(default, deserialize_with = "super::lenient::f64_or_zero")]
    pub percentual_urgencia: f64,
    #[serde(default, deserialize_with = "super::lenient::f64_or_zero")]
    pub deslocamento_fixo: f64,
    #[serde(default, deserialize_with = "super::lenient::f64_or_zero")]
    pub deslocamento_por_km: f64,
    #[serde(default, deserialize_with = "super::lenient::f64_or_zero")]
    pub valor_plantao_hora: f64,
    #[serde(default, deserialize_with = "super::lenient::f64_or_zero")]
    pub percentual_imposto: f64,
}
