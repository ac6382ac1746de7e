//! Quote pricing calculator.
//!
//! Pure function mapping line items, quote-level add-ons and a discount to an
//! itemized monetary breakdown. Deterministic and side-effect free so the
//! preview endpoint can re-invoke it on every draft change.

use crate::models::{CalculoProposta, Configuracao, DescontoTipo, ItemProposta};

/// Pricing-relevant slice of a line item.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemPricing {
    pub valor_unitario: f64,
    pub quantidade: f64,
    pub urgencia_aplicada: bool,
}

impl From<&ItemProposta> for ItemPricing {
    fn from(item: &ItemProposta) -> Self {
        Self {
            valor_unitario: item.valor_unitario,
            quantidade: item.quantidade,
            urgencia_aplicada: item.urgencia_aplicada,
        }
    }
}

/// Quote-level add-ons and discount.
#[derive(Debug, Clone, Copy, Default)]
pub struct Adicionais {
    pub deslocamento_km: f64,
    pub horas_plantao: f64,
    pub urgencia_global: bool,
    pub desconto_tipo: DescontoTipo,
    pub desconto_valor: f64,
}

/// Compute the full breakdown for a quote draft.
///
/// Rules:
/// - the urgency surcharge applies to an item when its own flag is set or
///   when `urgencia_global` is set (global urgency reaches every item);
/// - a positive flat travel fee wins over the per-km fee regardless of the
///   travelled distance;
/// - the discount is clamped to the pre-tax total so a quote never goes
///   negative;
/// - tax applies to the post-discount total.
pub fn calcular(
    itens: &[ItemPricing],
    config: &Configuracao,
    adicionais: &Adicionais,
) -> CalculoProposta {
    let mut subtotal_servicos = 0.0;
    let mut valor_urgencia_total = 0.0;

    for item in itens {
        let subtotal_item = item.quantidade * item.valor_unitario;
        subtotal_servicos += subtotal_item;

        if item.urgencia_aplicada || adicionais.urgencia_global {
            valor_urgencia_total += subtotal_item * (config.percentual_urgencia / 100.0);
        }
    }

    let valor_deslocamento = if config.deslocamento_fixo > 0.0 {
        config.deslocamento_fixo
    } else {
        adicionais.deslocamento_km * config.deslocamento_por_km
    };

    let valor_plantao = adicionais.horas_plantao * config.valor_plantao_hora;

    let subtotal_adicionais = valor_urgencia_total + valor_deslocamento + valor_plantao;
    let subtotal_antes_desconto = subtotal_servicos + subtotal_adicionais;

    let desconto_bruto = if adicionais.desconto_valor > 0.0 {
        match adicionais.desconto_tipo {
            DescontoTipo::Percentual => {
                subtotal_antes_desconto * (adicionais.desconto_valor / 100.0)
            }
            DescontoTipo::Fixo => adicionais.desconto_valor,
        }
    } else {
        0.0
    };
    let desconto_aplicado = desconto_bruto.min(subtotal_antes_desconto);

    let subtotal_apos_desconto = subtotal_antes_desconto - desconto_aplicado;
    let valor_impostos = subtotal_apos_desconto * (config.percentual_imposto / 100.0);
    let valor_total = subtotal_apos_desconto + valor_impostos;

    CalculoProposta {
        subtotal_servicos,
        valor_urgencia_total,
        valor_deslocamento,
        valor_plantao,
        subtotal_adicionais,
        desconto_aplicado,
        valor_impostos,
        valor_total,
    }
}
