//! Pricing configuration singleton.
//!
//! Global knobs applied uniformly to every quote calculation. Created with
//! zeroed defaults the first time it is read, replace-in-place thereafter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuracao {
    pub id: String,
    /// Urgency surcharge, percent of the item subtotal.
    pub percentual_urgencia: f64,
    /// Flat travel fee. Takes precedence over the per-km fee when positive.
    pub deslocamento_fixo: f64,
    /// Travel fee per kilometer, used only when no flat fee is set.
    pub deslocamento_por_km: f64,
    /// Hourly rate for on-call work.
    pub valor_plantao_hora: f64,
    /// Tax, percent of the post-discount total.
    pub percentual_imposto: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Configuracao {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            percentual_urgencia: 0.0,
            deslocamento_fixo: 0.0,
            deslocamento_por_km: 0.0,
            valor_plantao_hora: 0.0,
            percentual_imposto: 0.0,
            created_at: now,
            updated_at: now,
        }
    }
}
