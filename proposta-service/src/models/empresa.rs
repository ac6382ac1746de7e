//! Company profile model. At most one record exists per deployment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DadosEmpresa {
    pub id: String,
    pub nome: String,
    pub cnpj_cpf: String,
    pub endereco: String,
    pub telefone: String,
    pub email: String,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DadosEmpresa {
    pub fn new(
        nome: String,
        cnpj_cpf: String,
        endereco: String,
        telefone: String,
        email: String,
        logo_url: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            nome,
            cnpj_cpf,
            endereco,
            telefone,
            email,
            logo_url,
            created_at: now,
            updated_at: now,
        }
    }
}
