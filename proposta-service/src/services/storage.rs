//! Storage abstraction over the catalog, company profile, pricing
//! configuration and quote collections.
//!
//! Two implementations exist: [`crate::services::MongoRepository`] for
//! production and [`crate::services::MemoryRepository`] for local development
//! and the test suite. Handlers only see this trait.

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{
    CategoriaResumo, Configuracao, DadosEmpresa, Proposta, PropostaFilter, Servico,
};

#[async_trait]
pub trait Storage: Send + Sync {
    // Servicos
    async fn create_servico(&self, servico: &Servico) -> Result<(), AppError>;
    async fn get_servico(&self, id: &str) -> Result<Option<Servico>, AppError>;
    async fn list_servicos(
        &self,
        ativo: Option<bool>,
        categoria: Option<&str>,
    ) -> Result<Vec<Servico>, AppError>;
    /// Replace a service in place. Returns `false` when the id is unknown.
    async fn replace_servico(&self, servico: &Servico) -> Result<bool, AppError>;
    async fn list_categorias(&self) -> Result<Vec<CategoriaResumo>, AppError>;

    // Empresa (singleton)
    async fn get_empresa(&self) -> Result<Option<DadosEmpresa>, AppError>;
    async fn create_empresa(&self, empresa: &DadosEmpresa) -> Result<(), AppError>;
    async fn replace_empresa(&self, empresa: &DadosEmpresa) -> Result<bool, AppError>;

    // Configuracao (singleton)
    async fn get_configuracao(&self) -> Result<Option<Configuracao>, AppError>;
    async fn create_configuracao(&self, configuracao: &Configuracao) -> Result<(), AppError>;
    async fn replace_configuracao(&self, configuracao: &Configuracao) -> Result<bool, AppError>;

    // Propostas
    async fn create_proposta(&self, proposta: &Proposta) -> Result<(), AppError>;
    async fn get_proposta(&self, id: &str) -> Result<Option<Proposta>, AppError>;
    async fn list_propostas(&self, filter: &PropostaFilter) -> Result<Vec<Proposta>, AppError>;
    async fn replace_proposta(&self, proposta: &Proposta) -> Result<bool, AppError>;
    async fn delete_proposta(&self, id: &str) -> Result<bool, AppError>;
}
