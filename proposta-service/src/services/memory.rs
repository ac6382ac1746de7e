//! In-memory [`Storage`] implementation.
//!
//! Used when no database URL is configured, which covers local development
//! and the integration test suite. Behavior mirrors [`MongoRepository`]
//! including filter, sort and pagination semantics.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::models::{
    CategoriaResumo, Configuracao, DadosEmpresa, Proposta, PropostaFilter, Servico,
};
use crate::services::storage::Storage;

#[derive(Default)]
struct MemoryStore {
    servicos: Vec<Servico>,
    empresa: Option<DadosEmpresa>,
    configuracao: Option<Configuracao>,
    propostas: Vec<Proposta>,
}

#[derive(Default)]
pub struct MemoryRepository {
    store: RwLock<MemoryStore>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryRepository {
    async fn create_servico(&self, servico: &Servico) -> Result<(), AppError> {
        let mut store = self.store.write().await;
        store.servicos.push(servico.clone());
        Ok(())
    }

    async fn get_servico(&self, id: &str) -> Result<Option<Servico>, AppError> {
        let store = self.store.read().await;
        Ok(store.servicos.iter().find(|s| s.id == id).cloned())
    }

    async fn list_servicos(
        &self,
        ativo: Option<bool>,
        categoria: Option<&str>,
    ) -> Result<Vec<Servico>, AppError> {
        let store = self.store.read().await;
        let mut servicos: Vec<Servico> = store
            .servicos
            .iter()
            .filter(|s| ativo.map_or(true, |a| s.ativo == a))
            .filter(|s| categoria.map_or(true, |c| s.categoria == c))
            .cloned()
            .collect();
        servicos.sort_by(|a, b| a.nome.cmp(&b.nome));
        Ok(servicos)
    }

    async fn replace_servico(&self, servico: &Servico) -> Result<bool, AppError> {
        let mut store = self.store.write().await;
        match store.servicos.iter_mut().find(|s| s.id == servico.id) {
            Some(existing) => {
                *existing = servico.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_categorias(&self) -> Result<Vec<CategoriaResumo>, AppError> {
        let store = self.store.read().await;
        let mut counts: BTreeMap<String, i64> = BTreeMap::new();
        for servico in store.servicos.iter().filter(|s| s.ativo) {
            *counts.entry(servico.categoria.clone()).or_insert(0) += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(nome, total_servicos)| CategoriaResumo {
                nome,
                total_servicos,
            })
            .collect())
    }

    async fn get_empresa(&self) -> Result<Option<DadosEmpresa>, AppError> {
        let store = self.store.read().await;
        Ok(store.empresa.clone())
    }

    async fn create_empresa(&self, empresa: &DadosEmpresa) -> Result<(), AppError> {
        let mut store = self.store.write().await;
        store.empresa = Some(empresa.clone());
        Ok(())
    }

    async fn replace_empresa(&self, empresa: &DadosEmpresa) -> Result<bool, AppError> {
        let mut store = self.store.write().await;
        match &store.empresa {
            Some(existing) if existing.id == empresa.id => {
                store.empresa = Some(empresa.clone());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn get_configuracao(&self) -> Result<Option<Configuracao>, AppError> {
        let store = self.store.read().await;
        Ok(store.configuracao.clone())
    }

    async fn create_configuracao(&self, configuracao: &Configuracao) -> Result<(), AppError> {
        let mut store = self.store.write().await;
        store.configuracao = Some(configuracao.clone());
        Ok(())
    }

    async fn replace_configuracao(&self, configuracao: &Configuracao) -> Result<bool, AppError> {
        let mut store = self.store.write().await;
        match &store.configuracao {
            Some(existing) if existing.id == configuracao.id => {
                store.configuracao = Some(configuracao.clone());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn create_proposta(&self, proposta: &Proposta) -> Result<(), AppError> {
        let mut store = self.store.write().await;
        store.propostas.push(proposta.clone());
        Ok(())
    }

    async fn get_proposta(&self, id: &str) -> Result<Option<Proposta>, AppError> {
        let store = self.store.read().await;
        Ok(store.propostas.iter().find(|p| p.id == id).cloned())
    }

    async fn list_propostas(&self, filter: &PropostaFilter) -> Result<Vec<Proposta>, AppError> {
        let store = self.store.read().await;
        let mut propostas: Vec<Proposta> = store
            .propostas
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        filter.ordenar(&mut propostas);
        Ok(propostas
            .into_iter()
            .skip(filter.skip as usize)
            .take(filter.limit.max(0) as usize)
            .collect())
    }

    async fn replace_proposta(&self, proposta: &Proposta) -> Result<bool, AppError> {
        let mut store = self.store.write().await;
        match store.propostas.iter_mut().find(|p| p.id == proposta.id) {
            Some(existing) => {
                *existing = proposta.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_proposta(&self, id: &str) -> Result<bool, AppError> {
        let mut store = self.store.write().await;
        let before = store.propostas.len();
        store.propostas.retain(|p| p.id != id);
        Ok(store.propostas.len() < before)
    }
}
