//! MongoDB-backed [`Storage`] implementation.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::options::{FindOptions, IndexOptions};
use mongodb::{
    bson::{doc, Document},
    Collection, Database, IndexModel,
};
use tracing::info;

use crate::error::AppError;
use crate::models::{
    CategoriaResumo, Configuracao, DadosEmpresa, OrdenacaoProposta, Proposta, PropostaFilter,
    Servico,
};
use crate::services::metrics::DB_QUERY_DURATION;
use crate::services::storage::Storage;

#[derive(Clone)]
pub struct MongoRepository {
    servico_collection: Collection<Servico>,
    empresa_collection: Collection<DadosEmpresa>,
    configuracao_collection: Collection<Configuracao>,
    proposta_collection: Collection<Proposta>,
}

impl MongoRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            servico_collection: db.collection("servicos"),
            empresa_collection: db.collection("dados_empresa"),
            configuracao_collection: db.collection("configuracoes"),
            proposta_collection: db.collection("propostas"),
        }
    }

    /// Initialize database indexes for catalog and history queries.
    pub async fn init_indexes(&self) -> Result<(), AppError> {
        let servico_id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .name("servico_id_idx".to_string())
                    .unique(true)
                    .build(),
            )
            .build();

        // (ativo, categoria) backs catalog listing and the category rollup
        let servico_categoria_index = IndexModel::builder()
            .keys(doc! { "ativo": 1, "categoria": 1 })
            .options(
                IndexOptions::builder()
                    .name("servico_categoria_idx".to_string())
                    .build(),
            )
            .build();

        self.servico_collection
            .create_indexes([servico_id_index, servico_categoria_index], None)
            .await?;

        let proposta_id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .name("proposta_id_idx".to_string())
                    .unique(true)
                    .build(),
            )
            .build();

        let proposta_created_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("proposta_created_at_idx".to_string())
                    .build(),
            )
            .build();

        let proposta_status_index = IndexModel::builder()
            .keys(doc! { "status": 1, "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("proposta_status_idx".to_string())
                    .build(),
            )
            .build();

        self.proposta_collection
            .create_indexes(
                [
                    proposta_id_index,
                    proposta_created_index,
                    proposta_status_index,
                ],
                None,
            )
            .await?;

        info!("Proposta service indexes initialized");
        Ok(())
    }
}

fn ordenacao_doc(ordenacao: OrdenacaoProposta) -> Document {
    match ordenacao {
        OrdenacaoProposta::CreatedAtDesc => doc! { "created_at": -1 },
        OrdenacaoProposta::CreatedAtAsc => doc! { "created_at": 1 },
        OrdenacaoProposta::ValorDesc => doc! { "valor_total": -1 },
        OrdenacaoProposta::ValorAsc => doc! { "valor_total": 1 },
        OrdenacaoProposta::Cliente => doc! { "cliente_nome": 1 },
    }
}

#[async_trait]
impl Storage for MongoRepository {
    async fn create_servico(&self, servico: &Servico) -> Result<(), AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_servico"])
            .start_timer();
        self.servico_collection.insert_one(servico, None).await?;
        timer.observe_duration();

        info!(servico_id = %servico.id, nome = %servico.nome, "Service created");
        Ok(())
    }

    async fn get_servico(&self, id: &str) -> Result<Option<Servico>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_servico"])
            .start_timer();
        let servico = self
            .servico_collection
            .find_one(doc! { "id": id }, None)
            .await?;
        timer.observe_duration();
        Ok(servico)
    }

    async fn list_servicos(
        &self,
        ativo: Option<bool>,
        categoria: Option<&str>,
    ) -> Result<Vec<Servico>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_servicos"])
            .start_timer();

        let mut filter = doc! {};
        if let Some(ativo) = ativo {
            filter.insert("ativo", ativo);
        }
        if let Some(categoria) = categoria {
            filter.insert("categoria", categoria);
        }

        let options = FindOptions::builder().sort(doc! { "nome": 1 }).build();
        let cursor = self.servico_collection.find(filter, Some(options)).await?;
        let servicos: Vec<Servico> = cursor.try_collect().await?;

        timer.observe_duration();
        Ok(servicos)
    }

    async fn replace_servico(&self, servico: &Servico) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["replace_servico"])
            .start_timer();
        let result = self
            .servico_collection
            .replace_one(doc! { "id": &servico.id }, servico, None)
            .await?;
        timer.observe_duration();

        if result.matched_count > 0 {
            info!(servico_id = %servico.id, "Service updated");
        }
        Ok(result.matched_count > 0)
    }

    async fn list_categorias(&self) -> Result<Vec<CategoriaResumo>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_categorias"])
            .start_timer();

        let pipeline = vec![
            doc! { "$match": { "ativo": true } },
            doc! { "$group": { "_id": "$categoria", "total": { "$sum": 1 } } },
            doc! { "$sort": { "_id": 1 } },
        ];

        let cursor = self.servico_collection.aggregate(pipeline, None).await?;
        let rows: Vec<Document> = cursor.try_collect().await?;

        timer.observe_duration();

        let categorias = rows
            .into_iter()
            .filter_map(|row| {
                let nome = row.get_str("_id").ok()?.to_string();
                // $sum yields an i32 until the count overflows
                let total = row
                    .get_i64("total")
                    .or_else(|_| row.get_i32("total").map(i64::from))
                    .ok()?;
                Some(CategoriaResumo {
                    nome,
                    total_servicos: total,
                })
            })
            .collect();

        Ok(categorias)
    }

    async fn get_empresa(&self) -> Result<Option<DadosEmpresa>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_empresa"])
            .start_timer();
        let empresa = self.empresa_collection.find_one(doc! {}, None).await?;
        timer.observe_duration();
        Ok(empresa)
    }

    async fn create_empresa(&self, empresa: &DadosEmpresa) -> Result<(), AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_empresa"])
            .start_timer();
        self.empresa_collection.insert_one(empresa, None).await?;
        timer.observe_duration();

        info!(empresa_id = %empresa.id, "Company profile created");
        Ok(())
    }

    async fn replace_empresa(&self, empresa: &DadosEmpresa) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["replace_empresa"])
            .start_timer();
        let result = self
            .empresa_collection
            .replace_one(doc! { "id": &empresa.id }, empresa, None)
            .await?;
        timer.observe_duration();

        if result.matched_count > 0 {
            info!(empresa_id = %empresa.id, "Company profile updated");
        }
        Ok(result.matched_count > 0)
    }

    async fn get_configuracao(&self) -> Result<Option<Configuracao>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_configuracao"])
            .start_timer();
        let configuracao = self.configuracao_collection.find_one(doc! {}, None).await?;
        timer.observe_duration();
        Ok(configuracao)
    }

    async fn create_configuracao(&self, configuracao: &Configuracao) -> Result<(), AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_configuracao"])
            .start_timer();
        self.configuracao_collection
            .insert_one(configuracao, None)
            .await?;
        timer.observe_duration();

        info!(configuracao_id = %configuracao.id, "Pricing configuration created");
        Ok(())
    }

    async fn replace_configuracao(&self, configuracao: &Configuracao) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["replace_configuracao"])
            .start_timer();
        let result = self
            .configuracao_collection
            .replace_one(doc! { "id": &configuracao.id }, configuracao, None)
            .await?;
        timer.observe_duration();

        if result.matched_count > 0 {
            info!(configuracao_id = %configuracao.id, "Pricing configuration updated");
        }
        Ok(result.matched_count > 0)
    }

    async fn create_proposta(&self, proposta: &Proposta) -> Result<(), AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_proposta"])
            .start_timer();
        self.proposta_collection.insert_one(proposta, None).await?;
        timer.observe_duration();

        info!(
            proposta_id = %proposta.id,
            numero = %proposta.numero,
            valor_total = proposta.valor_total,
            "Quote created"
        );
        Ok(())
    }

    async fn get_proposta(&self, id: &str) -> Result<Option<Proposta>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_proposta"])
            .start_timer();
        let proposta = self
            .proposta_collection
            .find_one(doc! { "id": id }, None)
            .await?;
        timer.observe_duration();
        Ok(proposta)
    }

    async fn list_propostas(&self, filter: &PropostaFilter) -> Result<Vec<Proposta>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_propostas"])
            .start_timer();

        let mut query = doc! {};
        if let Some(status) = filter.status {
            query.insert("status", status.as_str());
        }
        if let Some(busca) = &filter.busca {
            // Escaped so the search text is matched literally
            let padrao = regex::escape(busca);
            query.insert(
                "$or",
                vec![
                    doc! { "cliente_nome": { "$regex": &padrao, "$options": "i" } },
                    doc! { "numero": { "$regex": &padrao, "$options": "i" } },
                ],
            );
        }

        let options = FindOptions::builder()
            .sort(ordenacao_doc(filter.ordenacao))
            .skip(filter.skip)
            .limit(filter.limit)
            .build();

        let cursor = self.proposta_collection.find(query, Some(options)).await?;
        let propostas: Vec<Proposta> = cursor.try_collect().await?;

        timer.observe_duration();
        Ok(propostas)
    }

    async fn replace_proposta(&self, proposta: &Proposta) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["replace_proposta"])
            .start_timer();
        let result = self
            .proposta_collection
            .replace_one(doc! { "id": &proposta.id }, proposta, None)
            .await?;
        timer.observe_duration();

        if result.matched_count > 0 {
            info!(
                proposta_id = %proposta.id,
                valor_total = proposta.valor_total,
                "Quote updated"
            );
        }
        Ok(result.matched_count > 0)
    }

    async fn delete_proposta(&self, id: &str) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_proposta"])
            .start_timer();
        let result = self
            .proposta_collection
            .delete_one(doc! { "id": id }, None)
            .await?;
        timer.observe_duration();

        if result.deleted_count > 0 {
            info!(proposta_id = %id, "Quote deleted");
        }
        Ok(result.deleted_count > 0)
    }
}
