//! Application startup and lifecycle management.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Request,
    middleware,
    routing::{get, post},
    Router,
};
use mongodb::{options::ClientOptions, Client};
use secrecy::ExposeSecret;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::AppError;
use crate::handlers::{configuracoes, empresa, health, propostas, servicos};
use crate::middleware::{propagar_request_id, REQUEST_ID_HEADER};
use crate::services::{init_metrics, MemoryRepository, MongoRepository, Storage};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    ///
    /// Connects to MongoDB when a database URL is configured, otherwise
    /// falls back to the in-memory store.
    pub async fn build(config: Config) -> Result<Self, AppError> {
        init_metrics();

        let storage: Arc<dyn Storage> = match &config.database.url {
            Some(url) => {
                let mut client_options =
                    ClientOptions::parse(url.expose_secret()).await.map_err(|e| {
                        tracing::error!("Failed to parse MongoDB connection string: {}", e);
                        AppError::DatabaseError(e.into())
                    })?;
                client_options.app_name = Some(config.service_name.clone());

                let client = Client::with_options(client_options).map_err(|e| {
                    tracing::error!("Failed to create MongoDB client: {}", e);
                    AppError::DatabaseError(e.into())
                })?;
                let db = client.database(&config.database.db_name);

                let repository = MongoRepository::new(&db);
                repository.init_indexes().await?;

                tracing::info!(db_name = %config.database.db_name, "Using MongoDB storage");
                Arc::new(repository)
            }
            None => {
                tracing::warn!(
                    "No database URL configured - using in-memory storage, data is not persisted"
                );
                Arc::new(MemoryRepository::new())
            }
        };

        let state = AppState {
            config: config.clone(),
            storage,
        };

        // Port 0 binds a random port for testing
        let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!("Invalid listen address: {}", e)))?;
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Proposta service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let api_router = Router::new()
            .route(
                "/servicos",
                get(servicos::listar_servicos).post(servicos::criar_servico),
            )
            .route(
                "/servicos/:servico_id",
                get(servicos::buscar_servico)
                    .put(servicos::atualizar_servico)
                    .delete(servicos::desativar_servico),
            )
            .route("/categorias", get(servicos::listar_categorias))
            .route(
                "/empresa",
                get(empresa::buscar_empresa)
                    .post(empresa::salvar_empresa)
                    .put(empresa::atualizar_empresa),
            )
            .route(
                "/configuracoes",
                get(configuracoes::buscar_configuracoes).post(configuracoes::salvar_configuracoes),
            )
            .route(
                "/propostas",
                get(propostas::listar_propostas).post(propostas::criar_proposta),
            )
            .route(
                "/propostas/calcular-preview",
                post(propostas::calcular_preview),
            )
            .route(
                "/propostas/:proposta_id",
                get(propostas::buscar_proposta)
                    .put(propostas::atualizar_proposta)
                    .delete(propostas::deletar_proposta),
            )
            .route(
                "/propostas/:proposta_id/duplicar",
                post(propostas::duplicar_proposta),
            );

        let router = Router::new()
            .route("/health", get(health::health_check))
            .route("/ready", get(health::readiness_check))
            .route("/metrics", get(health::metrics_endpoint))
            .nest("/api", api_router)
            .layer(middleware::from_fn(propagar_request_id))
            .layer(
                TraceLayer::new_for_http().make_span_with(|req: &Request<_>| {
                    let request_id = req
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|h| h.to_str().ok())
                        .unwrap_or("unknown");
                    tracing::info_span!(
                        "http_request",
                        method = %req.method(),
                        uri = %req.uri(),
                        request_id = %request_id
                    )
                }),
            )
            .layer(CorsLayer::permissive())
            .with_state(self.state);

        axum::serve(self.listener, router).await
    }
}
