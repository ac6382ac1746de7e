use anyhow::Result;
use dotenvy::dotenv;
use secrecy::Secret;
use serde::Deserialize;
use std::env;

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub service_name: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseConfig {
    /// MongoDB connection string. When unset the service falls back to the
    /// in-memory store (local development and tests).
    pub url: Option<Secret<String>>,
    pub db_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let host = env::var("PROPOSTA_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PROPOSTA_SERVICE_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()?;

        let db_url = env::var("PROPOSTA_DATABASE_URL").ok().map(Secret::new);
        let db_name =
            env::var("PROPOSTA_DATABASE_NAME").unwrap_or_else(|_| "propostas_db".to_string());

        Ok(Self {
            server: ServerConfig { host, port },
            database: DatabaseConfig {
                url: db_url,
                db_name,
            },
            service_name: "proposta-service".to_string(),
        })
    }
}
