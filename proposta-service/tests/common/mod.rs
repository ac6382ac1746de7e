use proposta_service::config::{Config, DatabaseConfig, ServerConfig};
use proposta_service::startup::Application;
use serde_json::{json, Value};

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the service on a random port backed by the in-memory store.
    pub async fn spawn() -> Self {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0, // Random port
            },
            database: DatabaseConfig {
                url: None, // In-memory storage
                db_name: "propostas_test".to_string(),
            },
            service_name: "proposta-service-test".to_string(),
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("http://127.0.0.1:{}/health", port);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Create a catalog service and return its generated id.
    pub async fn seed_servico(&self, body: &Value) -> String {
        let response = self.post("/api/servicos", body).await;
        assert_eq!(response.status().as_u16(), 201);
        let servico: Value = response.json().await.expect("Failed to parse JSON");
        servico["id"].as_str().expect("missing id").to_string()
    }

    /// Write the pricing configuration.
    pub async fn seed_configuracao(&self, body: &Value) {
        let response = self.post("/api/configuracoes", body).await;
        assert!(response.status().is_success());
    }
}

/// A fixed-price catalog entry payload.
pub fn servico_fixo(nome: &str, categoria: &str, valor: f64) -> Value {
    json!({
        "nome": nome,
        "categoria": categoria,
        "tipo_cobranca": "fixo",
        "valor_fixo": valor
    })
}
