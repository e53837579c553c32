#![allow(dead_code)]

use chat_service::config::ChatConfig;
use chat_service::services::{MockGenerator, TextGenerator};
use chat_service::startup::Application;
use std::sync::Arc;

pub const ALLOWED_ORIGIN: &str = "http://localhost:5173";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    client: reqwest::Client,
}

impl TestApp {
    /// Spawn the service on a random port backed by `generator`.
    pub async fn spawn_with(generator: Arc<dyn TextGenerator>) -> Self {
        Self::spawn_with_config(test_config(), generator).await
    }

    pub async fn spawn_with_config(config: ChatConfig, generator: Arc<dyn TextGenerator>) -> Self {
        let app = Application::build_with_generator(config, generator)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::new();

        // Wait for the server to accept connections
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// POST a raw JSON body to `/chat`.
    pub async fn post_chat(&self, body: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/chat", self.address))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("Failed to execute request")
    }
}

pub fn test_config() -> ChatConfig {
    let mut config = ChatConfig::default();
    config.common.port = 0;
    config
}

pub fn echo_generator() -> Arc<MockGenerator> {
    Arc::new(MockGenerator::new(true))
}
