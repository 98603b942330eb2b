use ai_swagger_helper::adapters::body_generator::BodyGenerator;
use ai_swagger_helper::config::{GenerationMode, GeneratorConfig, ServerSettings, Settings};
use std::net::SocketAddr;
use std::sync::Arc;

pub struct TestServer {
    pub addr: SocketAddr,
    pub base_url: String,
}

impl TestServer {
    pub async fn new() -> Self {
        // Random generation only, no LLM credentials in tests
        let settings = Settings {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 0, // Random port
            },
            generator: GeneratorConfig {
                mode: GenerationMode::Random,
                ..Default::default()
            },
            llm: None,
            plugin: Default::default(),
        };

        let generator = Arc::new(BodyGenerator::from_settings(&settings.generator, settings.llm.as_ref()));
        let app = ai_swagger_helper::create_app(&settings, generator);

        // Start server on random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to be ready
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestServer { addr, base_url }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Base URL of a local port with no listener
pub async fn closed_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
