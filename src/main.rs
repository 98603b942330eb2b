use ai_swagger_helper::adapters::body_generator::BodyGenerator;
use ai_swagger_helper::adapters::generate_client::HttpGenerateClient;
use ai_swagger_helper::cli::{Cli, Command};
use ai_swagger_helper::config::Settings;
use ai_swagger_helper::domain::{BodyEditor, OperationSelector};
use ai_swagger_helper::plugin::{AiGenerateBodyPlugin, FileSpecStore, GenerateOutcome, HostContext, LogNotifier};
use clap::Parser;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;

    match cli.command() {
        Command::Serve => serve(settings).await,
        Command::Generate {
            spec,
            base_url,
            path,
            method,
        } => {
            let mut plugin_settings = settings.plugin.clone();
            if let Some(base_url) = base_url {
                plugin_settings.base_url = base_url;
            }
            if let (Some(path), Some(method)) = (path, method) {
                plugin_settings.selector = OperationSelector::Operation { path, method };
            }

            let client = Arc::new(HttpGenerateClient::from_config(&plugin_settings));
            info!("Generating body via {}", client.url());

            let plugin = AiGenerateBodyPlugin::register(HostContext {
                spec_store: Arc::new(FileSpecStore::new(spec)),
                notifier: Arc::new(LogNotifier),
                client,
                settings: plugin_settings,
            });

            let editor: Arc<dyn BodyEditor> = Arc::new(|body: Value| {
                match serde_json::to_string_pretty(&body) {
                    Ok(text) => println!("{}", text),
                    Err(_) => println!("{}", body),
                }
            });

            match plugin.wrap_request_body_editor(Some(editor)).handle_generate().await {
                GenerateOutcome::Generated(_) => Ok(()),
                GenerateOutcome::NoSchema => anyhow::bail!("no JSON request body schema found"),
                GenerateOutcome::Rejected(message) | GenerateOutcome::Failed(message) => {
                    anyhow::bail!("generation failed: {}", message)
                }
                GenerateOutcome::Busy => anyhow::bail!("generation already running"),
            }
        }
    }
}

async fn serve(settings: Settings) -> anyhow::Result<()> {
    let host = settings.server.host.clone();
    let port = settings.server.port;

    info!("Starting AI Swagger Helper on {}:{}", host, port);

    let generator = Arc::new(BodyGenerator::from_settings(&settings.generator, settings.llm.as_ref()));
    if settings.generator.enabled {
        info!("AI Swagger Helper enabled. Mode: {}", generator.mode());
    } else {
        info!("AI Swagger Helper disabled, generate route not mounted");
    }

    let app = ai_swagger_helper::create_app(&settings, generator);

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
