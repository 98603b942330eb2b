use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::GenerationMode;

/// AI Swagger Helper - example request bodies from OpenAPI schemas
#[derive(Parser, Debug, Clone)]
#[command(name = "ai-swagger-helper", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "AI_SWAGGER_CONFIG", default_value = "ai-swagger.toml")]
    pub config: PathBuf,

    /// Server host address
    #[arg(long, env = "AI_SWAGGER_HOST")]
    pub host: Option<String>,

    /// Server port
    #[arg(long, env = "AI_SWAGGER_PORT")]
    pub port: Option<u16>,

    /// Body generation mode
    #[arg(long, env = "AI_SWAGGER_MODE", value_enum)]
    pub mode: Option<GenerationMode>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run the generate backend (default)
    Serve,
    /// Generate a request body for an operation of an API document
    Generate {
        /// OpenAPI document (JSON or YAML)
        spec: PathBuf,

        /// Backend origin, overrides plugin.base_url
        #[arg(long)]
        base_url: Option<String>,

        /// Operation path, e.g. "/pets"; first JSON body in the document when omitted
        #[arg(long, requires = "method")]
        path: Option<String>,

        /// Operation method, e.g. "post"
        #[arg(long, requires = "path")]
        method: Option<String>,
    },
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }
}
