use serde_json::Value;
use tracing::{debug, info, warn};

use crate::adapters::llm_body::LlmBodyGenerator;
use crate::adapters::random_body::RandomBodyGenerator;
use crate::config::{GenerationMode, GeneratorConfig, LlmConfig};

/// Picks between LLM and random generation according to the configured mode
pub struct BodyGenerator {
    mode: GenerationMode,
    llm: Option<LlmBodyGenerator>,
    random: RandomBodyGenerator,
}

impl BodyGenerator {
    pub fn new(mode: GenerationMode, llm: Option<LlmBodyGenerator>) -> Self {
        Self {
            mode,
            llm,
            random: RandomBodyGenerator::new(),
        }
    }

    /// Random generation only
    pub fn random() -> Self {
        Self::new(GenerationMode::Random, None)
    }

    /// Build from settings; an LLM that cannot be set up downgrades to random generation
    pub fn from_settings(generator: &GeneratorConfig, llm: Option<&LlmConfig>) -> Self {
        let llm = match (generator.mode, llm) {
            (GenerationMode::Random, _) | (_, None) => None,
            (_, Some(config)) => match LlmBodyGenerator::from_config(config) {
                Ok(llm) => Some(llm),
                Err(e) => {
                    warn!("LLM unavailable, using random generation: {}", e);
                    None
                }
            },
        };

        if generator.mode == GenerationMode::Ai && llm.is_none() {
            warn!("Generation mode is 'ai' but no LLM is configured");
        }

        Self::new(generator.mode, llm)
    }

    pub fn mode(&self) -> GenerationMode {
        self.mode
    }

    /// Whether requests will go to an LLM first
    pub fn uses_llm(&self) -> bool {
        self.mode != GenerationMode::Random && self.llm.is_some()
    }

    /// Generate an example body for `schema`; never fails
    pub async fn generate_body(&self, schema: &Value) -> Value {
        match &self.llm {
            Some(llm) if self.mode != GenerationMode::Random => match llm.generate(schema).await {
                Ok(body) => {
                    info!(provider = llm.provider(), "Generated body with LLM");
                    body
                }
                Err(e) => {
                    warn!("AI generation failed, falling back to random");
                    debug!("Error: {}", e);
                    self.random.generate(schema)
                }
            },
            _ => self.random.generate(schema),
        }
    }
}
