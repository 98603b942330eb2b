//! Request-body editor extension
//!
//! The documentation viewer registers the plugin once with a [`HostContext`]
//! and then wraps every request-body editor it renders. Each wrapped editor
//! gets its own [`GenerateAction`] with independent loading state.

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

pub mod action;

pub use action::{ActionState, ButtonView, GenerateAction, GenerateOutcome};

use crate::config::PluginConfig;
use crate::domain::{BodyEditor, GenerateClient, Notifier, SpecStore};

/// Everything the plugin needs from its host
#[derive(Clone)]
pub struct HostContext {
    pub spec_store: Arc<dyn SpecStore>,
    pub notifier: Arc<dyn Notifier>,
    pub client: Arc<dyn GenerateClient>,
    pub settings: PluginConfig,
}

pub struct AiGenerateBodyPlugin {
    ctx: HostContext,
}

impl AiGenerateBodyPlugin {
    pub fn register(ctx: HostContext) -> Self {
        info!(
            max_depth = ctx.settings.max_depth,
            media_type_filter = %ctx.settings.media_type_filter,
            "AiGenerateBodyPlugin registered"
        );
        Self { ctx }
    }

    /// Attach the generate action to a request-body editor.
    ///
    /// `on_change` is the editor's change callback; without one a generated
    /// body is reported as an error instead of being applied.
    pub fn wrap_request_body_editor(&self, on_change: Option<Arc<dyn BodyEditor>>) -> GenerateAction {
        GenerateAction::new(self.ctx.clone(), on_change)
    }

    pub fn host(&self) -> &HostContext {
        &self.ctx
    }
}

/// Notices routed to the log, for hosts without a UI
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        warn!("{}", message);
    }
}

/// API document read from disk on every access, JSON or YAML
pub struct FileSpecStore {
    path: PathBuf,
}

impl FileSpecStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads with blocking `std::fs` calls on the caller's thread. Meant for
    /// the CLI and small documents; hosts serving many editors should cache
    /// the document behind their own `SpecStore`.
    pub fn load(&self) -> anyhow::Result<Value> {
        let text = std::fs::read_to_string(&self.path)?;
        let is_yaml = matches!(
            self.path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );

        let document: Value = if is_yaml {
            serde_yaml::from_str(&text)?
        } else {
            serde_json::from_str(&text)?
        };
        Ok(document)
    }
}

impl SpecStore for FileSpecStore {
    fn spec_json(&self) -> Option<Value> {
        match self.load() {
            Ok(document) => Some(document),
            Err(e) => {
                warn!("Failed to load API document {}: {}", self.path.display(), e);
                None
            }
        }
    }
}
