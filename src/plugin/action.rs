//! The "generate body" action of one request-body editor
//!
//! `idle → loading → idle`: a trigger locates the operation's JSON body
//! schema, inlines its references, asks the backend for an example and hands
//! the result to the editor. Every failure ends as a user-facing notice.

use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::HostContext;
use crate::domain::{
    find_request_body_schema, BodyEditor, ClientError, GenerateRequest, SchemaResolver,
};

pub const IDLE_LABEL: &str = "🤖 AI pls, body";
pub const LOADING_LABEL: &str = "🤖 cooking JSON…";
pub const NO_SCHEMA_NOTICE: &str = "No JSON request body schema found";
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Trigger state of one editor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActionState {
    #[default]
    Idle,
    Loading,
}

impl ActionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// How the trigger control renders in this state
    pub fn button(&self) -> ButtonView {
        match self {
            Self::Idle => ButtonView {
                label: IDLE_LABEL,
                disabled: false,
                cursor: "pointer",
                background: "#fff",
                color: "#49cc90",
                opacity: 1.0,
            },
            Self::Loading => ButtonView {
                label: LOADING_LABEL,
                disabled: true,
                cursor: "wait",
                background: "#e0e0e0",
                color: "#999",
                opacity: 0.6,
            },
        }
    }
}

/// Presentation of the trigger control
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonView {
    pub label: &'static str,
    pub disabled: bool,
    pub cursor: &'static str,
    pub background: &'static str,
    pub color: &'static str,
    pub opacity: f32,
}

/// Which way a trigger ended
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateOutcome {
    /// Body handed to the editor
    Generated(Value),
    /// The document has no matching request body
    NoSchema,
    /// The backend answered without a usable body
    Rejected(String),
    /// Transport or response parsing failed
    Failed(String),
    /// A previous trigger is still running
    Busy,
}

pub struct GenerateAction {
    ctx: HostContext,
    editor: Option<Arc<dyn BodyEditor>>,
    state: watch::Sender<ActionState>,
}

impl GenerateAction {
    pub fn new(ctx: HostContext, editor: Option<Arc<dyn BodyEditor>>) -> Self {
        let (state, _) = watch::channel(ActionState::Idle);
        Self { ctx, editor, state }
    }

    pub fn state(&self) -> ActionState {
        *self.state.borrow()
    }

    /// Receiver that sees every state change
    pub fn subscribe(&self) -> watch::Receiver<ActionState> {
        self.state.subscribe()
    }

    pub fn button(&self) -> ButtonView {
        self.state().button()
    }

    /// Run one generate cycle; the state is back to idle when this returns
    pub async fn handle_generate(&self) -> GenerateOutcome {
        let Some(_loading) = LoadingGuard::acquire(&self.state) else {
            debug!("Generate already in progress");
            return GenerateOutcome::Busy;
        };

        match self.run().await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Generate request failed: {}", e);
                self.ctx.notifier.notify(&format!("Error: {}", e));
                GenerateOutcome::Failed(e.to_string())
            }
        }
    }

    async fn run(&self) -> Result<GenerateOutcome, ClientError> {
        let settings = &self.ctx.settings;
        let document = self
            .ctx
            .spec_store
            .spec_json()
            .unwrap_or_else(|| Value::Object(Map::new()));

        let Some(found) =
            find_request_body_schema(&document, &settings.selector, &settings.media_type_filter)
        else {
            self.ctx.notifier.notify(NO_SCHEMA_NOTICE);
            return Ok(GenerateOutcome::NoSchema);
        };

        let resolved = SchemaResolver::new(settings.max_depth).resolve(found.schema, &document);
        debug!(
            path = found.path,
            method = found.method,
            media_type = found.media_type,
            "Resolved schema: {}",
            resolved
        );

        let response = self
            .ctx
            .client
            .generate(&GenerateRequest { schema: resolved })
            .await?;

        match (&self.editor, response.success) {
            (Some(editor), true) => {
                let body = response.body.unwrap_or(Value::Null);
                editor.on_change(body.clone());
                info!("Generated body");
                Ok(GenerateOutcome::Generated(body))
            }
            _ => {
                let message = response.error.unwrap_or_else(|| UNKNOWN_ERROR.to_string());
                self.ctx.notifier.notify(&format!("Error: {}", message));
                Ok(GenerateOutcome::Rejected(message))
            }
        }
    }
}

/// Holds the action in `Loading`; dropping it returns to `Idle`
struct LoadingGuard<'a> {
    state: &'a watch::Sender<ActionState>,
}

impl<'a> LoadingGuard<'a> {
    fn acquire(state: &'a watch::Sender<ActionState>) -> Option<Self> {
        let acquired = state.send_if_modified(|current| {
            if current.is_loading() {
                false
            } else {
                *current = ActionState::Loading;
                true
            }
        });
        acquired.then(|| Self { state })
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_replace(ActionState::Idle);
    }
}
