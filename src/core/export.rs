//! Export lifecycle: Idle → Requesting → Succeeded | Failed → Idle.
//!
//! At most one request is in flight per orchestrator. A trigger that arrives while a
//! request is pending is dropped, not queued. Failures are terminal for the attempt and
//! never retried automatically. A request whose future is dropped before the service
//! replies ends in Failed.

use crate::core::layout::LayoutEngine;
use crate::core::manifest::ManifestBuilder;
use crate::domain::model::{CardContent, CardDesign};
use crate::domain::ports::{ConfigProvider, GenerationService, Storage};
use crate::utils::error::Result;
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;
use tokio::sync::watch;

pub const EXPORT_EXTENSION: &str = "3mf";
const DEFAULT_FILE_STEM: &str = "card";
const ABANDONED_MESSAGE: &str =
    "Generation Failed. The export was abandoned before the service replied.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportState {
    Idle,
    Requesting,
    Succeeded(SavedExport),
    Failed { message: String },
}

impl ExportState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExportState::Succeeded(_) | ExportState::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedExport {
    pub filename: String,
    pub location: String,
    pub size_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Saved(SavedExport),
    /// Another export was already running; nothing was sent.
    Ignored,
}

/// `<name>.3mf` with whitespace runs turned into underscores; blank names fall back to
/// `card`.
pub fn download_filename(name: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let whitespace = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("static regex"));

    let trimmed = name.trim();
    let stem = if trimmed.is_empty() {
        DEFAULT_FILE_STEM.to_string()
    } else {
        whitespace
            .replace_all(trimmed, "_")
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect()
    };
    format!("{}.{}", stem, EXPORT_EXTENSION)
}

pub struct ExportOrchestrator<G: GenerationService, S: Storage> {
    service: G,
    storage: S,
    manifests: ManifestBuilder,
    layout: LayoutEngine,
    display_duration: Duration,
    state: watch::Sender<ExportState>,
}

impl<G: GenerationService, S: Storage> ExportOrchestrator<G, S> {
    pub fn new<C: ConfigProvider>(service: G, storage: S, config: &C) -> Self {
        let (state, _rx) = watch::channel(ExportState::Idle);
        Self {
            service,
            storage,
            manifests: ManifestBuilder::new(config.app_name()),
            layout: LayoutEngine::default(),
            display_duration: config.display_duration(),
            state,
        }
    }

    pub fn state(&self) -> ExportState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ExportState> {
        self.state.subscribe()
    }

    pub async fn generate(&self, design: &CardDesign, content: &CardContent) -> Result<ExportOutcome> {
        let Some(guard) = RequestingGuard::claim(&self.state) else {
            tracing::warn!("Export already in progress, ignoring generate request");
            return Ok(ExportOutcome::Ignored);
        };

        match self.run(design, content).await {
            Ok(saved) => {
                tracing::info!(
                    "✅ Card saved as {} ({} bytes)",
                    saved.location,
                    saved.size_bytes
                );
                guard.finish(ExportState::Succeeded(saved.clone()));
                Ok(ExportOutcome::Saved(saved))
            }
            Err(e) => {
                tracing::error!(
                    "❌ 3MF generation failed: {} (Category: {:?})",
                    e,
                    e.category()
                );
                guard.finish(ExportState::Failed {
                    message: e.user_friendly_message(),
                });
                Err(e)
            }
        }
    }

    async fn run(&self, design: &CardDesign, content: &CardContent) -> Result<SavedExport> {
        let layout = self
            .layout
            .compute(design.width(), design.height(), content);
        let manifest = self.manifests.build(design, content, &layout);
        tracing::debug!("Built manifest version {}", manifest.metadata.version);

        let payload = self.service.generate(&manifest).await?;

        let filename = download_filename(&content.name);
        let location = self.storage.write_file(&filename, &payload).await?;
        Ok(SavedExport {
            filename,
            location,
            size_bytes: payload.len(),
        })
    }

    /// The UI has shown the result; go back to Idle.
    pub fn acknowledge(&self) {
        self.state.send_if_modified(|state| {
            if state.is_terminal() {
                *state = ExportState::Idle;
                true
            } else {
                false
            }
        });
    }

    /// Wait out the display duration, then go back to Idle unless the state moved on
    /// in the meantime.
    pub async fn settle(&self) {
        let shown = self.state.borrow().clone();
        if !shown.is_terminal() {
            return;
        }
        tokio::time::sleep(self.display_duration).await;
        self.state.send_if_modified(|state| {
            if *state == shown {
                *state = ExportState::Idle;
                true
            } else {
                false
            }
        });
    }
}

/// Holds the Requesting slot. Dropping it unfinished (caller timeout, `select!`, task
/// abort) moves the state to Failed so the slot is never leaked.
struct RequestingGuard<'a> {
    state: &'a watch::Sender<ExportState>,
    armed: bool,
}

impl<'a> RequestingGuard<'a> {
    fn claim(state: &'a watch::Sender<ExportState>) -> Option<Self> {
        let claimed = state.send_if_modified(|current| {
            if *current == ExportState::Requesting {
                return false;
            }
            *current = ExportState::Requesting;
            true
        });
        claimed.then_some(Self { state, armed: true })
    }

    fn finish(mut self, next: ExportState) {
        self.armed = false;
        self.state.send_replace(next);
    }
}

impl Drop for RequestingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        tracing::warn!("Export abandoned while waiting for the generation service");
        self.state.send_if_modified(|state| {
            if *state != ExportState::Requesting {
                return false;
            }
            *state = ExportState::Failed {
                message: ABANDONED_MESSAGE.to_string(),
            };
            true
        });
    }
}
