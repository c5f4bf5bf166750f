pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{HttpGenerationService, LocalStorage};
pub use crate::config::{AppConfig, CardFile};
pub use crate::core::card_model::CardModel;
pub use crate::core::export::{ExportOrchestrator, ExportOutcome, ExportState};
pub use crate::core::layout::LayoutEngine;
pub use crate::core::manifest::ManifestBuilder;
pub use crate::core::profile::ProfileBuilder;
pub use crate::core::store::{CardSnapshot, CardStore, PreviewCache};
pub use crate::utils::error::{CardError, Result};
