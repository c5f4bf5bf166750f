pub mod card_model;
pub mod export;
pub mod layout;
pub mod manifest;
pub mod profile;
pub mod store;

pub use crate::domain::manifest::Manifest;
pub use crate::domain::model::{CardContent, CardDesign, Face, FieldAnchor, FieldId, Point2};
pub use crate::domain::ports::{ConfigProvider, GenerationService, QrEncoder, Storage};
pub use crate::utils::error::Result;
