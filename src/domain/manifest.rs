//! Wire document sent to the generation service.
//!
//! Field names and order follow schema version [`MANIFEST_VERSION`]; the service
//! deserializes this exact shape, so renames here are breaking changes.

use crate::domain::model::Face;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MANIFEST_VERSION: &str = "1.0";
pub const DEFAULT_APP_NAME: &str = "PrintMyCard";
pub const QR_FALLBACK_URL: &str = "https://example.com";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub metadata: Metadata,
    pub design: DesignSection,
    pub content: ContentSection,
    pub positions: Positions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub app_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignSection {
    pub color: String,
    pub font_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    pub fillet_radius: f64,
    pub thickness: f64,
    pub dimensions: Dimensions,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSection {
    pub name: String,
    pub email: String,
    pub job_title: String,
    pub school: String,
    pub phone_number: String,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub qr_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face: Option<Face>,
}

/// Full position table, hidden fields included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Positions {
    pub name: Position,
    pub job_title: Position,
    pub school: Position,
    pub phone: Position,
    pub email: Position,
    pub github: Position,
    pub linkedin: Position,
    pub qr_code: Position,
}

impl Manifest {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
