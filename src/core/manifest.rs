use crate::core::layout::Layout;
use crate::domain::manifest::{
    ContentSection, DesignSection, Dimensions, Manifest, Metadata, Position, Positions,
    DEFAULT_APP_NAME, MANIFEST_VERSION, QR_FALLBACK_URL,
};
use crate::domain::model::{CardContent, CardDesign, FieldId};
use chrono::{DateTime, SubsecRound, Utc};

pub struct ManifestBuilder {
    app_name: String,
}

impl Default for ManifestBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_APP_NAME)
    }
}

impl ManifestBuilder {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }

    /// Stamps the current time, millisecond precision.
    pub fn build(&self, design: &CardDesign, content: &CardContent, layout: &Layout) -> Manifest {
        self.build_at(Utc::now().trunc_subsecs(3), design, content, layout)
    }

    pub fn build_at(
        &self,
        timestamp: DateTime<Utc>,
        design: &CardDesign,
        content: &CardContent,
        layout: &Layout,
    ) -> Manifest {
        Manifest {
            metadata: Metadata {
                version: MANIFEST_VERSION.to_string(),
                timestamp,
                app_name: self.app_name.clone(),
            },
            design: DesignSection {
                color: design.primary_color.clone(),
                font_color: design.font_color.clone(),
                font: design.active_font().map(str::to_string),
                fillet_radius: design.fillet_radius(),
                thickness: design.thickness(),
                dimensions: Dimensions {
                    width: design.width(),
                    height: design.height(),
                },
            },
            content: ContentSection {
                name: content.name.clone(),
                email: content.email.clone(),
                job_title: content.job_title.clone(),
                school: content.school.clone(),
                phone_number: content.phone_number.clone(),
                github: content.github_value().map(str::to_string),
                linkedin: content.linkedin_value().map(str::to_string),
                qr_url: qr_url(content).to_string(),
            },
            positions: positions(layout),
        }
    }
}

/// The link verbatim, except an enabled code with no link gets a placeholder so the
/// service still has something to encode.
pub fn qr_url(content: &CardContent) -> &str {
    if content.show_qr_code && content.qr_code_link.is_empty() {
        QR_FALLBACK_URL
    } else {
        &content.qr_code_link
    }
}

fn positions(layout: &Layout) -> Positions {
    let text = |field: FieldId| {
        let p = layout.position(field);
        Position {
            x: p.x,
            y: p.y,
            face: None,
        }
    };
    let qr = layout.position(FieldId::QrCode);

    Positions {
        name: text(FieldId::Name),
        job_title: text(FieldId::JobTitle),
        school: text(FieldId::School),
        phone: text(FieldId::Phone),
        email: text(FieldId::Email),
        github: text(FieldId::Github),
        linkedin: text(FieldId::Linkedin),
        qr_code: Position {
            x: qr.x,
            y: qr.y,
            face: Some(FieldId::QrCode.face()),
        },
    }
}
