use crate::core::layout::{Layout, LayoutEngine, TextStyle};
use crate::core::profile::{Profile, ProfileBuilder};
use crate::domain::model::{CardContent, CardDesign, Face, FieldId};
use crate::domain::ports::{QrBitmap, QrEncoder, QrOptions};

/// Lift above (or below) a face so the renderer doesn't z-fight with it.
pub const SURFACE_OFFSET: f64 = 0.05;
pub const QR_PLANE_SIZE: f64 = 30.0;
/// Curve subdivision the preview extrudes with.
pub const CURVE_SEGMENTS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extrusion {
    pub depth: f64,
    pub front_z: f64,
    pub back_z: f64,
    pub curve_segments: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub field: FieldId,
    pub text: String,
    pub position: Point3,
    pub style: TextStyle,
    pub color: String,
    pub font: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QrPlane {
    pub position: Point3,
    pub size: f64,
    /// Rotation about Y in radians; the plane faces away from the front.
    pub rotation_y: f64,
    pub mirror_x: bool,
    pub bitmap: QrBitmap,
}

/// Everything the renderer needs to draw the live preview.
#[derive(Debug, Clone, PartialEq)]
pub struct CardModel {
    pub profile: Profile,
    pub extrusion: Extrusion,
    pub color: String,
    pub layout: Layout,
    pub texts: Vec<TextElement>,
    pub qr: Option<QrPlane>,
}

impl CardModel {
    pub fn build(design: &CardDesign, content: &CardContent, encoder: &dyn QrEncoder) -> Self {
        let profile =
            ProfileBuilder::build(design.width(), design.height(), design.fillet_radius());
        let layout = LayoutEngine::default().compute(design.width(), design.height(), content);
        let thickness = design.thickness();

        let texts = layout
            .visible()
            .filter(|anchor| anchor.face == Face::Front)
            .map(|anchor| {
                let raw = anchor.field.text(content);
                let text = if raw.is_empty() {
                    anchor.field.placeholder()
                } else {
                    raw
                };
                TextElement {
                    field: anchor.field,
                    text: text.to_string(),
                    position: Point3 {
                        x: anchor.position.x,
                        y: anchor.position.y,
                        z: thickness + SURFACE_OFFSET,
                    },
                    style: layout.style(anchor.field),
                    color: design.font_color.clone(),
                    font: design.active_font().map(str::to_string),
                }
            })
            .collect();

        let qr = layout
            .anchor(FieldId::QrCode)
            .filter(|anchor| anchor.visible)
            .and_then(|anchor| {
                match encoder.encode(&content.qr_code_link, &QrOptions::default()) {
                    Ok(bitmap) => Some(QrPlane {
                        position: Point3 {
                            x: anchor.position.x,
                            y: anchor.position.y,
                            z: -SURFACE_OFFSET,
                        },
                        size: QR_PLANE_SIZE,
                        rotation_y: std::f64::consts::PI,
                        mirror_x: true,
                        bitmap: bitmap.oriented_for_back_face(),
                    }),
                    Err(e) => {
                        tracing::warn!("QR encoding failed, preview shows no code: {}", e);
                        None
                    }
                }
            });

        Self {
            profile,
            extrusion: Extrusion {
                depth: thickness,
                front_z: thickness,
                back_z: 0.0,
                curve_segments: CURVE_SEGMENTS,
            },
            color: design.primary_color.clone(),
            layout,
            texts,
            qr,
        }
    }

    pub fn text(&self, field: FieldId) -> Option<&TextElement> {
        self.texts.iter().find(|t| t.field == field)
    }

    /// Closed outline at the given face height.
    pub fn outline_at(&self, z: f64) -> Vec<Point3> {
        self.profile
            .flatten(self.extrusion.curve_segments)
            .into_iter()
            .map(|p| Point3 { x: p.x, y: p.y, z })
            .collect()
    }
}
