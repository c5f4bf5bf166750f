//! Anchor positions for every field on the card.
//!
//! Top-left stack descends from `(-w/2 + padding, h/2 - padding)`; bottom-left stack
//! ascends from `(-w/2 + padding, -h/2 + padding)` in fixed steps. Hidden gated fields
//! are skipped by the bottom stack so visible ones never leave a gap, but they keep an
//! anchor at their nominal slot for the manifest's full position table.

use crate::domain::model::{CardContent, Face, FieldAnchor, FieldId, Point2};

pub const EDGE_PADDING: f64 = 6.0;
pub const JOB_TITLE_OFFSET: f64 = -8.0;
pub const SCHOOL_OFFSET: f64 = -14.0;
pub const BOTTOM_STACK_STEP: f64 = 6.0;

/// Which edge of the text block the anchor pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAnchor {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f64,
    pub opacity: f64,
    pub anchor: VerticalAnchor,
    pub max_width: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub anchors: Vec<FieldAnchor>,
}

impl Layout {
    pub fn anchor(&self, field: FieldId) -> Option<&FieldAnchor> {
        self.anchors.iter().find(|a| a.field == field)
    }

    pub fn visible(&self) -> impl Iterator<Item = &FieldAnchor> {
        self.anchors.iter().filter(|a| a.visible)
    }

    pub fn position(&self, field: FieldId) -> Point2 {
        self.anchor(field)
            .map(|a| a.position)
            .unwrap_or(Point2::new(0.0, 0.0))
    }

    /// Preview styling for a text field on a card of this size.
    pub fn style(&self, field: FieldId) -> TextStyle {
        let top_stack = TextStyle {
            font_size: 4.0,
            opacity: 0.8,
            anchor: VerticalAnchor::Top,
            max_width: Some(self.width - EDGE_PADDING * 2.0),
        };
        match field {
            FieldId::Name => TextStyle {
                font_size: 5.0,
                opacity: 1.0,
                ..top_stack
            },
            FieldId::JobTitle | FieldId::School => top_stack,
            _ => TextStyle {
                font_size: 4.0,
                opacity: 1.0,
                anchor: VerticalAnchor::Bottom,
                max_width: None,
            },
        }
    }
}

pub struct LayoutEngine {
    padding: f64,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self {
            padding: EDGE_PADDING,
        }
    }
}

impl LayoutEngine {
    pub fn new(padding: f64) -> Self {
        Self { padding }
    }

    pub fn compute(&self, width: f64, height: f64, content: &CardContent) -> Layout {
        let left = -width / 2.0 + self.padding;
        let top = height / 2.0 - self.padding;
        let bottom = -height / 2.0 + self.padding;

        let mut anchors = Vec::with_capacity(FieldId::ALL.len());
        let front = |field: FieldId, y: f64, visible: bool| FieldAnchor {
            field,
            position: Point2::new(left, y),
            face: Face::Front,
            visible,
        };

        anchors.push(front(FieldId::Name, top, true));
        anchors.push(front(FieldId::JobTitle, top + JOB_TITLE_OFFSET, true));
        anchors.push(front(FieldId::School, top + SCHOOL_OFFSET, true));

        let bottom_stack = [
            (FieldId::Phone, true),
            (FieldId::Email, true),
            (FieldId::Github, content.show_github),
            (FieldId::Linkedin, content.show_linkedin),
        ];
        let mut next_slot = 0usize;
        for (nominal_slot, (field, visible)) in bottom_stack.into_iter().enumerate() {
            let slot = if visible {
                next_slot += 1;
                next_slot - 1
            } else {
                nominal_slot
            };
            anchors.push(front(
                field,
                bottom + slot as f64 * BOTTOM_STACK_STEP,
                visible,
            ));
        }

        anchors.push(FieldAnchor {
            field: FieldId::QrCode,
            position: Point2::new(0.0, 0.0),
            face: Face::Back,
            visible: content.has_qr_code(),
        });

        tracing::debug!(
            visible = anchors.iter().filter(|a| a.visible).count(),
            "computed card layout"
        );

        Layout {
            width,
            height,
            anchors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CARD_HEIGHT, CARD_WIDTH};

    fn layout(content: &CardContent) -> Layout {
        LayoutEngine::default().compute(CARD_WIDTH, CARD_HEIGHT, content)
    }

    fn y(layout: &Layout, field: FieldId) -> f64 {
        layout.position(field).y
    }

    #[test]
    fn test_top_stack_positions() {
        let layout = layout(&CardContent::default());
        assert_eq!(layout.position(FieldId::Name), Point2::new(-36.5, 21.0));
        assert_eq!(y(&layout, FieldId::JobTitle), 13.0);
        assert_eq!(y(&layout, FieldId::School), 7.0);
    }

    #[test]
    fn test_bottom_stack_with_all_links_shown() {
        let content = CardContent {
            show_github: true,
            show_linkedin: true,
            ..Default::default()
        };
        let layout = layout(&content);
        assert_eq!(y(&layout, FieldId::Phone), -21.0);
        assert_eq!(y(&layout, FieldId::Email), -15.0);
        assert_eq!(y(&layout, FieldId::Github), -9.0);
        assert_eq!(y(&layout, FieldId::Linkedin), -3.0);
        assert!(layout.anchors.iter().all(|a| a.field == FieldId::QrCode || a.visible));
    }

    #[test]
    fn test_hidden_github_leaves_no_gap() {
        let content = CardContent {
            show_github: false,
            show_linkedin: true,
            ..Default::default()
        };
        let layout = layout(&content);
        assert_eq!(y(&layout, FieldId::Linkedin), -9.0);

        let github = layout.anchor(FieldId::Github).unwrap();
        assert!(!github.visible);
        // nominal slot is still reported
        assert_eq!(github.position.y, -9.0);
    }

    #[test]
    fn test_empty_text_keeps_its_slot() {
        let content = CardContent {
            phone_number: String::new(),
            email: String::new(),
            show_linkedin: true,
            ..Default::default()
        };
        let layout = layout(&content);
        assert!(layout.anchor(FieldId::Phone).unwrap().visible);
        assert_eq!(y(&layout, FieldId::Linkedin), -9.0);
    }

    #[test]
    fn test_qr_anchor_needs_toggle_and_link() {
        let mut content = CardContent {
            show_qr_code: true,
            ..Default::default()
        };
        let qr = *layout(&content).anchor(FieldId::QrCode).unwrap();
        assert_eq!(qr.face, Face::Back);
        assert_eq!(qr.position, Point2::new(0.0, 0.0));
        assert!(!qr.visible);

        content.qr_code_link = "https://alex.dev".to_string();
        assert!(layout(&content).anchor(FieldId::QrCode).unwrap().visible);

        content.show_qr_code = false;
        assert!(!layout(&content).anchor(FieldId::QrCode).unwrap().visible);
    }

    #[test]
    fn test_anchor_order_is_fixed() {
        let fields: Vec<FieldId> = layout(&CardContent::default())
            .anchors
            .iter()
            .map(|a| a.field)
            .collect();
        assert_eq!(fields, FieldId::ALL.to_vec());
    }

    #[test]
    fn test_text_styles() {
        let layout = layout(&CardContent::default());
        let name = layout.style(FieldId::Name);
        assert_eq!(name.font_size, 5.0);
        assert_eq!(name.max_width, Some(73.0));
        assert_eq!(layout.style(FieldId::School).opacity, 0.8);
        assert_eq!(layout.style(FieldId::Email).anchor, VerticalAnchor::Bottom);
    }
}
