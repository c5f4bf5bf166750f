use serde::{Deserialize, Serialize};

pub const CARD_WIDTH: f64 = 85.0;
pub const CARD_HEIGHT: f64 = 54.0;
pub const CARD_THICKNESS: f64 = 1.6;

pub const DEFAULT_FILLET_RADIUS: f64 = 3.0;
pub const DEFAULT_FONT_COLOR: &str = "#FFFFFF";
pub const BOLD_FONT: &str = "/fonts/Monocraft-ttf/weights/Monocraft-Bold.ttf";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilamentColor {
    pub hex: &'static str,
    pub name: &'static str,
}

pub const FILAMENT_COLORS: [FilamentColor; 5] = [
    FilamentColor { hex: "#784e97", name: "Purple" },
    FilamentColor { hex: "#8FD9D9", name: "Teal" },
    FilamentColor { hex: "#FFFFFF", name: "White" },
    FilamentColor { hex: "#FF7597", name: "Pink" },
    FilamentColor { hex: "#48434c", name: "Charcoal" },
];

impl FilamentColor {
    pub fn default_primary() -> Self {
        FILAMENT_COLORS[0]
    }

    pub fn by_name(name: &str) -> Option<Self> {
        FILAMENT_COLORS
            .iter()
            .copied()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }
}

/// Clamp a fillet radius into `[0, min(width, height) / 2]`. NaN becomes 0.
pub fn clamp_fillet_radius(radius: f64, width: f64, height: f64) -> f64 {
    let max = width.min(height) / 2.0;
    if radius.is_nan() {
        return 0.0;
    }
    radius.clamp(0.0, max.max(0.0))
}

/// Physical parameters of the card. Dimensions are fixed; the radius is clamped on
/// construction so every consumer sees the same value.
#[derive(Debug, Clone, PartialEq)]
pub struct CardDesign {
    width: f64,
    height: f64,
    thickness: f64,
    fillet_radius: f64,
    pub primary_color: String,
    pub font_color: String,
    pub font: Option<String>,
    pub font_bold: bool,
}

impl CardDesign {
    pub fn new(fillet_radius: f64) -> Self {
        Self {
            width: CARD_WIDTH,
            height: CARD_HEIGHT,
            thickness: CARD_THICKNESS,
            fillet_radius: clamp_fillet_radius(fillet_radius, CARD_WIDTH, CARD_HEIGHT),
            primary_color: FilamentColor::default_primary().hex.to_string(),
            font_color: DEFAULT_FONT_COLOR.to_string(),
            font: None,
            font_bold: false,
        }
    }

    pub fn with_colors(mut self, primary: impl Into<String>, font: impl Into<String>) -> Self {
        self.primary_color = primary.into();
        self.font_color = font.into();
        self
    }

    pub fn with_font(mut self, font: Option<String>, bold: bool) -> Self {
        self.font = font;
        self.font_bold = bold;
        self
    }

    pub fn set_fillet_radius(&mut self, radius: f64) {
        self.fillet_radius = clamp_fillet_radius(radius, self.width, self.height);
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn fillet_radius(&self) -> f64 {
        self.fillet_radius
    }

    /// The bold face overrides whatever family was picked.
    pub fn active_font(&self) -> Option<&str> {
        if self.font_bold {
            Some(BOLD_FONT)
        } else {
            self.font.as_deref()
        }
    }
}

impl Default for CardDesign {
    fn default() -> Self {
        Self::new(DEFAULT_FILLET_RADIUS)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardContent {
    pub name: String,
    pub email: String,
    pub job_title: String,
    pub school: String,
    pub phone_number: String,
    pub github: String,
    pub linkedin: String,
    pub show_github: bool,
    pub show_linkedin: bool,
    pub show_qr_code: bool,
    pub qr_code_link: String,
}

impl CardContent {
    pub fn github_value(&self) -> Option<&str> {
        self.show_github.then_some(self.github.as_str())
    }

    pub fn linkedin_value(&self) -> Option<&str> {
        self.show_linkedin.then_some(self.linkedin.as_str())
    }

    /// True when the back face carries a scannable code.
    pub fn has_qr_code(&self) -> bool {
        self.show_qr_code && !self.qr_code_link.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    Front,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Name,
    JobTitle,
    School,
    Phone,
    Email,
    Github,
    Linkedin,
    QrCode,
}

impl FieldId {
    pub const ALL: [FieldId; 8] = [
        FieldId::Name,
        FieldId::JobTitle,
        FieldId::School,
        FieldId::Phone,
        FieldId::Email,
        FieldId::Github,
        FieldId::Linkedin,
        FieldId::QrCode,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::JobTitle => "jobTitle",
            FieldId::School => "school",
            FieldId::Phone => "phone",
            FieldId::Email => "email",
            FieldId::Github => "github",
            FieldId::Linkedin => "linkedin",
            FieldId::QrCode => "qrCode",
        }
    }

    pub fn face(self) -> Face {
        match self {
            FieldId::QrCode => Face::Back,
            _ => Face::Front,
        }
    }

    /// Shown in the preview when the user left the field blank.
    pub fn placeholder(self) -> &'static str {
        match self {
            FieldId::Name => "Your Name",
            FieldId::JobTitle => "Job Title",
            FieldId::School => "School / University",
            FieldId::Phone => "(123) 456-7890",
            FieldId::Email => "email@example.com",
            FieldId::Github => "github.com/username",
            FieldId::Linkedin => "linkedin.com/in/username",
            FieldId::QrCode => "",
        }
    }

    pub fn text<'a>(self, content: &'a CardContent) -> &'a str {
        match self {
            FieldId::Name => &content.name,
            FieldId::JobTitle => &content.job_title,
            FieldId::School => &content.school,
            FieldId::Phone => &content.phone_number,
            FieldId::Email => &content.email,
            FieldId::Github => &content.github,
            FieldId::Linkedin => &content.linkedin,
            FieldId::QrCode => &content.qr_code_link,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldAnchor {
    pub field: FieldId,
    pub position: Point2,
    pub face: Face,
    pub visible: bool,
}
