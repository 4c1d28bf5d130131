//! Page formats and the printable frame they leave once margins are applied.

use quire_types::{Position, Size, Unit};
use serde::{de, Deserialize, Deserializer};

/// Page dimensions in points, portrait.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PageFormat {
    #[default]
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Custom { width: f32, height: f32 },
}

impl PageFormat {
    pub fn dimensions_pt(&self) -> (f32, f32) {
        match self {
            PageFormat::A4 => (595.28, 841.89),
            PageFormat::A3 => (841.89, 1190.55),
            PageFormat::A5 => (419.53, 595.28),
            PageFormat::Letter => (612.0, 792.0),
            PageFormat::Legal => (612.0, 1008.0),
            PageFormat::Custom { width, height } => (*width, *height),
        }
    }

    fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "a4" => Ok(PageFormat::A4),
            "a3" => Ok(PageFormat::A3),
            "a5" => Ok(PageFormat::A5),
            "letter" => Ok(PageFormat::Letter),
            "legal" => Ok(PageFormat::Legal),
            _ => Err(format!("Unknown page format: '{}'", s)),
        }
    }
}

impl<'de> Deserialize<'de> for PageFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum FormatDef {
            Name(String),
            Custom { width: f32, height: f32 },
        }

        match FormatDef::deserialize(deserializer)? {
            FormatDef::Name(name) => PageFormat::parse(&name).map_err(de::Error::custom),
            FormatDef::Custom { width, height } => Ok(PageFormat::Custom { width, height }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Margins in document units.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "[f32; 4]")]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Margins::from([10.0; 4])
    }
}

impl From<[f32; 4]> for Margins {
    fn from([top, right, bottom, left]: [f32; 4]) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Everything needed to place content on a page: format, orientation,
/// margins and the unit the margins and all layout values are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct PageSetup {
    pub format: PageFormat,
    pub orientation: Orientation,
    pub margins: Margins,
    pub unit: Unit,
}

impl PageSetup {
    /// Page size in points. Custom formats are taken as given in portrait
    /// and swapped in landscape.
    pub fn page_size_pt(&self) -> Size {
        let (width, height) = self.format.dimensions_pt();
        match self.orientation {
            Orientation::Portrait => Size::new(width, height),
            Orientation::Landscape => Size::new(height, width),
        }
    }

    /// Width of the printable frame, in document units.
    pub fn printable_width(&self) -> f32 {
        self.unit.from_pt(self.page_size_pt().width) - self.margins.left - self.margins.right
    }

    /// Height of the printable frame, in document units.
    pub fn printable_height(&self) -> f32 {
        self.unit.from_pt(self.page_size_pt().height) - self.margins.top - self.margins.bottom
    }

    /// Top-left corner of the printable frame in PDF space (points, y up).
    pub fn frame_origin_pt(&self) -> Position {
        let page = self.page_size_pt();
        Position::new(
            self.unit.to_pt(self.margins.left),
            page.height - self.unit.to_pt(self.margins.top),
        )
    }

    /// Converts a cursor position (document units, y negative downwards) to
    /// absolute page coordinates in points.
    pub fn to_page(&self, position: Position) -> Position {
        let origin = self.frame_origin_pt();
        Position::new(
            origin.x + self.unit.to_pt(position.x),
            origin.y + self.unit.to_pt(position.y),
        )
    }
}
