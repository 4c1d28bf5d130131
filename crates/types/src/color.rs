use serde::{de, Deserialize, Deserializer, Serialize};

fn default_opaque() -> f32 {
    100.0
}

fn is_opaque(alpha: &f32) -> bool {
    *alpha == 100.0
}

/// An RGB color with an alpha percentage.
///
/// Channels are expressed on a 0-255 scale and alpha on a 0-100 scale. The
/// value is never mutated; drawing code asks for the representation it needs
/// through [`Color::to_additive`] or [`Color::to_subtractive`].
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(skip_serializing_if = "is_opaque", default = "default_opaque")]
    pub alpha: f32,
}

/// Additive representation, every channel scaled to 0-1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

/// Subtractive representation, every channel scaled to 0-1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cmyka {
    pub cyan: f32,
    pub magenta: f32,
    pub yellow: f32,
    pub black: f32,
    pub alpha: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32, alpha: f32) -> Self {
        Self { r, g, b, alpha }
    }

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 100.0)
    }

    pub fn gray(value: f32) -> Self {
        Self::rgb(value, value, value)
    }

    pub fn black() -> Self {
        Self::gray(0.0)
    }

    pub fn white() -> Self {
        Self::gray(255.0)
    }

    pub fn to_additive(&self) -> Rgba {
        Rgba {
            red: self.r / 255.0,
            green: self.g / 255.0,
            blue: self.b / 255.0,
            alpha: self.alpha / 100.0,
        }
    }

    /// Converts to CMYK by pulling the shared gray component into the black
    /// channel. Pure black maps to `(0, 0, 0, 1)` and white to all zeros.
    pub fn to_subtractive(&self) -> Cmyka {
        let Rgba { red, green, blue, alpha } = self.to_additive();
        let (c, m, y) = (1.0 - red, 1.0 - green, 1.0 - blue);
        let k = c.min(m).min(y);
        Cmyka {
            cyan: (c - k).clamp(0.0, 1.0),
            magenta: (m - k).clamp(0.0, 1.0),
            yellow: (y - k).clamp(0.0, 1.0),
            black: k.clamp(0.0, 1.0),
            alpha,
        }
    }

    /// Parse a hex color string (#RGB or #RRGGBB format)
    fn parse_hex(s: &str) -> Result<Color, String> {
        let s = s.trim();
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| format!("Color must start with #, got: {}", s))?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("Invalid hex color: {}", s));
        }
        let channel = |digits: &str, name: &str| {
            u8::from_str_radix(digits, 16)
                .map(f32::from)
                .map_err(|e| format!("Invalid {} component: {}", name, e))
        };

        match hex.len() {
            3 => Ok(Color::rgb(
                channel(&hex[0..1].repeat(2), "red")?,
                channel(&hex[1..2].repeat(2), "green")?,
                channel(&hex[2..3].repeat(2), "blue")?,
            )),
            6 => Ok(Color::rgb(
                channel(&hex[0..2], "red")?,
                channel(&hex[2..4], "green")?,
                channel(&hex[4..6], "blue")?,
            )),
            _ => Err(format!("Invalid hex color length: expected 3 or 6, got {}", hex.len())),
        }
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum ColorDef {
            Str(String),
            Triple([f32; 3]),
            Map { r: f32, g: f32, b: f32, #[serde(default = "default_opaque")] alpha: f32 },
        }

        match ColorDef::deserialize(deserializer)? {
            ColorDef::Str(s) => Self::parse_hex(&s).map_err(de::Error::custom),
            ColorDef::Triple([r, g, b]) => Ok(Color::rgb(r, g, b)),
            ColorDef::Map { r, g, b, alpha } => Ok(Color::new(r, g, b, alpha)),
        }
    }
}
