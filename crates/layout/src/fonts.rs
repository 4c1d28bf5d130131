//! Metrics for the standard 14 PDF fonts.
//!
//! Widths cover printable ASCII and come from the Adobe AFM files. Accented
//! Latin-1 letters take the width of their base letter, as they do in the AFM
//! data; other characters outside ASCII are measured as an `n`. The bold and
//! italic Times faces reuse the roman widths, so measured Times Bold text runs
//! slightly narrow. The Helvetica obliques share the upright widths as they do
//! in the AFM data.

use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    TimesRoman,
    TimesBold,
    TimesItalic,
    TimesBoldItalic,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
}

#[derive(Clone, Copy)]
enum Family {
    Helvetica,
    Times,
    Courier,
}

impl StandardFont {
    pub const ALL: [StandardFont; 12] = [
        StandardFont::Helvetica,
        StandardFont::HelveticaBold,
        StandardFont::HelveticaOblique,
        StandardFont::HelveticaBoldOblique,
        StandardFont::TimesRoman,
        StandardFont::TimesBold,
        StandardFont::TimesItalic,
        StandardFont::TimesBoldItalic,
        StandardFont::Courier,
        StandardFont::CourierBold,
        StandardFont::CourierOblique,
        StandardFont::CourierBoldOblique,
    ];

    /// Picks a face from a family name such as `Helvetica`, `Times-Bold` or
    /// `courier` and an optional style such as `bold`, `italic` or
    /// `bold italic`. Unknown families fall back to Helvetica.
    pub fn resolve(family: &str, style: Option<&str>) -> StandardFont {
        let family_lower = family.to_lowercase();
        let style_lower = style.unwrap_or_default().to_lowercase();
        let has = |needle: &str| family_lower.contains(needle) || style_lower.contains(needle);
        let bold = has("bold");
        let italic = has("italic") || has("oblique");

        let base = if family_lower.starts_with("times") {
            Family::Times
        } else if family_lower.starts_with("courier") {
            Family::Courier
        } else {
            if !family_lower.starts_with("helvetica") {
                debug!("Font family '{}' is not a standard font, using Helvetica", family);
            }
            Family::Helvetica
        };

        match (base, bold, italic) {
            (Family::Helvetica, false, false) => StandardFont::Helvetica,
            (Family::Helvetica, true, false) => StandardFont::HelveticaBold,
            (Family::Helvetica, false, true) => StandardFont::HelveticaOblique,
            (Family::Helvetica, true, true) => StandardFont::HelveticaBoldOblique,
            (Family::Times, false, false) => StandardFont::TimesRoman,
            (Family::Times, true, false) => StandardFont::TimesBold,
            (Family::Times, false, true) => StandardFont::TimesItalic,
            (Family::Times, true, true) => StandardFont::TimesBoldItalic,
            (Family::Courier, false, false) => StandardFont::Courier,
            (Family::Courier, true, false) => StandardFont::CourierBold,
            (Family::Courier, false, true) => StandardFont::CourierOblique,
            (Family::Courier, true, true) => StandardFont::CourierBoldOblique,
        }
    }

    /// The PostScript name used as `/BaseFont`.
    pub fn base_name(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::TimesBold => "Times-Bold",
            StandardFont::TimesItalic => "Times-Italic",
            StandardFont::TimesBoldItalic => "Times-BoldItalic",
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
            StandardFont::CourierOblique => "Courier-Oblique",
            StandardFont::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    /// Advance width of `ch` in thousandths of an em.
    pub fn char_width(self, ch: char) -> f32 {
        let table: Option<&[u16; 95]> = match self {
            StandardFont::Helvetica | StandardFont::HelveticaOblique => Some(&HELVETICA),
            StandardFont::HelveticaBold | StandardFont::HelveticaBoldOblique => Some(&HELVETICA_BOLD),
            StandardFont::TimesRoman
            | StandardFont::TimesBold
            | StandardFont::TimesItalic
            | StandardFont::TimesBoldItalic => Some(&TIMES_ROMAN),
            _ => None,
        };
        let Some(table) = table else {
            return 600.0;
        };
        match base_letter(ch) as u32 {
            code @ 32..=126 => f32::from(table[(code - 32) as usize]),
            // Average lowercase advance for characters outside the table.
            _ => f32::from(table[('n' as u32 - 32) as usize]),
        }
    }

    /// Width of `text` set at `size` points, in points.
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        text.chars().map(|ch| self.char_width(ch)).sum::<f32>() * size / 1000.0
    }
}

/// The unaccented letter of a Latin-1 accented letter, `ch` otherwise.
fn base_letter(ch: char) -> char {
    match ch {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ð' => 'D',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' => 'Y',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ì'..='ï' => 'i',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => ch,
    }
}

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_faces_from_family_and_style() {
        assert_eq!(StandardFont::resolve("Helvetica", Some("normal")), StandardFont::Helvetica);
        assert_eq!(StandardFont::resolve("Helvetica-Bold", None), StandardFont::HelveticaBold);
        assert_eq!(StandardFont::resolve("Times", Some("bold italic")), StandardFont::TimesBoldItalic);
        assert_eq!(StandardFont::resolve("Courier", Some("oblique")), StandardFont::CourierOblique);
        assert_eq!(StandardFont::resolve("Comic Sans", None), StandardFont::Helvetica);
    }

    #[test]
    fn measures_ascii_text() {
        // "Hi" = H (722) + i (222)
        let width = StandardFont::Helvetica.text_width("Hi", 10.0);
        assert!((width - 9.44).abs() < 1e-4);
        assert_eq!(StandardFont::Courier.text_width("abc", 10.0), 18.0);
        assert!(StandardFont::HelveticaBold.text_width("a", 10.0) >= StandardFont::Helvetica.text_width("a", 10.0));
    }

    #[test]
    fn accented_letters_measure_like_their_base_letter() {
        for font in [StandardFont::Helvetica, StandardFont::HelveticaBold, StandardFont::TimesRoman] {
            assert_eq!(font.text_width("résumé", 10.0), font.text_width("resume", 10.0));
            assert_eq!(font.char_width('Ü'), font.char_width('U'));
            assert_eq!(font.char_width('ÿ'), font.char_width('y'));
        }
        assert_eq!(StandardFont::Helvetica.char_width('ß'), StandardFont::Helvetica.char_width('n'));
    }
}
