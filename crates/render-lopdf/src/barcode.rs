//! Code 128 symbols, subset B.

use crate::error::RenderError;

/// Bar and space widths, in modules, for every symbol value. Entries 103 to
/// 105 are the start codes, 106 is the stop pattern.
#[rustfmt::skip]
const PATTERNS: [&str; 107] = [
    "212222", "222122", "222221", "121223", "121322", "131222", "122213", "122312",
    "132212", "221213", "221312", "231212", "112232", "122132", "122231", "113222",
    "123122", "123221", "223211", "221132", "221231", "213212", "223112", "312131",
    "311222", "321122", "321221", "312212", "322112", "322211", "212123", "212321",
    "232121", "111323", "131123", "131321", "112313", "132113", "132311", "211313",
    "231113", "231311", "112133", "112331", "132131", "113123", "113321", "133121",
    "313121", "211331", "231131", "213113", "213311", "213131", "311123", "311321",
    "331121", "312113", "312311", "332111", "314111", "221411", "431111", "111224",
    "111422", "121124", "121421", "141122", "141221", "112214", "112412", "122114",
    "122411", "142112", "142211", "241211", "221114", "413111", "241112", "134111",
    "111242", "121142", "121241", "114212", "124112", "124211", "411212", "421112",
    "421211", "212141", "214121", "412121", "111143", "111341", "131141", "114113",
    "114311", "411113", "411311", "113141", "114131", "311141", "411131", "211412",
    "211214", "211232", "2331112",
];

const START_B: usize = 104;
const STOP: usize = 106;

/// Blank modules on each side of the symbol.
pub const QUIET_ZONE: u32 = 10;

/// An encoded symbol: alternating bar and space widths, starting with a bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code128 {
    widths: Vec<u8>,
}

impl Code128 {
    /// Encodes printable ASCII with subset B and appends the mod 103 check
    /// symbol.
    pub fn encode(value: &str) -> Result<Self, RenderError> {
        if value.is_empty() {
            return Err(RenderError::Barcode {
                value: value.to_string(),
                reason: "nothing to encode".to_string(),
            });
        }
        let mut symbols = vec![START_B];
        for ch in value.chars() {
            match ch as u32 {
                code @ 32..=127 => symbols.push((code - 32) as usize),
                _ => {
                    return Err(RenderError::Barcode {
                        value: value.to_string(),
                        reason: format!("'{}' is outside subset B", ch),
                    });
                }
            }
        }
        let weighted: usize = symbols
            .iter()
            .enumerate()
            .map(|(position, symbol)| position.max(1) * symbol)
            .sum();
        symbols.push(weighted % 103);
        symbols.push(STOP);

        let widths = symbols
            .iter()
            .flat_map(|&symbol| PATTERNS[symbol].bytes().map(|digit| digit - b'0'))
            .collect();
        Ok(Self { widths })
    }

    pub fn widths(&self) -> &[u8] {
        &self.widths
    }

    /// Width of the bars alone, in modules.
    pub fn modules(&self) -> u32 {
        self.widths.iter().map(|&width| u32::from(width)).sum()
    }

    /// Width including both quiet zones, in modules.
    pub fn total_modules(&self) -> u32 {
        self.modules() + 2 * QUIET_ZONE
    }

    /// Offsets and widths of the dark bars, in modules from the left edge
    /// of the symbol (quiet zone excluded).
    pub fn bars(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let mut offset = 0;
        self.widths.iter().enumerate().filter_map(move |(i, &width)| {
            let start = offset;
            offset += u32::from(width);
            (i % 2 == 0).then_some((start, u32::from(width)))
        })
    }
}
