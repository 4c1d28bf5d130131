//! Parser for the CSS-like padding shorthand.

use crate::error::StyleError;
use nom::character::complete::{space0, space1};
use nom::combinator::all_consuming;
use nom::multi::separated_list1;
use nom::number::complete::float;
use nom::sequence::delimited;
use nom::{IResult, Parser};

/// Padding on each side of a box, in document units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Padding {
    pub fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// `left + right`
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// `top + bottom`
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Parses 1, 2, 3 or 4 whitespace separated numbers following the CSS
    /// shorthand convention.
    pub fn parse(input: &str) -> Result<Self, StyleError> {
        let values = parse_values(input)
            .map(|(_, values)| values)
            .map_err(|_| StyleError::validation("padding", format!("'{}' is not a list of numbers", input)))?;
        if values.iter().any(|value| !value.is_finite()) {
            return Err(StyleError::validation("padding", format!("'{}' holds a non-finite value", input)));
        }

        match values.as_slice() {
            [all] => Ok(Padding::all(*all)),
            [vertical, horizontal] => Ok(Padding {
                top: *vertical,
                right: *horizontal,
                bottom: *vertical,
                left: *horizontal,
            }),
            [top, horizontal, bottom] => Ok(Padding {
                top: *top,
                right: *horizontal,
                bottom: *bottom,
                left: *horizontal,
            }),
            [top, right, bottom, left] => Ok(Padding {
                top: *top,
                right: *right,
                bottom: *bottom,
                left: *left,
            }),
            _ => Err(StyleError::validation(
                "padding",
                format!("expected 1 to 4 values, got {} in '{}'", values.len(), input),
            )),
        }
    }
}

fn parse_values(input: &str) -> IResult<&str, Vec<f32>> {
    all_consuming(delimited(space0, separated_list1(space1, float), space0)).parse(input)
}
