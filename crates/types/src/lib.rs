pub mod color;
pub mod geometry;
pub mod unit;

pub use color::{Cmyka, Color, Rgba};
pub use geometry::{Position, Rect, Size};
pub use unit::Unit;
