//! The drawing cursor.
//!
//! Callers think in a top-down coordinate space where a positive `y` move goes
//! down the page. The cursor stores `y` negated so that it can be added to a
//! bottom-up page origin directly.

use quire_types::Position;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cursor {
    position: Position,
    indent: f32,
    tracking: bool,
    changes: Vec<Position>,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Relative move; a positive `dy` moves down.
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.position.x += dx;
        self.position.y -= dy;
        if self.tracking {
            self.changes.push(Position::new(dx, -dy));
        }
    }

    /// Absolute move. Setting `x` also drops the indentation.
    pub fn move_to(&mut self, x: Option<f32>, y: Option<f32>) {
        if let Some(x) = x {
            self.position.x = x;
            self.indent = 0.0;
        }
        if let Some(y) = y {
            self.position.y = -y;
        }
    }

    pub fn indent(&mut self, delta: f32) {
        self.indent += delta;
    }

    pub fn indent_to(&mut self, value: f32) {
        self.indent = value;
    }

    pub fn new_line(&mut self) {
        self.indent = 0.0;
    }

    pub fn x(&self) -> f32 {
        self.position.x + self.indent
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    pub fn position(&self) -> Position {
        Position::new(self.x(), self.y())
    }

    /// The position with `y` growing downwards.
    pub fn real_position(&self) -> Position {
        Position::new(self.x(), -self.y())
    }

    /// Starts (or restarts) recording relative moves.
    pub fn track_changes(&mut self) {
        self.tracking = true;
        self.changes.clear();
    }

    /// Adds the recorded moves, converted back to top-down deltas, to `(x, y)`.
    pub fn apply_changes(&self, x: f32, y: f32) -> (f32, f32) {
        self.changes
            .iter()
            .fold((x, y), |(x, y), delta| (x + delta.x, y - delta.y))
    }
}
