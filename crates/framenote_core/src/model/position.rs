//! Frame layout position.
//!
//! Opaque presentation payload: persisted and round-tripped, never searched.

use serde::{Deserialize, Serialize};

/// 2D integer position of a frame on the editor canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Parses one coordinate from user text.
    ///
    /// Returns `None` for blank or non-numeric input.
    pub fn parse_axis(text: &str) -> Option<i32> {
        text.trim().parse::<i32>().ok()
    }

    /// Applies textual coordinates, keeping the current value for any axis
    /// whose text does not parse.
    pub fn with_text(self, x_text: &str, y_text: &str) -> Self {
        Self {
            x: Self::parse_axis(x_text).unwrap_or(self.x),
            y: Self::parse_axis(y_text).unwrap_or(self.y),
        }
    }
}
