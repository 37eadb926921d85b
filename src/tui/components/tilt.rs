//! # Tilt
//!
//! Pointer-relative "3D" tilt for cards. The rotation is computed the way a
//! perspective transform would be (±5° on each axis, zero at the centre), then
//! approximated in cells: a one-column lean plus a glare spot on the top edge.

use ratatui::layout::{Position, Rect};

/// Maximum rotation on either axis, in degrees.
pub const MAX_TILT_DEG: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    /// Rotation around the horizontal axis; positive leans the top away.
    pub rotate_x: f32,
    /// Rotation around the vertical axis; positive leans right.
    pub rotate_y: f32,
    /// Glare position as a percentage of the card width.
    pub glare_x: f32,
    /// Glare position as a percentage of the card height.
    pub glare_y: f32,
}

impl Tilt {
    /// Tilt for a pointer at (`column`, `row`), or `None` when the pointer is
    /// outside `area`.
    pub fn at(area: Rect, column: u16, row: u16) -> Option<Tilt> {
        if area.is_empty() || !area.contains(Position::new(column, row)) {
            return None;
        }
        // Measure from the cell centre.
        let x = (column - area.x) as f32 + 0.5;
        let y = (row - area.y) as f32 + 0.5;
        let width = area.width as f32;
        let height = area.height as f32;
        let center_x = width / 2.0;
        let center_y = height / 2.0;

        Some(Tilt {
            rotate_x: (y - center_y) / center_y * -MAX_TILT_DEG,
            rotate_y: (x - center_x) / center_x * MAX_TILT_DEG,
            glare_x: x / width * 100.0,
            glare_y: y / height * 100.0,
        })
    }

    /// Horizontal lean in cells: -1, 0 or 1.
    pub fn lean(&self) -> i16 {
        if self.rotate_y > MAX_TILT_DEG / 2.0 {
            1
        } else if self.rotate_y < -MAX_TILT_DEG / 2.0 {
            -1
        } else {
            0
        }
    }

    /// Screen column of the glare spot within `area`.
    pub fn glare_column(&self, area: Rect) -> u16 {
        let offset = (self.glare_x / 100.0 * area.width as f32) as u16;
        area.x + offset.min(area.width.saturating_sub(1))
    }

    /// Apply the lean to `area`, giving up one column on the trailing side.
    pub fn lean_area(&self, area: Rect) -> Rect {
        if area.width < 2 {
            return area;
        }
        match self.lean() {
            1 => Rect {
                x: area.x + 1,
                width: area.width - 1,
                ..area
            },
            -1 => Rect {
                width: area.width - 1,
                ..area
            },
            _ => area,
        }
    }
}
