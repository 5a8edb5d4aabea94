// File: crates/panel-core/src/types.rs
// Summary: Shared value types (relative rectangles, physical canvas size, axis/side enums, grid shape).

use std::fmt;
use std::str::FromStr;

use crate::error::PanelError;
use crate::units::cm_to_inches;

/// Axis-aligned rectangle in relative [0, 1] coordinates, origin at the bottom-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Rectangle covering the whole canvas.
    pub const FULL: Rect = Rect::new(0.0, 0.0, 1.0, 1.0);

    pub const fn new(x0: f64, y0: f64, width: f64, height: f64) -> Self {
        Self { x0, y0, width, height }
    }
    pub fn x1(&self) -> f64 { self.x0 + self.width }
    pub fn y1(&self) -> f64 { self.y0 + self.height }

    /// Returns true if the two rectangles share interior area.
    pub fn overlaps(&self, other: &Rect, tol: f64) -> bool {
        self.x0 < other.x1() - tol
            && other.x0 < self.x1() - tol
            && self.y0 < other.y1() - tol
            && other.y0 < self.y1() - tol
    }
}

/// Physical size of a canvas, in inches.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasSize {
    pub width_in: f64,
    pub height_in: f64,
}

impl CanvasSize {
    pub const fn from_inches(width_in: f64, height_in: f64) -> Self {
        Self { width_in, height_in }
    }

    pub fn from_cm(width_cm: f64, height_cm: f64) -> Self {
        Self { width_in: cm_to_inches(width_cm), height_in: cm_to_inches(height_cm) }
    }

    /// Extent along `dim`, in inches.
    pub fn along(&self, dim: Dim) -> f64 {
        match dim {
            Dim::Width => self.width_in,
            Dim::Height => self.height_in,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dim {
    Width,
    Height,
}

impl Dim {
    pub const ALL: [Dim; 2] = [Dim::Width, Dim::Height];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dim::Width => "width",
            Dim::Height => "height",
        }
    }
}

impl FromStr for Dim {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "width" => Ok(Dim::Width),
            "height" => Ok(Dim::Height),
            other => Err(PanelError::InvalidArgument(format!(
                "invalid dimension '{other}', must be one of: width, height"
            ))),
        }
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side of a rectangle. Used both as a shrink direction and as a placement position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Bottom,
    Top,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Bottom, Side::Top];

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Top => "top",
        }
    }

    /// The dimension a length measured across this side runs along.
    pub fn dim(&self) -> Dim {
        match self {
            Side::Left | Side::Right => Dim::Width,
            Side::Bottom | Side::Top => Dim::Height,
        }
    }
}

impl FromStr for Side {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            "bottom" => Ok(Side::Bottom),
            "top" => Ok(Side::Top),
            other => Err(PanelError::InvalidArgument(format!(
                "invalid side '{other}', must be one of: left, right, bottom, top"
            ))),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rows and columns of a panel's axes grid.
/// Contract: both are at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridShape {
    rows: usize,
    cols: usize,
}

impl GridShape {
    pub fn new(rows: usize, cols: usize) -> Result<Self, PanelError> {
        if rows == 0 || cols == 0 {
            return Err(PanelError::InvalidArgument(format!(
                "grid shape must have at least one row and one column, got {rows}x{cols}"
            )));
        }
        Ok(Self { rows, cols })
    }
    pub const fn rows(&self) -> usize { self.rows }
    pub const fn cols(&self) -> usize { self.cols }
    pub const fn cell_count(&self) -> usize { self.rows * self.cols }
}
