// File: crates/panel-core/src/gridlines.rs
// Summary: Debug grid with a fixed physical spacing, for checking element placement by eye.

use crate::config::ConfigMapping;
use crate::error::{PanelError, Result};
use crate::surface::PhysicalSize;
use crate::types::Dim;
use crate::units::{cm_to_canvas_relative, inches_to_cm};

const KEY: &str = "debug_panel";
const MAX_LINES: f64 = 100_000.0;

/// Settings of the `debug_panel` section.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DebugGrid {
    pub show: bool,
    pub grid_res_cm: f64,
}

impl Default for DebugGrid {
    fn default() -> Self {
        Self { show: false, grid_res_cm: 0.5 }
    }
}

impl DebugGrid {
    pub fn from_mapping(data: &ConfigMapping) -> Result<Self> {
        let mut grid = Self::default();
        let Some(section) = data.get(KEY) else {
            return Ok(grid);
        };
        let map = section
            .as_map()
            .ok_or_else(|| PanelError::invalid_value(KEY, "expected a table"))?;
        for (key, value) in map.iter() {
            let path = format!("{KEY}.{key}");
            match key {
                "show" => {
                    grid.show = value
                        .as_bool()
                        .ok_or_else(|| PanelError::invalid_value(&path, "expected a bool"))?
                }
                "grid_res_cm" => {
                    grid.grid_res_cm = value
                        .as_f64()
                        .ok_or_else(|| PanelError::invalid_value(&path, "expected a number"))?
                }
                _ => return Err(PanelError::UnexpectedField(path)),
            }
        }
        Ok(grid)
    }

    pub fn lines<C: PhysicalSize + ?Sized>(&self, canvas: &C) -> Result<GridLines> {
        grid_lines(canvas, self.grid_res_cm)
    }
}

/// Canvas-relative positions of vertical (x) and horizontal (y) debug lines.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridLines {
    pub vertical: Vec<f64>,
    pub horizontal: Vec<f64>,
}

/// Lines every `res_cm` from the canvas origin up to and including its far edge.
pub fn grid_lines<C: PhysicalSize + ?Sized>(canvas: &C, res_cm: f64) -> Result<GridLines> {
    if res_cm.is_nan() || res_cm <= 0.0 {
        return Err(PanelError::invalid_value(format!("{KEY}.grid_res_cm"), format!("must be > 0, got {res_cm}")));
    }
    let mut counts = [0usize; 2];
    for (slot, dim) in counts.iter_mut().zip(Dim::ALL) {
        let steps = (inches_to_cm(canvas.size_inches().along(dim)) / res_cm + 1e-9).floor();
        if !steps.is_finite() || steps > MAX_LINES {
            return Err(PanelError::invalid_value(
                format!("{KEY}.grid_res_cm"),
                format!("{res_cm} cm yields more than {MAX_LINES} lines along {dim}"),
            ));
        }
        *slot = steps.max(0.0) as usize;
    }
    let positions = |count: usize, dim: Dim| {
        (0..=count)
            .map(|k| cm_to_canvas_relative(canvas, k as f64 * res_cm, dim))
            .collect::<Vec<_>>()
    };
    Ok(GridLines { vertical: positions(counts[0], Dim::Width), horizontal: positions(counts[1], Dim::Height) })
}
