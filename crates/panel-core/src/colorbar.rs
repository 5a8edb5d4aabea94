// File: crates/panel-core/src/colorbar.rs
// Summary: Make room for a colorbar strip next to an axes and attach it.

use crate::error::{PanelError, Result};
use crate::geometry::{adjacent_region_rect, shrink_region};
use crate::panel::PanelContext;
use crate::surface::{Axes, Canvas};
use crate::types::{Rect, Side};

/// Host and strip rectangles for a colorbar `width_cm` thick, `separation_cm` from its axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorbarPlacement {
    pub host: Rect,
    pub strip: Rect,
}

/// Shrink the host by the strip plus gap on `position`, then place the strip beside it.
pub fn place_colorbar(axes: &Axes, position: Side, width_cm: f64, separation_cm: f64) -> Result<ColorbarPlacement> {
    let host = shrink_region(axes, width_cm + separation_cm, position)?;
    let strip = adjacent_region_rect(&axes.with_position(host), position, width_cm, separation_cm)?;
    Ok(ColorbarPlacement { host, strip })
}

impl<C: Canvas> PanelContext<'_, C> {
    /// Resize the grid axes at `(row, col)` and attach a colorbar strip beside it.
    pub fn add_colorbar(&mut self, row: usize, col: usize, position: Side, width_cm: f64, separation_cm: f64) -> Result<Axes> {
        let axes = self
            .axs
            .get(row, col)
            .copied()
            .ok_or_else(|| PanelError::InvalidArgument(format!("no axes at ({row}, {col})")))?;
        let placement = place_colorbar(&axes, position, width_cm, separation_cm)?;
        self.set_axes_position(row, col, placement.host)?;
        log::debug!(target: "panel_core", "colorbar on {position} of ({row}, {col}): {:?}", placement.strip);
        Ok(self.attach(placement.strip))
    }
}
