// File: crates/panel-core/src/geometry.rs
// Summary: Rectangle math in canvas-relative coordinates: shrinking regions, placing
// adjacent strips, and partitioning a panel interior into an equally spaced grid.

use crate::error::{PanelError, Result};
use crate::panel_config::{AxSeparation, Dimensions, Margins, PanelConfig};
use crate::surface::Axes;
use crate::types::{CanvasSize, Dim, GridShape, Rect, Side};
use crate::units::cm_to_canvas_relative;

fn attached_canvas(region: &Axes) -> Result<CanvasSize> {
    region
        .canvas_size()
        .ok_or_else(|| PanelError::PreconditionFailed("axes must be attached to a canvas".into()))
}

/// Move one edge of `region` inward by `length_cm`.
///
/// `Left`/`Bottom` shift the origin and shrink the size; `Right`/`Top` only shrink the size.
pub fn shrink_region(region: &Axes, length_cm: f64, direction: Side) -> Result<Rect> {
    let canvas = attached_canvas(region)?;
    let len = cm_to_canvas_relative(&canvas, length_cm, direction.dim());
    let r = region.position();
    Ok(match direction {
        Side::Left => Rect::new(r.x0 + len, r.y0, r.width - len, r.height),
        Side::Right => Rect::new(r.x0, r.y0, r.width - len, r.height),
        Side::Bottom => Rect::new(r.x0, r.y0 + len, r.width, r.height - len),
        Side::Top => Rect::new(r.x0, r.y0, r.width, r.height - len),
    })
}

/// Rectangle of a strip `width_cm` thick placed outside `region` on `position`,
/// `separation_cm` away from it and spanning the region along the parallel axis.
pub fn adjacent_region_rect(region: &Axes, position: Side, width_cm: f64, separation_cm: f64) -> Result<Rect> {
    let canvas = attached_canvas(region)?;
    let dim = position.dim();
    let w = cm_to_canvas_relative(&canvas, width_cm, dim);
    let sep = cm_to_canvas_relative(&canvas, separation_cm, dim);
    let r = region.position();
    Ok(match position {
        Side::Left => Rect::new(r.x0 - sep - w, r.y0, w, r.height),
        Side::Right => Rect::new(r.x1() + sep, r.y0, w, r.height),
        Side::Bottom => Rect::new(r.x0, r.y0 - sep - w, r.width, w),
        Side::Top => Rect::new(r.x0, r.y1() + sep, r.width, w),
    })
}

pub fn shrink_region_named(region: &Axes, length_cm: f64, direction: &str) -> Result<Rect> {
    shrink_region(region, length_cm, direction.parse()?)
}

pub fn adjacent_region_rect_named(region: &Axes, position: &str, width_cm: f64, separation_cm: f64) -> Result<Rect> {
    adjacent_region_rect(region, position.parse()?, width_cm, separation_cm)
}

/// Cell rectangles of a panel grid. Row 0 is the top row, column 0 the left column.
#[derive(Clone, Debug, PartialEq)]
pub struct GridLayout {
    shape: GridShape,
    interior: Rect,
    cells: Vec<Rect>,
}

impl GridLayout {
    pub fn from_config(config: &PanelConfig, shape: GridShape) -> Result<Self> {
        Self::compute(
            config.panel_dimensions_cm(),
            config.panel_margins_cm(),
            config.ax_separation_cm(),
            shape,
        )
    }

    pub fn compute(dims: &Dimensions, margins: &Margins, sep: &AxSeparation, shape: GridShape) -> Result<Self> {
        for (path, extent) in [("panel_dimensions_cm.width", dims.width), ("panel_dimensions_cm.height", dims.height)] {
            if !extent.is_finite() || extent <= 0.0 {
                return Err(PanelError::invalid_value(path, format!("canvas extent must be finite and > 0, got {extent}")));
            }
        }
        let canvas = CanvasSize::from_cm(dims.width, dims.height);
        let interior_w_cm = dims.width - margins.left - margins.right;
        let interior_h_cm = dims.height - margins.top - margins.bottom;
        let (rows, cols) = (shape.rows() as f64, shape.cols() as f64);
        let cell_w_cm = (interior_w_cm - (cols - 1.0) * sep.x) / cols;
        let cell_h_cm = (interior_h_cm - (rows - 1.0) * sep.y) / rows;
        if cell_w_cm < 0.0 {
            return Err(PanelError::invalid_value(
                "panel_dimensions_cm.width",
                format!("margins and separation leave no room for {} columns", shape.cols()),
            ));
        }
        if cell_h_cm < 0.0 {
            return Err(PanelError::invalid_value(
                "panel_dimensions_cm.height",
                format!("margins and separation leave no room for {} rows", shape.rows()),
            ));
        }

        let rel_w = |cm: f64| cm_to_canvas_relative(&canvas, cm, Dim::Width);
        let rel_h = |cm: f64| cm_to_canvas_relative(&canvas, cm, Dim::Height);

        let interior = Rect::new(rel_w(margins.left), rel_h(margins.bottom), rel_w(interior_w_cm), rel_h(interior_h_cm));
        let (cell_w, cell_h) = (rel_w(cell_w_cm), rel_h(cell_h_cm));
        let (sep_x, sep_y) = (rel_w(sep.x), rel_h(sep.y));

        let mut cells = Vec::with_capacity(shape.cell_count());
        for row in 0..shape.rows() {
            // row 0 sits at the top, so count rows up from the bottom
            let from_bottom = (shape.rows() - 1 - row) as f64;
            let y0 = interior.y0 + from_bottom * (cell_h + sep_y);
            for col in 0..shape.cols() {
                let x0 = interior.x0 + col as f64 * (cell_w + sep_x);
                cells.push(Rect::new(x0, y0, cell_w, cell_h));
            }
        }
        log::debug!(
            target: "panel_core",
            "grid {}x{}: cell {:.4}x{:.4} cm inside {:.4}x{:.4} cm",
            shape.rows(), shape.cols(), cell_w_cm, cell_h_cm, interior_w_cm, interior_h_cm
        );
        Ok(Self { shape, interior, cells })
    }

    pub fn shape(&self) -> GridShape { self.shape }

    /// Canvas rectangle shrunk by all four margins.
    pub fn interior(&self) -> Rect { self.interior }

    pub fn cell(&self, row: usize, col: usize) -> Option<Rect> {
        if row >= self.shape.rows() || col >= self.shape.cols() {
            return None;
        }
        self.cells.get(row * self.shape.cols() + col).copied()
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[Rect] { &self.cells }

    pub fn rows(&self) -> impl Iterator<Item = &[Rect]> {
        self.cells.chunks(self.shape.cols())
    }
}
