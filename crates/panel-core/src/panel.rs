// File: crates/panel-core/src/panel.rs
// Summary: Panel orchestration: create the canvas, attach one region per grid cell and
// hand the grid to a caller-supplied drawing routine.

use std::ops::Index;

use anyhow::Context;

use crate::config::ConfigMapping;
use crate::error::{PanelError, Result};
use crate::geometry::{shrink_region, GridLayout};
use crate::panel_config::PanelConfig;
use crate::surface::{Axes, Canvas, CanvasFactory};
use crate::types::{CanvasSize, GridShape, Rect, Side};

/// Regions of a built panel, indexed `[(row, col)]` with row 0 at the top.
#[derive(Clone, Debug, PartialEq)]
pub struct AxesGrid {
    shape: GridShape,
    axes: Vec<Axes>,
}

impl AxesGrid {
    pub fn shape(&self) -> GridShape { self.shape }

    pub fn get(&self, row: usize, col: usize) -> Option<&Axes> {
        if row >= self.shape.rows() || col >= self.shape.cols() {
            return None;
        }
        self.axes.get(row * self.shape.cols() + col)
    }

    fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Axes> {
        if row >= self.shape.rows() || col >= self.shape.cols() {
            return None;
        }
        self.axes.get_mut(row * self.shape.cols() + col)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Axes]> {
        self.axes.chunks(self.shape.cols())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Axes> {
        self.axes.iter()
    }
}

impl Index<(usize, usize)> for AxesGrid {
    type Output = Axes;
    fn index(&self, (row, col): (usize, usize)) -> &Axes {
        &self.axes[row * self.shape.cols() + col]
    }
}

/// What a drawing routine gets to work with.
pub struct PanelContext<'a, C: Canvas> {
    pub canvas: &'a mut C,
    pub axs: &'a mut AxesGrid,
    pub config: &'a PanelConfig,
}

impl<C: Canvas> PanelContext<'_, C> {
    fn cell(&self, row: usize, col: usize) -> Result<Axes> {
        self.axs.get(row, col).copied().ok_or_else(|| {
            PanelError::InvalidArgument(format!("no axes at ({row}, {col}) in a {}x{} grid", self.axs.shape().rows(), self.axs.shape().cols()))
        })
    }

    /// Move the axes at `(row, col)` to `rect`, on the canvas and in the grid.
    pub fn set_axes_position(&mut self, row: usize, col: usize, rect: Rect) -> Result<Axes> {
        let axes = self.cell(row, col)?;
        if let Some(id) = axes.id() {
            self.canvas.set_region_rect(id, rect)?;
        }
        let moved = axes.with_position(rect);
        if let Some(slot) = self.axs.get_mut(row, col) {
            *slot = moved;
        }
        Ok(moved)
    }

    /// Shrink the axes at `(row, col)` by `length_cm` from `direction`.
    pub fn shrink_axes(&mut self, row: usize, col: usize, length_cm: f64, direction: Side) -> Result<Axes> {
        let axes = self.cell(row, col)?;
        let rect = shrink_region(&axes, length_cm, direction)?;
        self.set_axes_position(row, col, rect)
    }

    /// Attach an extra region at `rect` that is not part of the grid.
    pub fn attach(&mut self, rect: Rect) -> Axes {
        let id = self.canvas.attach_region(rect);
        self.canvas.region(id).unwrap_or_else(|| Axes::detached(rect))
    }

    /// Region covering the whole canvas, for annotating anywhere in canvas coordinates.
    pub fn full_canvas_axes(&mut self) -> Axes {
        self.attach(Rect::FULL)
    }
}

/// A concrete panel: its grid shape and how to draw into it.
pub trait PanelDefinition<C: Canvas> {
    /// Base name used when the panel is written out.
    fn name(&self) -> &str;
    fn n_rows(&self) -> usize;
    fn n_cols(&self) -> usize;

    /// Draw into the prepared grid. May return a suffix distinguishing this output
    /// from other builds of the same panel.
    fn build_panel(&mut self, ctx: &mut PanelContext<'_, C>, params: &ConfigMapping) -> anyhow::Result<Option<String>>;
}

struct Built<C> {
    canvas: C,
    axs: AxesGrid,
    suffix: Option<String>,
}

pub struct PanelBuilder<D, F: CanvasFactory> {
    definition: D,
    config: PanelConfig,
    shape: GridShape,
    factory: F,
    built: Option<Built<F::Canvas>>,
}

impl<D, F> PanelBuilder<D, F>
where
    F: CanvasFactory,
    D: PanelDefinition<F::Canvas>,
{
    /// Fails with [`PanelError::InvalidArgument`] if the definition declares an empty grid.
    pub fn new(definition: D, config: PanelConfig, factory: F) -> Result<Self> {
        let shape = GridShape::new(definition.n_rows(), definition.n_cols())?;
        Ok(Self { definition, config, shape, factory, built: None })
    }

    pub fn from_mapping(definition: D, data: &ConfigMapping, factory: F) -> Result<Self> {
        Self::new(definition, PanelConfig::from_mapping(data)?, factory)
    }

    pub fn config(&self) -> &PanelConfig { &self.config }
    pub fn definition(&self) -> &D { &self.definition }
    pub fn shape(&self) -> GridShape { self.shape }

    pub fn layout(&self) -> Result<GridLayout> {
        GridLayout::from_config(&self.config, self.shape)
    }

    /// Create the canvas, attach the grid and run the drawing routine.
    /// Each call starts from a fresh canvas.
    pub fn build(&mut self, params: &ConfigMapping) -> anyhow::Result<&F::Canvas> {
        let dims = self.config.panel_dimensions_cm();
        let size = CanvasSize::from_cm(dims.width, dims.height);
        let layout = self.layout()?;

        let mut canvas = self
            .factory
            .create_canvas(size)
            .with_context(|| format!("failed to create {:.2}x{:.2} cm canvas for panel '{}'", dims.width, dims.height, self.definition.name()))?;
        log::debug!(target: "panel_core", "panel '{}': canvas {:.3}x{:.3} in", self.definition.name(), size.width_in, size.height_in);

        let mut axes = Vec::with_capacity(self.shape.cell_count());
        for rect in layout.cells() {
            let id = canvas.attach_region(*rect);
            let region = canvas
                .region(id)
                .ok_or_else(|| PanelError::PreconditionFailed(format!("canvas lost region {}", id.0)))?;
            axes.push(region);
        }
        let mut axs = AxesGrid { shape: self.shape, axes };

        let suffix = {
            let mut ctx = PanelContext { canvas: &mut canvas, axs: &mut axs, config: &self.config };
            self.definition
                .build_panel(&mut ctx, params)
                .with_context(|| format!("drawing panel '{}' failed", self.definition.name()))?
        };
        log::debug!(target: "panel_core", "panel '{}' built (suffix: {:?})", self.definition.name(), suffix);

        let built = self.built.insert(Built { canvas, axs, suffix });
        Ok(&built.canvas)
    }

    pub fn canvas(&self) -> Result<&F::Canvas> {
        self.built.as_ref().map(|b| &b.canvas).ok_or(PanelError::NotYetBuilt("canvas"))
    }

    pub fn canvas_mut(&mut self) -> Result<&mut F::Canvas> {
        self.built.as_mut().map(|b| &mut b.canvas).ok_or(PanelError::NotYetBuilt("canvas"))
    }

    pub fn axs_grid(&self) -> Result<&AxesGrid> {
        self.built.as_ref().map(|b| &b.axs).ok_or(PanelError::NotYetBuilt("axes grid"))
    }

    /// Suffix returned by the last drawing routine, if any.
    pub fn suffix(&self) -> Result<Option<&str>> {
        self.built
            .as_ref()
            .map(|b| b.suffix.as_deref())
            .ok_or(PanelError::NotYetBuilt("output suffix"))
    }

    /// Output file stem: the panel name, plus `_<suffix>` when the build returned one.
    pub fn output_stem(&self) -> Result<String> {
        let name = self.definition.name();
        Ok(match self.suffix()? {
            Some(s) => format!("{name}_{s}"),
            None => name.to_owned(),
        })
    }

    pub fn into_canvas(self) -> Result<F::Canvas> {
        self.built.map(|b| b.canvas).ok_or(PanelError::NotYetBuilt("canvas"))
    }
}
