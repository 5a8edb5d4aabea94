// File: crates/panel-core/src/surface.rs
// Summary: Drawing-surface abstraction (canvas creation, region attachment, size queries)
// plus an in-memory canvas used when no rendering backend is needed.

use crate::error::{PanelError, Result};
use crate::types::{CanvasSize, Rect};

/// Anything that knows its physical size on the page.
pub trait PhysicalSize {
    fn size_inches(&self) -> CanvasSize;
}

impl PhysicalSize for CanvasSize {
    fn size_inches(&self) -> CanvasSize { *self }
}

/// Handle to a region attached to a canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegionId(pub usize);

/// A drawing surface with a physical size onto which rectangular regions are attached.
/// Backends implement this; the layout code depends on nothing else.
pub trait Canvas: PhysicalSize {
    fn attach_region(&mut self, rect: Rect) -> RegionId;
    fn region_rect(&self, id: RegionId) -> Option<Rect>;
    fn set_region_rect(&mut self, id: RegionId, rect: Rect) -> Result<()>;

    /// Snapshot of an attached region, usable with the unit conversion helpers.
    fn region(&self, id: RegionId) -> Option<Axes> {
        self.region_rect(id).map(|rect| Axes {
            id: Some(id),
            rect,
            canvas: Some(self.size_inches()),
        })
    }
}

/// Creates canvases of a requested physical size.
pub trait CanvasFactory {
    type Canvas: Canvas;
    fn create_canvas(&mut self, size: CanvasSize) -> anyhow::Result<Self::Canvas>;
}

/// A region's rectangle together with the size of the canvas it lives on.
/// `canvas` is `None` for a region that was never attached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Axes {
    id: Option<RegionId>,
    rect: Rect,
    canvas: Option<CanvasSize>,
}

impl Axes {
    pub fn detached(rect: Rect) -> Self {
        Self { id: None, rect, canvas: None }
    }

    pub fn id(&self) -> Option<RegionId> { self.id }
    pub fn position(&self) -> Rect { self.rect }
    pub fn canvas_size(&self) -> Option<CanvasSize> { self.canvas }

    /// Same region, moved to `rect`. Does not touch the canvas.
    pub fn with_position(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }
}

/// Logical sub-area of a canvas. Its physical size is the parent's.
pub struct SubFigure<'a, P: PhysicalSize + ?Sized> {
    parent: &'a P,
    pub rect: Rect,
}

impl<'a, P: PhysicalSize + ?Sized> SubFigure<'a, P> {
    pub fn new(parent: &'a P, rect: Rect) -> Self {
        Self { parent, rect }
    }
}

impl<P: PhysicalSize + ?Sized> PhysicalSize for SubFigure<'_, P> {
    fn size_inches(&self) -> CanvasSize {
        self.parent.size_inches()
    }
}

/// Canvas that only records geometry.
#[derive(Clone, Debug)]
pub struct Figure {
    size: CanvasSize,
    regions: Vec<Rect>,
}

impl Figure {
    pub fn new(size: CanvasSize) -> Self {
        Self { size, regions: Vec::new() }
    }

    pub fn regions(&self) -> &[Rect] { &self.regions }
}

impl PhysicalSize for Figure {
    fn size_inches(&self) -> CanvasSize { self.size }
}

impl Canvas for Figure {
    fn attach_region(&mut self, rect: Rect) -> RegionId {
        self.regions.push(rect);
        RegionId(self.regions.len() - 1)
    }

    fn region_rect(&self, id: RegionId) -> Option<Rect> {
        self.regions.get(id.0).copied()
    }

    fn set_region_rect(&mut self, id: RegionId, rect: Rect) -> Result<()> {
        match self.regions.get_mut(id.0) {
            Some(slot) => {
                *slot = rect;
                Ok(())
            }
            None => Err(PanelError::PreconditionFailed(format!("region {} is not attached", id.0))),
        }
    }
}

/// Factory for [`Figure`].
#[derive(Clone, Copy, Debug, Default)]
pub struct MemoryBackend;

impl CanvasFactory for MemoryBackend {
    type Canvas = Figure;

    fn create_canvas(&mut self, size: CanvasSize) -> anyhow::Result<Figure> {
        Ok(Figure::new(size))
    }
}
