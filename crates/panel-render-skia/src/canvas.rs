// File: crates/panel-render-skia/src/canvas.rs
// Summary: Skia CPU raster canvas implementing the panel-core drawing surface.

use anyhow::Result;
use skia_safe as skia;

use panel_core::error::PanelError;
use crate::output::OutputSettings;
use panel_core::{Canvas, CanvasFactory, CanvasSize, GridLines, PanelLabel, PhysicalSize, Rect, RegionId};

/// Colors used for the debug rendering of a panel.
#[derive(Clone, Copy, Debug)]
pub struct FrameStyle {
    pub background: skia::Color,
    pub frame: skia::Color,
    pub grid: skia::Color,
    pub label: skia::Color,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            background: skia::Color::WHITE,
            frame: skia::Color::from_argb(255, 40, 40, 45),
            grid: skia::Color::from_argb(255, 200, 200, 210),
            label: skia::Color::BLACK,
        }
    }
}

/// Pixel extent of a physical size at `dpi`, at least one pixel per side.
pub fn pixel_size(size: CanvasSize, dpi: f32) -> (i32, i32) {
    let px = |inches: f64| ((inches * dpi as f64).round() as i32).max(1);
    (px(size.width_in), px(size.height_in))
}

pub struct SkiaCanvas {
    size: CanvasSize,
    dpi: f32,
    style: FrameStyle,
    surface: skia::Surface,
    regions: Vec<Rect>,
}

impl SkiaCanvas {
    pub fn new(size: CanvasSize, dpi: f32, style: FrameStyle) -> Result<Self> {
        let mut surface = skia::surfaces::raster_n32_premul(pixel_size(size, dpi))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        surface.canvas().clear(style.background);
        Ok(Self { size, dpi, style, surface, regions: Vec::new() })
    }

    pub fn dpi(&self) -> f32 { self.dpi }
    pub fn pixel_size(&self) -> (i32, i32) { pixel_size(self.size, self.dpi) }
    pub fn regions(&self) -> &[Rect] { &self.regions }

    // relative coordinates have their origin bottom-left, pixels top-left
    fn to_px(&self, x: f64, y: f64) -> (f32, f32) {
        let (w, h) = self.pixel_size();
        ((x * w as f64) as f32, ((1.0 - y) * h as f64) as f32)
    }

    fn px_rect(&self, r: &Rect) -> skia::Rect {
        let (l, t) = self.to_px(r.x0, r.y1());
        let (rr, b) = self.to_px(r.x1(), r.y0);
        skia::Rect::from_ltrb(l, t, rr, b)
    }

    /// Stroke the outline of every attached region.
    pub fn draw_region_frames(&mut self) {
        let mut paint = skia::Paint::default();
        paint.set_color(self.style.frame);
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Stroke);
        paint.set_stroke_width(1.0);
        let rects: Vec<skia::Rect> = self.regions.iter().map(|r| self.px_rect(r)).collect();
        let canvas = self.surface.canvas();
        for rect in rects {
            canvas.draw_rect(rect, &paint);
        }
    }

    pub fn fill_region(&mut self, id: RegionId, color: skia::Color) -> Result<(), PanelError> {
        let rect = self
            .region_rect(id)
            .ok_or_else(|| PanelError::PreconditionFailed(format!("region {} is not attached", id.0)))?;
        let px = self.px_rect(&rect);
        let mut paint = skia::Paint::default();
        paint.set_color(color);
        paint.set_style(skia::paint::Style::Fill);
        self.surface.canvas().draw_rect(px, &paint);
        Ok(())
    }

    pub fn draw_gridlines(&mut self, lines: &GridLines) {
        let mut paint = skia::Paint::default();
        paint.set_color(self.style.grid);
        paint.set_stroke_width(1.0);
        let (w, h) = self.pixel_size();
        let (w, h) = (w as f32, h as f32);
        let xs: Vec<f32> = lines.vertical.iter().map(|&x| self.to_px(x, 0.0).0).collect();
        let ys: Vec<f32> = lines.horizontal.iter().map(|&y| self.to_px(0.0, y).1).collect();
        let canvas = self.surface.canvas();
        for x in xs {
            canvas.draw_line((x, 0.0), (x, h), &paint);
        }
        for y in ys {
            canvas.draw_line((0.0, y), (w, y), &paint);
        }
    }

    /// Draw a label with its top-left corner at the label's anchor.
    pub fn draw_label(&mut self, label: &PanelLabel) {
        let size_px = (label.fontsize_pt / 72.0 * self.dpi as f64) as f32;
        let mut font = skia::Font::default();
        font.set_size(size_px.max(1.0));
        font.set_embolden(label.bold);
        let mut paint = skia::Paint::default();
        paint.set_color(self.style.label);
        paint.set_anti_alias(true);
        let (x, y) = self.to_px(label.x, label.y);
        // baseline sits roughly one cap height below the top anchor
        self.surface.canvas().draw_str(&label.text, (x, y + size_px * 0.8), &font, &paint);
    }

    pub fn encode_png(&mut self) -> Result<Vec<u8>> {
        let image = self.surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }
}

impl PhysicalSize for SkiaCanvas {
    fn size_inches(&self) -> CanvasSize { self.size }
}

impl Canvas for SkiaCanvas {
    fn attach_region(&mut self, rect: Rect) -> RegionId {
        self.regions.push(rect);
        RegionId(self.regions.len() - 1)
    }

    fn region_rect(&self, id: RegionId) -> Option<Rect> {
        self.regions.get(id.0).copied()
    }

    fn set_region_rect(&mut self, id: RegionId, rect: Rect) -> Result<(), PanelError> {
        let slot = self
            .regions
            .get_mut(id.0)
            .ok_or_else(|| PanelError::PreconditionFailed(format!("region {} is not attached", id.0)))?;
        *slot = rect;
        Ok(())
    }
}

/// Creates [`SkiaCanvas`]es at a fixed resolution.
#[derive(Clone, Copy, Debug)]
pub struct SkiaBackend {
    pub dpi: f32,
    pub style: FrameStyle,
}

impl SkiaBackend {
    pub fn new(dpi: f32) -> Self {
        Self { dpi, style: FrameStyle::default() }
    }

    /// Backend rendering at the resolution requested by `panel_output.dpi`.
    pub fn from_settings(settings: &OutputSettings) -> Self {
        Self::new(settings.dpi)
    }
}

impl Default for SkiaBackend {
    fn default() -> Self { Self::new(300.0) }
}

impl CanvasFactory for SkiaBackend {
    type Canvas = SkiaCanvas;

    fn create_canvas(&mut self, size: CanvasSize) -> Result<SkiaCanvas> {
        let canvas = SkiaCanvas::new(size, self.dpi, self.style)?;
        log::debug!(target: "panel_render_skia", "raster surface {:?} px at {} dpi", canvas.pixel_size(), self.dpi);
        Ok(canvas)
    }
}
