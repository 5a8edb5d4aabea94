// File: crates/panel-render-skia/src/lib.rs
// Summary: Skia renderer crate. Hosts the CPU raster drawing surface for panels and
// writes finished panels to disk.

pub mod canvas;
pub mod output;

pub use canvas::{FrameStyle, SkiaBackend, SkiaCanvas};
pub use output::{save_panel, ImageFormat, OutputSettings};

use panel_core::{ConfigMapping, DebugGrid};

/// Outline every region and, when `debug_panel.show` is set, overlay the debug grid.
pub fn draw_debug_overlay(canvas: &mut SkiaCanvas, data: &ConfigMapping) -> anyhow::Result<()> {
    let grid = DebugGrid::from_mapping(data)?;
    if grid.show {
        let lines = grid.lines(&*canvas)?;
        canvas.draw_gridlines(&lines);
    }
    canvas.draw_region_frames();
    Ok(())
}
