// File: crates/panel-core/src/lib.rs
// Summary: Core library entry point; physical-unit layout of multi-panel figures
// (unit conversion, grid geometry, configuration and overrides, panel orchestration).

pub mod error;
pub mod types;
pub mod units;
pub mod surface;
pub mod geometry;
pub mod config;
pub mod panel_config;
pub mod overrides;
pub mod panel;
pub mod label;
pub mod colorbar;
pub mod gridlines;

pub use error::PanelError;
pub use types::{CanvasSize, Dim, GridShape, Rect, Side};
pub use surface::{Axes, Canvas, CanvasFactory, Figure, MemoryBackend, PhysicalSize, RegionId, SubFigure};
pub use geometry::{adjacent_region_rect, shrink_region, GridLayout};
pub use config::{ConfigMapping, ConfigValue, ConfigView};
pub use panel_config::{AxSeparation, Dimensions, FontSizes, Margins, PanelConfig};
pub use overrides::{merge_overrides, Directive};
pub use panel::{AxesGrid, PanelBuilder, PanelContext, PanelDefinition};
pub use label::{place_label, LabelStyle, PanelLabel};
pub use colorbar::{place_colorbar, ColorbarPlacement};
pub use gridlines::{grid_lines, DebugGrid, GridLines};
