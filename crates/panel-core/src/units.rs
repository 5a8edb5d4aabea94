// File: crates/panel-core/src/units.rs
// Summary: Conversions between centimeters, inches, points and canvas/region relative coordinates.

use crate::error::{PanelError, Result};
use crate::surface::{Axes, PhysicalSize};
use crate::types::Dim;

pub const CM_PER_INCH: f64 = 2.54;
pub const POINTS_PER_INCH: f64 = 72.0;

#[inline]
pub fn cm_to_inches(cm: f64) -> f64 { cm / CM_PER_INCH }

#[inline]
pub fn inches_to_cm(inches: f64) -> f64 { inches * CM_PER_INCH }

#[inline]
pub fn cm_to_points(cm: f64) -> f64 { cm_to_inches(cm) * POINTS_PER_INCH }

/// A point is 1/72 of an inch.
#[inline]
pub fn points_to_cm(pt: f64) -> f64 { inches_to_cm(pt / POINTS_PER_INCH) }

/// Convert a length in centimeters to a fraction of the canvas extent along `dim`.
///
/// `canvas` may be a logical sub-canvas; only its physical size is consulted.
pub fn cm_to_canvas_relative<C: PhysicalSize + ?Sized>(canvas: &C, cm: f64, dim: Dim) -> f64 {
    cm_to_inches(cm) / canvas.size_inches().along(dim)
}

/// Inverse of [`cm_to_canvas_relative`].
pub fn canvas_relative_to_cm<C: PhysicalSize + ?Sized>(canvas: &C, rel: f64, dim: Dim) -> f64 {
    inches_to_cm(rel * canvas.size_inches().along(dim))
}

/// Convert a length in centimeters to a fraction of the region's own box along `dim`.
///
/// Fails with [`PanelError::PreconditionFailed`] when the region is not attached to a canvas.
pub fn cm_to_region_relative(region: &Axes, cm: f64, dim: Dim) -> Result<f64> {
    let canvas = region
        .canvas_size()
        .ok_or_else(|| PanelError::PreconditionFailed("axes must be attached to a canvas".into()))?;
    let canvas_rel = cm_to_canvas_relative(&canvas, cm, dim);
    let pos = region.position();
    Ok(match dim {
        Dim::Width => canvas_rel / pos.width,
        Dim::Height => canvas_rel / pos.height,
    })
}

/// String-keyed variants for callers holding dimension names from configuration.
pub fn cm_to_canvas_relative_named<C: PhysicalSize + ?Sized>(canvas: &C, cm: f64, dim: &str) -> Result<f64> {
    Ok(cm_to_canvas_relative(canvas, cm, dim.parse()?))
}

pub fn canvas_relative_to_cm_named<C: PhysicalSize + ?Sized>(canvas: &C, rel: f64, dim: &str) -> Result<f64> {
    Ok(canvas_relative_to_cm(canvas, rel, dim.parse()?))
}

pub fn cm_to_region_relative_named(region: &Axes, cm: f64, dim: &str) -> Result<f64> {
    cm_to_region_relative(region, cm, dim.parse()?)
}
