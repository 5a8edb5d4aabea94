// File: crates/panel-render-skia/src/output.rs
// Summary: Writing built panels to disk according to the `panel_output` section.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};

use panel_core::error::PanelError;
use panel_core::{ConfigMapping, ConfigValue};

use crate::canvas::SkiaCanvas;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            other => Err(PanelError::InvalidArgument(format!("unsupported output format '{other}', expected: png"))),
        }
    }
}

/// Where and how panels are written.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputSettings {
    pub directory: PathBuf,
    pub format: ImageFormat,
    pub dpi: f32,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self { directory: PathBuf::from("."), format: ImageFormat::Png, dpi: 300.0 }
    }
}

impl OutputSettings {
    /// Read the optional `panel_output` section; absent fields keep their defaults.
    pub fn from_mapping(data: &ConfigMapping) -> Result<Self, PanelError> {
        let mut settings = Self::default();
        let Some(section) = data.get("panel_output") else {
            return Ok(settings);
        };
        let map = section
            .as_map()
            .ok_or_else(|| invalid("panel_output", "expected a table", section))?;
        for (key, value) in map.iter() {
            let path = format!("panel_output.{key}");
            match key {
                "directory" => {
                    settings.directory = value
                        .as_str()
                        .map(PathBuf::from)
                        .ok_or_else(|| invalid(&path, "expected a string", value))?
                }
                "format" => {
                    settings.format = value
                        .as_str()
                        .ok_or_else(|| invalid(&path, "expected a string", value))?
                        .parse()?
                }
                "dpi" => {
                    let dpi = value.as_f64().ok_or_else(|| invalid(&path, "expected a number", value))?;
                    if dpi <= 0.0 || dpi.is_nan() {
                        return Err(invalid(&path, "must be > 0", value));
                    }
                    settings.dpi = dpi as f32;
                }
                _ => return Err(PanelError::UnexpectedField(path)),
            }
        }
        Ok(settings)
    }

    /// `<directory>/<name>[_<suffix>].<ext>`
    pub fn file_path(&self, name: &str, suffix: Option<&str>) -> PathBuf {
        let stem = match suffix {
            Some(s) => format!("{name}_{s}"),
            None => name.to_owned(),
        };
        self.directory.join(format!("{stem}.{}", self.format.extension()))
    }
}

fn invalid(path: &str, expected: &str, found: &ConfigValue) -> PanelError {
    PanelError::InvalidValue { path: path.to_owned(), reason: format!("{expected}, found {}", found.type_name()) }
}

/// Encode `canvas` and write it under `settings.directory`, creating the directory if needed.
///
/// The pixel resolution is fixed when the canvas is created; build it through
/// [`SkiaBackend::from_settings`](crate::SkiaBackend::from_settings) to honor `settings.dpi`.
pub fn save_panel(canvas: &mut SkiaCanvas, settings: &OutputSettings, name: &str, suffix: Option<&str>) -> Result<PathBuf> {
    let path = settings.file_path(name, suffix);
    let bytes = match settings.format {
        ImageFormat::Png => canvas.encode_png()?,
    };
    write_bytes(&path, &bytes)?;
    log::debug!(target: "panel_render_skia", "wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(path)
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("failed to create '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("failed to write '{}'", path.display()))
}
