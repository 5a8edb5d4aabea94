// File: crates/panel-core/src/label.rs
// Summary: Panel labels ("a", "(B)", ...) placed just outside the top-left corner of an axes.

use crate::config::{ConfigMapping, ConfigValue};
use crate::error::{PanelError, Result};
use crate::panel_config::PanelConfig;
use crate::surface::Axes;
use crate::types::Dim;
use crate::units::cm_to_canvas_relative;

/// Label formatting read from the `features.label` section.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelStyle {
    /// Offset to the left of the axes' left edge.
    pub x_cm: f64,
    /// Offset above the axes' top edge.
    pub y_cm: f64,
    pub bold: bool,
    pub caps: bool,
    pub prefix: String,
    pub suffix: String,
    pub fontsize_pt: f64,
}

impl LabelStyle {
    pub fn defaults(config: &PanelConfig) -> Self {
        Self {
            x_cm: 0.5,
            y_cm: 0.5,
            bold: true,
            caps: false,
            prefix: String::new(),
            suffix: String::new(),
            fontsize_pt: config.font_sizes_pt().text,
        }
    }

    /// Defaults overlaid with whatever `features.label` sets in `data`.
    pub fn from_mapping(data: &ConfigMapping, config: &PanelConfig) -> Result<Self> {
        let mut style = Self::defaults(config);
        if let Some(features) = data.get("features") {
            if features.as_map().is_none() {
                return Err(PanelError::invalid_value(
                    "features",
                    format!("expected a table, found {}", features.type_name()),
                ));
            }
        }
        let Some(section) = data.get_path("features.label") else {
            return Ok(style);
        };
        let map = section
            .as_map()
            .ok_or_else(|| PanelError::invalid_value("features.label", "expected a table"))?;
        for (key, value) in map.iter() {
            let path = format!("features.label.{key}");
            match key {
                "x_cm" => style.x_cm = number(&path, value)?,
                "y_cm" => style.y_cm = number(&path, value)?,
                "fontsize_pt" => style.fontsize_pt = number(&path, value)?,
                "bold" => style.bold = flag(&path, value)?,
                "caps" => style.caps = flag(&path, value)?,
                "prefix" => style.prefix = text(&path, value)?,
                "suffix" => style.suffix = text(&path, value)?,
                _ => return Err(PanelError::UnexpectedField(path)),
            }
        }
        Ok(style)
    }

    /// Apply case and affixes to a label.
    pub fn format(&self, label: &str) -> String {
        let body = if self.caps { label.to_uppercase() } else { label.to_lowercase() };
        format!("{}{}{}", self.prefix, body, self.suffix)
    }
}

fn number(path: &str, v: &ConfigValue) -> Result<f64> {
    v.as_f64().ok_or_else(|| PanelError::invalid_value(path, format!("expected a number, found {}", v.type_name())))
}

fn flag(path: &str, v: &ConfigValue) -> Result<bool> {
    v.as_bool().ok_or_else(|| PanelError::invalid_value(path, format!("expected a bool, found {}", v.type_name())))
}

fn text(path: &str, v: &ConfigValue) -> Result<String> {
    v.as_str()
        .map(str::to_owned)
        .ok_or_else(|| PanelError::invalid_value(path, format!("expected a string, found {}", v.type_name())))
}

/// A label ready to draw. `(x, y)` is the top-left anchor in canvas-relative coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub fontsize_pt: f64,
    pub bold: bool,
}

pub fn place_label(axes: &Axes, label: &str, style: &LabelStyle) -> Result<PanelLabel> {
    let canvas = axes
        .canvas_size()
        .ok_or_else(|| PanelError::PreconditionFailed("axes must be attached to a canvas".into()))?;
    let pos = axes.position();
    Ok(PanelLabel {
        text: style.format(label),
        x: pos.x0 - cm_to_canvas_relative(&canvas, style.x_cm, Dim::Width),
        y: pos.y1() + cm_to_canvas_relative(&canvas, style.y_cm, Dim::Height),
        fontsize_pt: style.fontsize_pt,
        bold: style.bold,
    })
}
