// File: crates/panel-core/src/panel_config.rs
// Summary: Validated, immutable panel configuration built from a loose mapping.
// Notes:
// - Only the four known top-level sections are read; other top-level keys are left
//   for features and backends. Fields inside a known section are strict.

use crate::config::{ConfigMapping, ConfigValue, ConfigView};
use crate::error::{PanelError, Result};

/// Overall panel size in centimeters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

/// Panel margins in centimeters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

/// Font sizes in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSizes {
    /// Axis labels and tick labels.
    pub axes: f64,
    /// Free text.
    pub text: f64,
}

/// Gap between adjacent axes in centimeters.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxSeparation {
    pub x: f64,
    pub y: f64,
}

/// A flat section of numeric fields. `FIELDS` pairs each field name with its default.
trait Section: Sized {
    const KEY: &'static str;
    const FIELDS: &'static [(&'static str, Option<f64>)];
    fn from_values(v: &[f64]) -> Self;
    fn values(&self) -> Vec<f64>;

    fn parse(value: &ConfigValue) -> Result<Self> {
        let map = value.as_map().ok_or_else(|| {
            PanelError::invalid_value(Self::KEY, format!("expected a table, found {}", value.type_name()))
        })?;
        if let Some(extra) = map.keys().find(|k| !Self::FIELDS.iter().any(|(f, _)| f == k)) {
            return Err(PanelError::UnexpectedField(format!("{}.{}", Self::KEY, extra)));
        }
        let mut values = Vec::with_capacity(Self::FIELDS.len());
        for (field, default) in Self::FIELDS {
            let path = format!("{}.{}", Self::KEY, field);
            let v = match (map.get(field), default) {
                (Some(v), _) => v.as_f64().ok_or_else(|| {
                    PanelError::invalid_value(&path, format!("expected a number, found {}", v.type_name()))
                })?,
                (None, Some(d)) => *d,
                (None, None) => return Err(PanelError::MissingField(path)),
            };
            if !v.is_finite() || v < 0.0 {
                return Err(PanelError::invalid_value(path, format!("must be finite and >= 0, got {v}")));
            }
            values.push(v);
        }
        Ok(Self::from_values(&values))
    }

    fn to_mapping(&self) -> ConfigMapping {
        Self::FIELDS
            .iter()
            .zip(self.values())
            .map(|((name, _), v)| ((*name).to_owned(), ConfigValue::Number(v)))
            .collect()
    }
}

impl Section for Dimensions {
    const KEY: &'static str = "panel_dimensions_cm";
    const FIELDS: &'static [(&'static str, Option<f64>)] = &[("width", None), ("height", None)];
    fn from_values(v: &[f64]) -> Self { Self { width: v[0], height: v[1] } }
    fn values(&self) -> Vec<f64> { vec![self.width, self.height] }
}

impl Section for Margins {
    const KEY: &'static str = "panel_margins_cm";
    const FIELDS: &'static [(&'static str, Option<f64>)] =
        &[("top", None), ("bottom", None), ("left", None), ("right", None)];
    fn from_values(v: &[f64]) -> Self { Self { top: v[0], bottom: v[1], left: v[2], right: v[3] } }
    fn values(&self) -> Vec<f64> { vec![self.top, self.bottom, self.left, self.right] }
}

impl Section for FontSizes {
    const KEY: &'static str = "font_sizes_pt";
    const FIELDS: &'static [(&'static str, Option<f64>)] = &[("axes", None), ("text", None)];
    fn from_values(v: &[f64]) -> Self { Self { axes: v[0], text: v[1] } }
    fn values(&self) -> Vec<f64> { vec![self.axes, self.text] }
}

impl Section for AxSeparation {
    const KEY: &'static str = "ax_separation_cm";
    const FIELDS: &'static [(&'static str, Option<f64>)] = &[("x", Some(0.0)), ("y", Some(0.0))];
    fn from_values(v: &[f64]) -> Self { Self { x: v[0], y: v[1] } }
    fn values(&self) -> Vec<f64> { vec![self.x, self.y] }
}

fn required<S: Section>(data: &ConfigMapping) -> Result<S> {
    let value = data.get(S::KEY).ok_or_else(|| PanelError::MissingField(S::KEY.to_owned()))?;
    S::parse(value)
}

/// Panel configuration. Immutable once constructed; fields are read through accessors.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelConfig {
    panel_dimensions_cm: Dimensions,
    panel_margins_cm: Margins,
    font_sizes_pt: FontSizes,
    ax_separation_cm: AxSeparation,
}

impl PanelConfig {
    /// Validate a mapping into a configuration.
    ///
    /// Requires `panel_dimensions_cm`, `panel_margins_cm` and `font_sizes_pt`;
    /// `ax_separation_cm` defaults to zero.
    pub fn from_mapping(data: &ConfigMapping) -> Result<Self> {
        let config = Self {
            panel_dimensions_cm: required(data)?,
            panel_margins_cm: required(data)?,
            font_sizes_pt: required(data)?,
            ax_separation_cm: match data.get(AxSeparation::KEY) {
                Some(v) => AxSeparation::parse(v)?,
                None => AxSeparation::default(),
            },
        };
        log::trace!(target: "panel_core", "validated panel config: {:?}", config);
        Ok(config)
    }

    pub fn panel_dimensions_cm(&self) -> &Dimensions { &self.panel_dimensions_cm }
    pub fn panel_margins_cm(&self) -> &Margins { &self.panel_margins_cm }
    pub fn font_sizes_pt(&self) -> &FontSizes { &self.font_sizes_pt }
    pub fn ax_separation_cm(&self) -> &AxSeparation { &self.ax_separation_cm }

    /// The configuration as a mapping, e.g. as the base of further overrides.
    pub fn to_mapping(&self) -> ConfigMapping {
        ConfigMapping::new()
            .with(Dimensions::KEY, self.panel_dimensions_cm.to_mapping())
            .with(Margins::KEY, self.panel_margins_cm.to_mapping())
            .with(FontSizes::KEY, self.font_sizes_pt.to_mapping())
            .with(AxSeparation::KEY, self.ax_separation_cm.to_mapping())
    }

    /// Dotted-path read access, e.g. `config.get("panel_margins_cm.left")`.
    pub fn get(&self, path: &str) -> Result<f64> {
        let (section, field) = path
            .split_once('.')
            .ok_or_else(|| PanelError::AttributeNotFound(path.to_owned()))?;
        let lookup = |fields: &[(&str, Option<f64>)], values: Vec<f64>| {
            fields.iter().position(|(f, _)| *f == field).map(|i| values[i])
        };
        let found = match section {
            s if s == Dimensions::KEY => lookup(Dimensions::FIELDS, self.panel_dimensions_cm.values()),
            s if s == Margins::KEY => lookup(Margins::FIELDS, self.panel_margins_cm.values()),
            s if s == FontSizes::KEY => lookup(FontSizes::FIELDS, self.font_sizes_pt.values()),
            s if s == AxSeparation::KEY => lookup(AxSeparation::FIELDS, self.ax_separation_cm.values()),
            _ => None,
        };
        found.ok_or_else(|| PanelError::AttributeNotFound(path.to_owned()))
    }

    pub fn view(&self) -> ConfigView {
        ConfigView::new(self.to_mapping())
    }
}

impl TryFrom<&ConfigMapping> for PanelConfig {
    type Error = PanelError;
    fn try_from(data: &ConfigMapping) -> Result<Self> {
        Self::from_mapping(data)
    }
}
