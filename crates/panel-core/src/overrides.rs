// File: crates/panel-core/src/overrides.rs
// Summary: Merge nested override mappings into a base configuration, with relative
// arithmetic directives ("=X", "+=X", "-=X", "*X") on numeric leaves.

use std::str::FromStr;

use crate::config::{ConfigMapping, ConfigValue};
use crate::error::{PanelError, Result};

/// A relative update to a numeric leaf.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Directive {
    Set(f64),
    Add(f64),
    Sub(f64),
    Mul(f64),
}

impl Directive {
    pub fn apply(self, current: f64) -> f64 {
        match self {
            Directive::Set(v) => v,
            Directive::Add(v) => current + v,
            Directive::Sub(v) => current - v,
            Directive::Mul(v) => current * v,
        }
    }
}

impl FromStr for Directive {
    type Err = PanelError;

    /// A plain number parses as [`Directive::Set`].
    fn from_str(raw: &str) -> Result<Self> {
        let operand = |s: &str| {
            s.trim()
                .parse::<f64>()
                .map_err(|_| PanelError::InvalidOverrideFormat(raw.to_owned()))
        };
        if let Some(rest) = raw.strip_prefix("+=") {
            Ok(Directive::Add(operand(rest)?))
        } else if let Some(rest) = raw.strip_prefix("-=") {
            Ok(Directive::Sub(operand(rest)?))
        } else if let Some(rest) = raw.strip_prefix('*') {
            Ok(Directive::Mul(operand(rest)?))
        } else if let Some(rest) = raw.strip_prefix('=') {
            Ok(Directive::Set(operand(rest)?))
        } else {
            Ok(Directive::Set(operand(raw)?))
        }
    }
}

/// Shape of an update leaf, decided without looking at the base value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LeafUpdate<'a> {
    Number(&'a ConfigValue),
    DirectiveString(&'a str),
    Opaque(&'a ConfigValue),
}

pub fn classify(update: &ConfigValue) -> LeafUpdate<'_> {
    match update {
        ConfigValue::Integer(_) | ConfigValue::Number(_) => LeafUpdate::Number(update),
        ConfigValue::String(s) => LeafUpdate::DirectiveString(s),
        _ => LeafUpdate::Opaque(update),
    }
}

/// Resolve an update leaf against the current base leaf.
///
/// Numeric base leaves accept numbers and directive strings only. Any other base
/// leaf is replaced by the update as given.
fn interpret(update: &ConfigValue, current: &ConfigValue) -> Result<ConfigValue> {
    let Some(current_num) = current.as_f64() else {
        return Ok(update.clone());
    };
    match classify(update) {
        LeafUpdate::Number(v) => Ok(v.clone()),
        LeafUpdate::DirectiveString(raw) => {
            let directive: Directive = raw.parse()?;
            Ok(ConfigValue::Number(directive.apply(current_num)))
        }
        LeafUpdate::Opaque(v) => Err(PanelError::InvalidOverrideFormat(v.to_string())),
    }
}

fn merge_level(base: &ConfigMapping, updates: &ConfigMapping, prefix: &str) -> Result<ConfigMapping> {
    let mut result = base.clone();
    for (key, update) in updates.iter() {
        let path = if prefix.is_empty() { key.to_owned() } else { format!("{prefix}.{key}") };
        let slot = result
            .get_mut(key)
            .ok_or_else(|| PanelError::UnknownKey(path.clone()))?;
        let merged = match (&*slot, update) {
            (ConfigValue::Map(b), ConfigValue::Map(u)) => ConfigValue::Map(merge_level(b, u, &path)?),
            (current, update) => interpret(update, current)?,
        };
        log::trace!(target: "panel_core", "override {path}: {slot} -> {merged}");
        *slot = merged;
    }
    Ok(result)
}

/// Merge `updates` into a copy of `base`. Neither input is modified.
///
/// Every key in `updates`, at every depth, must already exist in `base`.
pub fn merge_overrides(base: &ConfigMapping, updates: &ConfigMapping) -> Result<ConfigMapping> {
    let merged = merge_level(base, updates, "")?;
    log::debug!(target: "panel_core", "applied {} top-level override(s)", updates.len());
    Ok(merged)
}
