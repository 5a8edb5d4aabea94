// File: crates/panel-core/src/config.rs
// Summary: Loosely typed nested configuration (values, ordered mappings, TOML loading)
// and a read-only dotted-path view over it.

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{PanelError, Result};

/// A configuration leaf or nested section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Integer(i64),
    Number(f64),
    String(String),
    List(Vec<ConfigValue>),
    Map(ConfigMapping),
}

impl ConfigValue {
    /// Numeric value of an integer or float leaf.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            ConfigValue::Integer(i) => Some(i as f64),
            ConfigValue::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ConfigValue::Integer(_) | ConfigValue::Number(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            ConfigValue::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ConfigMapping> {
        match self {
            ConfigValue::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Bool(_) => "bool",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Number(_) => "float",
            ConfigValue::String(_) => "string",
            ConfigValue::List(_) => "list",
            ConfigValue::Map(_) => "table",
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(b) => write!(f, "{b}"),
            ConfigValue::Integer(i) => write!(f, "{i}"),
            ConfigValue::Number(n) => write!(f, "{n}"),
            ConfigValue::String(s) => f.write_str(s),
            ConfigValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 { f.write_str(", ")?; }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            ConfigValue::Map(m) => {
                f.write_str("{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 { f.write_str(", ")?; }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<f64> for ConfigValue {
    fn from(v: f64) -> Self { ConfigValue::Number(v) }
}
impl From<i64> for ConfigValue {
    fn from(v: i64) -> Self { ConfigValue::Integer(v) }
}
impl From<bool> for ConfigValue {
    fn from(v: bool) -> Self { ConfigValue::Bool(v) }
}
impl From<&str> for ConfigValue {
    fn from(v: &str) -> Self { ConfigValue::String(v.to_owned()) }
}
impl From<String> for ConfigValue {
    fn from(v: String) -> Self { ConfigValue::String(v) }
}
impl From<ConfigMapping> for ConfigValue {
    fn from(v: ConfigMapping) -> Self { ConfigValue::Map(v) }
}

/// Insertion-ordered string-keyed mapping of configuration values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigMapping(IndexMap<String, ConfigValue>);

impl ConfigMapping {
    pub fn new() -> Self { Self::default() }

    pub fn from_toml_str(src: &str) -> Result<Self> {
        Ok(toml::from_str(src)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path)?;
        let mapping = Self::from_toml_str(&src)?;
        log::debug!(target: "panel_core", "loaded {} top-level keys from {}", mapping.len(), path.display());
        Ok(mapping)
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> { self.0.get(key) }
    pub fn get_mut(&mut self, key: &str) -> Option<&mut ConfigValue> { self.0.get_mut(key) }
    pub fn contains_key(&self, key: &str) -> bool { self.0.contains_key(key) }
    pub fn keys(&self) -> impl Iterator<Item = &str> { self.0.keys().map(String::as_str) }
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Option<ConfigValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<ConfigValue> {
        self.0.shift_remove(key)
    }

    /// Look up a dotted path such as `panel_margins_cm.top`.
    pub fn get_path(&self, path: &str) -> Option<&ConfigValue> {
        let mut parts = path.split('.');
        let mut current = self.get(parts.next()?)?;
        for part in parts {
            current = current.as_map()?.get(part)?;
        }
        Some(current)
    }
}

impl FromIterator<(String, ConfigValue)> for ConfigMapping {
    fn from_iter<I: IntoIterator<Item = (String, ConfigValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ConfigMapping {
    type Item = (&'a String, &'a ConfigValue);
    type IntoIter = indexmap::map::Iter<'a, String, ConfigValue>;
    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

/// Read-only dotted-path view of a configuration mapping.
///
/// Writes are rejected with [`PanelError::ImmutableViolation`]; derive a new mapping
/// with [`crate::overrides::merge_overrides`] instead.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigView {
    data: ConfigMapping,
}

impl ConfigView {
    pub fn new(data: ConfigMapping) -> Self { Self { data } }

    pub fn get(&self, path: &str) -> Result<&ConfigValue> {
        self.data
            .get_path(path)
            .ok_or_else(|| PanelError::AttributeNotFound(path.to_owned()))
    }

    pub fn contains(&self, path: &str) -> bool { self.data.get_path(path).is_some() }

    pub fn get_f64(&self, path: &str) -> Result<f64> {
        let v = self.get(path)?;
        v.as_f64()
            .ok_or_else(|| PanelError::invalid_value(path, format!("expected a number, found {}", v.type_name())))
    }

    pub fn get_bool(&self, path: &str) -> Result<bool> {
        let v = self.get(path)?;
        v.as_bool()
            .ok_or_else(|| PanelError::invalid_value(path, format!("expected a bool, found {}", v.type_name())))
    }

    pub fn get_str(&self, path: &str) -> Result<&str> {
        let v = self.get(path)?;
        v.as_str()
            .ok_or_else(|| PanelError::invalid_value(path, format!("expected a string, found {}", v.type_name())))
    }

    /// View of a nested section.
    pub fn section(&self, path: &str) -> Result<ConfigView> {
        let v = self.get(path)?;
        v.as_map()
            .map(|m| ConfigView::new(m.clone()))
            .ok_or_else(|| PanelError::invalid_value(path, format!("expected a table, found {}", v.type_name())))
    }

    pub fn set(&self, path: &str, _value: impl Into<ConfigValue>) -> Result<()> {
        Err(PanelError::ImmutableViolation(path.to_owned()))
    }

    pub fn remove(&self, path: &str) -> Result<()> {
        Err(PanelError::ImmutableViolation(path.to_owned()))
    }

    pub fn as_mapping(&self) -> &ConfigMapping { &self.data }
    pub fn into_mapping(self) -> ConfigMapping { self.data }
}
