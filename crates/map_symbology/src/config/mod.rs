//! Generic configuration tree
//!
//! Symbols serialize to and from [`Config`], an ordered string key-value
//! tree. Scalar values are stored as text and coerced through `FromStr`
//! on read; a value that fails to coerce leaves the target untouched
//! rather than erroring, which is what lets malformed stylesheets degrade
//! gracefully instead of aborting.
//!
//! Documents can be persisted as RON or TOML, dispatched on file
//! extension.

use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Configuration I/O errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// A type that serializes to and from a [`Config`] subtree.
///
/// Implemented by structured field values (depth-offset options, numeric
/// expressions) and by symbols themselves.
pub trait ConfigBlock {
    /// Serialize to a configuration subtree
    fn get_config(&self) -> Config;

    /// Overlay values from a configuration subtree onto `self`.
    ///
    /// Additive: keys absent from `conf` leave the corresponding fields
    /// unchanged.
    fn merge_config(&mut self, conf: &Config);
}

/// An ordered key-value configuration tree.
///
/// Each node has a key, an optional scalar value, and ordered children.
/// Scalars are stored as strings; typed access goes through
/// [`get_if_set`](Self::get_if_set) and friends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Config>,
}

impl Config {
    /// Create an empty node with the given key
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
            children: Vec::new(),
        }
    }

    /// Create a flat key/value pair
    pub fn pair(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key).with_value(value)
    }

    /// Builder-style value assignment
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// This node's key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace this node's key
    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = key.into();
    }

    /// This node's scalar value, or `""` when absent
    pub fn value(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    /// This node's scalar value, if present
    pub fn value_opt(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Replace this node's scalar value
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }

    /// Ordered child nodes
    pub fn children(&self) -> &[Config] {
        &self.children
    }

    /// Append a child node
    pub fn add(&mut self, child: Config) {
        self.children.push(child);
    }

    /// Append a flat key/value child
    pub fn add_pair(&mut self, key: impl Into<String>, value: impl Display) {
        self.children.push(Config::pair(key, value.to_string()));
    }

    /// First child with the given key, if any
    pub fn child(&self, key: &str) -> Option<&Config> {
        self.children.iter().find(|c| c.key == key)
    }

    /// Whether a child with the given key exists
    pub fn has(&self, key: &str) -> bool {
        self.child(key).is_some()
    }

    /// Scalar value of the first child with the given key
    pub fn value_of(&self, key: &str) -> Option<&str> {
        self.child(key).and_then(Config::value_opt)
    }

    /// Append a scalar child only when the field is set.
    ///
    /// Unset fields are omitted entirely so a serialized symbol records
    /// only what was explicitly assigned.
    pub fn add_if_set<T: Display>(&mut self, key: &str, field: &Option<T>) {
        if let Some(v) = field {
            self.add_pair(key, v);
        }
    }

    /// Append an object-valued child only when the field is set
    pub fn add_obj_if_set<T: ConfigBlock>(&mut self, key: &str, field: &Option<T>) {
        if let Some(v) = field {
            let mut child = v.get_config();
            child.set_key(key);
            self.children.push(child);
        }
    }

    /// Coerce a scalar child into `field` when present and parseable.
    ///
    /// Absent keys and unparseable values leave `field` exactly as it
    /// was; no error is reported.
    pub fn get_if_set<T: FromStr>(&self, key: &str, field: &mut Option<T>) {
        if let Some(text) = self.value_of(key) {
            if let Ok(v) = text.parse() {
                *field = Some(v);
            }
        }
    }

    /// Merge an object-valued child into `field` when present.
    ///
    /// A missing `field` is default-constructed first so a partial
    /// subtree overlays onto defaults.
    pub fn get_obj_if_set<T: ConfigBlock + Default>(&self, key: &str, field: &mut Option<T>) {
        if let Some(child) = self.child(key) {
            let mut v = field.take().unwrap_or_default();
            v.merge_config(child);
            *field = Some(v);
        }
    }

    /// Load a configuration document from a `.ron` or `.toml` file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match extension(path) {
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Some("toml") => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save this configuration document to a `.ron` or `.toml` file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match extension(path) {
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}
