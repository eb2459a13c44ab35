//! Message catalogs — gettext-style label lookup keyed by the literal
//! English source string.
//!
//! Templates call `t(msg="Subprojects")`; an engine built without a
//! catalog (or with a catalog missing the key) returns the source string
//! unchanged, so English is always a working fallback.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tera::Value;

use lingua_core::types::LanguageCode;

use crate::error::PageError;

/// A translation catalog for one target language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageCatalog {
    pub language: LanguageCode,
    #[serde(default)]
    pub messages: HashMap<String, String>,
}

impl MessageCatalog {
    /// Build a catalog from an in-memory message map.
    pub fn from_messages(language: LanguageCode, messages: HashMap<String, String>) -> Self {
        Self { language, messages }
    }

    /// Load a catalog from a YAML file:
    ///
    /// ```yaml
    /// language: cs
    /// messages:
    ///   "Subprojects": "Podprojekty"
    /// ```
    pub fn load(path: &Path) -> Result<Self, PageError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PageError::Io { path: path.to_path_buf(), source: e })?;
        serde_yaml::from_str(&contents)
            .map_err(|e| PageError::MessageCatalog { path: path.to_path_buf(), source: e })
    }

    /// Translated label for `msg`, if the catalog has one.
    pub fn lookup(&self, msg: &str) -> Option<&str> {
        self.messages.get(msg).map(String::as_str)
    }
}

/// Tera function `t(msg=...)` — label lookup with source-string fallback.
pub(crate) struct Translate {
    catalog: Option<Arc<MessageCatalog>>,
}

impl Translate {
    pub(crate) fn new(catalog: Option<Arc<MessageCatalog>>) -> Self {
        Self { catalog }
    }
}

impl tera::Function for Translate {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let msg = args
            .get("msg")
            .and_then(Value::as_str)
            .ok_or_else(|| tera::Error::msg("t() requires a string `msg` argument"))?;
        let label = self
            .catalog
            .as_ref()
            .and_then(|c| c.lookup(msg))
            .unwrap_or(msg);
        Ok(Value::String(label.to_string()))
    }

    fn is_safe(&self) -> bool {
        // Labels are still HTML-escaped by Tera on output.
        false
    }
}
