//! Construction permit → escrow object names

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ReportResult;

/// Built-in permits of the "Горизонт" project phases
const BUILTIN_PERMITS: [(&str, &str); 3] = [
    (
        "91-RU93308000-2132-2022",
        "Поступления на счет Эскроу \"Горизонт 1\"",
    ),
    (
        "91-RU93308000-2775-2023",
        "Поступления на счет Эскроу \"Горизонт 2\"",
    ),
    (
        "91-RU93308000-3161-2023",
        "Поступления на счет Эскроу \"Горизонт 3\"",
    ),
];

/// Immutable permit number → object name lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermitTable {
    entries: BTreeMap<String, String>,
}

impl Default for PermitTable {
    fn default() -> Self {
        BUILTIN_PERMITS.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PermitTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl PermitTable {
    /// Load a YAML mapping of `permit: object name`
    pub fn from_yaml_file(path: &Path) -> ReportResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(yaml: &str) -> ReportResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn lookup(&self, permit: &str) -> Option<&str> {
        self.entries.get(permit.trim()).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
