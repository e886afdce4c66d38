//! Engine configuration

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

/// Restricts what a role may see: callers with `role` only get records whose
/// `field` equals (or, for arrays, contains) `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleGate {
    pub role: String,
    pub field: String,
    pub value: String,
}

/// Settings for the enquiry list pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Fields searched by the free-text box
    pub search_fields: Vec<String>,
    /// Searched fields compared without lowercasing
    pub case_sensitive_fields: Vec<String>,
    pub status_field: String,
    pub category_field: String,
    pub role_gate: Option<RoleGate>,
    pub default_page_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_fields: ["name", "phone", "email", "subject", "reference", "notes"]
                .into_iter()
                .map(String::from)
                .collect(),
            case_sensitive_fields: vec!["phone".to_string()],
            status_field: "status".to_string(),
            category_field: "category".to_string(),
            role_gate: None,
            default_page_size: 10,
        }
    }
}

impl EngineConfig {
    /// Load a JSON config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading engine config from {}", path.display());
        let source = fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(path.to_path_buf(), e))?;
        serde_json::from_str(&source)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e.to_string()))
    }

    pub fn with_role_gate(mut self, gate: RoleGate) -> Self {
        self.role_gate = Some(gate);
        self
    }

    pub fn is_case_sensitive(&self, field: &str) -> bool {
        self.case_sensitive_fields.iter().any(|f| f == field)
    }
}

/// Errors you might encounter loading a config file.
#[derive(Debug)]
pub enum ConfigError {
    IoError(PathBuf, io::Error),
    ParseError(PathBuf, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(path, error) => {
                write!(f, "Config file at {} could not be read: {}", path.display(), error)
            }
            ConfigError::ParseError(path, error) => {
                write!(f, "Config file at {} could not be parsed: {}", path.display(), error)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
