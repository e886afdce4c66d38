use std::fs;
use std::path::{Path, PathBuf};

use clinic_core::preset::JsonFilePresetStore;
use clinic_core::query::PredicateSet;
use clinic_core::{EngineConfig, Record, load_records};
use serde_json::Value;

use crate::errors::CliError;
use crate::ui;

/// Presets file used when none is given.
pub const DEFAULT_PRESETS_FILE: &str = "clinic-storage.json";

fn read_json(path: &Path) -> Result<Value, CliError> {
    let source = fs::read_to_string(path).map_err(|e| {
        ui::error(&format!("Couldn't read {}: {}", path.display(), e));
        CliError::InputError
    })?;
    serde_json::from_str(&source).map_err(|e| {
        ui::error(&format!("{} is not valid JSON: {}", path.display(), e));
        CliError::InputError
    })
}

/// Loads an exported array of enquiry records.
pub fn load_records_file(path: &Path) -> Result<Vec<Record>, CliError> {
    ui::debug(&format!("Loading records from {}", path.display()));
    load_records(read_json(path)?).map_err(|e| {
        ui::error(&format!("Couldn't load records from {}: {}", path.display(), e));
        CliError::InputError
    })
}

/// Loads a saved array of predicates.
pub fn load_predicates_file(path: &Path) -> Result<PredicateSet, CliError> {
    ui::debug(&format!("Loading predicates from {}", path.display()));
    serde_json::from_value(read_json(path)?).map_err(|e| {
        ui::error(&format!("Couldn't load predicates from {}: {}", path.display(), e));
        CliError::InputError
    })
}

/// Loads the engine config, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig, CliError> {
    match path {
        Some(path) => EngineConfig::from_file(path).map_err(|e| {
            ui::error(&e.to_string());
            CliError::ConfigError
        }),
        None => Ok(EngineConfig::default()),
    }
}

pub fn preset_store(path: Option<PathBuf>) -> JsonFilePresetStore {
    JsonFilePresetStore::new(path.unwrap_or_else(|| PathBuf::from(DEFAULT_PRESETS_FILE)))
}
