//! Named filter presets and where they are kept

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::query::SimpleFilters;

/// Key the presets are stored under.
pub const PRESETS_KEY: &str = "enquiryFilterPresets";

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// A saved snapshot of the simple filters. Advanced predicates are not part
/// of a preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub id: String,
    pub name: String,
    pub filters: SimpleFilters,
    pub created_at: DateTime<Utc>,
}

impl Preset {
    pub fn new(name: impl Into<String>, filters: SimpleFilters) -> Self {
        let created_at = Utc::now();
        Self {
            id: format!(
                "preset-{}-{}",
                created_at.timestamp_millis(),
                NEXT_ID.fetch_add(1, Ordering::Relaxed)
            ),
            name: name.into(),
            filters,
            created_at,
        }
    }
}

/// Errors you might encounter reading or writing presets.
#[derive(Debug)]
pub enum PresetError {
    IoError(io::Error),
    JsonError(serde_json::Error),
    NotFound(String),
    /// The storage file holds JSON that is not an object
    NotAnObject(PathBuf),
}

impl fmt::Display for PresetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetError::IoError(error) => write!(f, "Could not access presets: {}", error),
            PresetError::JsonError(error) => write!(f, "Presets are not valid JSON: {}", error),
            PresetError::NotFound(name) => write!(f, "No preset named '{}'", name),
            PresetError::NotAnObject(path) => write!(
                f,
                "Storage file {} does not hold a JSON object",
                path.display()
            ),
        }
    }
}

impl std::error::Error for PresetError {}

impl From<io::Error> for PresetError {
    fn from(error: io::Error) -> Self {
        PresetError::IoError(error)
    }
}

impl From<serde_json::Error> for PresetError {
    fn from(error: serde_json::Error) -> Self {
        PresetError::JsonError(error)
    }
}

/// Somewhere presets are persisted as one list.
pub trait PresetStore {
    fn load_presets(&self) -> Result<Vec<Preset>, PresetError>;
    fn save_presets(&self, presets: &[Preset]) -> Result<(), PresetError>;

    /// Save the current filters under a name, replacing any preset with the
    /// same name (ignoring case).
    fn save_preset(&self, name: &str, filters: SimpleFilters) -> Result<Preset, PresetError> {
        let mut presets = self.load_presets()?;
        let preset = Preset::new(name, filters);
        presets.retain(|p| !p.name.eq_ignore_ascii_case(name));
        presets.push(preset.clone());
        self.save_presets(&presets)?;
        debug!("Saved preset '{}' ({} stored)", name, presets.len());
        Ok(preset)
    }

    fn delete_preset(&self, name: &str) -> Result<(), PresetError> {
        let mut presets = self.load_presets()?;
        let before = presets.len();
        presets.retain(|p| !p.name.eq_ignore_ascii_case(name));
        if presets.len() == before {
            return Err(PresetError::NotFound(name.to_string()));
        }
        self.save_presets(&presets)
    }

    fn find_preset(&self, name: &str) -> Result<Preset, PresetError> {
        self.load_presets()?
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| PresetError::NotFound(name.to_string()))
    }
}

/// Presets kept in memory only.
#[derive(Debug, Default)]
pub struct MemoryPresetStore {
    presets: Mutex<Vec<Preset>>,
}

impl MemoryPresetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PresetStore for MemoryPresetStore {
    fn load_presets(&self) -> Result<Vec<Preset>, PresetError> {
        Ok(self
            .presets
            .lock()
            .map(|presets| presets.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone()))
    }

    fn save_presets(&self, presets: &[Preset]) -> Result<(), PresetError> {
        let mut stored = self
            .presets
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *stored = presets.to_vec();
        Ok(())
    }
}

/// A JSON file used like browser local storage: an object of keys, with the
/// presets as an array under [`PRESETS_KEY`]. Other keys are left alone.
#[derive(Debug, Clone)]
pub struct JsonFilePresetStore {
    path: PathBuf,
}

impl JsonFilePresetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_storage(&self) -> Result<Map<String, Value>, PresetError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let source = fs::read_to_string(&self.path)?;
        if source.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&source)? {
            Value::Object(map) => Ok(map),
            _ => {
                warn!(
                    "Storage file {} is not a JSON object, leaving it untouched",
                    self.path.display()
                );
                Err(PresetError::NotAnObject(self.path.clone()))
            }
        }
    }
}

impl PresetStore for JsonFilePresetStore {
    fn load_presets(&self) -> Result<Vec<Preset>, PresetError> {
        let storage = self.read_storage()?;
        match storage.get(PRESETS_KEY) {
            Some(value) => Ok(serde_json::from_value(value.clone())?),
            None => Ok(Vec::new()),
        }
    }

    fn save_presets(&self, presets: &[Preset]) -> Result<(), PresetError> {
        let mut storage = self.read_storage()?;
        storage.insert(PRESETS_KEY.to_string(), serde_json::to_value(presets)?);
        let json = serde_json::to_string_pretty(&Value::Object(storage))?;
        fs::write(&self.path, json)?;
        debug!("Wrote {} presets to {}", presets.len(), self.path.display());
        Ok(())
    }
}
