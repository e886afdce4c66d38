use std::fs;

use clinic_core::preset::{JsonFilePresetStore, PRESETS_KEY, PresetError, PresetStore};
use clinic_core::query::{FilterState, SimpleFilters};
use serde_json::{Value, json};
use tempfile::TempDir;

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_missing_file_has_no_presets() {
        let dir = TempDir::new().unwrap();
        let store = JsonFilePresetStore::new(dir.path().join("storage.json"));
        assert!(store.load_presets().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_from_new_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");

        JsonFilePresetStore::new(&path)
            .save_preset("Open tests", SimpleFilters::default().with_status("open").with_category("hearing_test"))
            .unwrap();

        let presets = JsonFilePresetStore::new(&path).load_presets().unwrap();
        assert_eq!(presets.len(), 1);
        assert_eq!(presets[0].name, "Open tests");
        assert_eq!(presets[0].filters.category, "hearing_test");
    }

    #[test]
    fn test_other_storage_keys_are_preserved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, r#"{"theme": "dark", "lastVisited": ["/enquiries"]}"#).unwrap();

        let store = JsonFilePresetStore::new(&path);
        store.save_preset("Mine", SimpleFilters::default().with_search("rao")).unwrap();

        let stored: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(stored["theme"], json!("dark"));
        assert_eq!(stored["lastVisited"], json!(["/enquiries"]));
        assert_eq!(stored[PRESETS_KEY][0]["filters"]["search"], json!("rao"));
    }

    #[test]
    fn test_delete_and_load_into_state() {
        let dir = TempDir::new().unwrap();
        let store = JsonFilePresetStore::new(dir.path().join("storage.json"));
        store.save_preset("A", SimpleFilters::default().with_status("open")).unwrap();
        store.save_preset("B", SimpleFilters::default().with_status("closed")).unwrap();

        let preset = store.find_preset("b").unwrap();
        let state = FilterState::default().with_search("old").with_preset(&preset);
        assert_eq!(state.filters().status, "closed");
        assert_eq!(state.filters().search, "");

        store.delete_preset("A").unwrap();
        assert_eq!(store.load_presets().unwrap().len(), 1);
        assert_matches!(store.find_preset("A"), Err(PresetError::NotFound(_)));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{not json").unwrap();
        let store = JsonFilePresetStore::new(&path);
        assert_matches!(store.load_presets(), Err(PresetError::JsonError(_)));
    }

    #[test]
    fn test_non_object_file_is_kept_intact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "[1, 2, 3]").unwrap();
        let store = JsonFilePresetStore::new(&path);

        assert_matches!(store.load_presets(), Err(PresetError::NotAnObject(_)));
        assert_matches!(
            store.save_preset("Mine", SimpleFilters::default()),
            Err(PresetError::NotAnObject(_))
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "[1, 2, 3]");
    }
}
