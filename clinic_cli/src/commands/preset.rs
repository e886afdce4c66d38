use clinic_core::preset::{PresetError, PresetStore};
use clinic_core::query::SimpleFilters;

use crate::errors::CliError;
use crate::ui::{self, OutputFormat};

fn report(error: PresetError) -> CliError {
    ui::error(&error.to_string());
    CliError::PresetError
}

/// Lists saved presets.
pub fn list_presets<S: PresetStore>(store: &S, output_format: OutputFormat) -> Result<(), CliError> {
    ui::header("Listing presets");
    let presets = store.load_presets().map_err(report)?;
    ui::success(&format!("Found {} presets", presets.len()));

    match output_format {
        OutputFormat::Pretty => ui::pretty_output_presets(&presets),
        OutputFormat::Json => ui::json_output(&presets),
    }
    Ok(())
}

/// Saves simple filters under a name.
pub fn save_preset<S: PresetStore>(
    store: &S,
    name: String,
    search: Option<String>,
    status: Option<String>,
    category: Option<String>,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    ui::header("Saving preset");
    if name.trim().is_empty() {
        ui::error("Preset name cannot be empty");
        return Err(CliError::InputError);
    }

    let mut filters = SimpleFilters::default();
    if let Some(search) = search {
        filters = filters.with_search(search);
    }
    if let Some(status) = status {
        filters = filters.with_status(status);
    }
    if let Some(category) = category {
        filters = filters.with_category(category);
    }
    if filters.is_default() {
        ui::warning("Preset has no filters set");
    }

    let preset = store.save_preset(name.trim(), filters).map_err(report)?;
    ui::success(&format!("Saved preset '{}'", preset.name));

    match output_format {
        OutputFormat::Pretty => ui::pretty_output_presets(std::slice::from_ref(&preset)),
        OutputFormat::Json => ui::json_output(&preset),
    }
    Ok(())
}

/// Deletes a preset by name.
pub fn delete_preset<S: PresetStore>(store: &S, name: String) -> Result<(), CliError> {
    ui::header("Deleting preset");
    store.delete_preset(&name).map_err(report)?;
    ui::success(&format!("Deleted preset '{}'", name));
    Ok(())
}
