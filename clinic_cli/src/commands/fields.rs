use clinic_core::FieldCatalog;

use crate::errors::CliError;
use crate::ui::{self, OutputFormat};

/// Lists the fields advanced filters can be built on.
pub fn list_fields(output_format: OutputFormat) -> Result<(), CliError> {
    ui::header("Listing filterable fields");
    let catalog = FieldCatalog::enquiries();
    ui::success(&format!("Found {} fields", catalog.len()));

    match output_format {
        OutputFormat::Pretty => ui::pretty_output_fields(&catalog),
        OutputFormat::Json => ui::json_output(&catalog),
    }
    Ok(())
}
