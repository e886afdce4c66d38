use clinic_core::preset::PresetStore;
use clinic_core::query::{
    DataType, FilterBuilder, FilterEngine, FilterState, LogicalOperator, Operator, Predicate,
    PredicateError, SortSpec, Viewer,
};
use clinic_core::{EngineConfig, FieldCatalog};
use serde_json::Value;

use crate::cli::FilterArgs;
use crate::errors::CliError;
use crate::files::{load_predicates_file, load_records_file};
use crate::ui::{self, OutputFormat};

/// Filters, sorts and pages an exported list of enquiries.
pub fn filter_records<S: PresetStore>(
    args: FilterArgs,
    config: EngineConfig,
    store: &S,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    ui::header("Filtering enquiries");
    let records = load_records_file(&args.records)?;
    let page_size = args.page_size.unwrap_or(config.default_page_size);
    let engine = FilterEngine::new(config);
    let mut state = FilterState::new(page_size);

    // Explicit flags override whatever the preset set
    if let Some(name) = &args.preset {
        let preset = store.find_preset(name).map_err(|e| {
            ui::error(&e.to_string());
            CliError::PresetError
        })?;
        ui::debug(&format!("Starting from preset '{}'", preset.name));
        state = state.with_preset(&preset);
    }
    if let Some(search) = args.search {
        state = state.with_search(search);
    }
    if let Some(status) = args.status {
        state = state.with_status(status);
    }
    if let Some(category) = args.category {
        state = state.with_category(category);
    }

    if let Some(path) = &args.predicates {
        let set = load_predicates_file(path)?;
        for (id, problem) in set.validate() {
            ui::warning(&format!("Predicate '{}' will never match: {}", id, problem));
        }
        for predicate in set.iter() {
            state = state.with_predicate(predicate.clone());
        }
    }

    let catalog = FieldCatalog::enquiries();
    for condition in &args.and_conditions {
        state = state.with_predicate(parse_condition(&catalog, condition, LogicalOperator::And)?);
    }
    for condition in &args.or_conditions {
        state = state.with_predicate(parse_condition(&catalog, condition, LogicalOperator::Or)?);
    }

    if let Some(field) = args.sort {
        let sort = if args.desc {
            SortSpec::descending(field)
        } else {
            SortSpec::ascending(field)
        };
        state = state.with_sort(Some(sort));
    }
    state = state.with_page(args.page);

    let viewer = args.role.map(Viewer::with_role).unwrap_or_default();
    let page = state.run(&engine, &records, &viewer);

    ui::success(&format!(
        "{} of {} records match",
        page.total,
        records.len()
    ));
    if page.items.is_empty() && page.total > 0 {
        ui::warning(&format!(
            "Page {} is past the end, there are {} pages",
            page.page, page.total_pages
        ));
    }

    match output_format {
        OutputFormat::Pretty => ui::pretty_output_page(&page),
        OutputFormat::Json => ui::json_output(&page),
    }

    Ok(())
}

/// Turns `field:operator[:value]` into a predicate for a catalog field.
fn parse_condition(
    catalog: &FieldCatalog,
    condition: &str,
    logical_operator: LogicalOperator,
) -> Result<Predicate, CliError> {
    build_condition(catalog, condition, logical_operator).map_err(|e| {
        ui::error(&format!("Invalid condition '{}': {}", condition, e));
        CliError::FilterError
    })
}

fn build_condition(
    catalog: &FieldCatalog,
    condition: &str,
    logical_operator: LogicalOperator,
) -> Result<Predicate, PredicateError> {
    let mut parts = condition.splitn(3, ':');
    let field = parts.next().unwrap_or_default().trim();
    let operator: Operator = parts.next().unwrap_or_default().trim().parse()?;
    let builder = FilterBuilder::for_path(catalog, field)?;

    let is_date = catalog
        .get(field)
        .is_some_and(|f| f.data_type == DataType::Date);
    let value = match parts.next() {
        Some(raw) if is_date => Value::String(raw.to_string()),
        Some(raw) => parse_value(raw),
        None => Value::Null,
    };

    builder
        .operator(operator)
        .value(value)
        .logical_operator(logical_operator)
        .build()
}

/// Numbers, booleans and arrays are taken as JSON, anything else as text.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn test_build_number_condition() {
        let catalog = FieldCatalog::enquiries();
        let predicate = build_condition(
            &catalog,
            "testDetails.testPrice:greater_than:1000",
            LogicalOperator::And,
        )
        .unwrap();
        assert_eq!(predicate.field, "testDetails.testPrice");
        assert_eq!(predicate.data_type, DataType::Number);
        assert_eq!(predicate.operator, Operator::GreaterThan);
        assert_eq!(predicate.value, json!(1000));
        assert!(!predicate.is_or());
    }

    #[test]
    fn test_build_unary_or_condition() {
        let catalog = FieldCatalog::enquiries();
        let predicate =
            build_condition(&catalog, "hearingAidPurchased:is_true", LogicalOperator::Or).unwrap();
        assert_eq!(predicate.value, Value::Null);
        assert!(predicate.is_or());
    }

    #[test]
    fn test_value_keeps_colons() {
        let catalog = FieldCatalog::enquiries();
        let predicate =
            build_condition(&catalog, "notes:contains:call at 10:30", LogicalOperator::And).unwrap();
        assert_eq!(predicate.value, json!("call at 10:30"));
    }

    #[test]
    fn test_dates_stay_text() {
        let catalog = FieldCatalog::enquiries();
        let predicate =
            build_condition(&catalog, "createdAt:between:2024-01-01,2024-01-31", LogicalOperator::And)
                .unwrap();
        assert_eq!(predicate.value, json!("2024-01-01,2024-01-31"));
    }

    #[test]
    fn test_rejected_conditions() {
        let catalog = FieldCatalog::enquiries();
        assert_matches!(
            build_condition(&catalog, "shoeSize:equals:9", LogicalOperator::And),
            Err(PredicateError::UnknownField(_))
        );
        assert_matches!(
            build_condition(&catalog, "name:shouts:x", LogicalOperator::And),
            Err(PredicateError::UnknownOperator(_))
        );
        assert_matches!(
            build_condition(&catalog, "name:greater_than:3", LogicalOperator::And),
            Err(PredicateError::UnsupportedOperator { .. })
        );
        assert_matches!(
            build_condition(&catalog, "name:regex:(unclosed", LogicalOperator::And),
            Err(PredicateError::InvalidPattern { .. })
        );
    }
}
