use std::fmt;

use chrono::Local;
use clap::ValueEnum;
use clinic_core::preset::Preset;
use clinic_core::purchase::{PurchaseLine, PurchaseTotals};
use clinic_core::query::{Page, stringify};
use clinic_core::{FieldCatalog, Record};
use console::style;
use serde::Serialize;

/// How results are written to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Pretty => write!(f, "pretty"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Columns shown for each record in pretty output.
const RECORD_COLUMNS: [&str; 4] = ["phone", "email", "assignedTo", "reference"];

pub fn header(message: &str) {
    eprintln!("{}", style(message).bold().cyan());
}

pub fn success(message: &str) {
    eprintln!("{} {}", style("✔").green(), message);
}

pub fn warning(message: &str) {
    eprintln!("{} {}", style("!").yellow().bold(), style(message).yellow());
}

pub fn error(message: &str) {
    eprintln!("{} {}", style("✘").red().bold(), style(message).red());
}

pub fn debug(message: &str) {
    log::debug!("{}", message);
}

pub fn json_output<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => error(&format!("Couldn't serialize output: {}", e)),
    }
}

fn text_of(record: &Record, path: &str) -> Option<String> {
    record
        .resolve(path)
        .map(|value| stringify(&value))
        .filter(|text| !text.is_empty())
}

pub fn pretty_output_page(page: &Page) {
    for record in &page.items {
        let name = text_of(record, "name").unwrap_or_else(|| "(no name)".to_string());
        let status = text_of(record, "status").unwrap_or_default();
        let category = text_of(record, "category").unwrap_or_default();
        println!(
            "{} {} {}",
            style(name).bold(),
            style(status).green(),
            style(category).dim()
        );

        for column in RECORD_COLUMNS {
            if let Some(text) = text_of(record, column) {
                println!("  {} {}", style(format!("{}:", column)).dim(), text);
            }
        }
    }

    if page.total_pages > 0 {
        println!(
            "{}",
            style(format!(
                "Page {} of {} ({} records)",
                page.page + 1,
                page.total_pages,
                page.total
            ))
            .dim()
        );
    }
}

pub fn pretty_output_fields(catalog: &FieldCatalog) {
    for field in catalog.iter() {
        println!(
            "{} {} {}",
            style(&field.path).bold(),
            style(format!("({})", field.label)).dim(),
            style(field.data_type).cyan()
        );
        let operators: Vec<String> = field
            .data_type
            .operators()
            .iter()
            .map(|op| op.to_string())
            .collect();
        println!("  {}", operators.join(", "));
    }
}

pub fn pretty_output_presets(presets: &[Preset]) {
    for preset in presets {
        let created = preset.created_at.with_timezone(&Local);
        println!(
            "{} {}",
            style(&preset.name).bold(),
            style(created.format("%Y-%m-%d %H:%M")).dim()
        );
        let filters = &preset.filters;
        if !filters.search.is_empty() {
            println!("  search: {}", filters.search);
        }
        println!("  status: {}", filters.status);
        println!("  category: {}", filters.category);
    }
}

pub fn pretty_output_price(line: &PurchaseLine, totals: &PurchaseTotals) {
    let rows = [
        ("MRP", line.mrp().to_string()),
        ("Discount", format!("{}%", line.discount_percent())),
        ("Dealer price", line.dealer_price().to_string()),
        ("Quantity", line.quantity().to_string()),
        ("Taxable", totals.taxable.to_string()),
        ("GST", format!("{} ({}%)", totals.gst, line.gst_percent())),
        ("Savings", totals.savings.to_string()),
    ];
    for (label, value) in rows {
        println!("{:>14} {}", style(label).dim(), value);
    }
    println!("{:>14} {}", style("Total").bold(), style(totals.total).bold());
}
