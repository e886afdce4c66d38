use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use super::ui::OutputFormat;

/// Defines the top-level interface for the clinic CLI with clap.
#[derive(Parser, Debug)]
#[command(name = "clinic")]
#[command(version, about = "Clinic CLI: Browse enquiry exports and price purchases.")]
pub struct ClinicCli {
    /// Enable verbose output?
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value_t = OutputFormat::default())]
    pub format: OutputFormat,

    /// Path to an engine config file (JSON).
    #[arg(short, long, global = true, env = "CLINIC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the presets storage file.
    #[arg(long, global = true, env = "CLINIC_PRESETS")]
    pub presets: Option<PathBuf>,

    #[command(subcommand)]
    pub command: ClinicCliCommand,
}

/// Defines the available subcommands of the clinic CLI.
#[derive(Subcommand, Debug, PartialEq)]
pub enum ClinicCliCommand {
    /// Filter, sort and page through an exported list of enquiries.
    Filter(FilterArgs),
    /// List the fields advanced filters can use, with their operators.
    Fields,
    /// Manage saved filter presets.
    Preset {
        #[command(subcommand)]
        action: PresetAction,
    },
    /// Work out dealer price, discount, GST and totals for a purchase line.
    Price {
        /// Maximum retail price per unit
        #[arg(long)]
        mrp: Decimal,
        /// Discount off the MRP, in percent
        #[arg(long, conflicts_with = "dealer_price")]
        discount: Option<Decimal>,
        /// Dealer price per unit (derives the discount)
        #[arg(long)]
        dealer_price: Option<Decimal>,
        /// Number of units
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
        /// GST rate in percent
        #[arg(long, default_value_t = Decimal::ZERO)]
        gst: Decimal,
    },
}

/// Options for the filter subcommand.
#[derive(Args, Debug, PartialEq)]
pub struct FilterArgs {
    /// JSON file holding an array of enquiry records.
    pub records: PathBuf,
    /// Free-text search across name, phone, email, subject, reference and notes
    #[arg(short, long)]
    pub search: Option<String>,
    /// Only records with this status ("all" for any)
    #[arg(long)]
    pub status: Option<String>,
    /// Only records in this category ("all" for any)
    #[arg(long)]
    pub category: Option<String>,
    /// JSON file holding an array of predicates
    #[arg(long)]
    pub predicates: Option<PathBuf>,
    /// AND condition (can be repeated). Format: --where <field>:<operator>[:<value>]
    #[arg(long = "where", value_name = "CONDITION")]
    pub and_conditions: Vec<String>,
    /// OR condition (can be repeated). Format: --or-where <field>:<operator>[:<value>]
    #[arg(long = "or-where", value_name = "CONDITION")]
    pub or_conditions: Vec<String>,
    /// Field path to sort by
    #[arg(long)]
    pub sort: Option<String>,
    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,
    /// Page to show, starting at 0
    #[arg(short, long, default_value_t = 0)]
    pub page: usize,
    /// Records per page (defaults to the config value)
    #[arg(long)]
    pub page_size: Option<usize>,
    /// Role of the person viewing the list
    #[arg(short, long)]
    pub role: Option<String>,
    /// Start from a saved preset
    #[arg(long)]
    pub preset: Option<String>,
}

/// Preset subcommands.
#[derive(Subcommand, Debug, PartialEq)]
pub enum PresetAction {
    /// List saved presets.
    List,
    /// Save simple filters under a name, replacing a preset with the same name.
    Save {
        /// Preset name
        name: String,
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete a preset by name.
    Delete {
        /// Preset name
        name: String,
    },
}
