use clinic_core::purchase::{PricingError, PurchaseLine, PurchaseTotals};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::errors::CliError;
use crate::ui::{self, OutputFormat};

#[derive(Serialize)]
struct PriceOutput<'a> {
    line: &'a PurchaseLine,
    totals: &'a PurchaseTotals,
}

/// Prices one purchase line.
pub fn price_line(
    mrp: Decimal,
    discount: Option<Decimal>,
    dealer_price: Option<Decimal>,
    quantity: u32,
    gst: Decimal,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    ui::header("Pricing purchase line");
    let report = |e: PricingError| {
        ui::error(&e.to_string());
        CliError::PricingError
    };
    let line = build_line(mrp, discount, dealer_price, quantity, gst).map_err(report)?;
    let totals = line.totals().map_err(report)?;
    ui::success(&format!("Total {} for {} units", totals.total, quantity));

    match output_format {
        OutputFormat::Pretty => ui::pretty_output_price(&line, &totals),
        OutputFormat::Json => ui::json_output(&PriceOutput {
            line: &line,
            totals: &totals,
        }),
    }
    Ok(())
}

fn build_line(
    mrp: Decimal,
    discount: Option<Decimal>,
    dealer_price: Option<Decimal>,
    quantity: u32,
    gst: Decimal,
) -> Result<PurchaseLine, PricingError> {
    let mut line = PurchaseLine::new(mrp, quantity, gst)?;
    if let Some(discount) = discount {
        line.set_discount_percent(discount)?;
    }
    if let Some(dealer_price) = dealer_price {
        line.set_dealer_price(dealer_price)?;
    }
    Ok(line)
}
