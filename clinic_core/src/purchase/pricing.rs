//! Purchase line pricing with MRP, dealer price and discount kept in step

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Round to paise, half away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Errors raised when a purchase line is given an impossible price.
#[derive(Debug, Clone, PartialEq)]
pub enum PricingError {
    NegativeAmount { field: &'static str, value: Decimal },
    DiscountOutOfRange(Decimal),
    DealerAboveMrp { dealer_price: Decimal, mrp: Decimal },
    /// An amount grew past what a decimal can hold
    Overflow,
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::NegativeAmount { field, value } => {
                write!(f, "{} cannot be negative (got {})", field, value)
            }
            PricingError::DiscountOutOfRange(value) => {
                write!(f, "Discount must be between 0 and 100 percent (got {})", value)
            }
            PricingError::DealerAboveMrp { dealer_price, mrp } => {
                write!(f, "Dealer price {} is above the MRP {}", dealer_price, mrp)
            }
            PricingError::Overflow => write!(f, "Amount is too large to calculate"),
        }
    }
}

impl std::error::Error for PricingError {}

/// One product line on a purchase.
///
/// MRP, dealer price and discount are derived from each other: setting any
/// one of them recomputes the dependent one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseLine {
    mrp: Decimal,
    dealer_price: Decimal,
    discount_percent: Decimal,
    quantity: u32,
    gst_percent: Decimal,
}

/// Derived totals for a purchase line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseTotals {
    pub taxable: Decimal,
    pub gst: Decimal,
    pub total: Decimal,
    pub savings: Decimal,
}

impl PurchaseLine {
    /// A line sold at MRP with no discount.
    pub fn new(mrp: Decimal, quantity: u32, gst_percent: Decimal) -> Result<Self, PricingError> {
        non_negative("MRP", mrp)?;
        non_negative("GST", gst_percent)?;
        Ok(Self {
            mrp: round_money(mrp),
            dealer_price: round_money(mrp),
            discount_percent: Decimal::ZERO,
            quantity,
            gst_percent,
        })
    }

    pub fn mrp(&self) -> Decimal {
        self.mrp
    }

    pub fn dealer_price(&self) -> Decimal {
        self.dealer_price
    }

    pub fn discount_percent(&self) -> Decimal {
        self.discount_percent
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn gst_percent(&self) -> Decimal {
        self.gst_percent
    }

    /// Change the MRP, keeping the discount.
    pub fn set_mrp(&mut self, mrp: Decimal) -> Result<(), PricingError> {
        non_negative("MRP", mrp)?;
        let mrp = round_money(mrp);
        self.dealer_price = dealer_from_discount(mrp, self.discount_percent)?;
        self.mrp = mrp;
        Ok(())
    }

    /// Change the discount, deriving the dealer price.
    pub fn set_discount_percent(&mut self, discount_percent: Decimal) -> Result<(), PricingError> {
        if discount_percent < Decimal::ZERO || discount_percent > Decimal::ONE_HUNDRED {
            return Err(PricingError::DiscountOutOfRange(discount_percent));
        }
        self.dealer_price = dealer_from_discount(self.mrp, discount_percent)?;
        self.discount_percent = round_money(discount_percent);
        Ok(())
    }

    /// Change the dealer price, deriving the discount.
    pub fn set_dealer_price(&mut self, dealer_price: Decimal) -> Result<(), PricingError> {
        non_negative("Dealer price", dealer_price)?;
        if dealer_price > self.mrp {
            return Err(PricingError::DealerAboveMrp {
                dealer_price,
                mrp: self.mrp,
            });
        }
        self.discount_percent = if self.mrp.is_zero() {
            Decimal::ZERO
        } else {
            let off = checked(self.mrp.checked_sub(dealer_price))?;
            let share = checked(off.checked_div(self.mrp))?;
            round_money(checked(share.checked_mul(Decimal::ONE_HUNDRED))?)
        };
        self.dealer_price = round_money(dealer_price);
        Ok(())
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    pub fn set_gst_percent(&mut self, gst_percent: Decimal) -> Result<(), PricingError> {
        non_negative("GST", gst_percent)?;
        self.gst_percent = gst_percent;
        Ok(())
    }

    pub fn totals(&self) -> Result<PurchaseTotals, PricingError> {
        let quantity = Decimal::from(self.quantity);
        let taxable = round_money(checked(self.dealer_price.checked_mul(quantity))?);
        let rate = checked(self.gst_percent.checked_div(Decimal::ONE_HUNDRED))?;
        let gst = round_money(checked(taxable.checked_mul(rate))?);
        let saved_per_unit = checked(self.mrp.checked_sub(self.dealer_price))?;
        Ok(PurchaseTotals {
            taxable,
            gst,
            total: checked(taxable.checked_add(gst))?,
            savings: round_money(checked(saved_per_unit.checked_mul(quantity))?),
        })
    }
}

fn dealer_from_discount(mrp: Decimal, discount_percent: Decimal) -> Result<Decimal, PricingError> {
    let share = checked(discount_percent.checked_div(Decimal::ONE_HUNDRED))?;
    let off = checked(mrp.checked_mul(share))?;
    Ok(round_money(checked(mrp.checked_sub(off))?))
}

fn checked(amount: Option<Decimal>) -> Result<Decimal, PricingError> {
    amount.ok_or(PricingError::Overflow)
}

fn non_negative(field: &'static str, value: Decimal) -> Result<(), PricingError> {
    if value.is_sign_negative() && !value.is_zero() {
        Err(PricingError::NegativeAmount { field, value })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_new_line_has_no_discount() {
        let line = PurchaseLine::new(d("10000"), 1, d("12")).unwrap();
        assert_eq!(line.dealer_price(), d("10000"));
        assert_eq!(line.discount_percent(), Decimal::ZERO);
    }

    #[test]
    fn test_discount_derives_dealer_price() {
        let mut line = PurchaseLine::new(d("10000"), 1, d("12")).unwrap();
        line.set_discount_percent(d("15")).unwrap();
        assert_eq!(line.dealer_price(), d("8500"));
    }

    #[test]
    fn test_dealer_price_derives_discount() {
        let mut line = PurchaseLine::new(d("10000"), 1, d("12")).unwrap();
        line.set_dealer_price(d("7000")).unwrap();
        assert_eq!(line.discount_percent(), d("30"));
    }

    #[test]
    fn test_discount_rounds_to_two_places() {
        let mut line = PurchaseLine::new(d("999"), 1, d("0")).unwrap();
        line.set_dealer_price(d("700")).unwrap();
        assert_eq!(line.discount_percent(), d("29.93"));
    }

    #[test]
    fn test_mrp_change_keeps_discount() {
        let mut line = PurchaseLine::new(d("10000"), 1, d("12")).unwrap();
        line.set_dealer_price(d("7000")).unwrap();
        line.set_mrp(d("20000")).unwrap();
        assert_eq!(line.discount_percent(), d("30"));
        assert_eq!(line.dealer_price(), d("14000"));
    }

    #[test]
    fn test_totals() {
        let mut line = PurchaseLine::new(d("20000"), 2, d("12")).unwrap();
        line.set_discount_percent(d("30")).unwrap();
        let totals = line.totals().unwrap();
        assert_eq!(totals.taxable, d("28000"));
        assert_eq!(totals.gst, d("3360"));
        assert_eq!(totals.total, d("31360"));
        assert_eq!(totals.savings, d("12000"));
    }

    #[test]
    fn test_zero_mrp() {
        let mut line = PurchaseLine::new(Decimal::ZERO, 1, d("5")).unwrap();
        line.set_dealer_price(Decimal::ZERO).unwrap();
        assert_eq!(line.discount_percent(), Decimal::ZERO);
    }

    #[test]
    fn test_rejections() {
        let mut line = PurchaseLine::new(d("1000"), 1, d("12")).unwrap();
        assert_matches!(line.set_discount_percent(d("120")), Err(PricingError::DiscountOutOfRange(_)));
        assert_matches!(line.set_dealer_price(d("1200")), Err(PricingError::DealerAboveMrp { .. }));
        assert_matches!(line.set_mrp(d("-1")), Err(PricingError::NegativeAmount { .. }));
        assert_matches!(PurchaseLine::new(d("100"), 1, d("-5")), Err(PricingError::NegativeAmount { .. }));
        assert_eq!(line.dealer_price(), d("1000"));
    }

    #[test]
    fn test_huge_amounts_do_not_panic() {
        let mut line = PurchaseLine::new(Decimal::MAX, 1, d("12")).unwrap();
        line.set_discount_percent(d("50")).unwrap();
        assert!(line.dealer_price() < Decimal::MAX);

        let mut line = PurchaseLine::new(Decimal::MAX, 2, d("0")).unwrap();
        assert_matches!(line.totals(), Err(PricingError::Overflow));

        line.set_quantity(1);
        line.set_gst_percent(d("12")).unwrap();
        assert_matches!(line.totals(), Err(PricingError::Overflow));
    }
}
