use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{InvoiceError, Result};

/// One row of the invoice. The rate is either entered directly or derived
/// from a provision LME value and a percentage of it; the constructors keep
/// the derived fields consistent.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LineItem {
    pub description: String,
    pub quantity: Decimal,
    pub rate: Decimal,
    pub lme_applied: bool,
    pub lme_percentage: Option<Decimal>,
    pub provision_value: Option<Decimal>,
}

impl LineItem {
    /// Item billed at a directly entered rate.
    pub fn flat(description: impl Into<String>, quantity: Decimal, rate: Decimal) -> Self {
        LineItem {
            description: description.into(),
            quantity,
            rate,
            lme_applied: false,
            lme_percentage: None,
            provision_value: None,
        }
    }

    /// Item billed at a percentage of a provision LME value.
    /// The percentage must lie within 40.00 - 100.00.
    pub fn lme(
        description: impl Into<String>,
        quantity: Decimal,
        provision_value: Decimal,
        lme_percentage: Decimal,
    ) -> Result<Self> {
        let min = Decimal::new(40, 0);
        if lme_percentage < min || lme_percentage > Decimal::ONE_HUNDRED {
            return Err(InvoiceError::LmePercentage(lme_percentage));
        }
        Ok(LineItem {
            description: description.into(),
            quantity,
            rate: provision_value * lme_percentage / Decimal::ONE_HUNDRED,
            lme_applied: true,
            lme_percentage: Some(lme_percentage),
            provision_value: Some(provision_value),
        })
    }

    pub fn amount(&self) -> Decimal {
        self.quantity * self.rate
    }
}

/// The two supported invoice modes. A USD invoice always carries its
/// conversion rate, so a converted total can never be requested without one.
#[derive(Debug, Clone, PartialEq)]
pub enum InvoiceCurrency {
    Usd { sar_rate: Decimal },
    Sar,
}

impl InvoiceCurrency {
    pub fn label(&self) -> &'static str {
        match self {
            InvoiceCurrency::Usd { .. } => "USD",
            InvoiceCurrency::Sar => "SAR",
        }
    }
}

/// Totals derived from the item list; recomputed per generation, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceTotals {
    pub total_primary: Decimal,
    pub total_secondary: Option<Decimal>,
    pub total_words: String,
}

/// Everything collected by the invoice wizard.
#[derive(Debug, Clone)]
pub struct InvoiceDraft {
    pub company_info: String,
    pub customer_ref: String,
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    pub bank_details: String,
    pub items: Vec<LineItem>,
    pub currency: InvoiceCurrency,
}

/// One row of the remote company directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Company {
    pub name: String,
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn lme_rate_is_percentage_of_provision() {
        let item = LineItem::lme("Cu scrap", dec!(1), dec!(8000), dec!(75)).unwrap();
        assert_eq!(item.rate, dec!(6000));
        assert_eq!(item.lme_percentage, Some(dec!(75)));
        assert_eq!(item.provision_value, Some(dec!(8000)));
        assert!(item.lme_applied);
    }

    #[test]
    fn lme_at_full_percentage_equals_provision() {
        let item = LineItem::lme("Cu scrap", dec!(1), dec!(8380.55), dec!(100)).unwrap();
        assert_eq!(item.rate, dec!(8380.55));
    }

    #[test]
    fn lme_percentage_out_of_range_is_rejected() {
        assert!(LineItem::lme("x", dec!(1), dec!(100), dec!(39.99)).is_err());
        assert!(LineItem::lme("x", dec!(1), dec!(100), dec!(100.01)).is_err());
        assert!(LineItem::lme("x", dec!(1), dec!(100), dec!(40)).is_ok());
        assert!(LineItem::lme("x", dec!(1), dec!(100), dec!(100)).is_ok());
    }

    #[test]
    fn flat_item_amount_is_qty_times_rate() {
        let item = LineItem::flat("x", dec!(19.332), dec!(8380));
        assert_eq!(item.amount(), dec!(162002.16));
        assert!(!item.lme_applied);
        assert_eq!(item.lme_percentage, None);
    }
}
