//! Template loading and context construction. The template variable names
//! are a fixed contract (`company_info`, `customer_ref`, `invoice_number`,
//! `invoice_date`, `invoice_currency`, `sar_rate`, `bank_details`, `items`,
//! `lme_used`, `total_usd`, `total_sar`, `total_usd_words`,
//! `total_sar_words`); existing templates keep working across releases.

use rust_decimal::Decimal;
use serde::Serialize;
use std::path::Path;
use tera::{Context, Tera};

use crate::bankfmt;
use crate::error::{InvoiceError, Result};
use crate::model::{InvoiceCurrency, InvoiceDraft, InvoiceTotals, LineItem};

pub const TEMPLATE_NAME: &str = "invoice.html";

/// Monetary display formatting: half-even to two decimal places.
pub fn money(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

#[derive(Serialize)]
struct ItemRow {
    description: String,
    qty: String,
    rate: String,
    amount: String,
    lme_applied: bool,
    lme_percentage: Option<String>,
    provision_value: Option<String>,
}

#[derive(Serialize)]
struct InvoiceContext {
    company_info: String,
    customer_ref: String,
    invoice_number: String,
    invoice_date: String,
    invoice_currency: String,
    sar_rate: Option<String>,
    bank_details: String,
    items: Vec<ItemRow>,
    lme_used: bool,
    total_usd: Option<String>,
    total_sar: String,
    total_usd_words: Option<String>,
    total_sar_words: Option<String>,
}

fn item_row(item: &LineItem) -> ItemRow {
    ItemRow {
        description: item.description.clone(),
        qty: item.quantity.normalize().to_string(),
        rate: money(item.rate),
        amount: money(item.amount()),
        lme_applied: item.lme_applied,
        lme_percentage: item.lme_percentage.map(|p| format!("{:.2}", p)),
        provision_value: item.provision_value.map(money),
    }
}

/// Build the Tera context for a draft and its computed totals.
pub fn build_context(draft: &InvoiceDraft, totals: &InvoiceTotals) -> Result<Context> {
    let (sar_rate, total_usd, total_sar, total_usd_words, total_sar_words) = match &draft.currency
    {
        InvoiceCurrency::Usd { sar_rate } => (
            Some(format!("{:.4}", sar_rate)),
            Some(money(totals.total_primary)),
            money(totals.total_secondary.unwrap_or_default()),
            Some(totals.total_words.clone()),
            None,
        ),
        InvoiceCurrency::Sar => (
            None,
            None,
            money(totals.total_primary),
            None,
            Some(totals.total_words.clone()),
        ),
    };

    let context = InvoiceContext {
        company_info: bankfmt::multiline_html(&draft.company_info),
        customer_ref: bankfmt::multiline_html(&draft.customer_ref),
        invoice_number: draft.invoice_number.clone(),
        invoice_date: draft.invoice_date.format("%Y-%m-%d").to_string(),
        invoice_currency: draft.currency.label().to_string(),
        sar_rate,
        bank_details: bankfmt::format_bank_details(&draft.bank_details),
        items: draft.items.iter().map(item_row).collect(),
        lme_used: draft.items.iter().any(|i| i.lme_applied),
        total_usd,
        total_sar,
        total_usd_words,
        total_sar_words,
    };
    Ok(Context::from_serialize(&context)?)
}

/// Render the invoice from the external template directory. A missing
/// template aborts the generation; nothing partial is produced.
pub fn render_invoice(
    template_dir: &Path,
    draft: &InvoiceDraft,
    totals: &InvoiceTotals,
) -> Result<String> {
    let template_path = template_dir.join(TEMPLATE_NAME);
    if !template_path.exists() {
        return Err(InvoiceError::TemplateMissing(template_path));
    }

    let tera = Tera::new(&format!("{}/*.html", template_dir.display()))?;
    let context = build_context(draft, totals)?;
    Ok(tera.render(TEMPLATE_NAME, &context)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn draft(currency: InvoiceCurrency) -> InvoiceDraft {
        InvoiceDraft {
            company_info: "Acme FZE\nJebel Ali".into(),
            customer_ref: "CNTR: 1ST".into(),
            invoice_number: "30250124".into(),
            invoice_date: NaiveDate::from_ymd_opt(2025, 1, 24).unwrap(),
            bank_details: "SWIFT CODE:RIBLSARI".into(),
            items: vec![LineItem::flat("Cu scrap", dec!(2), dec!(10))],
            currency,
        }
    }

    #[test]
    fn money_formats_two_places_half_even() {
        assert_eq!(money(dec!(35)), "35.00");
        assert_eq!(money(dec!(2.345)), "2.34");
        assert_eq!(money(dec!(2.355)), "2.36");
    }

    #[test]
    fn usd_context_carries_conversion_fields() {
        let d = draft(InvoiceCurrency::Usd { sar_rate: dec!(3.7475) });
        let totals = crate::totals::compute(&d.items, &d.currency);
        let ctx = build_context(&d, &totals).unwrap();
        let json = ctx.into_json();
        assert_eq!(json["invoice_currency"], "USD");
        assert_eq!(json["sar_rate"], "3.7475");
        assert_eq!(json["total_usd"], "20.00");
        assert_eq!(json["total_sar"], "74.95");
        assert_eq!(json["total_usd_words"], "Twenty dollars and zero cents");
        assert!(json["total_sar_words"].is_null());
        assert_eq!(json["invoice_date"], "2025-01-24");
    }

    #[test]
    fn sar_context_has_no_conversion_fields() {
        let d = draft(InvoiceCurrency::Sar);
        let totals = crate::totals::compute(&d.items, &d.currency);
        let json = build_context(&d, &totals).unwrap().into_json();
        assert!(json["sar_rate"].is_null());
        assert!(json["total_usd"].is_null());
        assert_eq!(json["total_sar"], "20.00");
        assert_eq!(json["total_sar_words"], "Twenty point zero zero");
    }

    #[test]
    fn lme_fields_flow_into_item_rows() {
        let mut d = draft(InvoiceCurrency::Sar);
        d.items = vec![LineItem::lme("Cu scrap", dec!(2), dec!(8000), dec!(75)).unwrap()];
        let totals = crate::totals::compute(&d.items, &d.currency);
        let json = build_context(&d, &totals).unwrap().into_json();
        assert_eq!(json["lme_used"], true);
        assert_eq!(json["items"][0]["rate"], "6000.00");
        assert_eq!(json["items"][0]["lme_percentage"], "75.00");
        assert_eq!(json["items"][0]["provision_value"], "8000.00");
    }

    #[test]
    fn missing_template_aborts_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let d = draft(InvoiceCurrency::Sar);
        let totals = crate::totals::compute(&d.items, &d.currency);
        match render_invoice(dir.path(), &d, &totals) {
            Err(InvoiceError::TemplateMissing(path)) => {
                assert!(path.ends_with("invoice.html"))
            }
            other => panic!("expected missing-template error, got {:?}", other.map(|_| ())),
        }
    }
}
