use rust_decimal::Decimal;

use crate::model::{InvoiceCurrency, InvoiceTotals, LineItem};
use crate::words;

/// Compute the invoice totals for the given items and currency mode.
///
/// Pure function of its inputs. The primary total is the exact sum of
/// quantity × rate over the items (an empty list sums to zero); in USD mode
/// the secondary total is the primary multiplied by the conversion rate, and
/// the wording follows the currency's convention.
pub fn compute(items: &[LineItem], currency: &InvoiceCurrency) -> InvoiceTotals {
    let total_primary: Decimal = items.iter().map(LineItem::amount).sum();

    match currency {
        InvoiceCurrency::Usd { sar_rate } => InvoiceTotals {
            total_primary,
            total_secondary: Some(total_primary * sar_rate),
            total_words: words::usd_currency(total_primary),
        },
        InvoiceCurrency::Sar => InvoiceTotals {
            total_primary,
            total_secondary: None,
            total_words: words::sar_digitwise(total_primary),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn flat(qty: Decimal, rate: Decimal) -> LineItem {
        LineItem::flat("item", qty, rate)
    }

    #[test]
    fn primary_total_is_sum_of_pairwise_products() {
        let items = vec![flat(dec!(2), dec!(10)), flat(dec!(3), dec!(5))];
        let totals = compute(&items, &InvoiceCurrency::Sar);
        assert_eq!(totals.total_primary, dec!(35));
        assert_eq!(totals.total_secondary, None);
    }

    #[test]
    fn summation_is_order_independent() {
        let a = vec![
            flat(dec!(19.332), dec!(8380)),
            flat(dec!(2.5), dec!(7210.40)),
            flat(dec!(0.001), dec!(3)),
        ];
        let mut b = a.clone();
        b.reverse();
        let currency = InvoiceCurrency::Sar;
        assert_eq!(
            compute(&a, &currency).total_primary,
            compute(&b, &currency).total_primary
        );
    }

    #[test]
    fn secondary_total_is_primary_times_rate() {
        let items = vec![flat(dec!(2), dec!(10)), flat(dec!(3), dec!(5))];
        let totals = compute(&items, &InvoiceCurrency::Usd { sar_rate: dec!(2.0) });
        assert_eq!(totals.total_primary, dec!(35));
        assert_eq!(totals.total_secondary, Some(dec!(70.0)));
    }

    #[test]
    fn empty_item_list_totals_zero() {
        let totals = compute(&[], &InvoiceCurrency::Usd { sar_rate: dec!(3.7475) });
        assert_eq!(totals.total_primary, Decimal::ZERO);
        assert_eq!(totals.total_secondary, Some(Decimal::ZERO));
        assert_eq!(totals.total_words, "Zero dollars and zero cents");
    }

    #[test]
    fn lme_effective_rate_is_monotonic_in_percentage() {
        let provision = dec!(8000);
        let mut last = Decimal::ZERO;
        for pct in [dec!(40), dec!(55.5), dec!(75), dec!(99.99), dec!(100)] {
            let item = LineItem::lme("Cu scrap", dec!(1), provision, pct).unwrap();
            assert!(item.rate >= last);
            last = item.rate;
        }
        // at 100% the effective rate is exactly the provision value
        assert_eq!(last, provision);
    }

    #[test]
    fn wording_follows_currency_convention() {
        let items = vec![flat(dec!(1), dec!(100))];
        let usd = compute(&items, &InvoiceCurrency::Usd { sar_rate: dec!(3.7475) });
        assert_eq!(usd.total_words, "One hundred dollars and zero cents");
        let sar = compute(&items, &InvoiceCurrency::Sar);
        assert_eq!(sar.total_words, "One hundred point zero zero");
    }
}
