use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::InvoiceItem;
use super::InvoiceItemInput;

/// Amounts derived from the line items and the tax/discount percentages
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
    pub total: Decimal,
}

/// Largest amount a `NUMERIC(14, 2)` column holds: 999 999 999 999.99
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 2);

/// Round half away from zero to cents, always carrying two decimals
pub fn to_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// `percent`% of an already stored amount
pub fn percent_of(amount: Decimal, percent: Decimal) -> Decimal {
    to_money(amount.saturating_mul(percent) / Decimal::ONE_HUNDRED)
}

fn fits(amount: Decimal) -> bool {
    amount.abs() <= MAX_AMOUNT
}

/// Price each input line as hours × rate
pub fn price_items(inputs: &[InvoiceItemInput]) -> Result<Vec<InvoiceItem>, String> {
    inputs
        .iter()
        .enumerate()
        .map(|(i, input)| {
            let total = input
                .hours
                .checked_mul(input.rate)
                .map(to_money)
                .filter(|total| fits(*total))
                .ok_or_else(|| format!("Item {} amount is too large", i + 1))?;

            Ok(InvoiceItem {
                feature: input.feature.trim().to_string(),
                description: input.description.trim().to_string(),
                hours: input.hours,
                rate: input.rate,
                total,
            })
        })
        .collect()
}

/// subtotal + subtotal × tax% − subtotal × discount%
pub fn calculate_totals(
    items: &[InvoiceItem],
    tax: Decimal,
    discount: Decimal,
) -> Result<InvoiceTotals, String> {
    let too_large = || "Invoice amounts are too large".to_string();
    let hundred = Decimal::ONE_HUNDRED;

    let subtotal = items
        .iter()
        .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.total))
        .ok_or_else(too_large)?;
    let tax_amount = subtotal.checked_mul(tax).ok_or_else(too_large)? / hundred;
    let discount_amount = subtotal.checked_mul(discount).ok_or_else(too_large)? / hundred;
    let total = subtotal
        .checked_add(tax_amount)
        .and_then(|sum| sum.checked_sub(discount_amount))
        .ok_or_else(too_large)?;

    let totals = InvoiceTotals {
        subtotal: to_money(subtotal),
        tax_amount: to_money(tax_amount),
        discount_amount: to_money(discount_amount),
        total: to_money(total),
    };
    if !fits(totals.subtotal) || !fits(totals.total) {
        return Err(too_large());
    }
    Ok(totals)
}
