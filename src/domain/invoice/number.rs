use chrono::{Datelike, NaiveDate};

const PREFIX: &str = "INV";

/// Ids carry a four-digit sequence, so a month holds at most this many invoices
pub const MAX_SEQUENCE: u32 = 9999;

/// `INV-YYYYMM-` for the month of `date`
pub fn month_prefix(date: NaiveDate) -> String {
    format!("{}-{:04}{:02}-", PREFIX, date.year(), date.month())
}

/// `INV-YYYYMM-NNNN`
pub fn format_invoice_id(date: NaiveDate, sequence: u32) -> String {
    format!("{}{:04}", month_prefix(date), sequence)
}

/// Next id for the month given the highest sequence already issued in it;
/// `None` once the month's sequence is used up
pub fn next_invoice_id(date: NaiveDate, last_sequence: Option<u32>) -> Option<String> {
    let next = last_sequence.unwrap_or(0).checked_add(1)?;
    (next <= MAX_SEQUENCE).then(|| format_invoice_id(date, next))
}

/// Split an id into (year, month, sequence); `None` unless it is exactly `INV-YYYYMM-NNNN`
pub fn parse_invoice_id(id: &str) -> Option<(i32, u32, u32)> {
    let rest = id.strip_prefix("INV-")?;
    let (period, sequence) = rest.split_once('-')?;
    if period.len() != 6
        || sequence.len() != 4
        || !period.chars().all(|c| c.is_ascii_digit())
        || !sequence.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }

    let year: i32 = period[..4].parse().ok()?;
    let month: u32 = period[4..].parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    let sequence: u32 = sequence.parse().ok()?;
    if sequence == 0 {
        return None;
    }

    Some((year, month, sequence))
}
