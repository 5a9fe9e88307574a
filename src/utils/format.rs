use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::api::backoffice::Direction;

/// `1234.5` -> `1,234.50 EUR`
pub fn format_amount(amount: Decimal, currency: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{}{}.{} {}", sign, grouped, frac_part, currency).trim_end().to_string()
}

/// Amount prefixed with `-` for debits and `+` for credits
pub fn format_signed(amount: Decimal, direction: Option<Direction>, currency: &str) -> String {
    let body = format_amount(amount.abs(), currency);
    match direction {
        Some(d) => format!("{} {}", d.sign(), body),
        None => body,
    }
}

/// Render an ISO timestamp as `dd/mm/yyyy HH:MM`; `-` when absent.
///
/// Accepts RFC 3339 (with offset), naive local date-times and bare dates.
/// Anything else is shown as received.
pub fn format_timestamp(raw: Option<&str>) -> String {
    let raw = match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => raw,
        None => return "-".to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%d/%m/%Y %H:%M").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%d/%m/%Y %H:%M").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return dt.format("%d/%m/%Y %H:%M").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%d/%m/%Y").to_string();
    }

    raw.to_string()
}

/// `CARD_PAYMENT` -> `CARD PAYMENT`
pub fn humanize_code(code: &str) -> String {
    code.replace('_', " ")
}

/// Text or a placeholder for absent/blank values
pub fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(placeholder)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_groups_thousands() {
        assert_eq!(format_amount(Decimal::new(123450, 2), "EUR"), "1,234.50 EUR");
        assert_eq!(format_amount(Decimal::from(100), "EUR"), "100.00 EUR");
        assert_eq!(format_amount(Decimal::new(1234567891, 2), "EUR"), "12,345,678.91 EUR");
        assert_eq!(format_amount(Decimal::new(-2550, 2), "USD"), "-25.50 USD");
        assert_eq!(format_amount(Decimal::new(5, 3), ""), "0.01");
    }

    #[test]
    fn test_format_signed() {
        assert_eq!(
            format_signed(Decimal::new(250, 2), Some(Direction::Debit), "EUR"),
            "- 2.50 EUR"
        );
        assert_eq!(
            format_signed(Decimal::from(10), Some(Direction::Credit), "EUR"),
            "+ 10.00 EUR"
        );
        assert_eq!(format_signed(Decimal::from(10), None, "EUR"), "10.00 EUR");
    }

    #[test]
    fn test_format_timestamp_variants() {
        assert_eq!(format_timestamp(Some("2024-05-02T09:30:00Z")), "02/05/2024 09:30");
        assert_eq!(format_timestamp(Some("2024-05-02T09:30:00.123456")), "02/05/2024 09:30");
        assert_eq!(format_timestamp(Some("2024-05-02T09:30")), "02/05/2024 09:30");
        assert_eq!(format_timestamp(Some("2024-05-02")), "02/05/2024");
        assert_eq!(format_timestamp(Some("yesterday")), "yesterday");
        assert_eq!(format_timestamp(None), "-");
        assert_eq!(format_timestamp(Some("  ")), "-");
    }

    #[test]
    fn test_humanize_and_placeholder() {
        assert_eq!(humanize_code("SEPA_INSTANT_CREDIT"), "SEPA INSTANT CREDIT");
        assert_eq!(or_placeholder(None, "-"), "-");
        assert_eq!(or_placeholder(Some(" "), "N/A"), "N/A");
        assert_eq!(or_placeholder(Some("REF-1"), "-"), "REF-1");
    }
}
