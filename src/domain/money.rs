//! Cent rounding and display formatting for quote-currency amounts.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;

/// Digit grouping used when printing amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    /// Lakh/crore grouping: `12,34,567.89`.
    #[default]
    Indian,
    /// Thousands grouping: `1,234,567.89`.
    Western,
}

/// Round to two decimal places, half away from zero, keeping a scale of two.
#[must_use]
pub fn round_cents(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

/// Fixed two-decimal text with an explicit leading sign: `+12.30`, `-0.45`.
#[must_use]
pub fn signed(value: Decimal) -> String {
    let value = round_cents(value);
    if value.is_sign_negative() {
        value.to_string()
    } else {
        format!("+{value}")
    }
}

/// Fixed two-decimal text with digit grouping: `1,23,456.78`.
#[must_use]
pub fn grouped(value: Decimal, grouping: Grouping) -> String {
    let value = round_cents(value);
    let text = value.abs().to_string();
    let (int, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if value.is_sign_negative() { "-" } else { "" };
    format!("{sign}{}.{frac}", group_digits(int, grouping))
}

fn group_digits(digits: &str, grouping: Grouping) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let step = match grouping {
        Grouping::Indian => 2,
        Grouping::Western => 3,
    };

    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(step);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}
