//! Currency formatting with locale digit grouping.

use serde::{Deserialize, Serialize};

/// Maximum fraction digits kept when formatting a price.
const MAX_FRACTION_DIGITS: usize = 3;

/// Thousands-separator convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Grouping {
    /// Last three digits, then pairs: `8,12,000` (en-IN).
    #[default]
    Indian,
    /// Groups of three: `812,000` (en-US).
    Western,
}

/// Formats `amount` as `symbol` followed by grouped digits.
///
/// Up to three fraction digits are kept, trailing zeros trimmed.
///
/// ```
/// use gold_rates::{format_money, Grouping};
///
/// assert_eq!(format_money(812000.0, "₹", Grouping::Indian), "₹8,12,000");
/// assert_eq!(format_money(812000.0, "$", Grouping::Western), "$812,000");
/// assert_eq!(format_money(7350.5, "₹", Grouping::Indian), "₹7,350.5");
/// ```
pub fn format_money(amount: f64, symbol: &str, grouping: Grouping) -> String {
    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if amount < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(symbol);
    out.push_str(&group_digits(int_part, grouping));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
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

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(step);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(tail);
    groups.join(",")
}
