//! # Display Formatting
//!
//! Currency and area formatting for front-ends. These follow the browser
//! conventions the calculator was first built against: fixed decimals round
//! exact ties away from zero (`toFixed`), whole amounts round half toward +∞
//! with comma thousands separators.
//!
//! ```rust
//! use pricing_core::format::{format_currency, format_currency_whole};
//!
//! assert_eq!(format_currency(1234.5, 2), "$1234.50");
//! assert_eq!(format_currency_whole(1234.56), "$1,235");
//! ```

use serde::{Deserialize, Serialize};

/// Currency symbol used by the free functions
pub const DEFAULT_SYMBOL: &str = "$";

/// Currency formatter with a configurable symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    pub symbol: String,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat {
            symbol: DEFAULT_SYMBOL.to_string(),
        }
    }
}

impl CurrencyFormat {
    pub fn new(symbol: impl Into<String>) -> Self {
        CurrencyFormat { symbol: symbol.into() }
    }

    /// Symbol followed by the value with `decimals` fixed places.
    pub fn fixed(&self, value: f64, decimals: usize) -> String {
        format!("{}{}", self.symbol, to_fixed(value, decimals))
    }

    /// Symbol followed by the rounded whole value with thousands separators.
    pub fn whole(&self, value: f64) -> String {
        format!("{}{}", self.symbol, group_thousands(round_half_up(value)))
    }
}

/// `$` plus `value` with `decimals` fixed places (`1234.5, 2` → `$1234.50`).
pub fn format_currency(value: f64, decimals: usize) -> String {
    CurrencyFormat::default().fixed(value, decimals)
}

/// `$` plus the rounded whole value, comma-grouped (`1234.56` → `$1,235`).
pub fn format_currency_whole(value: f64) -> String {
    CurrencyFormat::default().whole(value)
}

/// Whole area, comma-grouped (`100000.0` → `100,000`).
pub fn format_area(value: f64) -> String {
    group_thousands(round_half_up(value))
}

/// Percentage with no decimals (`40.0` → `40%`).
pub fn format_percent(percent: f64) -> String {
    format!("{}%", round_half_up(percent))
}

/// Every finite f64 has a decimal expansion that ends within this many places.
const MAX_FRACTION_DIGITS: usize = 1074;

/// Fixed-decimal text with exact ties rounded away from zero.
///
/// `{:.*}` rounds ties to even, so a tie is detected on the exact expansion
/// and rounded up in magnitude by hand.
fn to_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format!("{:.*}", decimals, value);
    }

    let exact = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let point = exact.find('.').unwrap_or(exact.len());
    let (kept, rest) = exact.split_at((point + 1 + decimals).min(exact.len()));
    let is_tie = rest.starts_with('5') && rest[1..].bytes().all(|b| b == b'0');
    if !is_tie {
        return format!("{:.*}", decimals, value);
    }

    let mut digits: Vec<char> = kept.trim_end_matches('.').chars().collect();
    increment_last_digit(&mut digits);
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}", sign, digits.into_iter().collect::<String>())
}

/// Add one unit in the last place of a decimal digit string, carrying left.
fn increment_last_digit(digits: &mut Vec<char>) {
    for ch in digits.iter_mut().rev() {
        match *ch {
            '.' => continue,
            '9' => *ch = '0',
            d => {
                *ch = (d as u8 + 1) as char;
                return;
            }
        }
    }
    digits.insert(0, '1');
}

/// Round half toward positive infinity: 2.5 → 3, -2.5 → -2.
fn round_half_up(value: f64) -> f64 {
    let rounded = (value + 0.5).floor();
    // avoid "-0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0.0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
