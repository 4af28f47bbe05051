// marketplace/src/util/format.rs

//! Display helpers for prices, timestamps, and names (Philippine locale).

use chrono::{DateTime, TimeZone};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Display;

pub const DEFAULT_TRUNCATE_LENGTH: usize = 50;
pub const CURRENCY_SYMBOL: &str = "₱";

/// Up to two upper-cased initials, e.g. `"juan  dela cruz"` -> `"JD"`.
pub fn avatar_text(name: &str) -> String {
  name
    .split_whitespace()
    .take(2)
    .filter_map(|part| part.chars().next())
    .flat_map(char::to_uppercase)
    .collect()
}

/// `₱1,234.50`; negatives render as `-₱1,234.50`.
pub fn format_currency(value: Decimal) -> String {
  let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
  let sign = if rounded < Decimal::ZERO { "-" } else { "" };
  let plain = format!("{:.2}", rounded.abs());
  let (whole, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

  let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
  for (i, ch) in whole.chars().enumerate() {
    if i > 0 && (whole.len() - i) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(ch);
  }

  format!("{}{}{}.{}", sign, CURRENCY_SYMBOL, grouped, fraction)
}

/// `Oct 16, 2026, 02:30 PM` in the timestamp's own timezone.
pub fn format_date<Tz>(timestamp: &DateTime<Tz>) -> String
where
  Tz: TimeZone,
  Tz::Offset: Display,
{
  timestamp.format("%b %-d, %Y, %I:%M %p").to_string()
}

/// Cuts `text` to `max_length` characters and appends `...` when anything was cut.
pub fn truncate_text(text: &str, max_length: usize) -> String {
  match text.char_indices().nth(max_length) {
    None => text.to_string(),
    Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
  }
}
