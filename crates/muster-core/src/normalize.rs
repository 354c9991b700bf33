//! Field normalisation for phone numbers and Telegram handles.
//!
//! Both functions are pure, total, and idempotent: they never fail, and
//! re-applying one to its own output is a no-op. Malformed input yields an
//! empty string rather than an error — a contact with a junk phone number is
//! still a contact.

/// The `+`-prefixed country code applied by the prefix rewrites.
pub const COUNTRY_CODE: &str = "+963";

/// Minimum accepted length of a cleaned number, counting the `+`.
const MIN_PHONE_LEN: usize = 10;

/// Normalise a raw phone number to canonical form.
///
/// Strips every non-digit, then applies the Syrian numbering-plan rewrites
/// in order:
/// - `00963…` (international dial prefix) → `+963…`
/// - `963…` (bare country code) → `+963…`
/// - `0…` (trunk prefix) → `+963` + rest
/// - a 9-digit number starting with `9` (bare mobile) → `+963` + all digits
///
/// Returns the empty string when the result is shorter than 10 characters.
pub fn clean_phone(raw: &str) -> String {
  let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
  if digits.is_empty() {
    return String::new();
  }

  let cleaned = if let Some(rest) = digits.strip_prefix("00963") {
    format!("{COUNTRY_CODE}{rest}")
  } else if digits.starts_with("963") {
    format!("+{digits}")
  } else if let Some(rest) = digits.strip_prefix('0') {
    format!("{COUNTRY_CODE}{rest}")
  } else if digits.len() == 9 && digits.starts_with('9') {
    format!("{COUNTRY_CODE}{digits}")
  } else {
    digits
  };

  if cleaned.len() >= MIN_PHONE_LEN {
    cleaned
  } else {
    String::new()
  }
}

/// Normalise a raw Telegram handle: strip leading `@`s and whitespace, then
/// drop every character outside `[A-Za-z0-9_]`.
pub fn clean_telegram(raw: &str) -> String {
  raw
    .trim_start_matches('@')
    .chars()
    .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
    .collect()
}
