//! Row extraction: one heterogeneous sheet row → zero or one [`Contact`].
//!
//! The source sheets are maintained by hand in two languages, so every
//! logical field is reachable under several column headers. The mapping is
//! a declarative alias table rather than a conditional chain, so it can be
//! tested and extended on its own.

use chrono::Utc;
use uuid::Uuid;

use crate::{
  category::detect_category,
  contact::{Contact, PLACEHOLDER_NAME, avatar_color},
  error::{Error, Result},
  normalize::{clean_phone, clean_telegram},
};

/// A raw sheet row: column header → cell value, as decoded upstream.
pub type Row = std::collections::BTreeMap<String, String>;

/// Accepted column headers per logical field, in priority order: the first
/// alias with a non-empty value wins.
pub const NAME_ALIASES: &[&str] = &["الاسم", "اسم", "Name", "name"];
pub const LAST_NAME_ALIASES: &[&str] = &["اللقب", "لقب", "Last Name", "lastName"];
pub const PHONE_ALIASES: &[&str] = &["رقم الهاتف", "هاتف", "Phone", "phone"];
pub const WHATSAPP_ALIASES: &[&str] = &["رقم الواتساب", "واتساب", "WhatsApp", "whatsapp"];
pub const TELEGRAM_ALIASES: &[&str] = &["حساب التليجرام", "تليجرام", "Telegram", "telegram"];
pub const ADDRESS_ALIASES: &[&str] = &["العنوان", "عنوان", "Address", "address"];

/// Resolve a logical field from `row` by scanning `aliases` in order.
/// Values are trimmed; a whitespace-only cell counts as absent.
pub fn resolve_field(row: &Row, aliases: &[&str]) -> String {
  for alias in aliases {
    if let Some(value) = row.get(*alias) {
      let value = value.trim();
      if !value.is_empty() {
        return value.to_string();
      }
    }
  }
  String::new()
}

/// Extract one [`Contact`] from a sheet row.
///
/// Fails with [`Error::NoIdentifyingField`] when name, phone, whatsapp, and
/// telegram are all empty after alias resolution — such a row carries
/// nothing a person could be reached by.
pub fn extract_contact(row: &Row) -> Result<Contact> {
  let name = resolve_field(row, NAME_ALIASES);
  let last_name = resolve_field(row, LAST_NAME_ALIASES);
  let phone = resolve_field(row, PHONE_ALIASES);
  let whatsapp = resolve_field(row, WHATSAPP_ALIASES);
  let telegram = resolve_field(row, TELEGRAM_ALIASES);
  let address = resolve_field(row, ADDRESS_ALIASES);

  if name.is_empty() && phone.is_empty() && whatsapp.is_empty() && telegram.is_empty() {
    return Err(Error::NoIdentifyingField);
  }

  let category = detect_category(&name, &address);
  let display_name = if name.is_empty() {
    PLACEHOLDER_NAME.to_string()
  } else {
    name
  };

  Ok(Contact {
    id: Uuid::new_v4(),
    avatar_color: avatar_color(&display_name).to_string(),
    name: display_name,
    last_name,
    phone: clean_phone(&phone),
    whatsapp: clean_phone(&whatsapp),
    telegram: clean_telegram(&telegram),
    address,
    category,
    created_at: Utc::now(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::category::Category;

  fn row(pairs: &[(&str, &str)]) -> Row {
    pairs
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect()
  }

  #[test]
  fn arabic_headers_resolve() {
    let r = row(&[
      ("الاسم", "سامر"),
      ("رقم الهاتف", "0991234567"),
      ("العنوان", "دمشق"),
    ]);
    let c = extract_contact(&r).unwrap();
    assert_eq!(c.name, "سامر");
    assert_eq!(c.phone, "+963991234567");
    assert_eq!(c.address, "دمشق");
  }

  #[test]
  fn english_headers_resolve() {
    let r = row(&[("Name", "Alice"), ("WhatsApp", "0991234567")]);
    let c = extract_contact(&r).unwrap();
    assert_eq!(c.name, "Alice");
    assert_eq!(c.whatsapp, "+963991234567");
  }

  #[test]
  fn alias_priority_prefers_arabic_header() {
    // Both an Arabic and an English name column are present and non-empty;
    // the Arabic one is listed first and must win.
    let r = row(&[("الاسم", "سامر"), ("Name", "Samer"), ("Phone", "0991234567")]);
    let c = extract_contact(&r).unwrap();
    assert_eq!(c.name, "سامر");
  }

  #[test]
  fn whitespace_only_cell_falls_through_to_next_alias() {
    let r = row(&[("الاسم", "   "), ("Name", "Alice"), ("Phone", "0991234567")]);
    let c = extract_contact(&r).unwrap();
    assert_eq!(c.name, "Alice");
  }

  #[test]
  fn row_without_any_identifying_field_is_rejected() {
    let r = row(&[("العنوان", "دمشق"), ("اللقب", "الحلبي")]);
    assert!(matches!(
      extract_contact(&r),
      Err(Error::NoIdentifyingField)
    ));
  }

  #[test]
  fn blank_name_with_phone_gets_placeholder() {
    let r = row(&[("Phone", "0991234567")]);
    let c = extract_contact(&r).unwrap();
    assert_eq!(c.name, PLACEHOLDER_NAME);
  }

  #[test]
  fn handles_are_normalised() {
    let r = row(&[("Name", "Alice"), ("Telegram", "@@alice_w! ")]);
    let c = extract_contact(&r).unwrap();
    assert_eq!(c.telegram, "alice_w");
  }

  #[test]
  fn category_detected_from_name_and_address() {
    let r = row(&[("Name", "مدير المبيعات"), ("Phone", "0991234567")]);
    let c = extract_contact(&r).unwrap();
    assert_eq!(c.category, Category::Management);
  }

  #[test]
  fn junk_phone_becomes_empty_not_error() {
    let r = row(&[("Name", "Alice"), ("Phone", "123")]);
    let c = extract_contact(&r).unwrap();
    assert_eq!(c.phone, "");
  }
}
