//! The canonical contact record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::Category;

/// Label used when the source row has no name but does have a contactable
/// field.
pub const PLACEHOLDER_NAME: &str = "Team member";

/// Fixed avatar palette; a contact's colour is picked by the first character
/// of its name, so it is stable across re-renders and re-sorts.
pub const AVATAR_PALETTE: [&str; 8] = [
  "#2563eb", "#7c3aed", "#0d9488", "#f59e0b", "#10b981", "#f43f5e",
  "#8b5cf6", "#ec4899",
];

/// A normalised team contact.
///
/// `phone` and `whatsapp` are either empty or in canonical form (digits,
/// optional `+` country code, ≥ 10 chars). `telegram` is either empty or a
/// bare `[A-Za-z0-9_]+` handle. Empty strings mean "field absent" — the
/// source sheets are too ragged for anything stricter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
  /// Session-scoped identity; regenerated on every sync.
  pub id:           Uuid,
  pub name:         String,
  #[serde(default)]
  pub last_name:    String,
  #[serde(default)]
  pub phone:        String,
  #[serde(default)]
  pub whatsapp:     String,
  #[serde(default)]
  pub telegram:     String,
  #[serde(default)]
  pub address:      String,
  pub category:     Category,
  pub created_at:   DateTime<Utc>,
  pub avatar_color: String,
}

impl Contact {
  /// Display name: `name` plus `last_name` when present.
  pub fn full_name(&self) -> String {
    if self.last_name.is_empty() {
      self.name.clone()
    } else {
      format!("{} {}", self.name, self.last_name)
    }
  }
}

/// Pick the avatar colour for `name`: first character's code point modulo
/// the palette size. Empty names get the first palette entry.
pub fn avatar_color(name: &str) -> &'static str {
  match name.chars().next() {
    Some(c) => AVATAR_PALETTE[c as usize % AVATAR_PALETTE.len()],
    None => AVATAR_PALETTE[0],
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn avatar_color_is_deterministic() {
    assert_eq!(avatar_color("Alice"), avatar_color("Alfred"));
    assert_eq!(avatar_color(""), AVATAR_PALETTE[0]);
  }

  #[test]
  fn avatar_color_is_in_palette() {
    for name in ["أحمد", "Bob", "张伟", "_x"] {
      assert!(AVATAR_PALETTE.contains(&avatar_color(name)));
    }
  }

  #[test]
  fn full_name_skips_empty_last_name() {
    let mut c = sample();
    assert_eq!(c.full_name(), "Alice");
    c.last_name = "Liddell".into();
    assert_eq!(c.full_name(), "Alice Liddell");
  }

  fn sample() -> Contact {
    Contact {
      id:           Uuid::new_v4(),
      name:         "Alice".into(),
      last_name:    String::new(),
      phone:        String::new(),
      whatsapp:     String::new(),
      telegram:     String::new(),
      address:      String::new(),
      category:     Category::Team,
      created_at:   Utc::now(),
      avatar_color: avatar_color("Alice").to_string(),
    }
  }
}
