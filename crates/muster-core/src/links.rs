//! Quick-action link builders.
//!
//! Inputs are already-cleaned values from [`crate::normalize`], but the
//! builders re-strip formatting anyway so a pasted raw number still yields
//! a usable link.

/// `tel:` link for a phone number; non-digits are stripped.
pub fn tel_link(phone: &str) -> String {
  format!("tel:{}", digits(phone))
}

/// WhatsApp web link; the number is used without `+` or separators.
pub fn whatsapp_link(number: &str) -> String {
  format!("https://wa.me/{}", digits(number))
}

/// Telegram web link for a bare handle; a leading `@` is tolerated.
pub fn telegram_link(handle: &str) -> String {
  format!("https://t.me/{}", handle.trim_start_matches('@'))
}

fn digits(s: &str) -> String {
  s.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tel_link_strips_plus_and_spaces() {
    assert_eq!(tel_link("+963 991 234 567"), "tel:963991234567");
  }

  #[test]
  fn whatsapp_link_uses_bare_digits() {
    assert_eq!(whatsapp_link("+963991234567"), "https://wa.me/963991234567");
  }

  #[test]
  fn telegram_link_tolerates_at_prefix() {
    assert_eq!(telegram_link("@alice_w"), "https://t.me/alice_w");
    assert_eq!(telegram_link("alice_w"), "https://t.me/alice_w");
  }
}
