//! Plain-text rendering of contacts and action history.

use muster_core::Contact;
use muster_store_sqlite::ActionEntry;

/// Print one line per contact: name, category, and reachable channels.
pub fn print_contacts(contacts: &[Contact]) {
  if contacts.is_empty() {
    println!("no contacts");
    return;
  }

  for contact in contacts {
    let mut channels = Vec::new();
    if !contact.phone.is_empty() {
      channels.push(format!("tel {}", contact.phone));
    }
    if !contact.whatsapp.is_empty() {
      channels.push(format!("wa {}", contact.whatsapp));
    }
    if !contact.telegram.is_empty() {
      channels.push(format!("tg @{}", contact.telegram));
    }

    let mut line = format!("{}  [{}]", contact.full_name(), contact.category);
    if !contact.address.is_empty() {
      line.push_str(&format!("  {}", contact.address));
    }
    if !channels.is_empty() {
      line.push_str(&format!("  |  {}", channels.join(", ")));
    }
    println!("{line}");
  }
  println!("({} contacts)", contacts.len());
}

/// Print the action history, newest first.
pub fn print_actions(actions: &[ActionEntry]) {
  if actions.is_empty() {
    println!("no recorded actions");
    return;
  }
  for action in actions {
    println!(
      "{}  {:<8}  {}  ({})",
      action.logged_at.format("%Y-%m-%d %H:%M:%S"),
      action.kind.as_str(),
      action.target,
      action.name,
    );
  }
}
