//! In-memory search, filter, and sort over the resident contact set.
//!
//! Pure: no I/O, no mutation of the input. The pipeline order — search,
//! then channel filter, then sort — is part of the contract; reordering it
//! changes results when ties exist.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, contact::Contact};

// ─── Query parameters ────────────────────────────────────────────────────────

/// Restrict results to contacts reachable over one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelFilter {
  #[default]
  All,
  Phone,
  Whatsapp,
  Telegram,
}

impl FromStr for ChannelFilter {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Error> {
    match s {
      "all" => Ok(Self::All),
      "phone" => Ok(Self::Phone),
      "whatsapp" => Ok(Self::Whatsapp),
      "telegram" => Ok(Self::Telegram),
      other => Err(Error::UnknownChannelFilter(other.to_string())),
    }
  }
}

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
  #[default]
  Name,
  NameDesc,
  Category,
  /// Newest first by creation time.
  Date,
  /// Preserve the source row order.
  Unsorted,
}

impl FromStr for SortKey {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Error> {
    match s {
      "name" => Ok(Self::Name),
      "name-desc" => Ok(Self::NameDesc),
      "category" => Ok(Self::Category),
      "date" => Ok(Self::Date),
      "unsorted" | "default" => Ok(Self::Unsorted),
      other => Err(Error::UnknownSortKey(other.to_string())),
    }
  }
}

/// Parameters for [`run_query`].
#[derive(Debug, Clone, Default)]
pub struct ContactQuery {
  /// Case-insensitive substring over every textual field; empty = no search.
  pub search: String,
  pub filter: ChannelFilter,
  pub sort:   SortKey,
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// Apply search, channel filter, and sort over `contacts`.
///
/// Idempotent for a fixed input: running the same query twice yields the
/// same output.
pub fn run_query(contacts: &[Contact], query: &ContactQuery) -> Vec<Contact> {
  let needle = query.search.trim().to_lowercase();

  let mut result: Vec<Contact> = contacts
    .iter()
    .filter(|c| needle.is_empty() || haystack(c).contains(&needle))
    .filter(|c| match query.filter {
      ChannelFilter::All => true,
      ChannelFilter::Phone => !c.phone.is_empty(),
      ChannelFilter::Whatsapp => !c.whatsapp.is_empty(),
      ChannelFilter::Telegram => !c.telegram.is_empty(),
    })
    .cloned()
    .collect();

  match query.sort {
    SortKey::Name => result.sort_by(|a, b| collate(&a.name, &b.name)),
    SortKey::NameDesc => result.sort_by(|a, b| collate(&b.name, &a.name)),
    SortKey::Category => {
      result.sort_by(|a, b| collate(a.category.label(), b.category.label()));
    }
    SortKey::Date => result.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    SortKey::Unsorted => {}
  }

  result
}

/// All searchable text of a contact, lower-cased and space-joined.
fn haystack(c: &Contact) -> String {
  format!(
    "{} {} {} {} {} {} {}",
    c.name, c.last_name, c.phone, c.whatsapp, c.telegram, c.address, c.category,
  )
  .to_lowercase()
}

/// Case-insensitive collation. Stable sorts keep equal keys in input order.
fn collate(a: &str, b: &str) -> std::cmp::Ordering {
  a.to_lowercase().cmp(&b.to_lowercase())
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, Utc};
  use uuid::Uuid;

  use super::*;
  use crate::{category::Category, contact::avatar_color};

  fn contact(name: &str, phone: &str, telegram: &str, age_mins: i64) -> Contact {
    Contact {
      id:           Uuid::new_v4(),
      name:         name.to_string(),
      last_name:    String::new(),
      phone:        phone.to_string(),
      whatsapp:     String::new(),
      telegram:     telegram.to_string(),
      address:      String::new(),
      category:     Category::Team,
      created_at:   Utc::now() - Duration::minutes(age_mins),
      avatar_color: avatar_color(name).to_string(),
    }
  }

  fn sample_set() -> Vec<Contact> {
    vec![
      contact("carol", "+963991234567", "", 30),
      contact("Alice", "", "alice_w", 10),
      contact("bob", "+963991111111", "bob99", 20),
    ]
  }

  #[test]
  fn empty_query_sorts_by_name_ascending() {
    let q = ContactQuery::default();
    let out = run_query(&sample_set(), &q);
    let names: Vec<_> = out.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Alice", "bob", "carol"]);
  }

  #[test]
  fn query_is_idempotent() {
    let q = ContactQuery::default();
    let contacts = sample_set();
    let first = run_query(&contacts, &q);
    let second = run_query(&contacts, &q);
    let ids: Vec<_> = first.iter().map(|c| c.id).collect();
    let ids2: Vec<_> = second.iter().map(|c| c.id).collect();
    assert_eq!(ids, ids2);
  }

  #[test]
  fn search_matches_any_textual_field() {
    let q = ContactQuery {
      search: "ALICE_W".into(),
      ..Default::default()
    };
    let out = run_query(&sample_set(), &q);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].name, "Alice");
  }

  #[test]
  fn channel_filter_keeps_only_nonempty_field() {
    let q = ContactQuery {
      filter: ChannelFilter::Telegram,
      sort: SortKey::Unsorted,
      ..Default::default()
    };
    let out = run_query(&sample_set(), &q);
    let names: Vec<_> = out.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Alice", "bob"]);
  }

  #[test]
  fn date_sort_is_newest_first() {
    let q = ContactQuery {
      sort: SortKey::Date,
      ..Default::default()
    };
    let out = run_query(&sample_set(), &q);
    let names: Vec<_> = out.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Alice", "bob", "carol"]);
  }

  #[test]
  fn unsorted_preserves_input_order() {
    let q = ContactQuery {
      sort: SortKey::Unsorted,
      ..Default::default()
    };
    let out = run_query(&sample_set(), &q);
    let names: Vec<_> = out.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["carol", "Alice", "bob"]);
  }

  #[test]
  fn unknown_sort_key_is_a_parse_error() {
    assert!("nme".parse::<SortKey>().is_err());
    assert_eq!("name-desc".parse::<SortKey>().unwrap(), SortKey::NameDesc);
  }
}
