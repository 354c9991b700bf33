//! Coarse contact categorisation from name/address keywords.
//!
//! The source sheets carry job titles inside the name or address cells
//! ("مدير مبيعات", "Support engineer"), so the classifier is a substring
//! scan over a small bilingual keyword table. Nothing fancier is warranted
//! by the data.

use serde::{Deserialize, Serialize};

/// The fixed category label set. `Team` is the fallback.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
  Management,
  Development,
  Sales,
  Support,
  #[default]
  Team,
}

impl Category {
  pub fn label(&self) -> &'static str {
    match self {
      Self::Management => "management",
      Self::Development => "development",
      Self::Sales => "sales",
      Self::Support => "support",
      Self::Team => "team",
    }
  }
}

impl std::fmt::Display for Category {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.label())
  }
}

/// Ordered keyword table. Order is the tie-break: when keywords from several
/// categories appear, the first listed category wins.
const KEYWORD_TABLE: &[(Category, &[&str])] = &[
  (Category::Management, &[
    "مدير", "رئيس", "مديرة", "رئيسة", "manager", "director", "chief",
  ]),
  (Category::Development, &[
    "مطور", "مهندس", "مبرمج", "مصمم", "developer", "engineer", "programmer", "designer",
  ]),
  (Category::Sales, &["مبيعات", "تسويق", "تجاري", "sales", "marketing"]),
  (Category::Support, &["دعم", "خدمة", "مشرف", "support", "service"]),
];

/// Classify a contact from its name and address text.
///
/// An empty name maps straight to [`Category::Team`]; so does text matching
/// no keyword set.
pub fn detect_category(name: &str, address: &str) -> Category {
  if name.is_empty() {
    return Category::Team;
  }

  let haystack = format!("{name} {address}").to_lowercase();
  for (category, keywords) in KEYWORD_TABLE {
    if keywords.iter().any(|k| haystack.contains(k)) {
      return *category;
    }
  }
  Category::Team
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_name_is_team() {
    assert_eq!(detect_category("", "دعم فني"), Category::Team);
  }

  #[test]
  fn arabic_keywords_match() {
    assert_eq!(detect_category("مدير المشروع", ""), Category::Management);
    assert_eq!(detect_category("سامر", "قسم الدعم"), Category::Support);
  }

  #[test]
  fn english_keywords_match_case_insensitively() {
    assert_eq!(detect_category("Alice", "Sales office"), Category::Sales);
    assert_eq!(detect_category("Backend Engineer", ""), Category::Development);
  }

  #[test]
  fn first_listed_category_wins_ties() {
    // Both a management and a sales keyword present.
    assert_eq!(detect_category("مدير مبيعات", ""), Category::Management);
  }

  #[test]
  fn no_keyword_falls_back_to_team() {
    assert_eq!(detect_category("Bob", "Main street 1"), Category::Team);
  }
}
