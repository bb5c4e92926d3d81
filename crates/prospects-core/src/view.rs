//! Filtered and sorted projections of the prospect list.
//!
//! Projections borrow from the repository and are recomputed on demand; the
//! stored order is never touched.

use std::cmp::Ordering;

use strum::{Display, EnumIter, EnumString};

use crate::prospect::Prospect;

// ─── Filter ──────────────────────────────────────────────────────────────────

/// Which subset of prospects to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Filter {
  #[default]
  #[strum(to_string = "all", serialize = "none", serialize = "everyone")]
  All,
  Contacted,
  Uncontacted,
}

impl Filter {
  pub fn matches(self, prospect: &Prospect) -> bool {
    match self {
      Self::All => true,
      Self::Contacted => prospect.is_contacted(),
      Self::Uncontacted => !prospect.is_contacted(),
    }
  }

  /// Screen title for this subset.
  pub fn title(self) -> &'static str {
    match self {
      Self::All => "Everyone",
      Self::Contacted => "Contacted People",
      Self::Uncontacted => "Uncontacted People",
    }
  }
}

// ─── Sort ────────────────────────────────────────────────────────────────────

/// Ordering by name. Comparison is byte-wise and case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Sort {
  #[default]
  #[strum(to_string = "ascending", serialize = "asc", serialize = "a-z")]
  Ascending,
  #[strum(to_string = "descending", serialize = "desc", serialize = "z-a")]
  Descending,
}

impl Sort {
  pub fn label(self) -> &'static str {
    match self {
      Self::Ascending => "A to Z",
      Self::Descending => "Z to A",
    }
  }

  /// The other order.
  pub fn flipped(self) -> Self {
    match self {
      Self::Ascending => Self::Descending,
      Self::Descending => Self::Ascending,
    }
  }

  fn compare(self, a: &Prospect, b: &Prospect) -> Ordering {
    match self {
      Self::Ascending => a.name.cmp(&b.name),
      Self::Descending => b.name.cmp(&a.name),
    }
  }
}

// ─── Projection ──────────────────────────────────────────────────────────────

/// Filter `people` by `filter`, then sort the survivors by `sort`.
///
/// Both stages are stable: prospects with equal names keep their stored
/// relative order under either sort.
pub fn project(people: &[Prospect], filter: Filter, sort: Sort) -> Vec<&Prospect> {
  let mut shown: Vec<&Prospect> = people.iter().filter(|p| filter.matches(p)).collect();
  shown.sort_by(|a, b| sort.compare(a, b));
  shown
}
