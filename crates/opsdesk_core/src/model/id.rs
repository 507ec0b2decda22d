//! Record identifier generation.
//!
//! # Invariants
//! - Generated ids never collide with the ids passed in as `existing`.
//! - Sequential ids always exceed the highest numeric suffix in use, so
//!   deleting the newest record never causes an id to be handed out twice
//!   within one session.
//! - Once the highest suffix is `u64::MAX`, sequential generation reports
//!   exhaustion instead of wrapping or reusing an id.

use std::collections::HashSet;
use uuid::Uuid;

/// How a module assigns identifiers to inserted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdStrategy {
    /// `PREFIX-0042` style ids, numbered above the highest existing suffix.
    ///
    /// `width` is the minimum number of digits; longer numbers are kept as-is.
    Sequential {
        prefix: &'static str,
        width: usize,
    },
    /// `PREFIX-<uuid v4>` ids.
    PrefixedUuid {
        prefix: &'static str,
    },
}

impl IdStrategy {
    /// Generates an id that is not contained in `existing`.
    ///
    /// Returns `None` when a sequential strategy has no suffix left above the
    /// highest one in use.
    pub fn next_id<'a, I>(self, existing: I) -> Option<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        match self {
            Self::Sequential { prefix, width } => {
                let highest = existing
                    .into_iter()
                    .filter_map(|id| sequence_number(prefix, id))
                    .max();
                let next = match highest {
                    Some(highest) => highest.checked_add(1)?,
                    None => 1,
                };
                Some(format!("{prefix}-{next:0width$}"))
            }
            Self::PrefixedUuid { prefix } => {
                let taken: HashSet<&str> = existing.into_iter().collect();
                loop {
                    let id = format!("{prefix}-{}", Uuid::new_v4());
                    if !taken.contains(id.as_str()) {
                        return Some(id);
                    }
                }
            }
        }
    }
}

/// Parses the numeric suffix of `PREFIX-1234`.
pub fn sequence_number(prefix: &str, id: &str) -> Option<u64> {
    let digits = id.strip_prefix(prefix)?.strip_prefix('-')?;
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::{sequence_number, IdStrategy};

    const ORDERS: IdStrategy = IdStrategy::Sequential {
        prefix: "ORD",
        width: 4,
    };

    #[test]
    fn sequential_starts_at_one_and_pads() {
        assert_eq!(ORDERS.next_id(std::iter::empty()).unwrap(), "ORD-0001");
    }

    #[test]
    fn sequential_numbers_above_highest_suffix() {
        let existing = ["ORD-9821", "ORD-0007", "VEN-99999", "ORD-x12"];
        assert_eq!(ORDERS.next_id(existing).unwrap(), "ORD-9822");
    }

    #[test]
    fn sequential_grows_past_width() {
        assert_eq!(ORDERS.next_id(["ORD-9999"]).unwrap(), "ORD-10000");
    }

    #[test]
    fn sequential_reports_exhausted_suffix_space() {
        let top = format!("ORD-{}", u64::MAX);
        assert_eq!(ORDERS.next_id([top.as_str(), "ORD-0001"]), None);

        let below_top = format!("ORD-{}", u64::MAX - 1);
        assert_eq!(
            ORDERS.next_id([below_top.as_str()]),
            Some(format!("ORD-{}", u64::MAX))
        );
    }

    #[test]
    fn prefixed_uuid_has_prefix() {
        let strategy = IdStrategy::PrefixedUuid { prefix: "CMP" };
        let id = strategy.next_id(["CMP-1"]).unwrap();
        assert!(id.starts_with("CMP-"));
        assert_eq!(id.len(), "CMP-".len() + 36);
    }

    #[test]
    fn sequence_number_rejects_foreign_ids() {
        assert_eq!(sequence_number("ORD", "ORD-0042"), Some(42));
        assert_eq!(sequence_number("ORD", "ORD-"), None);
        assert_eq!(sequence_number("ORD", "ORDER-1"), None);
        assert_eq!(sequence_number("ORD", "ORD-+1"), None);
    }
}
