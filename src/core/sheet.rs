use crate::core::person::PersonName;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// What one person actually paid toward the shared total.
///
/// The `id` is a display-only serial number; the engine matches
/// participants by `name`.
///
/// # Examples
///
/// ```
/// use split_settle::core::person::PersonName;
/// use split_settle::core::sheet::Contribution;
///
/// let c = Contribution::new(1, PersonName::new("alice"), 42.50);
/// assert_eq!(c.paid, 42.50);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    /// Display-only serial identifier.
    pub id: u32,
    /// Unique name within one sheet.
    pub name: PersonName,
    /// Amount actually contributed. Must be non-negative.
    pub paid: f64,
}

impl Contribution {
    pub fn new(id: u32, name: PersonName, paid: f64) -> Self {
        Self { id, name, paid }
    }
}

/// Errors raised when an expense sheet fails boundary validation.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("a settlement needs at least one participant")]
    EmptyGroup,
    #[error("duplicate participant name: {0}")]
    DuplicateName(PersonName),
    #[error("paid amount for {name} must be non-negative and finite, got {paid}")]
    InvalidPaid { name: PersonName, paid: f64 },
    #[error("total amount must be finite, got {0}")]
    InvalidTotal(f64),
}

/// A snapshot of who paid what toward a shared total.
///
/// `people_count` is the declared group size and drives the average share;
/// the roster length is expected to match it, but a mismatch is not
/// rejected — settlement output is only meaningful when they agree.
///
/// # Examples
///
/// ```
/// use split_settle::core::person::PersonName;
/// use split_settle::core::sheet::{Contribution, ExpenseSheet};
///
/// let sheet = ExpenseSheet::with_people(
///     100.0,
///     vec![
///         Contribution::new(1, PersonName::new("alice"), 100.0),
///         Contribution::new(2, PersonName::new("bob"), 0.0),
///     ],
/// );
/// assert_eq!(sheet.average_share(), 50.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSheet {
    /// The group's stated total spend.
    pub total_amount: f64,
    /// Declared group size; the divisor for the average share.
    pub people_count: usize,
    /// Per-person contributions.
    pub people: Vec<Contribution>,
}

impl ExpenseSheet {
    /// Create an empty sheet with a stated total and group size.
    pub fn new(total_amount: f64, people_count: usize) -> Self {
        Self {
            total_amount,
            people_count,
            people: Vec::new(),
        }
    }

    /// Create a sheet whose declared group size matches the roster.
    pub fn with_people(total_amount: f64, people: Vec<Contribution>) -> Self {
        Self {
            total_amount,
            people_count: people.len(),
            people,
        }
    }

    /// Add a contribution to the roster.
    pub fn push(&mut self, contribution: Contribution) {
        self.people.push(contribution);
    }

    /// Each participant's fair share: `total_amount / people_count`.
    ///
    /// A zero `people_count` yields a non-finite share; [`validate`]
    /// rejects that case before the engine runs.
    ///
    /// [`validate`]: ExpenseSheet::validate
    pub fn average_share(&self) -> f64 {
        self.total_amount / self.people_count as f64
    }

    /// Sum of all contributions.
    pub fn total_paid(&self) -> f64 {
        self.people.iter().map(|c| c.paid).sum()
    }

    /// Number of people on the roster (not the declared group size).
    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// All names on the roster, in input order.
    pub fn names(&self) -> Vec<&PersonName> {
        self.people.iter().map(|c| &c.name).collect()
    }

    /// Boundary validation: non-empty group, unique names, finite
    /// non-negative contributions, finite total.
    pub fn validate(&self) -> Result<(), SheetError> {
        if self.people_count == 0 {
            return Err(SheetError::EmptyGroup);
        }
        if !self.total_amount.is_finite() {
            return Err(SheetError::InvalidTotal(self.total_amount));
        }
        let mut seen: HashSet<&PersonName> = HashSet::new();
        for contribution in &self.people {
            if !contribution.paid.is_finite() || contribution.paid < 0.0 {
                return Err(SheetError::InvalidPaid {
                    name: contribution.name.clone(),
                    paid: contribution.paid,
                });
            }
            if !seen.insert(&contribution.name) {
                return Err(SheetError::DuplicateName(contribution.name.clone()));
            }
        }
        Ok(())
    }

    /// Resize the roster to `people_count` entries, preserving existing
    /// contributions, filling new slots with zero-paid `person-N` entries,
    /// and re-serializing ids 1..n.
    pub fn resize(&mut self, people_count: usize) {
        let target = people_count.max(1);
        self.people_count = target;
        self.people.truncate(target);
        for i in self.people.len()..target {
            self.people.push(Contribution::new(
                i as u32 + 1,
                PersonName::new(format!("person-{}", i + 1)),
                0.0,
            ));
        }
        for (i, contribution) in self.people.iter_mut().enumerate() {
            contribution.id = i as u32 + 1;
        }
    }

    /// A small worked dataset: ten people, uneven contributions, 100 total.
    pub fn example() -> Self {
        let paids = [
            ("a", 12.0),
            ("b", 14.0),
            ("c", 6.0),
            ("d", 9.0),
            ("e", 18.0),
            ("f", 7.0),
            ("g", 3.0),
            ("h", 13.0),
            ("i", 5.0),
            ("j", 13.0),
        ];
        let people = paids
            .iter()
            .enumerate()
            .map(|(i, (name, paid))| Contribution::new(i as u32 + 1, PersonName::new(*name), *paid))
            .collect();
        Self::with_people(100.0, people)
    }
}

impl Default for ExpenseSheet {
    /// A fresh two-person sheet with nothing paid yet.
    fn default() -> Self {
        Self::with_people(
            0.0,
            vec![
                Contribution::new(1, PersonName::new("person-1"), 0.0),
                Contribution::new(2, PersonName::new("person-2"), 0.0),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_share() {
        let sheet = ExpenseSheet::with_people(
            90.0,
            vec![
                Contribution::new(1, PersonName::new("a"), 90.0),
                Contribution::new(2, PersonName::new("b"), 0.0),
                Contribution::new(3, PersonName::new("c"), 0.0),
            ],
        );
        assert_eq!(sheet.average_share(), 30.0);
        assert_eq!(sheet.total_paid(), 90.0);
    }

    #[test]
    fn test_validate_ok() {
        assert!(ExpenseSheet::example().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_group() {
        let sheet = ExpenseSheet::new(100.0, 0);
        assert!(matches!(sheet.validate(), Err(SheetError::EmptyGroup)));
    }

    #[test]
    fn test_validate_duplicate_name() {
        let sheet = ExpenseSheet::with_people(
            100.0,
            vec![
                Contribution::new(1, PersonName::new("a"), 50.0),
                Contribution::new(2, PersonName::new("a"), 50.0),
            ],
        );
        assert!(matches!(
            sheet.validate(),
            Err(SheetError::DuplicateName(_))
        ));
    }

    #[test]
    fn test_validate_negative_paid() {
        let sheet = ExpenseSheet::with_people(
            100.0,
            vec![Contribution::new(1, PersonName::new("a"), -5.0)],
        );
        assert!(matches!(
            sheet.validate(),
            Err(SheetError::InvalidPaid { .. })
        ));
    }

    #[test]
    fn test_validate_non_finite_total() {
        let sheet = ExpenseSheet::with_people(
            f64::INFINITY,
            vec![Contribution::new(1, PersonName::new("a"), 5.0)],
        );
        assert!(matches!(sheet.validate(), Err(SheetError::InvalidTotal(_))));
    }

    #[test]
    fn test_resize_grows_and_reserializes() {
        let mut sheet = ExpenseSheet::default();
        sheet.people[0].paid = 10.0;
        sheet.resize(4);
        assert_eq!(sheet.people_count, 4);
        assert_eq!(sheet.len(), 4);
        assert_eq!(sheet.people[0].paid, 10.0);
        assert_eq!(sheet.people[3].name, PersonName::new("person-4"));
        let ids: Vec<u32> = sheet.people.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_resize_shrinks_to_at_least_one() {
        let mut sheet = ExpenseSheet::example();
        sheet.resize(0);
        assert_eq!(sheet.people_count, 1);
        assert_eq!(sheet.len(), 1);
    }

    #[test]
    fn test_example_sums_to_total() {
        let sheet = ExpenseSheet::example();
        assert_eq!(sheet.len(), 10);
        assert_eq!(sheet.total_paid(), sheet.total_amount);
    }
}
