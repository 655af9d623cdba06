use crate::core::person::PersonName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single peer-to-peer payment: `from` pays `to` the given amount.
///
/// Transfers are the engine's output artifact. Their order matters only
/// for presentation (direct-pay matches come before greedy matches).
///
/// # Examples
///
/// ```
/// use split_settle::core::person::PersonName;
/// use split_settle::core::transfer::Transfer;
///
/// let t = Transfer::new(PersonName::new("alice"), PersonName::new("bob"), 25.0);
/// assert_eq!(t.amount(), 25.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    from: PersonName,
    to: PersonName,
    amount: f64,
}

impl Transfer {
    /// Create a new transfer.
    ///
    /// # Panics
    ///
    /// Panics if `amount` is not strictly positive.
    pub fn new(from: PersonName, to: PersonName, amount: f64) -> Self {
        assert!(
            amount > 0.0,
            "Transfer amount must be positive, got {}",
            amount
        );
        Self { from, to, amount }
    }

    pub fn from(&self) -> &PersonName {
        &self.from
    }

    pub fn to(&self) -> &PersonName {
        &self.to
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}  {:.2}", self.from, self.to, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_creation() {
        let t = Transfer::new(PersonName::new("a"), PersonName::new("b"), 10.0);
        assert_eq!(t.from().as_str(), "a");
        assert_eq!(t.to().as_str(), "b");
        assert_eq!(t.amount(), 10.0);
    }

    #[test]
    #[should_panic(expected = "must be positive")]
    fn test_transfer_zero_amount() {
        Transfer::new(PersonName::new("a"), PersonName::new("b"), 0.0);
    }

    #[test]
    #[should_panic(expected = "must be positive")]
    fn test_transfer_negative_amount() {
        Transfer::new(PersonName::new("a"), PersonName::new("b"), -5.0);
    }

    #[test]
    fn test_transfer_display() {
        let t = Transfer::new(PersonName::new("a"), PersonName::new("b"), 12.5);
        assert_eq!(format!("{}", t), "a → b  12.50");
    }
}
