use crate::core::person::PersonName;
use crate::core::sheet::ExpenseSheet;
use crate::core::transfer::Transfer;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tracks each participant's outstanding balance.
///
/// A balance is `average_share - paid`: positive means the person still
/// owes money (debtor), negative means they are owed money (creditor),
/// and anything within tolerance of zero counts as settled.
///
/// Applying a settlement plan's transfers against the sheet's starting
/// balances must land everyone at (tolerably) zero — this type is how
/// that guarantee is checked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// name -> outstanding balance. Positive = owes, negative = is owed.
    balances: HashMap<PersonName, f64>,
}

impl BalanceSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive starting balances from an expense sheet.
    pub fn from_sheet(sheet: &ExpenseSheet) -> Self {
        let share = sheet.average_share();
        let balances = sheet
            .people
            .iter()
            .map(|c| (c.name.clone(), share - c.paid))
            .collect();
        Self { balances }
    }

    /// Apply one transfer: the payer's debt shrinks, the receiver's
    /// credit shrinks.
    pub fn apply_transfer(&mut self, transfer: &Transfer) {
        *self
            .balances
            .entry(transfer.from().clone())
            .or_insert(0.0) -= transfer.amount();
        *self.balances.entry(transfer.to().clone()).or_insert(0.0) += transfer.amount();
    }

    /// The outstanding balance for one person (zero if unknown).
    pub fn balance(&self, name: &PersonName) -> f64 {
        self.balances.get(name).copied().unwrap_or(0.0)
    }

    /// All balances.
    pub fn all_balances(&self) -> &HashMap<PersonName, f64> {
        &self.balances
    }

    /// Everyone still owing more than `epsilon`, sorted by name.
    pub fn debtors(&self, epsilon: f64) -> Vec<(&PersonName, f64)> {
        let mut debtors: Vec<_> = self
            .balances
            .iter()
            .filter(|(_, b)| **b > epsilon)
            .map(|(name, b)| (name, *b))
            .collect();
        debtors.sort_by(|a, b| a.0.cmp(b.0));
        debtors
    }

    /// Everyone still owed more than `epsilon`, sorted by name.
    pub fn creditors(&self, epsilon: f64) -> Vec<(&PersonName, f64)> {
        let mut creditors: Vec<_> = self
            .balances
            .iter()
            .filter(|(_, b)| **b < -epsilon)
            .map(|(name, b)| (name, *b))
            .collect();
        creditors.sort_by(|a, b| a.0.cmp(b.0));
        creditors
    }

    /// Sum of all positive balances — the total amount that still has
    /// to move for the group to settle. Equals the sum of |negative|
    /// balances when the sheet's total matches the sum paid.
    pub fn total_outstanding(&self) -> f64 {
        self.balances.values().filter(|&&b| b > 0.0).sum()
    }

    /// True when every balance is within `epsilon` of zero.
    pub fn is_settled(&self, epsilon: f64) -> bool {
        self.balances.values().all(|b| b.abs() <= epsilon)
    }
}
