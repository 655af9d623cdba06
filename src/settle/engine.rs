use crate::core::balance::BalanceSheet;
use crate::core::person::PersonName;
use crate::core::sheet::{ExpenseSheet, SheetError};
use crate::core::transfer::Transfer;
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

/// Absolute tolerance for treating a balance as settled.
///
/// Absorbs floating-point drift from repeated subtraction; any residual
/// below this threshold is dropped rather than settled with a micro-transfer.
pub const EPSILON: f64 = 0.001;

/// The ordered outcome of a settlement run.
///
/// Direct-pay transfers come first (`direct_count` of them), followed by
/// the greedy matches. Order carries no weight beyond presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementPlan {
    transfers: Vec<Transfer>,
    direct_count: usize,
    average_share: f64,
    /// Sum of positive starting balances — what had to move.
    outstanding: f64,
}

impl SettlementPlan {
    /// All transfers, direct pairs first.
    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    /// Transfers found by exact-opposite pairing.
    pub fn direct_transfers(&self) -> &[Transfer] {
        &self.transfers[..self.direct_count]
    }

    /// Transfers found by largest-debtor/largest-creditor matching.
    pub fn greedy_transfers(&self) -> &[Transfer] {
        &self.transfers[self.direct_count..]
    }

    pub fn len(&self) -> usize {
        self.transfers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }

    pub fn direct_count(&self) -> usize {
        self.direct_count
    }

    /// The fair share each participant was measured against.
    pub fn average_share(&self) -> f64 {
        self.average_share
    }

    /// Sum of positive starting balances.
    pub fn outstanding(&self) -> f64 {
        self.outstanding
    }

    /// Total value moved by the plan.
    pub fn total_transferred(&self) -> f64 {
        self.transfers.iter().map(|t| t.amount()).sum()
    }

    /// Check the plan against its source sheet: applying every transfer
    /// must bring each participant's balance within [`EPSILON`] of zero.
    ///
    /// Only meaningful when the sheet's stated total matches the sum of
    /// contributions; otherwise the residual biases the whole group.
    pub fn verify(&self, sheet: &ExpenseSheet) -> bool {
        let mut balances = BalanceSheet::from_sheet(sheet);
        for transfer in &self.transfers {
            balances.apply_transfer(transfer);
        }
        balances.is_settled(EPSILON)
    }
}

impl fmt::Display for SettlementPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Settlement Plan ===")?;
        writeln!(f, "Average Share:  {:.2}", self.average_share)?;
        writeln!(f, "Outstanding:    {:.2}", self.outstanding)?;
        writeln!(
            f,
            "Transfers:      {} ({} direct, {} greedy)",
            self.len(),
            self.direct_count,
            self.len() - self.direct_count
        )?;
        for transfer in &self.transfers {
            writeln!(f, "  {}", transfer)?;
        }
        Ok(())
    }
}

/// One participant's working state during a settlement run.
struct Working {
    index: usize,
    name: PersonName,
    balance: f64,
    settled: bool,
}

/// A heap entry for the greedy phase.
///
/// `key` holds the remaining positive magnitude on either side: the
/// debtor's balance, or the negated creditor balance. Ties on `key`
/// resolve toward the earlier input position so runs are deterministic.
struct HeapEntry {
    key: f64,
    index: usize,
    name: PersonName,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .total_cmp(&other.key)
            .then_with(|| other.index.cmp(&self.index))
    }
}

/// The core settlement engine.
///
/// Computes a minimal set of peer-to-peer transfers that zeroes every
/// participant's balance against the group's average share.
pub struct SettlementEngine;

impl SettlementEngine {
    /// Settle an expense sheet into an ordered transfer plan.
    ///
    /// The sheet is validated first: an empty group, duplicate names, or
    /// non-finite/negative amounts fail fast instead of producing garbage.
    ///
    /// # Algorithm
    ///
    /// 1. Compute each participant's balance (`average_share - paid`);
    ///    anyone within [`EPSILON`] of zero starts out settled.
    /// 2. **Direct pairing** — scan unordered pairs in input order and
    ///    settle any two whose balances cancel exactly (within tolerance)
    ///    with a single transfer. First match wins.
    /// 3. **Greedy matching** — repeatedly pay the largest remaining
    ///    creditor from the largest remaining debtor, moving
    ///    `min(debt, credit)` each step. Every step fully zeroes at least
    ///    one participant, so the transfer count is bounded by the number
    ///    of unsettled participants minus one.
    pub fn settle(sheet: &ExpenseSheet) -> Result<SettlementPlan, SheetError> {
        sheet.validate()?;

        let share = sheet.average_share();
        let mut working: Vec<Working> = sheet
            .people
            .iter()
            .enumerate()
            .map(|(index, c)| {
                let balance = share - c.paid;
                Working {
                    index,
                    name: c.name.clone(),
                    balance,
                    settled: balance.abs() <= EPSILON,
                }
            })
            .collect();

        let outstanding: f64 = working
            .iter()
            .map(|w| w.balance)
            .filter(|&b| b > 0.0)
            .sum();

        let mut transfers = Self::direct_pairs(&mut working);
        let direct_count = transfers.len();
        debug!(
            "direct pairing produced {} transfer(s), {} participant(s) remain",
            direct_count,
            working.iter().filter(|w| !w.settled).count()
        );

        transfers.extend(Self::greedy_match(&working));
        debug!(
            "settlement complete: {} transfer(s) for {} participant(s)",
            transfers.len(),
            sheet.len()
        );

        Ok(SettlementPlan {
            transfers,
            direct_count,
            average_share: share,
            outstanding,
        })
    }

    /// Phase 1: settle pairs whose balances are exact opposites.
    ///
    /// Pairs are scanned in input order and the first complete match wins;
    /// no search for a globally optimal pairing. This keeps the common
    /// case of two people who split evenly down to one clean transfer
    /// instead of letting the greedy phase slice it up.
    fn direct_pairs(working: &mut [Working]) -> Vec<Transfer> {
        let mut transfers = Vec::new();
        for i in 0..working.len() {
            if working[i].settled {
                continue;
            }
            for j in (i + 1)..working.len() {
                if working[j].settled {
                    continue;
                }
                if (working[i].balance + working[j].balance).abs() <= EPSILON {
                    // Opposite non-zero balances: the positive side pays.
                    let (payer, receiver) = if working[i].balance > 0.0 {
                        (i, j)
                    } else {
                        (j, i)
                    };
                    transfers.push(Transfer::new(
                        working[payer].name.clone(),
                        working[receiver].name.clone(),
                        working[payer].balance,
                    ));
                    working[i].settled = true;
                    working[j].settled = true;
                    break;
                }
            }
        }
        transfers
    }

    /// Phase 2: largest debtor pays largest creditor until one side runs dry.
    ///
    /// Two max-heaps replace a re-sort-per-iteration loop: one keyed on
    /// the debtor's remaining balance, one on the creditor's remaining
    /// credit. Each step pops both tops, moves `min(debt, credit)`, and
    /// pushes back whichever side still carries more than [`EPSILON`].
    fn greedy_match(working: &[Working]) -> Vec<Transfer> {
        let mut debtors: BinaryHeap<HeapEntry> = working
            .iter()
            .filter(|w| !w.settled && w.balance > EPSILON)
            .map(|w| HeapEntry {
                key: w.balance,
                index: w.index,
                name: w.name.clone(),
            })
            .collect();
        let mut creditors: BinaryHeap<HeapEntry> = working
            .iter()
            .filter(|w| !w.settled && w.balance < -EPSILON)
            .map(|w| HeapEntry {
                key: -w.balance,
                index: w.index,
                name: w.name.clone(),
            })
            .collect();

        let mut transfers = Vec::new();
        while let (Some(mut debtor), Some(mut creditor)) = (debtors.pop(), creditors.pop()) {
            let amount = debtor.key.min(creditor.key);
            transfers.push(Transfer::new(
                debtor.name.clone(),
                creditor.name.clone(),
                amount,
            ));
            debtor.key -= amount;
            creditor.key -= amount;
            if debtor.key > EPSILON {
                debtors.push(debtor);
            }
            if creditor.key > EPSILON {
                creditors.push(creditor);
            }
        }
        transfers
    }
}
