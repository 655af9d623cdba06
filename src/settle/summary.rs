use crate::core::person::PersonName;
use crate::core::sheet::ExpenseSheet;
use crate::settle::engine::SettlementPlan;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One payment a participant has to make under a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutgoingPayment {
    pub to: PersonName,
    pub amount: f64,
}

/// One participant's row in the settlement table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonSummary {
    pub id: u32,
    pub name: PersonName,
    pub paid: f64,
    /// `average_share - paid`: positive = still owes, negative = is owed.
    pub due: f64,
    /// The transfers this person must send.
    pub outgoing: Vec<OutgoingPayment>,
}

/// Per-person breakdown of a settlement plan.
///
/// Joins the source sheet with the plan: for every participant, what they
/// paid, what they still owe (or are owed), and exactly who they pay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementSummary {
    rows: Vec<PersonSummary>,
}

impl SettlementSummary {
    /// Build the per-person breakdown, one row per roster entry in
    /// input order.
    pub fn from_plan(sheet: &ExpenseSheet, plan: &SettlementPlan) -> Self {
        let share = sheet.average_share();
        let rows = sheet
            .people
            .iter()
            .map(|c| {
                let outgoing = plan
                    .transfers()
                    .iter()
                    .filter(|t| t.from() == &c.name)
                    .map(|t| OutgoingPayment {
                        to: t.to().clone(),
                        amount: t.amount(),
                    })
                    .collect();
                PersonSummary {
                    id: c.id,
                    name: c.name.clone(),
                    paid: c.paid,
                    due: share - c.paid,
                    outgoing,
                }
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[PersonSummary] {
        &self.rows
    }

    pub fn row(&self, name: &PersonName) -> Option<&PersonSummary> {
        self.rows.iter().find(|r| &r.name == name)
    }

    /// Total still owed by debtors.
    pub fn total_due(&self) -> f64 {
        self.rows.iter().map(|r| r.due).filter(|&d| d > 0.0).sum()
    }

    /// Total owed back to creditors.
    pub fn total_refund(&self) -> f64 {
        self.rows
            .iter()
            .map(|r| r.due)
            .filter(|&d| d < 0.0)
            .map(f64::abs)
            .sum()
    }
}

impl fmt::Display for SettlementSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Settlement Summary ===")?;
        writeln!(f, "Total Due:     {:.2}", self.total_due())?;
        writeln!(f, "Total Refund:  {:.2}", self.total_refund())?;
        writeln!(f)?;
        for row in &self.rows {
            writeln!(
                f,
                "  #{:<3} {:<16} paid {:>10.2}  due {:>10.2}",
                row.id,
                row.name.as_str(),
                row.paid,
                row.due
            )?;
            for payment in &row.outgoing {
                writeln!(f, "         pays {:.2} to {}", payment.amount, payment.to)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sheet::Contribution;
    use crate::settle::engine::SettlementEngine;
    use approx::assert_abs_diff_eq;

    fn trip_sheet() -> ExpenseSheet {
        ExpenseSheet::with_people(
            300.0,
            vec![
                Contribution::new(1, PersonName::new("a"), 0.0),
                Contribution::new(2, PersonName::new("b"), 0.0),
                Contribution::new(3, PersonName::new("c"), 300.0),
            ],
        )
    }

    #[test]
    fn test_summary_rows_follow_input_order() {
        let sheet = trip_sheet();
        let plan = SettlementEngine::settle(&sheet).unwrap();
        let summary = SettlementSummary::from_plan(&sheet, &plan);
        let names: Vec<&str> = summary.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_summary_outgoing_matches_plan() {
        let sheet = trip_sheet();
        let plan = SettlementEngine::settle(&sheet).unwrap();
        let summary = SettlementSummary::from_plan(&sheet, &plan);

        let a = summary.row(&PersonName::new("a")).unwrap();
        assert_eq!(a.outgoing.len(), 1);
        assert_eq!(a.outgoing[0].to.as_str(), "c");
        assert_eq!(a.outgoing[0].amount, 100.0);

        let c = summary.row(&PersonName::new("c")).unwrap();
        assert!(c.outgoing.is_empty());
        assert_eq!(c.due, -200.0);
    }

    #[test]
    fn test_due_totals_balance() {
        let sheet = ExpenseSheet::example();
        let plan = SettlementEngine::settle(&sheet).unwrap();
        let summary = SettlementSummary::from_plan(&sheet, &plan);
        assert_abs_diff_eq!(
            summary.total_due(),
            summary.total_refund(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_display_lists_payments() {
        let sheet = trip_sheet();
        let plan = SettlementEngine::settle(&sheet).unwrap();
        let summary = SettlementSummary::from_plan(&sheet, &plan);
        let text = format!("{}", summary);
        assert!(text.contains("=== Settlement Summary ==="));
        assert!(text.contains("pays 100.00 to c"));
    }
}
