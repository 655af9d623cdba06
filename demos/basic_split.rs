//! Basic settlement example.
//!
//! Demonstrates how the engine turns uneven contributions into a short
//! list of peer-to-peer transfers.

use split_settle::core::person::PersonName;
use split_settle::core::sheet::{Contribution, ExpenseSheet};
use split_settle::diagram::mermaid;
use split_settle::settle::engine::SettlementEngine;
use split_settle::settle::summary::SettlementSummary;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  split-settle: Basic Settlement Example  ║");
    println!("╚══════════════════════════════════════════╝\n");

    // --- Scenario 1: Two people, one paid everything ---
    println!("━━━ Scenario 1: Dinner for Two ━━━\n");

    let dinner = ExpenseSheet::with_people(
        100.0,
        vec![
            Contribution::new(1, PersonName::new("alice"), 100.0),
            Contribution::new(2, PersonName::new("bob"), 0.0),
        ],
    );

    let plan = SettlementEngine::settle(&dinner).expect("valid sheet");
    println!("{}", plan);

    // --- Scenario 2: Ten people, uneven contributions ---
    println!("━━━ Scenario 2: Group of Ten ━━━\n");

    let group = ExpenseSheet::example();
    let plan = SettlementEngine::settle(&group).expect("valid sheet");

    println!("{}", plan);

    let summary = SettlementSummary::from_plan(&group, &plan);
    println!("{}", summary);

    println!("━━━ Flowchart ━━━\n");
    print!("{}", mermaid::flowchart(plan.transfers()));
}
