//! Greedy matching example.
//!
//! Demonstrates largest-debtor/largest-creditor matching on a trip where
//! one person fronted the whole bill, plus the transfer-graph view of
//! the resulting plan.

use split_settle::core::person::PersonName;
use split_settle::core::sheet::{Contribution, ExpenseSheet};
use split_settle::diagram::graph::TransferGraph;
use split_settle::settle::engine::SettlementEngine;

fn main() {
    println!("╔═══════════════════════════════════════════════╗");
    println!("║  split-settle: Greedy Matching Example        ║");
    println!("╚═══════════════════════════════════════════════╝\n");

    let trip = ExpenseSheet::with_people(
        300.0,
        vec![
            Contribution::new(1, PersonName::new("ana"), 0.0),
            Contribution::new(2, PersonName::new("ben"), 0.0),
            Contribution::new(3, PersonName::new("carol"), 300.0),
        ],
    );

    println!("Contributions:");
    for c in &trip.people {
        println!("  {:<8} paid {:>8.2}", c.name.as_str(), c.paid);
    }
    println!("  average share: {:.2}\n", trip.average_share());

    let plan = SettlementEngine::settle(&trip).expect("valid sheet");
    println!("{}", plan);

    println!("━━━ Transfer Graph ━━━\n");
    let graph = TransferGraph::from_transfers(plan.transfers());
    println!("  People:     {}", graph.person_count());
    println!("  Edges:      {}", graph.transfer_count());
    println!("  Total flow: {:.2}", graph.total_flow());
    println!("  Acyclic:    {}", graph.is_acyclic());
    for (from, to, amount) in graph.edges() {
        println!("    {} → {}  {:.2}", from, to, amount);
    }
}
