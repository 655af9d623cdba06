use approx::assert_abs_diff_eq;
use split_settle::core::person::PersonName;
use split_settle::core::sheet::{Contribution, ExpenseSheet, SheetError};
use split_settle::diagram::graph::TransferGraph;
use split_settle::diagram::mermaid;
use split_settle::settle::engine::{SettlementEngine, EPSILON};
use split_settle::settle::summary::SettlementSummary;
use split_settle::store::persisted::SheetStore;
use uuid::Uuid;

fn sheet(total: f64, paids: &[(&str, f64)]) -> ExpenseSheet {
    let people = paids
        .iter()
        .enumerate()
        .map(|(i, (name, paid))| Contribution::new(i as u32 + 1, PersonName::new(*name), *paid))
        .collect();
    ExpenseSheet::with_people(total, people)
}

/// Full pipeline test: sheet → plan → summary → graph → flowchart.
#[test]
fn full_pipeline_group_of_ten() {
    let sheet = ExpenseSheet::example();
    assert_eq!(sheet.len(), 10);
    assert_abs_diff_eq!(sheet.total_paid(), sheet.total_amount, epsilon = 1e-9);

    let plan = SettlementEngine::settle(&sheet).unwrap();
    assert!(plan.verify(&sheet));
    assert!(!plan.is_empty());
    assert!(plan.len() <= sheet.len() - 1);
    assert!(plan.direct_count() <= plan.len());
    assert_abs_diff_eq!(
        plan.total_transferred(),
        plan.outstanding(),
        epsilon = sheet.len() as f64 * EPSILON
    );

    // Every transfer is strictly positive and never a self-payment.
    for t in plan.transfers() {
        assert!(t.amount() > 0.0);
        assert_ne!(t.from(), t.to());
    }

    // The summary mirrors the plan: each row's outgoing payments are
    // exactly that person's transfers.
    let summary = SettlementSummary::from_plan(&sheet, &plan);
    assert_eq!(summary.rows().len(), sheet.len());
    for row in summary.rows() {
        let from_plan: f64 = plan
            .transfers()
            .iter()
            .filter(|t| t.from() == &row.name)
            .map(|t| t.amount())
            .sum();
        let from_summary: f64 = row.outgoing.iter().map(|p| p.amount).sum();
        assert_abs_diff_eq!(from_plan, from_summary, epsilon = 1e-9);
    }
    assert_abs_diff_eq!(summary.total_due(), summary.total_refund(), epsilon = 1e-9);

    // The graph agrees with the plan and never pays in circles.
    let graph = TransferGraph::from_transfers(plan.transfers());
    assert!(graph.is_acyclic());
    assert_abs_diff_eq!(graph.total_flow(), plan.total_transferred(), epsilon = 1e-9);
    assert!(graph.person_count() <= sheet.len());

    // One flowchart line per transfer plus the header.
    let chart = mermaid::flowchart(plan.transfers());
    assert_eq!(chart.lines().count(), plan.len() + 1);
    assert!(chart.starts_with("flowchart LR\n"));
}

/// Two people, one paid everything: a single direct transfer of half.
#[test]
fn direct_pair_settles_even_split() {
    let sheet = sheet(100.0, &[("a", 0.0), ("b", 100.0)]);
    let plan = SettlementEngine::settle(&sheet).unwrap();

    assert_eq!(plan.len(), 1);
    assert_eq!(plan.direct_count(), 1);
    let t = &plan.transfers()[0];
    assert_eq!(t.from().as_str(), "a");
    assert_eq!(t.to().as_str(), "b");
    assert_abs_diff_eq!(t.amount(), 50.0);
    assert!(plan.verify(&sheet));
}

/// Three people, one fronted the bill: two greedy transfers, no remainder.
#[test]
fn greedy_settles_single_creditor() {
    let sheet = sheet(300.0, &[("a", 0.0), ("b", 0.0), ("c", 300.0)]);
    let plan = SettlementEngine::settle(&sheet).unwrap();

    assert_eq!(plan.len(), 2);
    for t in plan.transfers() {
        assert_eq!(t.to().as_str(), "c");
        assert_abs_diff_eq!(t.amount(), 100.0);
    }
    assert!(plan.verify(&sheet));
}

/// Scaling every amount by a constant scales transfers and keeps the
/// topology (who pays whom) unchanged.
#[test]
fn scale_invariance() {
    let base = sheet(200.0, &[("a", 10.0), ("b", 40.0), ("c", 65.0), ("d", 85.0)]);
    let scaled = sheet(
        600.0,
        &[("a", 30.0), ("b", 120.0), ("c", 195.0), ("d", 255.0)],
    );

    let base_plan = SettlementEngine::settle(&base).unwrap();
    let scaled_plan = SettlementEngine::settle(&scaled).unwrap();

    assert_eq!(base_plan.len(), scaled_plan.len());
    for (t, s) in base_plan.transfers().iter().zip(scaled_plan.transfers()) {
        assert_eq!(t.from(), s.from());
        assert_eq!(t.to(), s.to());
        assert_abs_diff_eq!(s.amount(), t.amount() * 3.0, epsilon = 1e-9);
    }
}

/// A group that already paid equal shares needs no transfers at all.
#[test]
fn settled_input_yields_empty_plan() {
    let sheet = sheet(90.0, &[("a", 30.0), ("b", 30.0), ("c", 30.0)]);
    let plan = SettlementEngine::settle(&sheet).unwrap();
    assert!(plan.is_empty());
    assert_eq!(mermaid::flowchart(plan.transfers()), "flowchart LR\n");
}

#[test]
fn rejects_degenerate_sheets() {
    assert!(matches!(
        SettlementEngine::settle(&ExpenseSheet::new(100.0, 0)),
        Err(SheetError::EmptyGroup)
    ));
    assert!(matches!(
        SettlementEngine::settle(&sheet(100.0, &[("a", 60.0), ("a", 40.0)])),
        Err(SheetError::DuplicateName(_))
    ));
    assert!(matches!(
        SettlementEngine::settle(&sheet(100.0, &[("a", -1.0)])),
        Err(SheetError::InvalidPaid { .. })
    ));
}

/// Sheets survive a JSON round trip unchanged.
#[test]
fn sheet_json_round_trip() {
    let sheet = ExpenseSheet::example();
    let json = serde_json::to_string(&sheet).unwrap();
    let back: ExpenseSheet = serde_json::from_str(&json).unwrap();
    assert_eq!(back, sheet);
}

/// Plan serialization exposes the expected fields.
#[test]
fn plan_serializes() {
    let sheet = sheet(100.0, &[("a", 0.0), ("b", 100.0)]);
    let plan = SettlementEngine::settle(&sheet).unwrap();
    let json = serde_json::to_string_pretty(&plan).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(parsed.get("transfers").is_some());
    assert!(parsed.get("direct_count").is_some());
    assert!(parsed.get("average_share").is_some());
}

/// A sheet saved through the store settles identically after reload.
#[test]
fn store_round_trip_feeds_engine() {
    let path = std::env::temp_dir().join(format!("split-settle-it-{}.json", Uuid::new_v4()));
    let store = SheetStore::new(&path);

    let sheet = ExpenseSheet::example();
    store.save(&sheet).unwrap();
    let restored = store.load().unwrap();
    assert_eq!(restored, sheet);

    let original_plan = SettlementEngine::settle(&sheet).unwrap();
    let restored_plan = SettlementEngine::settle(&restored).unwrap();
    assert_eq!(original_plan, restored_plan);

    std::fs::remove_file(&path).unwrap();
}
