//! Random expense-sheet generation.
//!
//! Produces groups of configurable size with two-decimal contributions,
//! used by the CLI `generate` command and the criterion benchmarks.

use crate::core::person::PersonName;
use crate::core::sheet::{Contribution, ExpenseSheet};
use rand::Rng;

/// Configuration for generating a random expense sheet.
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    /// Number of participants.
    pub people_count: usize,
    /// Upper bound for any single contribution.
    pub max_paid: f64,
    /// When true, the stated total equals the sum of contributions so
    /// the scenario settles completely.
    pub exact_total: bool,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            people_count: 10,
            max_paid: 100.0,
            exact_total: true,
        }
    }
}

/// Generate a random expense sheet for testing.
pub fn generate_random_scenario(config: &ScenarioConfig) -> ExpenseSheet {
    let mut rng = rand::thread_rng();

    let people: Vec<Contribution> = (0..config.people_count)
        .map(|i| {
            let paid = (rng.gen_range(0.0..config.max_paid) * 100.0).round() / 100.0;
            Contribution::new(
                i as u32 + 1,
                PersonName::new(format!("person-{}", i + 1)),
                paid,
            )
        })
        .collect();

    let total = if config.exact_total {
        people.iter().map(|c| c.paid).sum()
    } else {
        (rng.gen_range(0.0..config.max_paid * config.people_count as f64) * 100.0).round() / 100.0
    };

    ExpenseSheet::with_people(total, people)
}
