//! split-settle CLI
//!
//! Settle shared-expense sheets from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Settle a sheet from a JSON file
//! split-settle settle --input sheet.json
//!
//! # Output as JSON or as a Mermaid flowchart
//! split-settle settle --input sheet.json --format json
//! split-settle settle --input sheet.json --format mermaid
//!
//! # Per-person breakdown
//! split-settle summary --input sheet.json
//!
//! # Generate a random sheet for testing
//! split-settle generate --people 10 --max-paid 100
//! ```

use split_settle::core::person::PersonName;
use split_settle::core::sheet::{Contribution, ExpenseSheet};
use split_settle::diagram::mermaid;
use split_settle::settle::engine::SettlementEngine;
use split_settle::settle::summary::SettlementSummary;
use split_settle::simulation::scenario::{generate_random_scenario, ScenarioConfig};
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"split-settle — shared-expense settlement with minimal transfers

USAGE:
    split-settle <COMMAND> [OPTIONS]

COMMANDS:
    settle      Compute the transfer plan for an expense sheet
    summary     Show the per-person breakdown for an expense sheet
    generate    Generate a random expense sheet (for testing)
    help        Show this message

OPTIONS (settle):
    --input <FILE>      Path to JSON expense sheet
    --format <FORMAT>   Output format: text (default), json, or mermaid

OPTIONS (summary):
    --input <FILE>      Path to JSON expense sheet

OPTIONS (generate):
    --people <N>        Number of participants (default: 10)
    --max-paid <X>      Upper bound per contribution (default: 100)
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    split-settle settle --input sheet.json
    split-settle settle --input sheet.json --format mermaid
    split-settle summary --input sheet.json
    split-settle generate --people 6 --max-paid 50 --output test.json"#
    );
}

/// JSON schema for input sheets.
#[derive(serde::Deserialize)]
struct SheetFile {
    total_amount: f64,
    #[serde(default)]
    people_count: Option<usize>,
    people: Vec<PersonInput>,
}

#[derive(serde::Deserialize)]
struct PersonInput {
    #[serde(default)]
    id: Option<u32>,
    name: String,
    paid: f64,
}

/// JSON output schema for settlement plans.
#[derive(serde::Serialize)]
struct PlanOutput {
    average_share: f64,
    outstanding: f64,
    transfer_count: usize,
    direct_count: usize,
    settled: bool,
    transfers: Vec<TransferOutput>,
}

#[derive(serde::Serialize)]
struct TransferOutput {
    from: String,
    to: String,
    amount: f64,
}

fn load_sheet(path: &str) -> ExpenseSheet {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: SheetFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "total_amount": 100.0,
  "people_count": 2,
  "people": [
    {{ "id": 1, "name": "alice", "paid": 100.0 }},
    {{ "id": 2, "name": "bob", "paid": 0.0 }}
  ]
}}"#
        );
        process::exit(1);
    });

    let people_count = file.people_count.unwrap_or(file.people.len());
    let people = file
        .people
        .into_iter()
        .enumerate()
        .map(|(i, p)| {
            Contribution::new(
                p.id.unwrap_or(i as u32 + 1),
                PersonName::new(p.name),
                p.paid,
            )
        })
        .collect();

    let mut sheet = ExpenseSheet::new(file.total_amount, people_count);
    sheet.people = people;
    sheet
}

fn parse_input_and_format(args: &[String]) -> (String, String) {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text', 'json', or 'mermaid'");
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });
    (path, format)
}

fn cmd_settle(args: &[String]) {
    let (path, format) = parse_input_and_format(args);
    let sheet = load_sheet(&path);
    let plan = SettlementEngine::settle(&sheet).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    match format.as_str() {
        "json" => {
            let output = PlanOutput {
                average_share: plan.average_share(),
                outstanding: plan.outstanding(),
                transfer_count: plan.len(),
                direct_count: plan.direct_count(),
                settled: plan.verify(&sheet),
                transfers: plan
                    .transfers()
                    .iter()
                    .map(|t| TransferOutput {
                        from: t.from().to_string(),
                        to: t.to().to_string(),
                        amount: t.amount(),
                    })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&output).unwrap());
        }
        "mermaid" => {
            print!("{}", mermaid::flowchart(plan.transfers()));
        }
        _ => {
            println!("{}", plan);
            let summary = SettlementSummary::from_plan(&sheet, &plan);
            println!("{}", summary);
        }
    }
}

fn cmd_summary(args: &[String]) {
    let (path, _) = parse_input_and_format(args);
    let sheet = load_sheet(&path);
    let plan = SettlementEngine::settle(&sheet).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });
    let summary = SettlementSummary::from_plan(&sheet, &plan);
    println!("{}", summary);
}

fn cmd_generate(args: &[String]) {
    let mut people = 10usize;
    let mut max_paid = 100.0f64;
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--people" => {
                i += 1;
                people = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--people requires a number");
                    process::exit(1);
                });
            }
            "--max-paid" => {
                i += 1;
                max_paid = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--max-paid requires a number");
                    process::exit(1);
                });
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = ScenarioConfig {
        people_count: people,
        max_paid,
        ..Default::default()
    };
    let sheet = generate_random_scenario(&config);
    let json = serde_json::to_string_pretty(&sheet).unwrap();

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated a {}-person sheet totaling {:.2} → {}",
            sheet.len(),
            sheet.total_amount,
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "settle" => cmd_settle(rest),
        "summary" => cmd_summary(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
