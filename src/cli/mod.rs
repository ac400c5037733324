use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{Write, stdout};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::application::BudgetService;
use crate::domain::format_cents;
use crate::io::{Exporter, ReplayOptions, Replayer};

/// Impensa - category ledger and spend chart
#[derive(Parser)]
#[command(name = "impensa")]
#[command(about = "Replay budget operations and print receipts, spend charts and reports")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Require explicit `create` rows and stop at the first failing line
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the receipt of one category or of all categories
    Receipts {
        /// Replay file (CSV: op,category,amount,description,target)
        input: PathBuf,

        /// Only print this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Print the percentage spend chart
    Chart {
        /// Replay file (CSV: op,category,amount,description,target)
        input: PathBuf,
    },

    /// Show the balance of a category or of all categories
    Balance {
        /// Replay file (CSV: op,category,amount,description,target)
        input: PathBuf,

        /// Category name (omit for all categories)
        category: Option<String>,
    },

    /// Spending breakdown per category
    Report {
        /// Replay file (CSV: op,category,amount,description,target)
        input: PathBuf,

        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Install the global subscriber. `RUST_LOG` wins over `--verbose`.
/// Logs go to stderr so chart output stays clean.
pub fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "impensa=debug" } else { "impensa=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let options = if self.strict {
            ReplayOptions::strict()
        } else {
            ReplayOptions::default()
        };

        match self.command {
            Commands::Receipts { input, category } => {
                let service = load_service(&input, &options)?;
                match category {
                    Some(name) => println!("{}", service.receipt(&name)?),
                    None => {
                        let receipts: Vec<String> = service
                            .categories()
                            .iter()
                            .map(ToString::to_string)
                            .collect();
                        println!("{}", receipts.join("\n\n"));
                    }
                }
            }

            Commands::Chart { input } => {
                let service = load_service(&input, &options)?;
                println!("{}", service.spend_chart());
            }

            Commands::Balance { input, category } => {
                let service = load_service(&input, &options)?;
                run_balance_command(&service, category.as_deref())?;
            }

            Commands::Report {
                input,
                format,
                output,
            } => {
                let service = load_service(&input, &options)?;
                run_report_command(&service, &format, output.as_deref())?;
            }
        }

        Ok(())
    }
}

/// Replay the input file into a fresh service. Rejected lines are printed
/// to stderr; in strict mode any rejected line is fatal.
pub fn load_service(input: &Path, options: &ReplayOptions) -> Result<BudgetService> {
    let file = File::open(input)
        .with_context(|| format!("Failed to open input file: {}", input.display()))?;

    let mut service = BudgetService::new();
    let result = Replayer::new(&mut service).replay_csv(file, options)?;

    if !result.errors.is_empty() {
        eprintln!("Skipped {} line(s):", result.errors.len());
        for error in result.errors.iter().take(10) {
            eprintln!("  Line {}: {}", error.line, error.error);
        }
        if result.errors.len() > 10 {
            eprintln!("  ... and {} more errors", result.errors.len() - 10);
        }
        if options.stop_on_error {
            anyhow::bail!(
                "Replay of {} stopped at line {}",
                input.display(),
                result.errors[0].line
            );
        }
    }

    Ok(service)
}

fn run_balance_command(service: &BudgetService, category: Option<&str>) -> Result<()> {
    match category {
        Some(name) => {
            let entry = service.get_balance(name)?;
            println!("{}: {}", entry.category, format_cents(entry.balance));
        }
        None => {
            let entries = service.get_all_balances();
            if entries.is_empty() {
                println!("No categories found.");
            } else {
                println!("{:<20} {:>12}", "CATEGORY", "BALANCE");
                println!("{}", "-".repeat(33));
                for entry in entries {
                    println!(
                        "{:<20} {:>12}",
                        truncate(&entry.category, 20),
                        format_cents(entry.balance)
                    );
                }
            }
        }
    }
    Ok(())
}

fn run_report_command(service: &BudgetService, format: &str, output: Option<&Path>) -> Result<()> {
    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };
    let exporter = Exporter::new(service);

    match format {
        "json" => {
            exporter.export_report_json(writer)?;
        }
        "csv" => {
            let count = exporter.export_report_csv(writer)?;
            if output.is_some() {
                eprintln!("Exported {} categories", count);
            }
        }
        "table" => write_report_table(service, writer)?,
        _ => {
            anyhow::bail!(
                "Invalid report format '{}'. Valid formats: table, json, csv",
                format
            );
        }
    }

    Ok(())
}

fn write_report_table(service: &BudgetService, mut writer: impl Write) -> Result<()> {
    let report = service.spending_report();

    writeln!(writer, "Category Spending Report")?;
    writeln!(writer)?;
    writeln!(
        writer,
        "{:<20} {:>12} {:>12} {:>8} {:>7}",
        "CATEGORY", "BALANCE", "WITHDRAWN", "PERCENT", "BUCKET"
    )?;
    writeln!(writer, "{}", "-".repeat(63))?;

    for cat in &report.categories {
        writeln!(
            writer,
            "{:<20} {:>12} {:>12} {:>7.1}% {:>6}%",
            truncate(&cat.category, 20),
            format_cents(cat.balance),
            format_cents(cat.withdrawn),
            cat.percentage,
            cat.bucket
        )?;
    }

    writeln!(writer, "{}", "-".repeat(63))?;
    writeln!(
        writer,
        "{:<20} {:>12} {:>12}",
        "TOTAL",
        "",
        format_cents(report.total_withdrawn)
    )?;
    writer.flush()?;
    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
