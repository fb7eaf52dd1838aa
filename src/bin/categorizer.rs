//! Command-line front end for the statement categorizer.
//!
//! # Usage
//! ```bash
//! categorizer add-category Housing
//! categorizer import statement.csv
//! categorizer correct statement.csv --set 3=Housing --set 7=Food
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use statement_categorizer::{Config, Correction, Edit, Session, Transaction};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Category store file, overrides the configuration
    #[arg(long)]
    store: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List categories and their learned keywords
    Categories,
    /// Create a new empty category
    AddCategory { name: String },
    /// Categorize a statement and print expenses, summary and payments
    Import { file: PathBuf },
    /// Categorize a statement, then reassign rows and learn their details
    Correct {
        file: PathBuf,
        /// Row reassignment as ROW=CATEGORY (row numbers as printed by `import`)
        #[arg(long = "set", value_parser = parse_edit, required = true)]
        edits: Vec<Edit>,
    },
    /// Print only the per-category expense summary
    Summary { file: PathBuf },
}

fn parse_edit(value: &str) -> Result<Edit, String> {
    let (row, category) = value
        .split_once('=')
        .ok_or_else(|| format!("expected ROW=CATEGORY, got {value:?}"))?;
    let index = row
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid row {row:?}: {e}"))?;
    let category = category.trim();
    if category.is_empty() {
        return Err("category must not be empty".to_string());
    }
    Ok(Edit::new(index, category))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(args.verbose)
        .init();

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(store) = args.store {
        config = config.with_store_path(store);
    }

    let mut session = Session::open(&config)
        .with_context(|| format!("opening category store {}", config.store_path.display()))?;

    match args.command {
        Command::Categories => {
            for category in session.store().categories() {
                println!("{} ({})", category.name, category.keywords.join(", "));
            }
        }
        Command::AddCategory { name } => {
            if session.on_add_category(&name)? {
                println!("Added category {}", name.trim());
            } else {
                println!("Category {} already exists", name.trim());
            }
        }
        Command::Import { file } => {
            upload(&mut session, &file)?;
            print_expenses(&session, &config.currency);
            print_summary(&session, &config.currency);
            print_payments(&session, &config.currency);
        }
        Command::Correct { file, edits } => {
            upload(&mut session, &file)?;
            let mut failed = 0;
            for (edit, outcome) in edits.iter().zip(session.on_apply_edits(&edits)) {
                match outcome {
                    Ok(Correction::Unchanged) => {
                        println!("row {}: already {}", edit.index, edit.category)
                    }
                    Ok(Correction::Reassigned { from, learned }) => println!(
                        "row {}: {} -> {}{}",
                        edit.index,
                        from,
                        edit.category,
                        if learned { " (learned)" } else { "" }
                    ),
                    Err(err) => {
                        failed += 1;
                        eprintln!("row {}: {err}", edit.index);
                    }
                }
            }
            print_summary(&session, &config.currency);
            if failed > 0 {
                bail!("{failed} of {} corrections failed", edits.len());
            }
        }
        Command::Summary { file } => {
            upload(&mut session, &file)?;
            print_summary(&session, &config.currency);
        }
    }

    Ok(())
}

fn upload(session: &mut Session, file: &Path) -> Result<()> {
    session
        .on_upload_file(file)
        .with_context(|| format!("processing {}", file.display()))?;
    Ok(())
}

fn print_row(index: usize, txn: &Transaction, currency: &str) {
    println!(
        "{:>4}  {}  {:<40}  {:>12} {}  {}",
        index,
        txn.date.format("%d/%m/%Y"),
        txn.details,
        format_amount(txn.amount),
        currency,
        txn.category
    );
}

fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

fn print_expenses(session: &Session, currency: &str) {
    println!("Expenses (Debits)");
    for (index, txn) in session.debits() {
        print_row(index, txn, currency);
    }
    println!();
}

fn print_summary(session: &Session, currency: &str) {
    println!("Expense Summary");
    for row in session.expense_summary() {
        println!(
            "  {:<24} {:>12} {}",
            row.category,
            format_amount(row.total_amount),
            currency
        );
    }
    println!();
}

fn print_payments(session: &Session, currency: &str) {
    println!(
        "Payments (Credits): {} {}",
        format_amount(session.total_credits()),
        currency
    );
    for (index, txn) in session.credits() {
        print_row(index, txn, currency);
    }
}
