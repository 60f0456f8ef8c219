//! Spaceway CLI - calculators and content checks from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Project revenue at a competitive price
//! spaceway-cli calc pricing --current-price 299 --monthly-volume 1000 --competitor-price 279
//!
//! # Business metrics, with the CSV report written to disk
//! spaceway-cli calc turnover --products 500 --avg-sale 150 --csv report.csv
//!
//! # Verify the legal pages parse before deploying
//! spaceway-cli content check --dir crates/site/content
//! ```
//!
//! # Commands
//!
//! - `calc pricing` - Pricing projection
//! - `calc turnover` - Business metrics and optional CSV report
//! - `content check` - Validate markdown legal pages

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "spaceway-cli")]
#[command(author, version, about = "Spaceway CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the site calculators
    Calc {
        #[command(subcommand)]
        calculator: Calculator,
    },
    /// Inspect site content
    Content {
        #[command(subcommand)]
        action: ContentAction,
    },
}

#[derive(Subcommand)]
enum Calculator {
    /// Revenue projection at a price just under the competitor's
    Pricing {
        /// Current selling price (₹)
        #[arg(long)]
        current_price: f64,

        /// Units sold per month
        #[arg(long)]
        monthly_volume: f64,

        /// Competitor's price (₹)
        #[arg(long)]
        competitor_price: f64,
    },
    /// Monthly and annual business metrics
    Turnover {
        /// Number of listed products
        #[arg(long, default_value_t = 500.0)]
        products: f64,

        /// Average sale value (₹)
        #[arg(long, default_value_t = 150.0)]
        avg_sale: f64,

        /// Sales per product per month
        #[arg(long, default_value_t = 10.0)]
        frequency: f64,

        /// Gross margin (%)
        #[arg(long, default_value_t = 25.0)]
        margin: f64,

        /// Operating costs (% of revenue)
        #[arg(long, default_value_t = 15.0)]
        costs: f64,

        /// Write the CSV report to this path
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ContentAction {
    /// Check that every legal page loads
    Check {
        /// Content directory holding `pages/*.md`
        #[arg(short, long, default_value = "crates/site/content")]
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Calc { calculator } => match calculator {
            Calculator::Pricing {
                current_price,
                monthly_volume,
                competitor_price,
            } => commands::calc::pricing(current_price, monthly_volume, competitor_price)?,
            Calculator::Turnover {
                products,
                avg_sale,
                frequency,
                margin,
                costs,
                csv,
            } => {
                let input = spaceway_core::BusinessInput::new(
                    products, avg_sale, frequency, margin, costs,
                )?;
                commands::calc::turnover(&input, csv.as_deref()).await?;
            }
        },
        Commands::Content { action } => match action {
            ContentAction::Check { dir } => commands::content::check(&dir)?,
        },
    }
    Ok(())
}
