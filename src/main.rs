use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use card_benefits::config::TelemetryConfig;
use card_benefits::models::{CardSummary, ResultSummary};
use card_benefits::{
    CalcOptions, CalculationPeriod, Catalog, Category, SortOption, SpendingProfile, evaluate,
    evaluate_all, load_profile, rank, telemetry, top,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tabled::Table;
use tracing::debug;

/// Credit Card Benefit Calculator — compare what each card is worth for your spending
#[derive(Parser)]
#[command(name = "card-benefits", version, about)]
struct Cli {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the cards in the catalog
    ListCards {
        /// Catalog JSON file (defaults to the bundled catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// List spending category keys accepted in profile files
    Categories,

    /// Rank every card in the catalog for a spending profile
    Compare {
        #[command(flatten)]
        calc: CalcArgs,
        /// Sort order: netBenefit, totalBenefits, cashback, points, annualFee
        #[arg(long, default_value_t = SortOption::NetBenefit)]
        sort: SortOption,
        /// Show every card instead of the top five
        #[arg(long)]
        all: bool,
    },

    /// Show the per-category breakdown for one card
    Breakdown {
        /// Card ID (see list-cards)
        #[arg(long)]
        card: String,
        #[command(flatten)]
        calc: CalcArgs,
    },
}

#[derive(Args)]
struct CalcArgs {
    /// Spending profile JSON file (monthly amounts); the sample profile when omitted
    #[arg(long)]
    profile: Option<PathBuf>,
    /// Catalog JSON file (defaults to the bundled catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Period caps are converted to
    #[arg(long, value_enum, default_value_t = PeriodArg::Annual)]
    period: PeriodArg,
    /// Count one-time welcome bonuses in the totals
    #[arg(long)]
    welcome_bonus: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PeriodArg {
    Monthly,
    Annual,
}

impl CalcArgs {
    fn options(&self) -> CalcOptions {
        CalcOptions {
            period: match self.period {
                PeriodArg::Monthly => CalculationPeriod::Monthly,
                PeriodArg::Annual => CalculationPeriod::Annual,
            },
            include_welcome_bonus: self.welcome_bonus,
        }
    }

    fn profile(&self) -> Result<SpendingProfile> {
        match &self.profile {
            Some(path) => load_profile(path)
                .with_context(|| format!("failed to load profile {}", path.display())),
            None => Ok(SpendingProfile::sample()),
        }
    }

    fn catalog(&self) -> Result<Catalog> {
        Ok(Catalog::load(self.catalog.as_deref())?)
    }
}

const DEFAULT_LIMIT: usize = 5;

fn main() -> Result<()> {
    let cli = Cli::parse();

    telemetry::init(&TelemetryConfig {
        log_level: cli.log_level.clone(),
    })?;

    match cli.command {
        Commands::ListCards { catalog } => {
            let catalog = Catalog::load(catalog.as_deref())?;
            if catalog.is_empty() {
                println!("No cards found in catalog.");
            } else {
                let rows: Vec<CardSummary> =
                    catalog.cards().iter().map(CardSummary::from).collect();
                println!("{}", Table::new(&rows));
            }
        }

        Commands::Categories => {
            for category in Category::ALL {
                println!("{:<22}{}", category.key(), category.label());
            }
        }

        Commands::Compare { calc, sort, all } => {
            let catalog = calc.catalog()?;
            let profile = calc.profile()?;
            let options = calc.options();
            debug!(cards = catalog.len(), %sort, "comparing cards");

            let ranked = rank(evaluate_all(catalog.cards(), &profile, &options), sort);
            let total = ranked.len();
            let shown = top(ranked, if all { None } else { Some(DEFAULT_LIMIT) });

            let rows: Vec<ResultSummary> = shown.iter().map(ResultSummary::from).collect();
            println!("{}", Table::new(&rows));
            if shown.len() < total {
                println!(
                    "Showing {} of {} cards (use --all to see every card)",
                    shown.len(),
                    total
                );
            }

            for result in shown.iter().filter(|r| !r.warnings.is_empty()) {
                for warning in &result.warnings {
                    println!("! {}: {}", result.card_name, warning);
                }
            }
        }

        Commands::Breakdown { card, calc } => {
            let catalog = calc.catalog()?;
            let Some(product) = catalog.get(&card) else {
                bail!("No card found with ID '{}'", card);
            };
            let result = evaluate(product, &calc.profile()?, &calc.options());

            println!("{} ({})", result.card_name, result.bank);
            if result.breakdown.is_empty() {
                println!("No rewards for this profile.");
            } else {
                println!("{}", Table::new(&result.breakdown));
            }
            println!("Cash back:      {:>12.2}", result.total_cashback);
            println!(
                "Points:         {:>12.2} (worth {:.2})",
                result.total_points, result.points_value
            );
            println!("Total benefits: {:>12.2}", result.total_benefits);
            println!("Annual fee:     {:>12.2}", result.annual_fee);
            println!("Net benefit:    {:>12.2}", result.net_annual_benefit);
            for warning in &result.warnings {
                println!("! {}", warning);
            }
        }
    }

    Ok(())
}
