//! FraudWatch CLI - Main entry point

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use fraudwatch_cli::{commands, AppContext, PolicyArg, Settings, VariantArg};
use fraudwatch_engine::VerdictLabel;
use fraudwatch_session::{AuditFilter, BiometricModality, SampleGenerator, Scenario};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fraudwatch")]
#[command(about = "FraudWatch - rule-based transaction fraud screening", long_about = None)]
struct Cli {
    /// Engine config (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Distance table (JSON list of {from, to, km})
    #[arg(long, global = true)]
    distances: Option<PathBuf>,

    /// Seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Evaluate as if at this instant (RFC 3339)
    #[arg(long, global = true)]
    at: Option<DateTime<Utc>>,

    /// How the final label is derived
    #[arg(long, global = true, value_enum)]
    policy: Option<PolicyArg>,

    /// Rule set to run
    #[arg(long, global = true, value_enum)]
    variant: Option<VariantArg>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single transaction
    Evaluate {
        /// Customer name
        customer: String,
        /// Transaction amount
        amount: Decimal,
        /// Device status (trusted, new, suspicious)
        device: String,
        /// Current location
        location: String,
        /// Previous location
        previous_location: String,
        /// Biometric checks to try if flagged, in order
        #[arg(long, value_delimiter = ',')]
        verify: Vec<BiometricModality>,
    },

    /// Run a quick-test transaction
    Scenario {
        /// fraud or legit
        scenario: Scenario,
        /// Biometric checks to try if flagged, in order
        #[arg(long, value_delimiter = ',')]
        verify: Vec<BiometricModality>,
    },

    /// Generate and evaluate random transactions, then show the log
    Simulate {
        /// Number of transactions
        #[arg(long, default_value = "10")]
        count: usize,
        /// Start from the four demo records
        #[arg(long)]
        seeded: bool,
        /// Towns to draw locations from (comma separated)
        #[arg(long, value_delimiter = ',')]
        towns: Vec<String>,
        /// Smallest generated amount
        #[arg(long, default_value = "500")]
        min_amount: u32,
        /// Largest generated amount
        #[arg(long, default_value = "80000")]
        max_amount: u32,
        /// Show only this label (legitimate, flagged)
        #[arg(long)]
        status: Option<VerdictLabel>,
        /// Minimum risk score to show
        #[arg(long, default_value = "0")]
        min_risk: u8,
        /// Maximum number of rows to show
        #[arg(long)]
        limit: Option<usize>,
    },

    /// List the distance table
    Distances,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let settings = Settings {
        config: cli.config,
        distances: cli.distances,
        seed: cli.seed,
        at: cli.at,
        policy: cli.policy,
        variant: cli.variant,
        json: cli.json,
    };
    let mut ctx = AppContext::new(&settings)?;

    match cli.command {
        Commands::Evaluate {
            customer,
            amount,
            device,
            location,
            previous_location,
            verify,
        } => {
            let modalities = commands::resolve_modalities(&verify);
            let submission = commands::evaluate(
                &mut ctx,
                &customer,
                amount,
                &device,
                &location,
                &previous_location,
                &modalities,
            )
            .await?;
            print!("{}", commands::render_submission(&submission, ctx.json)?);
        }

        Commands::Scenario { scenario, verify } => {
            let modalities = commands::resolve_modalities(&verify);
            let submission = commands::scenario(&mut ctx, scenario, &modalities).await?;
            print!("{}", commands::render_submission(&submission, ctx.json)?);
        }

        Commands::Simulate {
            count,
            seeded,
            towns,
            min_amount,
            max_amount,
            status,
            min_risk,
            limit,
        } => {
            if seeded {
                ctx = ctx.with_seed_records();
            }
            let generator = SampleGenerator::new()
                .with_amount_range(min_amount, max_amount)
                .with_towns(towns);
            ctx = ctx.with_generator(generator);
            let modalities = commands::resolve_modalities(&[]);
            commands::simulate(&mut ctx, count, &modalities).await?;

            let mut filter = AuditFilter::new().with_min_risk_score(min_risk);
            if let Some(status) = status {
                filter = filter.with_status(status);
            }
            if let Some(limit) = limit {
                filter = filter.with_limit(limit);
            }

            let records = commands::history(&ctx, &filter);
            let stats = ctx.monitor.stats();
            print!("{}", commands::render_history(&records, &stats, ctx.json)?);
        }

        Commands::Distances => {
            let entries = commands::distances(&ctx);
            print!("{}", commands::render_distances(&entries, ctx.json)?);
        }
    }

    Ok(())
}
