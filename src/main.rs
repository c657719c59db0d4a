mod commands;
mod config;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::{BuildInput, RecordKind};
use config::{RunConfig, log_directive_from_env_value, pretty_json_from_env_value};

#[derive(Parser)]
#[command(name = "dhis2")]
#[command(about = "DHIS2 tracker enrollment payload tool")]
struct Cli {
    /// Pretty-print JSON output (overrides DHIS2_PRETTY_JSON)
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Re-render an enrollment file without null or unknown fields
    Normalise {
        /// Path to an enrollment JSON file
        file: PathBuf,
        /// Payload kind held by the file
        #[arg(long, value_enum, default_value_t = RecordKind::Request)]
        kind: RecordKind,
    },
    /// Build a new enrollment request
    Build {
        /// Program UID
        #[arg(long)]
        program: String,
        /// Tracked entity instance UID
        #[arg(long)]
        tei: Option<String>,
        /// Organisation unit UID
        #[arg(long)]
        org_unit: Option<String>,
        /// Attribute value as UID=value (repeatable)
        #[arg(long = "attribute")]
        attributes: Vec<String>,
        /// Mark the enrollment for follow-up
        #[arg(long)]
        followup: bool,
        /// Enrollment date (defaults to today)
        #[arg(long)]
        enrollment_date: Option<String>,
        /// Incident date
        #[arg(long)]
        incident_date: Option<String>,
    },
    /// Check whether two enrollment files hold equal records
    Compare {
        left: PathBuf,
        right: PathBuf,
        /// Payload kind held by both files
        #[arg(long, value_enum, default_value_t = RecordKind::Request)]
        kind: RecordKind,
    },
}

/// Entry point for the `dhis2` binary.
///
/// # Environment Variables
/// - `DHIS2_PRETTY_JSON`: pretty-print JSON output (default: compact)
/// - `DHIS2_LOG`: tracing directive (default: "dhis2=info")
///
/// Logs go to stderr so that stdout carries only JSON.
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let pretty_json = pretty_json_from_env_value(std::env::var("DHIS2_PRETTY_JSON").ok())?;
    let log_directive = log_directive_from_env_value(std::env::var("DHIS2_LOG").ok());
    let config = RunConfig::new(pretty_json, log_directive)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_directive().parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = config.with_pretty_json(cli.pretty);

    match cli.command {
        Commands::Normalise { file, kind } => {
            println!("{}", commands::normalise(&file, kind, &config)?);
        }
        Commands::Build {
            program,
            tei,
            org_unit,
            attributes,
            followup,
            enrollment_date,
            incident_date,
        } => {
            let input = BuildInput {
                tracked_entity_instance: tei,
                program,
                org_unit,
                attributes,
                followup,
                enrollment_date,
                incident_date,
            };
            let today = chrono::Local::now().date_naive();
            println!("{}", commands::build(input, today, &config)?);
        }
        Commands::Compare { left, right, kind } => {
            if commands::compare(&left, &right, kind)? {
                println!("equal");
            } else {
                tracing::info!(
                    left = %left.display(),
                    right = %right.display(),
                    "records differ"
                );
                println!("different");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
