mod run;


use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "outreach")]
#[command(about = "Enrich prospects and draft personalized outreach")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Enrich each prospect, draft a message, and optionally save the drafts.
    Run {
        /// JSON or YAML list of prospects.
        #[arg(long)]
        prospects: PathBuf,
        /// JSON or YAML campaign definition.
        #[arg(long)]
        campaign: PathBuf,
        /// Draft from the prospect list alone, without profile lookups.
        #[arg(long)]
        direct: bool,
        /// Prospect id to process ahead of the rest. Repeatable.
        #[arg(long = "priority", value_name = "ID")]
        priority: Vec<String>,
        /// Save successful drafts to the record store under this organization.
        #[arg(long, value_name = "ORG_ID")]
        save_for: Option<String>,
        /// Override `OUTREACH_INTER_ITEM_DELAY_MS` for this run.
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Print the resolved configuration with secrets redacted.
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = outreach_core::load_app_config_from_env()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Run {
            prospects,
            campaign,
            direct,
            priority,
            save_for,
            delay_ms,
        } => {
            run::run_outreach(
                &config,
                run::RunArgs {
                    prospects,
                    campaign,
                    direct,
                    priority,
                    save_for,
                    delay_ms,
                },
            )
            .await?;
        }
        Commands::Config => println!("{config:#?}"),
    }

    Ok(())
}
