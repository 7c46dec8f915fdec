mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bankdq")]
#[command(version, about = "Banking data-quality auditor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full audit against the banking database
    Audit {
        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Directory to write the durable audit log file into
        #[arg(short, long)]
        log_dir: Option<String>,
    },

    /// List the rule catalog
    Rules {
        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    // Execute command
    match cli.command {
        Commands::Audit { format, log_dir } => {
            commands::audit::execute(&format, log_dir.as_deref()).await
        }

        Commands::Rules { format } => commands::rules::execute(&format),
    }
}
