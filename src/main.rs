//! Punchclock server
//!
//! Runs the attendance API the terminal frontend talks to, and a few
//! maintenance commands.

use anyhow::Context;
use clap::{Parser, Subcommand};
use punchclock::api::{serve, AppState};
use punchclock::attendance::AttendanceService;
use punchclock::config::{generate_default_config, Config, LoggingConfig};
use punchclock::storage::Database;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "punchclock")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Attendance terminal backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server (default)
    Serve,

    /// Print or write the default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete every recorded punch
    ClearLog,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Config { output }) = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => std::fs::write(path, content)
                .with_context(|| format!("writing config to {:?}", path))?,
            None => print!("{}", content),
        }
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    init_logging(&config.logging);

    tracing::info!("Punchclock v{}", env!("CARGO_PKG_VERSION"));

    let db_path = config.storage.path();
    let db = Arc::new(
        Database::open(&db_path).with_context(|| format!("opening database {:?}", db_path))?,
    );
    let attendance = Arc::new(AttendanceService::new(db, config.attendance.rules()));

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::ClearLog => {
            let removed = attendance.clear_punch_log()?;
            println!("Removed {} punches", removed);
        }
        Commands::Serve | Commands::Config { .. } => {
            let api_config = config.api.server_config();
            serve(AppState::new(attendance, api_config.clone()), &api_config).await?;
        }
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "punchclock={},tower_http={}",
            logging.level, logging.level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
