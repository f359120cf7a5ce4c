pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod notice;
pub mod session;
pub mod share;
pub mod state;


use clap::Parser;
use cli::Cli;
use config::AppConfig;
use db::Database;
use state::BillBook;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    // Initialize database
    let db_path = cli.db.clone().unwrap_or_else(|| config.db_path());
    let db = Database::open(&db_path)?;
    db.initialize()?;
    tracing::debug!(path = %db_path.display(), "Database ready");

    let now = chrono::Local::now().naive_local();
    let mut book = BillBook::load(db, now.date())?;

    cli::dispatch(&mut book, cli.command, now)
}
