//! Exercise tracker command-line entry point.
//!
//! # Responsibility
//! - Read configuration from flags and environment.
//! - Open the store once, dispatch one request, close the store.
//! - Print the JSON body; failures exit non-zero with the status on stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;
use tracker_core::{default_log_level, init_logging, Store};

mod commands;
mod response;

use commands::Command;

#[derive(Parser, Debug)]
#[command(name = "tracker", version, about = "Track users and their logged exercises")]
struct Cli {
    /// SQLite database file
    #[arg(long, env = "TRACKER_DB_PATH", default_value = "exercise-tracker.db")]
    db: PathBuf,

    /// Use a throwaway in-memory database; takes precedence over `--db`
    #[arg(long)]
    memory: bool,

    /// trace|debug|info|warn|error
    #[arg(long, env = "TRACKER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, env = "TRACKER_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(|err| anyhow!("failed to start logging: {err}"))?;
    }

    let store = if cli.memory {
        Store::open_in_memory().context("failed to open in-memory database")?
    } else {
        Store::open(&cli.db)
            .with_context(|| format!("failed to open database {}", cli.db.display()))?
    };

    let response = commands::run(&store, cli.command).context("failed to encode response")?;
    store.close().context("failed to close database")?;

    println!("{}", serde_json::to_string_pretty(&response.body)?);
    if response.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        info!("event=request module=cli status=error http_status={}", response.status);
        eprintln!("status {}", response.status);
        Ok(ExitCode::FAILURE)
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn parses_log_query_flags() {
        let cli = Cli::try_parse_from([
            "tracker", "--db", "/tmp/t.db", "log", "1", "--from", "2024-01-12", "--limit", "2",
        ])
        .unwrap();
        assert_eq!(cli.db, PathBuf::from("/tmp/t.db"));
        assert_eq!(
            cli.command,
            Command::Log {
                user_id: "1".to_string(),
                from: Some("2024-01-12".to_string()),
                to: None,
                limit: Some("2".to_string()),
            }
        );
    }

    #[test]
    fn memory_is_accepted_alongside_db_from_env() {
        std::env::set_var("TRACKER_DB_PATH", "/tmp/from-env.db");
        let cli = Cli::try_parse_from(["tracker", "--memory", "users"]).unwrap();
        std::env::remove_var("TRACKER_DB_PATH");

        assert!(cli.memory);
        assert_eq!(cli.db, PathBuf::from("/tmp/from-env.db"));
        assert_eq!(cli.command, Command::Users);

        let cli = Cli::try_parse_from(["tracker", "--memory", "--db", "x.db", "users"]).unwrap();
        assert!(cli.memory);
    }

    #[test]
    fn add_exercise_keeps_raw_strings() {
        let cli = Cli::try_parse_from([
            "tracker",
            "--memory",
            "add-exercise",
            "abc",
            "--description",
            "Running",
            "--duration",
            "thirty",
        ])
        .unwrap();
        assert!(cli.memory);
        assert_eq!(
            cli.command,
            Command::AddExercise {
                user_id: "abc".to_string(),
                description: Some("Running".to_string()),
                duration: Some("thirty".to_string()),
                date: None,
            }
        );
    }
}
