//! `mallkit` command-line tool.
//!
//! - `mallkit min-cost-path [--grid FILE]` prints the minimum monotone path
//!   cost of a JSON grid (or the built-in sample).
//! - `mallkit user-info <MALLID>` prints a mall user's record as indented
//!   JSON.
//!
//! Errors go to stderr as `Error: <message>` with exit status 1.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mallkit_core::{fetch_user_info, sample_grid, ClientConfig, Grid, UserInfoClient};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mallkit", version, about = "Mall user lookup and grid path tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Minimum cost of a right/down/diagonal path through a cost grid.
    MinCostPath {
        /// JSON file holding an array of equal-length integer rows.
        #[arg(long)]
        grid: Option<PathBuf>,
    },
    /// Fetch and display user info for a given mall ID.
    UserInfo {
        /// The mall ID of the user.
        mallid: String,

        /// Endpoint base URL (overrides MALLKIT_BASE_URL).
        #[arg(long)]
        base_url: Option<String>,

        /// Request timeout in seconds (overrides MALLKIT_TIMEOUT_SECS).
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        timeout_secs: Option<u64>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::MinCostPath { grid } => {
            let grid = match grid {
                Some(path) => load_grid(&path)?,
                None => sample_grid(),
            };
            tracing::debug!(rows = grid.rows(), cols = grid.cols(), "computing minimum cost path");
            let cost = grid.min_cost()?;
            println!("Minimum cost path: {cost}");
        }
        Command::UserInfo {
            mallid,
            base_url,
            timeout_secs,
        } => {
            let mut config = ClientConfig::from_env()?;
            if let Some(base_url) = base_url {
                config.set_base_url(base_url, "--base-url")?;
            }
            if let Some(secs) = timeout_secs {
                config.timeout = Duration::from_secs(secs);
            }

            let client = UserInfoClient::from_config(&config);
            let user = fetch_user_info(&client, &mallid)?;

            let mut stdout = io::stdout().lock();
            write_pretty(&mut stdout, &user)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn load_grid(path: &Path) -> Result<Grid> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read grid file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid grid in {}", path.display()))
}

/// JSON with four-space indentation; non-ASCII characters are written as-is.
fn write_pretty<W: Write, T: Serialize>(out: W, value: &T) -> Result<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(out, formatter);
    value.serialize(&mut ser)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn user_info_takes_positional_mallid() {
        let cli = Cli::try_parse_from(["mallkit", "user-info", "mall001", "--timeout-secs", "3"]).unwrap();
        match cli.command {
            Command::UserInfo {
                mallid,
                base_url,
                timeout_secs,
            } => {
                assert_eq!(mallid, "mall001");
                assert!(base_url.is_none());
                assert_eq!(timeout_secs, Some(3));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(Cli::try_parse_from(["mallkit", "user-info", "m", "--timeout-secs", "0"]).is_err());
    }

    #[test]
    fn pretty_output_uses_four_spaces_and_keeps_unicode() {
        let mut buf = Vec::new();
        write_pretty(&mut buf, &serde_json::json!({"name": "김민지"})).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "{\n    \"name\": \"김민지\"\n}");
    }

    #[test]
    fn pretty_output_keeps_response_key_order() {
        let user: serde_json::Value =
            serde_json::from_str(r#"{"userId": "m", "name": "n", "grade": "VIP"}"#).unwrap();
        let mut buf = Vec::new();
        write_pretty(&mut buf, &user).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "{\n    \"userId\": \"m\",\n    \"name\": \"n\",\n    \"grade\": \"VIP\"\n}"
        );
    }

    #[test]
    fn blank_base_url_flag_is_rejected() {
        let err = run(Command::UserInfo {
            mallid: "mall001".to_string(),
            base_url: Some("  ".to_string()),
            timeout_secs: None,
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "--base-url must not be empty");
    }
}
