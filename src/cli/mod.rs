//! CLI definition and dispatch for the `igx` binary.

pub mod output;

use std::path::PathBuf;

use anyhow::Context;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use serde_json::json;

use crate::client::IgClient;
use crate::config;
use crate::domain::position::wire::{ClosePositionRequest, CreatePositionRequest};
use crate::domain::position::{DealReference, OrderType};
use crate::domain::price::PriceQuery;
use crate::network::Platform;
use crate::shared::{DealId, Direction, Epic, Resolution};

use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "igx")]
#[command(about = "Command line utility to interact with the IG Index trading platform")]
#[command(version)]
pub struct Cli {
    /// Output format type
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Trading platform (overrides the config file)
    #[arg(long, global = true)]
    pub platform: Option<Platform>,

    /// Path to the config file (default: ~/.igindex.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Query account details
    Account {
        #[command(subcommand)]
        command: AccountCommand,
    },
    /// Search and inspect instruments
    Instrument {
        #[command(subcommand)]
        command: InstrumentCommand,
    },
    /// Manage positions
    Position {
        #[command(subcommand)]
        command: PositionCommand,
    },
    /// Session operations
    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum AccountCommand {
    /// Get account information
    Get,
}

#[derive(Subcommand, Debug)]
pub enum InstrumentCommand {
    /// Search for instruments
    Search {
        /// Search term
        term: String,
    },
    /// Get instrument details
    Get {
        /// Instrument epic
        epic: Epic,
        /// Retrieve price data
        #[arg(short, long)]
        prices: bool,
        /// Resolution of the requested prices
        #[arg(short = 'n', long, default_value = "MINUTE")]
        resolution: Resolution,
        /// Date-time range to retrieve price data (RFC 3339,
        /// `YYYY-MM-DD[ HH:MM[:SS]]`, or `now`)
        #[arg(short, long, num_args = 2, value_names = ["FROM", "TO"], conflicts_with = "max_num")]
        range: Option<Vec<String>>,
        /// Max number of data points to retrieve; ignored if a range is given
        #[arg(short, long)]
        max_num: Option<u32>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PositionCommand {
    /// List open positions
    List,
    /// Open a position
    Open(OpenArgs),
    /// Close a position
    Close(CloseArgs),
}

#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Instrument epic
    #[arg(long)]
    pub epic: Epic,
    /// Deal direction (buy or sell)
    #[arg(long)]
    pub direction: Direction,
    /// Deal size
    #[arg(long)]
    pub size: Decimal,
    /// Instrument expiry
    #[arg(long, default_value = "DFB")]
    pub expiry: String,
    /// Deal currency
    #[arg(long, default_value = "GBP")]
    pub currency: String,
    /// Attach a limit at this level
    #[arg(long)]
    pub limit_level: Option<Decimal>,
    /// Attach a stop at this level
    #[arg(long)]
    pub stop_level: Option<Decimal>,
}

#[derive(Args, Debug)]
pub struct CloseArgs {
    /// Deal identifier of the position to close
    #[arg(long)]
    pub deal_id: DealId,
    /// Closing direction (opposite of the open direction)
    #[arg(long)]
    pub direction: Direction,
    /// Size to close
    #[arg(long)]
    pub size: Decimal,
}

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Show current session details
    Info,
    /// Log out and invalidate the session
    Logout,
}

// ─── Dispatch ────────────────────────────────────────────────────────────────

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = config::load(cli.config.as_deref(), cli.platform)?;
    let client = IgClient::from_config(&config)?;
    let format = cli.format;

    match cli.command {
        Command::Account {
            command: AccountCommand::Get,
        } => {
            let accounts = client.accounts().list().await?;
            let session = client.auth().details().await?;
            match format {
                OutputFormat::Json => {
                    output::print_json(&json!({"accounts": accounts, "session": session}))?
                }
                OutputFormat::Text => {
                    println!("{}", output::accounts_table(&accounts));
                    println!();
                    println!("{}", output::session_block(&session));
                }
            }
        }

        Command::Instrument { command } => match command {
            InstrumentCommand::Search { term } => {
                let markets = client.instruments().search(&term).await?;
                match format {
                    OutputFormat::Json => output::print_json(&markets)?,
                    OutputFormat::Text => println!("{}", output::markets_table(&markets)),
                }
            }
            InstrumentCommand::Get {
                epic,
                prices,
                resolution,
                range,
                max_num,
            } => {
                let instrument = client.instruments().get(&epic).await?;
                let history = if prices {
                    let mut query = PriceQuery::resolution(resolution);
                    if let Some(range) = range {
                        query.from = Some(parse_time(&range[0])?);
                        query.to = Some(parse_time(&range[1])?);
                    } else {
                        query.max = Some(max_num.unwrap_or(10));
                    }
                    Some(client.prices().get(&epic, &query).await?)
                } else {
                    None
                };
                match format {
                    OutputFormat::Json => {
                        output::print_json(&json!({"data": instrument, "prices": history}))?
                    }
                    OutputFormat::Text => {
                        println!("{}", output::instrument_block(&instrument));
                        if let Some(history) = history {
                            println!();
                            println!("{}", output::candles_table(&history));
                        }
                    }
                }
            }
        },

        Command::Position { command } => match command {
            PositionCommand::List => {
                let positions = client.positions().list().await?;
                match format {
                    OutputFormat::Json => output::print_json(&positions)?,
                    OutputFormat::Text => println!("{}", output::positions_table(&positions)),
                }
            }
            PositionCommand::Open(args) => {
                let mut request = CreatePositionRequest::market(
                    args.epic,
                    args.direction,
                    args.size,
                    &args.currency,
                );
                request.expiry = args.expiry;
                request.limit_level = args.limit_level;
                request.stop_level = args.stop_level;
                // Attached orders require an explicitly new position.
                request.force_open = args.limit_level.is_some() || args.stop_level.is_some();

                let reference = client.positions().open(&request).await?;
                report_confirmation(&client, &reference, format).await?;
            }
            PositionCommand::Close(args) => {
                let request = ClosePositionRequest {
                    deal_id: args.deal_id,
                    direction: args.direction,
                    size: args.size,
                    order_type: OrderType::Market,
                    level: None,
                };
                let reference = client.positions().close(&request).await?;
                report_confirmation(&client, &reference, format).await?;
            }
        },

        Command::Session { command } => match command {
            SessionCommand::Info => {
                let session = client.auth().details().await?;
                match format {
                    OutputFormat::Json => output::print_json(&session)?,
                    OutputFormat::Text => println!("{}", output::session_block(&session)),
                }
            }
            SessionCommand::Logout => {
                client.auth().logout().await?;
                if format == OutputFormat::Text {
                    println!("Logged out");
                }
            }
        },
    }

    Ok(())
}

async fn report_confirmation(
    client: &IgClient,
    reference: &DealReference,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let confirmation = client.positions().confirm(reference).await?;
    match format {
        OutputFormat::Json => output::print_json(&confirmation)?,
        OutputFormat::Text => println!("{}", output::confirmation_block(&confirmation)),
    }
    if !confirmation.is_accepted() {
        anyhow::bail!(
            "deal rejected: {}",
            confirmation.reason.as_deref().unwrap_or("unknown reason")
        );
    }
    Ok(())
}

// ─── Date parsing ────────────────────────────────────────────────────────────

/// Parse a CLI date-time expression.
///
/// Accepts `now`, RFC 3339, and `YYYY-MM-DD` with optional `HH:MM[:SS]`
/// (separated by a space or `T`).
pub fn parse_time(expr: &str) -> anyhow::Result<NaiveDateTime> {
    if expr.eq_ignore_ascii_case("now") {
        return Ok(Utc::now().naive_utc());
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(expr) {
        return Ok(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(expr, fmt) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(expr, "%Y-%m-%d")
        .map(|d| d.and_hms_opt(0, 0, 0).expect("midnight is valid"))
        .with_context(|| format!("do not know how to parse datetime: {expr}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_time_formats() {
        assert_eq!(
            parse_time("2021-02-10").unwrap(),
            NaiveDate::from_ymd_opt(2021, 2, 10)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
        assert_eq!(
            parse_time("2021-02-10 11:42").unwrap(),
            NaiveDate::from_ymd_opt(2021, 2, 10)
                .unwrap()
                .and_hms_opt(11, 42, 0)
                .unwrap()
        );
        assert_eq!(
            parse_time("2021-02-10T11:42:56").unwrap(),
            NaiveDate::from_ymd_opt(2021, 2, 10)
                .unwrap()
                .and_hms_opt(11, 42, 56)
                .unwrap()
        );
        assert!(parse_time("now").is_ok());
        assert!(parse_time("three days ago").is_err());
    }

    #[test]
    fn test_range_conflicts_with_max_num() {
        let result = Cli::try_parse_from([
            "igx",
            "instrument",
            "get",
            "IX.D.FTSE.DAILY.IP",
            "--prices",
            "--range",
            "2021-02-01",
            "2021-02-10",
            "--max-num",
            "5",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_position_open_args_parse() {
        let cli = Cli::try_parse_from([
            "igx",
            "position",
            "open",
            "--epic",
            "IX.D.FTSE.DAILY.IP",
            "--direction",
            "buy",
            "--size",
            "0.5",
            "--stop-level",
            "7300",
        ])
        .unwrap();
        match cli.command {
            Command::Position {
                command: PositionCommand::Open(args),
            } => {
                assert_eq!(args.direction, Direction::Buy);
                assert_eq!(args.size, Decimal::new(5, 1));
                assert_eq!(args.stop_level, Some(Decimal::new(7300, 0)));
                assert_eq!(args.expiry, "DFB");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_format_flag() {
        let cli =
            Cli::try_parse_from(["igx", "position", "list", "--format", "json"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
