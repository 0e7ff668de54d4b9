//! Command-line surface.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

#[derive(Debug, Parser)]
#[command(name = "wariflex")]
#[command(about = "Split shared expenses into exact integer amounts")]
pub struct Cli {
    /// JSON store holding recorded expenses
    #[arg(long, global = true, env = "WARIFLEX_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a new expense
    Add {
        /// Short description shown in listings
        #[arg(short, long)]
        title: String,

        /// Total in smallest currency units
        #[arg(short, long)]
        amount: u64,

        #[arg(short, long)]
        memo: Option<String>,

        /// Participant as NAME or NAME=VALUE; repeat for each person
        #[arg(short, long = "share", value_parser = parse_share_spec, required = true)]
        shares: Vec<ShareSpec>,

        /// Read share values as amounts instead of percentages
        #[arg(long)]
        by_amount: bool,
    },

    /// List active expenses, or settled ones with --settled
    List {
        #[arg(long)]
        settled: bool,
    },

    /// Show one expense with its exact breakdown
    Show { id: String },

    /// Edit the shares of an active expense
    Edit {
        id: String,

        /// Set one share as NAME=PERCENT; the other unlocked shares absorb the change
        #[arg(long, value_parser = parse_share_spec)]
        set: Option<ShareSpec>,

        /// Flip the lock on a participant, by name
        #[arg(long = "toggle-lock")]
        toggle_lock: Vec<String>,

        /// Spread what the locked shares leave over the unlocked ones
        #[arg(long)]
        fill: bool,
    },

    /// Mark an expense as settled
    Settle { id: String },

    /// Delete an expense
    Delete { id: String },

    /// Delete every settled expense
    ClearHistory,

    /// Write an expense's breakdown as CSV
    Export {
        id: String,

        /// Defaults to `<title>_history.csv` in the current directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compute a breakdown without recording anything
    Split {
        #[arg(short, long)]
        amount: u64,

        /// Split evenly between this many unnamed participants
        #[arg(short, long, conflicts_with = "shares", required_unless_present = "shares")]
        even: Option<usize>,

        #[arg(short, long = "share", value_parser = parse_share_spec)]
        shares: Vec<ShareSpec>,

        #[arg(long)]
        by_amount: bool,
    },
}

/// A participant given on the command line, optionally with a fixed value.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareSpec {
    pub name: String,
    pub value: Option<Decimal>,
}

pub fn parse_share_spec(raw: &str) -> Result<ShareSpec, String> {
    let (name, value) = match raw.split_once('=') {
        Some((name, value)) => {
            let value = Decimal::from_str(value.trim())
                .map_err(|e| format!("invalid value '{}': {}", value, e))?;
            if value.is_sign_negative() {
                return Err(format!("value for '{}' must not be negative", name));
            }
            (name, Some(value))
        }
        None => (raw, None),
    };

    let name = name.trim();
    if name.is_empty() {
        return Err("participant name must not be empty".to_string());
    }
    Ok(ShareSpec {
        name: name.to_string(),
        value,
    })
}
