use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum};
use seqdb_core::Record;

#[derive(Debug, Parser)]
#[command(name = "seqdb", version, about = "Networked in-memory positional record store")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the server
    Serve(ServeArgs),
    /// Find every record holding a value
    Search {
        #[command(flatten)]
        conn: ConnArgs,
        value: i32,
    },
    /// Append values
    Add {
        #[command(flatten)]
        conn: ConnArgs,
        #[arg(allow_negative_numbers = true)]
        values: Vec<i32>,
    },
    /// Overwrite positions, given as INDEX=VALUE pairs
    Update {
        #[command(flatten)]
        conn: ConnArgs,
        #[arg(allow_negative_numbers = true)]
        records: Vec<RecordArg>,
    },
    /// Remove positions
    Delete {
        #[command(flatten)]
        conn: ConnArgs,
        #[arg(allow_negative_numbers = true)]
        indexes: Vec<i32>,
    },
    /// Check that a server is up
    Ping {
        #[command(flatten)]
        conn: ConnArgs,
    },
    /// Show store size and settings
    Info {
        #[command(flatten)]
        conn: ConnArgs,
    },
    /// Generate load against a server
    Bench(BenchArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Address to listen on
    #[arg(long)]
    pub listen: Option<SocketAddr>,
    /// Runtime worker threads
    #[arg(short = 'p', long = "workers")]
    pub workers: Option<usize>,
    /// Number of values created at startup
    #[arg(long)]
    pub records: Option<usize>,
    /// Startup values are drawn from [0, MODULUS)
    #[arg(long)]
    pub modulus: Option<i32>,
    /// Seed for the startup values
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Args)]
pub struct ConnArgs {
    /// Server address
    #[arg(long, default_value = "127.0.0.1:50051")]
    pub addr: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BenchMethod {
    /// Search, then append a value
    Add,
    /// Search, then overwrite every match
    Update,
    /// Search, append the matched values, then delete the matches
    Delete,
}

#[derive(Debug, Clone, Args)]
pub struct BenchArgs {
    #[command(flatten)]
    pub conn: ConnArgs,
    /// Experiment name, used for the output file
    #[arg(short, long, default_value = "bench")]
    pub name: String,
    /// Workload to run
    #[arg(short, long, value_enum)]
    pub method: BenchMethod,
    /// Number of concurrent clients
    #[arg(short, long, default_value_t = 1)]
    pub parallel: usize,
    /// Cycles per client
    #[arg(short, long, default_value_t = 100)]
    pub cycle: usize,
    /// Queries and values are drawn from [0, RANGE]
    #[arg(long, default_value_t = 1_000_000)]
    pub range: i32,
    /// Directory for the per-request log, written to NAME_PARALLEL
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// An `INDEX=VALUE` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordArg(pub Record);

impl FromStr for RecordArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (index, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected INDEX=VALUE, got '{}'", s))?;
        let index = index
            .trim()
            .parse()
            .map_err(|e| format!("bad index '{}': {}", index, e))?;
        let value = value
            .trim()
            .parse()
            .map_err(|e| format!("bad value '{}': {}", value, e))?;
        Ok(RecordArg(Record::new(index, value)))
    }
}
