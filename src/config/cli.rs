use crate::domain::model::{NewAddress, SearchParams};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "address-access")]
#[command(about = "Query and register addresses against the API or the offline store")]
#[command(version)]
pub struct CliConfig {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "address-access.toml")]
    pub config: PathBuf,

    /// Use the offline store instead of the API
    #[arg(long)]
    pub offline: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List all addresses
    List,
    /// Free-text search
    Search { text: String },
    /// Filtered search with key=value pairs
    Filter {
        #[arg(value_parser = parse_key_value, required = true)]
        params: Vec<(String, String)>,
    },
    /// Register a new address
    Register(RegisterArgs),
    /// Fetch one address by id
    Get { id: String },
    /// Delete one address by id
    Delete { id: String },
    /// Store a session token
    Login { token: String },
    /// Remove the stored session token
    Logout,
}

#[derive(Debug, Clone, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub location_type: String,
    #[arg(long, allow_hyphen_values = true)]
    pub longitude: f64,
    #[arg(long, allow_hyphen_values = true)]
    pub latitude: f64,
    #[arg(long)]
    pub project: String,
    #[arg(long)]
    pub created_by: String,
    #[arg(long, default_value = "")]
    pub created_by_name: String,
    #[arg(long)]
    pub observations: Option<String>,
    #[arg(long, default_value = "")]
    pub plus_code: String,
}

impl From<RegisterArgs> for NewAddress {
    fn from(args: RegisterArgs) -> Self {
        NewAddress {
            name: args.name,
            location_type: args.location_type,
            longitude: args.longitude,
            latitude: args.latitude,
            created_by: args.created_by,
            created_by_name: args.created_by_name,
            project: args.project,
            observations: args.observations,
            plus_code: args.plus_code,
            created_at: None,
        }
    }
}

pub fn to_search_params(pairs: Vec<(String, String)>) -> SearchParams {
    pairs.into_iter().collect()
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{}'", raw)),
    }
}
