//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for yaml2mongo using clap.

pub mod load;

use crate::config::{secret_string, SecretString};
use clap::{ArgAction, Parser};

/// Success
pub const EXIT_SUCCESS: i32 = 0;

/// Missing connection URI or connection failure
pub const EXIT_CONNECTION: i32 = 1;

/// Invalid arguments
pub const EXIT_USAGE: i32 = 2;

/// Credentials rejected during the load
pub const EXIT_AUTHENTICATION: i32 = 3;

/// Any other load failure
pub const EXIT_LOAD_FAILED: i32 = 4;

/// Malformed application config or logging descriptor
pub const EXIT_FATAL: i32 = 5;

/// yaml2mongo - Upsert YAML documents into a MongoDB collection
#[derive(Parser, Debug)]
#[command(name = "yaml2mongo")]
#[command(version, about, long_about = None)]
#[command(author = "yaml2mongo Contributors")]
pub struct Cli {
    /// Path to the YAML file to load
    #[arg(short, long)]
    pub filename: String,

    /// Target collection
    #[arg(short, long)]
    pub collection: String,

    /// Target database
    #[arg(short, long)]
    pub database: String,

    /// Field identifying a document; repeat for compound keys
    #[arg(short, long = "key", required = true, action = ArgAction::Append, num_args = 1)]
    pub keys: Vec<String>,

    /// Value substituted for `{username}` in the connection URI
    #[arg(short, long, env = "MONGODB_USERNAME")]
    pub username: Option<String>,

    /// Value substituted for `{password}` in the connection URI
    #[arg(short, long, env = "MONGODB_PASSWORD", hide_env_values = true, value_parser = parse_secret)]
    pub password: Option<SecretString>,

    /// MongoDB connection URI, may contain `{username}` and `{password}`
    #[arg(long, env = "MONGODB_URI", hide_env_values = true, value_parser = parse_secret)]
    pub uri: Option<SecretString>,

    /// Validate the file and keys against an in-memory collection
    #[arg(long)]
    pub dry_run: bool,
}

fn parse_secret(value: &str) -> Result<SecretString, String> {
    Ok(secret_string(value.to_string()))
}
