//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// qualgate -- qualify unqualified container images with a registry domain.
///
/// Use `qualgate <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "qualgate", version, about, long_about = None)]
pub struct Cli {
    /// Path to the qualgate.toml configuration file (defaults + env overrides when omitted).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse image references and report their domain split.
    Check(CheckArgs),

    /// Print the qualified form of image references.
    Qualify(QualifyArgs),

    /// Run a Pod manifest through the admission chain.
    Admit(AdmitArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- check ----

/// Parse image references without modifying them.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Image references to inspect.
    #[arg(required = true)]
    pub images: Vec<String>,
}

// ---- qualify ----

/// Qualify image references with the configured domain.
#[derive(Args, Debug)]
pub struct QualifyArgs {
    /// Image references to qualify.
    #[arg(required = true)]
    pub images: Vec<String>,

    /// Override the registry domain from the configuration.
    #[arg(long)]
    pub domain: Option<String>,
}

// ---- admit ----

/// Run a Pod JSON manifest through the admission chain.
#[derive(Args, Debug)]
pub struct AdmitArgs {
    /// Manifest file, or `-` to read from stdin.
    pub file: PathBuf,

    /// Admission operation (create, update, delete, connect).
    #[arg(long, default_value = "create")]
    pub operation: String,

    /// Subresource of the request (e.g. status).
    #[arg(long, default_value = "")]
    pub subresource: String,

    /// Target resource as `resource[.group]`.
    #[arg(long, default_value = "pods")]
    pub resource: String,
}

// ---- config ----

/// Manage qualgate configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, admission).
        #[arg(long)]
        section: Option<String>,
    },
}
