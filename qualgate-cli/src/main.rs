use clap::Parser;
use colored::Colorize;

use qualgate_cli::cli::{Cli, Commands, QualifyArgs};
use qualgate_cli::commands::{self, Engine};
use qualgate_cli::error::CliError;
use qualgate_cli::logging::init_tracing;
use qualgate_cli::output::OutputWriter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {e}", "error:".red().bold());
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let writer = OutputWriter::new(cli.output);
    let config_path = cli.config.as_deref();

    // `config` reports its own loading errors
    if let Commands::Config(args) = cli.command {
        return commands::config::execute(args, config_path, &writer).await;
    }

    let mut config = commands::load_config(config_path).await?;
    if let Some(level) = cli.log_level {
        config.general.log_level = level;
    }
    if let Commands::Qualify(QualifyArgs {
        domain: Some(ref domain),
        ..
    }) = cli.command
    {
        config.admission.domain = domain.clone();
    }
    config.validate()?;

    init_tracing(&config.general)?;
    qualgate_core::metrics::describe_all();
    tracing::info!(
        source = %commands::config_source(config_path),
        "qualgate starting"
    );

    let engine = Engine::from_config(&config)?;

    match cli.command {
        Commands::Check(args) => commands::check::execute(args, &engine, &writer),
        Commands::Qualify(args) => commands::qualify::execute(args, &engine, &writer),
        Commands::Admit(args) => commands::admit::execute(args, &engine, &writer).await,
        Commands::Config(_) => Ok(()),
    }
}
