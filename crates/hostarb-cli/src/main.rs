//! CLI entry point - the composition root.
//!
//! Wiring happens in `bootstrap`; this file only parses arguments,
//! installs logging and routes each command to its handler.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use hostarb_cli::{Cli, CliConfig, CliError, Commands, QueryCommand, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let format = cli.output_format();
    let config = CliConfig::with_overrides(cli.inventory, cli.settings)?;

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    // Paths must work even when settings or inventory are broken.
    let query = match command {
        Commands::Paths => return handlers::paths::execute(&config, format),
        Commands::Query(query) => query,
    };

    let ctx = bootstrap(config)?;

    match query {
        QueryCommand::AvailableMemory { overcommit } => {
            handlers::memory::available(&ctx, overcommit, format).await?;
        }
        QueryCommand::MemoryUsage => {
            handlers::memory::usage(&ctx, format).await?;
        }
        QueryCommand::PortWizard => {
            handlers::ports::execute(&ctx, format).await?;
        }
        QueryCommand::DisplayDevices { vm } => {
            handlers::display::devices(&ctx, vm, format).await?;
        }
        QueryCommand::DisplayUris {
            vm,
            host,
            passwords,
        } => {
            handlers::display::uris(&ctx, vm, host.as_deref(), &passwords, format).await?;
        }
        QueryCommand::AttachedIfaces { vm } => {
            handlers::nic::attached(&ctx, vm, format).await?;
        }
        QueryCommand::RandomMac => {
            handlers::nic::random_mac(&ctx, format)?;
        }
        QueryCommand::Resolutions => {
            handlers::display::resolutions(&ctx, format)?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
