//! CLI entry point.
//!
//! Configuration is layered here, infrastructure is wired by
//! [`bootstrap`], and command dispatch routes to the handlers.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use pyloc_cli::{Cli, CliConfig, CliError, Commands, DiscoveryArgs, bootstrap, handlers};

/// Initialize the tracing subscriber for logging.
///
/// `--verbose` forces debug output; otherwise `RUST_LOG` applies, defaulting
/// to warnings only. Logs go to stderr so JSON output stays clean.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::List(args) => {
            let mut config = CliConfig::from_cli(&cli, &args.discovery)?;
            if args.refresh {
                config.settings.serve_persisted_while_refreshing = Some(false);
            }
            let ctx = bootstrap(config)?;
            handlers::list::execute(&ctx, &args).await
        }
        Commands::Paths(args) => {
            let ctx = bootstrap(CliConfig::from_cli(&cli, &args)?)?;
            handlers::paths::execute(&ctx);
            Ok(())
        }
        Commands::Cache { command } => {
            let ctx = bootstrap(CliConfig::from_cli(&cli, &DiscoveryArgs::default())?)?;
            handlers::cache::execute(&ctx, command).await
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables before parsing so `PYLOC_*` values apply
    dotenvy::dotenv().ok();

    let mut cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command.take() else {
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match run(cli, command).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e}");
            Ok(ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1)))
        }
    }
}
