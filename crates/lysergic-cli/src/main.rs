//! CLI entry point - the composition root.
//!
//! Infrastructure is wired together once via bootstrap; command dispatch
//! routes to handlers which delegate to `LysergicCore`.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use lysergic_cli::error::exit_code_for;
use lysergic_cli::{Cli, CliConfig, Commands, bootstrap, handlers};

/// Initialise logging: `RUST_LOG` wins, otherwise `--verbose` selects debug.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "lysergic=debug,lysergic_core=debug,lysergic_erowid=debug,lysergic_speech=debug,lysergic_db=debug,lysergic_cli=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::from_cli(&cli);

    // Dispatch to appropriate handler
    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    // Bootstrap the CLI context (composition root)
    let ctx = bootstrap(config).await?;

    match command {
        Commands::Feed { size, more } => {
            handlers::feed::execute(&ctx, size, more).await?;
        }
        Commands::Substances { category } => {
            handlers::substances::execute(&ctx, category.as_deref()).await?;
        }
        Commands::Experience { url } => {
            handlers::explore::experience(&ctx, &url).await?;
        }
        Commands::Category { url, start, max } => {
            handlers::explore::category(&ctx, &url, start, max).await?;
        }
        Commands::Categories { url } => {
            handlers::explore::categories(&ctx, &url).await?;
        }
        Commands::Info { url } => {
            handlers::explore::info(&ctx, &url).await?;
        }
        Commands::Story => {
            handlers::story::execute(&ctx).await?;
        }
        Commands::Bookmarks { command } => {
            handlers::bookmarks::execute(&ctx, command).await?;
        }
        Commands::Read { url, voice } => {
            handlers::read::execute(&ctx, &url, voice).await?;
        }
        Commands::Paths => {
            handlers::paths::execute(ctx.config())?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("Error: {e:#}");
            let code = u8::try_from(exit_code_for(&e)).unwrap_or(1);
            ExitCode::from(code)
        }
    }
}
