//! linux-buddy command-line entry point.
//!
//! Binary name: `buddy`
//!
//! Parses CLI arguments, sets up diagnostics on stderr, resolves settings,
//! then dispatches to the verb handler.

mod cli;
mod state;

use std::process::ExitCode;

use clap::Parser;
use clap_complete::generate;
use console::style;

use buddy_observe::tracing_setup::{init_tracing, LogFormat};
use buddy_types::prompt::ResponseKind;

use cli::{Cli, Commands};
use state::{AppState, Overrides};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    if let Err(err) = init_tracing(cli.debug, format) {
        eprintln!("  {} Logging disabled: {err}", style("!").yellow().bold());
    }

    let show_chain = cli.debug || cli.command.is_verbose();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if show_chain {
                eprintln!("{err:?}");
            } else {
                eprintln!(
                    "  {} An error occurred: {err:#}",
                    style("!").red().bold()
                );
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need settings
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "buddy", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(Overrides {
        model: cli.model,
        endpoint: cli.endpoint,
        api_key: cli.api_key,
    })
    .await?;

    match cli.command {
        Commands::Bash(args) => {
            let context = cli::context::read_piped_context().await?;
            cli::ask::ask(
                &state,
                ResponseKind::Bash,
                &args.question(),
                context.as_deref(),
                args.verbose,
            )
            .await?;
        }

        Commands::General(args) => {
            let context = cli::context::read_piped_context().await?;
            cli::ask::ask(
                &state,
                ResponseKind::Text,
                &args.question(),
                context.as_deref(),
                args.verbose,
            )
            .await?;
        }

        Commands::Model { name } => {
            cli::settings::set_model(&state.store, &name, cli.json).await?;
        }

        Commands::Endpoint { url } => {
            cli::settings::set_endpoint(&state.store, &url, cli.json).await?;
        }

        Commands::Config => {
            cli::settings::show_config(&state, cli.json)?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
