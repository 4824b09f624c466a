use std::process::ExitCode;

use clap::Parser;
use formatdoc::cli::{AppContext, Cli, Commands};
use formatdoc::core::BootstrapError;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(!cli.no_color),
        )
        .init();

    // Build a context once, pass everywhere
    let ctx = AppContext {
        quiet: cli.quiet,
        no_color: cli.no_color,
        dry_run: cli.dry_run,
        verbose: cli.verbose,
    };

    let result = match cli.command {
        Commands::Bootstrap(args) => formatdoc::bootstrap_run(args, &ctx).map(|_| ()),
        Commands::Init(args) => formatdoc::infra::config::init(args, &ctx),
        Commands::Completions(args) => formatdoc::completion::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.downcast_ref::<BootstrapError>().is_some() => {
            eprintln!("{err}");
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
