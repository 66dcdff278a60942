//! # Sealcalc CLI Application
//!
//! Terminal front-end for `pricing_core`: builds the cost inputs from
//! defaults, an optional JSON file, `--set` overrides or interactive
//! prompts, then prints the recommended price and its breakdown.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use pricing_core::PricingError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod commands;
mod prompt;
mod render;

use cli::{Cli, Commands};

/// Initialize tracing to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn run(args: &Cli) -> Result<String> {
    let settings = commands::load_settings(args.config.as_deref())?;

    match args.get_command() {
        Commands::Quote(quote) => commands::quote(&quote, &settings),
        Commands::Defaults => commands::defaults(),
        Commands::Fields => Ok(commands::fields(&settings)),
        Commands::Interactive(input) => commands::interactive_stdio(&input, &settings),
    }
}

fn main() -> ExitCode {
    let args = Cli::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(pricing) = e.downcast_ref::<PricingError>() {
                if let Ok(json) = serde_json::to_string_pretty(pricing) {
                    eprintln!();
                    eprintln!("Error JSON:");
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}
