use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "sealcalc", version, about = "Sealcoating price calculator")]
pub struct Cli {
    /// Settings file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compute the recommended price (default)
    Quote(QuoteArgs),

    /// Print the industry-default inputs as JSON
    Defaults,

    /// List every input field with its range and help text
    Fields,

    /// Walk through every field interactively, then quote
    Interactive(InputArgs),
}

/// Where the starting inputs and margin come from.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// JSON file with calculator inputs; missing fields use the defaults.
    /// A volume job size given without a labor one sets both.
    #[arg(short, long)]
    pub inputs: Option<PathBuf>,

    /// Override a field, e.g. `--set labor.crew_size=4` (repeatable)
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE", value_parser = parse_override)]
    pub overrides: Vec<(String, f64)>,

    /// Target net margin as a fraction (0.40 = 40%)
    #[arg(short, long, conflicts_with = "margin_percent")]
    pub margin: Option<f64>,

    /// Target net margin in percent
    #[arg(long)]
    pub margin_percent: Option<f64>,
}

impl InputArgs {
    /// Requested margin as a fraction, if any
    pub fn requested_margin(&self) -> Option<f64> {
        self.margin.or(self.margin_percent.map(|p| p / 100.0))
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct QuoteArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print the breakdown as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Get the command, defaulting to `quote` with default inputs
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Quote(QuoteArgs::default()))
    }
}

/// Parse `key=value` into a field key and number.
pub fn parse_override(raw: &str) -> Result<(String, f64), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field key in '{}'", raw));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value.trim()))?;
    Ok((key.to_string(), value))
}
