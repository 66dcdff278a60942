use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use pricing_core::{calculate, CalculatorInputs, CostBreakdown, PricingSettings, TargetMargin};
use tracing::{debug, info, warn};

use crate::cli::{InputArgs, QuoteArgs};
use crate::prompt;
use crate::render;

/// Load settings from `path`, or fall back to the defaults.
pub fn load_settings(path: Option<&Path>) -> Result<PricingSettings> {
    match path {
        Some(path) => Ok(PricingSettings::load(path)?),
        None => Ok(PricingSettings::default()),
    }
}

/// Build the input record and margin from files, overrides and settings.
///
/// Every value is clamped into its field range; clamping is logged, not
/// treated as an error.
pub fn prepare(args: &InputArgs, settings: &PricingSettings) -> Result<(CalculatorInputs, TargetMargin)> {
    let mut inputs = match &args.inputs {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read inputs from {}", path.display()))?;
            let parsed = CalculatorInputs::from_json_str(&text)
                .with_context(|| format!("failed to parse inputs in {}", path.display()))?;
            debug!(path = %path.display(), "loaded inputs");
            parsed
        }
        None => CalculatorInputs::default(),
    };

    let clamped = inputs.clamped();
    if clamped != inputs {
        warn!("some input values were outside their allowed range and have been clamped");
        inputs = clamped;
    }

    for (key, value) in &args.overrides {
        let stored = inputs.set(key, *value)?;
        if stored != *value {
            warn!(field = %key, requested = value, stored, "override clamped to field range");
        }
    }

    if let Some((labor, volume)) = inputs.job_area_mismatch() {
        warn!(labor, volume, "labor and volume job sizes differ; each is used as given");
    }

    let margin = settings.margin(args.requested_margin());
    if let Some(requested) = args.requested_margin() {
        if (requested - margin.fraction()).abs() > 1e-9 {
            warn!(requested, used = margin.fraction(), "margin clamped to allowed range");
        }
    }

    Ok((inputs, margin))
}

fn compute(inputs: &CalculatorInputs, margin: TargetMargin) -> Result<CostBreakdown> {
    let breakdown = calculate(inputs, margin.fraction())?;
    info!(
        price_per_sq_ft = breakdown.recommended_price_per_sq_ft,
        cost_per_sq_ft = breakdown.total_cost_per_sq_ft,
        margin_percent = breakdown.margin_percent,
        "computed price"
    );
    Ok(breakdown)
}

pub fn quote(args: &QuoteArgs, settings: &PricingSettings) -> Result<String> {
    let (inputs, margin) = prepare(&args.input, settings)?;
    let breakdown = compute(&inputs, margin)?;
    if args.json {
        Ok(serde_json::to_string_pretty(&breakdown)?)
    } else {
        Ok(render::render_breakdown(&breakdown, &inputs, settings))
    }
}

pub fn defaults() -> Result<String> {
    Ok(serde_json::to_string_pretty(&CalculatorInputs::default())?)
}

pub fn fields(settings: &PricingSettings) -> String {
    render::render_fields(settings)
}

pub fn interactive<R: BufRead, W: Write>(
    args: &InputArgs,
    settings: &PricingSettings,
    input: &mut R,
    out: &mut W,
) -> Result<String> {
    let (inputs, margin) = prepare(args, settings)?;
    let (inputs, margin) = prompt::run_session(input, out, inputs, margin, settings)?;
    let breakdown = compute(&inputs, margin)?;
    writeln!(out)?;
    Ok(render::render_breakdown(&breakdown, &inputs, settings))
}

/// Run `interactive` against the real terminal.
pub fn interactive_stdio(args: &InputArgs, settings: &PricingSettings) -> Result<String> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    interactive(args, settings, &mut input, &mut out)
}
