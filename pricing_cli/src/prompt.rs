//! Line-oriented prompts for the interactive session.
//!
//! Reader and writer are generic so a session can be driven from tests.

use std::io::{self, BufRead, Write};

use pricing_core::inputs::Section;
use pricing_core::{CalculatorInputs, PricingSettings, TargetMargin};
use tracing::warn;

use crate::render::value_with_unit;

/// Ask for a number. Blank input (or end of input) keeps the current value.
///
/// Unparseable input is reported and also keeps the current value.
pub fn prompt_f64<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> io::Result<Option<f64>> {
    write!(out, "{}", prompt)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match trimmed.parse::<f64>() {
        Ok(value) => Ok(Some(value)),
        Err(_) => {
            warn!(input = trimmed, "not a number, keeping current value");
            writeln!(out, "  '{}' is not a number, keeping current value", trimmed)?;
            Ok(None)
        }
    }
}

/// Prompt for every field, section by section, then for the margin.
pub fn run_session<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    mut inputs: CalculatorInputs,
    margin: TargetMargin,
    settings: &PricingSettings,
) -> io::Result<(CalculatorInputs, TargetMargin)> {
    writeln!(out, "Press Enter to keep the value in brackets.")?;

    for (step, section) in Section::ALL.iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "{}. {} - {}", step + 1, section.title(), section.description())?;

        for spec in section.fields() {
            let current = (spec.get)(&inputs);
            let prompt = format!("  {} [{}]: ", spec.label, value_with_unit(spec, current, settings));
            let Some(requested) = prompt_f64(input, out, &prompt)? else {
                continue;
            };
            // key comes from the catalogue, so lookup cannot fail
            if let Ok(stored) = inputs.set(spec.key, requested) {
                if stored != requested {
                    writeln!(
                        out,
                        "  clamped to {} (range {} .. {})",
                        value_with_unit(spec, stored, settings),
                        value_with_unit(spec, spec.min, settings),
                        value_with_unit(spec, spec.max, settings)
                    )?;
                }
            }
        }
    }

    writeln!(out)?;
    let prompt = format!(
        "Net margin target, % of revenue ({:.0}-{:.0}) [{:.0}]: ",
        settings.margin_min * 100.0,
        settings.margin_max * 100.0,
        margin.percent()
    );
    let margin = match prompt_f64(input, out, &prompt)? {
        Some(percent) => settings.margin(Some(percent / 100.0)),
        None => margin,
    };

    Ok((inputs, margin))
}
