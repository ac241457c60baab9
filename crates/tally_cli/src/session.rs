//! Line-driven playground sessions
//!
//! Each session reads one event per line and prints the resulting state.

use std::io::{BufRead, Write};

use anyhow::Result;
use serde::Serialize;
use tally_core::{EditOutcome, NumberEngine, PatternInput, RejectReason, StepOrder};
use tally_widgets::PinCode;
use tracing::warn;

/// How states are printed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

fn outcome_label(outcome: EditOutcome) -> &'static str {
    match outcome {
        EditOutcome::Accepted => "accepted",
        EditOutcome::Clamped => "clamped",
        EditOutcome::Rejected(RejectReason::Malformed) => "rejected: malformed",
        EditOutcome::Rejected(RejectReason::Overflow) => "rejected: overflow",
    }
}

fn emit<W: Write, T: Serialize>(
    out: &mut W,
    format: OutputFormat,
    report: &T,
    text: impl FnOnce() -> String,
) -> Result<()> {
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(report)?)?,
        OutputFormat::Text => writeln!(out, "{}", text())?,
    }
    Ok(())
}

fn format_value(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

// =============================================================================
// Number
// =============================================================================

/// One line of a number session
#[derive(Clone, Debug, PartialEq)]
pub enum NumberCommand {
    Step(StepOrder, Option<f64>),
    Clear,
    Input(String),
}

impl NumberCommand {
    /// `:inc [n]`, `:dec [n]` and `:clear` are commands; anything else is text
    pub fn parse(line: &str) -> Result<Self> {
        let Some(command) = line.strip_prefix(':') else {
            return Ok(NumberCommand::Input(line.to_string()));
        };

        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let offset = parts
            .next()
            .map(|arg| {
                arg.parse::<f64>()
                    .map_err(|_| anyhow::anyhow!("Invalid offset '{}'", arg))
            })
            .transpose()?;

        match name {
            "inc" => Ok(NumberCommand::Step(StepOrder::Increase, offset)),
            "dec" => Ok(NumberCommand::Step(StepOrder::Decrease, offset)),
            "clear" => Ok(NumberCommand::Clear),
            other => anyhow::bail!("Unknown command ':{}'. Valid: :inc, :dec, :clear", other),
        }
    }
}

#[derive(Serialize)]
struct NumberReport<'a> {
    outcome: &'static str,
    value: Option<f64>,
    display: &'a str,
}

/// Drive a number engine from lines of `input`
pub fn run_number<R: BufRead, W: Write>(
    engine: &mut NumberEngine,
    step: f64,
    input: R,
    mut out: W,
    format: OutputFormat,
) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        let command = match NumberCommand::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                warn!("{}", err);
                continue;
            }
        };

        let outcome = match command {
            NumberCommand::Step(order, offset) => engine.step(order, offset.unwrap_or(step)),
            NumberCommand::Clear => engine.clear(),
            NumberCommand::Input(text) => engine.update_value(&text),
        };

        let report = NumberReport {
            outcome: outcome_label(outcome),
            value: engine.value(),
            display: engine.display(),
        };
        emit(&mut out, format, &report, || {
            format!(
                "value={} display={:?} ({})",
                format_value(report.value),
                report.display,
                report.outcome
            )
        })?;
    }
    Ok(())
}

// =============================================================================
// Pattern
// =============================================================================

#[derive(Serialize)]
struct PatternReport {
    changed: bool,
    value: String,
    complete: bool,
}

/// Drive a pattern from `<segment> <key>` lines
pub fn run_pattern<R: BufRead, W: Write>(
    pattern: &mut PatternInput,
    input: R,
    mut out: W,
    format: OutputFormat,
) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        let Some((index, key)) = line.split_once(' ') else {
            warn!("Expected '<segment> <key>', got '{}'", line);
            continue;
        };
        let Ok(index) = index.parse::<usize>() else {
            warn!("Invalid segment index '{}'", index);
            continue;
        };

        let report = PatternReport {
            changed: pattern.handle_key(key, index),
            value: pattern.value(),
            complete: pattern.is_complete(),
        };
        emit(&mut out, format, &report, || {
            format!(
                "{}{}",
                report.value,
                if report.complete { " (complete)" } else { "" }
            )
        })?;
    }
    Ok(())
}

// =============================================================================
// Pin code
// =============================================================================

#[derive(Serialize)]
struct PinReport {
    outcome: &'static str,
    cells: Vec<Option<u8>>,
    pin: Option<String>,
}

/// Drive a pin code from `<cell> [text]` lines; a bare index clears the cell
pub fn run_pin<R: BufRead, W: Write>(
    pin: &mut PinCode,
    input: R,
    mut out: W,
    format: OutputFormat,
) -> Result<()> {
    let cells = pin.cells();

    for line in input.lines() {
        let line = line?;
        let (index, text) = line.split_once(' ').unwrap_or((line.as_str(), ""));
        let Some(cell) = index.parse::<usize>().ok().and_then(|i| cells.get(i).copied()) else {
            warn!("Invalid cell index '{}'", index);
            continue;
        };

        let outcome = if text.is_empty() {
            pin.clear(cell)
        } else {
            pin.input(cell, text)
        };
        let Some(outcome) = outcome else {
            continue;
        };

        let report = PinReport {
            outcome: outcome_label(outcome),
            cells: pin.values(),
            pin: pin.pin(),
        };
        emit(&mut out, format, &report, || {
            let cells: String = report
                .cells
                .iter()
                .map(|digit| digit.map_or('_', |d| char::from(b'0' + d)))
                .collect();
            match &report.pin {
                Some(code) => format!("{} ({}) pin={}", cells, report.outcome, code),
                None => format!("{} ({})", cells, report.outcome),
            }
        })?;
    }
    Ok(())
}
