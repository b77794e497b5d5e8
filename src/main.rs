use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use input_calculator::{CalculatorField, Config, KeyOutcome, Keyboard};
use serde::Serialize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "input-calculator", version)]
#[command(about = "Feed key presses through the calculator keyboard and print the field state")]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print one JSON object per key
    #[arg(long)]
    json: bool,

    /// Only print the final text
    #[arg(short, long)]
    quiet: bool,

    /// Key labels such as `1 2 + 3 =`; read from stdin when omitted
    keys: Vec<String>,
}

/// Field state after one key, as printed with `--json`.
#[derive(Serialize)]
struct Step<'a> {
    key: &'a str,
    text: &'a str,
    cursor: usize,
    #[serde(flatten)]
    outcome: &'a KeyOutcome,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    let keyboard = Keyboard::from_config(&config);
    let mut field = CalculatorField::new("cli");

    let mut out = io::stdout().lock();

    if cli.keys.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("Failed to read stdin")?;
            for glyph in line.split_whitespace() {
                press(&cli, &keyboard, &mut field, glyph, &mut out)?;
            }
        }
    } else {
        for glyph in &cli.keys {
            press(&cli, &keyboard, &mut field, glyph, &mut out)?;
        }
    }

    if cli.quiet {
        writeln!(out, "{}", field.text())?;
    }

    Ok(())
}

fn press(
    cli: &Cli,
    keyboard: &Keyboard,
    field: &mut CalculatorField,
    glyph: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let outcome = match keyboard.press_glyph(field, glyph) {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(%err, glyph, "Skipping key");
            return Ok(());
        }
    };

    if cli.quiet {
        return Ok(());
    }

    if cli.json {
        let step = Step {
            key: glyph,
            text: field.text(),
            cursor: field.cursor(),
            outcome: &outcome,
        };
        serde_json::to_writer(&mut *out, &step)?;
        writeln!(out)?;
        return Ok(());
    }

    match &outcome {
        KeyOutcome::EvaluationFailed { error } => writeln!(
            out,
            "{:>5}  {:?}  cursor={}  ({})",
            glyph,
            field.text(),
            field.cursor(),
            error
        )?,
        _ => writeln!(
            out,
            "{:>5}  {:?}  cursor={}",
            glyph,
            field.text(),
            field.cursor()
        )?,
    }

    Ok(())
}
