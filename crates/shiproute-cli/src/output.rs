//! Output formatting for estimates and listings.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use shiproute_lib::output::render_estimate;
use shiproute_lib::RouteEstimate;

use crate::terminal::{supports_unicode, ColorPalette};

/// Format of everything written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    pub fn is_text(self) -> bool {
        matches!(self, OutputFormat::Text)
    }

    /// Print a route estimate.
    pub fn render_estimate(self, estimate: &RouteEstimate) -> Result<()> {
        match self {
            OutputFormat::Json => print_json(estimate),
            OutputFormat::Text => {
                let palette = ColorPalette::detect();
                let mut stdout = io::stdout().lock();
                write!(stdout, "{}", render_estimate(estimate))?;
                writeln!(stdout, "{}", risk_summary(estimate, &palette))?;
                Ok(())
            }
        }
    }
}

/// One-line verdict on the risks of the best route.
fn risk_summary(estimate: &RouteEstimate, palette: &ColorPalette) -> String {
    let issues = estimate.best().issues.len();
    if issues == 0 {
        format!("{}No issues on the best route.{}", palette.green, palette.reset)
    } else {
        let noun = if issues == 1 { "issue" } else { "issues" };
        format!(
            "{}{issues} {noun} on the best route; see precautions above.{}",
            palette.orange, palette.reset
        )
    }
}

/// Serialize `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}

/// Print the CLI banner.
///
/// Uses box-drawing characters when the terminal advertises Unicode and
/// respects `NO_COLOR` and `TERM=dumb`.
pub fn print_logo() {
    let palette = ColorPalette::detect();
    let (cyan, bold, reset) = (palette.cyan, palette.white_bold, palette.reset);

    if supports_unicode() {
        println!(
            "{cyan}╭──────────────────────────────────────╮{reset}
{cyan}│{bold}   SHIPROUTE  ·  cost & risk planner  {cyan}│{reset}
{cyan}╰──────────────────────────────────────╯{reset}"
        );
    } else {
        println!(
            "{cyan}+--------------------------------------+
|   SHIPROUTE  -  cost & risk planner  |
+--------------------------------------+{reset}"
        );
    }
}
