//! Interactive console over a live puzzle window
//!
//! `serve` starts the daily rotation scheduler and then answers requests read
//! line by line until `quit` or end of input.

use super::execute::execute;
use super::request::Request;
use crate::core::Calendar;
use crate::embedding::Embeddings;
use crate::game::Game;
use crate::output::display::{render_response, rotation_summary};
use crate::output::json::response_to_json;
use crate::secrets::SecretProvider;
use crate::window::{RotationSchedule, RotationScheduler};
use chrono::Utc;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

/// How console answers are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleOptions {
    /// Emit one JSON document per line instead of colored text
    pub json: bool,
    /// Table size, for rank labels
    pub top_k: usize,
}

const HELP: &str = "\
Commands:
  guess <day> <word>   score a guess
  similarity <day>     similarity thresholds
  yesterday <today>    previous day's word
  nearest <day>        nearest words to the secret
  giveup <day>         reveal the secret
  window               days currently playable
  today                today's puzzle day
  rotate               move the window to today's day now
  help                 show this list
  quit                 exit
";

fn print_banner(output: &mut impl Write) -> io::Result<()> {
    writeln!(output, "\n╔══════════════════════════════════════════════════════════════╗")?;
    writeln!(output, "║                 Semantle Window - Console                    ║")?;
    writeln!(output, "╚══════════════════════════════════════════════════════════════╝\n")?;
    writeln!(output, "{HELP}")
}

/// Answer requests from `input` until `quit` or end of input
///
/// # Errors
///
/// Returns an I/O error if reading input or writing output fails.
pub fn run_console<E, P, R, W>(
    game: &Game<E, P>,
    calendar: &Calendar,
    options: ConsoleOptions,
    input: R,
    mut output: W,
) -> io::Result<()>
where
    E: Embeddings,
    P: SecretProvider,
    R: BufRead,
    W: Write,
{
    if !options.json {
        print_banner(&mut output)?;
    }

    let mut lines = input.lines();
    loop {
        if !options.json {
            write!(output, "> ")?;
            output.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let line = line.trim();

        match line.to_lowercase().as_str() {
            "" => continue,
            "quit" | "exit" | "q" => break,
            "help" | "?" => {
                write!(output, "{HELP}")?;
                continue;
            }
            "rotate" => {
                let reports = game.window().catch_up(calendar, Utc::now());
                if options.json {
                    let body: Vec<_> = reports
                        .iter()
                        .map(|report| {
                            serde_json::json!({
                                "anchor": report.anchor,
                                "inserted": report.inserted,
                                "evicted": report.evicted,
                                "degraded": report.degraded,
                            })
                        })
                        .collect();
                    writeln!(output, "{}", serde_json::json!(body))?;
                } else if reports.is_empty() {
                    writeln!(output, "Window already anchored on today")?;
                } else {
                    for report in &reports {
                        writeln!(output, "Rotated: {}", rotation_summary(report))?;
                    }
                }
                continue;
            }
            _ => {}
        }

        match line.parse::<Request>() {
            Ok(request) => {
                tracing::debug!(%request, "console request");
                let response = execute(game, calendar, &request);
                if options.json {
                    writeln!(output, "{}", response_to_json(&response, options.top_k))?;
                } else {
                    write!(output, "{}", render_response(&response, options.top_k))?;
                }
            }
            Err(err) => {
                if options.json {
                    writeln!(output, "{}", serde_json::json!({ "error": err.to_string() }))?;
                } else {
                    writeln!(output, "❌ {err} (type 'help' for commands)")?;
                }
            }
        }
    }

    if !options.json {
        writeln!(output, "\n👋 Bye!\n")?;
    }
    Ok(())
}

/// Start the rotation scheduler and run the console on stdin/stdout
///
/// # Errors
///
/// Returns an I/O error if the scheduler thread cannot be spawned or the
/// console fails.
pub fn serve<E, P>(
    game: &Game<E, P>,
    calendar: &Calendar,
    schedule: RotationSchedule,
    options: ConsoleOptions,
) -> io::Result<()>
where
    E: Embeddings + 'static,
    P: SecretProvider + 'static,
{
    let window = Arc::clone(game.window());
    let calendar_at_fire = *calendar;
    let scheduler = RotationScheduler::start(schedule, move || {
        for report in window.catch_up(&calendar_at_fire, Utc::now()) {
            tracing::info!(
                anchor = %report.anchor,
                inserted = %report.inserted,
                degraded = report.degraded,
                "scheduled rotation finished"
            );
        }
    })?;

    let result = run_console(game, calendar, options, io::stdin().lock(), io::stdout());
    scheduler.shutdown();
    result
}
