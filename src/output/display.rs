//! Display functions for command results

use super::formatters::{rank_label, similarity_bar, similarity_percent};
use crate::commands::Response;
use crate::core::EngineError;
use crate::window::RotationReport;
use colored::Colorize;
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

/// Render a response for the terminal
#[must_use]
pub fn render_response(response: &Response, top_k: usize) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_response(&mut out, response, top_k);
    out
}

fn write_response(out: &mut String, response: &Response, top_k: usize) -> std::fmt::Result {
    match response {
        Response::Guess(result) if result.is_correct() => {
            writeln!(
                out,
                "{}",
                format!("✅ {} is the secret word!", result.guess)
                    .green()
                    .bold()
            )?;
        }
        Response::Guess(result) => {
            writeln!(
                out,
                "{:<12} {:>7}  {}  rank {}",
                result.guess.bright_yellow().bold(),
                similarity_percent(result.similarity),
                similarity_bar(result.similarity, BAR_WIDTH).cyan(),
                rank_label(result.rank, top_k)
            )?;
        }
        Response::Summary(summary) => {
            writeln!(out, "{}", "Similarity thresholds".bright_cyan().bold())?;
            writeln!(out, "  Top:     {}", similarity_percent(summary.top))?;
            writeln!(out, "  Top 10:  {}", similarity_percent(summary.top10))?;
            writeln!(out, "  Top {top_k}: {}", similarity_percent(summary.rest))?;
        }
        Response::Yesterday(Some(secret)) => {
            writeln!(out, "Yesterday's word: {}", secret.bright_yellow().bold())?;
        }
        Response::Yesterday(None) => {
            writeln!(out, "{}", "Yesterday's word is no longer available".yellow())?;
        }
        Response::TopList { day, secret, words } => {
            writeln!(out, "\n{}", "═".repeat(60).cyan())?;
            writeln!(
                out,
                " {} {} ",
                format!("DAY {day} NEAREST TO").bright_cyan().bold(),
                secret.bright_yellow().bold()
            )?;
            writeln!(out, "{}", "═".repeat(60).cyan())?;
            for entry in words {
                writeln!(
                    out,
                    "{:>5}. {:<16} {:>7}",
                    entry.rank,
                    entry.word,
                    similarity_percent(entry.similarity)
                )?;
            }
        }
        Response::Secret(secret) => {
            writeln!(out, "The word was {}", secret.bright_yellow().bold())?;
        }
        Response::Window {
            anchor,
            days,
            degraded,
        } => {
            let listed: Vec<String> = days
                .iter()
                .map(|d| {
                    if degraded.contains(d) {
                        format!("{d}!")
                    } else {
                        d.to_string()
                    }
                })
                .collect();
            writeln!(out, "Anchor: {}", anchor.to_string().bold())?;
            writeln!(out, "Window: [{}]", listed.join(", "))?;
            if !degraded.is_empty() {
                writeln!(out, "{}", "! marks days without a nearest table".yellow())?;
            }
        }
        Response::Today(day) => {
            writeln!(out, "Today is puzzle day {}", day.to_string().bold())?;
        }
        Response::Failed(err) => {
            writeln!(out, "{}", error_message(err).red())?;
        }
    }
    Ok(())
}

fn error_message(err: &EngineError) -> String {
    match err {
        EngineError::UnknownDay(_) => format!(
            "{err}; only the window around today can be played"
        ),
        other => other.to_string(),
    }
}

/// Print a response to stdout
pub fn print_response(response: &Response, top_k: usize) {
    print!("{}", render_response(response, top_k));
}

/// One-line summary of a rotation
#[must_use]
pub fn rotation_summary(report: &RotationReport) -> String {
    let evicted = report
        .evicted
        .map_or_else(|| "nothing".to_string(), |d| d.to_string());
    let status = if report.degraded {
        "degraded".red().to_string()
    } else {
        "ready".green().to_string()
    };
    format!(
        "anchor {} · inserted {} ({status}) · evicted {evicted}",
        report.anchor, report.inserted
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PuzzleDay, Rank};
    use crate::game::GuessResult;

    fn plain() {
        colored::control::set_override(false);
    }

    fn day(i: i64) -> PuzzleDay {
        PuzzleDay::wrapping(i, 10)
    }

    #[test]
    fn correct_guess_celebrates() {
        plain();
        let text = render_response(
            &Response::Guess(GuessResult {
                guess: "가을".to_string(),
                similarity: 1.0,
                rank: Rank::Ranked(0),
            }),
            1000,
        );
        assert!(text.contains("가을 is the secret word"));
    }

    #[test]
    fn far_guess_shows_label() {
        plain();
        let text = render_response(
            &Response::Guess(GuessResult {
                guess: "자동차".to_string(),
                similarity: 0.1234,
                rank: Rank::BeyondTopK,
            }),
            1000,
        );
        assert!(text.contains("12.34"));
        assert!(text.contains("rank ≥1000"));
    }

    #[test]
    fn window_marks_degraded_days() {
        plain();
        let text = render_response(
            &Response::Window {
                anchor: day(4),
                days: vec![day(2), day(3), day(4), day(5)],
                degraded: vec![day(5)],
            },
            1000,
        );
        assert!(text.contains("Window: [2, 3, 4, 5!]"));
    }

    #[test]
    fn unknown_day_explains_window() {
        plain();
        let text = render_response(&Response::Failed(EngineError::UnknownDay(9)), 1000);
        assert!(text.contains("puzzle day 9 is not in the current window"));
    }

    #[test]
    fn rotation_line() {
        plain();
        let report = RotationReport {
            anchor: day(5),
            inserted: day(6),
            evicted: Some(day(2)),
            degraded: false,
        };
        assert_eq!(
            rotation_summary(&report),
            "anchor 5 · inserted 6 (ready) · evicted 2"
        );
    }
}
