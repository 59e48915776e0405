//! Running requests against the game

use super::request::Request;
use crate::core::{Calendar, EngineError, PuzzleDay, RankedEntry};
use crate::embedding::Embeddings;
use crate::game::{Game, GuessResult, SimilaritySummary};
use crate::secrets::SecretProvider;

/// Result of one request, ready for display
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Guess(GuessResult),
    Summary(SimilaritySummary),
    /// Yesterday's secret, `None` once it has left the window
    Yesterday(Option<String>),
    TopList {
        day: PuzzleDay,
        secret: String,
        words: Vec<RankedEntry>,
    },
    Secret(String),
    Window {
        anchor: PuzzleDay,
        days: Vec<PuzzleDay>,
        degraded: Vec<PuzzleDay>,
    },
    Today(PuzzleDay),
    Failed(EngineError),
}

impl Response {
    /// Whether a transport should answer with not-found
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Failed(err) if err.is_not_found())
    }
}

fn window_day(calendar: &Calendar, raw: i64) -> Result<PuzzleDay, EngineError> {
    calendar.checked_day(raw).ok_or(EngineError::UnknownDay(raw))
}

fn respond<T>(result: Result<T, EngineError>, ok: impl FnOnce(T) -> Response) -> Response {
    result.map_or_else(Response::Failed, ok)
}

/// Execute one request
pub fn execute<E: Embeddings, P: SecretProvider>(
    game: &Game<E, P>,
    calendar: &Calendar,
    request: &Request,
) -> Response {
    match request {
        Request::Guess { day, word } => respond(
            window_day(calendar, *day).and_then(|d| game.guess(d, word)),
            Response::Guess,
        ),
        Request::Similarity { day } => respond(
            window_day(calendar, *day).and_then(|d| game.similarity_summary(d)),
            Response::Summary,
        ),
        Request::Yesterday { today } => {
            Response::Yesterday(game.yesterdays_secret(calendar.day(*today)))
        }
        Request::Nearest { day } => respond(
            window_day(calendar, *day).and_then(|d| game.top_list(d).map(|list| (d, list))),
            |(day, (secret, words))| Response::TopList { day, secret, words },
        ),
        Request::GiveUp { day } => respond(
            window_day(calendar, *day).and_then(|d| game.reveal_secret(d)),
            Response::Secret,
        ),
        Request::Window => {
            let snapshot = game.window().snapshot();
            Response::Window {
                anchor: snapshot.anchor(),
                days: snapshot.days().to_vec(),
                degraded: snapshot
                    .entries()
                    .filter(|e| e.is_degraded())
                    .map(|e| e.day())
                    .collect(),
            }
        }
        Request::Today => Response::Today(calendar.today()),
    }
}
