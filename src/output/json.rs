//! JSON bodies for responses
//!
//! Shapes match what the web client reads: `{"guess","sim","rank"}` for a
//! guess, `{"top","top10","rest"}` for similarity, and an `error` object for
//! not-found conditions.

use super::formatters::{rank_label, similarity_percent};
use crate::commands::Response;
use crate::core::{EngineError, Rank};
use serde_json::{Value, json};

/// Body returned by `yesterday` once the day has left the window
pub const UNKNOWN_YESTERDAY: &str = "unknown";

fn rank_value(rank: Rank, top_k: usize) -> Value {
    match rank {
        Rank::Ranked(position) => json!(position),
        Rank::BeyondTopK => json!(rank_label(rank, top_k)),
    }
}

fn error_value(err: &EngineError) -> Value {
    match err {
        EngineError::UnknownWord(_) => json!({ "error": "unknown" }),
        EngineError::UnknownDay(_) => json!({ "error": "unknown day" }),
        other => json!({ "error": other.to_string() }),
    }
}

/// Render a response as JSON
#[must_use]
pub fn response_to_json(response: &Response, top_k: usize) -> Value {
    match response {
        Response::Guess(result) => json!({
            "guess": result.guess,
            "sim": result.similarity,
            "rank": rank_value(result.rank, top_k),
        }),
        Response::Summary(summary) => json!(summary),
        Response::Yesterday(secret) => {
            json!(secret.as_deref().unwrap_or(UNKNOWN_YESTERDAY))
        }
        Response::TopList { day, secret, words } => json!({
            "day": day,
            "word": secret,
            "words": words
                .iter()
                .map(|e| json!({
                    "word": e.word,
                    "rank": e.rank,
                    "similarity": similarity_percent(e.similarity),
                }))
                .collect::<Vec<_>>(),
        }),
        Response::Secret(secret) => json!(secret),
        Response::Window {
            anchor,
            days,
            degraded,
        } => json!({
            "anchor": anchor,
            "days": days,
            "degraded": degraded,
        }),
        Response::Today(day) => json!({ "today": day }),
        Response::Failed(err) => error_value(err),
    }
}
