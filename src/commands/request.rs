//! Parsing console lines into requests

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One query against the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Score `word` for `day`
    Guess { day: i64, word: String },
    /// Similarity thresholds for `day`
    Similarity { day: i64 },
    /// Secret of the day before `today`
    Yesterday { today: i64 },
    /// Top list for `day`
    Nearest { day: i64 },
    /// Reveal the secret for `day`
    GiveUp { day: i64 },
    /// Current window contents
    Window,
    /// Today's puzzle day
    Today,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("empty command")]
    Empty,

    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("`{command}` needs a {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("`{0}` is not a day number")]
    InvalidDay(String),

    #[error("too many arguments for `{0}`")]
    TooManyArguments(&'static str),
}

fn parse_day(command: &'static str, arg: Option<&str>) -> Result<i64, RequestError> {
    let raw = arg.ok_or(RequestError::MissingArgument {
        command,
        argument: "day",
    })?;
    raw.parse()
        .map_err(|_| RequestError::InvalidDay(raw.to_string()))
}

impl FromStr for Request {
    type Err = RequestError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let command = parts.next().ok_or(RequestError::Empty)?;

        let (name, request) = match command.to_lowercase().as_str() {
            "guess" | "g" => {
                let day = parse_day("guess", parts.next())?;
                let word = parts.next().ok_or(RequestError::MissingArgument {
                    command: "guess",
                    argument: "word",
                })?;
                (
                    "guess",
                    Self::Guess {
                        day,
                        word: word.to_string(),
                    },
                )
            }
            "similarity" | "sim" => (
                "similarity",
                Self::Similarity {
                    day: parse_day("similarity", parts.next())?,
                },
            ),
            "yesterday" => (
                "yesterday",
                Self::Yesterday {
                    today: parse_day("yesterday", parts.next())?,
                },
            ),
            "nearest" | "top" => (
                "nearest",
                Self::Nearest {
                    day: parse_day("nearest", parts.next())?,
                },
            ),
            "giveup" | "reveal" => (
                "giveup",
                Self::GiveUp {
                    day: parse_day("giveup", parts.next())?,
                },
            ),
            "window" => ("window", Self::Window),
            "today" => ("today", Self::Today),
            _ => return Err(RequestError::UnknownCommand(command.to_string())),
        };

        if parts.next().is_some() {
            return Err(RequestError::TooManyArguments(name));
        }
        Ok(request)
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guess { day, word } => write!(f, "guess {day} {word}"),
            Self::Similarity { day } => write!(f, "similarity {day}"),
            Self::Yesterday { today } => write!(f, "yesterday {today}"),
            Self::Nearest { day } => write!(f, "nearest {day}"),
            Self::GiveUp { day } => write!(f, "giveup {day}"),
            Self::Window => write!(f, "window"),
            Self::Today => write!(f, "today"),
        }
    }
}
