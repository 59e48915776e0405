//! Semantle Window - CLI
//!
//! Loads word vectors and the secret catalog, fills the puzzle window around
//! today and answers game queries, either once or from an interactive console.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use semantle_window::{
    commands::{ConsoleOptions, Request, execute, serve},
    config::{
        Config, DEFAULT_CATALOG_SIZE, DEFAULT_ROTATION_HOUR, DEFAULT_ROTATION_MINUTE, DEFAULT_TOP_K,
        DEFAULT_UTC_OFFSET_HOURS,
    },
    embedding::{
        VectorModel,
        loader::{load_vectors, load_word_list},
    },
    game::Game,
    output::{print_response, response_to_json},
    secrets::SecretCatalog,
    window::{PuzzleWindow, WindowOffsets},
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "semantle_window",
    about = "Daily semantic word-guessing game served from a precomputed window",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Word vectors in word2vec text format
    #[arg(long, global = true, default_value = "data/vectors.txt")]
    vectors: PathBuf,

    /// Secret catalog, one word per line, optional `# today_word:` line
    #[arg(long, global = true, default_value = "data/secrets.txt")]
    secrets: PathBuf,

    /// Restrict nearest-neighbor candidates to the words in this file
    #[arg(long, global = true)]
    candidates: Option<PathBuf>,

    /// Serve this word as today's secret, ahead of the file's override line
    #[arg(long, global = true)]
    today_word: Option<String>,

    /// Number of puzzle days before the schedule wraps
    #[arg(long, global = true, default_value_t = DEFAULT_CATALOG_SIZE)]
    catalog_size: u32,

    /// Date of puzzle day 0 (YYYY-MM-DD)
    #[arg(long, global = true, default_value = "2022-04-01")]
    epoch: String,

    /// Hours east of UTC used for the puzzle calendar
    #[arg(long, global = true, default_value_t = DEFAULT_UTC_OFFSET_HOURS, allow_hyphen_values = true)]
    utc_offset_hours: i32,

    /// Local hour of the daily rotation
    #[arg(long, global = true, default_value_t = DEFAULT_ROTATION_HOUR)]
    rotation_hour: u32,

    /// Local minute of the daily rotation
    #[arg(long, global = true, default_value_t = DEFAULT_ROTATION_MINUTE)]
    rotation_minute: u32,

    /// Day offsets kept in the window, relative to today (e.g. -2,-1,0,1)
    #[arg(long, global = true, value_delimiter = ',', allow_hyphen_values = true)]
    window: Option<Vec<i64>>,

    /// Nearest words precomputed per day
    #[arg(short = 'k', long, global = true, default_value_t = DEFAULT_TOP_K)]
    top_k: usize,

    /// Attempts per nearest-table computation
    #[arg(long, global = true, default_value_t = 3)]
    retry_attempts: u32,

    /// Backoff before the first retry, doubled each time
    #[arg(long, global = true, default_value_t = 500)]
    retry_backoff_ms: u64,

    /// Print JSON instead of colored text
    #[arg(long, global = true)]
    json: bool,

    /// Log filter when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Hide the progress bar while loading vectors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive console with daily rotation (default)
    Serve,

    /// Score a guess for a puzzle day
    Guess {
        /// Puzzle day number
        #[arg(allow_hyphen_values = true)]
        day: i64,
        /// Guessed word
        word: String,
    },

    /// Similarity thresholds for a puzzle day
    Similarity {
        #[arg(allow_hyphen_values = true)]
        day: i64,
    },

    /// Secret of the day before `today`
    Yesterday {
        #[arg(allow_hyphen_values = true)]
        today: i64,
    },

    /// Nearest words to a day's secret
    Nearest {
        #[arg(allow_hyphen_values = true)]
        day: i64,
    },

    /// Reveal a day's secret
    Giveup {
        #[arg(allow_hyphen_values = true)]
        day: i64,
    },

    /// Show the days currently in the window
    Window,

    /// Show today's puzzle day
    Today,
}

impl Commands {
    fn request(self) -> Option<Request> {
        Some(match self {
            Self::Serve => return None,
            Self::Guess { day, word } => Request::Guess { day, word },
            Self::Similarity { day } => Request::Similarity { day },
            Self::Yesterday { today } => Request::Yesterday { today },
            Self::Nearest { day } => Request::Nearest { day },
            Self::Giveup { day } => Request::GiveUp { day },
            Self::Window => Request::Window,
            Self::Today => Request::Today,
        })
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_config(cli: &Cli, catalog_len: usize) -> Result<Config> {
    let catalog_size = cli.catalog_size;
    let window = match &cli.window {
        Some(offsets) => WindowOffsets::from_offsets(offsets)?,
        None => WindowOffsets::default(),
    };

    let config = Config {
        catalog_size,
        epoch: Config::parse_epoch(&cli.epoch)?,
        utc_offset: Config::offset_from_hours(cli.utc_offset_hours)?,
        rotation_time: Config::rotation_at(cli.rotation_hour, cli.rotation_minute)?,
        top_k: cli.top_k,
        window,
        retry: Config::retry_policy(cli.retry_attempts, cli.retry_backoff_ms),
    };
    config.validate()?;

    if catalog_len < catalog_size as usize {
        tracing::warn!(
            catalog_len,
            catalog_size,
            "catalog has fewer words than puzzle days; missing days use the sentinel secret"
        );
    }
    Ok(config)
}

fn load_model(cli: &Cli) -> Result<VectorModel> {
    let mut model = load_vectors(&cli.vectors, !cli.quiet)
        .with_context(|| format!("loading vectors from {}", cli.vectors.display()))?;

    if let Some(path) = &cli.candidates {
        let words = load_word_list(path)
            .with_context(|| format!("loading candidates from {}", path.display()))?;
        let kept = model.restrict_candidates(&words);
        if kept == 0 {
            bail!("none of the candidate words in {} are in the model", path.display());
        }
    }

    tracing::info!(
        words = model.len(),
        dimensions = model.dimensions(),
        candidates = model.candidate_count(),
        "word vectors loaded"
    );
    Ok(model)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let secrets = SecretCatalog::load(&cli.secrets)
        .with_context(|| format!("loading secrets from {}", cli.secrets.display()))?
        .with_today_word(cli.today_word.clone())
        .resolve_override();
    let config = build_config(&cli, secrets.len())?;
    let model = load_model(&cli)?;

    let calendar = config.calendar();
    let window = PuzzleWindow::initialize(
        Arc::new(model),
        Arc::new(secrets),
        config.window_settings(),
        calendar.today(),
    );
    let game = Game::new(Arc::new(window));

    let command = cli.command.unwrap_or(Commands::Serve);
    match command.request() {
        None => {
            let options = ConsoleOptions {
                json: cli.json,
                top_k: config.top_k,
            };
            serve(&game, &calendar, config.schedule(), options)?;
        }
        Some(request) => {
            let response = execute(&game, &calendar, &request);
            if cli.json {
                println!("{}", response_to_json(&response, config.top_k));
            } else {
                print_response(&response, config.top_k);
            }
            if response.is_not_found() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
