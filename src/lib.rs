//! Semantle Window
//!
//! Core of a daily semantic word-guessing game: a sliding window of
//! precomputed nearest-neighbor tables around today's puzzle, rotated once a
//! day, with guess scoring and similarity summaries answered from it.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use semantle_window::config::Config;
//! use semantle_window::embedding::loader::load_vectors;
//! use semantle_window::game::Game;
//! use semantle_window::secrets::SecretCatalog;
//! use semantle_window::window::PuzzleWindow;
//! use std::sync::Arc;
//!
//! let config = Config::default();
//! let secrets = SecretCatalog::load("data/secrets.txt").unwrap().resolve_override();
//! let model = load_vectors("data/vectors.txt", false).unwrap();
//!
//! let calendar = config.calendar();
//! let window = PuzzleWindow::initialize(
//!     Arc::new(model),
//!     Arc::new(secrets),
//!     config.window_settings(),
//!     calendar.today(),
//! );
//! let game = Game::new(Arc::new(window));
//! let result = game.guess(calendar.today(), "가을").unwrap();
//! println!("{} {:.2} {}", result.guess, result.similarity * 100.0, result.rank);
//! ```

// Core domain types
pub mod core;

// Word vectors and the similarity backend
pub mod embedding;

// Secret word catalog
pub mod secrets;

// Precomputed window and its daily rotation
pub mod window;

// Guess scoring and similarity summaries
pub mod game;

// Runtime configuration
pub mod config;

// Command implementations
pub mod commands;

// Terminal and JSON output formatting
pub mod output;

#[cfg(test)]
pub(crate) mod test_support;
