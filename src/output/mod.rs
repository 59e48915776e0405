//! Terminal output formatting
//!
//! Colored text for the console and JSON bodies for machine consumers.

pub mod display;
pub mod formatters;
pub mod json;

pub use display::{print_response, render_response, rotation_summary};
pub use json::response_to_json;
