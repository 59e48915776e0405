//! Command implementations

pub mod console;
pub mod execute;
pub mod request;

pub use console::{ConsoleOptions, run_console, serve};
pub use execute::{Response, execute};
pub use request::{Request, RequestError};
