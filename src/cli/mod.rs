//! # Command-Line Interface
//!
//! User-facing commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `list` | Show all tasks, numbered from 1 |
//! | `todo`, `deadline`, `event` | Add a task |
//! | `mark`, `unmark` | Set or clear a task's done marker |
//! | `delete` | Remove a task; later numbers shift down |
//! | `find` | Search descriptions |
//!
//! ## Output Formats
//!
//! All commands support `--format text|json`.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod task;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
