//! # Storage Layer
//!
//! Persistence for taskline in a plain, hand-editable text file.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Tasks | Pipe-delimited lines | `data/tasks.txt` (configurable) |
//! | Config | TOML | `~/.config/taskline/config.toml` |
//!
//! ## Task File
//!
//! ```text
//! T |   | buy milk
//! D | X | submit report | 2024-05-01 1800
//! E |   | team meeting | 2024-05-02 0900 | 2024-05-02 1000
//! ```
//!
//! The first blank line ends the list. Tasks are addressed by line position.
//!
//! ## Concurrency Safety
//!
//! - Reads take a shared lock and writes an exclusive lock (`fs2`)
//! - Rewrites are atomic (temp file + rename)
//! - A read-then-rewrite is not atomic: the last writer wins
//!
//! ## Key Types
//!
//! - [`TaskStore`] - Read, append and rewrite task lines
//! - [`Config`] - User configuration

mod config;
mod lines;

pub use config::{Config, ConfigError, OutputFormat, DEFAULT_DATA_FILE};
pub use lines::{LineEdit, StoreError, TaskStore};
