//! taskline - A personal task tracker backed by a plain text file
//!
//! Todos, deadlines and events are kept one per line in a pipe-delimited
//! file. The file is the single source of truth and tasks are addressed by
//! their position in it.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Task, TaskKind, TaskList};
pub use storage::{StoreError, TaskStore};
