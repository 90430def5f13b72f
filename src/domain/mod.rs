//! Domain models for taskline
//!
//! Pure data and line encoding, without any I/O concerns.

mod list;
mod task;

pub use list::{TaskList, TaskListError};
pub use task::{
    ParseTaskError, Task, TaskKind, DONE_MARK, FIELD_SEPARATOR, MARK_OFFSET, OPEN_MARK,
};
