//! Task domain model
//!
//! A task is a todo, a deadline or an event. Each kind knows how to write
//! itself as a persisted line and how to read itself back.
//!
//! Line format: `<kind> | <mark> | <description>[ | <extra fields>]`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Separator between fields of a persisted line
pub const FIELD_SEPARATOR: &str = " | ";

/// Byte offset of the done marker within a persisted line
pub const MARK_OFFSET: usize = 4;

/// Marker written for a completed task
pub const DONE_MARK: char = 'X';

/// Marker written for an open task
pub const OPEN_MARK: char = ' ';

/// Characters a text field may not contain
const UNSTORABLE_CHARS: [char; 3] = ['|', '\n', '\r'];

#[derive(Debug, Error, PartialEq)]
pub enum ParseTaskError {
    #[error("Unknown task kind '{kind}' in line: {line}")]
    UnknownKind { kind: String, line: String },

    #[error("Invalid done marker '{mark}' in line: {line}")]
    InvalidMark { mark: String, line: String },

    #[error("Expected {expected} fields for {kind}, found {found} in line: {line}")]
    FieldCount {
        kind: &'static str,
        expected: usize,
        found: usize,
        line: String,
    },
}

/// The kind of a task, with the fields specific to that kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskKind {
    Todo,
    Deadline { by: String },
    Event { start: String, end: String },
}

impl TaskKind {
    /// Single-letter tag used in the persisted line
    pub fn tag(&self) -> char {
        match self {
            TaskKind::Todo => 'T',
            TaskKind::Deadline { .. } => 'D',
            TaskKind::Event { .. } => 'E',
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            TaskKind::Todo => "todo",
            TaskKind::Deadline { .. } => "deadline",
            TaskKind::Event { .. } => "event",
        }
    }

    /// Fields written after the description
    fn extra_fields(&self) -> Vec<&str> {
        match self {
            TaskKind::Todo => vec![],
            TaskKind::Deadline { by } => vec![by.as_str()],
            TaskKind::Event { start, end } => vec![start.as_str(), end.as_str()],
        }
    }
}

/// A user-tracked task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub description: String,
    pub done: bool,
    #[serde(flatten)]
    pub kind: TaskKind,
}

impl Task {
    pub fn todo(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            done: false,
            kind: TaskKind::Todo,
        }
    }

    pub fn deadline(description: impl Into<String>, by: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            done: false,
            kind: TaskKind::Deadline { by: by.into() },
        }
    }

    pub fn event(
        description: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            done: false,
            kind: TaskKind::Event {
                start: start.into(),
                end: end.into(),
            },
        }
    }

    /// Returns the marker character for the current done state
    pub fn mark_char(&self) -> char {
        if self.done {
            DONE_MARK
        } else {
            OPEN_MARK
        }
    }

    /// Serializes the task as a persisted line, reflecting its done state
    pub fn to_line(&self) -> String {
        self.line_with_mark(self.mark_char())
    }

    /// Serializes the task as a freshly added, not-done line
    pub fn to_new_line(&self) -> String {
        self.line_with_mark(OPEN_MARK)
    }

    fn line_with_mark(&self, mark: char) -> String {
        let tag = self.kind.tag().to_string();
        let mark = mark.to_string();
        let mut fields = vec![tag.as_str(), mark.as_str(), self.description.as_str()];
        fields.extend(self.kind.extra_fields());
        fields.join(FIELD_SEPARATOR)
    }

    /// Returns the first character in any text field that cannot survive a
    /// write/read cycle: a pipe, or a line break
    pub fn unstorable_char(&self) -> Option<char> {
        std::iter::once(self.description.as_str())
            .chain(self.kind.extra_fields())
            .flat_map(str::chars)
            .find(|c| UNSTORABLE_CHARS.contains(c))
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}][{}] {}", self.kind.tag(), self.mark_char(), self.description)?;
        match &self.kind {
            TaskKind::Todo => Ok(()),
            TaskKind::Deadline { by } => write!(f, " (by: {})", by),
            TaskKind::Event { start, end } => write!(f, " (from: {} to: {})", start, end),
        }
    }
}

impl FromStr for Task {
    type Err = ParseTaskError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();

        let expect = |kind: &'static str, expected: usize| {
            if fields.len() == expected {
                Ok(())
            } else {
                Err(ParseTaskError::FieldCount {
                    kind,
                    expected,
                    found: fields.len(),
                    line: line.to_string(),
                })
            }
        };

        let kind = match fields[0] {
            "T" => {
                expect("todo", 3)?;
                TaskKind::Todo
            }
            "D" => {
                expect("deadline", 4)?;
                TaskKind::Deadline {
                    by: fields[3].to_string(),
                }
            }
            "E" => {
                expect("event", 5)?;
                TaskKind::Event {
                    start: fields[3].to_string(),
                    end: fields[4].to_string(),
                }
            }
            other => {
                return Err(ParseTaskError::UnknownKind {
                    kind: other.to_string(),
                    line: line.to_string(),
                })
            }
        };

        let done = match fields[1] {
            "X" => true,
            " " => false,
            other => {
                return Err(ParseTaskError::InvalidMark {
                    mark: other.to_string(),
                    line: line.to_string(),
                })
            }
        };

        Ok(Self {
            description: fields[2].to_string(),
            done,
            kind,
        })
    }
}
