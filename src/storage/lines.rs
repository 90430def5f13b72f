//! Line-oriented storage for tasks
//!
//! Tasks are stored one per line in a plain text file. The file is the only
//! state: every mutation re-reads it and rewrites it whole. Tasks are
//! addressed by zero-based line position.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{Task, DONE_MARK, MARK_OFFSET, OPEN_MARK};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to {action} task file {}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Task index {index} is out of range ({len} tasks stored)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Line {index} has no done marker at offset {offset}: {line:?}")]
    MalformedLine {
        index: usize,
        offset: usize,
        line: String,
    },
}

impl StoreError {
    fn io(action: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// What to do with the line at the target position during a rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEdit {
    /// Write this text instead of the original line. Empty text removes the line.
    Replace(String),
    /// Drop the line; later lines shift up by one
    Remove,
}

/// Store for task lines in a plain text file
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    /// Creates a store backed by the file at `path`
    ///
    /// # Panics
    ///
    /// Panics if `path` is empty.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        assert!(
            !path.as_os_str().is_empty(),
            "task file path must not be empty"
        );
        Self { path }
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads raw task lines in file order
    ///
    /// Reading stops at the first empty line. A missing file is treated as
    /// an empty store.
    pub fn load(&self) -> Result<Vec<String>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Task file not found, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(StoreError::io("open", &self.path, e)),
        };

        // Lock is released when file is dropped
        file.lock_shared()
            .map_err(|e| StoreError::io("lock", &self.path, e))?;

        let mut lines = Vec::new();
        for line in BufReader::new(&file).lines() {
            let line = line.map_err(|e| StoreError::io("read", &self.path, e))?;
            if line.is_empty() {
                break;
            }
            lines.push(line);
        }

        Ok(lines)
    }

    /// Returns true if text follows the first blank line, where `load`
    /// cannot see it
    pub fn has_hidden_lines(&self) -> Result<bool> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(StoreError::io("read", &self.path, e)),
        };

        Ok(content
            .lines()
            .skip_while(|line| !line.is_empty())
            .any(|line| !line.is_empty()))
    }

    /// Appends a task as a new, not-done line
    ///
    /// Failures are logged and otherwise ignored. Use [`TaskStore::try_add`]
    /// to observe them.
    pub fn add(&self, task: &Task) {
        if let Err(e) = self.try_add(task) {
            warn!(error = %e, "Failed to add task to store");
        }
    }

    /// Appends a task as a new, not-done line, creating the file if needed
    pub fn try_add(&self, task: &Task) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::io("create directory for", &self.path, e))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::io("open", &self.path, e))?;

        file.lock_exclusive()
            .map_err(|e| StoreError::io("lock", &self.path, e))?;

        let mut writer = BufWriter::new(&file);
        writeln!(writer, "{}", task.to_new_line())
            .map_err(|e| StoreError::io("append to", &self.path, e))?;
        writer
            .flush()
            .map_err(|e| StoreError::io("flush", &self.path, e))?;

        debug!(path = %self.path.display(), kind = task.kind.label(), "Appended task");
        Ok(())
    }

    /// Marks the task at `index` as done
    pub fn mark(&self, index: usize) -> Result<()> {
        self.set_mark(index, DONE_MARK)
    }

    /// Marks the task at `index` as not done
    pub fn unmark(&self, index: usize) -> Result<()> {
        self.set_mark(index, OPEN_MARK)
    }

    /// Removes the task at `index`; later tasks move up by one
    pub fn delete(&self, index: usize) -> Result<()> {
        self.rewrite_by_index(index, |_| Ok(LineEdit::Remove))
    }

    fn set_mark(&self, index: usize, mark: char) -> Result<()> {
        self.rewrite_by_index(index, |line| {
            let end = MARK_OFFSET + 1;
            if line.len() < end
                || !line.is_char_boundary(MARK_OFFSET)
                || !line.is_char_boundary(end)
            {
                return Err(StoreError::MalformedLine {
                    index,
                    offset: MARK_OFFSET,
                    line: line.to_string(),
                });
            }

            let mut updated = line.to_string();
            updated.replace_range(MARK_OFFSET..end, mark.encode_utf8(&mut [0; 4]));
            Ok(LineEdit::Replace(updated))
        })
    }

    /// Re-reads the file and rewrites it with the line at `index` edited
    ///
    /// `edit` sees the current text of the target line. Every other line is
    /// written back verbatim and in order.
    pub fn rewrite_by_index<F>(&self, index: usize, edit: F) -> Result<()>
    where
        F: FnOnce(&str) -> Result<LineEdit>,
    {
        let lines = self.load()?;
        let target = lines.get(index).ok_or(StoreError::IndexOutOfRange {
            index,
            len: lines.len(),
        })?;

        let replacement = match edit(target)? {
            LineEdit::Replace(text) if !text.is_empty() => Some(text),
            LineEdit::Replace(_) | LineEdit::Remove => None,
        };

        let rewritten = lines.iter().enumerate().filter_map(|(i, line)| {
            if i == index {
                replacement.as_deref()
            } else {
                Some(line.as_str())
            }
        });

        self.write_lines(rewritten)?;
        debug!(path = %self.path.display(), index, "Rewrote task file");
        Ok(())
    }

    /// Replaces the file contents with `lines` (temp file + rename)
    fn write_lines<'a>(&self, lines: impl Iterator<Item = &'a str>) -> Result<()> {
        let temp_path = self.temp_path();

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(|e| StoreError::io("create temp file for", &self.path, e))?;

            file.lock_exclusive()
                .map_err(|e| StoreError::io("lock", &self.path, e))?;

            let mut writer = BufWriter::new(&file);
            for line in lines {
                writeln!(writer, "{}", line)
                    .map_err(|e| StoreError::io("write", &self.path, e))?;
            }

            writer
                .flush()
                .map_err(|e| StoreError::io("flush", &self.path, e))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| StoreError::io("replace", &self.path, e))
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}
