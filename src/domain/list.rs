//! Ordered list of typed tasks rebuilt from persisted lines

use serde::Serialize;
use thiserror::Error;

use super::task::{ParseTaskError, Task};

#[derive(Debug, Error, PartialEq)]
#[error("Corrupt task at line {line_number}")]
pub struct TaskListError {
    pub line_number: usize,
    #[source]
    pub source: ParseTaskError,
}

/// Tasks in file order. Position is identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TaskList(Vec<Task>);

impl TaskList {
    /// Parses raw persisted lines, failing on the first line that is not a task
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self, TaskListError> {
        lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                line.as_ref().parse().map_err(|source| TaskListError {
                    line_number: i + 1,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.0.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.0.iter()
    }

    /// Returns tasks whose description contains `keyword`, ignoring case,
    /// paired with their zero-based position in the full list
    pub fn find(&self, keyword: &str) -> Vec<(usize, &Task)> {
        let needle = keyword.to_lowercase();
        self.0
            .iter()
            .enumerate()
            .filter(|(_, task)| task.description.to_lowercase().contains(&needle))
            .collect()
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<String> {
        vec![
            "T |   | read book".to_string(),
            "D | X | return Book | june 6th".to_string(),
            "E |   | project meeting | mon 2pm | 4pm".to_string(),
        ]
    }

    #[test]
    fn builds_in_order() {
        let list = TaskList::from_lines(&sample()).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.get(0).unwrap().description, "read book");
        assert_eq!(list.get(2).unwrap().description, "project meeting");
        assert!(list.get(1).unwrap().done);
    }

    #[test]
    fn empty_lines_give_empty_list() {
        let list = TaskList::from_lines::<String>(&[]).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn reports_corrupt_line_number() {
        let mut lines = sample();
        lines.insert(1, "garbage".to_string());

        let err = TaskList::from_lines(&lines).unwrap_err();
        assert_eq!(err.line_number, 2);
        assert!(matches!(err.source, ParseTaskError::UnknownKind { .. }));
    }

    #[test]
    fn corrupt_line_message_appears_once_in_chain() {
        let err = TaskList::from_lines(&["b"]).unwrap_err();
        assert_eq!(err.to_string(), "Corrupt task at line 1");

        let chain = format!("{:#}", anyhow::Error::new(err));
        assert_eq!(chain.matches("Unknown task kind").count(), 1);
    }

    #[test]
    fn find_is_case_insensitive_and_keeps_positions() {
        let list = TaskList::from_lines(&sample()).unwrap();
        let found = list.find("BOOK");

        let positions: Vec<usize> = found.iter().map(|(i, _)| *i).collect();
        assert_eq!(positions, vec![0, 1]);
    }

    #[test]
    fn find_without_match() {
        let list = TaskList::from_lines(&sample()).unwrap();
        assert!(list.find("swim").is_empty());
    }
}
