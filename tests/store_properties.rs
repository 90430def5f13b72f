//! Property tests for index-based task store operations.

use std::fs;

use proptest::prelude::*;
use taskline::{StoreError, Task, TaskStore};
use tempfile::TempDir;

/// Descriptions that survive the line format: no separator, no newlines,
/// never empty
fn description() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9 ]{0,20}"
}

fn task() -> impl Strategy<Value = Task> {
    prop_oneof![
        description().prop_map(Task::todo),
        (description(), description()).prop_map(|(d, by)| Task::deadline(d, by)),
        (description(), description(), description())
            .prop_map(|(d, start, end)| Task::event(d, start, end)),
    ]
}

fn store_with(dir: &TempDir, tasks: &[Task]) -> TaskStore {
    let store = TaskStore::new(dir.path().join("tasks.txt"));
    for task in tasks {
        store.try_add(task).unwrap();
    }
    store
}

proptest! {
    /// Every added task reads back as an open task with the same fields.
    #[test]
    fn prop_add_round_trips(tasks in prop::collection::vec(task(), 1..10)) {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, &tasks);

        let lines = store.load().unwrap();
        prop_assert_eq!(lines.len(), tasks.len());
        for (line, task) in lines.iter().zip(&tasks) {
            let parsed: Task = line.parse().unwrap();
            prop_assert_eq!(&parsed, task);
            prop_assert!(!parsed.done);
        }
    }

    /// mark followed by unmark restores the file byte for byte.
    #[test]
    fn prop_mark_unmark_inverse(
        tasks in prop::collection::vec(task(), 1..10),
        pick in any::<prop::sample::Index>()
    ) {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, &tasks);
        let index = pick.index(tasks.len());
        let before = fs::read_to_string(store.path()).unwrap();

        store.mark(index).unwrap();
        let expected_prefix = format!("{} | X | ", tasks[index].kind.tag());
        prop_assert!(store.load().unwrap()[index].starts_with(&expected_prefix));

        store.unmark(index).unwrap();
        prop_assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    }

    /// delete removes exactly one line and keeps the rest in order.
    #[test]
    fn prop_delete_shifts(
        tasks in prop::collection::vec(task(), 1..10),
        pick in any::<prop::sample::Index>()
    ) {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, &tasks);
        let index = pick.index(tasks.len());
        let mut expected = store.load().unwrap();

        store.delete(index).unwrap();
        expected.remove(index);

        prop_assert_eq!(store.load().unwrap(), expected);
    }

    /// Indices at or past the end always fail and leave the file untouched.
    #[test]
    fn prop_out_of_range_fails(
        tasks in prop::collection::vec(task(), 0..5),
        extra in 0usize..10
    ) {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, &tasks);
        let before = store.load().unwrap();
        let index = tasks.len() + extra;

        let is_out_of_range = |r: Result<(), StoreError>| {
            matches!(r, Err(StoreError::IndexOutOfRange { .. }))
        };
        prop_assert!(is_out_of_range(store.mark(index)));
        prop_assert!(is_out_of_range(store.unmark(index)));
        prop_assert!(is_out_of_range(store.delete(index)));
        prop_assert_eq!(store.load().unwrap(), before);
    }
}
