//! Task CLI commands
//!
//! Users see 1-based task numbers; the store works with 0-based indices.

use std::num::NonZeroUsize;

use anyhow::{Context, Result};

use super::output::Output;
use crate::domain::{Task, TaskList};
use crate::storage::{StoreError, TaskStore};

/// Loads and parses every visible task
fn read_tasks(store: &TaskStore) -> Result<TaskList> {
    let lines = store.load()?;
    TaskList::from_lines(&lines)
        .with_context(|| format!("Task file is corrupt: {}", store.path().display()))
}

/// Joins description words and rejects text the line format cannot hold
fn description(words: &[String], kind: &str) -> Result<String> {
    let text = words.join(" ").trim().to_string();
    if text.is_empty() {
        anyhow::bail!("The description of a {} cannot be empty", kind);
    }
    Ok(text)
}

fn checked(task: Task) -> Result<Task> {
    if let Some(c) = task.unstorable_char() {
        anyhow::bail!("Task text cannot contain {:?}: {:?}", c, task.description);
    }
    Ok(task)
}

pub fn build_todo(words: &[String]) -> Result<Task> {
    checked(Task::todo(description(words, "todo")?))
}

pub fn build_deadline(words: &[String], by: &str) -> Result<Task> {
    checked(Task::deadline(description(words, "deadline")?, by.trim()))
}

pub fn build_event(words: &[String], from: &str, to: &str) -> Result<Task> {
    checked(Task::event(
        description(words, "event")?,
        from.trim(),
        to.trim(),
    ))
}

/// Maps a store error to a message in terms of task numbers
fn explain(err: StoreError, number: NonZeroUsize) -> anyhow::Error {
    match err {
        StoreError::IndexOutOfRange { len, .. } => {
            anyhow::anyhow!("No task number {} (the list has {} tasks)", number, len)
        }
        other => other.into(),
    }
}

fn print_numbered(output: &Output, entries: &[(usize, &Task)]) {
    if output.is_json() {
        let items: Vec<_> = entries
            .iter()
            .map(|(index, task)| {
                serde_json::json!({
                    "number": index + 1,
                    "task": task,
                })
            })
            .collect();
        output.data(&items);
    } else {
        for (index, task) in entries {
            output.line(&format!("{}. {}", index + 1, task));
        }
    }
}

pub fn list(store: &TaskStore, output: &Output) -> Result<()> {
    let tasks = read_tasks(store)?;

    if tasks.is_empty() && !output.is_json() {
        output.line("No tasks");
        return Ok(());
    }

    output.line("Here are the tasks in your list:");
    let entries: Vec<_> = tasks.iter().enumerate().collect();
    print_numbered(output, &entries);

    Ok(())
}

pub fn add(store: &TaskStore, output: &Output, task: Task) -> Result<()> {
    let before = store.load()?.len();
    store.add(&task);
    let after = store.load()?.len();

    // The store only logs append failures; a count that did not grow means
    // the task never reached the visible part of the file
    if after <= before {
        if store.has_hidden_lines()? {
            anyhow::bail!(
                "Task was written below a blank line in {}, which ends the list; \
                 remove the blank line to see it",
                store.path().display()
            );
        }
        anyhow::bail!("Failed to save task to {}", store.path().display());
    }

    if output.is_json() {
        output.data(&serde_json::json!({
            "number": after,
            "task": task,
            "count": after,
        }));
    } else {
        output.success(&format!("Added: {}", task));
        output.line(&format!("Now you have {} tasks in the list.", after));
    }

    Ok(())
}

pub fn mark(store: &TaskStore, output: &Output, number: NonZeroUsize) -> Result<()> {
    let index = number.get() - 1;
    store.mark(index).map_err(|e| explain(e, number))?;
    report_task(store, output, number, "Marked as done")
}

pub fn unmark(store: &TaskStore, output: &Output, number: NonZeroUsize) -> Result<()> {
    let index = number.get() - 1;
    store.unmark(index).map_err(|e| explain(e, number))?;
    report_task(store, output, number, "Marked as not done yet")
}

fn report_task(
    store: &TaskStore,
    output: &Output,
    number: NonZeroUsize,
    message: &str,
) -> Result<()> {
    let tasks = read_tasks(store)?;
    let task = tasks
        .get(number.get() - 1)
        .ok_or_else(|| anyhow::anyhow!("Task {} disappeared after update", number))?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "number": number,
            "task": task,
        }));
    } else {
        output.success(&format!("{}: {}", message, task));
    }

    Ok(())
}

pub fn delete(store: &TaskStore, output: &Output, number: NonZeroUsize) -> Result<()> {
    let index = number.get() - 1;
    let removed = read_tasks(store)?.get(index).cloned();

    store.delete(index).map_err(|e| explain(e, number))?;
    let remaining = store.load()?.len();

    if output.is_json() {
        output.data(&serde_json::json!({
            "number": number,
            "task": removed,
            "count": remaining,
        }));
    } else {
        if let Some(task) = removed {
            output.success(&format!("Removed: {}", task));
        }
        output.line(&format!("Now you have {} tasks in the list.", remaining));
    }

    Ok(())
}

pub fn find(store: &TaskStore, output: &Output, keyword: &str) -> Result<()> {
    let tasks = read_tasks(store)?;
    let matches = tasks.find(keyword);

    if matches.is_empty() && !output.is_json() {
        output.line(&format!("No tasks matching '{}'", keyword));
        return Ok(());
    }

    output.line("Here are the matching tasks in your list:");
    print_numbered(output, &matches);

    Ok(())
}
