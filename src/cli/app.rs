//! Main CLI application structure

use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use super::output::{Output, OutputFormat};
use super::task;
use crate::storage::{Config, TaskStore};

/// Environment variable holding a log filter, e.g. `TASKLINE_LOG=debug`
pub const LOG_ENV: &str = "TASKLINE_LOG";

#[derive(Parser)]
#[command(name = "taskline")]
#[command(author, version, about = "Track todos, deadlines and events in a plain text file")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Task file (overrides data_file from the config)
    #[arg(long, global = true, env = "TASKLINE_FILE")]
    pub file: Option<PathBuf>,

    /// Config file location
    #[arg(long, global = true, env = "TASKLINE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (defaults to default_format from the config)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all tasks
    List,

    /// Add a todo
    Todo {
        /// What needs doing
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },

    /// Add a task with a due date
    Deadline {
        /// What needs doing
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,

        /// When it is due (free-form)
        #[arg(long)]
        by: String,
    },

    /// Add an event with a start and end
    Event {
        /// What is happening
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,

        /// When it starts (free-form)
        #[arg(long)]
        from: String,

        /// When it ends (free-form)
        #[arg(long)]
        to: String,
    },

    /// Mark a task as done
    Mark {
        /// Task number, as shown by `list`
        number: NonZeroUsize,
    },

    /// Mark a task as not done
    Unmark {
        /// Task number, as shown by `list`
        number: NonZeroUsize,
    },

    /// Delete a task
    Delete {
        /// Task number, as shown by `list`
        number: NonZeroUsize,
    },

    /// Find tasks whose description contains a keyword
    Find {
        /// Text to search for (case-insensitive)
        keyword: String,
    },
}

/// Installs the stderr log subscriber
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("taskline=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // A subscriber may already be installed when running inside tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let output = Output::new(cli.format.unwrap_or(config.default_format));
    let store = TaskStore::new(config.data_file(cli.file.as_deref()));

    tracing::debug!(file = %store.path().display(), "Using task file");

    match cli.command {
        Commands::List => task::list(&store, &output)?,

        Commands::Todo { description } => {
            let task = task::build_todo(&description)?;
            task::add(&store, &output, task)?
        }
        Commands::Deadline { description, by } => {
            let task = task::build_deadline(&description, &by)?;
            task::add(&store, &output, task)?
        }
        Commands::Event {
            description,
            from,
            to,
        } => {
            let task = task::build_event(&description, &from, &to)?;
            task::add(&store, &output, task)?
        }

        Commands::Mark { number } => task::mark(&store, &output, number)?,
        Commands::Unmark { number } => task::unmark(&store, &output, number)?,
        Commands::Delete { number } => task::delete(&store, &output, number)?,

        Commands::Find { keyword } => task::find(&store, &output, &keyword)?,
    }

    Ok(())
}
