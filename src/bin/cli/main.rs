mod app;
mod commands;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use cram::study::Confidence;

#[derive(Parser)]
#[command(name = "cram-cli", about = "Track what you study and what to study next", version)]
struct Cli {
    /// Use a specific data directory (default: the platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new empty semester
    New {
        /// Name of the semester
        semester: String,
    },

    /// List stored semesters
    List,

    /// List the children of a node, most urgent first
    Ls {
        /// Semester name (case-insensitive prefix match)
        semester: String,
        /// Path into the hierarchy: course, then topic
        path: Vec<String>,
    },

    /// Show the whole hierarchy as a tree
    Tree {
        /// Semester name
        semester: String,
    },

    /// Show one node in detail
    Show {
        /// Semester name
        semester: String,
        /// Path to the node
        path: Vec<String>,
    },

    /// Count and list the cards under a node
    Cards {
        /// Semester name
        semester: String,
        /// Path to the node
        path: Vec<String>,
    },

    /// Add a course, topic, or card; the last path segment is the new name
    Add {
        /// Semester name
        semester: String,
        /// Path to the parent, ending with the name to add
        path: Vec<String>,
        /// Answer text when adding a card
        #[arg(long)]
        answer: Option<String>,
        /// Initial confidence (none/low/medium/high or 0-3)
        #[arg(long)]
        confidence: Option<Confidence>,
    },

    /// Remove a node and everything under it
    Remove {
        /// Semester name
        semester: String,
        /// Path to the node to remove
        path: Vec<String>,
    },

    /// Rename the node at a path
    Rename {
        /// Semester name
        semester: String,
        /// Path to the node to rename
        path: Vec<String>,
        /// The new name
        #[arg(long)]
        to: String,
    },

    /// Replace the answer of the card at a path
    Answer {
        /// Semester name
        semester: String,
        /// Path to the card
        path: Vec<String>,
        /// The new answer text
        #[arg(long)]
        text: String,
    },

    /// Record that you studied the node at a path
    Study {
        /// Semester name
        semester: String,
        /// Path to the node (empty = the semester itself)
        path: Vec<String>,
        /// How confident you are now (none/low/medium/high or 0-3)
        #[arg(long)]
        confidence: Confidence,
        /// Study date as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Quiz yourself on all cards under a node
    Quiz {
        /// Semester name
        semester: String,
        /// Path to the node (empty = the whole semester)
        path: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let app = app::App::new(cli.data_dir)?;

    match cli.command {
        Command::New { semester } => commands::edit::run_new(&app, &semester)?,
        Command::List => commands::list::run(&app)?,
        Command::Ls { semester, path } => commands::ls::run(&app, &semester, &path)?,
        Command::Tree { semester } => commands::tree::run(&app, &semester)?,
        Command::Show { semester, path } => commands::show::run(&app, &semester, &path)?,
        Command::Cards { semester, path } => commands::show::run_cards(&app, &semester, &path)?,
        Command::Add {
            semester,
            path,
            answer,
            confidence,
        } => commands::edit::run_add(&app, &semester, &path, answer.as_deref(), confidence)?,
        Command::Remove { semester, path } => commands::edit::run_remove(&app, &semester, &path)?,
        Command::Rename { semester, path, to } => {
            commands::edit::run_rename(&app, &semester, &path, &to)?
        }
        Command::Answer {
            semester,
            path,
            text,
        } => commands::edit::run_answer(&app, &semester, &path, &text)?,
        Command::Study {
            semester,
            path,
            confidence,
            date,
        } => commands::study::run(&app, &semester, &path, confidence, date)?,
        Command::Quiz { semester, path } => commands::quiz::run(&app, &semester, &path)?,
    }

    Ok(())
}
