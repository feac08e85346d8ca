//! Command-line interface for pravka
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Spelling correction for Russian text
#[derive(Parser, Debug)]
#[command(name = "pravka", version, about = "Spelling correction for Russian text")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Frequency dictionary (one `word count` per line)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub dictionary: Option<PathBuf>,

    /// Morphology table for the bundled analyser
    #[arg(short, long, global = true, value_name = "PATH")]
    pub morphology: Option<PathBuf>,

    /// File-backed custom word store
    #[arg(long, global = true, value_name = "PATH")]
    pub custom_words: Option<PathBuf>,

    /// Emit per-candidate scoring at debug level
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Correct a single text and print the result
    Correct {
        /// Text to correct
        text: String,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive correction loop (quit to exit)
    Repl,

    /// Add a custom word to the dictionary
    AddWord {
        /// Word to add
        word: String,
    },

    /// Remove a custom word from the dictionary
    RemoveWord {
        /// Word to remove
        word: String,
    },
}
