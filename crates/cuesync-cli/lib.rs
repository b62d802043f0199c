//! # cuesync CLI
//!
//! Offline tools around the cuesync engine: inspect how a transcript is
//! chunked, see which chunk a cue lands on, replay a caption log against a
//! record, and render or export transcripts.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;
pub mod input;

/// Transcript/caption synchronization tools
#[derive(Parser, Debug)]
#[command(name = "cuesync", author, version, about, long_about = None)]
pub struct Cli {
    /// Log matcher and session decisions to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output encoding
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One line per item
    #[default]
    Text,
    /// JSON document
    Json,
}

/// Where a record comes from
#[derive(clap::Args, Debug, Clone)]
pub struct RecordArgs {
    /// JSON file holding one record object or an array of records
    #[arg(short, long)]
    pub record: PathBuf,

    /// Position of the record when the file holds an array
    #[arg(long, default_value_t = 0)]
    pub index: usize,

    /// Transcript language to show
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Preferences JSON file (language, autoscroll, speed)
    #[arg(long)]
    pub prefs: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split a transcript file into chunks
    Chunks {
        /// Plain-text transcript
        transcript: PathBuf,

        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Match cues against a transcript file
    Match {
        /// Plain-text transcript
        transcript: PathBuf,

        /// Cues to match
        #[arg(required = true)]
        cues: Vec<String>,

        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// List the transcript languages and subtitle options of a record
    Languages {
        #[command(flatten)]
        source: RecordArgs,
    },

    /// Replay a caption log against a record
    ///
    /// Each line of the log is a cue; `#lang <code>` lines switch the
    /// transcript language and an empty line clears the highlight.
    Replay {
        #[command(flatten)]
        source: RecordArgs,

        /// Caption log, one cue per line
        #[arg(short, long)]
        cues: PathBuf,

        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Render a record's transcript as HTML
    Html {
        #[command(flatten)]
        source: RecordArgs,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a record's transcript as a plain-text download
    Export {
        #[command(flatten)]
        source: RecordArgs,

        /// Directory to write into
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
}
