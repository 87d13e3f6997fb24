//! CLI entry point for Echoverse.

pub mod speak;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Echoverse audiobook CLI
#[derive(Parser, Debug)]
#[command(name = "echoverse", version, about = "Echoverse: turn text into audiobooks")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the selectable voices
    Voices,
    /// Generate an audiobook and save it
    Speak(SpeakArgs),
}

/// Arguments for the `speak` subcommand.
#[derive(Parser, Debug)]
pub struct SpeakArgs {
    /// Voice name or id (defaults to the configured voice)
    #[arg(short, long)]
    pub voice: Option<String>,

    /// Plain-text file to narrate
    #[arg(short, long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Audiobook title, used for the file name
    #[arg(short = 'T', long)]
    pub title: Option<String>,

    /// Directory to write the audio file into
    #[arg(short, long, default_value = ".")]
    pub out: PathBuf,

    /// Text to narrate (read from stdin when neither text nor --file is given)
    pub text: Option<String>,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
