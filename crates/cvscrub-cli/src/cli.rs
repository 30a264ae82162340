use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cvscrub")]
#[command(about = "Strip personal details from CVs", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrub a CV, or every matching CV in a directory
    Scrub(ScrubArgs),

    /// Put the original text back into a scrubbed file
    Restore {
        /// Scrubbed text file
        scrubbed: PathBuf,

        /// Mapping JSON written alongside the scrubbed file
        #[arg(long)]
        mapping: PathBuf,
    },

    /// Write a default cvscrub.toml in the current directory
    Init {
        /// Overwrite an existing cvscrub.toml
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ScrubArgs {
    /// CV file or directory of CVs
    pub path: PathBuf,

    /// Output file (or directory when PATH is a directory). Defaults to stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write a <stem>.mapping.json next to each output
    #[arg(long)]
    pub mapping: bool,

    /// Salt for placeholder hashes (random per run when unset)
    #[arg(long, env = "CVSCRUB_SALT")]
    pub salt: Option<String>,

    /// File of extra terms to redact, one per line
    #[arg(long)]
    pub local_terms: Option<PathBuf>,

    /// File of brand names to protect, replacing the built-in list
    #[arg(long)]
    pub brands: Option<PathBuf>,

    /// Skip person, organisation and place recognition
    #[arg(long)]
    pub no_entities: bool,

    /// File name pattern for directory mode (default from config: *.txt)
    #[arg(long)]
    pub pattern: Option<String>,

    /// Descend into subdirectories in directory mode
    #[arg(long)]
    pub recursive: bool,

    /// Config file to use instead of the usual lookup
    #[arg(long)]
    pub config: Option<PathBuf>,
}
