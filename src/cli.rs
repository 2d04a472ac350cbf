use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// plantdoc - Cannabis plant diagnosis questionnaire
#[derive(Parser, Debug)]
#[command(name = "plantdoc")]
#[command(about = "Answer a short questionnaire and get likely problems and remedies for your plant")]
#[command(version)]
pub struct Cli {
    /// Settings file (JSON). Missing fields take their defaults.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the question and diagnosis images
    #[arg(long, global = true)]
    pub assets_dir: Option<PathBuf>,

    /// Write emailed reports as .eml files into this directory
    #[arg(long, global = true)]
    pub outbox: Option<PathBuf>,

    /// Ask the deficiency photo check after the root rot question
    #[arg(long, global = true)]
    pub photo_check: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive questionnaire (default)
    Run,
    /// Answer the questionnaire from a JSON file and print the diagnosis
    Diagnose {
        /// JSON array of answers, one per step
        #[arg(short, long)]
        answers: PathBuf,

        /// Email the diagnosis to this address once resolved
        #[arg(short, long)]
        email: Option<String>,
    },
    /// List the questions in asking order
    Questions,
    /// Write a settings file with the default values
    InitConfig {
        /// Where to write the settings file
        path: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
