pub mod colors;
pub mod controls;
pub mod convert;
pub mod script;
pub mod syllabify;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "scriptor", version)]
#[command(about = "Turns colour-coded RTF transcripts into role-tagged scripts.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Less decoration; repeat to print results only
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Overwrite existing output files without asking
    #[arg(short = 'y', long, global = true)]
    pub force: bool,

    /// Fail on text whose colour has no role in the tag map
    #[arg(long, global = true)]
    pub strict: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ScriptFormat {
    /// One {"role": "utterance"} object per line
    Jsonl,
    /// "Role: utterance" lines, like a movie script
    Text,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Turn one RTF file into a script.
    ///
    /// Example: scriptor script RGB(20,154,200) Fred '#B3a8C4' Susie path/to/file.rtf
    #[command(alias = "s")]
    Script {
        #[arg(long, value_enum, default_value_t = ScriptFormat::Jsonl)]
        format: ScriptFormat,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Colour/role pairs followed by the RTF file
        #[arg(required = true, num_args = 1.., value_name = "COLOR ROLE ... FILE")]
        arguments: Vec<String>,
    },
    /// Convert a directory of <client><Defense>.rtf discussions
    #[command(alias = "c")]
    Convert {
        rtf_dir: PathBuf,
        jsonl_dir: PathBuf,
        /// Combined JSON file; defaults to <JSONL_DIR>/discussions.json
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Role for a colour, replacing the Expert/AI defaults
        #[arg(short, long = "tag", value_name = "COLOR=ROLE")]
        tags: Vec<String>,
    },
    /// Show the colour table of an RTF file
    Colors { file: PathBuf },
    /// List the RTF control sequences used in a file
    Controls { file: PathBuf },
    /// Split the names in a file into syllables
    Syllabify {
        /// Statuses to ignore
        #[arg(short, long, num_args = 0..)]
        filter: Vec<String>,
        namefile: PathBuf,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
