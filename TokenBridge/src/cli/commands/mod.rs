use clap::Subcommand;
use std::path::PathBuf;

pub mod convert;
pub mod execute;
pub mod formats;
pub mod inspect;

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a token file to another format
    Convert {
        /// Source file
        #[arg(short, long)]
        source: PathBuf,

        /// Output file (text output goes to stdout when omitted)
        #[arg(short, long)]
        destination: Option<PathBuf>,

        /// Source format (json, tana, clr, ase); detected from the extension by default
        #[arg(short, long)]
        input_format: Option<String>,

        /// Target format (json, tana, clr, ase); detected from the destination by default
        #[arg(short, long)]
        output_format: Option<String>,

        /// Print the XML view of palette output
        #[arg(long)]
        show_xml: bool,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// List the tokens in a file
    Inspect {
        /// Source file
        #[arg(short, long)]
        source: PathBuf,

        /// Source format; detected from the extension by default
        #[arg(short, long)]
        input_format: Option<String>,
    },

    /// List supported formats and conversion paths
    Formats,
}
