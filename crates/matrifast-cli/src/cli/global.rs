//! Flags accepted by every `matrifast` subcommand.

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// How much of the registration process is logged to stderr.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Log more of each registration (-v, -vv, -vvv)",
        long_help = "Log more of each registration to stderr:
    (none)  - rejected submissions and unrecognised field values
    -v      - every user registered and the batch summary
    -vv     - every form file read from a directory
    -vvv    - everything, including trace events"
    )]
    pub verbose: u8,

    /// Only rejected submissions and failures are printed. JSON reports are
    /// still written.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print rejections and failures only"
    )]
    pub quiet: bool,

    /// Plain text in both reports and logs. `NO_COLOR` has the same effect.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Print reports and logs without color"
    )]
    pub no_color: bool,

    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Read settings from FILE instead of the default location"
    )]
    pub config: Option<PathBuf>,

    /// Report format. `auto` defers to `output.format`, then to the terminal.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Format of registration and validation reports"
    )]
    pub output_format: OutputFormat,
}

/// How registration and validation reports are rendered on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human on a terminal, plain when piped.
    #[default]
    Auto,
    /// Colored, with headers and markers.
    Human,
    /// One line per result, no color.
    Plain,
    /// User records or validation results as JSON.
    Json,
}

impl OutputFormat {
    /// Parse the `output.format` setting.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "human" => Some(Self::Human),
            "plain" => Some(Self::Plain),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}
