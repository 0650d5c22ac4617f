//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "matrifast",
    bin_name = "matrifast",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Validate and register school enrollment forms",
    long_about = "MatriFast validates registration forms (identity documents, \
                  names, birth dates, contact data) and turns them into \
                  teacher and legal-representative records.",
    after_help = "EXAMPLES:\n\
        \x20 matrifast register forms/ana.toml\n\
        \x20 matrifast register forms/ --as representante --output-format json\n\
        \x20 matrifast validate-document --type DNI --number 12345678\n\
        \x20 matrifast completions bash > /usr/share/bash-completion/completions/matrifast",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Register users from submitted form files.
    #[command(
        visible_alias = "r",
        about = "Register users from form files",
        after_help = "EXAMPLES:\n\
            \x20 matrifast register ana.toml\n\
            \x20 matrifast register luis.json --as representante --email luis@x.com\n\
            \x20 matrifast register submissions/"
    )]
    Register(RegisterArgs),

    /// Check a document number against its type's rule.
    #[command(
        visible_alias = "doc",
        about = "Validate an identity document",
        after_help = "EXAMPLES:\n\
            \x20 matrifast validate-document --type DNI --number 12345678\n\
            \x20 matrifast validate-document --type CE --number A23456789"
    )]
    ValidateDocument(ValidateDocumentArgs),

    /// Initialise a MatriFast configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 matrifast init\n\
            \x20 matrifast init ./matrifast.toml\n\
            \x20 matrifast init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 matrifast completions bash > ~/.local/share/bash-completion/completions/matrifast\n\
            \x20 matrifast completions zsh  > ~/.zfunc/_matrifast\n\
            \x20 matrifast completions fish > ~/.config/fish/completions/matrifast.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the MatriFast configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 matrifast config get output.format\n\
            \x20 matrifast config list\n\
            \x20 matrifast config path"
    )]
    Config(ConfigCommands),
}

// ── register ──────────────────────────────────────────────────────────────────

/// Arguments for `matrifast register`.
#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// A `.json`/`.toml` submission, or a directory of them.
    #[arg(value_name = "PATH", help = "Submission file or directory")]
    pub path: PathBuf,

    /// User kind, for submissions that do not declare one.
    #[arg(
        long = "as",
        value_name = "KIND",
        value_enum,
        help = "Register as this kind when the submission has none"
    )]
    pub kind: Option<UserKind>,

    /// Account email, for submissions that do not declare one.
    #[arg(
        short = 'e',
        long = "email",
        value_name = "EMAIL",
        help = "Account email when the submission has none"
    )]
    pub email: Option<String>,

    /// Stop at the first invalid submission.
    #[arg(long = "fail-fast", help = "Stop at the first invalid submission")]
    pub fail_fast: bool,
}

/// User kinds accepted by `--as`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum UserKind {
    #[value(alias = "teacher")]
    Docente,
    #[value(aliases = ["representante-legal", "guardian"])]
    Representante,
}

impl std::fmt::Display for UserKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Docente => write!(f, "docente"),
            Self::Representante => write!(f, "representante"),
        }
    }
}

// ── validate-document ─────────────────────────────────────────────────────────

/// Arguments for `matrifast validate-document`.
#[derive(Debug, Args)]
pub struct ValidateDocumentArgs {
    /// Document type tag (DNI, CE, PTP, CODIGO_ESTUDIANTE, or any other tag).
    #[arg(short = 't', long = "type", value_name = "TYPE", help = "Document type")]
    pub doc_type: String,

    #[arg(short = 'n', long = "number", value_name = "NUMBER", help = "Document number")]
    pub number: String,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `matrifast init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Where to write the file. Defaults to the platform config directory.
    #[arg(value_name = "FILE", help = "Config file to create")]
    pub path: Option<PathBuf>,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `matrifast completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `matrifast config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `output.format`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
