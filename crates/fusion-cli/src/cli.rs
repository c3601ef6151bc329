//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use fusion_model::FusionMode;

#[derive(Parser)]
#[command(
    name = "fusion",
    version,
    about = "Table Fusion - Combine a folder of CSV and Excel files into one table",
    long_about = "Combine every CSV, XLSX and XLS file in a folder into a single table.\n\n\
                  concat stacks rows and unions columns by name; merge outer-joins the\n\
                  tables on their shared column names. Files that cannot be read are\n\
                  skipped and reported."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q to silence).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Preferences file (default: platform config directory).
    #[arg(long = "preferences", value_name = "FILE", global = true)]
    pub preferences: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Combine the files of a folder and write the result.
    Run(RunArgs),

    /// Print the stored preferences.
    Prefs,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Folder containing the input files (default: last used).
    #[arg(long = "input", short = 'i', value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Output file; `.csv` writes CSV, anything else a workbook (default: last used).
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// How to combine the tables (default: last used, else concat).
    #[arg(long = "mode", short = 'm', value_enum)]
    pub mode: Option<ModeArg>,

    /// Skip the preview of the first rows.
    #[arg(long = "no-preview")]
    pub no_preview: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Concat,
    Merge,
}

impl From<ModeArg> for FusionMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Concat => FusionMode::Concat,
            ModeArg::Merge => FusionMode::Merge,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "fusion", "run", "--input", "in", "-o", "out.csv", "--mode", "merge",
        ])
        .unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.input, Some(PathBuf::from("in")));
        assert_eq!(args.output, Some(PathBuf::from("out.csv")));
        assert_eq!(args.mode.map(FusionMode::from), Some(FusionMode::Merge));
        assert!(!args.no_preview);
    }

    #[test]
    fn test_run_without_arguments_parses() {
        let cli = Cli::try_parse_from(["fusion", "run", "--no-preview"]).unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert!(args.input.is_none());
        assert!(args.mode.is_none());
        assert!(args.no_preview);
    }

    #[test]
    fn test_global_preferences_flag() {
        let cli = Cli::try_parse_from(["fusion", "prefs", "--preferences", "p.json"]).unwrap();
        assert!(matches!(cli.command, Command::Prefs));
        assert_eq!(cli.preferences, Some(PathBuf::from("p.json")));
    }

    #[test]
    fn test_invalid_mode_rejected() {
        assert!(Cli::try_parse_from(["fusion", "run", "--mode", "zip"]).is_err());
    }
}
