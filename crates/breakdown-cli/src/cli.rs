use std::path::PathBuf;

use breakdown::DEFAULT_CAST_SPLIT;
use clap::{Parser, Subcommand, ValueEnum};

/// Build a makeup & SFX breakdown table from a shooting-schedule PDF.
#[derive(Debug, Parser)]
#[command(name = "breakdown", about, version)]
pub struct Cli {
    /// Log parser decisions to stderr (debug level)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fill the breakdown table of a DOCX template from a schedule
    Build {
        /// Path to the schedule PDF (or token dump with --tokens)
        #[arg(value_name = "SCHEDULE")]
        schedule: PathBuf,

        /// Path to the previous breakdown DOCX; its first table is refilled
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        /// Output DOCX path. Default: Breakdown_filled_EP1.docx
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Fraction of the page width where the cast column starts (0.55-0.85)
        #[arg(long, default_value_t = DEFAULT_CAST_SPLIT)]
        cast_split: f64,

        /// Read SCHEDULE as a JSON token dump instead of a PDF
        #[arg(long)]
        tokens: bool,

        /// Print the run summary as JSON
        #[arg(long)]
        debug: bool,

        /// Print per-page diagnostics (first 40 lines and headers of the first 3 pages)
        #[arg(long)]
        super_debug: bool,

        /// Also write the change log to this file, one entry per line
        #[arg(long, value_name = "FILE")]
        changelog: Option<PathBuf>,
    },

    /// List the scenes parsed from a schedule
    Scenes {
        /// Path to the schedule PDF (or token dump with --tokens)
        #[arg(value_name = "SCHEDULE")]
        schedule: PathBuf,

        /// Read SCHEDULE as a JSON token dump instead of a PDF
        #[arg(long)]
        tokens: bool,

        /// Fraction of the page width where the cast column starts (0.55-0.85)
        #[arg(long, default_value_t = DEFAULT_CAST_SPLIT)]
        cast_split: f64,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the role legend from page 1 of a schedule
    Roles {
        /// Path to the schedule PDF (or token dump with --tokens)
        #[arg(value_name = "SCHEDULE")]
        schedule: PathBuf,

        /// Read SCHEDULE as a JSON token dump instead of a PDF
        #[arg(long)]
        tokens: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = ListFormat::Text)]
        format: ListFormat,
    },

    /// Dump the positioned words of a PDF as a JSON token dump
    Tokens {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Write the dump to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

/// Output format for the scenes subcommand.
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Plain text (tab-separated)
    Text,
    /// JSON output
    Json,
    /// CSV output
    Csv,
}

/// Output format for the roles subcommand.
#[derive(Debug, Clone, ValueEnum)]
pub enum ListFormat {
    /// Plain text (tab-separated)
    Text,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_build_with_defaults() {
        let cli = Cli::parse_from(["breakdown", "build", "plan.pdf", "old.docx"]);
        assert!(!cli.verbose);
        match cli.command {
            Commands::Build {
                ref schedule,
                ref template,
                ref output,
                cast_split,
                tokens,
                debug,
                super_debug,
                ref changelog,
            } => {
                assert_eq!(schedule, &PathBuf::from("plan.pdf"));
                assert_eq!(template, &PathBuf::from("old.docx"));
                assert!(output.is_none());
                assert_eq!(cast_split, 0.61);
                assert!(!tokens && !debug && !super_debug);
                assert!(changelog.is_none());
            }
            _ => panic!("expected Build subcommand"),
        }
    }

    #[test]
    fn parse_build_with_all_options() {
        let cli = Cli::parse_from([
            "breakdown",
            "build",
            "plan.json",
            "old.docx",
            "--output",
            "new.docx",
            "--cast-split",
            "0.7",
            "--tokens",
            "--debug",
            "--super-debug",
            "--changelog",
            "changes.txt",
            "--verbose",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Build {
                ref output,
                cast_split,
                tokens,
                debug,
                super_debug,
                ref changelog,
                ..
            } => {
                assert_eq!(output.as_deref(), Some(std::path::Path::new("new.docx")));
                assert_eq!(cast_split, 0.7);
                assert!(tokens && debug && super_debug);
                assert_eq!(changelog, &Some(PathBuf::from("changes.txt")));
            }
            _ => panic!("expected Build subcommand"),
        }
    }

    #[test]
    fn build_requires_template() {
        assert!(Cli::try_parse_from(["breakdown", "build", "plan.pdf"]).is_err());
    }

    #[test]
    fn parse_scenes_with_csv_format() {
        let cli = Cli::parse_from(["breakdown", "scenes", "plan.pdf", "--format", "csv"]);
        match cli.command {
            Commands::Scenes { format, .. } => assert!(matches!(format, OutputFormat::Csv)),
            _ => panic!("expected Scenes subcommand"),
        }
    }

    #[test]
    fn parse_roles_json() {
        let cli = Cli::parse_from(["breakdown", "-v", "roles", "plan.pdf", "--format", "json"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Roles { format, tokens, .. } => {
                assert!(matches!(format, ListFormat::Json));
                assert!(!tokens);
            }
            _ => panic!("expected Roles subcommand"),
        }
    }

    #[test]
    fn roles_rejects_csv() {
        assert!(
            Cli::try_parse_from(["breakdown", "roles", "plan.pdf", "--format", "csv"]).is_err()
        );
    }

    #[test]
    fn parse_tokens_with_pages() {
        let cli = Cli::parse_from(["breakdown", "tokens", "plan.pdf", "--pages", "1-2"]);
        match cli.command {
            Commands::Tokens {
                ref file,
                ref pages,
                ref output,
            } => {
                assert_eq!(file, &PathBuf::from("plan.pdf"));
                assert_eq!(pages.as_deref(), Some("1-2"));
                assert!(output.is_none());
            }
            _ => panic!("expected Tokens subcommand"),
        }
    }
}
