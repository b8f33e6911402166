use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand, ValueEnum, ValueHint};
use liftlog_domain::ImportMethod;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(version, about = "Import and browse a handwritten workout log")]
pub struct Cli {
    /// Settings file (defaults to the platform configuration directory)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Data file, overrides the settings
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub data: Option<PathBuf>,

    /// Increase log verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Import an exported workout log
    Import {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        #[arg(short, long, value_enum, default_value_t = Method::Html)]
        method: Method,
    },
    /// List all imports
    Imports,
    /// Delete an import and all of its records
    DeleteImport {
        #[arg(value_parser = parse_uuid)]
        id: Uuid,
    },
    /// List all exercises
    Exercises,
    /// Show the sets of an exercise per day
    Log { exercise: String },
    /// Show the training arcs of an exercise
    Arcs {
        exercise: String,
        /// Number of days without training that separates two arcs
        #[arg(short, long, value_parser = clap::value_parser!(i64).range(1..))]
        separator: Option<i64>,
        /// Arcs with at most this many training days are hidden, except the latest one
        #[arg(short = 'l', long)]
        min_length: Option<usize>,
    },
    /// Manage exercise aliases
    Aliases {
        #[command(subcommand)]
        command: AliasesCommand,
    },
    /// Expand a sets string into individual sets
    Parse {
        sets: String,
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Replace the sets string of a record
    Edit {
        #[arg(value_parser = parse_uuid)]
        id: Uuid,
        sets: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AliasesCommand {
    /// Print the current alias definitions
    Show,
    /// Replace the alias definitions by the content of a file
    Set {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Html,
    AppleNotes,
}

impl From<Method> for ImportMethod {
    fn from(value: Method) -> Self {
        match value {
            Method::Html => ImportMethod::Html,
            Method::AppleNotes => ImportMethod::AppleNotes,
        }
    }
}

fn parse_uuid(value: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value.trim()).map_err(|err| err.to_string())
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{value}', expected YYYY-MM-DD"))
}
