#![warn(clippy::pedantic)]

mod cli;
mod log;
mod settings;

use std::fs;

use ::log::{Level, debug};
use anyhow::{Context, Result, bail};
use chrono::{Duration, Local};
use clap::Parser;
use liftlog_domain::{self as domain, DailySetsID, ImportID, Service};
use liftlog_storage::JsonFileStorage;

use crate::{
    cli::{AliasesCommand, Cli, Command},
    settings::Settings,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(data) = cli.data.clone() {
        settings.data_file = Some(data);
    }

    crate::log::init(settings.level_filter(cli.verbose))
        .context("failed to initialize logging")?;

    let data_file = settings.data_file()?;
    debug!("using {}", data_file.display());
    let storage = JsonFileStorage::open(&data_file)
        .with_context(|| format!("failed to open {}", data_file.display()))?;

    run(cli.command, &settings, &Service::new(storage))
}

fn run(command: Command, settings: &Settings, service: &Service<JsonFileStorage>) -> Result<()> {
    match command {
        Command::Import { file, method } => {
            let content = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let warnings = crate::log::count(Level::Warn);
            let imported = service.import_log(&content, method.into())?;
            println!(
                "{} ({}): {} records, {} invalid, {} warnings",
                imported.name,
                imported.id,
                imported.daily_sets.len(),
                imported.invalid_count(),
                crate::log::count(Level::Warn).saturating_sub(warnings)
            );
        }
        Command::Imports => {
            for import in service.get_imports()? {
                println!("{}  {}", import.id, import.name);
            }
        }
        Command::DeleteImport { id } => {
            let id = service.delete_import(ImportID::from(id)).map_err(|err| match err {
                domain::DeleteError::NotFound => anyhow::anyhow!("no import with id {id}"),
                err => err.into(),
            })?;
            println!("deleted import {id}");
        }
        Command::Exercises => {
            for exercise in service.get_exercises()? {
                println!("{exercise}");
            }
        }
        Command::Log { exercise } => {
            let log = service.get_exercise_log(&exercise)?;
            if log.is_empty() {
                bail!("no sets found for '{exercise}'");
            }
            println!("{log}");
        }
        Command::Arcs {
            exercise,
            separator,
            min_length,
        } => {
            let separator = separator.map_or_else(|| settings.separator(), Duration::days);
            let min_length = min_length.unwrap_or(settings.min_arc_length);
            let arcs = service
                .get_arcs(&exercise, separator, min_length)
                .map_err(|err| match err {
                    domain::ReadError::NotFound => anyhow::anyhow!("unknown exercise '{exercise}'"),
                    err => err.into(),
                })?;
            print_arcs(&arcs);
        }
        Command::Aliases { command } => match command {
            AliasesCommand::Show => print!("{}", service.get_alias_source()?),
            AliasesCommand::Set { file } => {
                let source = fs::read_to_string(&file)
                    .with_context(|| format!("failed to read {}", file.display()))?;
                let aliases = domain::parse_alias_file(&source);
                let renamed = service.replace_aliases(source)?;
                println!(
                    "{} aliases for {} exercises, {renamed} records renamed",
                    aliases.len(),
                    aliases.canonical_names().len()
                );
            }
        },
        Command::Parse { sets, date } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let (sets_string, comments) = domain::sanitize_sets(&sets);
            println!("sets string: {sets_string}");
            if !comments.is_empty() {
                println!("comments: {comments}");
            }
            if !domain::is_valid(&sets_string) {
                println!("invalid sets string");
            }
            for set in domain::parse_sets("", &sets_string, date) {
                let partial = if set.partial_reps { " (partial)" } else { "" };
                println!("{}{partial}", set.simple_str());
            }
        }
        Command::Edit { id, sets } => {
            let daily_sets = service
                .edit_sets_string(DailySetsID::from(id), &sets)
                .map_err(|err| match err {
                    domain::UpdateError::NotFound => anyhow::anyhow!("no record with id {id}"),
                    err => err.into(),
                })?;
            println!(
                "{} {}: {}{}",
                daily_sets.date,
                daily_sets.exercise,
                daily_sets.sets_string,
                if daily_sets.is_valid { "" } else { " (invalid)" }
            );
        }
    }

    Ok(())
}

fn print_arcs(arcs: &[domain::ExerciseArc]) {
    for (i, arc) in arcs.iter().enumerate() {
        if let (Some(begin), Some(end)) = (arc.begin(), arc.end()) {
            println!("Arc {}: {begin} to {end} ({} days)", i + 1, arc.len());
        }
        for daily_sets in &arc.daily_sets {
            let cell = domain::format_for_cell(&daily_sets.sets_string);
            let mut lines = cell.lines();
            println!(
                "  {}  {}  {}",
                daily_sets.date,
                daily_sets.id,
                lines.next().unwrap_or_default()
            );
            for line in lines {
                println!("  {:10}  {:36}  {line}", "", "");
            }
            if !daily_sets.comments.is_empty() {
                println!("  {:10}  {:36}  # {}", "", "", daily_sets.comments);
            }
        }
    }
}
