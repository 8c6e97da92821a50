//! Command-line entry point for the conference store.
//!
//! # Responsibility
//! - Run one repository operation per invocation against a SQLite file.
//! - Read conference records from JSON files and print results as JSON.
//!
//! Database path and logging come from `CONFITA_*` environment variables.

mod command;

use clap::Parser;
use command::{Cli, Command};
use confita_core::db::{close_db, open_db};
use confita_core::{Conference, ConferenceRepository, CoreConfig, SqliteConferenceRepository};
use log::error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const DEFAULT_DB_FILE_NAME: &str = "confita.sqlite3";

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            error!("event=cli_command module=cli status=error error={message}");
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<String, String> {
    if let Command::Version = command {
        return Ok(confita_core::core_version().to_string());
    }

    let config = CoreConfig::from_env()?;
    config.init_logging()?;

    let db_path = config
        .db_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME));
    let conn = open_db(&db_path).map_err(|err| err.to_string())?;

    let output = {
        let repo = SqliteConferenceRepository::try_new(&conn).map_err(|err| err.to_string())?;
        execute(&repo, command)
    };

    close_db(conn).map_err(|err| err.to_string())?;
    output
}

fn execute<R: ConferenceRepository>(repo: &R, command: Command) -> Result<String, String> {
    match command {
        Command::List { owner } => {
            let conferences = match owner {
                Some(owner) => repo.list_conferences(&owner),
                None => repo.list_global_conferences(),
            }
            .map_err(|err| err.to_string())?;
            to_json(&conferences)
        }
        Command::Get { id } => {
            // Absence prints `null`, like `false` from update and delete.
            let conference = repo.get_conference(&id).map_err(|err| err.to_string())?;
            to_json(&conference)
        }
        Command::Add { file } => {
            let conference = read_conference(&file)?;
            let added = repo
                .add_conference(&conference)
                .map_err(|err| err.to_string())?;
            Ok(added.to_string())
        }
        Command::Update { id, file } => {
            let conference = read_conference(&file)?;
            let updated = repo
                .update_conference(&id, &conference)
                .map_err(|err| err.to_string())?;
            Ok(updated.to_string())
        }
        Command::Delete { id } => {
            let deleted = repo
                .delete_conference_by_id(&id)
                .map_err(|err| err.to_string())?;
            Ok(deleted.to_string())
        }
        Command::Version => Ok(confita_core::core_version().to_string()),
    }
}

fn read_conference(path: &Path) -> Result<Conference, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
    serde_json::from_str(&text)
        .map_err(|err| format!("invalid conference JSON in `{}`: {err}", path.display()))
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|err| format!("failed to encode JSON: {err}"))
}
