//! Dispatch, error reporting, and argument helpers shared by all commands.

use std::{io, path::PathBuf};

use chrono::NaiveDate;
use strsim::levenshtein;

use crate::{
    config::ConfigManager,
    core::ClassBook,
    domain::{BucketSlot, SystemClock},
    errors::ClassBookError,
    storage::JsonStore,
    utils::parse,
};

use super::commands;
use super::io as cli_io;
use super::registry::{CommandEntry, CommandRegistry};
pub use super::shell_context::ShellContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] ClassBookError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Core(#[from] ClassBookError),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CliError> for CommandError {
    fn from(err: CliError) -> Self {
        match err {
            CliError::Core(inner) => CommandError::Core(inner),
            CliError::Input(message) | CliError::Command(message) => {
                CommandError::InvalidArguments(message)
            }
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl ShellContext {
    pub fn new() -> Result<Self, CliError> {
        Self::from_config_manager(ConfigManager::new()?)
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, CliError> {
        Self::from_config_manager(ConfigManager::with_base_dir(base)?)
    }

    fn from_config_manager(config_manager: ConfigManager) -> Result<Self, CliError> {
        let config = config_manager.load()?;
        let store = JsonStore::new(
            Some(config_manager.base_dir().to_path_buf()),
            Some(config.backup_retention),
        )?;
        let book = ClassBook::with_config(Box::new(store.clone()), Box::new(SystemClock), &config);

        Ok(Self {
            registry: CommandRegistry::from_entries(commands::all_definitions()),
            book,
            store,
            config_manager,
            config,
            running: true,
        })
    }

    /// Rebuilds store and facade after the config changed.
    pub(crate) fn reload(&mut self) -> Result<(), CommandError> {
        self.store = JsonStore::new(
            Some(self.config_manager.base_dir().to_path_buf()),
            Some(self.config.backup_retention),
        )?;
        self.book = ClassBook::with_config(
            Box::new(self.store.clone()),
            Box::new(SystemClock),
            &self.config,
        );
        Ok(())
    }

    /// Rotates at start-up and tells the user which classes moved on.
    pub(crate) fn announce_rotation(&self) {
        match self.book.rotate() {
            Ok(report) if !report.is_empty() => cli_io::print_info(format!(
                "Started {} for: {}",
                report.today,
                report.rotated.join(", ")
            )),
            Ok(_) => {}
            Err(err) => cli_io::print_warning(format!("Could not rotate classes: {}", err)),
        }
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.find(name)
    }

    pub(crate) fn prompt(&self) -> String {
        "class-book> ".to_string()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.find(command).map(|entry| entry.handler) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = crate::cli::shell::parse_command_line(line)?;
        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                self.print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Core(ClassBookError::Storage(message)) => {
                self.print_error(&format!("Persistence error: {}", message));
                self.print_hint("Nothing was saved. Check the data directory and retry.");
                Ok(())
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        cli_io::print_error(message);
    }

    pub(crate) fn print_hint(&self, message: &str) {
        cli_io::print_hint(message);
    }
}

/// Fails with the command's usage line when fewer than `min` args were given.
pub(crate) fn require_args(args: &[&str], min: usize, usage: &str) -> Result<(), CommandError> {
    if args.len() < min {
        Err(CommandError::InvalidArguments(format!("usage: {}", usage)))
    } else {
        Ok(())
    }
}

pub(crate) fn parse_slot(input: &str) -> Result<BucketSlot, CommandError> {
    input
        .parse::<BucketSlot>()
        .map_err(|err| CommandError::InvalidArguments(err.to_string()))
}

/// Parses an optional trailing slot argument, defaulting to the current month.
pub(crate) fn parse_slot_or_current(input: Option<&&str>) -> Result<BucketSlot, CommandError> {
    match input {
        Some(value) => parse_slot(value),
        None => Ok(BucketSlot::Current),
    }
}

pub(crate) fn parse_amount(input: &str) -> Result<f64, CommandError> {
    parse::parse_amount(input).map_err(|err| CommandError::InvalidArguments(err.to_string()))
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, CommandError> {
    parse::parse_date(input).map_err(|_| {
        CommandError::InvalidArguments(format!("invalid date `{}` (use YYYY-MM-DD)", input))
    })
}

#[cfg(test)]
pub(crate) fn process_script(
    base: PathBuf,
    lines: &[&str],
) -> Result<ShellContext, CliError> {
    let mut app = ShellContext::with_base_dir(base)?;
    for line in lines {
        match app.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn script_builds_a_class_and_records_attendance() {
        let temp = tempdir().unwrap();
        let app = process_script(
            temp.path().to_path_buf(),
            &[
                "class add Math-101 100,000",
                "student add Math-101 An 0901",
                "attend add Math-101 current An 2024-05-01",
                "attend add Math-101 current An 2024-05-03",
            ],
        )
        .unwrap();

        let detail = app
            .book
            .student_detail("Math-101", "An", BucketSlot::Current)
            .unwrap()
            .unwrap();
        assert_eq!(detail.count, 2);
        assert_eq!(detail.accrued_fee, 200_000.0);
        assert_eq!(detail.mobile.as_deref(), Some("0901"));
    }

    #[test]
    fn duplicate_class_surfaces_core_error() {
        let temp = tempdir().unwrap();
        let err = process_script(
            temp.path().to_path_buf(),
            &["class add Art 10", "class add Art 20"],
        )
        .err()
        .expect("duplicate should fail");
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn unknown_command_does_not_fail() {
        let temp = tempdir().unwrap();
        let app = process_script(temp.path().to_path_buf(), &["clas list"]).unwrap();
        assert!(app.running);
    }

    #[test]
    fn exit_stops_processing() {
        let temp = tempdir().unwrap();
        let app = process_script(
            temp.path().to_path_buf(),
            &["exit", "class add Art 10"],
        )
        .unwrap();
        assert!(app.book.list_classes().unwrap().is_empty());
    }

    #[test]
    fn bad_arguments_are_rejected() {
        assert!(matches!(
            parse_amount("-5"),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(matches!(
            parse_date("05/01/2024"),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(matches!(
            parse_slot("seven-ago"),
            Err(CommandError::InvalidArguments(_))
        ));
        assert_eq!(parse_slot_or_current(None).unwrap(), BucketSlot::Current);
        assert!(require_args(&["a"], 2, "x <a> <b>").is_err());
    }
}
