//! Line-oriented front end. Interactive sessions read through `rustyline`;
//! script sessions read stdin. Both feed the same loop.

use std::io::{self, BufRead, Lines};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;
use tracing::debug;

use crate::cli::core::{CliError, CommandError, LoopControl, ShellContext};
use crate::cli::io as cli_io;
use crate::cli::output::{self, OutputPreferences};
use crate::cli::registry::CommandRegistry;

const SCRIPT_ENV: &str = "CLASS_BOOK_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mut context = ShellContext::new()?;
    if std::env::var_os(SCRIPT_ENV).is_some() {
        output::set_preferences(OutputPreferences {
            plain: true,
            quiet_mode: false,
        });
        let stdin = io::stdin();
        return drive(&mut context, &mut ScriptSource::new(stdin.lock()));
    }

    context.announce_rotation();
    let mut source = ReadlineSource::new(&context.registry)?;
    cli_io::print_info("Type `help` to list commands, `exit` to quit.");
    drive(&mut context, &mut source)
}

/// Supplies raw input lines to the shell loop.
trait LineSource {
    /// `Ok(None)` ends the session.
    fn next_line(&mut self, prompt: &str) -> Result<Option<String>, CliError>;
}

struct ReadlineSource {
    editor: Editor<CommandHelper, DefaultHistory>,
}

impl ReadlineSource {
    fn new(registry: &CommandRegistry) -> Result<Self, CliError> {
        let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
        editor.set_helper(Some(CommandHelper::new(registry)));
        editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
        Ok(Self { editor })
    }
}

impl LineSource for ReadlineSource {
    fn next_line(&mut self, prompt: &str) -> Result<Option<String>, CliError> {
        loop {
            match self.editor.readline(prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        self.editor.add_history_entry(line.trim()).ok();
                    }
                    return Ok(Some(line));
                }
                Err(ReadlineError::Interrupted) => {
                    cli_io::print_hint("Type `exit` or press Ctrl-D to quit.");
                }
                Err(ReadlineError::Eof) => {
                    cli_io::print_info("Exiting shell.");
                    return Ok(None);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

struct ScriptSource<R> {
    lines: Lines<R>,
}

impl<R: BufRead> ScriptSource<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

impl<R: BufRead> LineSource for ScriptSource<R> {
    fn next_line(&mut self, _prompt: &str) -> Result<Option<String>, CliError> {
        self.lines.next().transpose().map_err(CliError::from)
    }
}

/// Runs lines until the source is exhausted or a command asks to exit.
/// Blank lines and `#` comments are skipped. A failing command is reported
/// and the loop carries on.
fn drive(context: &mut ShellContext, source: &mut dyn LineSource) -> Result<(), CliError> {
    let mut line_no = 0usize;
    while context.running {
        let Some(line) = source.next_line(&context.prompt())? else {
            break;
        };
        line_no += 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Err(err) = handle_line(context, line) {
            debug!(line_no, "command failed");
            context.report_error(err)?;
        }
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<(), CommandError> {
    let tokens = parse_command_line(line)?;
    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(());
    };
    let command = raw.to_lowercase();
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    debug!(command = %command, args = args.len(), "dispatching");

    if context.dispatch(&command, raw, &args)? == LoopControl::Exit {
        context.running = false;
    }
    Ok(())
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, CommandError> {
    split(input).map_err(|err| {
        CommandError::InvalidArguments(format!("could not read `{}`: {}", input, err))
    })
}

/// Completes the command word, then the subcommand word. Later arguments are
/// free text.
struct CommandHelper {
    commands: Vec<(&'static str, Vec<&'static str>)>,
}

impl CommandHelper {
    fn new(registry: &CommandRegistry) -> Self {
        Self {
            commands: registry
                .entries()
                .iter()
                .map(|entry| (entry.name, entry.subcommands()))
                .collect(),
        }
    }

    fn candidates(&self, words_before: &[&str]) -> Vec<&'static str> {
        match words_before {
            [] => self.commands.iter().map(|(name, _)| *name).collect(),
            [command] => self
                .commands
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(command))
                .map(|(_, subcommands)| subcommands.clone())
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }
}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let head = &line[..pos];
        let start = head.rfind(char::is_whitespace).map_or(0, |idx| idx + 1);
        let needle = head[start..].to_lowercase();
        let words_before: Vec<&str> = head[..start].split_whitespace().collect();

        let pairs = self
            .candidates(&words_before)
            .into_iter()
            .filter(|word| word.starts_with(&needle))
            .map(|word| Pair {
                display: word.to_string(),
                replacement: word.to_string(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {}

impl Validator for CommandHelper {}

impl Helper for CommandHelper {}
