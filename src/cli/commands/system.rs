use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new(
            "rotate",
            "Advance every class window to the current month",
            "rotate",
            cmd_rotate,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_version(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output_section(format!("Class Book {}", env!("CARGO_PKG_VERSION")));
    io::print_info(format!("  Data dir     : {}", context.store.base_dir().display()));
    io::print_info(format!("  Config file  : {}", context.config_manager.path().display()));
    io::print_info(format!("  Collection   : {}", context.config.collection_key));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(command) = args.first().map(|name| name.to_lowercase()) {
        if let Some(command) = context.command(&command) {
            help::print_command(command);
        } else {
            context.suggest_command(args[0]);
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_rotate(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let report = context.book.rotate()?;
    if report.is_empty() {
        io::print_info(format!("All classes already on {}.", report.today));
    } else {
        io::print_success(format!(
            "Rotated {} class(es) to {}: {}",
            report.rotated.len(),
            report.today,
            report.rotated.join(", ")
        ));
    }
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
