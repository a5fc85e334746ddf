use crate::cli::core::{require_args, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;

const USAGE: &str = "backup list
backup restore <name>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "backup",
        "List or restore earlier versions of the class collection",
        USAGE,
        cmd_backup,
    )]
}

fn cmd_backup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("list") {
        return handle_list(context);
    }

    match args[0].to_lowercase().as_str() {
        "restore" => handle_restore(context, &args[1..]),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown backup subcommand `{}`",
            other
        ))),
    }
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    let backups = context.store.list_backups(&context.config.collection_key)?;
    if backups.is_empty() {
        io::print_warning("No backups found.");
        return Ok(());
    }
    output_section("Backups (newest first)");
    for name in backups {
        io::print_info(format!("  {}", name));
    }
    Ok(())
}

fn handle_restore(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 1, "backup restore <name>")?;
    let classes = context
        .store
        .restore_backup(&context.config.collection_key, args[0])?;
    io::print_success(format!(
        "Restored `{}` ({} class(es)).",
        args[0],
        classes.len()
    ));
    Ok(())
}
