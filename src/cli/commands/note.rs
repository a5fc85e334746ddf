use crate::cli::core::{parse_slot, require_args, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;

const USAGE: &str = "note add <class> <slot> <text>
note remove <class> <slot> <text>
note student-add <class> <slot> <student> <text>
note student-remove <class> <slot> <student> <text>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "note",
        "Attach or remove notes on a month or a student",
        USAGE,
        cmd_note,
    )]
}

fn cmd_note(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: note <add|remove|student-add|student-remove>".into(),
        ));
    }

    let rest = &args[1..];
    match args[0].to_lowercase().as_str() {
        "add" => handle_add(context, rest),
        "remove" | "delete" => handle_remove(context, rest),
        "student-add" => handle_student_add(context, rest),
        "student-remove" | "student-delete" => handle_student_remove(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown note subcommand `{}`",
            other
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 3, "note add <class> <slot> <text>")?;
    let slot = parse_slot(args[1])?;
    context.book.add_bucket_note(args[0], slot, args[2])?;
    io::print_success(format!("Note added to `{}` ({}).", args[0], slot));
    Ok(())
}

fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 3, "note remove <class> <slot> <text>")?;
    let slot = parse_slot(args[1])?;
    let removed = context.book.delete_bucket_note(args[0], slot, args[2])?;
    report_removed(removed);
    Ok(())
}

fn handle_student_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 4, "note student-add <class> <slot> <student> <text>")?;
    let slot = parse_slot(args[1])?;
    context.book.add_student_note(args[0], slot, args[2], args[3])?;
    io::print_success(format!("Note added for `{}`.", args[2]));
    Ok(())
}

fn handle_student_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 4, "note student-remove <class> <slot> <student> <text>")?;
    let slot = parse_slot(args[1])?;
    let removed = context.book.delete_student_note(args[0], slot, args[2], args[3])?;
    report_removed(removed);
    Ok(())
}

fn report_removed(removed: usize) {
    if removed == 0 {
        io::print_warning("No matching note.");
    } else {
        io::print_success(format!("Removed {} note(s).", removed));
    }
}
