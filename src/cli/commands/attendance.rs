use crate::cli::core::{
    parse_date, parse_slot, require_args, CommandError, CommandResult, ShellContext,
};
use crate::cli::io;
use crate::cli::registry::CommandEntry;

const USAGE: &str = "attend add <class> <slot> <student> <YYYY-MM-DD>
attend remove <class> <slot> <student> <YYYY-MM-DD>
attend today <class> <student> [on|off]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "attend",
        "Record or clear session attendance",
        USAGE,
        cmd_attend,
    )]
}

fn cmd_attend(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: attend <add|remove|today>".into(),
        ));
    }

    let rest = &args[1..];
    match args[0].to_lowercase().as_str() {
        "add" => handle_add(context, rest),
        "remove" | "delete" => handle_remove(context, rest),
        "today" => handle_today(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown attend subcommand `{}`",
            other
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 4, "attend add <class> <slot> <student> <YYYY-MM-DD>")?;
    let slot = parse_slot(args[1])?;
    let date = parse_date(args[3])?;
    if context.book.add_attendance(args[0], slot, args[2], date)? {
        io::print_success(format!("Marked `{}` present on {}.", args[2], date));
    } else {
        io::print_info(format!("`{}` was already marked on {}.", args[2], date));
    }
    Ok(())
}

fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 4, "attend remove <class> <slot> <student> <YYYY-MM-DD>")?;
    let slot = parse_slot(args[1])?;
    let date = parse_date(args[3])?;
    if context.book.remove_attendance(args[0], slot, args[2], date)? {
        io::print_success(format!("Cleared {} for `{}`.", date, args[2]));
    } else {
        io::print_info(format!("`{}` had no session on {}.", args[2], date));
    }
    Ok(())
}

fn handle_today(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 2, "attend today <class> <student> [on|off]")?;
    let checked = match args.get(2).map(|value| value.to_lowercase()) {
        None => true,
        Some(value) => match value.as_str() {
            "on" | "yes" | "true" => true,
            "off" | "no" | "false" => false,
            other => {
                return Err(CommandError::InvalidArguments(format!(
                    "expected `on` or `off`, got `{}`",
                    other
                )))
            }
        },
    };
    let today = context.book.today();
    let changed = context.book.toggle_today(args[0], args[1], checked)?;
    let state = if checked { "present" } else { "absent" };
    if changed {
        io::print_success(format!("`{}` marked {} for {}.", args[1], state, today));
    } else {
        io::print_info(format!("`{}` already {} for {}.", args[1], state, today));
    }
    Ok(())
}
