use crate::cli::core::{
    parse_amount, parse_slot_or_current, require_args, CommandError, CommandResult, ShellContext,
};
use crate::cli::io;
use crate::cli::output::{format_amount, section as output_section};
use crate::cli::registry::CommandEntry;

const USAGE: &str = "student add <class> <name> [mobile]
student show <class> <name> [slot]
student rename <class> <name> <new-name> [slot]
student mobile <class> <name> <mobile|-> [slot]
student materials <class> <name> <amount> [slot]
student fee <class> <name> <amount> [slot]
student remove <class> <name>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "student",
        "Enroll students and edit their monthly records",
        USAGE,
        cmd_student,
    )]
}

fn cmd_student(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: student <add|show|rename|mobile|materials|fee|remove>".into(),
        ));
    }

    let rest = &args[1..];
    match args[0].to_lowercase().as_str() {
        "add" => handle_add(context, rest),
        "show" => handle_show(context, rest),
        "rename" => handle_rename(context, rest),
        "mobile" => handle_mobile(context, rest),
        "materials" => handle_materials(context, rest),
        "fee" => handle_fee(context, rest),
        "remove" | "delete" => handle_remove(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown student subcommand `{}`",
            other
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 2, "student add <class> <name> [mobile]")?;
    let mobile = args.get(2).copied();
    context.book.add_student(args[0], args[1], mobile)?;
    io::print_success(format!(
        "Enrolled `{}` in `{}`.",
        args[1].trim(),
        args[0]
    ));
    Ok(())
}

fn handle_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 2, "student show <class> <name> [slot]")?;
    let slot = parse_slot_or_current(args.get(2))?;
    let Some(detail) = context.book.student_detail(args[0], args[1], slot)? else {
        return Err(CommandError::Message(format!(
            "Student `{}` not found in `{}` ({})",
            args[1], args[0], slot
        )));
    };

    output_section(format!("{} in {} ({})", detail.name, detail.class, detail.slot));
    io::print_info(format!(
        "  Mobile    : {}",
        detail.mobile.as_deref().unwrap_or("-")
    ));
    io::print_info(format!("  Sessions  : {}", detail.count));
    for day in &detail.attendance {
        io::print_info(format!("    {}", day));
    }
    io::print_info(format!("  Accrued   : {}", format_amount(detail.accrued_fee)));
    io::print_info(format!("  Materials : {}", format_amount(detail.materials_fee)));
    io::print_info(format!("  Total     : {}", format_amount(detail.total_owed)));
    for note in &detail.notes {
        io::print_info(format!("  note: {}", note));
    }
    Ok(())
}

fn handle_rename(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 3, "student rename <class> <name> <new-name> [slot]")?;
    let slot = parse_slot_or_current(args.get(3))?;
    context.book.rename_student(args[0], slot, args[1], args[2])?;
    io::print_success(format!("Renamed `{}` to `{}`.", args[1], args[2].trim()));
    Ok(())
}

fn handle_mobile(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 3, "student mobile <class> <name> <mobile|-> [slot]")?;
    let slot = parse_slot_or_current(args.get(3))?;
    let mobile = match args[2] {
        "-" => None,
        value => Some(value),
    };
    context.book.set_mobile(args[0], slot, args[1], mobile)?;
    io::print_success(format!("Updated mobile for `{}`.", args[1]));
    Ok(())
}

fn handle_materials(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 3, "student materials <class> <name> <amount> [slot]")?;
    let slot = parse_slot_or_current(args.get(3))?;
    let amount = parse_amount(args[2])?;
    context.book.set_materials_fee(args[0], slot, args[1], amount)?;
    io::print_success(format!(
        "Materials fee for `{}` set to {}.",
        args[1],
        format_amount(amount)
    ));
    Ok(())
}

fn handle_fee(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 3, "student fee <class> <name> <amount> [slot]")?;
    let slot = parse_slot_or_current(args.get(3))?;
    let amount = parse_amount(args[2])?;
    context.book.set_accrued_fee(args[0], slot, args[1], amount)?;
    io::print_success(format!(
        "Accrued fee for `{}` set to {}.",
        args[1],
        format_amount(amount)
    ));
    Ok(())
}

fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 2, "student remove <class> <name>")?;
    if context.book.delete_student(args[0], args[1])? {
        io::print_success(format!("Removed `{}` from `{}`.", args[1], args[0]));
    } else {
        io::print_warning(format!(
            "No student `{}` in the current month of `{}`.",
            args[1], args[0]
        ));
    }
    Ok(())
}
