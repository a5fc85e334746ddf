use crate::cli::core::{
    parse_amount, parse_slot_or_current, require_args, CommandError, CommandResult, ShellContext,
};
use crate::cli::io;
use crate::cli::output::{format_amount, section as output_section};
use crate::cli::registry::CommandEntry;

const USAGE: &str = "class add <name> <fee-per-session>
class list
class show <name> [slot]
class edit <name> <new-name> <fee-per-session>
class remove <name>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "class",
        "Create, inspect, edit, and remove classes",
        USAGE,
        cmd_class,
    )]
}

fn cmd_class(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: class <add|list|show|edit|remove>".into(),
        ));
    }

    match args[0].to_lowercase().as_str() {
        "add" => handle_add(context, &args[1..]),
        "list" => handle_list(context),
        "show" => handle_show(context, &args[1..]),
        "edit" => handle_edit(context, &args[1..]),
        "remove" | "delete" => handle_remove(context, &args[1..]),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown class subcommand `{}`",
            other
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 2, "class add <name> <fee-per-session>")?;
    let fee = parse_amount(args[1])?;
    context.book.create_class(args[0], fee)?;
    io::print_success(format!(
        "Class `{}` created at {} per session.",
        args[0].trim(),
        format_amount(fee)
    ));
    Ok(())
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    let classes = context.book.list_classes()?;
    if classes.is_empty() {
        io::print_info("No classes yet. Use `class add <name> <fee>` to create one.");
        return Ok(());
    }
    output_section("Classes");
    for class in &classes {
        io::print_info(format!(
            "  {:<20} {:>12}/session  {:>3} student(s)  [{}]",
            class.name,
            format_amount(class.fee_per_session()),
            class.current().students.len(),
            class.rotation_tag
        ));
    }
    Ok(())
}

fn handle_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 1, "class show <name> [slot]")?;
    let slot = parse_slot_or_current(args.get(1))?;
    let Some(class) = context.book.get_class(args[0])? else {
        return Err(CommandError::Message(format!("Class `{}` not found", args[0])));
    };

    let bucket = class.bucket(slot);
    output_section(format!("{} ({}, {})", class.name, slot, class.rotation_tag));
    io::print_info(format!(
        "  Fee per session: {}",
        format_amount(bucket.fee_per_session)
    ));
    if bucket.students.is_empty() {
        io::print_info("  No students in this month.");
    }
    for student in &bucket.students {
        io::print_info(format!(
            "  {:<20} {:>3} session(s)  accrued {:>12}  materials {:>10}  total {:>12}",
            student.name,
            student.attendance_count(),
            format_amount(student.accrued_fee),
            format_amount(student.materials_fee),
            format_amount(student.total_owed())
        ));
    }
    for note in &bucket.notes {
        io::print_info(format!("  note: {}", note));
    }
    Ok(())
}

fn handle_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 3, "class edit <name> <new-name> <fee-per-session>")?;
    let fee = parse_amount(args[2])?;
    context.book.update_class(args[0], args[1], fee)?;
    io::print_success(format!("Class `{}` updated.", args[1].trim()));
    Ok(())
}

fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 1, "class remove <name>")?;
    if context.book.delete_class(args[0])? {
        io::print_success(format!("Class `{}` removed.", args[0]));
    } else {
        io::print_warning(format!("No class named `{}`.", args[0]));
    }
    Ok(())
}
