use crate::cli::core::{require_args, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::config::Config;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change stored preferences",
        "config [show|set <collection_key|backup_retention|date_display_format> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        return show_config(context);
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            require_args(
                args,
                3,
                "config set <collection_key|backup_retention|date_display_format> <value>",
            )?;
            let value = args[2..].join(" ");
            set_config_value(context, args[1], value.trim())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config subcommand `{}`",
            other
        ))),
    }
}

fn show_config(context: &mut ShellContext) -> CommandResult {
    output_section("Configuration");
    io::print_info(format!("  collection_key      : {}", context.config.collection_key));
    io::print_info(format!("  backup_retention    : {}", context.config.backup_retention));
    io::print_info(format!(
        "  date_display_format : {}",
        context.config.date_display_format
    ));
    io::print_info(format!("  file                : {}", context.config_manager.path().display()));
    Ok(())
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut updated: Config = context.config.clone();
    match key.to_lowercase().as_str() {
        "collection_key" => updated.collection_key = value.to_string(),
        "backup_retention" => {
            updated.backup_retention = value.parse().map_err(|_| {
                CommandError::InvalidArguments(format!(
                    "backup_retention must be a whole number, got `{}`",
                    value
                ))
            })?;
        }
        "date_display_format" => updated.date_display_format = value.to_string(),
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown config key `{}`",
                other
            )))
        }
    }

    context.config_manager.save(&updated)?;
    context.config = updated;
    context.reload()?;
    io::print_success(format!("Set {} = {}", key, value));
    Ok(())
}
