pub mod attendance;
pub mod backup;
pub mod class;
pub mod config;
pub mod note;
pub mod student;
pub mod system;

use crate::cli::registry::CommandEntry;

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(system::definitions());
    commands.extend(class::definitions());
    commands.extend(student::definitions());
    commands.extend(attendance::definitions());
    commands.extend(note::definitions());
    commands.extend(backup::definitions());
    commands.extend(config::definitions());
    commands
}
