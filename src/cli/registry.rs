use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// One top-level shell command. `usage` holds one line per form, each
/// starting with the command word.
pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }

    /// Subcommand words named by the usage lines, in first-seen order.
    /// Placeholders such as `<name>` or `[slot]` are not subcommands.
    pub fn subcommands(&self) -> Vec<&'static str> {
        let mut words = Vec::new();
        for word in self
            .usage
            .lines()
            .filter_map(|line| line.split_whitespace().nth(1))
        {
            let is_word = word.chars().all(|c| c.is_ascii_lowercase() || c == '-');
            if is_word && !words.contains(&word) {
                words.push(word);
            }
        }
        words
    }
}

/// Shell commands in the order they were registered.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    pub fn from_entries(entries: impl IntoIterator<Item = CommandEntry>) -> Self {
        let mut registry = Self::default();
        for entry in entries {
            registry.register(entry);
        }
        registry
    }

    /// Adds `entry`. A later entry with the same name replaces the earlier one
    /// but keeps its position.
    pub fn register(&mut self, entry: CommandEntry) {
        match self.entries.iter_mut().find(|known| known.name == entry.name) {
            Some(slot) => *slot = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn find(&self, name: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }
}
