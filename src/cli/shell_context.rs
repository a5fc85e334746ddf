use crate::{
    config::{Config, ConfigManager},
    core::ClassBook,
    storage::JsonStore,
};

use super::registry::CommandRegistry;

pub struct ShellContext {
    pub registry: CommandRegistry,
    pub book: ClassBook,
    pub store: JsonStore,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub running: bool,
}
