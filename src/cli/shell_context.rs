use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    core::movie_manager::MovieManager,
    metadata::MetadataClient,
    storage::StorageKind,
};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Launch-time overrides taken from the command line. They win over the
/// persisted configuration for this session only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub storage: Option<StorageKind>,
    pub omdb_api_key: Option<String>,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub manager: MovieManager,
    pub metadata: Option<Box<dyn MetadataClient>>,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn has_metadata(&self) -> bool {
        self.metadata.is_some()
    }
}
