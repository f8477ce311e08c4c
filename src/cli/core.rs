//! Core CLI loop, dispatch, and shell context helpers.

use std::{env, io};

use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use tracing::debug;

use crate::{
    config::{Config, ConfigError, ConfigManager},
    core::errors::MovieError,
    core::movie_manager::MovieManager,
    domain::{Displayable, Movie},
    errors::StoreError,
    metadata::{MetadataClient, MetadataError, OmdbClient},
    storage::open_store,
};
pub use crate::core::errors::CliError;

use super::commands;
use super::help;
use super::io as cli_io;
use super::output;
use super::registry::{CommandEntry, CommandRegistry};
use super::test_mode;
pub use crate::cli::shell_context::{CliMode, CliOptions, ShellContext};

pub const OMDB_KEY_ENV: &str = "MOVIE_CORE_OMDB_KEY";
pub const EMPTY_COLLECTION: &str = "No movies in the database. Add some movies first.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    pub fn new(mode: CliMode, options: CliOptions) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let mut config = config_manager.load()?;
        if let Some(kind) = options.storage {
            config.storage = kind;
        }

        let storage_config = config.storage_config(config_manager.base_dir());
        let store = open_store(&storage_config)?;
        let manager = MovieManager::new(store)?;

        let api_key = options
            .omdb_api_key
            .or_else(|| env::var(OMDB_KEY_ENV).ok())
            .or_else(|| config.omdb_api_key.clone());
        let metadata = build_metadata(api_key.as_deref()).map_err(MovieError::from)?;

        Ok(Self::from_parts(
            mode,
            manager,
            metadata,
            config_manager,
            config,
        ))
    }

    pub fn from_parts(
        mode: CliMode,
        manager: MovieManager,
        metadata: Option<Box<dyn MetadataClient>>,
        config_manager: ConfigManager,
        config: Config,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        Self {
            mode,
            registry,
            manager,
            metadata,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            last_command: None,
            running: true,
        }
    }

    pub(crate) fn mode(&self) -> CliMode {
        self.mode
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn prompt(&self) -> String {
        help::menu_prompt(&self.registry)
    }

    /// True when a prompt can be answered, by a person or by scripted input.
    pub(crate) fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive || test_mode::is_enabled()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            debug!(command, args = args.len(), "dispatching command");
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Invalid choice `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit the movie database?", true)
            .map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                cli_io::print_info("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Core(MovieError::Storage(err)) => {
                self.print_error(&format!("Could not access the movie file: {err}"));
                Ok(())
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        cli_io::print_error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }

    /// Prints the empty-collection notice and returns false when there is
    /// nothing to work on.
    pub(crate) fn require_movies(&self) -> bool {
        if self.manager.is_empty() {
            cli_io::print_info(EMPTY_COLLECTION);
            false
        } else {
            true
        }
    }

    pub(crate) fn print_movies<'a>(&self, movies: impl IntoIterator<Item = &'a Movie>) {
        let mut printed = false;
        for movie in movies {
            output::plain(movie.display_label());
            printed = true;
        }
        if !printed {
            output::plain("No movies found.");
        }
    }

    /// Re-prompts until `parse` accepts the answer.
    pub(crate) fn prompt_until<T>(
        &self,
        label: &str,
        parse: impl Fn(&str) -> Result<T, String>,
    ) -> Result<T, CommandError> {
        loop {
            let raw = cli_io::prompt_text(&self.theme, label)?;
            match parse(&raw) {
                Ok(value) => return Ok(value),
                Err(message) => cli_io::print_warning(message),
            }
        }
    }

    /// Parses `arg` when given, otherwise prompts. Without a way to prompt
    /// the usage string is returned as an argument error.
    pub(crate) fn arg_or_prompt<T>(
        &self,
        arg: Option<&str>,
        label: &str,
        usage: &str,
        parse: impl Fn(&str) -> Result<T, String>,
    ) -> Result<T, CommandError> {
        match arg {
            Some(raw) => parse(raw).map_err(CommandError::InvalidArguments),
            None if self.can_prompt() => self.prompt_until(label, parse),
            None => Err(CommandError::InvalidArguments(format!("usage: {usage}"))),
        }
    }

    /// Asks a yes/no question, answering `default` when prompting is impossible.
    pub(crate) fn confirm(&self, question: &str, default: bool) -> Result<bool, CommandError> {
        if !self.can_prompt() {
            return Ok(default);
        }
        cli_io::confirm_action(&self.theme, question, default)
    }

    pub(crate) fn show_config(&self) -> CommandResult {
        output::section("Configuration");
        for (key, value) in self.config.entries() {
            cli_io::print_info(format!("  {:<13}: {}", key, value));
        }
        cli_io::print_info(format!(
            "  {:<13}: {}",
            "active store",
            self.manager.path().display()
        ));
        cli_io::print_info(format!(
            "  {:<13}: {}",
            "config file",
            self.config_manager.path().display()
        ));
        Ok(())
    }

    pub(crate) fn set_config_value(&mut self, key: &str, value: &str) -> CommandResult {
        let mut updated = self.config.clone();
        updated.set(key, value)?;
        self.config_manager.save(&updated)?;
        self.config = updated;
        cli_io::print_success(format!("Updated `{key}`."));

        match key {
            "storage" | "data_file" | "separator" => {
                cli_io::print_info("Storage changes take effect on next launch.");
            }
            "omdb_api_key" => {
                self.metadata = build_metadata(self.config.omdb_api_key.as_deref())?;
            }
            _ => {}
        }
        Ok(())
    }
}

fn build_metadata(api_key: Option<&str>) -> Result<Option<Box<dyn MetadataClient>>, MetadataError> {
    match api_key.map(str::trim).filter(|key| !key.is_empty()) {
        Some(key) => Ok(Some(Box::new(OmdbClient::new(key)?))),
        None => Ok(None),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] MovieError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<StoreError> for CommandError {
    fn from(err: StoreError) -> Self {
        CommandError::Core(MovieError::from(err))
    }
}

impl From<MetadataError> for CommandError {
    fn from(err: MetadataError) -> Self {
        CommandError::Core(MovieError::from(err))
    }
}

impl From<ConfigError> for CommandError {
    fn from(err: ConfigError) -> Self {
        CommandError::Core(MovieError::from(err))
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

#[cfg(test)]
pub(crate) fn process_script(
    app: &mut ShellContext,
    lines: &[&str],
) -> Result<LoopControl, CommandError> {
    for line in lines {
        if let LoopControl::Exit = app.process_line(line)? {
            return Ok(LoopControl::Exit);
        }
    }
    Ok(LoopControl::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MovieDetails;
    use crate::metadata::MetadataResult;
    use crate::storage::{CsvStorage, JsonStorage, StorageKind};
    use once_cell::sync::Lazy;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Scripted prompt input is process-global.
    static PROMPTS: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    struct FixedMetadata;

    impl MetadataClient for FixedMetadata {
        fn find_by_title(&self, title: &str) -> MetadataResult<Option<MovieDetails>> {
            if title.eq_ignore_ascii_case("heat") {
                Ok(Some(MovieDetails {
                    title: "Heat".into(),
                    year: 1995,
                    rating: 8.3,
                    poster: "https://img/heat.jpg".into(),
                    director: "Michael Mann".into(),
                    ..MovieDetails::default()
                }))
            } else {
                Ok(None)
            }
        }

        fn find_by_id(&self, _id: &str) -> MetadataResult<Option<MovieDetails>> {
            Ok(None)
        }

        fn search(&self, _term: &str) -> MetadataResult<Vec<MovieDetails>> {
            Ok(Vec::new())
        }
    }

    fn context(kind: StorageKind, metadata: Option<Box<dyn MetadataClient>>) -> (TempDir, ShellContext) {
        let temp = TempDir::new().unwrap();
        let store: Box<dyn crate::storage::MovieStore> = match kind {
            StorageKind::Csv => Box::new(CsvStorage::new(temp.path().join("movies.csv"), ",").unwrap()),
            StorageKind::Json => Box::new(JsonStorage::new(temp.path().join("movies.json")).unwrap()),
        };
        let manager = MovieManager::new(store).unwrap();
        let config_manager = ConfigManager::with_base_dir(temp.path()).unwrap();
        let app = ShellContext::from_parts(
            CliMode::Script,
            manager,
            metadata,
            config_manager,
            Config::default(),
        );
        (temp, app)
    }

    fn titles(app: &ShellContext) -> Vec<String> {
        app.manager.movies().iter().map(|m| m.title.clone()).collect()
    }

    #[test]
    fn add_update_delete_through_commands() {
        let _guard = PROMPTS.lock().unwrap_or_else(|e| e.into_inner());
        let (_temp, mut app) = context(StorageKind::Csv, None);
        process_script(
            &mut app,
            &[
                "add \"The Godfather\" 1972 9.2",
                "add Heat 1995 8.3 https://img/heat.jpg",
                "add heat 2000 1.0",
                "update The Godfather 9.5",
                "delete heat",
            ],
        )
        .unwrap();
        assert_eq!(titles(&app), vec!["The Godfather"]);
        assert_eq!(app.manager.movies()[0].rating, 9.5);
        assert_eq!(app.manager.movies()[0].poster, "N/A");
    }

    #[test]
    fn menu_numbers_dispatch_and_zero_exits() {
        let _guard = PROMPTS.lock().unwrap_or_else(|e| e.into_inner());
        let (_temp, mut app) = context(StorageKind::Json, None);
        assert_eq!(app.process_line("1").unwrap(), LoopControl::Continue);
        assert_eq!(app.process_line("5").unwrap(), LoopControl::Continue);
        assert_eq!(app.process_line("0").unwrap(), LoopControl::Exit);
        assert_eq!(app.process_line("exit").unwrap(), LoopControl::Exit);
    }

    #[test]
    fn unknown_command_keeps_loop_running() {
        let _guard = PROMPTS.lock().unwrap_or_else(|e| e.into_inner());
        let (_temp, mut app) = context(StorageKind::Json, None);
        assert_eq!(app.process_line("lsit").unwrap(), LoopControl::Continue);
        assert_eq!(app.process_line("99").unwrap(), LoopControl::Continue);
    }

    #[test]
    fn missing_arguments_without_prompt_report_usage() {
        let _guard = PROMPTS.lock().unwrap_or_else(|e| e.into_inner());
        let (_temp, mut app) = context(StorageKind::Json, None);
        let err = app.process_line("update Heat").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
        let err = app.process_line("add Heat 19x5 8.0").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
        assert!(app.manager.is_empty());
    }

    #[test]
    fn scripted_inputs_answer_prompts() {
        let _guard = PROMPTS.lock().unwrap_or_else(|e| e.into_inner());
        let (_temp, mut app) = context(StorageKind::Json, None);
        test_mode::install_text_inputs(
            ["<BLANK>", "Heat", "abc", "1995", "8.3", "<BLANK>"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        let result = app.process_line("add");
        test_mode::reset_text_inputs();
        result.unwrap();
        assert_eq!(app.manager.movies(), &[Movie::new("Heat", 1995, 8.3, "N/A")]);
    }

    #[test]
    fn add_uses_metadata_lookup_when_only_title_given() {
        let _guard = PROMPTS.lock().unwrap_or_else(|e| e.into_inner());
        let (_temp, mut app) = context(StorageKind::Json, Some(Box::new(FixedMetadata)));
        app.process_line("add heat").unwrap();
        assert_eq!(
            app.manager.movies(),
            &[Movie::new("Heat", 1995, 8.3, "https://img/heat.jpg")]
        );

        let err = app.process_line("add Unknown").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
        assert_eq!(app.manager.movies().len(), 1);
    }

    #[test]
    fn config_set_persists_and_enables_metadata() {
        let _guard = PROMPTS.lock().unwrap_or_else(|e| e.into_inner());
        let (_temp, mut app) = context(StorageKind::Json, None);
        assert!(!app.has_metadata());
        app.process_line("config set omdb_api_key abc").unwrap();
        assert!(app.has_metadata());
        let saved = app.config_manager.load().unwrap();
        assert_eq!(saved.omdb_api_key.as_deref(), Some("abc"));
        assert!(app.process_line("config set colour red").is_err());
    }

    #[test]
    fn website_writes_into_requested_directory() {
        let _guard = PROMPTS.lock().unwrap_or_else(|e| e.into_inner());
        let (temp, mut app) = context(StorageKind::Csv, None);
        let out = temp.path().join("public");
        app.process_line("add Heat 1995 8.3").unwrap();
        app.process_line(&format!("website \"{}\"", out.display()))
            .unwrap();
        assert!(out.join("index.html").is_file());
    }
}
