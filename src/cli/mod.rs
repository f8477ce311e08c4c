pub mod commands;
pub mod core;
pub mod help;
pub mod io;
pub mod output;
pub mod registry;
mod shell;
pub mod shell_context;
pub mod test_mode;
pub mod validate;

pub use shell::{run_cli, SCRIPT_MODE_ENV};
pub use shell_context::{CliMode, CliOptions};
