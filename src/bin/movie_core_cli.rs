use std::env;

use movie_core::{
    cli::{run_cli, CliOptions},
    init,
    storage::StorageKind,
};

const USAGE: &str = "\
Usage: movie_core_cli [storage_type] [omdb_api_key]
  storage_type: 'csv' or 'json' (default: value from config, else csv)
  omdb_api_key: Your OMDb API key (optional)

Example: movie_core_cli json abcd1234";

fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    if let Some(raw) = args.first() {
        if matches!(raw.as_str(), "-h" | "--help") {
            return Err(String::new());
        }
        options.storage = Some(
            raw.parse::<StorageKind>()
                .map_err(|_| format!("Unknown storage type: {raw}"))?,
        );
    }
    options.omdb_api_key = args.get(1).cloned();
    Ok(options)
}

fn main() {
    init();

    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) if message.is_empty() => {
            println!("{USAGE}");
            return;
        }
        Err(message) => {
            eprintln!("{message}");
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run_cli(options) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
