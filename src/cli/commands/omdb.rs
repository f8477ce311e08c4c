use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::validate;
use crate::domain::{Displayable, Titled};

use super::movie::{print_details, store};

const USAGE: &str = "omdb <title>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "omdb",
        "Look a movie up on OMDb and optionally add it",
        USAGE,
        cmd_omdb,
    )
    .in_menu(12, "Search OMDb")]
}

fn cmd_omdb(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !context.has_metadata() {
        return Err(CommandError::Message(
            "OMDb lookup is not configured. Pass an API key on the command line or run `config set omdb_api_key <key>`."
                .into(),
        ));
    }
    let joined = args.join(" ");
    let title = context.arg_or_prompt(
        (!args.is_empty()).then_some(joined.as_str()),
        "Enter movie title to look up",
        USAGE,
        validate::require_text,
    )?;

    let Some(client) = context.metadata.as_ref() else {
        return Ok(());
    };
    let Some(details) = client.find_by_title(&title)? else {
        let candidates = client.search(&title)?;
        if candidates.is_empty() {
            io::print_warning(format!("No OMDb results for '{}'.", title));
        } else {
            output::plain(format!("No exact match for '{}'. Did you mean:", title));
            for candidate in candidates {
                output::plain(format!("  {}", candidate.display_label()));
            }
        }
        return Ok(());
    };

    print_details(&details);
    if context
        .manager
        .movies()
        .iter()
        .any(|movie| movie.title_matches(&details.title))
    {
        io::print_info(format!("'{}' is already in your collection.", details.title));
        return Ok(());
    }
    if context.confirm("Add it to your collection?", false)? {
        store(context, details.to_movie())?;
    }
    Ok(())
}
