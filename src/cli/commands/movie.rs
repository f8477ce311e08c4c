use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::validate;
use crate::domain::{Displayable, Movie, MovieDetails, Titled, POSTER_PLACEHOLDER};

const ADD_USAGE: &str = "add [title [year rating [poster]]]";
const DELETE_USAGE: &str = "delete <title>";
const UPDATE_USAGE: &str = "update <title> <rating>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "list",
            "List every movie with its year and rating",
            "list",
            cmd_list,
        )
        .in_menu(1, "List movies"),
        CommandEntry::new(
            "add",
            "Add a movie (looked up online when an OMDb key is configured)",
            ADD_USAGE,
            cmd_add,
        )
        .in_menu(2, "Add movie"),
        CommandEntry::new("delete", "Delete a movie by title", DELETE_USAGE, cmd_delete)
            .in_menu(3, "Delete movie"),
        CommandEntry::new(
            "update",
            "Change the rating of a movie",
            UPDATE_USAGE,
            cmd_update,
        )
        .in_menu(4, "Update movie"),
    ]
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let movies = context.manager.movies();
    output::plain(format!("{} movies in total", movies.len()));
    context.print_movies(movies);
    Ok(())
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let title = context.arg_or_prompt(
        args.first().copied(),
        "Enter new movie name",
        ADD_USAGE,
        validate::require_text,
    )?;

    if context.manager.movies().iter().any(|movie| movie.title_matches(&title)) {
        io::print_warning(format!("Movie '{}' already exists!", title));
        return Ok(());
    }

    if args.len() <= 1 {
        if let Some(details) = lookup(context, &title) {
            print_details(&details);
            if context.confirm("Add this movie?", true)? {
                return store(context, details.to_movie());
            }
            io::print_info("Movie not added.");
            return Ok(());
        }
    }

    let year = context.arg_or_prompt(
        args.get(1).copied(),
        "Enter new movie year",
        ADD_USAGE,
        validate::parse_year,
    )?;
    let rating = context.arg_or_prompt(
        args.get(2).copied(),
        "Enter new movie rating",
        ADD_USAGE,
        validate::parse_rating,
    )?;
    let poster = match args.get(3) {
        Some(poster) => poster.to_string(),
        None if args.len() < 3 && context.can_prompt() => context.prompt_until(
            "Enter new movie poster URL (blank for none)",
            |raw| Ok(raw.trim().to_string()),
        )?,
        None => String::new(),
    };
    let poster = if poster.trim().is_empty() {
        POSTER_PLACEHOLDER.to_string()
    } else {
        poster
    };

    store(context, Movie::new(title, year, rating, poster))
}

// Lookup failures fall back to manual entry.
fn lookup(context: &ShellContext, title: &str) -> Option<MovieDetails> {
    let client = context.metadata.as_ref()?;
    match client.find_by_title(title) {
        Ok(Some(details)) => Some(details),
        Ok(None) => {
            io::print_warning(format!(
                "Movie '{}' not found in OMDb. Enter the details manually.",
                title
            ));
            None
        }
        Err(err) => {
            io::print_warning(format!(
                "OMDb lookup failed ({}). Enter the details manually.",
                err
            ));
            None
        }
    }
}

pub(crate) fn print_details(details: &MovieDetails) {
    output::section(details.display_label());
    let fields = [
        ("Genre", &details.genre),
        ("Director", &details.director),
        ("Actors", &details.actors),
        ("Plot", &details.plot),
    ];
    for (label, value) in fields {
        if !value.is_empty() && value.as_str() != POSTER_PLACEHOLDER {
            output::plain(format!("{label}: {value}"));
        }
    }
}

pub(crate) fn store(context: &mut ShellContext, movie: Movie) -> CommandResult {
    let title = movie.title.clone();
    if context.manager.add(movie)? {
        io::print_success(format!("Movie '{}' successfully added", title));
    } else {
        io::print_warning(format!("Movie '{}' already exists!", title));
    }
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let joined = args.join(" ");
    let title = context.arg_or_prompt(
        (!args.is_empty()).then_some(joined.as_str()),
        "Enter movie name to delete",
        DELETE_USAGE,
        validate::require_text,
    )?;
    if context.manager.delete(&title)? {
        io::print_success(format!("Movie '{}' successfully deleted", title));
    } else {
        io::print_warning(format!("Movie '{}' doesn't exist!", title));
    }
    Ok(())
}

fn cmd_update(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    // The last argument is the rating; everything before it is the title.
    let (title_args, rating_arg) = match args {
        [] | [_] => (args, None),
        [title @ .., rating] => (title, Some(*rating)),
    };
    let joined = title_args.join(" ");
    let title = context.arg_or_prompt(
        (!title_args.is_empty()).then_some(joined.as_str()),
        "Enter movie name to update",
        UPDATE_USAGE,
        validate::require_text,
    )?;
    let rating = context.arg_or_prompt(
        rating_arg,
        "Enter new movie rating",
        UPDATE_USAGE,
        validate::parse_rating,
    )?;
    if context.manager.update(&title, rating)? {
        io::print_success(format!("Movie '{}' successfully updated", title));
    } else {
        io::print_warning(format!("Movie '{}' doesn't exist!", title));
    }
    Ok(())
}
