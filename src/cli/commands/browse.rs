use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::validate;
use crate::core::services::{MovieFilter, QueryService, SortOrder, StatsService};

const FILTER_USAGE: &str = "filter [min_rating|-] [start_year|-] [end_year|-]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "stats",
            "Show average, median, best and worst ratings",
            "stats",
            cmd_stats,
        )
        .in_menu(5, "Stats"),
        CommandEntry::new("random", "Suggest a random movie", "random", cmd_random)
            .in_menu(6, "Random movie"),
        CommandEntry::new(
            "search",
            "Find movies whose title contains the given text",
            "search [part of title]",
            cmd_search,
        )
        .in_menu(7, "Search movie"),
        CommandEntry::new(
            "sort-rating",
            "List movies ordered by rating",
            "sort-rating [desc|asc]",
            cmd_sort_rating,
        )
        .in_menu(8, "Movies sorted by rating"),
        CommandEntry::new(
            "sort-year",
            "List movies ordered by release year",
            "sort-year [desc|asc]",
            cmd_sort_year,
        )
        .in_menu(10, "Movies sorted by year"),
        CommandEntry::new(
            "filter",
            "List movies by minimum rating and year range",
            FILTER_USAGE,
            cmd_filter,
        )
        .in_menu(11, "Filter movies"),
    ]
}

fn cmd_stats(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.require_movies() {
        return Ok(());
    }
    if let Some(stats) = StatsService::summarize(context.manager.movies()) {
        output::plain(format!("Average rating: {}", stats.average));
        output::plain(format!("Median rating: {}", stats.median));
        output::plain(format!(
            "Best movie: {}, {}",
            stats.best.title, stats.best.rating
        ));
        output::plain(format!(
            "Worst movie: {}, {}",
            stats.worst.title, stats.worst.rating
        ));
    }
    Ok(())
}

fn cmd_random(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.require_movies() {
        return Ok(());
    }
    if let Some(movie) = StatsService::random_pick(context.manager.movies()) {
        output::plain(format!(
            "Your movie for tonight: {}, it's rated {}",
            movie.title, movie.rating
        ));
    }
    Ok(())
}

fn cmd_search(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let query = if !args.is_empty() {
        args.join(" ")
    } else if context.can_prompt() {
        context.prompt_until("Enter part of movie name", |raw| Ok(raw.to_string()))?
    } else {
        return Err(CommandError::InvalidArguments(
            "usage: search [part of title]".into(),
        ));
    };
    let query = query.trim();

    let matches = QueryService::search(context.manager.movies(), query);
    if matches.is_empty() {
        output::plain(format!("No movies found matching '{}'", query));
    } else {
        output::plain(format!("Found {} matching movies:", matches.len()));
        context.print_movies(matches);
    }
    Ok(())
}

// Without an argument or a way to ask, highest/newest comes first.
fn order_from(
    context: &ShellContext,
    args: &[&str],
    question: &str,
) -> Result<SortOrder, CommandError> {
    match args.first() {
        Some(raw) => validate::parse_order(raw).map_err(CommandError::InvalidArguments),
        None if context.can_prompt() => context.prompt_until(
            &format!("{question}? [Y]es or [N]o"),
            validate::parse_order,
        ),
        None => Ok(SortOrder::Descending),
    }
}

fn cmd_sort_rating(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !context.require_movies() {
        return Ok(());
    }
    let order = order_from(context, args, "Do you want the high rated movies first")?;
    let sorted = QueryService::sort_by_rating(context.manager.movies(), order);
    let label = match order {
        SortOrder::Descending => "descending",
        SortOrder::Ascending => "ascending",
    };
    output::plain(format!("Movies sorted by rating ({label}):"));
    context.print_movies(&sorted);
    Ok(())
}

fn cmd_sort_year(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !context.require_movies() {
        return Ok(());
    }
    let order = order_from(context, args, "Do you want the latest movies first")?;
    let sorted = QueryService::sort_by_year(context.manager.movies(), order);
    let label = match order {
        SortOrder::Descending => "newest first",
        SortOrder::Ascending => "oldest first",
    };
    output::plain(format!("Movies sorted by year ({label}):"));
    context.print_movies(&sorted);
    Ok(())
}

fn cmd_filter(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !context.require_movies() {
        return Ok(());
    }
    if args.len() > 3 {
        return Err(CommandError::InvalidArguments(format!("usage: {FILTER_USAGE}")));
    }

    let filter = if args.is_empty() && context.can_prompt() {
        MovieFilter {
            min_rating: context.prompt_until(
                "Enter minimum rating (leave blank for no minimum rating)",
                |raw| validate::parse_optional(raw, "Invalid input. Please enter a valid rating."),
            )?,
            start_year: context.prompt_until(
                "Enter start year (leave blank for no start year)",
                |raw| validate::parse_optional(raw, "Invalid input. Please enter a valid start year."),
            )?,
            end_year: context.prompt_until(
                "Enter end year (leave blank for no end year)",
                |raw| validate::parse_optional(raw, "Invalid input. Please enter a valid end year."),
            )?,
        }
    } else {
        let arg = |index: usize| args.get(index).copied().unwrap_or("");
        MovieFilter {
            min_rating: validate::parse_optional(arg(0), "invalid minimum rating")
                .map_err(CommandError::InvalidArguments)?,
            start_year: validate::parse_optional(arg(1), "invalid start year")
                .map_err(CommandError::InvalidArguments)?,
            end_year: validate::parse_optional(arg(2), "invalid end year")
                .map_err(CommandError::InvalidArguments)?,
        }
    };

    let matches = QueryService::filter(context.manager.movies(), &filter);
    output::plain(format!("Filtered Movies ({filter}):"));
    context.print_movies(matches);
    Ok(())
}
