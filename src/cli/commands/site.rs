use std::path::PathBuf;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::core::utils::{site_dir_in, template_dir_in};
use crate::site::SiteGenerator;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "website",
        "Generate a static HTML gallery of the collection",
        "website [output_dir]",
        cmd_website,
    )
    .in_menu(9, "Generate website")]
}

fn cmd_website(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !context.require_movies() {
        return Ok(());
    }
    if args.len() > 1 {
        return Err(CommandError::InvalidArguments(
            "usage: website [output_dir]".into(),
        ));
    }

    let base = context.config_manager.base_dir();
    let output_dir = args
        .first()
        .map(PathBuf::from)
        .or_else(|| context.config.site_dir.clone())
        .unwrap_or_else(|| site_dir_in(base));
    let template_dir = context
        .config
        .template_dir
        .clone()
        .unwrap_or_else(|| template_dir_in(base));

    let index = SiteGenerator::new()
        .with_template_dir(template_dir)
        .generate(context.manager.movies(), &output_dir)?;
    io::print_success(format!(
        "Website was generated successfully: {}",
        index.display()
    ));
    Ok(())
}
