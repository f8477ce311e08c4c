use crate::cli::io;
use crate::cli::output::{self, section as output_section};
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub const BANNER: &str = "********** My Movies Database **********";

pub fn print_overview(registry: &CommandRegistry) {
    output_section("Available commands");
    for entry in registry.list() {
        io::print_info(format!("  {:<12} {}", entry.name, entry.description));
    }
    io::print_info("Use `help <command>` for details.");
    io::print_info("Type a menu number or a command name; press Enter to execute.");
}

pub fn print_command(entry: &CommandEntry) {
    output_section(format!("Help: {}", entry.name));
    io::print_info(format!("  Description: {}", entry.description));
    io::print_info(format!("  Usage: {}", entry.usage));
    if let Some(slot) = entry.menu {
        io::print_info(format!("  Menu number: {}", slot.number));
    }
}

pub fn print_menu(registry: &CommandRegistry) {
    output_section("Menu");
    for (slot, _) in registry.menu() {
        output::plain(format!("{}. {}", slot.number, slot.label));
    }
}

/// Prompt string listing the valid menu range.
pub fn menu_prompt(registry: &CommandRegistry) -> String {
    let highest = registry
        .menu()
        .last()
        .map(|(slot, _)| slot.number)
        .unwrap_or(0);
    format!("Enter choice (0-{highest}) or command > ")
}
