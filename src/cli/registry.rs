use std::collections::HashMap;

use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// Position of a command in the numbered main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuSlot {
    pub number: u8,
    pub label: &'static str,
}

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
    pub menu: Option<MenuSlot>,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
            menu: None,
        }
    }

    /// Lists the command in the main menu under `number`.
    pub fn in_menu(mut self, number: u8, label: &'static str) -> Self {
        self.menu = Some(MenuSlot { number, label });
        self
    }
}

pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandEntry>,
    order: Vec<&'static str>,
    menu_numbers: HashMap<String, &'static str>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
            order: Vec::new(),
            menu_numbers: HashMap::new(),
        }
    }

    pub fn register(&mut self, entry: CommandEntry) {
        let name = entry.name;
        if let Some(slot) = entry.menu {
            self.menu_numbers.insert(slot.number.to_string(), name);
        }
        if self.commands.insert(name, entry).is_none() {
            self.order.push(name);
        }
    }

    /// Looks a command up by name or by its menu number.
    pub fn get(&self, key: &str) -> Option<&CommandEntry> {
        let name = self.menu_numbers.get(key).copied().unwrap_or(key);
        self.commands.get(name)
    }

    pub fn list(&self) -> Vec<&CommandEntry> {
        self.order
            .iter()
            .filter_map(|name| self.commands.get(name))
            .collect()
    }

    /// Menu entries ordered by number.
    pub fn menu(&self) -> Vec<(MenuSlot, &CommandEntry)> {
        let mut entries: Vec<_> = self
            .list()
            .into_iter()
            .filter_map(|entry| entry.menu.map(|slot| (slot, entry)))
            .collect();
        entries.sort_by_key(|(slot, _)| slot.number);
        entries
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }

    pub fn handler(&self, key: &str) -> Option<CommandHandler> {
        self.get(key).map(|entry| entry.handler)
    }
}
