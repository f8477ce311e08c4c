pub mod browse;
pub mod config;
pub mod movie;
pub mod omdb;
pub mod site;
pub mod system;

use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let groups = [
        system::definitions(),
        movie::definitions(),
        browse::definitions(),
        site::definitions(),
        omdb::definitions(),
        config::definitions(),
    ];
    for entry in groups.into_iter().flatten() {
        registry.register(entry);
    }
}
