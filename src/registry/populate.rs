use tracing::debug;

use super::registry::Error;
use super::{AliasTable, Registry};
use crate::config::Config;
use crate::reference::ParsedReference;
use crate::warn;

/// Populate a registry with the built-in catalogue followed by the configured models
pub fn populated_registry(config: &Config) -> Result<Registry, Error> {
    let mut registry = Registry::catalogue();

    for model in &config.models {
        registry.add_model(model.clone())?;
    }

    debug!(
        total_models = registry.len(),
        configured = config.models.len(),
        "registry populated"
    );

    Ok(registry)
}

/// Populate an alias table with the built-in aliases, then the configured ones. The
/// configured aliases take precedence.
pub fn populated_aliases(config: &Config, registry: &Registry) -> AliasTable {
    let aliases = AliasTable::with_defaults();

    for (alias, slug) in &config.aliases {
        let known = ParsedReference::parse(slug)
            .ok()
            .and_then(|reference| registry.find(&reference))
            .is_some();

        if !known {
            warn!("alias \"{}\" points to unknown model \"{}\"", alias, slug);
        }

        aliases.register(alias, slug);
    }

    aliases
}
