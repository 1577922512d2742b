use thiserror::Error;
use tracing::debug;

use super::{AliasTable, Registry};
use crate::models::ModelDescriptor;
use crate::reference::{MalformedReferenceError, ParsedReference};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Malformed(#[from] MalformedReferenceError),
    /// No catalogued model matches the (alias-substituted) reference
    #[error("Model {0} not found")]
    ModelNotFound(String),
}

/// A resolved reference: the catalogued model along with the capabilities and
/// constraints requested alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<'r> {
    pub descriptor: &'r ModelDescriptor,
    pub reference: ParsedReference,
}

impl<'r> Resolution<'r> {
    /// Requested capabilities the model does not advertise
    pub fn unsupported_capabilities(&self) -> Vec<&str> {
        self.reference
            .capabilities
            .keys()
            .map(|c| c.as_str())
            .filter(|c| !self.descriptor.supports(c))
            .collect()
    }
}

pub struct Resolver<'r> {
    registry: &'r Registry,
    aliases: &'r AliasTable,
}

impl<'r> Resolver<'r> {
    pub fn new(registry: &'r Registry, aliases: &'r AliasTable) -> Resolver<'r> {
        Resolver { registry, aliases }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn aliases(&self) -> &'r AliasTable {
        self.aliases
    }

    /// Resolves a single reference to a catalogued model.
    pub fn get_model(&self, reference: &str) -> Result<Resolution<'r>, Error> {
        let reference = reference.trim();

        let substituted = match self.aliases.lookup(reference) {
            Some(slug) => {
                debug!(alias = reference, slug = %slug, "substituted alias");
                slug
            }
            None => reference.to_string(),
        };

        let parsed = ParsedReference::parse(&substituted)?;

        match self.registry.find(&parsed) {
            Some(descriptor) => {
                debug!(reference, slug = %descriptor.slug, "resolved model");

                Ok(Resolution {
                    descriptor,
                    reference: parsed,
                })
            }
            None => Err(Error::ModelNotFound(substituted)),
        }
    }

    /// Resolves a comma-separated list of references, preserving their order. The
    /// first reference that fails to resolve fails the whole list.
    pub fn get_models(&self, references: &str) -> Result<Vec<Resolution<'r>>, Error> {
        split_references(references)
            .into_iter()
            .map(|reference| self.get_model(reference))
            .collect()
    }
}

/// Splits on commas that are not inside a parenthesized clause list.
fn split_references(references: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in references.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(references[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }

    parts.push(references[start..].trim());
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{Comparison, Constraint};

    fn fixtures() -> (Registry, AliasTable) {
        (Registry::catalogue(), AliasTable::new())
    }

    #[test]
    fn resolves_slugs() {
        let (registry, aliases) = fixtures();
        let resolver = Resolver::new(&registry, &aliases);

        for slug in ["test/model-1", "openai/gpt-4o", "anthropic/claude-3.5-sonnet"] {
            assert_eq!(resolver.get_model(slug).unwrap().descriptor.slug, slug);
        }
    }

    #[test]
    fn alias_resolves_like_its_slug() {
        let (registry, aliases) = fixtures();
        aliases.register("test-model", "test/model-1");

        let resolver = Resolver::new(&registry, &aliases);

        let by_alias = resolver.get_model("test-model").unwrap();
        let by_slug = resolver.get_model("test/model-1").unwrap();

        assert_eq!(by_alias, by_slug);
        assert_eq!(by_alias.descriptor.slug, "test/model-1");
    }

    #[test]
    fn alias_may_carry_capabilities() {
        let (registry, aliases) = fixtures();
        aliases.register("thinker", "test/model-1(reasoning)");

        let resolution = Resolver::new(&registry, &aliases)
            .get_model("thinker")
            .unwrap();

        assert_eq!(resolution.descriptor.slug, "test/model-1");
        assert!(resolution.reference.has_capability("reasoning"));
    }

    #[test]
    fn alias_must_match_the_whole_reference() {
        let (registry, aliases) = fixtures();
        aliases.register("test-model", "test/model-1");

        let err = Resolver::new(&registry, &aliases)
            .get_model("test-model(tools)")
            .unwrap_err();

        assert_eq!(err, Error::ModelNotFound("test-model(tools)".to_string()));
    }

    #[test]
    fn alias_overwrite_changes_resolution() {
        let (registry, aliases) = fixtures();
        let resolver = Resolver::new(&registry, &aliases);

        aliases.register("pick", "test/model-1");
        assert_eq!(resolver.get_model("pick").unwrap().descriptor.slug, "test/model-1");

        aliases.register("pick", "test/model-2");
        assert_eq!(resolver.get_model("pick").unwrap().descriptor.slug, "test/model-2");
    }

    #[test]
    fn dangling_alias_reports_the_substituted_slug() {
        let (registry, aliases) = fixtures();
        aliases.register("ghost", "nowhere/ghost-1");

        let err = Resolver::new(&registry, &aliases)
            .get_model("ghost")
            .unwrap_err();

        assert_eq!(err.to_string(), "Model nowhere/ghost-1 not found");
    }

    #[test]
    fn not_found_message() {
        let (registry, aliases) = fixtures();

        let err = Resolver::new(&registry, &aliases)
            .get_model("nonexistent/fake-model")
            .unwrap_err();

        assert_eq!(err.to_string(), "Model nonexistent/fake-model not found");
    }

    #[test]
    fn bare_names_use_suffix_match() {
        let (registry, aliases) = fixtures();
        let resolver = Resolver::new(&registry, &aliases);

        assert_eq!(resolver.get_model("gpt-4o").unwrap().descriptor.slug, "openai/gpt-4o");
        assert_eq!(resolver.get_model("model-2").unwrap().descriptor.slug, "test/model-2");
    }

    #[test]
    fn suffix_ties_resolve_to_the_first_registered() {
        let registry = Registry::with_models([
            ModelDescriptor::new("first/shared").unwrap(),
            ModelDescriptor::new("second/shared").unwrap(),
        ])
        .unwrap();
        let aliases = AliasTable::new();
        let resolver = Resolver::new(&registry, &aliases);

        for _ in 0..3 {
            assert_eq!(resolver.get_model("shared").unwrap().descriptor.slug, "first/shared");
        }
    }

    #[test]
    fn capabilities_and_constraints_travel_with_the_model() {
        let (registry, aliases) = fixtures();

        let resolution = Resolver::new(&registry, &aliases)
            .get_model("test/model-1(reasoning,vision,cost<1)")
            .unwrap();

        assert_eq!(resolution.descriptor.slug, "test/model-1");
        assert_eq!(
            resolution.reference.provider_constraints,
            vec![Constraint {
                field: "cost".to_string(),
                comparison: Comparison::Lt,
                value: "1".to_string(),
            }]
        );
        assert_eq!(resolution.unsupported_capabilities(), vec!["vision"]);
    }

    #[test]
    fn malformed_references_propagate() {
        let (registry, aliases) = fixtures();

        let err = Resolver::new(&registry, &aliases)
            .get_model("test/model-1(tools")
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Malformed(MalformedReferenceError::UnbalancedParentheses(_))
        ));
    }

    #[test]
    fn get_models_keeps_input_order() {
        let (registry, aliases) = fixtures();
        let resolver = Resolver::new(&registry, &aliases);

        let models = resolver.get_models("test/model-1,test/model-2").unwrap();

        assert_eq!(models.len(), 2);
        assert_eq!(models[0], resolver.get_model("test/model-1").unwrap());
        assert_eq!(models[1], resolver.get_model("test/model-2").unwrap());
    }

    #[test]
    fn get_models_with_aliases() {
        let (registry, aliases) = fixtures();
        aliases.register("test-model-1", "test/model-1");
        aliases.register("test-model-2", "test/model-2");

        let models = Resolver::new(&registry, &aliases)
            .get_models("test-model-2, test-model-1")
            .unwrap();

        let slugs: Vec<&str> = models.iter().map(|m| m.descriptor.slug.as_str()).collect();

        assert_eq!(slugs, vec!["test/model-2", "test/model-1"]);
    }

    #[test]
    fn get_models_does_not_split_clause_lists() {
        let (registry, aliases) = fixtures();

        let models = Resolver::new(&registry, &aliases)
            .get_models("test/model-1(reasoning,tools),gpt-4o")
            .unwrap();

        assert_eq!(models.len(), 2);
        assert_eq!(models[0].reference.capabilities.len(), 2);
        assert_eq!(models[1].descriptor.slug, "openai/gpt-4o");
    }

    #[test]
    fn get_models_fails_on_any_unresolved_entry() {
        let (registry, aliases) = fixtures();
        let resolver = Resolver::new(&registry, &aliases);

        assert_eq!(
            resolver.get_models("test/model-1,nonexistent/fake-model"),
            Err(Error::ModelNotFound("nonexistent/fake-model".to_string()))
        );
        assert_eq!(
            resolver.get_models("test/model-1,,test/model-2"),
            Err(Error::Malformed(MalformedReferenceError::Empty))
        );
    }

    #[test]
    fn split() {
        assert_eq!(split_references(" a , b(c,d) ,e"), vec!["a", "b(c,d)", "e"]);
        assert_eq!(split_references("a"), vec!["a"]);
        assert_eq!(split_references(""), vec![""]);
    }
}
