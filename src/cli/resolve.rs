use std::path::PathBuf;

use modelref::die;
use modelref::reference::ParsedReference;
use modelref::registry::{Resolution, Resolver};
use modelref::warn;

use super::list::table::Table;
use super::{format_output, load};
use crate::{ParseArgs, ResolveArgs};

fn dash_if_empty(items: Vec<String>) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(",")
    }
}

impl From<ParsedReference> for Table {
    fn from(value: ParsedReference) -> Self {
        let mut tab = Table::new(&["AUTHOR", "MODEL", "CAPABILITIES", "CONSTRAINTS"]);

        tab.add_row(vec![
            value.author.clone().unwrap_or_else(|| "-".to_string()),
            value.model.clone(),
            dash_if_empty(value.capabilities.keys().cloned().collect()),
            dash_if_empty(
                value
                    .provider_constraints
                    .iter()
                    .map(|c| c.to_string())
                    .collect(),
            ),
        ]);

        tab
    }
}

#[derive(serde::Serialize)]
pub(crate) struct ResolvedModel {
    reference: String,
    slug: String,
    name: String,
    context: Option<u64>,
    parsed: ParsedReference,
}

impl From<&Resolution<'_>> for ResolvedModel {
    fn from(value: &Resolution<'_>) -> Self {
        ResolvedModel {
            reference: value.reference.to_string(),
            slug: value.descriptor.slug.clone(),
            name: value.descriptor.display_name().to_string(),
            context: value.descriptor.context_length,
            parsed: value.reference.clone(),
        }
    }
}

impl From<Vec<ResolvedModel>> for Table {
    fn from(value: Vec<ResolvedModel>) -> Self {
        let mut tab = Table::new(&["REFERENCE", "MODEL", "CONTEXT", "NAME"]);

        for model in value {
            tab.add_row(vec![
                model.reference,
                model.slug,
                match model.context {
                    Some(context) => context.to_string(),
                    None => "unknown".to_string(),
                },
                model.name,
            ]);
        }

        tab
    }
}

/// Describes every requested capability or checkable constraint the resolved model
/// does not meet.
fn unmet_requirements(resolution: &Resolution) -> Vec<String> {
    let slug = &resolution.descriptor.slug;

    let capabilities = resolution
        .unsupported_capabilities()
        .into_iter()
        .map(|c| format!("model \"{}\" does not advertise the \"{}\" capability", slug, c));

    let constraints = resolution
        .reference
        .provider_constraints
        .iter()
        .filter(|c| c.is_satisfied_by(resolution.descriptor) == Some(false))
        .map(|c| format!("model \"{}\" does not satisfy \"{}\"", slug, c));

    capabilities.chain(constraints).collect()
}

pub(crate) fn parse_cmd(args: &ParseArgs) {
    match ParsedReference::parse(&args.reference) {
        Ok(parsed) => format_output(parsed, args.format),
        Err(err) => die!("{}", err),
    }
}

pub(crate) fn resolve_cmd(config: Option<PathBuf>, args: &ResolveArgs) {
    let (registry, aliases) = load(config);

    let resolver = Resolver::new(&registry, &aliases);

    let resolutions = match resolver.get_models(&args.references) {
        Ok(resolutions) => resolutions,
        Err(err) => die!("{}", err),
    };

    for resolution in &resolutions {
        for unmet in unmet_requirements(resolution) {
            warn!("{}", unmet);
        }
    }

    let models: Vec<ResolvedModel> = resolutions.iter().map(ResolvedModel::from).collect();

    format_output(models, args.format);
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelref::registry::{AliasTable, Registry};

    #[test]
    fn reports_unmet_requirements() {
        let registry = Registry::catalogue();
        let aliases = AliasTable::new();
        let resolver = Resolver::new(&registry, &aliases);

        let resolution = resolver
            .get_model("test/model-2(reasoning,tools,cost<1,latency<5)")
            .unwrap();

        assert_eq!(
            unmet_requirements(&resolution),
            vec![
                "model \"test/model-2\" does not advertise the \"reasoning\" capability".to_string(),
                "model \"test/model-2\" does not satisfy \"cost<1\"".to_string(),
            ]
        );
    }

    #[test]
    fn satisfied_requirements() {
        let registry = Registry::catalogue();
        let aliases = AliasTable::new();
        let resolver = Resolver::new(&registry, &aliases);

        let resolution = resolver.get_model("test/model-1(reasoning,cost<1)").unwrap();

        assert!(unmet_requirements(&resolution).is_empty());
    }

    #[test]
    fn resolved_rows_use_canonical_references() {
        let registry = Registry::catalogue();
        let aliases = AliasTable::with_defaults();
        let resolver = Resolver::new(&registry, &aliases);

        let resolution = resolver.get_model("4o").unwrap();
        let row = ResolvedModel::from(&resolution);

        assert_eq!(row.reference, "openai/gpt-4o");
        assert_eq!(row.slug, "openai/gpt-4o");
        assert_eq!(row.name, "GPT-4o");
    }
}
