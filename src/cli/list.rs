use std::path::PathBuf;

use table::Table;
pub(crate) mod table;

use modelref::models::ModelDescriptor;
use modelref::registry::{AliasTable, Registry};

use super::{format_output, load};
use crate::{ListArgs, ListObject};

fn or_unknown<T: ToString>(value: Option<T>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "unknown".to_string(),
    }
}

#[derive(serde::Serialize)]
pub(crate) struct Model {
    slug: String,
    name: String,
    context: Option<u64>,
    input_cost: Option<f64>,
    output_cost: Option<f64>,
    capabilities: Vec<String>,
}

impl From<&ModelDescriptor> for Model {
    fn from(value: &ModelDescriptor) -> Self {
        Model {
            slug: value.slug.clone(),
            name: value.display_name().to_string(),
            context: value.context_length,
            input_cost: value.pricing.map(|p| p.input),
            output_cost: value.pricing.map(|p| p.output),
            capabilities: value.capabilities.clone(),
        }
    }
}

impl From<Vec<Model>> for Table {
    fn from(value: Vec<Model>) -> Self {
        let mut tab = Table::new(&["MODEL", "CONTEXT", "INPUT", "OUTPUT", "CAPABILITIES"]);

        for model in value {
            let capabilities = if model.capabilities.is_empty() {
                "-".to_string()
            } else {
                model.capabilities.join(",")
            };

            tab.add_row(vec![
                model.slug,
                or_unknown(model.context),
                or_unknown(model.input_cost),
                or_unknown(model.output_cost),
                capabilities,
            ]);
        }

        tab
    }
}

#[derive(serde::Serialize)]
pub(crate) struct Alias {
    alias: String,
    slug: String,
}

impl From<Vec<Alias>> for Table {
    fn from(value: Vec<Alias>) -> Self {
        let mut tab = Table::new(&["ALIAS", "SLUG"]);

        for alias in value {
            tab.add_row(vec![alias.alias, alias.slug]);
        }

        tab
    }
}

/// Models in registry order, optionally limited to one author
fn get_models(registry: &Registry, author: Option<&str>) -> Vec<Model> {
    registry
        .iter()
        .filter(|m| author.map_or(true, |author| m.author() == author))
        .map(Model::from)
        .collect()
}

fn get_aliases(aliases: &AliasTable) -> Vec<Alias> {
    aliases
        .entries()
        .into_iter()
        .map(|(alias, slug)| Alias { alias, slug })
        .collect()
}

pub(crate) fn list_cmd(config: Option<PathBuf>, args: &ListArgs) {
    let format = args.format;

    let (registry, aliases) = load(config);

    match &args.object {
        ListObject::Models(args) => {
            let models = get_models(&registry, args.author.as_deref());
            format_output(models, format);
        }
        ListObject::Aliases => {
            let aliases = get_aliases(&aliases);
            format_output(aliases, format);
        }
    }
}
