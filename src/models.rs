//! Catalogued model descriptors

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reference::{Comparison, Constraint};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("\"{0}\" is not a valid slug, expected \"author/model\"")]
pub struct InvalidSlugError(pub String);

/// Prices in USD per million tokens
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    pub input: f64,
    pub output: f64,
}

/// A model known to the registry. The `slug` is the unique key; the author and model
/// name are derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub slug: String,
    /// Human-readable name
    #[serde(default)]
    pub name: Option<String>,
    /// The context length of the model, if known.
    #[serde(default)]
    pub context_length: Option<u64>,
    #[serde(default)]
    pub pricing: Option<Pricing>,
    /// Capability flags advertised by the model (e.g., `tools`, `reasoning`)
    #[serde(default)]
    pub capabilities: Vec<String>,
}

impl ModelDescriptor {
    pub fn new(slug: &str) -> Result<ModelDescriptor, InvalidSlugError> {
        let descriptor = ModelDescriptor {
            slug: slug.to_string(),
            name: None,
            context_length: None,
            pricing: None,
            capabilities: Vec::new(),
        };

        descriptor.validate()?;

        Ok(descriptor)
    }

    pub fn validate(&self) -> Result<(), InvalidSlugError> {
        match self.slug.split_once('/') {
            Some((author, model)) if !author.is_empty() && !model.is_empty() => Ok(()),
            _ => Err(InvalidSlugError(self.slug.clone())),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_context_length(mut self, context_length: u64) -> Self {
        self.context_length = Some(context_length);
        self
    }

    pub fn with_pricing(mut self, input: f64, output: f64) -> Self {
        self.pricing = Some(Pricing { input, output });
        self
    }

    pub fn with_capabilities(mut self, capabilities: &[&str]) -> Self {
        self.capabilities = capabilities.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn author(&self) -> &str {
        self.slug.split_once('/').map_or("", |(author, _)| author)
    }

    pub fn model(&self) -> &str {
        self.slug
            .split_once('/')
            .map_or(self.slug.as_str(), |(_, model)| model)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.model())
    }

    pub fn supports(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }

    /// Looks up a metadata field by the name used in provider constraints.
    pub fn field(&self, name: &str) -> Option<String> {
        match name {
            "slug" => Some(self.slug.clone()),
            "author" => Some(self.author().to_string()),
            "model" => Some(self.model().to_string()),
            "cost" | "input_cost" => self.pricing.map(|p| p.input.to_string()),
            "output_cost" => self.pricing.map(|p| p.output.to_string()),
            "context" | "context_length" => self.context_length.map(|c| c.to_string()),
            _ => None,
        }
    }
}

impl Constraint {
    /// Evaluates the constraint against a descriptor's metadata.
    ///
    /// Both sides are compared numerically when they parse as numbers. Otherwise only
    /// `=` can be evaluated, as a string comparison. Returns `None` when the field is
    /// unknown to the descriptor or the comparison is undefined.
    pub fn is_satisfied_by(&self, descriptor: &ModelDescriptor) -> Option<bool> {
        let actual = descriptor.field(&self.field)?;

        match (actual.parse::<f64>(), self.value.parse::<f64>()) {
            (Ok(actual), Ok(expected)) => Some(match self.comparison {
                Comparison::Eq => actual == expected,
                Comparison::Lt => actual < expected,
                Comparison::Gt => actual > expected,
                Comparison::Lte => actual <= expected,
                Comparison::Gte => actual >= expected,
            }),
            _ if self.comparison == Comparison::Eq => Some(actual == self.value),
            _ => None,
        }
    }
}
