use std::collections::HashMap;

use thiserror::Error;

use super::catalogue::CATALOGUE;
use crate::models::{InvalidSlugError, ModelDescriptor};
use crate::reference::ParsedReference;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Two models share the same slug
    #[error("model \"{0}\" was added to the registry twice")]
    DuplicateSlug(String),
    #[error(transparent)]
    InvalidSlug(#[from] InvalidSlugError),
}

/// An ordered collection of models, unique by slug.
///
/// The registry is only appended to while it is being populated; afterwards it is
/// read-only and can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    models: Vec<ModelDescriptor>,
    /// Slug to position in `models`
    index: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    /// A registry holding the built-in catalogue
    pub fn catalogue() -> Registry {
        let mut registry = Registry::new();

        for model in CATALOGUE.iter() {
            registry.push(model.clone());
        }

        registry
    }

    pub fn with_models<I>(models: I) -> Result<Registry, Error>
    where
        I: IntoIterator<Item = ModelDescriptor>,
    {
        let mut registry = Registry::new();

        for model in models {
            registry.add_model(model)?;
        }

        Ok(registry)
    }

    /// Appends a model. Models added later lose suffix ties against earlier ones.
    pub fn add_model(&mut self, model: ModelDescriptor) -> Result<(), Error> {
        model.validate()?;

        if self.index.contains_key(&model.slug) {
            return Err(Error::DuplicateSlug(model.slug));
        }

        self.push(model);

        Ok(())
    }

    fn push(&mut self, model: ModelDescriptor) {
        self.index.insert(model.slug.clone(), self.models.len());
        self.models.push(model);
    }

    pub fn get(&self, slug: &str) -> Option<&ModelDescriptor> {
        self.index.get(slug).map(|&i| &self.models[i])
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.index.contains_key(slug)
    }

    /// The first model, in registry order, whose slug ends with `suffix`
    pub fn find_by_suffix(&self, suffix: &str) -> Option<&ModelDescriptor> {
        self.models.iter().find(|m| m.slug.ends_with(suffix))
    }

    /// Finds the model a parsed reference refers to.
    pub fn find(&self, reference: &ParsedReference) -> Option<&ModelDescriptor> {
        match reference.slug() {
            Some(slug) => self.get(&slug),
            None => self.find_by_suffix(&reference.model),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelDescriptor> {
        self.models.iter()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
