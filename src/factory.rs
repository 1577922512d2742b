//! Validated construction of live model clients.

use thiserror::Error;
use tracing::debug;

use crate::providers::{self, LanguageModel, ProviderFactory};
use crate::reference::MalformedReferenceError;
use crate::registry::{resolver, Resolver};

#[derive(Error, Debug)]
pub enum Error {
    /// The registry does not know the model
    #[error("Model {0} not found")]
    ModelNotFound(String),
    #[error(transparent)]
    Malformed(#[from] MalformedReferenceError),
    #[error("failed to create a client for \"{0}\": {1}")]
    Provider(String, #[source] providers::Error),
}

#[derive(Debug, Clone, Default)]
pub struct CreateModelOptions {
    pub provider: String,
    pub model_name: String,
    pub api_key: Option<String>,
}

impl CreateModelOptions {
    pub fn new(provider: &str, model_name: &str) -> CreateModelOptions {
        CreateModelOptions {
            provider: provider.to_string(),
            model_name: model_name.to_string(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    pub fn model_id(&self) -> String {
        format!("{}/{}", self.provider, self.model_name)
    }
}

/// Checks requested models against the registry before asking the provider for a
/// client, so unknown models never reach the provider.
pub struct ModelFactory<'r, P: ProviderFactory> {
    resolver: Resolver<'r>,
    provider: P,
}

impl<'r, P: ProviderFactory> ModelFactory<'r, P> {
    pub fn new(resolver: Resolver<'r>, provider: P) -> ModelFactory<'r, P> {
        ModelFactory { resolver, provider }
    }

    pub fn create_model(
        &self,
        options: &CreateModelOptions,
    ) -> Result<Box<dyn LanguageModel>, Error> {
        let model_id = options.model_id();

        match self.resolver.get_model(&model_id) {
            Ok(resolution) => {
                debug!(
                    model_id = %model_id,
                    slug = %resolution.descriptor.slug,
                    "creating model client"
                );
            }
            Err(resolver::Error::ModelNotFound(_)) => return Err(Error::ModelNotFound(model_id)),
            // An empty provider or model name still names a model, just not one we know
            Err(resolver::Error::Malformed(
                MalformedReferenceError::Empty
                | MalformedReferenceError::EmptyAuthor(_)
                | MalformedReferenceError::EmptyModel(_),
            )) => return Err(Error::ModelNotFound(model_id)),
            Err(resolver::Error::Malformed(err)) => return Err(err.into()),
        }

        self.provider
            .language_model(&model_id, options.api_key.as_deref())
            .map_err(|e| Error::Provider(model_id, e))
    }
}
