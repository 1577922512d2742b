//! Traits and type definitions for the boundary with model-serving providers.
//!
//! Resolution never talks to a provider. Once a model has been validated against the
//! registry, the [`ModelFactory`](crate::factory::ModelFactory) hands the model id to a
//! [`ProviderFactory`], which is supplied by the host application and constructs the
//! live [`LanguageModel`] client.
//!
//! ## Error Handling
//!
//! Providers each have their own error types. These are encapsulated in [`Error`],
//! and the [`ErrorKind`] enum provides an indication of the category of error that
//! was raised.

use async_trait::async_trait;
use std::error::Error as StdError;
use std::fmt;

/// General categories of errors that can be returned by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Failed to connect to the underlying API service.
    Connection,
    /// A request timed out.
    TimedOut,
    /// An API key was not provided or service-specific
    /// permissions are needed.
    Authentication,
    /// A rate limit was reached or a quota was exceeded.
    ExcessUsage,
    /// The provider does not serve the requested model.
    NotFound,
    /// The request was malformed or is otherwise improper.
    BadRequest,
    /// An API response was unable to be deserialized, malformed,
    /// or otherwise violated the assumptions of the client.
    UnexpectedResponse,
    /// An error that does not fit into any of the other categories.
    UnspecifiedError,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn from_kind(kind: ErrorKind) -> Error {
        Error { kind, source: None }
    }

    pub fn from_source(kind: ErrorKind, source: Box<dyn StdError + Send + Sync>) -> Error {
        Error {
            kind,
            source: Some(source),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    fn message(&self) -> &'static str {
        match self.kind {
            ErrorKind::Connection => "failed to connect to the API service",
            ErrorKind::TimedOut => "request timed out",
            ErrorKind::Authentication => "authentication failed or not provided",
            ErrorKind::ExcessUsage => "rate limit exceeded or quota crossed",
            ErrorKind::NotFound => "the provider does not serve the requested model",
            ErrorKind::BadRequest => "the request was bad or malformed",
            ErrorKind::UnexpectedResponse => "API response was unexpected or malformed",
            ErrorKind::UnspecifiedError => "an unspecified error occurred",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_ref().map(|e| &**e as _)
    }
}

/// A single-shot completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
}

/// A streamed completion, yielding chunks of text as they are generated.
#[async_trait]
pub trait AsyncTextIterator: Send {
    async fn next(&mut self) -> Option<Result<String, Error>>;
}

/// A live client for one model.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// The `author/model` id the client was constructed for.
    fn model_id(&self) -> &str;

    async fn complete(&self, prompt: &str) -> Result<Completion, Error>;

    async fn stream_complete(&self, prompt: &str) -> Result<Box<dyn AsyncTextIterator>, Error>;
}

/// Constructs live clients. Implemented by the host application.
pub trait ProviderFactory {
    /// `model_id`: the validated `author/model` id.
    /// `api_key`: forwarded verbatim from the caller.
    fn language_model(
        &self,
        model_id: &str,
        api_key: Option<&str>,
    ) -> Result<Box<dyn LanguageModel>, Error>;
}
