//! The registry handles model resolution. It is a catalogue of known models together
//! with a table of aliases. When the user chooses a model, it is specified using a
//! "model reference" (see [`crate::reference`]), and the resolver is responsible for
//! turning that reference into a catalogued [`ModelDescriptor`].
//!
//! Resolution happens in three steps:
//!
//! 1. If the whole reference is a registered alias, it is replaced by the aliased slug.
//! 2. The reference is parsed into an author, model, capabilities and constraints.
//! 3. The registry is searched. With an author, the slug `author/model` must match
//!    exactly. Without one, the first model whose slug ends with the model name wins.
//!
//! Registry order is significant: it decides which model a bare name resolves to when
//! several slugs share the same suffix. For example, "gpt-4o" resolves to
//! "openai/gpt-4o" while "-001" resolves to "google/gemini-2.0-flash-001", the first
//! of the two Gemini slugs ending with it.
//!
//! [`ModelDescriptor`]: crate::models::ModelDescriptor

pub mod aliases;
pub mod catalogue;
pub mod populate;
pub mod registry;
pub mod resolver;

pub use aliases::AliasTable;
pub use registry::{Error, Registry};
pub use resolver::{Resolution, Resolver};
