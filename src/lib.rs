//! Resolution of compact model references such as `anthropic/claude-3.5-sonnet`,
//! `test/model-1(reasoning,tools)` or `test/model-1(cost<1)` to catalogued models.
//!
//! ```
//! use modelref::registry::{AliasTable, Registry, Resolver};
//!
//! let registry = Registry::catalogue();
//! let aliases = AliasTable::with_defaults();
//! let resolver = Resolver::new(&registry, &aliases);
//!
//! let resolution = resolver.get_model("gpt-4o(tools)").unwrap();
//! assert_eq!(resolution.descriptor.slug, "openai/gpt-4o");
//! assert!(resolution.reference.has_capability("tools"));
//! ```

pub mod color;
pub mod config;
pub mod factory;
pub mod models;
pub mod providers;
pub mod reference;
pub mod registry;
pub mod utils;

pub use factory::{CreateModelOptions, ModelFactory};
pub use models::ModelDescriptor;
pub use reference::{parse, Comparison, Constraint, MalformedReferenceError, ParsedReference};
