//! Record model hosting nullable-field normalization.
//!
//! Defines the types a persistence layer works with:
//! - [`Record`]: an owned, ordered attribute bag bound to its [`Model`]
//! - [`ModelSchema`]: a model's typed field declarations and nullable list
//! - [`Model`]: a schema plus its mutators and saving hooks, shared by records
//! - [`load_schemas`]: reads `[[model]]` declarations from a TOML file
//!
//! Saving hooks are registered explicitly when a model is built. A model that
//! wants empty nullable fields stored as `null` calls
//! [`ModelBuilder::with_nullable_fields`], or calls
//! [`Record::set_nullable_fields`] from its own saving hook.

mod cast;
mod config;
mod error;
mod model;
mod record;
mod schema;

pub use cast::DATE_FORMAT;
pub use config::load_schemas;
pub use error::{ModelError, ModelResult};
pub use model::{Model, ModelBuilder, Mutator, SavingHook};
pub use nullable_fields::Attributes;
pub use record::Record;
pub use schema::{FieldDescriptor, FieldKind, ModelSchema};
