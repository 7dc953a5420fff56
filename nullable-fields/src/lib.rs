//! Empty-to-null normalization for nullable record fields.
//!
//! A record type opts some of its fields into nullability. Right before the
//! record is persisted, every opted-in field whose value is "empty" is
//! replaced with `null`, and every other value is left exactly as it was:
//!
//! - [`nullable_from_attributes`]: picks the attributes a model declared nullable
//! - [`null_if_empty`]: decides the replacement for one attribute
//! - [`set_nullable_fields`]: the pre-persist hook that ties the two together
//! - [`Nullable`]: the capabilities a record type must provide
//!
//! The crate does not own records, casts, mutators or the save pipeline.
//! Hosts describe those through [`Nullable`] and register
//! [`set_nullable_fields`] with their own saving hooks.

mod classify;
pub mod codec;
mod contract;
mod error;
mod hook;
mod select;

pub use classify::{is_blank, null_if_blank, null_if_empty};
pub use contract::{Attributes, Nullable};
pub use error::{NullableError, NullableResult};
pub use hook::set_nullable_fields;
pub use select::nullable_from_attributes;
