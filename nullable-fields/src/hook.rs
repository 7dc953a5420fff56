//! Pre-persist hook.

use crate::{Nullable, NullableResult, null_if_empty, nullable_from_attributes};
use tracing::debug;

/// Replaces every empty nullable attribute of `model` with `null`.
///
/// Meant to run right before the record is written, either registered as a
/// saving hook or called from a model's own one. All selected fields are
/// classified before anything is written back, so on error the record is
/// left untouched. Running it twice yields the same attributes as running it
/// once.
pub fn set_nullable_fields<M>(model: &mut M) -> NullableResult<()>
where
    M: Nullable + ?Sized,
{
    let selected = nullable_from_attributes(model.attributes(), model.nullable_fields());

    let mut replacements = Vec::with_capacity(selected.len());
    for (key, value) in selected {
        let replacement = null_if_empty(&*model, &key, value)?;
        replacements.push((key, replacement));
    }

    for (key, value) in replacements {
        if value.is_null() {
            debug!("Nullable field {} is empty, storing null", key);
        }
        model.set_raw_attribute(&key, value);
    }

    Ok(())
}
