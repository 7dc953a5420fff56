use crate::Attributes;

/// Returns the attributes whose keys are declared nullable, in the
/// attributes' own order.
///
/// Nothing is nullable unless a model opts in, so an empty declaration
/// selects nothing. Declared names with no matching attribute are skipped.
pub fn nullable_from_attributes(attributes: &Attributes, nullable: &[String]) -> Attributes {
    if nullable.is_empty() {
        return Attributes::new();
    }

    attributes
        .iter()
        .filter(|(key, _)| nullable.iter().any(|name| name == *key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
