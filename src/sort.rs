//! # Sorting
//!
//! Orders an in-memory sequence by a named field resolved through the
//! record type's [`FieldMap`]. An unknown field name leaves the source
//! untouched: sorting is a best-effort collaborator, never a failure.

use crate::predicate::FieldMap;

/// Sort a sequence by a spec of the form `"<field>[;asc|desc]"` (default
/// ascending, case-insensitive field name).
///
/// An empty spec, the literal `"null"`, or a field that does not resolve
/// on `T` returns the source unchanged in its original order.
#[must_use]
pub fn sort<T>(source: Vec<T>, spec: &str, fields: &FieldMap<T>) -> Vec<T> {
    if spec.is_empty() || spec == "null" {
        return source;
    }

    let mut parts = spec.split(';');
    let field = parts.next().unwrap_or_default();
    let ascending = parts.next().is_none_or(|direction| direction.to_lowercase().contains("asc"));

    sort_by_field(source, field, ascending, fields)
}

/// Sort a sequence by a named field, ascending or descending.
///
/// The sort is stable: elements that compare equal keep their relative
/// order. An unresolvable field returns the source unchanged.
#[must_use]
pub fn sort_by_field<T>(
    mut source: Vec<T>, field: &str, ascending: bool, fields: &FieldMap<T>,
) -> Vec<T> {
    if field.is_empty() || field == "null" {
        return source;
    }
    let Some(getter) = fields.resolve(field) else {
        return source;
    };

    source.sort_by(|a, b| {
        let ordering = getter(a).compare(&getter(b));
        if ascending { ordering } else { ordering.reverse() }
    });
    source
}
