//! # Query Application
//!
//! Applies compiled filters to a data source. Two execution targets share
//! the same filter tree: in-memory sequences are filtered eagerly with
//! iteration order preserved, while deferred sources receive a
//! representation of the query they can translate into their own execution
//! engine via [`QuerySerializer`].

use serde::Deserialize;

use crate::filter::Filter;
use crate::predicate::{self, FieldMap};
use crate::{Result, filter};

/// `QuerySerializer` is used to provide overridable query serialization
/// for deferred sources.
///
/// The default implementation on [`Query`] serializes the filter tree to a
/// SQL boolean expression, but storage adapters can walk the same tree and
/// serialize to whatever their backend executes, for example a BSON
/// query for `MongoDB`.
///
/// # Example
///
/// ```rust
/// use gridquery::query::{Query, QuerySerializer};
///
/// struct CountQuery(Query);
///
/// impl QuerySerializer for CountQuery {
///     type Output = String;
///
///     fn serialize(&self) -> Self::Output {
///         format!("SELECT COUNT(*) FROM people WHERE {}", self.0.serialize())
///     }
/// }
/// ```
pub trait QuerySerializer {
    /// The output type of the serialization.
    type Output;

    /// Serialize the query to the output type.
    fn serialize(&self) -> Self::Output;
}

/// A parsed filter list, ready to hand to either execution target.
#[derive(Clone, Debug, Default, Deserialize, serde::Serialize, PartialEq)]
pub struct Query {
    /// One filter per property; properties combine with logical AND.
    pub filters: Vec<Filter>,
}

impl Query {
    /// Wrap an already-parsed filter list.
    #[must_use]
    pub fn new(filters: Vec<Filter>) -> Self {
        Self { filters }
    }

    /// Parse a filter document into a query.
    ///
    /// # Errors
    ///
    /// Propagates [`filter::parse`] errors.
    pub fn parse(json: &str) -> Result<Self> {
        Ok(Self::new(filter::parse(json)?))
    }

    /// Evaluate the query against a single record.
    #[must_use]
    pub fn is_match<T: 'static>(&self, record: &T, fields: &FieldMap<T>) -> bool {
        is_match(record, &self.filters, fields)
    }

    /// Filter an in-memory sequence.
    #[must_use]
    pub fn apply<T: 'static>(&self, source: Vec<T>, fields: &FieldMap<T>) -> Vec<T> {
        apply(source, &self.filters, fields)
    }
}

impl QuerySerializer for Query {
    type Output = String;

    fn serialize(&self) -> Self::Output {
        if self.filters.is_empty() {
            return "1=1".to_string();
        }
        self.filters.iter().map(Filter::to_sql).collect::<Vec<_>>().join("\nAND ")
    }
}

/// Filter an in-memory sequence, preserving the relative order of matching
/// elements. An empty filter list is the identity transform; so is a list
/// in which no filter resolves a property of `T`.
#[must_use]
pub fn apply<T: 'static>(source: Vec<T>, filters: &[Filter], fields: &FieldMap<T>) -> Vec<T> {
    let Some(predicate) = predicate::compile_all(filters, fields) else {
        return source;
    };
    source.into_iter().filter(|record| predicate.is_match(record)).collect()
}

/// Evaluate a filter list against a single record. Filters combine with
/// logical AND; an empty list matches everything.
#[must_use]
pub fn is_match<T: 'static>(record: &T, filters: &[Filter], fields: &FieldMap<T>) -> bool {
    predicate::compile_all(filters, fields).is_none_or(|predicate| predicate.is_match(record))
}
