//! # Predicate Compiler
//!
//! Compiles a parsed [`Filter`] into a reusable boolean predicate over an
//! arbitrary record type. Records expose their fields through a
//! [`FieldMap`], a registration-time table from lower-cased field name to
//! a typed getter, so compilation needs no runtime reflection and field
//! lookup stays case-insensitive. The compiler produces closures; the same
//! `Filter` tree can instead be walked by a storage adapter for deferred
//! execution (see [`crate::query`]).

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::filter::{Condition, Filter, Operator};

/// A record field projected into one of the comparable type families.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// A string field.
    Text(String),

    /// A numeric field.
    Number(f64),

    /// A date field, day granularity.
    Date(NaiveDate),

    /// A boolean field.
    Bool(bool),

    /// An integer-coded enum field.
    Enum(i64),
}

impl FieldValue {
    /// Order two values of the same family; values from different families
    /// compare as equal so sorting leaves their relative order alone.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Enum(a), Self::Enum(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::Date(value.date())
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value.date_naive())
    }
}

type Getter<T> = Arc<dyn Fn(&T) -> FieldValue + Send + Sync>;

/// The field-accessor capability for a record type: lower-cased field name
/// to typed getter, built once per type and shared across compilations.
pub struct FieldMap<T> {
    fields: HashMap<String, Getter<T>>,
}

impl<T> FieldMap<T> {
    /// Create an empty field map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Register a field getter. The name is lower-cased so later lookups
    /// are case-insensitive.
    #[must_use]
    pub fn field<V, F>(mut self, name: &str, getter: F) -> Self
    where
        V: Into<FieldValue>,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.fields.insert(name.to_lowercase(), Arc::new(move |record| getter(record).into()));
        self
    }

    /// Project a record's named field, or `None` when the record type has
    /// no such field.
    #[must_use]
    pub fn value(&self, record: &T, name: &str) -> Option<FieldValue> {
        self.resolve(name).map(|getter| getter(record))
    }

    pub(crate) fn resolve(&self, name: &str) -> Option<&Getter<T>> {
        self.fields.get(&name.to_lowercase())
    }
}

impl<T> Default for FieldMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for FieldMap<T> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
        }
    }
}

impl<T> fmt::Debug for FieldMap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMap").field("fields", &self.fields.keys()).finish()
    }
}

/// A compiled boolean predicate over records of type `T`.
pub struct Predicate<T> {
    test: Box<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Predicate<T> {
    /// Wrap a closure as a predicate.
    pub fn new(test: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self {
            test: Box::new(test),
        }
    }

    /// Evaluate the predicate against a record.
    #[must_use]
    pub fn is_match(&self, record: &T) -> bool {
        (self.test)(record)
    }

    /// Combine two predicates with logical AND.
    #[must_use]
    pub fn and(self, other: Self) -> Self
    where
        T: 'static,
    {
        Self::new(move |record| self.is_match(record) && other.is_match(record))
    }

    /// Combine two predicates with logical OR.
    #[must_use]
    pub fn or(self, other: Self) -> Self
    where
        T: 'static,
    {
        Self::new(move |record| self.is_match(record) || other.is_match(record))
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate").finish_non_exhaustive()
    }
}

/// Compile one filter into a predicate.
///
/// Conditions whose property cannot be resolved against the field map are
/// skipped: the first condition that does resolve seeds the fold and the
/// rest combine left-to-right with the filter's operator. `None` means the
/// filter places no restriction at all: either it had no conditions or
/// none of its properties exist on `T`.
pub fn compile<T: 'static>(filter: &Filter, fields: &FieldMap<T>) -> Option<Predicate<T>> {
    let mut compiled: Option<Predicate<T>> = None;

    for condition in &filter.conditions {
        let Some(predicate) = compile_condition(condition, fields) else {
            continue;
        };
        compiled = Some(match compiled {
            None => predicate,
            Some(existing) => match filter.operator {
                Operator::And => existing.and(predicate),
                Operator::Or => existing.or(predicate),
            },
        });
    }

    compiled
}

/// Compile a filter list into a single predicate. Filters combine with
/// logical AND; an empty or wholly unresolvable list yields `None`.
pub fn compile_all<T: 'static>(filters: &[Filter], fields: &FieldMap<T>) -> Option<Predicate<T>> {
    let mut compiled: Option<Predicate<T>> = None;

    for filter in filters {
        let Some(predicate) = compile(filter, fields) else {
            continue;
        };
        compiled = Some(match compiled {
            None => predicate,
            Some(existing) => existing.and(predicate),
        });
    }

    compiled
}

fn compile_condition<T: 'static>(condition: &Condition, fields: &FieldMap<T>) -> Option<Predicate<T>> {
    let getter = fields.resolve(condition.property())?.clone();
    let condition = condition.clone();
    Some(Predicate::new(move |record| condition.is_match(&getter(record))))
}
