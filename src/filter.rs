//! # Filters
//!
//! A [`Filter`] groups the conditions parsed for one property of a filter
//! document, together with the operator used to combine them.

pub mod condition;
mod parser;

use derive_more::Display;
use serde::{Deserialize, Serialize};

pub use self::condition::{
    BooleanCondition, CompareOperator, Condition, DateCondition, EnumCondition, NumericCondition,
    StringCondition, StringOperator,
};
pub use self::parser::parse;

/// Logical combinator for a filter's conditions.
#[derive(Clone, Copy, Debug, Default, Display, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    /// Every condition must match.
    #[default]
    #[display("AND")]
    And,

    /// At least one condition must match.
    #[display("OR")]
    Or,
}

impl Operator {
    /// Map a grid operator token to an operator, case-insensitively. An
    /// unrecognized token maps to `Or`.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        if token.eq_ignore_ascii_case("AND") { Self::And } else { Self::Or }
    }
}

/// The conditions parsed for one property of a filter document.
///
/// `operator` only matters when `conditions` holds more than one entry, and
/// is forced to [`Operator::Or`] for a group of enum conditions. Filters
/// are immutable once parsed; use [`Clone`] to reuse one across independent
/// compilations.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    /// The property (JSON key) the filter applies to.
    pub property: String,

    /// Combinator for multi-condition filters.
    pub operator: Operator,

    /// The parsed conditions, at least one.
    pub conditions: Vec<Condition>,
}

impl Filter {
    /// Create a filter for a property with no conditions yet.
    #[must_use]
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            operator: Operator::default(),
            conditions: Vec::new(),
        }
    }

    /// Add a condition to the filter.
    #[must_use]
    pub fn condition(mut self, condition: impl Into<Condition>) -> Self {
        self.conditions.push(condition.into());
        self
    }

    /// Set the combinator used for multi-condition filters.
    #[must_use]
    pub const fn operator(mut self, operator: Operator) -> Self {
        self.operator = operator;
        self
    }

    /// True when the filter holds more than one condition.
    #[must_use]
    pub fn has_multiple_conditions(&self) -> bool {
        self.conditions.len() > 1
    }

    pub(crate) fn to_sql(&self) -> String {
        let joiner = format!(" {} ", self.operator);
        let clauses =
            self.conditions.iter().map(Condition::to_sql).collect::<Vec<_>>().join(&joiner);

        if self.has_multiple_conditions() { format!("({clauses})") } else { clauses }
    }
}

impl From<StringCondition> for Condition {
    fn from(condition: StringCondition) -> Self {
        Self::String(condition)
    }
}

impl From<NumericCondition> for Condition {
    fn from(condition: NumericCondition) -> Self {
        Self::Numeric(condition)
    }
}

impl From<DateCondition> for Condition {
    fn from(condition: DateCondition) -> Self {
        Self::Date(condition)
    }
}

impl From<BooleanCondition> for Condition {
    fn from(condition: BooleanCondition) -> Self {
        Self::Boolean(condition)
    }
}

impl From<EnumCondition> for Condition {
    fn from(condition: EnumCondition) -> Self {
        Self::Enum(condition)
    }
}
