//! # Filter Conditions
//!
//! A condition is the leaf of a parsed filter tree: one comparison against
//! one record field. The variant set is closed, with type-family-specific
//! comparison semantics per variant.

use chrono::NaiveDate;
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::predicate::FieldValue;

/// A single comparison against one record field.
///
/// Each variant carries the target property name (copied from the owning
/// [`Filter`](crate::Filter)) so a condition can be compiled on its own.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum Condition {
    /// Case-insensitive string comparison.
    String(StringCondition),

    /// Numeric comparison with strict inequalities.
    Numeric(NumericCondition),

    /// Day-granularity date comparison.
    Date(DateCondition),

    /// Boolean equality.
    Boolean(BooleanCondition),

    /// Integer-coded enum equality.
    Enum(EnumCondition),
}

impl Condition {
    /// The property name this condition compares against.
    #[must_use]
    pub fn property(&self) -> &str {
        match self {
            Self::String(c) => &c.property,
            Self::Numeric(c) => &c.property,
            Self::Date(c) => &c.property,
            Self::Boolean(c) => &c.property,
            Self::Enum(c) => &c.property,
        }
    }

    /// Evaluate the condition against a resolved field value.
    ///
    /// A value from a different type family than the condition never
    /// matches.
    #[must_use]
    pub fn is_match(&self, value: &FieldValue) -> bool {
        match (self, value) {
            (Self::String(c), FieldValue::Text(v)) => c.is_match(v),
            (Self::Numeric(c), FieldValue::Number(v)) => c.is_match(*v),
            (Self::Date(c), FieldValue::Date(v)) => c.is_match(*v),
            (Self::Boolean(c), FieldValue::Bool(v)) => c.value == *v,
            (Self::Enum(c), FieldValue::Enum(v)) => c.value == *v,
            _ => false,
        }
    }

    pub(crate) fn to_sql(&self) -> String {
        match self {
            Self::String(c) => c.to_sql(),
            Self::Numeric(c) => c.to_sql(),
            Self::Date(c) => c.to_sql(),
            Self::Boolean(c) => format!("{} = {}", c.property, c.value),
            Self::Enum(c) => format!("{} = {}", c.property, c.value),
        }
    }
}

/// String comparison operators.
#[derive(Clone, Copy, Debug, Default, Display, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum StringOperator {
    /// Substring test.
    #[default]
    #[display("contains")]
    Contains,

    /// Negated substring test.
    #[display("notContains")]
    NotContains,

    /// Exact equality.
    #[display("equals")]
    Equals,

    /// Negated equality.
    #[display("notEqual")]
    NotEqual,

    /// Prefix test.
    #[display("startsWith")]
    StartsWith,

    /// Suffix test.
    #[display("endsWith")]
    EndsWith,
}

impl StringOperator {
    /// Map a grid operator token to an operator. An unrecognized token maps
    /// to `Contains`.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token {
            "notContains" => Self::NotContains,
            "equals" => Self::Equals,
            "notEqual" => Self::NotEqual,
            "startsWith" => Self::StartsWith,
            "endsWith" => Self::EndsWith,
            _ => Self::Contains,
        }
    }
}

/// Ordered comparison operators, shared by the numeric and date families.
#[derive(Clone, Copy, Debug, Default, Display, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CompareOperator {
    /// Literal equality.
    #[default]
    #[display("equals")]
    Equals,

    /// Negated equality.
    #[display("notEqual")]
    NotEqual,

    /// Strictly less than (dates: at most).
    #[display("lessThan")]
    LessThan,

    /// At most.
    #[display("lessThanOrEqual")]
    LessThanOrEqual,

    /// Strictly greater than (dates: at least).
    #[display("greaterThan")]
    GreaterThan,

    /// At least.
    #[display("greaterThanOrEqual")]
    GreaterThanOrEqual,

    /// Inclusive on both ends; unsatisfiable unless both bounds are set.
    #[display("inRange")]
    InRange,
}

impl CompareOperator {
    /// Map a grid operator token to an operator. An unrecognized token maps
    /// to `Equals`.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token {
            "notEqual" => Self::NotEqual,
            "lessThan" => Self::LessThan,
            "lessThanOrEqual" => Self::LessThanOrEqual,
            "greaterThan" => Self::GreaterThan,
            "greaterThanOrEqual" => Self::GreaterThanOrEqual,
            "inRange" => Self::InRange,
            _ => Self::Equals,
        }
    }
}

/// Case-insensitive string comparison.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StringCondition {
    /// The property name, case-insensitive.
    pub property: String,

    /// The comparison operator.
    pub operator: StringOperator,

    /// The value compared against, lower-cased at construction.
    pub value: String,
}

impl StringCondition {
    /// Create a new string condition. The value is lower-cased.
    pub fn new(
        property: impl Into<String>, value: impl Into<String>, operator: StringOperator,
    ) -> Self {
        Self {
            property: property.into(),
            operator,
            value: value.into().to_lowercase(),
        }
    }

    fn is_match(&self, value: &str) -> bool {
        let value = value.to_lowercase();
        match self.operator {
            StringOperator::Contains => value.contains(&self.value),
            StringOperator::NotContains => !value.contains(&self.value),
            StringOperator::Equals => value == self.value,
            StringOperator::NotEqual => value != self.value,
            StringOperator::StartsWith => value.starts_with(&self.value),
            StringOperator::EndsWith => value.ends_with(&self.value),
        }
    }

    fn to_sql(&self) -> String {
        let column = format!("LOWER({})", self.property);
        match self.operator {
            StringOperator::Contains => format!("{column} LIKE '%{}%'", self.value),
            StringOperator::NotContains => format!("{column} NOT LIKE '%{}%'", self.value),
            StringOperator::Equals => format!("{column} = '{}'", self.value),
            StringOperator::NotEqual => format!("{column} <> '{}'", self.value),
            StringOperator::StartsWith => format!("{column} LIKE '{}%'", self.value),
            StringOperator::EndsWith => format!("{column} LIKE '%{}'", self.value),
        }
    }
}

/// Numeric comparison over `f64` bounds.
///
/// An absent bound makes any operation needing it unsatisfiable rather than
/// an error: the condition simply never matches.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NumericCondition {
    /// The property name, case-insensitive.
    pub property: String,

    /// The comparison operator.
    pub operator: CompareOperator,

    /// The value compared against, or the lower bound for `InRange`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,

    /// The upper bound, used by `InRange` only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
}

impl NumericCondition {
    /// Create a new numeric condition.
    pub fn new(
        property: impl Into<String>, low: Option<f64>, high: Option<f64>,
        operator: CompareOperator,
    ) -> Self {
        Self {
            property: property.into(),
            operator,
            low,
            high,
        }
    }

    fn is_match(&self, value: f64) -> bool {
        match self.operator {
            CompareOperator::Equals => self.low.is_some_and(|low| value == low),
            CompareOperator::NotEqual => self.low.is_some_and(|low| value != low),
            CompareOperator::LessThan => self.low.is_some_and(|low| value < low),
            CompareOperator::LessThanOrEqual => self.low.is_some_and(|low| value <= low),
            CompareOperator::GreaterThan => self.low.is_some_and(|low| value > low),
            CompareOperator::GreaterThanOrEqual => self.low.is_some_and(|low| value >= low),
            CompareOperator::InRange => match (self.low, self.high) {
                (Some(low), Some(high)) => low <= value && value <= high,
                _ => false,
            },
        }
    }

    fn to_sql(&self) -> String {
        let Some(low) = self.low else {
            return "1=0".to_string();
        };
        match self.operator {
            CompareOperator::Equals => format!("{} = {low}", self.property),
            CompareOperator::NotEqual => format!("{} <> {low}", self.property),
            CompareOperator::LessThan => format!("{} < {low}", self.property),
            CompareOperator::LessThanOrEqual => format!("{} <= {low}", self.property),
            CompareOperator::GreaterThan => format!("{} > {low}", self.property),
            CompareOperator::GreaterThanOrEqual => format!("{} >= {low}", self.property),
            CompareOperator::InRange => self.high.map_or_else(
                || "1=0".to_string(),
                |high| format!("({0} >= {low} AND {0} <= {high})", self.property),
            ),
        }
    }
}

/// Day-granularity date comparison.
///
/// Bounds are [`NaiveDate`], so time-of-day is discarded before any value
/// reaches a comparison. The inequality mapping is intentionally looser
/// than the numeric family's: `GreaterThan` and `GreaterThanOrEqual` both
/// compare `>=`, and `LessThan` and `LessThanOrEqual` both compare `<=`.
/// Grid clients expect this grouping; it is not a bug to align with
/// [`NumericCondition`].
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DateCondition {
    /// The property name, case-insensitive.
    pub property: String,

    /// The comparison operator.
    pub operator: CompareOperator,

    /// The date compared against, or the lower bound for `InRange`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<NaiveDate>,

    /// The upper bound, used by `InRange` only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<NaiveDate>,
}

impl DateCondition {
    /// Create a new date condition.
    pub fn new(
        property: impl Into<String>, low: Option<NaiveDate>, high: Option<NaiveDate>,
        operator: CompareOperator,
    ) -> Self {
        Self {
            property: property.into(),
            operator,
            low,
            high,
        }
    }

    fn is_match(&self, value: NaiveDate) -> bool {
        match self.operator {
            CompareOperator::Equals => self.low.is_some_and(|low| value == low),
            CompareOperator::NotEqual => self.low.is_some_and(|low| value != low),
            CompareOperator::LessThan | CompareOperator::LessThanOrEqual => {
                self.low.is_some_and(|low| value <= low)
            }
            CompareOperator::GreaterThan | CompareOperator::GreaterThanOrEqual => {
                self.low.is_some_and(|low| value >= low)
            }
            CompareOperator::InRange => match (self.low, self.high) {
                (Some(low), Some(high)) => low <= value && value <= high,
                _ => false,
            },
        }
    }

    fn to_sql(&self) -> String {
        let column = format!("DATE({})", self.property);
        let Some(low) = self.low else {
            return "1=0".to_string();
        };
        match self.operator {
            CompareOperator::Equals => format!("{column} = '{low}'"),
            CompareOperator::NotEqual => format!("{column} <> '{low}'"),
            CompareOperator::LessThan | CompareOperator::LessThanOrEqual => {
                format!("{column} <= '{low}'")
            }
            CompareOperator::GreaterThan | CompareOperator::GreaterThanOrEqual => {
                format!("{column} >= '{low}'")
            }
            CompareOperator::InRange => self.high.map_or_else(
                || "1=0".to_string(),
                |high| format!("({column} >= '{low}' AND {column} <= '{high}')"),
            ),
        }
    }
}

/// Boolean equality.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BooleanCondition {
    /// The property name, case-insensitive.
    pub property: String,

    /// The value compared against.
    pub value: bool,
}

impl BooleanCondition {
    /// Create a new boolean condition.
    pub fn new(property: impl Into<String>, value: bool) -> Self {
        Self {
            property: property.into(),
            value,
        }
    }
}

/// Integer-coded enum equality.
///
/// Multiple enum conditions on the same property are always combined with
/// OR, whatever operator the source document carries.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnumCondition {
    /// The property name, case-insensitive.
    pub property: String,

    /// The enum discriminant compared against.
    pub value: i64,
}

impl EnumCondition {
    /// Create a new enum condition.
    pub fn new(property: impl Into<String>, value: i64) -> Self {
        Self {
            property: property.into(),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Operator tokens should map per the grid tables, with lenient
    // defaults for unknown tokens.
    #[test]
    fn operator_tokens() {
        assert_eq!(StringOperator::from_token("notContains"), StringOperator::NotContains);
        assert_eq!(StringOperator::from_token("endsWith"), StringOperator::EndsWith);
        assert_eq!(StringOperator::from_token("blargh"), StringOperator::Contains);
        assert_eq!(CompareOperator::from_token("inRange"), CompareOperator::InRange);
        assert_eq!(CompareOperator::from_token("lessThanOrEqual"), CompareOperator::LessThanOrEqual);
        assert_eq!(CompareOperator::from_token(""), CompareOperator::Equals);
    }

    // String comparisons should be case-insensitive on both sides.
    #[test]
    fn string_case_insensitive() {
        let condition = StringCondition::new("name", "JOHN", StringOperator::Equals);
        assert!(condition.is_match("john"));
        assert!(condition.is_match("John"));
        assert!(!condition.is_match("Johnny"));
    }

    // Numeric inequalities are strict; an equal value fails `GreaterThan`.
    #[test]
    fn numeric_strict() {
        let condition =
            NumericCondition::new("height", Some(1.73), None, CompareOperator::GreaterThan);
        assert!(!condition.is_match(1.73));
        assert!(condition.is_match(1.74));
    }

    // Date inequalities are inclusive; an equal date passes `GreaterThan`
    // and `LessThan` alike.
    #[test]
    fn date_inclusive() {
        let day = NaiveDate::from_ymd_opt(1988, 2, 16).unwrap();
        let gt = DateCondition::new("birthdate", Some(day), None, CompareOperator::GreaterThan);
        let lt = DateCondition::new("birthdate", Some(day), None, CompareOperator::LessThan);
        assert!(gt.is_match(day));
        assert!(lt.is_match(day));
        assert!(!gt.is_match(day.pred_opt().unwrap()));
        assert!(!lt.is_match(day.succ_opt().unwrap()));
    }

    // `InRange` is inclusive on both ends and unsatisfiable with a missing
    // bound.
    #[test]
    fn in_range_bounds() {
        let condition =
            NumericCondition::new("height", Some(1.7), Some(1.8), CompareOperator::InRange);
        assert!(condition.is_match(1.7));
        assert!(condition.is_match(1.8));
        assert!(!condition.is_match(1.69));

        let missing = NumericCondition::new("height", Some(1.7), None, CompareOperator::InRange);
        assert!(!missing.is_match(1.75));
    }

    // An absent bound makes every operation unsatisfiable.
    #[test]
    fn absent_bound() {
        for operator in [
            CompareOperator::Equals,
            CompareOperator::NotEqual,
            CompareOperator::LessThan,
            CompareOperator::GreaterThanOrEqual,
        ] {
            let condition = NumericCondition::new("height", None, None, operator);
            assert!(!condition.is_match(1.0), "{operator} matched with no bound");
        }
    }

    // A value from another type family never matches.
    #[test]
    fn family_mismatch() {
        let condition = Condition::String(StringCondition::new(
            "name",
            "john",
            StringOperator::Contains,
        ));
        assert!(!condition.is_match(&FieldValue::Number(1.0)));
        assert!(!condition.is_match(&FieldValue::Bool(true)));

        let condition = Condition::Enum(EnumCondition::new("role", 1));
        assert!(!condition.is_match(&FieldValue::Number(1.0)));
        assert!(condition.is_match(&FieldValue::Enum(1)));
    }
}
