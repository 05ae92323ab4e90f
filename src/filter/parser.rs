//! # Filter Grammar Parser
//!
//! Parses the filter-model JSON emitted by data-grid clients into
//! [`Filter`] trees. The document is one object whose keys are property
//! names; each value is either a leaf node (`filterType` plus the family's
//! value keys) or a compound node (`operator` with `condition1` and
//! `condition2`, nesting to any depth).
//!
//! The parser is deliberately lenient where the grid is sloppy: unknown
//! `filterType`s contribute no conditions, unknown operator tokens fall
//! back to the family's baseline operation, and unparseable number or date
//! literals become absent bounds. Malformed JSON, and boolean or enum
//! literals with no usable value, are errors.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

use crate::filter::condition::{
    BooleanCondition, CompareOperator, Condition, DateCondition, EnumCondition, NumericCondition,
    StringCondition, StringOperator,
};
use crate::filter::{Filter, Operator};
use crate::{Result, parse_err, value_err};

/// Parse a filter document into one [`Filter`] per property.
///
/// Empty (or all-whitespace) input yields an empty list. A property whose
/// node produces no conditions is dropped, so every returned filter holds
/// at least one condition.
///
/// # Errors
///
/// Returns `Error::Parse` when the document is not valid JSON, the root is
/// not an object, or a compound node is missing a sub-condition, and
/// `Error::Value` when a boolean or enum literal cannot be parsed. No
/// partial filter list is returned on error.
pub fn parse(json: &str) -> Result<Vec<Filter>> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }

    let root = serde_json::from_str::<Value>(json)?;
    let Value::Object(properties) = root else {
        return Err(parse_err!("filter document root must be a JSON object"));
    };

    let mut filters = Vec::new();

    for (property, node) in properties {
        let Value::Object(node) = node else {
            tracing::debug!("dropping filter for `{property}`: node is not an object");
            continue;
        };

        let mut filter = Filter::new(&property);
        filter.conditions = parse_node(&property, &mut filter.operator, &node)?;
        if filter.conditions.is_empty() {
            tracing::debug!("dropping filter for `{property}`: no conditions produced");
            continue;
        }

        // a group of enum conditions always combines with OR
        if filter.conditions.iter().all(|c| matches!(c, Condition::Enum(_))) {
            filter.operator = Operator::Or;
        }

        filters.push(filter);
    }

    Ok(filters)
}

// A node is compound iff it has an `operator` key; otherwise it is a leaf
// dispatched on `filterType`. Compound recursion concatenates both
// sub-nodes' conditions and then sets the owning operator, so the
// outermost compound's operator wins.
fn parse_node(
    property: &str, operator: &mut Operator, node: &Map<String, Value>,
) -> Result<Vec<Condition>> {
    if node.contains_key("operator") {
        let token = node.get("operator").and_then(Value::as_str).unwrap_or_default();

        let mut conditions = parse_node(property, operator, child(property, node, "condition1")?)?;
        conditions.extend(parse_node(property, operator, child(property, node, "condition2")?)?);
        *operator = Operator::from_token(token);

        return Ok(conditions);
    }

    let Some(filter_type) = node.get("filterType").and_then(Value::as_str) else {
        tracing::debug!("leaf for `{property}` has no `filterType`: no conditions produced");
        return Ok(Vec::new());
    };

    match filter_type {
        "text" => {
            let Some(value) = string_value(node.get("filter")) else {
                return Err(parse_err!("text filter for `{property}` is missing `filter`"));
            };
            let op = StringOperator::from_token(operation(node));
            Ok(vec![StringCondition::new(property, value, op).into()])
        }
        "number" => {
            let low = string_value(node.get("filter")).and_then(|v| v.parse::<f64>().ok());
            let high = string_value(node.get("filterTo")).and_then(|v| v.parse::<f64>().ok());
            let op = CompareOperator::from_token(operation(node));
            Ok(vec![NumericCondition::new(property, low, high, op).into()])
        }
        "date" => {
            let low = string_value(node.get("dateFrom")).and_then(|v| parse_date(&v));
            let high = string_value(node.get("dateTo")).and_then(|v| parse_date(&v));
            let op = CompareOperator::from_token(operation(node));
            Ok(vec![DateCondition::new(property, low, high, op).into()])
        }
        "bool" => {
            let Some(value) = string_value(node.get("filter")) else {
                return Err(parse_err!("bool filter for `{property}` is missing `filter`"));
            };
            let value = parse_bool(&value)
                .ok_or_else(|| value_err!("bool filter for `{property}`: {value:?}"))?;
            Ok(vec![BooleanCondition::new(property, value).into()])
        }
        "enum" => {
            let Some(value) = string_value(node.get("filter")) else {
                return Err(parse_err!("enum filter for `{property}` is missing `filter`"));
            };
            let mut conditions = Vec::new();
            for token in value.split(';') {
                let value = token
                    .parse::<i64>()
                    .map_err(|_| value_err!("enum filter for `{property}`: {token:?}"))?;
                conditions.push(EnumCondition::new(property, value).into());
            }
            *operator = Operator::Or;
            Ok(conditions)
        }
        other => {
            tracing::debug!("ignoring unknown filterType `{other}` for `{property}`");
            Ok(Vec::new())
        }
    }
}

fn child<'a>(
    property: &str, node: &'a Map<String, Value>, key: &str,
) -> Result<&'a Map<String, Value>> {
    match node.get(key) {
        Some(Value::Object(child)) => Ok(child),
        Some(_) => Err(parse_err!("compound filter for `{property}`: `{key}` must be an object")),
        None => Err(parse_err!("compound filter for `{property}` is missing `{key}`")),
    }
}

fn operation(node: &Map<String, Value>) -> &str {
    node.get("type").and_then(Value::as_str).unwrap_or_default()
}

// The grid sends values as either JSON strings or numbers; normalize both
// to text before family-specific parsing. Explicit null is treated as
// absent.
fn string_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

// Grid date payloads arrive as `2020-12-03 00:00:00`, an ISO 8601
// variant, or a bare date. Whatever the form, only the day survives.
fn parse_date(value: &str) -> Option<NaiveDate> {
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(datetime.date());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(datetime.date());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(value).ok().map(|datetime| datetime.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    // Empty or blank input yields an empty filter list, not an error.
    #[test]
    fn empty_input() {
        assert_eq!(parse("").unwrap(), Vec::new());
        assert_eq!(parse("  \n ").unwrap(), Vec::new());
    }

    // Malformed JSON and non-object roots fail without a partial result.
    #[test]
    fn malformed_input() {
        assert!(matches!(parse("{\"name\":").unwrap_err(), Error::Parse(_)));
        assert!(matches!(parse("[1, 2]").unwrap_err(), Error::Parse(_)));
    }

    // A text leaf becomes one string condition with the mapped operator.
    #[test]
    fn text_leaf() {
        let filters =
            parse(r#"{"name":{"filterType":"text","type":"startsWith","filter":"Jo"}}"#).unwrap();
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0].property, "name");
        assert_eq!(
            filters[0].conditions[0],
            Condition::String(StringCondition::new("name", "jo", StringOperator::StartsWith))
        );
    }

    // An unknown operator token falls back to the family baseline.
    #[test]
    fn unknown_operator_token() {
        let filters =
            parse(r#"{"name":{"filterType":"text","type":"sideways","filter":"o"}}"#).unwrap();
        let Condition::String(condition) = &filters[0].conditions[0] else {
            panic!("should be a string condition");
        };
        assert_eq!(condition.operator, StringOperator::Contains);

        let filters =
            parse(r#"{"id":{"filterType":"number","type":"sideways","filter":3}}"#).unwrap();
        let Condition::Numeric(condition) = &filters[0].conditions[0] else {
            panic!("should be a numeric condition");
        };
        assert_eq!(condition.operator, CompareOperator::Equals);
    }

    // Number bounds accept both JSON numbers and numeric strings, and an
    // unparseable literal becomes an absent bound.
    #[test]
    fn number_bounds() {
        let filters = parse(
            r#"{"height":{"filterType":"number","type":"inRange","filter":"1.7","filterTo":1.8}}"#,
        )
        .unwrap();
        assert_eq!(
            filters[0].conditions[0],
            Condition::Numeric(NumericCondition::new(
                "height",
                Some(1.7),
                Some(1.8),
                CompareOperator::InRange
            ))
        );

        let filters =
            parse(r#"{"height":{"filterType":"number","type":"equals","filter":"tall"}}"#).unwrap();
        assert_eq!(
            filters[0].conditions[0],
            Condition::Numeric(NumericCondition::new("height", None, None, CompareOperator::Equals))
        );
    }

    // Date payloads are truncated to the day whatever their format.
    #[test]
    fn date_truncation() {
        for payload in ["1988-02-16 13:45:00", "1988-02-16T13:45:00", "1988-02-16"] {
            let json = format!(
                r#"{{"birthdate":{{"filterType":"date","type":"equals","dateFrom":"{payload}"}}}}"#
            );
            let filters = parse(&json).unwrap();
            let Condition::Date(condition) = &filters[0].conditions[0] else {
                panic!("should be a date condition");
            };
            assert_eq!(condition.low, NaiveDate::from_ymd_opt(1988, 2, 16));
        }
    }

    // A boolean literal with no usable value is an error.
    #[test]
    fn bool_leaf() {
        let filters = parse(r#"{"active":{"filterType":"bool","filter":"True"}}"#).unwrap();
        assert_eq!(filters[0].conditions[0], Condition::Boolean(BooleanCondition::new("active", true)));

        let filters = parse(r#"{"active":{"filterType":"bool","filter":false}}"#).unwrap();
        assert_eq!(
            filters[0].conditions[0],
            Condition::Boolean(BooleanCondition::new("active", false))
        );

        let err = parse(r#"{"active":{"filterType":"bool","filter":"maybe"}}"#).unwrap_err();
        assert!(matches!(err, Error::Value(_)));
    }

    // An enum leaf splits on `;` into one condition per value and forces
    // the filter's operator to OR.
    #[test]
    fn enum_leaf() {
        let filters = parse(r#"{"role":{"filterType":"enum","filter":"0;1"}}"#).unwrap();
        assert_eq!(filters[0].operator, Operator::Or);
        assert_eq!(
            filters[0].conditions,
            vec![
                Condition::Enum(EnumCondition::new("role", 0)),
                Condition::Enum(EnumCondition::new("role", 1))
            ]
        );

        let err = parse(r#"{"role":{"filterType":"enum","filter":"0;x"}}"#).unwrap_err();
        assert!(matches!(err, Error::Value(_)));
    }

    // An unknown filterType contributes nothing; a filter left empty is
    // dropped entirely.
    #[test]
    fn unknown_filter_type() {
        let filters = parse(r#"{"name":{"filterType":"fuzzy","filter":"o"}}"#).unwrap();
        assert!(filters.is_empty());
    }

    // Compound nodes recurse: both sub-conditions land in one filter with
    // the compound's operator; nesting goes arbitrarily deep.
    #[test]
    fn compound_nodes() {
        let json = r#"{"surname":{"filterType":"text","operator":"and",
            "condition1":{"filterType":"text","type":"contains","filter":"e"},
            "condition2":{"filterType":"text","type":"endsWith","filter":"n"}}}"#;
        let filters = parse(json).unwrap();
        assert_eq!(filters[0].operator, Operator::And);
        assert_eq!(filters[0].conditions.len(), 2);

        let nested = r#"{"surname":{"filterType":"text","operator":"OR",
            "condition1":{"filterType":"text","operator":"AND",
                "condition1":{"filterType":"text","type":"contains","filter":"a"},
                "condition2":{"filterType":"text","type":"contains","filter":"b"}},
            "condition2":{"filterType":"text","type":"endsWith","filter":"n"}}}"#;
        let filters = parse(nested).unwrap();
        assert_eq!(filters[0].operator, Operator::Or);
        assert_eq!(filters[0].conditions.len(), 3);
    }

    // An unrecognized compound operator token defaults to OR.
    #[test]
    fn unknown_compound_operator() {
        let json = r#"{"surname":{"filterType":"text","operator":"XOR",
            "condition1":{"filterType":"text","type":"contains","filter":"e"},
            "condition2":{"filterType":"text","type":"endsWith","filter":"n"}}}"#;
        let filters = parse(json).unwrap();
        assert_eq!(filters[0].operator, Operator::Or);
    }

    // A compound node missing a sub-condition is a parse error.
    #[test]
    fn compound_missing_condition() {
        let json = r#"{"surname":{"filterType":"text","operator":"AND",
            "condition1":{"filterType":"text","type":"contains","filter":"e"}}}"#;
        assert!(matches!(parse(json).unwrap_err(), Error::Parse(_)));
    }

    // Multiple properties produce one filter each, in document order.
    #[test]
    fn multiple_properties() {
        let json = r#"{"name":{"filterType":"text","type":"contains","filter":"o"},
            "id":{"filterType":"number","type":"equals","filter":3}}"#;
        let filters = parse(json).unwrap();
        assert_eq!(filters.len(), 2);
        assert_eq!(filters[0].property, "name");
        assert_eq!(filters[1].property, "id");
    }
}
