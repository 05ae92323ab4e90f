//! # Grid Query
//!
//! `gridquery` turns the filter-model JSON emitted by client-side
//! data-grid components into reusable, composable boolean predicates that
//! evaluate against records of any shape. The same parsed filter tree
//! drives two execution targets: eager in-memory filtering, and deferred
//! sources whose storage adapter translates the tree into its own query
//! language.
//!
//! Parsing and compilation are pure, synchronous functions over immutable
//! values, safe to share across threads without locking. Sorting and
//! pagination ride along as small collaborators consuming the filtered
//! sequence.
//!
//! ```rust
//! use gridquery::{FieldMap, filter, query};
//!
//! struct Person {
//!     name: String,
//!     height: f64,
//! }
//!
//! let fields = FieldMap::new()
//!     .field("name", |p: &Person| p.name.clone())
//!     .field("height", |p: &Person| p.height);
//!
//! let filters = filter::parse(
//!     r#"{"name":{"filterType":"text","type":"contains","filter":"o"}}"#,
//! )?;
//!
//! let people = vec![
//!     Person { name: "John".to_string(), height: 1.85 },
//!     Person { name: "Arthur".to_string(), height: 1.66 },
//! ];
//! let matched = query::apply(people, &filters, &fields);
//! assert_eq!(matched.len(), 1);
//! # Ok::<(), gridquery::Error>(())
//! ```

mod error;
pub mod filter;
pub mod paginate;
pub mod predicate;
pub mod query;
pub mod sort;

pub use crate::error::Error;
pub use crate::filter::{Condition, Filter, Operator};
pub use crate::paginate::{PagedList, paginate};
pub use crate::predicate::{FieldMap, FieldValue, Predicate};
pub use crate::query::{Query, QuerySerializer};
pub use crate::sort::{sort, sort_by_field};

/// Result type for `gridquery` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
