//! Listing queries
//!
//! Raw `field[op]=value` pairs are parsed into [`Predicate`]s, then resolved
//! against an entity's [`EntitySchema`] into a [`QueryPlan`] that persistence
//! adapters either render to parameterised SQL or evaluate in memory.

pub mod plan;
pub mod predicate;
pub mod schema;

pub use plan::{
    like_matches, Clause, PageLimits, PageOptions, QueryPlan, RenderedQuery, SortDirection,
    SqlDialect, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use predicate::{parse_predicates, Operator, Predicate, RESERVED_KEYS};
pub use schema::{BindValue, ColumnKind, ColumnSpec, EntitySchema, FieldSource};
