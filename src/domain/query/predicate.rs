//! Filter predicates parsed from query-string pairs
//!
//! `name[sw]=Acme` becomes `name LIKE "Acme%"`, a bare `year=2020` becomes
//! `year = "2020"`. Pattern operators escape `%` and `_` in the value. Values stay strings here; typing them against a column
//! is the plan builder's job.

use std::fmt;

use crate::shared::{DomainError, DomainResult};

/// Query keys that control paging and ordering instead of filtering.
pub const RESERVED_KEYS: [&str; 3] = ["page", "page_size", "sort"];

/// Comparison applied by a predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    NotEq,
    Gt,
    Lt,
    Gte,
    Lte,
    Like,
}

impl Operator {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Gte => ">=",
            Self::Lte => "<=",
            Self::Like => "LIKE",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

#[derive(Debug, Clone, Copy)]
enum Wildcard {
    None,
    Contains,
    StartsWith,
    EndsWith,
}

impl Wildcard {
    fn wrap(self, value: &str) -> String {
        match self {
            Self::None => value.to_string(),
            Self::Contains => format!("%{}%", escape_like(value)),
            Self::StartsWith => format!("{}%", escape_like(value)),
            Self::EndsWith => format!("%{}", escape_like(value)),
        }
    }
}

/// Escape character declared on every rendered `LIKE`.
pub const LIKE_ESCAPE: char = '\\';

/// Make `%`, `_` and the escape character itself match literally.
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

fn resolve_token(token: &str) -> Option<(Operator, Wildcard)> {
    let resolved = match token {
        "eq" => (Operator::Eq, Wildcard::None),
        "neq" => (Operator::NotEq, Wildcard::None),
        "gt" => (Operator::Gt, Wildcard::None),
        "lt" => (Operator::Lt, Wildcard::None),
        "gte" => (Operator::Gte, Wildcard::None),
        "lte" => (Operator::Lte, Wildcard::None),
        "ct" => (Operator::Like, Wildcard::Contains),
        "sw" => (Operator::Like, Wildcard::StartsWith),
        "ew" => (Operator::Like, Wildcard::EndsWith),
        _ => return None,
    };
    Some(resolved)
}

/// A single `field <op> value` condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub field: String,
    pub operator: Operator,
    pub value: String,
}

impl Predicate {
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }
}

/// Split `field[op]` into its parts. Keys without a bracketed suffix have no token.
fn split_key(key: &str) -> (&str, Option<&str>) {
    match key.find('[') {
        Some(open) if key.ends_with(']') => (&key[..open], Some(&key[open + 1..key.len() - 1])),
        _ => (key, None),
    }
}

/// Turn raw query pairs into predicates, skipping the paging/sort keys.
///
/// Every value of a repeated key yields its own predicate; all predicates are
/// meant to be AND-combined.
pub fn parse_predicates<I, K, V>(pairs: I) -> DomainResult<Vec<Predicate>>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut predicates = Vec::new();

    for (key, value) in pairs {
        let key = key.as_ref();
        if RESERVED_KEYS.contains(&key) {
            continue;
        }

        let (field, token) = split_key(key);
        let (operator, wildcard) = match token {
            Some(token) => resolve_token(token).ok_or_else(|| {
                DomainError::BadQueryParameter(format!("invalid operator in filter: {token}"))
            })?,
            None => (Operator::Eq, Wildcard::None),
        };

        predicates.push(Predicate::new(field, operator, wildcard.wrap(value.as_ref())));
    }

    Ok(predicates)
}
