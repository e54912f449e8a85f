//! Query plans: filters + sort + pagination for one listing request
//!
//! A [`QueryPlan`] is resolved against an [`EntitySchema`], so every column
//! it references comes from that schema's allow-list and every filter value
//! is already typed. It can be rendered to parameterised SQL or evaluated
//! directly over in-memory records.

use std::cmp::Ordering;
use std::fmt::Write as _;

use super::predicate::{parse_predicates, Operator, Predicate, LIKE_ESCAPE};
use super::schema::{BindValue, ColumnKind, EntitySchema, FieldSource};
use crate::shared::{DomainError, DomainResult, PaginatedResult};

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if raw.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }
}

/// Page size bounds applied while parsing `page_size`.
#[derive(Debug, Clone, Copy)]
pub struct PageLimits {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

/// Paging and ordering parameters as given by the caller, not yet checked against a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    pub page: u64,
    pub page_size: u64,
    pub sort: Option<(String, SortDirection)>,
}

fn first_value<'a, K, V>(pairs: &'a [(K, V)], key: &str) -> Option<&'a str>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .iter()
        .find(|(k, _)| k.as_ref() == key)
        .map(|(_, v)| v.as_ref())
}

fn parse_positive(raw: &str, name: &str) -> DomainResult<u64> {
    let value: u64 = raw
        .trim()
        .parse()
        .map_err(|_| DomainError::BadRequest(format!("invalid {name} value")))?;
    if value == 0 {
        return Err(DomainError::BadRequest(format!("{name} must be at least 1")));
    }
    Ok(value)
}

impl PageOptions {
    /// Read `page`, `page_size` and `sort` from raw query pairs.
    pub fn parse<K, V>(pairs: &[(K, V)], limits: PageLimits) -> DomainResult<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let page = match first_value(pairs, "page") {
            Some(raw) => parse_positive(raw, "page")?,
            None => 1,
        };

        let page_size = match first_value(pairs, "page_size") {
            Some(raw) => parse_positive(raw, "page_size")?.min(limits.max_page_size),
            None => limits.default_page_size,
        };

        let sort = match first_value(pairs, "sort") {
            Some(raw) => {
                let parts: Vec<&str> = raw.split('-').collect();
                let [field, direction] = parts.as_slice() else {
                    return Err(DomainError::BadRequest("invalid sort value".to_string()));
                };
                let direction = SortDirection::parse(direction).ok_or_else(|| {
                    DomainError::BadRequest(format!("invalid sort direction: {direction}"))
                })?;
                Some((field.to_string(), direction))
            }
            None => None,
        };

        Ok(Self {
            page,
            page_size,
            sort,
        })
    }
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            sort: None,
        }
    }
}

/// A predicate resolved against the schema: allow-listed column, typed value.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub column: &'static str,
    pub operator: Operator,
    pub value: BindValue,
}

/// SQL flavour used for identifier quoting and placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlDialect {
    Sqlite,
    Postgres,
    MySql,
}

impl SqlDialect {
    fn quote(&self, ident: &str) -> String {
        match self {
            Self::MySql => format!("`{ident}`"),
            Self::Sqlite | Self::Postgres => format!("\"{ident}\""),
        }
    }

    /// `ESCAPE` clause appended to every `LIKE`.
    fn like_escape(&self) -> &'static str {
        match self {
            Self::MySql => " ESCAPE '\\\\'",
            Self::Sqlite | Self::Postgres => " ESCAPE '\\'",
        }
    }

    /// Placeholder for the `n`-th (1-based) bound value.
    fn placeholder(&self, n: usize) -> String {
        match self {
            Self::Postgres => format!("${n}"),
            Self::Sqlite | Self::MySql => "?".to_string(),
        }
    }
}

/// SQL text plus the values for its placeholders, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedQuery {
    pub sql: String,
    pub values: Vec<BindValue>,
}

#[derive(Debug, Clone)]
pub struct QueryPlan {
    schema: &'static EntitySchema,
    clauses: Vec<Clause>,
    sort_field: &'static str,
    sort_direction: SortDirection,
    page: u64,
    limit: u64,
    offset: u64,
}

impl QueryPlan {
    /// Parse raw query pairs and resolve them against `schema`.
    pub fn from_query<K, V>(
        schema: &'static EntitySchema,
        pairs: &[(K, V)],
        limits: PageLimits,
    ) -> DomainResult<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let predicates = parse_predicates(pairs.iter().map(|(k, v)| (k.as_ref(), v.as_ref())))?;
        let options = PageOptions::parse(pairs, limits)?;
        Self::build(schema, predicates, options)
    }

    pub fn build(
        schema: &'static EntitySchema,
        predicates: Vec<Predicate>,
        options: PageOptions,
    ) -> DomainResult<Self> {
        let clauses = predicates
            .into_iter()
            .map(|p| resolve_clause(schema, p))
            .collect::<DomainResult<Vec<_>>>()?;

        let (sort_field, sort_direction) = match options.sort {
            Some((field, direction)) => {
                let column = schema.sortable(&field).ok_or_else(|| {
                    DomainError::BadRequest(format!("cannot sort {} by '{field}'", schema.entity))
                })?;
                (column.name, direction)
            }
            None => (schema.default_sort, SortDirection::Asc),
        };

        let offset = options
            .page
            .checked_sub(1)
            .and_then(|p| p.checked_mul(options.page_size))
            .filter(|o| i64::try_from(*o).is_ok() && i64::try_from(options.page_size).is_ok())
            .ok_or_else(|| DomainError::BadRequest("invalid page value".to_string()))?;

        Ok(Self {
            schema,
            clauses,
            sort_field,
            sort_direction,
            page: options.page,
            limit: options.page_size,
            offset,
        })
    }

    /// An unfiltered first page with the schema's default ordering.
    pub fn unfiltered(schema: &'static EntitySchema) -> Self {
        Self {
            schema,
            clauses: Vec::new(),
            sort_field: schema.default_sort,
            sort_direction: SortDirection::Asc,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }

    pub fn schema(&self) -> &'static EntitySchema {
        self.schema
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn sort_field(&self) -> &'static str {
        self.sort_field
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    fn render_where(&self, dialect: SqlDialect, sql: &mut String, values: &mut Vec<BindValue>) {
        sql.push_str(" WHERE 1 = 1");
        for clause in &self.clauses {
            values.push(clause.value.clone());
            let _ = write!(
                sql,
                " AND {} {} {}",
                dialect.quote(clause.column),
                clause.operator.as_sql(),
                dialect.placeholder(values.len())
            );
            if clause.operator == Operator::Like {
                sql.push_str(dialect.like_escape());
            }
        }
    }

    /// `SELECT *` for the requested page.
    pub fn render_select(&self, dialect: SqlDialect) -> RenderedQuery {
        let mut sql = format!("SELECT * FROM {}", dialect.quote(self.schema.table));
        let mut values = Vec::with_capacity(self.clauses.len() + 2);
        self.render_where(dialect, &mut sql, &mut values);

        let _ = write!(
            sql,
            " ORDER BY {} {}",
            dialect.quote(self.sort_field),
            self.sort_direction.as_sql()
        );
        if self.sort_field != self.schema.primary_key {
            let _ = write!(sql, ", {} ASC", dialect.quote(self.schema.primary_key));
        }

        values.push(BindValue::Int(i64::try_from(self.limit).unwrap_or(i64::MAX)));
        let _ = write!(sql, " LIMIT {}", dialect.placeholder(values.len()));
        values.push(BindValue::Int(i64::try_from(self.offset).unwrap_or(i64::MAX)));
        let _ = write!(sql, " OFFSET {}", dialect.placeholder(values.len()));

        RenderedQuery { sql, values }
    }

    /// `SELECT COUNT(*) AS total` over the same filters, without paging.
    pub fn render_count(&self, dialect: SqlDialect) -> RenderedQuery {
        let mut sql = format!("SELECT COUNT(*) AS total FROM {}", dialect.quote(self.schema.table));
        let mut values = Vec::with_capacity(self.clauses.len());
        self.render_where(dialect, &mut sql, &mut values);
        RenderedQuery { sql, values }
    }

    /// Whether `record` satisfies every clause.
    pub fn matches<R: FieldSource>(&self, record: &R) -> bool {
        self.clauses.iter().all(|clause| {
            let Some(actual) = record.field_value(clause.column) else {
                return false;
            };
            match clause.operator {
                Operator::Like => match (&actual, &clause.value) {
                    (BindValue::Text(text), BindValue::Text(pattern)) => like_matches(pattern, text),
                    _ => false,
                },
                op => actual.compare(&clause.value).is_some_and(|ord| match op {
                    Operator::Eq => ord == Ordering::Equal,
                    Operator::NotEq => ord != Ordering::Equal,
                    Operator::Gt => ord == Ordering::Greater,
                    Operator::Lt => ord == Ordering::Less,
                    Operator::Gte => ord != Ordering::Less,
                    Operator::Lte => ord != Ordering::Greater,
                    Operator::Like => false,
                }),
            }
        })
    }

    /// Filter, sort and slice in-memory records the way the SQL rendering would.
    pub fn paginate<R, I>(&self, records: I) -> PaginatedResult<R>
    where
        R: FieldSource,
        I: IntoIterator<Item = R>,
    {
        let mut matching: Vec<R> = records.into_iter().filter(|r| self.matches(r)).collect();

        let key = self.sort_field;
        let pk = self.schema.primary_key;
        matching.sort_by(|a, b| {
            let primary = compare_fields(a, b, key);
            let primary = match self.sort_direction {
                SortDirection::Asc => primary,
                SortDirection::Desc => primary.reverse(),
            };
            primary.then_with(|| compare_fields(a, b, pk))
        });

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(self.offset as usize)
            .take(self.limit as usize)
            .collect();

        PaginatedResult::new(items, total, self.page, self.limit)
    }
}

fn compare_fields<R: FieldSource>(a: &R, b: &R, column: &str) -> Ordering {
    match (a.field_value(column), b.field_value(column)) {
        (Some(x), Some(y)) => x.compare(&y).unwrap_or(Ordering::Equal),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn resolve_clause(schema: &'static EntitySchema, predicate: Predicate) -> DomainResult<Clause> {
    let column = schema.filterable(&predicate.field).ok_or_else(|| {
        DomainError::BadQueryParameter(format!(
            "unknown filter field for {}: {}",
            schema.entity, predicate.field
        ))
    })?;

    if column.exact_only && predicate.operator != Operator::Eq {
        return Err(DomainError::BadQueryParameter(format!(
            "only exact matches are supported on {}",
            column.name
        )));
    }

    if predicate.operator == Operator::Like && column.kind != ColumnKind::Text {
        return Err(DomainError::BadQueryParameter(format!(
            "pattern filters are only supported on text fields: {}",
            column.name
        )));
    }

    let value = BindValue::coerce(column.kind, &predicate.value).map_err(|reason| {
        DomainError::BadQueryParameter(format!("invalid value for {}: {reason}", column.name))
    })?;

    Ok(Clause {
        column: column.name,
        operator: predicate.operator,
        value,
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum LikeToken {
    AnyRun,
    AnyChar,
    Literal(char),
}

fn like_tokens(pattern: &str) -> Vec<LikeToken> {
    let mut tokens = Vec::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        let token = match c {
            '%' => LikeToken::AnyRun,
            '_' => LikeToken::AnyChar,
            // a trailing escape matches itself
            LIKE_ESCAPE => LikeToken::Literal(chars.next().unwrap_or(LIKE_ESCAPE)),
            c => LikeToken::Literal(c),
        };
        tokens.push(token);
    }
    tokens
}

/// SQL `LIKE ... ESCAPE '\'` semantics: `%` any run, `_` any single char,
/// `\` makes the next char literal. ASCII case-insensitive.
pub fn like_matches(pattern: &str, text: &str) -> bool {
    let p = like_tokens(pattern);
    let t: Vec<char> = text.chars().collect();
    let same = |a: char, b: char| a.eq_ignore_ascii_case(&b);

    let (mut pi, mut ti) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while ti < t.len() {
        match p.get(pi) {
            Some(LikeToken::AnyRun) => {
                backtrack = Some((pi, ti));
                pi += 1;
                continue;
            }
            Some(LikeToken::AnyChar) => {
                pi += 1;
                ti += 1;
                continue;
            }
            Some(LikeToken::Literal(c)) if same(*c, t[ti]) => {
                pi += 1;
                ti += 1;
                continue;
            }
            _ => {}
        }
        match backtrack {
            Some((star, matched)) => {
                pi = star + 1;
                ti = matched + 1;
                backtrack = Some((star, matched + 1));
            }
            None => return false,
        }
    }

    while p.get(pi) == Some(&LikeToken::AnyRun) {
        pi += 1;
    }
    pi == p.len()
}
