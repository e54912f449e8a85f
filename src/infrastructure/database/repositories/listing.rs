//! Execute a [`QueryPlan`] as raw SQL
//!
//! The plan renders allow-listed identifiers and placeholders only; every
//! filter value, LIMIT and OFFSET travels as a bound parameter.

use sea_orm::{ConnectionTrait, DbBackend, EntityTrait, FromQueryResult, Statement, Value};
use tracing::debug;

use crate::domain::query::{BindValue, QueryPlan, RenderedQuery, SqlDialect};
use crate::shared::{DomainError, DomainResult, PaginatedResult};

#[derive(Debug, FromQueryResult)]
struct CountRow {
    total: i64,
}

pub(super) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Database(e.to_string())
}

fn dialect_for(backend: DbBackend) -> SqlDialect {
    match backend {
        DbBackend::Postgres => SqlDialect::Postgres,
        DbBackend::MySql => SqlDialect::MySql,
        _ => SqlDialect::Sqlite,
    }
}

fn to_value(value: BindValue) -> Value {
    match value {
        BindValue::Int(v) => v.into(),
        BindValue::Decimal(v) => v.into(),
        BindValue::Text(v) => v.into(),
        BindValue::Date(v) => v.into(),
        BindValue::Timestamp(v) => v.into(),
    }
}

fn statement(backend: DbBackend, query: RenderedQuery) -> Statement {
    Statement::from_sql_and_values(backend, query.sql, query.values.into_iter().map(to_value))
}

/// Count and fetch one page of `E` rows matching `plan`.
pub(super) async fn fetch_page<E, C>(
    db: &C,
    plan: &QueryPlan,
) -> DomainResult<PaginatedResult<E::Model>>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let backend = db.get_database_backend();
    let dialect = dialect_for(backend);

    let count = plan.render_count(dialect);
    let select = plan.render_select(dialect);
    debug!(sql = %select.sql, binds = select.values.len(), "Running listing query");

    let total = CountRow::find_by_statement(statement(backend, count))
        .one(db)
        .await
        .map_err(db_err)?
        .map_or(0, |row| row.total.max(0) as u64);

    let models = E::find()
        .from_raw_sql(statement(backend, select))
        .all(db)
        .await
        .map_err(db_err)?;

    Ok(PaginatedResult::new(models, total, plan.page(), plan.limit()))
}
