//! Parameterized SQL fragments.
//!
//! Fragments carry their clause text together with the values bound to its
//! `$n` placeholders, in placeholder order. Callers that append further
//! placeholders continue numbering from [`SqlFragment::next_placeholder`].

use rust_decimal::Decimal;
use sqlx::{Postgres, postgres::PgArguments, query::QueryAs};

use crate::prelude::{ApiError, Result};

/// A value bound to a positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Integer(Option<i32>),
    Numeric(Option<Decimal>),
}

impl SqlValue {
    pub fn bind_to<'q, O>(
        self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        match self {
            SqlValue::Text(v) => query.bind(v),
            SqlValue::Integer(v) => query.bind(v),
            SqlValue::Numeric(v) => query.bind(v),
        }
    }
}

/// A closed set of updatable fields, identified by their API-facing name.
pub trait Column: Copy + PartialEq {
    fn logical_name(self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq)]
pub struct SqlFragment {
    pub clause: String,
    pub values: Vec<SqlValue>,
}

impl SqlFragment {
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }

    /// Binds every value of the fragment, in placeholder order.
    pub fn bind<'q, O>(
        self,
        mut query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        for value in self.values {
            query = value.bind_to(query);
        }
        query
    }
}

fn physical_name<C: Column>(column: C, aliases: &[(C, &'static str)]) -> &'static str {
    aliases
        .iter()
        .find(|(c, _)| *c == column)
        .map(|(_, name)| *name)
        .unwrap_or_else(|| column.logical_name())
}

/// Builds the `SET` part of a partial update.
///
/// `data` order decides placeholder order: the n-th entry becomes
/// `"<column>"=$n`. Columns listed in `aliases` are renamed to their
/// physical name, everything else keeps its logical name.
///
/// Fails with a bad request when there is nothing to update.
pub fn sql_for_partial_update<C: Column>(
    data: Vec<(C, SqlValue)>,
    aliases: &[(C, &'static str)],
) -> Result<SqlFragment> {
    if data.is_empty() {
        return Err(ApiError::BadRequest("No data".to_string()));
    }
    let mut cols = Vec::with_capacity(data.len());
    let mut values = Vec::with_capacity(data.len());
    for (idx, (column, value)) in data.into_iter().enumerate() {
        cols.push(format!(r#""{}"=${}"#, physical_name(column, aliases), idx + 1));
        values.push(value);
    }
    Ok(SqlFragment {
        clause: cols.join(", "),
        values,
    })
}
