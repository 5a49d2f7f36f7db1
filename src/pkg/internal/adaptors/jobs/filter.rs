use rust_decimal::Decimal;

use crate::{
    pkg::internal::sql::{SqlFragment, SqlValue},
    prelude::{ApiError, Result},
};

/// Search criteria for listing jobs.
///
/// - `title`: case-insensitive substring match
/// - `min_salary`: salary at or above the given amount
/// - `has_equity`: only `Some(true)` filters, to jobs with non-zero equity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilter {
    pub title: Option<String>,
    pub min_salary: Option<i32>,
    pub has_equity: Option<bool>,
}

impl JobFilter {
    /// True when no predicate would be produced.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.min_salary.is_none() && self.has_equity != Some(true)
    }

    /// Builds the body of the `WHERE` clause.
    ///
    /// An empty filter has no valid `WHERE` body; callers must take the
    /// unfiltered path when [`JobFilter::is_empty`] holds.
    pub fn where_clause(&self) -> Result<SqlFragment> {
        if self.is_empty() {
            return Err(ApiError::BadRequest(
                "no filter criteria given".to_string(),
            ));
        }
        let mut predicates = Vec::new();
        let mut values = Vec::new();
        if let Some(title) = &self.title {
            values.push(SqlValue::Text(title.clone()));
            predicates.push(format!(r#""title" ILIKE '%' || ${} || '%'"#, values.len()));
        }
        if let Some(min_salary) = self.min_salary {
            values.push(SqlValue::Integer(Some(min_salary)));
            predicates.push(format!(r#""salary" >= ${}"#, values.len()));
        }
        if self.has_equity == Some(true) {
            values.push(SqlValue::Numeric(Some(Decimal::ZERO)));
            predicates.push(format!(r#""equity" > ${}"#, values.len()));
        }
        Ok(SqlFragment {
            clause: predicates.join(" AND "),
            values,
        })
    }
}
