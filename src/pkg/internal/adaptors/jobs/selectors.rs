use sqlx::PgConnection;

use crate::{
    pkg::internal::adaptors::jobs::{
        filter::JobFilter,
        spec::{JOB_COLUMNS, JobEntry},
    },
    prelude::{ApiError, Result},
};

pub struct JobSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobSelector { pool }
    }

    /// Lists jobs in id order, narrowed by `filter` when it has any criteria.
    pub async fn find_all(&mut self, filter: Option<&JobFilter>) -> Result<Vec<JobEntry>> {
        let rows = match filter.filter(|f| !f.is_empty()) {
            None => {
                sqlx::query_as::<_, JobEntry>(&format!(
                    "SELECT {JOB_COLUMNS} FROM jobs ORDER BY id"
                ))
                .fetch_all(&mut *self.pool)
                .await?
            }
            Some(filter) => {
                let fragment = filter.where_clause()?;
                let query = format!(
                    "SELECT {JOB_COLUMNS} FROM jobs WHERE {} ORDER BY id",
                    fragment.clause
                );
                fragment
                    .bind(sqlx::query_as::<_, JobEntry>(&query))
                    .fetch_all(&mut *self.pool)
                    .await?
            }
        };
        Ok(rows)
    }

    pub async fn get_by_id(&mut self, id: i32) -> Result<JobEntry> {
        sqlx::query_as::<_, JobEntry>(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"))
            .bind(id)
            .fetch_optional(&mut *self.pool)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("No job: {id}")))
    }
}
