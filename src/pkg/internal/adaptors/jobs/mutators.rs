use sqlx::PgConnection;

use crate::pkg::internal::adaptors::jobs::spec::{JOB_COLUMN_ALIASES, JOB_COLUMNS, JobEntry};
use crate::pkg::internal::sql::sql_for_partial_update;
use crate::pkg::server::handlers::jobs::{CreateJobInput, PatchJobInput};
use crate::prelude::{ApiError, Result};

pub struct JobMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobMutator { pool }
    }

    pub async fn create(&mut self, job: CreateJobInput) -> Result<JobEntry> {
        let row = sqlx::query_as::<_, JobEntry>(&format!(
            r#"
            INSERT INTO jobs (title, salary, equity, company_handle)
            VALUES ($1, $2, $3, $4)
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(&job.title)
        .bind(job.salary)
        .bind(job.equity)
        .bind(&job.company_handle)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    /// Applies a partial update; only the fields present in `job` change.
    pub async fn update(&mut self, id: i32, job: PatchJobInput) -> Result<JobEntry> {
        let fragment = sql_for_partial_update(job.into_fields(), JOB_COLUMN_ALIASES)?;
        let query = format!(
            "UPDATE jobs SET {} WHERE id = ${} RETURNING {JOB_COLUMNS}",
            fragment.clause,
            fragment.next_placeholder()
        );
        fragment
            .bind(sqlx::query_as::<_, JobEntry>(&query))
            .bind(id)
            .fetch_optional(&mut *self.pool)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("No job: {id}")))
    }

    pub async fn delete(&mut self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&mut *self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("No job: {id}")));
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "db-tests"))]
mod tests {
    use rust_decimal::Decimal;
    use sqlx::PgPool;

    use super::JobMutator;
    use crate::{
        pkg::{
            internal::adaptors::jobs::{selectors::JobSelector, spec::JobEntry},
            server::handlers::jobs::{CreateJobInput, PatchJobInput},
        },
        prelude::{ApiError, Result},
    };

    async fn seed(pool: &PgPool) -> Result<()> {
        sqlx::query(
            "INSERT INTO companies (handle, name, num_employees, description, logo_url)
             VALUES ('c1', 'C1', 1, 'Desc1', 'http://c1.img'),
                    ('c3', 'C3', 3, 'Desc3', 'http://c3.img')",
        )
        .execute(pool)
        .await?;
        sqlx::query("INSERT INTO jobs (id, title, company_handle) VALUES (1111, 'J1', 'c1')")
            .execute(pool)
            .await?;
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn create(pool: PgPool) -> Result<()> {
        seed(&pool).await?;
        let mut tx = pool.begin().await?;
        let job = JobMutator::new(&mut tx)
            .create(CreateJobInput {
                title: "J4".into(),
                salary: Some(120_000),
                equity: Some(Decimal::new(5, 1)),
                company_handle: "c3".into(),
            })
            .await?;
        assert_eq!(job.title, "J4");
        assert_eq!(job.salary, Some(120_000));
        assert_eq!(job.equity.map(|e| e.to_string()), Some("0.5".to_string()));
        assert_eq!(job.company_handle, "c3");
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn create_with_unknown_company_fails(pool: PgPool) -> Result<()> {
        seed(&pool).await?;
        let mut conn = pool.acquire().await?;
        let res = JobMutator::new(&mut conn)
            .create(CreateJobInput {
                title: "J5".into(),
                salary: None,
                equity: None,
                company_handle: "nope".into(),
            })
            .await;
        assert!(matches!(res, Err(ApiError::Database(_))));
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn update(pool: PgPool) -> Result<()> {
        seed(&pool).await?;
        let mut conn = pool.acquire().await?;
        let job = JobMutator::new(&mut conn)
            .update(
                1111,
                PatchJobInput {
                    salary: Some(Some(50_000)),
                    ..Default::default()
                },
            )
            .await?;
        assert_eq!(
            job,
            JobEntry {
                id: 1111,
                title: "J1".into(),
                salary: Some(50_000),
                equity: None,
                company_handle: "c1".into(),
            }
        );
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn update_clears_salary(pool: PgPool) -> Result<()> {
        seed(&pool).await?;
        let mut conn = pool.acquire().await?;
        let mut mutator = JobMutator::new(&mut conn);
        mutator
            .update(
                1111,
                PatchJobInput {
                    salary: Some(Some(10)),
                    ..Default::default()
                },
            )
            .await?;
        let job = mutator
            .update(
                1111,
                PatchJobInput {
                    title: Some("J1b".into()),
                    salary: Some(None),
                    ..Default::default()
                },
            )
            .await?;
        assert_eq!(job.title, "J1b");
        assert_eq!(job.salary, None);
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn update_missing_or_empty(pool: PgPool) -> Result<()> {
        seed(&pool).await?;
        let mut conn = pool.acquire().await?;
        let mut mutator = JobMutator::new(&mut conn);
        let missing = mutator
            .update(
                0,
                PatchJobInput {
                    salary: Some(Some(1)),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(missing, Err(ApiError::NotFound(_))));
        let empty = mutator.update(1111, PatchJobInput::default()).await;
        assert!(matches!(empty, Err(ApiError::BadRequest(_))));
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn delete(pool: PgPool) -> Result<()> {
        seed(&pool).await?;
        let mut conn = pool.acquire().await?;
        JobMutator::new(&mut conn).delete(1111).await?;
        assert!(matches!(
            JobSelector::new(&mut conn).get_by_id(1111).await,
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            JobMutator::new(&mut conn).delete(0).await,
            Err(ApiError::NotFound(_))
        ));
        Ok(())
    }
}
