use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, de};
use serde_json::{Value, json};
use validator::{Validate, ValidationError};

use crate::{
    pkg::{
        internal::{
            adaptors::jobs::{
                filter::JobFilter,
                mutators::JobMutator,
                selectors::JobSelector,
                spec::JobField,
            },
            sql::SqlValue,
        },
        server::{
            extractors::{ValidJson, ValidQuery},
            state::{AppState, GetTxn},
        },
    },
    prelude::Result,
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "validate_new_equity"))]
pub struct CreateJobInput {
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: String,
    #[validate(range(min = 0, message = "salary cannot be negative"))]
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    #[validate(length(min = 1, max = 25, message = "companyHandle must be 1-25 characters"))]
    pub company_handle: String,
}

/// Partial update body. `companyHandle` is fixed once a job exists, so it is
/// not accepted here.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "validate_patch_equity"))]
pub struct PatchJobInput {
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[validate(range(min = 0, message = "salary cannot be negative"))]
    pub salary: Option<Option<i32>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub equity: Option<Option<Decimal>>,
}

impl PatchJobInput {
    /// Fields present in the body, in declaration order.
    pub fn into_fields(self) -> Vec<(JobField, SqlValue)> {
        let mut fields = Vec::new();
        if let Some(title) = self.title {
            fields.push((JobField::Title, SqlValue::Text(title)));
        }
        if let Some(salary) = self.salary {
            fields.push((JobField::Salary, SqlValue::Integer(salary)));
        }
        if let Some(equity) = self.equity {
            fields.push((JobField::Equity, SqlValue::Numeric(equity)));
        }
        fields
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobQuery {
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: Option<String>,
    #[validate(range(min = 0, message = "minSalary cannot be negative"))]
    pub min_salary: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub has_equity: Option<bool>,
}

impl From<JobQuery> for JobFilter {
    fn from(query: JobQuery) -> Self {
        JobFilter {
            title: query.title,
            min_salary: query.min_salary,
            has_equity: query.has_equity,
        }
    }
}

// distinguishes an explicit `null` (clear the column) from an absent key
fn deserialize_nullable<'de, T, D>(deserializer: D) -> core::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// only the literal "true" turns the flag on; an empty value is not a flag
fn deserialize_flag<'de, D>(deserializer: D) -> core::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match String::deserialize(deserializer)?.as_str() {
        "" => Err(de::Error::custom("hasEquity cannot be empty")),
        s => Ok(Some(s == "true")),
    }
}

fn check_equity(equity: &Decimal) -> core::result::Result<(), ValidationError> {
    if equity.is_sign_negative() || *equity > Decimal::ONE {
        let mut err = ValidationError::new("equity_range");
        err.message = Some("equity must be between 0 and 1".into());
        return Err(err);
    }
    Ok(())
}

fn validate_new_equity(input: &CreateJobInput) -> core::result::Result<(), ValidationError> {
    input.equity.as_ref().map_or(Ok(()), check_equity)
}

fn validate_patch_equity(input: &PatchJobInput) -> core::result::Result<(), ValidationError> {
    match &input.equity {
        Some(Some(equity)) => check_equity(equity),
        _ => Ok(()),
    }
}

pub async fn list(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<JobQuery>,
) -> Result<Json<Value>> {
    let filter = JobFilter::from(query);
    let mut conn = state.db_pool.acquire().await?;
    let jobs = JobSelector::new(&mut conn).find_all(Some(&filter)).await?;
    tracing::debug!("listed {} jobs", jobs.len());
    Ok(Json(json!({ "jobs": jobs })))
}

pub async fn create(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateJobInput>,
) -> Result<(StatusCode, Json<Value>)> {
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobMutator::new(&mut tx).create(input).await?;
    tx.commit().await?;
    tracing::info!("created job {} for {}", job.id, &job.company_handle);
    Ok((StatusCode::CREATED, Json(json!({ "job": job }))))
}

pub async fn get(
    State(state): State<AppState>,
    path: core::result::Result<Path<i32>, PathRejection>,
) -> Result<Json<Value>> {
    let Path(id) = path?;
    let mut conn = state.db_pool.acquire().await?;
    let job = JobSelector::new(&mut conn).get_by_id(id).await?;
    Ok(Json(json!({ "job": job })))
}

pub async fn update(
    State(state): State<AppState>,
    path: core::result::Result<Path<i32>, PathRejection>,
    ValidJson(input): ValidJson<PatchJobInput>,
) -> Result<Json<Value>> {
    let Path(id) = path?;
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobMutator::new(&mut tx).update(id, input).await?;
    tx.commit().await?;
    tracing::info!("updated job {}", id);
    Ok(Json(json!({ "job": job })))
}

pub async fn remove(
    State(state): State<AppState>,
    path: core::result::Result<Path<i32>, PathRejection>,
) -> Result<Json<Value>> {
    let Path(id) = path?;
    let mut tx = state.db_pool.begin_txn().await?;
    JobMutator::new(&mut tx).delete(id).await?;
    tx.commit().await?;
    tracing::info!("deleted job {}", id);
    Ok(Json(json!({ "deleted": id.to_string() })))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use validator::Validate;

    use super::{CreateJobInput, JobQuery, PatchJobInput};
    use crate::pkg::internal::{
        adaptors::jobs::{filter::JobFilter, spec::JobField},
        sql::SqlValue,
    };

    #[test]
    fn patch_distinguishes_null_from_absent() {
        let patch: PatchJobInput = serde_json::from_str(r#"{"salary": null}"#).unwrap();
        assert_eq!(patch.salary, Some(None));
        assert_eq!(patch.equity, None);
        assert_eq!(
            patch.into_fields(),
            vec![(JobField::Salary, SqlValue::Integer(None))]
        );
    }

    #[test]
    fn patch_rejects_company_handle() {
        let res = serde_json::from_str::<PatchJobInput>(r#"{"companyHandle": "c2"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn patch_equity_out_of_range() {
        let patch: PatchJobInput = serde_json::from_str(r#"{"equity": 1.5}"#).unwrap();
        assert!(patch.validate().is_err());
        let patch: PatchJobInput = serde_json::from_str(r#"{"equity": "0.25"}"#).unwrap();
        assert!(patch.validate().is_ok());
        assert_eq!(
            patch.into_fields(),
            vec![(JobField::Equity, SqlValue::Numeric(Some(Decimal::new(25, 2))))]
        );
    }

    #[test]
    fn create_requires_title() {
        assert!(serde_json::from_str::<CreateJobInput>(r#"{"companyHandle": "c1"}"#).is_err());
        let input: CreateJobInput =
            serde_json::from_str(r#"{"title": "", "companyHandle": "c1"}"#).unwrap();
        assert!(input.validate().is_err());
        let input: CreateJobInput =
            serde_json::from_str(r#"{"title": "J3", "salary": -1, "companyHandle": "c1"}"#)
                .unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn query_flag_is_true_only_for_true() {
        let query = JobQuery {
            has_equity: Some(false),
            ..Default::default()
        };
        assert!(JobFilter::from(query).is_empty());
        let query: JobQuery =
            serde_json::from_str(r#"{"title": "j2", "hasEquity": "yes"}"#).unwrap();
        assert_eq!(query.has_equity, Some(false));
        let query: JobQuery = serde_json::from_str(r#"{"hasEquity": "true"}"#).unwrap();
        assert_eq!(query.has_equity, Some(true));
    }

    #[test]
    fn query_flag_rejects_empty_value() {
        assert!(serde_json::from_str::<JobQuery>(r#"{"hasEquity": ""}"#).is_err());
    }
}
