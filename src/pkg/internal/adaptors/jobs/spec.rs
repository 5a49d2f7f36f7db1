use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::pkg::internal::sql::Column;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobEntry {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Fields of a job as the API names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobField {
    Title,
    Salary,
    Equity,
    CompanyHandle,
}

impl Column for JobField {
    fn logical_name(self) -> &'static str {
        match self {
            JobField::Title => "title",
            JobField::Salary => "salary",
            JobField::Equity => "equity",
            JobField::CompanyHandle => "companyHandle",
        }
    }
}

pub const JOB_COLUMN_ALIASES: &[(JobField, &str)] = &[(JobField::CompanyHandle, "company_handle")];

pub(crate) const JOB_COLUMNS: &str = "id, title, salary, equity, company_handle";
