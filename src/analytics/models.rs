use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::errors::AppError;

/// Aggregate figures for one calendar month
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodSummary {
    pub income: Decimal,
    pub expenses: Decimal,
    pub savings: Decimal,
    pub balance: Decimal,
}

/// Current figures plus percentage changes against the prior period
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 5200.00)]
    pub income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 3100.00)]
    pub expenses: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 2100.00)]
    pub savings: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 12500.00)]
    pub balance: Decimal,
    /// Percent change in income
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 10.0)]
    pub income_change: Decimal,
    /// Percent change in expenses
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = -10.0)]
    pub expenses_change: Decimal,
    /// Percent change in savings
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 0.0)]
    pub savings_change: Decimal,
    /// Percent change in balance against the placeholder prior balance
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 5.26)]
    pub balance_change: Decimal,
}

/// First and last day of a calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub year: i32,
    pub month: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl MonthRange {
    pub fn new(year: i32, month: u32) -> Result<Self, AppError> {
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            AppError::ValidationError(format!("Invalid month {year}-{month:02}"))
        })?;
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .map(|d| d - Duration::days(1))
            .ok_or_else(|| {
                AppError::ValidationError(format!("Invalid month {year}-{month:02}"))
            })?;

        Ok(Self {
            year,
            month,
            start,
            end,
        })
    }

    /// The calendar month before this one
    pub fn previous(&self) -> Result<Self, AppError> {
        let prior_day = self.start - Duration::days(1);
        Self::new(prior_day.year(), prior_day.month())
    }
}

/// Query parameters selecting a calendar month
#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct MonthQuery {
    /// Four-digit year
    #[validate(range(min = 1970, max = 9999, message = "year must be between 1970 and 9999"))]
    #[param(example = 2026)]
    pub year: i32,
    /// Month number (1-12)
    #[validate(range(min = 1, max = 12, message = "month must be between 1 and 12"))]
    #[param(example = 10)]
    pub month: u32,
}

/// Income, expenses and savings for one month
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummaryResponse {
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 5200.00)]
    pub income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 3100.00)]
    pub expenses: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 2100.00)]
    pub savings: Decimal,
}

impl From<PeriodSummary> for MonthlySummaryResponse {
    fn from(s: PeriodSummary) -> Self {
        Self {
            income: s.income,
            expenses: s.expenses,
            savings: s.savings,
        }
    }
}

/// Dashboard inputs that could not be fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum DataSection {
    CurrentPeriod,
    PriorPeriod,
    TotalBalance,
}

/// Dashboard figures for a month
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    #[schema(example = 2026)]
    pub year: i32,
    #[schema(example = 10)]
    pub month: u32,
    pub metrics: DerivedMetrics,
    /// Inputs shown at their zero default because they could not be fetched
    pub unavailable: Vec<DataSection>,
}
