//! HTTP endpoints for summary totals and monthly reports.

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use time::{Date, Month};

use crate::{
    AppState, Error,
    auth::OwnerId,
    filter::{FilterCriteria, FilterParams},
    transaction::{TransactionQuery, fetch_transactions},
};

use super::{rollup_by_month, summarize};

/// Respond with summary totals over the caller's filtered transactions.
///
/// Accepts the same filter parameters as the transaction listing, but
/// `limit` and `offset` are ignored: totals always cover the entire
/// filtered set.
pub(crate) async fn get_summary(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerId>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Value>, Error> {
    let criteria = FilterCriteria::try_from(params)?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;
    let transactions = fetch_transactions(owner, &criteria.query, &connection)?;

    Ok(Json(json!({
        "success": true,
        "data": summarize(&transactions),
    })))
}

/// The query parameters for the monthly report endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct MonthlyReportParams {
    year: Option<String>,
}

/// Respond with per-month rollups for the requested calendar year.
pub(crate) async fn get_monthly_report(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerId>,
    Query(params): Query<MonthlyReportParams>,
) -> Result<Json<Value>, Error> {
    let year = params
        .year
        .ok_or_else(|| Error::InvalidFilter("year is required".to_owned()))?;
    let year: i32 = year
        .parse()
        .map_err(|_| Error::InvalidFilter(format!("year \"{year}\" is not a number")))?;

    let query = TransactionQuery {
        date_from: Some(first_day(year)?),
        date_to: Some(last_day(year)?),
        ..Default::default()
    };

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;
    let transactions = fetch_transactions(owner, &query, &connection)?;

    Ok(Json(json!({
        "reports": rollup_by_month(&transactions, year),
    })))
}

fn first_day(year: i32) -> Result<Date, Error> {
    Date::from_calendar_date(year, Month::January, 1)
        .map_err(|_| Error::InvalidFilter(format!("year {year} is out of range")))
}

fn last_day(year: i32) -> Result<Date, Error> {
    Date::from_calendar_date(year, Month::December, 31)
        .map_err(|_| Error::InvalidFilter(format!("year {year} is out of range")))
}
