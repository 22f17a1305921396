//! Turns recognized query parameters into a store predicate plus a
//! pagination window.
//!
//! Parameters are deserialized as raw strings so that malformed values
//! surface as [Error::InvalidFilter] rather than a framework rejection.
//! Absent or empty parameters impose no constraint. The pagination
//! window is applied strictly after filtering and ordering, so pages are
//! stable across calls as long as the underlying data does not change.

use serde::Deserialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{Error, transaction::TransactionQuery};

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// The raw, unvalidated query parameters recognized by list, summary,
/// and export requests.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FilterParams {
    /// `income`, `expense`, or `all`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// A category label to match exactly.
    pub category: Option<String>,
    /// The inclusive lower date bound, as an ISO calendar date.
    pub date_from: Option<String>,
    /// The inclusive upper date bound, as an ISO calendar date.
    pub date_to: Option<String>,
    /// The maximum number of transactions to return.
    pub limit: Option<String>,
    /// The number of transactions to skip before returning any.
    pub offset: Option<String>,
}

/// A validated filter: the store predicate plus the pagination window.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FilterCriteria {
    /// The predicate passed to the store gateway.
    pub query: TransactionQuery,
    /// The maximum number of transactions to return, unbounded when
    /// `None`.
    pub limit: Option<usize>,
    /// The number of transactions to skip.
    pub offset: usize,
}

impl TryFrom<FilterParams> for FilterCriteria {
    type Error = Error;

    fn try_from(params: FilterParams) -> Result<Self, Self::Error> {
        let kind = match params.kind.as_deref() {
            None | Some("") | Some("all") => None,
            Some(text) => Some(text.parse().map_err(|_| {
                Error::InvalidFilter(format!(
                    "\"{text}\" is not a transaction type, use income, expense or all"
                ))
            })?),
        };

        let date_from = parse_date(params.date_from.as_deref(), "date_from")?;
        let date_to = parse_date(params.date_to.as_deref(), "date_to")?;

        if let (Some(from), Some(to)) = (date_from, date_to)
            && from > to
        {
            return Err(Error::InvalidFilter(format!(
                "date_from {from} is after date_to {to}"
            )));
        }

        let limit = parse_count(params.limit.as_deref(), "limit")?;
        let offset = parse_count(params.offset.as_deref(), "offset")?.unwrap_or(0);

        Ok(FilterCriteria {
            query: TransactionQuery {
                kind,
                category: params.category.filter(|category| !category.is_empty()),
                date_from,
                date_to,
            },
            limit,
            offset,
        })
    }
}

/// Parse an optional `YYYY-MM-DD` string, treating absent and empty
/// values as no date.
pub(crate) fn parse_date(value: Option<&str>, name: &str) -> Result<Option<Date>, Error> {
    match value {
        None | Some("") => Ok(None),
        Some(text) => Date::parse(text, DATE_FORMAT).map(Some).map_err(|_| {
            Error::InvalidFilter(format!(
                "{name} \"{text}\" is not a calendar date, use YYYY-MM-DD"
            ))
        }),
    }
}

fn parse_count(value: Option<&str>, name: &str) -> Result<Option<usize>, Error> {
    match value {
        None | Some("") => Ok(None),
        Some(text) => text.parse::<usize>().map(Some).map_err(|_| {
            Error::InvalidFilter(format!("{name} \"{text}\" is not a non-negative integer"))
        }),
    }
}

/// Slice a filtered, ordered sequence down to the requested page.
///
/// Applied last, after filtering and ordering, never before. Summaries
/// and exports must be computed from the unsliced sequence.
pub fn paginate<T>(items: Vec<T>, limit: Option<usize>, offset: usize) -> Vec<T> {
    items
        .into_iter()
        .skip(offset)
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}
