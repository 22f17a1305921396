//! Defines the endpoints (paths) of the REST API as constants.

use std::fmt::Display;

/// The collection endpoint for listing and recording transactions.
pub const TRANSACTIONS: &str = "/api/transactions";

/// The endpoint for retrieving, editing, and deleting one transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";

/// The endpoint for summary totals over the filtered transactions.
pub const SUMMARY: &str = "/api/summary";

/// The endpoint for per-month rollups of a calendar year.
pub const MONTHLY_REPORT: &str = "/api/reports/monthly";

/// The endpoint for downloadable CSV/JSON exports.
pub const EXPORT: &str = "/api/export";

/// The endpoint for the built-in category catalog.
pub const CATEGORIES: &str = "/api/categories";

/// The endpoint for importing legacy transaction records.
pub const MIGRATE: &str = "/api/migrate";

/// The obligatory coffee endpoint.
pub const COFFEE: &str = "/api/coffee";

/// Substitute the `{...}` placeholder in `endpoint` with `value`.
///
/// Endpoints without a placeholder are returned unchanged.
pub fn format_endpoint<T: Display>(endpoint: &str, value: T) -> String {
    match (endpoint.find('{'), endpoint.rfind('}')) {
        (Some(start), Some(end)) if start < end => {
            format!("{}{}{}", &endpoint[..start], value, &endpoint[end + 1..])
        }
        _ => endpoint.to_owned(),
    }
}
