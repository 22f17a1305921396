//! Aggregation over filtered transaction sequences.
//!
//! This module contains everything related to reporting:
//! - [Summary] totals over a filtered sequence
//! - [MonthlyRollup] per-month totals for a calendar year
//! - The HTTP endpoints serving both

mod handlers;
mod rollup;
mod summary;

pub(crate) use handlers::{get_monthly_report, get_summary};
pub use rollup::{MonthlyRollup, rollup_by_month};
pub use summary::{Summary, summarize};
