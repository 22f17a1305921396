//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating
//!   transactions
//! - Database functions for storing, querying, and managing transactions
//! - The owner-scoped query gateway used by listings, reports, and
//!   exports
//! - The HTTP endpoints for transaction CRUD

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod get_endpoint;
mod list_endpoint;
mod query;

pub use core::{
    Transaction, TransactionBuilder, TransactionKind, TransactionUpdate, create_transaction,
    create_transaction_table, delete_transaction, get_transaction, map_transaction_row,
    update_transaction,
};
pub(crate) use create_endpoint::create_transaction_endpoint;
pub(crate) use delete_endpoint::delete_transaction_endpoint;
pub(crate) use edit_endpoint::edit_transaction_endpoint;
pub(crate) use get_endpoint::get_transaction_endpoint;
pub(crate) use list_endpoint::get_transactions_endpoint;
pub use query::{TransactionQuery, fetch_transactions};
