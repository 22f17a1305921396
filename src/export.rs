//! Renders a filtered transaction sequence into a downloadable file.
//!
//! Two formats are supported: a CSV table with localized column names
//! and a JSON document that serializes the sequence as-is. Exports
//! always cover the entire filtered set; pagination parameters are
//! ignored here even though the same parameter set drives the listing
//! endpoint.

use std::str::FromStr;

use axum::{
    Extension,
    extract::{Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    auth::OwnerId,
    filter::{FilterCriteria, FilterParams},
    transaction::{Transaction, TransactionKind, fetch_transactions},
};

/// The downloadable representations a transaction sequence can be
/// rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// A delimited table with one row per transaction.
    Csv,
    /// An order-preserving JSON serialization of the sequence.
    Json,
}

impl ExportFormat {
    fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(Error::UnsupportedFormat(other.to_owned())),
        }
    }
}

/// A rendered export: the file bytes plus the metadata needed to serve
/// it as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    /// The suggested filename, embedding the current date.
    pub filename: String,
    /// The MIME type of `bytes`.
    pub content_type: &'static str,
    /// The file contents.
    pub bytes: Vec<u8>,
}

impl IntoResponse for Export {
    fn into_response(self) -> Response {
        (
            [
                (CONTENT_TYPE, self.content_type.to_owned()),
                (
                    CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", self.filename),
                ),
            ],
            self.bytes,
        )
            .into_response()
    }
}

/// Render `transactions` into a downloadable file in `format`.
///
/// # Errors
/// Returns [Error::SerializationError] if the payload cannot be
/// rendered, which only happens on row-length bugs in this module.
pub fn export_transactions(
    transactions: &[Transaction],
    format: ExportFormat,
) -> Result<Export, Error> {
    let bytes = match format {
        ExportFormat::Csv => render_csv(transactions)?,
        ExportFormat::Json => serde_json::to_vec_pretty(transactions)
            .map_err(|error| Error::SerializationError(error.to_string()))?,
    };

    Ok(Export {
        filename: format!(
            "transactions_{}.{}",
            OffsetDateTime::now_utc().date(),
            format.extension()
        ),
        content_type: format.content_type(),
        bytes,
    })
}

/// The localized kind label used in CSV rows.
fn kind_label(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "Pemasukan",
        TransactionKind::Expense => "Pengeluaran",
    }
}

fn render_csv(transactions: &[Transaction]) -> Result<Vec<u8>, Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(["ID", "Tanggal", "Tipe", "Kategori", "Deskripsi", "Jumlah"])
        .map_err(csv_error)?;

    for transaction in transactions {
        writer
            .write_record([
                transaction.id.to_string(),
                transaction.date.to_string(),
                kind_label(transaction.kind).to_owned(),
                transaction.category.clone(),
                transaction.description.clone(),
                transaction.amount.to_string(),
            ])
            .map_err(csv_error)?;
    }

    writer
        .into_inner()
        .map_err(|error| csv_error(error.into_error()))
}

fn csv_error(error: impl std::error::Error) -> Error {
    Error::SerializationError(error.to_string())
}

/// The query parameters for the export endpoint: the shared filter set
/// plus the requested format.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ExportParams {
    #[serde(flatten)]
    filter: FilterParams,
    format: Option<String>,
}

/// Respond with a downloadable export of the caller's filtered
/// transactions.
///
/// The format defaults to CSV. An unsupported format is rejected before
/// any store access.
pub(crate) async fn get_export(
    State(state): State<AppState>,
    Extension(owner): Extension<OwnerId>,
    Query(params): Query<ExportParams>,
) -> Result<Export, Error> {
    let format: ExportFormat = params.format.as_deref().unwrap_or("csv").parse()?;
    let criteria = FilterCriteria::try_from(params.filter)?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;
    let transactions = fetch_transactions(owner, &criteria.query, &connection)?;

    export_transactions(&transactions, format)
}

#[cfg(test)]
mod tests {
    use time::{Date, OffsetDateTime, macros::date};

    use crate::{
        Error,
        auth::OwnerId,
        transaction::{Transaction, TransactionKind},
    };

    use super::{ExportFormat, export_transactions};

    fn test_transaction(
        id: i64,
        kind: TransactionKind,
        amount: i64,
        description: &str,
        date: Date,
    ) -> Transaction {
        Transaction {
            id,
            owner: OwnerId::new(1),
            kind,
            amount,
            category: "Makanan".to_owned(),
            description: description.to_owned(),
            date,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn unknown_format_is_rejected() {
        let result: Result<ExportFormat, Error> = "xml".parse();

        assert_eq!(result, Err(Error::UnsupportedFormat("xml".to_owned())));
    }

    #[test]
    fn csv_export_round_trips_quoted_fields() {
        let transactions = vec![
            test_transaction(
                1,
                TransactionKind::Expense,
                150,
                "He said \"hi\"",
                date!(2024 - 01 - 14),
            ),
            test_transaction(
                2,
                TransactionKind::Income,
                5_000,
                "comma, separated",
                date!(2024 - 01 - 15),
            ),
        ];

        let export = export_transactions(&transactions, ExportFormat::Csv)
            .expect("Could not export transactions");

        let mut reader = csv::Reader::from_reader(export.bytes.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers,
            csv::StringRecord::from(vec![
                "ID", "Tanggal", "Tipe", "Kategori", "Deskripsi", "Jumlah"
            ])
        );

        let rows: Vec<csv::StringRecord> = reader.records().map(|row| row.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][2], "Pengeluaran");
        assert_eq!(&rows[0][4], "He said \"hi\"");
        assert_eq!(&rows[0][5], "150");
        assert_eq!(&rows[1][2], "Pemasukan");
        assert_eq!(&rows[1][4], "comma, separated");
    }

    #[test]
    fn csv_export_of_empty_sequence_is_header_only() {
        let export = export_transactions(&[], ExportFormat::Csv).unwrap();

        let text = String::from_utf8(export.bytes).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn json_export_preserves_order_and_field_names() {
        let transactions = vec![
            test_transaction(2, TransactionKind::Income, 5_000, "", date!(2024 - 01 - 15)),
            test_transaction(1, TransactionKind::Expense, 150, "", date!(2024 - 01 - 14)),
        ];

        let export = export_transactions(&transactions, ExportFormat::Json).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&export.bytes).unwrap();
        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["id"], 2);
        assert_eq!(rows[1]["id"], 1);
        assert_eq!(rows[0]["type"], "income");
        assert_eq!(rows[0]["amount"], 5_000);
        assert_eq!(rows[1]["date"], "2024-01-14");
    }

    #[test]
    fn filenames_embed_the_current_date_and_extension() {
        let csv_export = export_transactions(&[], ExportFormat::Csv).unwrap();
        let json_export = export_transactions(&[], ExportFormat::Json).unwrap();

        assert!(csv_export.filename.starts_with("transactions_"));
        assert!(csv_export.filename.ends_with(".csv"));
        assert!(json_export.filename.ends_with(".json"));
    }
}
