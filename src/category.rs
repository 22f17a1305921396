//! The built-in category catalog.
//!
//! Categories are a fixed catalog rather than per-owner data, so the
//! endpoint serving them sits outside the authenticated routes. The
//! labels here are the values stored in the transaction `category`
//! column; the icon and color are display hints for clients.

use axum::{Json, extract::Query};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{Error, transaction::TransactionKind};

/// A category label with its display metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    /// The label stored on transactions, e.g. "Makanan".
    pub name: &'static str,
    /// The icon shown next to the label.
    pub icon: &'static str,
    /// The display color as a hex code.
    pub color: &'static str,
}

const fn category(name: &'static str, icon: &'static str, color: &'static str) -> Category {
    Category { name, icon, color }
}

/// The built-in income categories.
pub const INCOME_CATEGORIES: &[Category] = &[
    category("Gaji", "💰", "#10B981"),
    category("Freelance", "💻", "#3B82F6"),
    category("Investasi", "📈", "#8B5CF6"),
    category("Lainnya", "💵", "#6B7280"),
];

/// The built-in expense categories.
pub const EXPENSE_CATEGORIES: &[Category] = &[
    category("Makanan", "🍔", "#EF4444"),
    category("Transportasi", "🚗", "#F97316"),
    category("Belanja", "🛒", "#EC4899"),
    category("Tagihan", "📄", "#DC2626"),
    category("Hiburan", "🎬", "#7C3AED"),
    category("Kesehatan", "🏥", "#059669"),
    category("Lainnya", "💸", "#6B7280"),
];

/// The categories for one transaction kind.
pub fn categories_for(kind: TransactionKind) -> &'static [Category] {
    match kind {
        TransactionKind::Income => INCOME_CATEGORIES,
        TransactionKind::Expense => EXPENSE_CATEGORIES,
    }
}

/// The query parameters for the category endpoint.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct CategoryParams {
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Respond with the category catalog, grouped by kind or narrowed to
/// one kind.
pub(crate) async fn get_categories(
    Query(params): Query<CategoryParams>,
) -> Result<Json<Value>, Error> {
    match params.kind.as_deref() {
        None | Some("") | Some("all") => Ok(Json(json!({
            "success": true,
            "data": {
                "income": INCOME_CATEGORIES,
                "expense": EXPENSE_CATEGORIES,
            },
        }))),
        Some(text) => {
            let kind: TransactionKind = text.parse()?;

            Ok(Json(json!({
                "success": true,
                "data": categories_for(kind),
            })))
        }
    }
}
