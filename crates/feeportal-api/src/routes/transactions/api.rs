//! Transactions API endpoints - JSON proxy and HTMX partial responses
//!
//! Endpoints:
//! - api_transactions: Transactions list (JSON)
//! - api_transactions_by_school: Transactions of one school (JSON)
//! - api_transaction_status: Status of one order (JSON)
//! - htmx_transactions_list: Table fragment (HTML fragment)
//! - htmx_transaction_detail: Detail modal (HTML fragment)
//! - htmx_transaction_status: Status badge refresh (HTML fragment)

use axum::extract::{Path, Query, State};
use axum::Json;
use feeportal_core::error::{DefaultErrorLogger, ErrorContext, ErrorLogger};
use feeportal_core::{Pagination, Transaction, TransactionQuery, TransactionStatusResponse, TransactionsPage};
use feeportal_utils::escape_html;
use std::collections::HashMap;

use super::page::{render_transaction_detail, render_transactions_list, LOAD_FAILED};
use crate::routes::status_badge;
use crate::{ApiError, AppState};

/// Get transactions with filters and pagination (JSON API)
///
/// A `school` parameter switches to the by-school endpoint.
pub async fn api_transactions(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<TransactionsPage>, ApiError> {
    let query = TransactionQuery::from_params(&params, &state.config);
    state
        .api
        .list(&query)
        .await
        .map(Json)
        .map_err(|e| ApiError::logged(e, "api_transactions"))
}

/// Get transactions of one school (JSON API)
pub async fn api_transactions_by_school(
    State(state): State<AppState>,
    Path(school_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<TransactionsPage>, ApiError> {
    let query = TransactionQuery::from_params(&params, &state.config);
    state
        .api
        .transactions_by_school(&school_id, &query)
        .await
        .map(Json)
        .map_err(|e| ApiError::logged(e, "api_transactions_by_school"))
}

/// Get the status of one order (JSON API)
pub async fn api_transaction_status(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<TransactionStatusResponse>, ApiError> {
    state
        .api
        .transaction_status(&order_id)
        .await
        .map(Json)
        .map_err(|e| ApiError::logged(e, "api_transaction_status"))
}

/// HTMX: Transactions table - Partial page update
///
/// A failed fetch still renders the table, with the error row and zero totals.
pub async fn htmx_transactions_list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> axum::response::Html<String> {
    let query = TransactionQuery::from_params(&params, &state.config);
    log::debug!("Listing transactions: {}", query.to_query_string());

    let html = match state.api.list(&query).await {
        Ok(page) => {
            let pagination = Pagination::from_page(&query, &page);
            render_transactions_list(&query, &pagination, Ok(page.data.as_slice()), &state.config)
        }
        Err(e) => {
            let context = ErrorContext::new("list_transactions")
                .with_data("query", serde_json::json!(query.to_query_string()));
            DefaultErrorLogger.log_error(&e, &context);
            render_transactions_list(&query, &Pagination::empty(&query), Err(LOAD_FAILED), &state.config)
        }
    };

    axum::response::Html(html)
}

/// HTMX: Transaction detail modal
///
/// The row JSON arrives in the `row` parameter, so no backend call is made.
pub async fn htmx_transaction_detail(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> axum::response::Html<String> {
    let row = params
        .get("row")
        .and_then(|raw| serde_json::from_str::<Transaction>(raw).ok());

    let html = match row {
        Some(tx) => render_transaction_detail(&tx, &state.config),
        None => {
            log::warn!("Detail requested for {} without row data", order_id);
            format!(
                r#"<div id='tx-detail-modal' class='fixed inset-0 z-50 flex items-center justify-center bg-black/50' onclick='closeDetailModal()'>
    <div class='bg-red-50 border border-red-200 rounded-lg p-6 text-center'>
        <h3 class='text-lg font-medium text-red-800 mb-2'>Transaction details unavailable</h3>
        <p class='text-red-600 mb-4'>Order ID: {}</p>
        <button type='button' onclick='closeDetailModal()' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Close</button>
    </div>
</div>"#,
                escape_html(&order_id)
            )
        }
    };

    axum::response::Html(html)
}

/// HTMX: Refresh the status badge of one order from the backend
pub async fn htmx_transaction_status(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> axum::response::Html<String> {
    let html = match state.api.transaction_status(&order_id).await {
        Ok(response) => status_badge(response.status.as_ref()),
        Err(e) => {
            let context = ErrorContext::new("transaction_status")
                .with_data("order_id", serde_json::json!(order_id));
            DefaultErrorLogger.log_error(&e, &context);
            format!(
                "<span class='text-xs text-red-500'>{}</span>",
                escape_html(&e.display_message("Status lookup failed"))
            )
        }
    };

    axum::response::Html(html)
}
