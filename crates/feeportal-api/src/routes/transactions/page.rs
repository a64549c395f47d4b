//! Transactions page rendering
//!
//! Endpoints:
//! - page_transactions: Page shell with filter bar; the table loads via HTMX
//!
//! Helper functions:
//! - render_transactions_list: Table, summary and pagination fragment
//! - render_transaction_detail: Detail modal for one row

use axum::extract::{Query, State};
use chrono::FixedOffset;
use feeportal_config::Config;
use feeportal_core::{Pagination, Transaction, TransactionQuery, TransactionStatus};
use feeportal_utils::{display_offset, escape_html, format_amount, format_datetime, MISSING};
use std::collections::HashMap;

use crate::routes::status_badge;
use crate::AppState;

const COLUMNS: [&str; 9] = [
    "#", "Order ID", "School", "Order Amt", "Txn Amt", "Method", "Status", "Time", "Actions",
];

/// Message shown in the table when the list request fails
pub const LOAD_FAILED: &str = "⚠️ Failed to load transactions";

/// Transactions page - header, filter bar and a table loaded on `load`
///
/// A `reset` parameter clears the filters, keeping page size and school.
pub async fn page_transactions(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> axum::response::Html<String> {
    let config = &state.config;
    let mut query = TransactionQuery::from_params(&params, config);
    if params.contains_key("reset") {
        query.reset();
    }
    let debounce = config.display.search_debounce_ms;
    let include = "hx-get='/transactions/list' hx-include='#tx-filters' hx-target='#transactions-content' hx-indicator='#tx-loading'";

    let status_options: String = TransactionStatus::FILTERABLE
        .iter()
        .map(|s| {
            format!(
                "<option value='{}' {}>{}</option>",
                s.as_str(),
                if query.status.as_ref() == Some(s) { "selected" } else { "" },
                s.label()
            )
        })
        .collect();

    let limit_options: String = config
        .pagination
        .page_size_options
        .iter()
        .map(|n| {
            format!(
                "<option value='{}' {}>{} / page</option>",
                n,
                if *n == query.limit { "selected" } else { "" },
                n
            )
        })
        .collect();

    let date_value = |d: Option<chrono::NaiveDate>| d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();

    let inner_content = format!(
        r#"<div class='max-w-7xl mx-auto'>
        <header class='flex flex-col md:flex-row md:items-center md:justify-between mb-6 gap-2'>
            <h1 class='text-2xl font-semibold text-black'>Transactions</h1>
            {}
        </header>
        <form id='tx-filters' onsubmit='return false' class='bg-white p-4 rounded-lg shadow-sm border border-gray-200 flex flex-wrap gap-3 items-center'>
            <input id='tx-search' type='text' name='search' value='{}' placeholder='Search (Order ID / custom_order_id)'
                {} hx-trigger='keyup changed delay:{}ms'
                class='border border-gray-200 rounded px-3 py-2 w-60 focus:outline-none focus:ring-2 focus:ring-indigo-300'>
            <select id='tx-status' name='status' {} hx-trigger='change' class='border border-gray-200 rounded px-3 py-2'>
                <option value=''>All status</option>
                {}
            </select>
            <input type='date' name='dateFrom' value='{}' {} hx-trigger='change' class='border border-gray-200 rounded px-3 py-2'>
            <input type='date' name='dateTo' value='{}' {} hx-trigger='change' class='border border-gray-200 rounded px-3 py-2'>
            <input type='text' name='school' value='{}' placeholder='School ID'
                {} hx-trigger='keyup changed delay:{}ms'
                class='border border-gray-200 rounded px-3 py-2 w-48'>
            <select name='limit' {} hx-trigger='change' class='border border-gray-200 rounded px-3 py-2 ml-auto'>
                {}
            </select>
            <button type='button' hx-get='/transactions' hx-include='#tx-filters' hx-vals='{{"reset": "1"}}' hx-target='#main-content'
                class='px-3 py-2 border border-gray-200 rounded text-sm bg-white hover:bg-gray-50'>Reset</button>
            <span id='tx-loading' class='htmx-indicator text-sm text-gray-500'>Loading…</span>
        </form>
        <div id='transactions-content' hx-get='/transactions/list?{}' hx-trigger='load' class='mt-6'>
            {}
        </div>
        </div>
        <script>
        function copyText(text) {{
            navigator.clipboard.writeText(text);
            const el = document.createElement('div');
            el.textContent = 'Copied';
            el.className = 'fixed bottom-6 right-6 bg-black/80 text-white text-xs px-3 py-1 rounded';
            document.body.appendChild(el);
            setTimeout(() => el.remove(), 900);
        }}
        function closeDetailModal() {{
            const modal = document.getElementById('tx-detail-modal');
            if (modal) {{ modal.remove(); }}
        }}
        document.addEventListener('keydown', function(e) {{
            if (e.key === 'Escape') closeDetailModal();
        }});
        </script>"#,
        render_summary(&Pagination::empty(&query), false),
        escape_html(query.search.as_deref().unwrap_or("")),
        include,
        debounce,
        include,
        status_options,
        date_value(query.date_from),
        include,
        date_value(query.date_to),
        include,
        escape_html(query.school_id.as_deref().unwrap_or("")),
        include,
        debounce,
        include,
        limit_options,
        query.to_query_string(),
        render_table("<tr><td colspan='9' class='p-6 text-center text-gray-500'>Loading transactions…</td></tr>"),
    );

    axum::response::Html(crate::page_response(&headers, "Transactions", "/transactions", &inner_content))
}

/// Header summary "Total: N • Page p/P"; `oob` marks it for an out-of-band swap
pub fn render_summary(pagination: &Pagination, oob: bool) -> String {
    format!(
        "<div id='tx-summary' {}class='text-sm text-gray-700'>Total: <strong>{}</strong> • Page {}/{}</div>",
        if oob { "hx-swap-oob='true' " } else { "" },
        pagination.total,
        pagination.page,
        pagination.total_pages
    )
}

fn render_table(body_rows: &str) -> String {
    let head: String = COLUMNS
        .iter()
        .map(|h| format!("<th class='px-4 py-3 text-left text-xs font-semibold text-gray-600 border-r border-gray-200'>{}</th>", h))
        .collect();

    format!(
        r#"<div class='bg-white rounded-lg shadow-sm border border-gray-200 overflow-hidden'>
            <div class='overflow-x-auto'>
                <table class='min-w-full table-auto'>
                    <thead class='bg-gray-50'><tr>{}</tr></thead>
                    <tbody>{}</tbody>
                </table>
            </div>
        </div>"#,
        head, body_rows
    )
}

fn or_missing(value: &str) -> &str {
    if value.is_empty() {
        MISSING
    } else {
        value
    }
}

/// Path segment for a row's order id
fn order_segment(tx: &Transaction) -> String {
    if tx.collect_id.is_empty() {
        MISSING.to_string()
    } else {
        urlencoding::encode(&tx.collect_id).into_owned()
    }
}

fn render_row(tx: &Transaction, number: usize, config: &Config, offset: FixedOffset) -> String {
    let symbol = &config.display.currency_symbol;
    let row_json = serde_json::to_string(tx).unwrap_or_default();
    let vals = serde_json::json!({ "row": row_json }).to_string();

    format!(
        r#"<tr class='odd:bg-white even:bg-gray-50 hover:bg-gray-100 transition duration-150 ease-in-out'>
            <td class='px-4 py-3 text-sm text-gray-800 border-r border-gray-100'>{}</td>
            <td class='px-4 py-3 text-sm font-mono text-black border-r border-gray-100 break-words max-w-xs'>{}</td>
            <td class='px-4 py-3 text-sm text-black border-r border-gray-100'>{}</td>
            <td class='px-4 py-3 text-sm text-right text-black border-r border-gray-100'>{}</td>
            <td class='px-4 py-3 text-sm text-right text-black border-r border-gray-100'>{}</td>
            <td class='px-4 py-3 text-sm text-black border-r border-gray-100'>{}</td>
            <td class='px-4 py-3 text-sm border-r border-gray-100'>{}</td>
            <td class='px-4 py-3 text-sm text-black border-r border-gray-100'>{}</td>
            <td class='px-4 py-3 text-sm text-black flex gap-2'>
                <button type='button' data-copy='{}' onclick='copyText(this.dataset.copy)' class='text-indigo-600 hover:underline'>Copy</button>
                <button type='button' hx-get='/transactions/{}/detail' hx-vals='{}' hx-target='body' hx-swap='beforeend'
                    class='px-2 py-1 border border-gray-200 rounded hover:bg-gray-50'>Details</button>
            </td>
        </tr>"#,
        number,
        escape_html(or_missing(&tx.collect_id)),
        escape_html(or_missing(&tx.school_id)),
        format_amount(tx.order_amount, symbol),
        format_amount(tx.transaction_amount, symbol),
        escape_html(tx.gateway.as_deref().unwrap_or(MISSING)),
        status_badge(tx.status.as_ref()),
        escape_html(&format_datetime(tx.payment_time.as_deref(), offset)),
        escape_html(&tx.collect_id),
        order_segment(tx),
        escape_html(&vals),
    )
}

fn render_pagination(query: &TransactionQuery, pagination: &Pagination) -> String {
    let button = |enabled: bool, page: usize, label: &str| {
        format!(
            "<button type='button' {} hx-get='/transactions/list?{}' hx-target='#transactions-content' hx-indicator='#tx-loading' class='px-3 py-1 border border-gray-200 rounded bg-white hover:bg-gray-50 disabled:opacity-50'>{}</button>",
            if enabled { "" } else { "disabled" },
            query.clone().with_page(page).to_query_string(),
            label
        )
    };

    format!(
        r#"<div class='flex flex-col md:flex-row md:items-center md:justify-between mt-4 gap-2'>
            <div class='text-sm text-gray-700'>Showing {} to {} of {}</div>
            <div class='flex items-center gap-2'>
                {}
                <div class='px-3 py-1 border border-gray-200 rounded bg-white text-sm'>{} / {}</div>
                {}
            </div>
        </div>"#,
        pagination.showing_from(),
        pagination.showing_to(),
        pagination.total,
        button(pagination.has_prev(), pagination.prev_page(), "Prev"),
        pagination.page,
        pagination.total_pages,
        button(pagination.has_next(), pagination.next_page(), "Next"),
    )
}

/// Table fragment for one page of results, or the error row when `rows` is `Err`
pub fn render_transactions_list(
    query: &TransactionQuery,
    pagination: &Pagination,
    rows: Result<&[Transaction], &str>,
    config: &Config,
) -> String {
    let offset = display_offset(config.display.utc_offset_minutes);

    let body = match rows {
        Err(message) => format!(
            "<tr><td colspan='9' class='p-6 text-center text-red-500'>{}</td></tr>",
            escape_html(message)
        ),
        Ok([]) => "<tr><td colspan='9' class='p-6 text-center text-gray-500'>No transactions found</td></tr>".to_string(),
        Ok(rows) => rows
            .iter()
            .enumerate()
            .map(|(idx, tx)| render_row(tx, pagination.row_number(idx), config, offset))
            .collect(),
    };

    format!(
        "{}{}{}",
        render_summary(pagination, true),
        render_table(&body),
        render_pagination(query, pagination)
    )
}

/// Detail modal for one transaction
pub fn render_transaction_detail(tx: &Transaction, config: &Config) -> String {
    let symbol = &config.display.currency_symbol;
    let offset = display_offset(config.display.utc_offset_minutes);
    let field = |label: &str, value: String| {
        format!("<div><strong>{}</strong><div class='mt-1 break-words'>{}</div></div>", label, value)
    };
    let refresh = if tx.collect_id.trim().is_empty() {
        String::new()
    } else {
        format!(
            "<button type='button' hx-get='/transactions/{}/status' hx-target='#tx-detail-status' hx-swap='innerHTML' class='text-xs text-indigo-600 hover:underline'>Refresh status</button>",
            order_segment(tx)
        )
    };

    format!(
        r#"<div id='tx-detail-modal' class='fixed inset-0 z-50 flex items-center justify-center bg-black/50' onclick='if(event.target.id === "tx-detail-modal") closeDetailModal()'>
    <div class='bg-white rounded-lg w-11/12 md:w-2/3 lg:w-1/2 p-6 shadow-xl border border-gray-200'>
        <div class='flex justify-between items-center mb-4'>
            <h3 class='text-lg font-semibold text-gray-900'>Transaction Details</h3>
            <button type='button' onclick='closeDetailModal()' class='text-gray-500 hover:text-black'>✕</button>
        </div>
        <div class='grid grid-cols-1 md:grid-cols-2 gap-4 text-sm text-gray-800'>
            {}
            {}
            {}
            {}
            {}
            <div><strong>Status</strong>
                <div class='mt-1 flex items-center gap-2'>
                    <span id='tx-detail-status'>{}</span>
                    {}
                </div>
            </div>
            <div class='md:col-span-2'><strong>Payment Time</strong><div class='mt-1'>{}</div></div>
            <div class='md:col-span-2'><strong>Raw JSON</strong>
                <pre class='bg-gray-50 p-3 rounded border text-xs max-h-48 overflow-auto mt-1'>{}</pre>
            </div>
        </div>
    </div>
</div>"#,
        field("Order ID", escape_html(or_missing(&tx.collect_id))),
        field("School", escape_html(or_missing(&tx.school_id))),
        field("Order Amount", format_amount(tx.order_amount, symbol)),
        field("Txn Amount", format_amount(tx.transaction_amount, symbol)),
        field("Payment Mode", escape_html(tx.payment_mode.as_deref().filter(|m| !m.is_empty()).unwrap_or(MISSING))),
        status_badge(tx.status.as_ref()),
        refresh,
        escape_html(&format_datetime(tx.payment_time.as_deref(), offset)),
        escape_html(&tx.raw_json()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use axum::body::Body;
    use axum::http::Request;
    use feeportal_core::TransactionsPage;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn shell(uri: &str) -> String {
        body_string(
            router_with(Arc::new(StubApi::default()))
                .oneshot(Request::get(uri).header("HX-Request", "true").body(Body::empty()).unwrap())
                .await
                .unwrap(),
        )
        .await
    }

    #[tokio::test]
    async fn test_page_filter_bar() {
        let html = shell("/transactions?limit=25&status=failed&search=ord").await;

        assert!(html.contains("name='search' value='ord'"));
        assert!(html.contains("hx-trigger='keyup changed delay:400ms'"));
        assert!(html.contains("<option value='FAILED' selected>Failed</option>"));
        assert!(html.contains("<option value='10' >10 / page</option>"));
        assert!(html.contains("<option value='25' selected>25 / page</option>"));
        assert!(html.contains("<option value='50' >50 / page</option>"));
        assert!(html.contains(">Reset</button>"));
        assert!(html.contains("hx-get='/transactions/list?page=1&limit=25&search=ord&status=FAILED' hx-trigger='load'"));

        // Filter controls carry no page field, so every change requests page 1
        let form_start = html.find("<form id='tx-filters'").unwrap();
        let form_end = html[form_start..].find("</form>").unwrap() + form_start;
        let form = &html[form_start..form_end];
        assert!(!form.contains("name='page'"));
        assert_eq!(form.matches("hx-include='#tx-filters'").count(), 7);
    }

    #[tokio::test]
    async fn test_page_reset_keeps_limit_and_school() {
        let html = shell("/transactions?reset=1&limit=50&school=s1&search=ord&status=pending&dateFrom=2025-01-01&page=4").await;

        assert!(html.contains("name='search' value=''"));
        assert!(html.contains("<option value='PENDING' >Pending</option>"));
        assert!(html.contains("name='dateFrom' value=''"));
        assert!(html.contains("name='school' value='s1'"));
        assert!(html.contains("<option value='50' selected>50 / page</option>"));
        assert!(html.contains("hx-get='/transactions/list?page=1&limit=50&school=s1' hx-trigger='load'"));
    }

    fn sample_rows() -> Vec<Transaction> {
        serde_json::from_value(serde_json::json!([
            {
                "collect_id": "66f1c0e2a1",
                "school_id": "65b0e6293e9f76a9694d84b4",
                "order_amount": 123456.5,
                "transaction_amount": 2000,
                "gateway": "PhonePe",
                "status": "SUCCESS",
                "payment_time": "2025-09-16T10:15:30.000Z",
                "payment_mode": "upi"
            },
            {
                "collect_id": "o'brien",
                "school_id": "s2",
                "status": "USER_DROPPED"
            }
        ]))
        .unwrap()
    }

    #[test]
    fn test_list_renders_rows() {
        let config = Config::default();
        let query = TransactionQuery::new(10).with_page(2);
        let rows = sample_rows();
        let page = TransactionsPage { data: rows.clone(), total: Some(12), ..Default::default() };
        let pagination = Pagination::from_page(&query, &page);

        let html = render_transactions_list(&query, &pagination, Ok(rows.as_slice()), &config);
        assert!(html.contains("Total: <strong>12</strong> • Page 2/2"));
        assert!(html.contains(">11</td>"));
        assert!(html.contains(">12</td>"));
        assert!(html.contains("₹1,23,456.5"));
        assert!(html.contains("₹2,000"));
        assert!(html.contains("16/9/2025, 3:45:30 pm"));
        assert!(html.contains("USER_DROPPED"));
        assert!(html.contains("data-copy='o&#39;brien'"));
        assert!(html.contains("/transactions/o%27brien/detail"));
        assert!(html.contains("Showing 11 to 12 of 12"));
    }

    #[test]
    fn test_list_missing_values_render_dash() {
        let config = Config::default();
        let query = TransactionQuery::new(10);
        let rows = sample_rows();
        let pagination = Pagination::from_page(&query, &TransactionsPage { data: rows.clone(), ..Default::default() });

        let html = render_transactions_list(&query, &pagination, Ok(&rows[1..]), &config);
        assert!(html.contains(">-</td>"));
        assert!(!html.contains("₹"));
    }

    #[test]
    fn test_list_empty_and_error_states() {
        let config = Config::default();
        let query = TransactionQuery::new(10);

        let pagination = Pagination::from_page(&query, &TransactionsPage::default());
        let html = render_transactions_list(&query, &pagination, Ok(&[][..]), &config);
        assert!(html.contains("No transactions found"));
        assert!(html.contains("Showing 0 to 0 of 0"));

        let pagination = Pagination::empty(&query);
        let html = render_transactions_list(&query, &pagination, Err(LOAD_FAILED), &config);
        assert!(html.contains("Failed to load transactions"));
        assert!(html.contains("Total: <strong>0</strong> • Page 1/1"));
    }

    #[test]
    fn test_pagination_buttons_keep_filters() {
        let query = TransactionQuery {
            status: Some(TransactionStatus::Pending),
            ..TransactionQuery::new(25)
        }
        .with_page(2);
        let pagination = Pagination { page: 2, limit: 25, total: 80, total_pages: 4 };

        let html = render_pagination(&query, &pagination);
        assert!(html.contains("/transactions/list?page=1&limit=25&status=PENDING"));
        assert!(html.contains("/transactions/list?page=3&limit=25&status=PENDING"));
        assert!(!html.contains("disabled hx-get"));

        let last = Pagination { page: 4, ..pagination };
        let html = render_pagination(&query.with_page(4), &last);
        assert!(html.contains("disabled hx-get='/transactions/list?page=4"));
    }

    #[test]
    fn test_detail_modal() {
        let config = Config::default();
        let rows = sample_rows();
        let html = render_transaction_detail(&rows[0], &config);

        assert!(html.contains("Transaction Details"));
        assert!(html.contains("₹1,23,456.5"));
        assert!(html.contains(">upi<"));
        assert!(html.contains("/transactions/66f1c0e2a1/status"));
        assert!(html.contains("&quot;collect_id&quot;: &quot;66f1c0e2a1&quot;"));

        let html = render_transaction_detail(&rows[1], &config);
        assert!(html.contains("<strong>Payment Mode</strong><div class='mt-1 break-words'>-</div>"));
    }

    #[test]
    fn test_detail_modal_without_order_id_has_no_refresh() {
        let config = Config::default();
        let tx: Transaction = serde_json::from_value(serde_json::json!({ "school_id": "s1" })).unwrap();
        let html = render_transaction_detail(&tx, &config);

        assert!(html.contains("<strong>Order ID</strong><div class='mt-1 break-words'>-</div>"));
        assert!(!html.contains("Refresh status"));
        assert!(!html.contains("/status"));
    }
}
