//! Transaction routes - Transaction table, filters, pagination, details
//!
//! Features:
//! - Server-driven pagination against the payments API
//! - Debounced search, status/date/school filters
//! - Detail modal with on-demand status refresh
//!
//! Structure:
//! - api.rs: JSON proxy endpoints and HTMX fragments
//! - page.rs: Page shell and HTML rendering helpers

pub mod api;
pub mod page;

pub use api::{
    api_transaction_status,
    api_transactions,
    api_transactions_by_school,
    htmx_transaction_detail,
    htmx_transaction_status,
    htmx_transactions_list,
};

pub use page::page_transactions;
