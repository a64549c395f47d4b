//! Route modules for the API server
//!
//! - home: Landing page
//! - payments: Payment creation form, JSON create-payment proxy
//! - transactions: Transaction table, filters, pagination, detail modal
//! - settings: Settings page
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API endpoints and HTMX fragments
//! - page.rs: HTMX page rendering

pub mod home;
pub mod payments;
pub mod settings;
pub mod transactions;

/// Colored badge for a transaction status; unknown statuses get a neutral badge
pub fn status_badge(status: Option<&feeportal_core::TransactionStatus>) -> String {
    use feeportal_core::TransactionStatus;

    let base = "px-2.5 py-1 rounded-full text-xs font-medium inline-block border";
    let (colors, label) = match status {
        Some(TransactionStatus::Success) => ("bg-green-50 text-green-800 border-green-100", "Success".to_string()),
        Some(TransactionStatus::Pending) => ("bg-yellow-50 text-yellow-800 border-yellow-100", "Pending".to_string()),
        Some(TransactionStatus::Failed) => ("bg-red-50 text-red-800 border-red-100", "Failed".to_string()),
        Some(other) => ("bg-gray-50 text-gray-800", feeportal_utils::escape_html(other.label())),
        None => ("bg-gray-50 text-gray-800", feeportal_utils::MISSING.to_string()),
    };
    format!("<span class='{} {}'>{}</span>", base, colors, label)
}
