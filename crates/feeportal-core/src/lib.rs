//! Payment models, the payments API client, and transactions list state

pub mod client;
pub mod error;
pub mod models;
pub mod types;

use chrono::NaiveDate;
use std::collections::HashMap;

use feeportal_config::Config;

pub use client::{HttpPaymentsClient, PaymentsApi};
pub use error::{CoreError, CoreResult, ErrorSeverity};
pub use models::{
    CreatePaymentRequest, CreatePaymentResponse, PaymentForm, StudentInfo, Transaction,
    TransactionStatusResponse, TransactionsPage, ValidPayment,
};
pub use types::TransactionStatus;

// ==================== Transactions Query ====================

/// Filters and paging for the transactions list
///
/// The browser sends these as query parameters named after the backend's
/// own parameters (`page`, `limit`, `search`, `status`, `dateFrom`,
/// `dateTo`) plus `school`. The filter controls never send `page`, so
/// any filter change lands on page 1.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionQuery {
    /// 1-based page number
    pub page: usize,
    pub limit: usize,
    pub search: Option<String>,
    pub status: Option<TransactionStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// Scope the list to one school (by-school endpoint)
    pub school_id: Option<String>,
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self::new(10)
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty()).map(str::to_string)
}

fn parse_date(value: Option<&String>) -> Option<NaiveDate> {
    non_empty(value).and_then(|v| NaiveDate::parse_from_str(&v, "%Y-%m-%d").ok())
}

impl TransactionQuery {
    pub fn new(limit: usize) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            search: None,
            status: None,
            date_from: None,
            date_to: None,
            school_id: None,
        }
    }

    /// Build from browser query parameters; blank or malformed values are ignored
    pub fn from_params(params: &HashMap<String, String>, config: &Config) -> Self {
        let limit = config.effective_limit(params.get("limit").and_then(|s| s.trim().parse().ok()));
        let page = params
            .get("page")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(1);

        Self {
            page: page.max(1),
            limit,
            search: non_empty(params.get("search")),
            status: non_empty(params.get("status")).and_then(|s| s.parse().ok()),
            date_from: parse_date(params.get("dateFrom")),
            date_to: parse_date(params.get("dateTo")),
            school_id: non_empty(params.get("school")),
        }
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    /// Clear search, status and dates and go back to page 1; the page
    /// size and school scope are kept
    pub fn reset(&mut self) {
        self.search = None;
        self.status = None;
        self.date_from = None;
        self.date_to = None;
        self.page = 1;
    }

    /// Query parameters for the backend: `page` and `limit` always,
    /// the filters only when set
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        if let Some(ref search) = self.search {
            params.push(("search", search.clone()));
        }
        if let Some(ref status) = self.status {
            params.push(("status", status.to_string()));
        }
        if let Some(date) = self.date_from {
            params.push(("dateFrom", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(date) = self.date_to {
            params.push(("dateTo", date.format("%Y-%m-%d").to_string()));
        }
        params
    }

    /// URL query string for links back into the portal (includes `school`)
    pub fn to_query_string(&self) -> String {
        let mut params = self.to_params();
        if let Some(ref school) = self.school_id {
            params.push(("school", school.clone()));
        }
        params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

// ==================== Pagination ====================

/// Server-driven pagination numbers for one rendered page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl Pagination {
    /// Use the backend's totals when given, otherwise derive them
    pub fn from_page(query: &TransactionQuery, response: &TransactionsPage) -> Self {
        let limit = query.limit.max(1);
        let total = response.total.unwrap_or(response.data.len());
        let total_pages = response
            .total_pages
            .unwrap_or_else(|| total.div_ceil(limit))
            .max(1);

        Self {
            page: query.page.max(1),
            limit,
            total,
            total_pages,
        }
    }

    /// Numbers shown after a failed fetch
    pub fn empty(query: &TransactionQuery) -> Self {
        Self {
            page: query.page.max(1),
            limit: query.limit.max(1),
            total: 0,
            total_pages: 1,
        }
    }

    fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// 1-based number of the row at `idx` on this page
    pub fn row_number(&self, idx: usize) -> usize {
        self.offset().saturating_add(idx + 1)
    }

    /// First row shown ("Showing X to Y of Z"); 0 when this page has no rows
    pub fn showing_from(&self) -> usize {
        if self.offset() >= self.total {
            0
        } else {
            self.offset() + 1
        }
    }

    pub fn showing_to(&self) -> usize {
        if self.showing_from() == 0 {
            0
        } else {
            self.page.saturating_mul(self.limit).min(self.total)
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn prev_page(&self) -> usize {
        self.page.saturating_sub(1).max(1)
    }

    pub fn next_page(&self) -> usize {
        self.page.saturating_add(1).min(self.total_pages)
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn page_with(rows: usize, total: Option<usize>, total_pages: Option<usize>) -> TransactionsPage {
        let row: Transaction = serde_json::from_value(serde_json::json!({ "collect_id": "x" })).unwrap();
        TransactionsPage {
            data: vec![row; rows],
            total,
            total_pages,
            page: None,
            limit: None,
        }
    }

    fn filtered(limit: usize) -> TransactionQuery {
        TransactionQuery {
            search: Some("ord".to_string()),
            status: Some(TransactionStatus::Pending),
            date_from: NaiveDate::from_ymd_opt(2025, 1, 1),
            school_id: Some("s1".to_string()),
            ..TransactionQuery::new(limit)
        }
    }

    #[test]
    fn test_filter_params_without_page_start_at_one() {
        let config = Config::default();
        let query = TransactionQuery::from_params(
            &params(&[("search", "ord"), ("status", "pending"), ("limit", "25")]),
            &config,
        );
        assert_eq!(query.page, 1);
        assert_eq!(query.search.as_deref(), Some("ord"));
    }

    #[test]
    fn test_reset_keeps_limit_and_school() {
        let mut query = filtered(50).with_page(3);
        query.reset();

        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 50);
        assert_eq!(query.school_id.as_deref(), Some("s1"));
        assert_eq!(query.search, None);
        assert_eq!(query.status, None);
        assert_eq!(query.date_from, None);
        assert_eq!(query.to_params().len(), 2);
    }

    #[test]
    fn test_params_only_include_set_filters() {
        let query = TransactionQuery::new(10);
        assert_eq!(
            query.to_params(),
            vec![("page", "1".to_string()), ("limit", "10".to_string())]
        );

        let query = TransactionQuery {
            search: Some("ORD-1".to_string()),
            status: Some(TransactionStatus::Success),
            date_from: NaiveDate::from_ymd_opt(2025, 9, 1),
            date_to: NaiveDate::from_ymd_opt(2025, 9, 30),
            ..TransactionQuery::new(25)
        }
        .with_page(2);
        assert_eq!(
            query.to_params(),
            vec![
                ("page", "2".to_string()),
                ("limit", "25".to_string()),
                ("search", "ORD-1".to_string()),
                ("status", "SUCCESS".to_string()),
                ("dateFrom", "2025-09-01".to_string()),
                ("dateTo", "2025-09-30".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_search_is_no_filter() {
        let query = TransactionQuery::from_params(&params(&[("search", "   ")]), &Config::default());
        assert_eq!(query.search, None);
        assert_eq!(query.to_params().len(), 2);
    }

    #[test]
    fn test_from_params() {
        let config = Config::default();
        let query = TransactionQuery::from_params(
            &params(&[
                ("page", "3"),
                ("limit", "50"),
                ("search", ""),
                ("status", "failed"),
                ("dateFrom", "2025-02-01"),
                ("dateTo", "not-a-date"),
                ("school", " 65b0 "),
            ]),
            &config,
        );

        assert_eq!(query.page, 3);
        assert_eq!(query.limit, 50);
        assert_eq!(query.search, None);
        assert_eq!(query.status, Some(TransactionStatus::Failed));
        assert_eq!(query.date_from, NaiveDate::from_ymd_opt(2025, 2, 1));
        assert_eq!(query.date_to, None);
        assert_eq!(query.school_id.as_deref(), Some("65b0"));
    }

    #[test]
    fn test_from_params_defaults_and_clamps() {
        let config = Config::default();
        let query = TransactionQuery::from_params(
            &params(&[("page", "0"), ("limit", "1000"), ("status", "REFUNDED")]),
            &config,
        );
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 10);
        assert_eq!(query.status, None);

        let query = TransactionQuery::from_params(&HashMap::new(), &config);
        assert_eq!(query, TransactionQuery::default());
    }

    #[test]
    fn test_query_string_encodes_and_includes_school() {
        let query = TransactionQuery {
            search: Some("a&b".to_string()),
            school_id: Some("s 1".to_string()),
            ..TransactionQuery::new(10)
        };
        assert_eq!(query.to_query_string(), "page=1&limit=10&search=a%26b&school=s%201");
    }

    #[test]
    fn test_pagination_prefers_backend_totals() {
        let query = TransactionQuery::new(10).with_page(2);
        let p = Pagination::from_page(&query, &page_with(10, Some(95), Some(12)));
        assert_eq!(p.total, 95);
        assert_eq!(p.total_pages, 12);
        assert_eq!(p.row_number(0), 11);
        assert_eq!(p.showing_from(), 11);
        assert_eq!(p.showing_to(), 20);
    }

    #[test]
    fn test_pagination_derives_missing_totals() {
        let query = TransactionQuery::new(10);
        let p = Pagination::from_page(&query, &page_with(7, None, None));
        assert_eq!(p.total, 7);
        assert_eq!(p.total_pages, 1);

        let p = Pagination::from_page(&query, &page_with(10, Some(31), None));
        assert_eq!(p.total_pages, 4);

        let p = Pagination::from_page(&query, &page_with(0, Some(0), None));
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.showing_from(), 0);
        assert_eq!(p.showing_to(), 0);
    }

    #[test]
    fn test_pagination_navigation() {
        let query = TransactionQuery::new(25);
        let first = Pagination::from_page(&query, &page_with(25, Some(60), None));
        assert!(!first.has_prev());
        assert!(first.has_next());
        assert_eq!(first.prev_page(), 1);
        assert_eq!(first.next_page(), 2);

        let last = Pagination::from_page(&query.with_page(3), &page_with(10, Some(60), None));
        assert!(last.has_prev());
        assert!(!last.has_next());
        assert_eq!(last.next_page(), 3);
        assert_eq!(last.showing_to(), 60);
    }

    #[test]
    fn test_pagination_after_failure() {
        let query = TransactionQuery::new(10).with_page(5);
        let p = Pagination::empty(&query);
        assert_eq!(p.total, 0);
        assert_eq!(p.total_pages, 1);
        assert!(!p.has_next());
    }

    #[test]
    fn test_pagination_huge_page_saturates() {
        let huge = usize::MAX.to_string();
        let query = TransactionQuery::from_params(&params(&[("page", huge.as_str())]), &Config::default());
        assert_eq!(query.page, usize::MAX);

        let p = Pagination::from_page(&query, &page_with(0, Some(30), None));
        assert_eq!(p.showing_from(), 0);
        assert_eq!(p.showing_to(), 0);
        assert_eq!(p.row_number(0), usize::MAX);
        assert_eq!(p.next_page(), 3);
        assert_eq!(p.prev_page(), usize::MAX - 1);
        assert!(!p.has_next());
    }
}
