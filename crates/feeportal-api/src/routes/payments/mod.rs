//! Payment routes - Payment creation
//!
//! Structure:
//! - api.rs: Form submission (HTML fragment) and JSON create-payment proxy
//! - page.rs: Payment form page

pub mod api;
pub mod page;

pub use api::{api_create_payment, htmx_create_payment};
pub use page::page_payment_form;
