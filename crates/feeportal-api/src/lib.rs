//! HTTP server with HTMX pages for the fee portal
//!
//! Routes are organized into modules:
//! - routes::home: Landing page
//! - routes::payments: Payment creation form and JSON proxy
//! - routes::transactions: Transaction table, filters, pagination, details
//! - routes::settings: Configuration display

pub mod error;
pub mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use feeportal_config::Config;
use feeportal_core::PaymentsApi;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn PaymentsApi>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::home::page_home;
    use routes::payments::{api_create_payment, htmx_create_payment, page_payment_form};
    use routes::settings::{api_settings, page_settings};
    use routes::transactions::{
        api_transaction_status, api_transactions, api_transactions_by_school,
        htmx_transaction_detail, htmx_transaction_status, htmx_transactions_list,
        page_transactions,
    };

    let json_api = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/transactions", get(api_transactions))
        .route("/api/transactions/school/:school_id", get(api_transactions_by_school))
        .route("/api/transaction-status/:order_id", get(api_transaction_status))
        .route("/api/create-payment", post(api_create_payment))
        .route("/api/settings", get(api_settings))
        .layer(CorsLayer::permissive());

    Router::new()
        // HTMX page routes
        .route("/", get(page_home))
        .route("/paymentform", get(page_payment_form).post(htmx_create_payment))
        .route("/transactions", get(page_transactions))
        .route("/settings", get(page_settings))
        // HTMX partial routes
        .route("/transactions/list", get(htmx_transactions_list))
        .route("/transactions/:order_id/detail", get(htmx_transaction_detail))
        .route("/transactions/:order_id/status", get(htmx_transaction_status))
        .merge(json_api)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Edviron Payments</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ display: none; }}
        .htmx-request .htmx-indicator {{ display: inline; }}
        .htmx-request.htmx-indicator {{ display: inline; }}
        .htmx-request .htmx-idle {{ display: none; }}
    </style>
</head>
<body class="min-h-screen bg-gray-100 text-gray-900">
    {}
</body>
</html>"#,
        title, content
    )
}

/// Top navigation bar
pub fn nav_bar(current_path: &str) -> String {
    let links = [
        ("/", "Home"),
        ("/paymentform", "Create Payment"),
        ("/transactions", "Transactions"),
    ];

    let mut nav = String::from("<nav class='bg-white shadow-md p-4 flex gap-6'>");
    for (path, label) in &links {
        let is_active = if *path == "/" {
            current_path == "/"
        } else {
            current_path.starts_with(path)
        };
        let active_class = if is_active {
            "text-blue-600 font-semibold"
        } else {
            "text-gray-600 hover:text-blue-600"
        };
        nav.push_str(&format!(
            r#"<a href='{}' hx-get='{}' hx-target='#main-content' hx-push-url='true' class='{}'>{}</a>"#,
            path, path, active_class, label
        ));
    }
    nav.push_str("<a href='/settings' class='ml-auto text-gray-400 hover:text-gray-600' title='Settings'>⚙️</a></nav>");
    nav
}

/// Check if request is from HTMX (partial page update)
fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(
    headers: &axum::http::HeaderMap,
    title: &str,
    current_path: &str,
    inner_content: &str,
) -> String {
    if is_htmx_request(headers) {
        inner_content.to_string()
    } else {
        base_html(
            title,
            &format!(
                r#"{}
<main id='main-content' class='p-6'>{}</main>"#,
                nav_bar(current_path),
                inner_content
            ),
        )
    }
}

/// Start the HTTP server
///
/// Binds `server.host:server.port` and serves until the process is stopped.
pub async fn start_server(config: Config, api: Arc<dyn PaymentsApi>) -> std::io::Result<()> {
    let addr = config.bind_addr();
    let base_url = config.payments_api.base_url.clone();
    let state = AppState { api, config };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting fee portal on http://{}", addr);
    log::info!("Payments API: {}", base_url);
    log::info!("Available routes:");
    log::info!("  - / (Home)");
    log::info!("  - /paymentform (Create payment)");
    log::info!("  - /transactions (Transaction list)");
    log::info!("  - /settings (Configuration)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router).await?;
    log::info!("Server stopped");
    Ok(())
}
