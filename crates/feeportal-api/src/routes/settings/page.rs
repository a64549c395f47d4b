//! Settings page rendering - Full page endpoints

use feeportal_utils::escape_html;

use crate::AppState;

pub async fn page_settings(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let config = &state.config;

    let offset_minutes = config.display.utc_offset_minutes;
    let offset = format!(
        "UTC{}{:02}:{:02}",
        if offset_minutes < 0 { '-' } else { '+' },
        offset_minutes.abs() / 60,
        offset_minutes.abs() % 60
    );
    let page_sizes = config
        .pagination
        .page_size_options
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    let inner_content = format!(
        r#"<div class='max-w-5xl mx-auto'>
        <div class='mb-6'><h2 class='text-2xl font-bold'>Settings</h2></div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>Server</h3>
            <div class='grid grid-cols-2 gap-4'>
                <div><p class='text-sm text-gray-500'>Listen address</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Log level</p><p class='font-medium'>{}</p></div>
            </div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>Payments API</h3>
            <div class='grid grid-cols-2 gap-4'>
                <div><p class='text-sm text-gray-500'>Base URL</p><p class='font-medium break-all'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Timeout</p><p class='font-medium'>{} s</p></div>
            </div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>Payment defaults</h3>
            <div class='grid grid-cols-2 gap-4'>
                <div><p class='text-sm text-gray-500'>Trustee ID</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Gateway</p><p class='font-medium'>{}</p></div>
                <div class='col-span-2'><p class='text-sm text-gray-500'>Callback URL</p><p class='font-medium break-all'>{}</p></div>
            </div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6'>
            <h3 class='text-lg font-semibold mb-4'>Transactions</h3>
            <div class='grid grid-cols-2 gap-4'>
                <div><p class='text-sm text-gray-500'>Page sizes</p><p class='font-medium'>{} (default {})</p></div>
                <div><p class='text-sm text-gray-500'>Search debounce</p><p class='font-medium'>{} ms</p></div>
                <div><p class='text-sm text-gray-500'>Display time zone</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Currency symbol</p><p class='font-medium'>{}</p></div>
            </div>
        </div>
        </div>"#,
        escape_html(&config.bind_addr()),
        escape_html(&config.logging.level),
        escape_html(&config.payments_api.base_url),
        config.payments_api.timeout_secs,
        escape_html(&config.payment.trustee_id),
        escape_html(&config.payment.gateway_name),
        escape_html(&config.payment.callback_url),
        page_sizes,
        config.pagination.default_limit,
        config.display.search_debounce_ms,
        offset,
        escape_html(&config.display.currency_symbol),
    );

    axum::response::Html(crate::page_response(&headers, "Settings", "/settings", &inner_content))
}
