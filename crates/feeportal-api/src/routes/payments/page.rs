//! Payment form page rendering

/// Payment form - student name, email and amount, posted via HTMX
pub async fn page_payment_form(headers: axum::http::HeaderMap) -> axum::response::Html<String> {
    let inner_content = r#"<div class='max-w-md mx-auto bg-white p-6 rounded shadow-md mt-6'>
        <h2 class='text-xl font-semibold mb-4'>Create Payment</h2>
        <form id='payment-form' hx-post='/paymentform' hx-target='#payment-result' hx-swap='innerHTML'
            hx-indicator='#payment-form' hx-disabled-elt='#payment-submit' class='flex flex-col gap-4'>
            <input type='text' name='student_name' placeholder='Student Name' required class='border p-2 rounded'>
            <input type='email' name='student_email' placeholder='Student Email' required class='border p-2 rounded'>
            <input type='number' name='amount' placeholder='Amount' min='0' step='any' required class='border p-2 rounded'>
            <button id='payment-submit' type='submit' class='bg-blue-500 text-white p-2 rounded hover:bg-blue-600 disabled:opacity-50'>
                <span class='htmx-idle'>Create Payment</span>
                <span class='htmx-indicator'>Creating...</span>
            </button>
        </form>
        <div id='payment-result'></div>
    </div>"#;

    axum::response::Html(crate::page_response(&headers, "Create Payment", "/paymentform", inner_content))
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_payment_form_page() {
        let html = body_string(
            router_with(Arc::new(StubApi::default()))
                .oneshot(Request::get("/paymentform").body(Body::empty()).unwrap())
                .await
                .unwrap(),
        )
        .await;

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("hx-post='/paymentform'"));
        assert!(html.contains("hx-disabled-elt='#payment-submit'"));
        assert!(html.contains("<span class='htmx-indicator'>Creating...</span>"));
        assert!(html.contains("name='student_name' placeholder='Student Name' required"));
        assert!(html.contains("type='email' name='student_email' placeholder='Student Email' required"));
        assert!(html.contains("name='amount' placeholder='Amount' min='0' step='any' required"));
    }
}
