//! Payment API endpoints - HTMX form submission and JSON proxy
//!
//! Endpoints:
//! - htmx_create_payment: Validate the form, create the payment, return the result fragment
//! - api_create_payment: Forward a JSON payment request (JSON)

use axum::extract::State;
use axum::{Form, Json};
use feeportal_core::error::{DefaultErrorLogger, ErrorContext, ErrorLogger};
use feeportal_core::{CoreError, CreatePaymentRequest, CreatePaymentResponse, PaymentForm};
use feeportal_utils::escape_html;
use rust_decimal::Decimal;

use crate::{ApiError, AppState};

const CREATE_FAILED: &str = "Payment creation failed";

fn error_fragment(message: &str) -> String {
    format!("<p class='text-red-500 mt-2'>{}</p>", escape_html(message))
}

fn pay_now_fragment(payment_url: &str) -> String {
    format!(
        r#"<div class='mt-4 p-2 bg-green-100 rounded'>
            <a href='{}' target='_blank' rel='noopener noreferrer' class='text-blue-600 font-semibold'>Pay Now</a>
        </div>"#,
        escape_html(payment_url)
    )
}

/// HTMX: Create payment from the form - returns the result fragment
pub async fn htmx_create_payment(
    State(state): State<AppState>,
    Form(form): Form<PaymentForm>,
) -> axum::response::Html<String> {
    let payment = match form.validate() {
        Ok(payment) => payment,
        Err(e) => return axum::response::Html(error_fragment(&e.to_string())),
    };

    let request = CreatePaymentRequest::new(
        payment,
        &state.config.payment,
        feeportal_utils::generate_student_id(),
    );
    log::info!(
        "Creating payment of {} for {}",
        request.amount,
        request.student_info.id
    );

    match state.api.create_payment(&request).await {
        Ok(response) => axum::response::Html(pay_now_fragment(&response.payment_url)),
        Err(e) => {
            let context = ErrorContext::new("create_payment")
                .with_data("student_id", serde_json::json!(request.student_info.id));
            DefaultErrorLogger.log_error(&e, &context);
            axum::response::Html(error_fragment(&e.display_message(CREATE_FAILED)))
        }
    }
}

/// Forward a JSON payment request to the backend (JSON API)
pub async fn api_create_payment(
    State(state): State<AppState>,
    Json(request): Json<CreatePaymentRequest>,
) -> Result<Json<CreatePaymentResponse>, ApiError> {
    if request.amount <= Decimal::ZERO {
        return Err(ApiError::Core(CoreError::Validation {
            field: "amount".to_string(),
            message: "Amount must be a positive number".to_string(),
        }));
    }

    state
        .api
        .create_payment(&request)
        .await
        .map(Json)
        .map_err(|e| ApiError::logged(e, "api_create_payment"))
}
