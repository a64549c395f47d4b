//! Data models exchanged with the payments backend

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use feeportal_config::PaymentDefaults;

use crate::error::{CoreError, CoreResult};
use crate::types::TransactionStatus;

fn is_valid_email(email: &str) -> bool {
    static EMAIL_PATTERN: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re = EMAIL_PATTERN.get_or_init(|| regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
    re.is_match(email)
}

/// One row of the transactions list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Order id (displayed as "Order ID")
    #[serde(default, deserialize_with = "lenient_string")]
    pub collect_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub school_id: String,
    #[serde(default, serialize_with = "rust_decimal::serde::float_option::serialize")]
    pub order_amount: Option<Decimal>,
    #[serde(default, serialize_with = "rust_decimal::serde::float_option::serialize")]
    pub transaction_amount: Option<Decimal>,
    /// Payment method / gateway
    #[serde(default)]
    pub gateway: Option<String>,
    #[serde(default)]
    pub status: Option<TransactionStatus>,
    #[serde(default)]
    pub payment_time: Option<String>,
    #[serde(default)]
    pub payment_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_order_id: Option<String>,
    /// Every other field the backend sent, kept for the raw JSON view
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Transaction {
    /// Pretty-printed JSON of the whole record
    pub fn raw_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Id fields: `null` reads as empty, numbers and other values as their JSON text
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Response of the transactions list endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionsPage {
    /// Rows; anything other than an array is read as no rows
    #[serde(default, deserialize_with = "rows_or_empty")]
    pub data: Vec<Transaction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(default, rename = "totalPages", skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

fn rows_or_empty<'de, D>(deserializer: D) -> Result<Vec<Transaction>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Array(_) => {
            serde_json::from_value(value).map_err(serde::de::Error::custom)
        }
        _ => Ok(Vec::new()),
    }
}

/// Response of the transaction-status endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionStatusResponse {
    #[serde(default)]
    pub status: Option<TransactionStatus>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Student block of a payment request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentInfo {
    pub name: String,
    pub id: String,
    pub email: String,
}

/// Body of `POST /create-payment`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePaymentRequest {
    pub trustee_id: String,
    pub student_info: StudentInfo,
    pub gateway_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub callback_url: String,
}

impl CreatePaymentRequest {
    /// Combine validated form input with the configured payment defaults
    pub fn new(payment: ValidPayment, defaults: &PaymentDefaults, student_id: String) -> Self {
        Self {
            trustee_id: defaults.trustee_id.clone(),
            student_info: StudentInfo {
                name: payment.student_name,
                id: student_id,
                email: payment.student_email,
            },
            gateway_name: defaults.gateway_name.clone(),
            amount: payment.amount,
            callback_url: defaults.callback_url.clone(),
        }
    }
}

/// Response of `POST /create-payment`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentResponse {
    pub payment_url: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Error body returned by the backend
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl BackendErrorBody {
    /// Pull a human message out of an error response body
    pub fn extract(body: &str) -> Option<String> {
        let parsed: BackendErrorBody = serde_json::from_str(body).ok()?;
        parsed
            .error
            .or(parsed.message)
            .filter(|m| !m.trim().is_empty())
    }
}

/// Raw payment form fields as posted by the browser
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentForm {
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub student_email: String,
    #[serde(default)]
    pub amount: String,
}

/// Payment form input that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidPayment {
    pub student_name: String,
    pub student_email: String,
    pub amount: Decimal,
}

impl PaymentForm {
    pub fn validate(&self) -> CoreResult<ValidPayment> {
        let name = self.student_name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation {
                field: "student_name".to_string(),
                message: "Student name is required".to_string(),
            });
        }

        let email = self.student_email.trim();
        if !is_valid_email(email) {
            return Err(CoreError::Validation {
                field: "student_email".to_string(),
                message: "Enter a valid email address".to_string(),
            });
        }

        let amount = Decimal::from_str(self.amount.trim())
            .ok()
            .filter(|a| *a > Decimal::ZERO)
            .ok_or_else(|| CoreError::Validation {
                field: "amount".to_string(),
                message: "Amount must be a positive number".to_string(),
            })?;

        Ok(ValidPayment {
            student_name: name.to_string(),
            student_email: email.to_string(),
            amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transaction_decode_full() {
        let tx: Transaction = serde_json::from_value(json!({
            "collect_id": "66f1c0e2a1",
            "school_id": "65b0e6293e9f76a9694d84b4",
            "order_amount": 2000,
            "transaction_amount": 2200.5,
            "gateway": "PhonePe",
            "status": "SUCCESS",
            "payment_time": "2025-09-16T10:15:30.000Z",
            "payment_mode": "upi",
            "custom_order_id": "ORD-1",
            "bank_reference": "YESBNK222"
        }))
        .unwrap();

        assert_eq!(tx.collect_id, "66f1c0e2a1");
        assert_eq!(tx.order_amount, Some(Decimal::from(2000)));
        assert_eq!(tx.transaction_amount, Some(Decimal::from_str("2200.5").unwrap()));
        assert_eq!(tx.status, Some(TransactionStatus::Success));
        assert_eq!(tx.custom_order_id.as_deref(), Some("ORD-1"));
        assert_eq!(tx.extra.get("bank_reference"), Some(&json!("YESBNK222")));
    }

    #[test]
    fn test_transaction_decode_sparse() {
        let tx: Transaction = serde_json::from_value(json!({
            "collect_id": "abc",
            "order_amount": null,
            "status": "DROPPED"
        }))
        .unwrap();

        assert_eq!(tx.order_amount, None);
        assert_eq!(tx.transaction_amount, None);
        assert_eq!(tx.payment_mode, None);
        assert_eq!(tx.status, Some(TransactionStatus::Other("DROPPED".to_string())));
    }

    #[test]
    fn test_odd_ids_do_not_sink_the_page() {
        let page: TransactionsPage = serde_json::from_value(json!({
            "data": [
                { "collect_id": "good", "school_id": "s1" },
                { "collect_id": "c2", "school_id": null },
                { "collect_id": 42, "school_id": { "id": "s3" } }
            ]
        }))
        .unwrap();

        assert_eq!(page.data.len(), 3);
        assert_eq!(page.data[0].collect_id, "good");
        assert_eq!(page.data[1].school_id, "");
        assert_eq!(page.data[2].collect_id, "42");
        assert_eq!(page.data[2].school_id, r#"{"id":"s3"}"#);
    }

    #[test]
    fn test_raw_json_keeps_numbers_and_extra_fields() {
        let tx: Transaction = serde_json::from_value(json!({
            "collect_id": "abc",
            "order_amount": 1500,
            "note": "term 2"
        }))
        .unwrap();
        let raw: serde_json::Value = serde_json::from_str(&tx.raw_json()).unwrap();
        assert_eq!(raw["order_amount"], json!(1500.0));
        assert_eq!(raw["note"], json!("term 2"));
        assert!(raw.get("custom_order_id").is_none());
    }

    #[test]
    fn test_page_data_not_an_array() {
        let page: TransactionsPage =
            serde_json::from_value(json!({ "data": { "oops": true }, "total": 4 })).unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.total, Some(4));

        let page: TransactionsPage = serde_json::from_value(json!({})).unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.total_pages, None);
    }

    #[test]
    fn test_page_total_pages_rename() {
        let page: TransactionsPage = serde_json::from_value(json!({
            "data": [{ "collect_id": "a" }],
            "total": 31,
            "totalPages": 4
        }))
        .unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.total_pages, Some(4));
    }

    #[test]
    fn test_create_request_shape() {
        let form = PaymentForm {
            student_name: "  Asha Rao ".to_string(),
            student_email: "asha@example.com".to_string(),
            amount: "2500".to_string(),
        };
        let request = CreatePaymentRequest::new(
            form.validate().unwrap(),
            &PaymentDefaults::default(),
            "student_1700000000000".to_string(),
        );

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "trustee_id": "trustee123",
                "student_info": {
                    "name": "Asha Rao",
                    "id": "student_1700000000000",
                    "email": "asha@example.com"
                },
                "gateway_name": "edviron",
                "amount": 2500.0,
                "callback_url": "http://localhost:3000/payment-success"
            })
        );
    }

    #[test]
    fn test_payment_form_validation() {
        let mut form = PaymentForm {
            student_name: "Ravi".to_string(),
            student_email: "ravi@school.in".to_string(),
            amount: "100.50".to_string(),
        };
        assert!(form.validate().is_ok());

        form.amount = "0".to_string();
        assert!(matches!(form.validate(), Err(CoreError::Validation { field, .. }) if field == "amount"));

        form.amount = "ten".to_string();
        assert!(form.validate().is_err());

        form.amount = "10".to_string();
        form.student_email = "ravi.school.in".to_string();
        assert!(matches!(form.validate(), Err(CoreError::Validation { field, .. }) if field == "student_email"));

        form.student_email = "ravi@school.in".to_string();
        form.student_name = "   ".to_string();
        assert!(matches!(form.validate(), Err(CoreError::Validation { field, .. }) if field == "student_name"));
    }

    #[test]
    fn test_backend_error_extract() {
        assert_eq!(
            BackendErrorBody::extract(r#"{"error":"Invalid trustee"}"#),
            Some("Invalid trustee".to_string())
        );
        assert_eq!(
            BackendErrorBody::extract(r#"{"message":"Not allowed"}"#),
            Some("Not allowed".to_string())
        );
        assert_eq!(BackendErrorBody::extract(r#"{"error":""}"#), None);
        assert_eq!(BackendErrorBody::extract("<html>502</html>"), None);
    }
}
