//! Client for the payments REST API
//!
//! `PaymentsApi` is the seam between the web handlers and the backend;
//! `HttpPaymentsClient` is the reqwest implementation used in production.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

use feeportal_config::PaymentsApiConfig;

use crate::error::{CoreError, CoreResult};
use crate::models::{
    BackendErrorBody, CreatePaymentRequest, CreatePaymentResponse, TransactionStatusResponse,
    TransactionsPage,
};
use crate::TransactionQuery;

/// Operations offered by the payments backend
#[async_trait]
pub trait PaymentsApi: Send + Sync {
    /// `POST /create-payment`
    async fn create_payment(&self, request: &CreatePaymentRequest) -> CoreResult<CreatePaymentResponse>;

    /// `GET /transactions`
    async fn transactions(&self, query: &TransactionQuery) -> CoreResult<TransactionsPage>;

    /// `GET /transactions/school/{school_id}`
    async fn transactions_by_school(
        &self,
        school_id: &str,
        query: &TransactionQuery,
    ) -> CoreResult<TransactionsPage>;

    /// `GET /transaction-status/{order_id}`
    async fn transaction_status(&self, order_id: &str) -> CoreResult<TransactionStatusResponse>;

    /// List transactions, scoped to a school when the query names one
    async fn list(&self, query: &TransactionQuery) -> CoreResult<TransactionsPage> {
        match query.school_id.as_deref() {
            Some(school_id) => self.transactions_by_school(school_id, query).await,
            None => self.transactions(query).await,
        }
    }
}

/// reqwest-backed payments API client
#[derive(Debug, Clone)]
pub struct HttpPaymentsClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPaymentsClient {
    pub fn new(config: &PaymentsApiConfig) -> CoreResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CoreError::ClientSetup { message: e.to_string() })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join the base URL with percent-encoded path segments
    fn url(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for segment in segments {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        url
    }

    async fn get_page(&self, url: String, query: &TransactionQuery) -> CoreResult<TransactionsPage> {
        let params = query.to_params();
        log::debug!("GET {} {:?}", url, params);
        let res = self.client.get(&url).query(&params).send().await?;
        decode(res).await
    }
}

/// Decode a success body, or turn an error status into `CoreError::Api`
async fn decode<T: DeserializeOwned>(res: reqwest::Response) -> CoreResult<T> {
    let status = res.status();
    let url = res.url().to_string();
    let body = res.text().await?;

    if !status.is_success() {
        let message = BackendErrorBody::extract(&body).unwrap_or_default();
        log::warn!("{} answered {}: {}", url, status.as_u16(), message);
        return Err(CoreError::Api {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        log::warn!("Undecodable body from {}: {}", url, e);
        CoreError::from(e)
    })
}

#[async_trait]
impl PaymentsApi for HttpPaymentsClient {
    async fn create_payment(&self, request: &CreatePaymentRequest) -> CoreResult<CreatePaymentResponse> {
        let url = self.url(&["create-payment"]);
        log::debug!("POST {} for student {}", url, request.student_info.id);
        let res = self.client.post(&url).json(request).send().await?;
        decode(res).await
    }

    async fn transactions(&self, query: &TransactionQuery) -> CoreResult<TransactionsPage> {
        self.get_page(self.url(&["transactions"]), query).await
    }

    async fn transactions_by_school(
        &self,
        school_id: &str,
        query: &TransactionQuery,
    ) -> CoreResult<TransactionsPage> {
        self.get_page(self.url(&["transactions", "school", school_id]), query).await
    }

    async fn transaction_status(&self, order_id: &str) -> CoreResult<TransactionStatusResponse> {
        let url = self.url(&["transaction-status", order_id]);
        log::debug!("GET {}", url);
        let res = self.client.get(&url).send().await?;
        decode(res).await
    }
}
