use reqwest::Client as HttpClient;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::models::{
    CreatePaymentRequest, CreateTransferRequest, LedgerEntry, PaymentStatus, SystemPayment,
    Transfer,
};
use crate::config::Config;
use crate::error::{ConsoleError, Result};
use crate::paging::{Page, RecordKey};
use crate::utils::extract_error_message;

/// REST client for the back-office backend
pub struct BackofficeClient {
    http_client: HttpClient,
    base_url: String,
}

impl BackofficeClient {
    /// Create a client from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| ConsoleError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.api_url.clone(),
        })
    }

    /// Create a client with custom base URL (for testing)
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build an error from a non-success response
    async fn handle_error_response(status: StatusCode, response: Response) -> ConsoleError {
        let body_text = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body_text)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or_default().to_string());

        if status.is_server_error() {
            warn!("Server error {}: {}", status.as_u16(), body_text);
        } else {
            debug!("Request rejected with {}: {}", status.as_u16(), body_text);
        }

        ConsoleError::Http {
            status: status.as_u16(),
            message,
        }
    }

    /// Send a request and reject non-success statuses
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| ConsoleError::Transport(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ConsoleError::Decode(format!("Failed to parse response: {}", e)))
    }

    /// GET /transfers?page={page}&size={size}
    pub async fn list_transfers(&self, page: u32, size: u32) -> Result<Page<Transfer>> {
        let url = self.url("/transfers");
        debug!("GET {} (page {}, size {})", url, page, size);
        self.send_json(self.http_client.get(&url).query(&[("page", page), ("size", size)]))
            .await
    }

    /// POST /transfers/{id}/execute
    pub async fn execute_transfer(&self, id: &RecordKey) -> Result<()> {
        let url = self.url(&format!("/transfers/{}/execute", id));
        debug!("POST {}", url);
        self.send(self.http_client.post(&url)).await.map(|_| ())
    }

    /// PUT /transfers/{id}/revoke
    pub async fn revoke_transfer(&self, id: &RecordKey) -> Result<()> {
        let url = self.url(&format!("/transfers/{}/revoke", id));
        debug!("PUT {}", url);
        self.send(self.http_client.put(&url)).await.map(|_| ())
    }

    /// POST /transfers/create
    pub async fn create_transfer(&self, request: &CreateTransferRequest) -> Result<()> {
        let url = self.url("/transfers/create");
        debug!("POST {} ({:?})", url, request);
        self.send(self.http_client.post(&url).json(request)).await.map(|_| ())
    }

    /// GET /ledger/accounts/entries?page={page}&size={size}
    pub async fn list_ledger_entries(&self, page: u32, size: u32) -> Result<Page<LedgerEntry>> {
        let url = self.url("/ledger/accounts/entries");
        debug!("GET {} (page {}, size {})", url, page, size);
        self.send_json(self.http_client.get(&url).query(&[("page", page), ("size", size)]))
            .await
    }

    /// POST /ledger/accounts/entries/{id}/reversal
    pub async fn reverse_ledger_entry(&self, id: &RecordKey) -> Result<()> {
        let url = self.url(&format!("/ledger/accounts/entries/{}/reversal", id));
        debug!("POST {}", url);
        self.send(self.http_client.post(&url)).await.map(|_| ())
    }

    /// GET /system-payments/accounts/payments
    pub async fn list_system_payments(&self) -> Result<Vec<SystemPayment>> {
        let url = self.url("/system-payments/accounts/payments");
        debug!("GET {}", url);
        self.send_json(self.http_client.get(&url)).await
    }

    /// GET /system-payments/accounts/{accountId}
    pub async fn list_account_payments(&self, account_id: &RecordKey) -> Result<Vec<SystemPayment>> {
        let url = self.url(&format!("/system-payments/accounts/{}", account_id));
        debug!("GET {}", url);
        self.send_json(self.http_client.get(&url)).await
    }

    /// POST /system-payments
    pub async fn create_system_payment(&self, request: &CreatePaymentRequest) -> Result<()> {
        let url = self.url("/system-payments");
        debug!("POST {} ({:?})", url, request);
        self.send(self.http_client.post(&url).json(request)).await.map(|_| ())
    }

    /// PUT /system-payments/{id}/status?status={status}
    pub async fn update_payment_status(&self, id: &RecordKey, status: PaymentStatus) -> Result<()> {
        let url = self.url(&format!("/system-payments/{}/status", id));
        debug!("PUT {} (status {})", url, status);
        self.send(self.http_client.put(&url).query(&[("status", status.as_str())]))
            .await
            .map(|_| ())
    }
}
