use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::api::backoffice::{
    BackofficeClient, CreatePaymentRequest, Direction, PaymentStatus, SystemPayment,
};
use crate::error::{ConsoleError, Result};
use crate::paging::{Page, PageSource, RecordKey, RefreshTarget};
use crate::utils::format::{format_signed, format_timestamp, or_placeholder};
use crate::utils::TableRow;

/// Status changes reload the payment list from the first page
pub const PAYMENT_REFRESH: RefreshTarget = RefreshTarget::FirstPage;

/// Statuses an operator may move a payment to
pub const SETTABLE_STATUSES: [PaymentStatus; 4] = [
    PaymentStatus::Executed,
    PaymentStatus::Failed,
    PaymentStatus::Cancelled,
    PaymentStatus::Pending,
];

/// Which payments the screen lists
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentScope {
    All,
    Account(RecordKey),
}

/// Unpaged payment endpoints, sliced into pages locally
pub struct PaymentSource {
    client: Arc<BackofficeClient>,
    scope: Mutex<PaymentScope>,
}

impl PaymentSource {
    pub fn new(client: Arc<BackofficeClient>) -> Self {
        Self {
            client,
            scope: Mutex::new(PaymentScope::All),
        }
    }

    pub fn scope(&self) -> PaymentScope {
        self.scope.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn set_scope(&self, scope: PaymentScope) {
        debug!("Payment scope set to {:?}", scope);
        *self.scope.lock().unwrap_or_else(|e| e.into_inner()) = scope;
    }
}

#[async_trait]
impl PageSource<SystemPayment> for PaymentSource {
    async fn fetch_page(&self, page: u32, size: u32) -> Result<Page<SystemPayment>> {
        let payments = match self.scope() {
            PaymentScope::All => self.client.list_system_payments().await?,
            PaymentScope::Account(account_id) => self.client.list_account_payments(&account_id).await?,
        };
        Ok(Page::from_items(payments, page, size))
    }
}

/// Parse the target status of a status change
pub fn parse_target_status(raw: &str) -> Result<PaymentStatus> {
    let status: PaymentStatus = raw.parse().map_err(ConsoleError::Validation)?;
    if !SETTABLE_STATUSES.contains(&status) {
        return Err(ConsoleError::Validation(format!(
            "A payment cannot be moved to {}; use EXECUTED, FAILED, CANCELLED or PENDING",
            status
        )));
    }
    Ok(status)
}

pub fn confirm_prompt(id: &RecordKey, status: PaymentStatus) -> String {
    format!("Set payment #{} to {}?", id, status)
}

/// PUT the new status for `id`
pub async fn update_status(client: &BackofficeClient, id: &RecordKey, status: PaymentStatus) -> Result<()> {
    client.update_payment_status(id, status).await?;
    info!("Payment {} set to {}", id, status);
    Ok(())
}

/// Raw values of the create-payment form
#[derive(Debug, Clone, Default)]
pub struct PaymentForm {
    pub account_id: String,
    pub amount: String,
    pub direction: String,
    pub description: String,
    pub external_reference_id: String,
    pub status: String,
}

/// Validate the form and build the request body
pub fn build_create_request(form: &PaymentForm) -> Result<CreatePaymentRequest> {
    if form.account_id.trim().is_empty() || form.amount.trim().is_empty() {
        return Err(ConsoleError::Validation(
            "Account ID and amount are required".to_string(),
        ));
    }

    let account_id: i64 = form.account_id.trim().parse().map_err(|_| {
        ConsoleError::Validation(format!("Account ID '{}' is not a number", form.account_id.trim()))
    })?;

    let amount: Decimal = form
        .amount
        .trim()
        .parse()
        .map_err(|_| ConsoleError::Validation(format!("Amount '{}' is not a number", form.amount.trim())))?;
    if amount <= Decimal::ZERO {
        return Err(ConsoleError::Validation("Amount must be greater than 0".to_string()));
    }

    let direction: Direction = form.direction.parse().map_err(ConsoleError::Validation)?;
    let status = if form.status.trim().is_empty() {
        PaymentStatus::Created
    } else {
        form.status.parse().map_err(ConsoleError::Validation)?
    };

    Ok(CreatePaymentRequest {
        account_id,
        amount,
        direction,
        description: form.description.trim().to_string(),
        external_reference_id: form.external_reference_id.trim().to_string(),
        status,
    })
}

/// Validate and submit a new payment
pub async fn create_payment(client: &BackofficeClient, form: &PaymentForm) -> Result<()> {
    let request = build_create_request(form)?;
    client.create_system_payment(&request).await?;
    info!("System payment created for account {} ({})", request.account_id, request.amount);
    Ok(())
}

impl TableRow for SystemPayment {
    fn headers() -> &'static [&'static str] {
        &["Account", "Created", "Reference", "Description", "Amount", "Status", "Payment ID"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.account_id
                .as_ref()
                .map_or_else(|| "-".to_string(), |id| format!("#{}", id)),
            format_timestamp(self.created_at.as_deref()),
            or_placeholder(self.external_reference_id.as_deref(), "-"),
            or_placeholder(self.description.as_deref(), ""),
            format_signed(self.amount, self.direction, ""),
            self.status.to_string(),
            self.resolved_id()
                .map_or_else(|| "- (missing)".to_string(), |id| id.to_string()),
        ]
    }
}
