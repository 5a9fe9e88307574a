use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::info;

use crate::api::backoffice::{
    BackofficeClient, CreateTransferRequest, Direction, Transfer, TransferStatus,
};
use crate::error::{ConsoleError, Result};
use crate::paging::{Page, PageSource, RecordKey, RefreshTarget};
use crate::utils::format::{format_amount, format_timestamp, or_placeholder};
use crate::utils::TableRow;

/// Transfers reload the page the operator is looking at
pub const TRANSFER_REFRESH: RefreshTarget = RefreshTarget::CurrentPage;

pub struct TransferSource {
    client: Arc<BackofficeClient>,
}

impl TransferSource {
    pub fn new(client: Arc<BackofficeClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageSource<Transfer> for TransferSource {
    async fn fetch_page(&self, page: u32, size: u32) -> Result<Page<Transfer>> {
        self.client.list_transfers(page, size).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferAction {
    Execute,
    Revoke,
}

impl TransferAction {
    pub fn name(&self) -> &'static str {
        match self {
            TransferAction::Execute => "execute",
            TransferAction::Revoke => "revoke",
        }
    }

    pub fn confirm_prompt(&self, id: &RecordKey) -> String {
        match self {
            TransferAction::Execute => format!("Execute transfer #{}?", id),
            TransferAction::Revoke => format!("Revoke transfer #{}?", id),
        }
    }

    pub fn success_message(&self, id: &RecordKey) -> String {
        match self {
            TransferAction::Execute => format!("Transfer #{} executed", id),
            TransferAction::Revoke => format!("Transfer #{} revoked", id),
        }
    }
}

/// Actions offered for a transfer; only `CREATED` transfers can change
pub fn available_actions(transfer: &Transfer) -> &'static [TransferAction] {
    match transfer.status {
        TransferStatus::Created => &[TransferAction::Execute, TransferAction::Revoke],
        _ => &[],
    }
}

/// Reject an action on a cached transfer that does not offer it.
///
/// Transfers not in the cache are left for the backend to judge.
pub fn check_action(cached: Option<&Transfer>, action: TransferAction) -> Result<()> {
    match cached {
        Some(transfer) if !available_actions(transfer).contains(&action) => {
            Err(ConsoleError::Validation(format!(
                "Transfer is {}; only CREATED transfers can be executed or revoked",
                transfer.status
            )))
        }
        _ => Ok(()),
    }
}

/// Send the mutating call for `action`
pub async fn perform(client: &BackofficeClient, action: TransferAction, id: &RecordKey) -> Result<()> {
    match action {
        TransferAction::Execute => client.execute_transfer(id).await?,
        TransferAction::Revoke => client.revoke_transfer(id).await?,
    }
    info!("Transfer {} {}d", id, action.name());
    Ok(())
}

/// Raw values of the create-transfer form
#[derive(Debug, Clone, Default)]
pub struct TransferForm {
    pub account_id: String,
    pub amount: String,
    pub direction: String,
    pub description: String,
    pub external_reference_id: String,
    pub status: String,
    pub beneficiary_name: String,
    pub transfer_type: String,
}

/// Validate the form and build the request body
pub fn build_create_request(form: &TransferForm) -> Result<CreateTransferRequest> {
    let account_id = form.account_id.trim();
    if account_id.is_empty() {
        return Err(ConsoleError::Validation("Account ID is required".to_string()));
    }

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
        TransferStatus::Created
    } else {
        form.status.parse().map_err(ConsoleError::Validation)?
    };

    Ok(CreateTransferRequest {
        account_id: account_id.to_string(),
        amount,
        direction,
        description: form.description.trim().to_string(),
        external_reference_id: form.external_reference_id.trim().to_string(),
        status,
        beneficiary_name: form.beneficiary_name.trim().to_string(),
        transfer_type: form.transfer_type.trim().to_string(),
    })
}

/// Validate and submit a new transfer
pub async fn create_transfer(client: &BackofficeClient, form: &TransferForm) -> Result<()> {
    let request = build_create_request(form)?;
    client.create_transfer(&request).await?;
    info!("Transfer created for account {} ({})", request.account_id, request.amount);
    Ok(())
}

impl TableRow for Transfer {
    fn headers() -> &'static [&'static str] {
        &["ID", "Beneficiary", "Type", "Status", "Amount", "Created", "Actions"]
    }

    fn cells(&self) -> Vec<String> {
        let actions: Vec<&str> = available_actions(self).iter().map(|a| a.name()).collect();
        vec![
            self.transfer_id
                .as_ref()
                .map_or_else(|| "-".to_string(), |id| format!("#{}", id)),
            or_placeholder(self.beneficiary_name.as_deref(), "Unknown"),
            or_placeholder(self.transfer_type.as_deref(), "N/A"),
            self.status.to_string(),
            format_amount(self.amount, "EUR"),
            format_timestamp(self.created_at.as_deref()),
            if actions.is_empty() { "-".to_string() } else { actions.join("/") },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer(id: i64, status: TransferStatus) -> Transfer {
        Transfer {
            transfer_id: Some(RecordKey::Number(id)),
            created_at: Some("2024-05-02T09:30:00".to_string()),
            beneficiary_name: None,
            transfer_type: Some("SEPA".to_string()),
            amount: Decimal::new(123450, 2),
            status,
        }
    }

    fn valid_form() -> TransferForm {
        TransferForm {
            account_id: "IT60X0542811101000000123456".to_string(),
            amount: "250.00".to_string(),
            direction: "debit".to_string(),
            description: "Rent".to_string(),
            external_reference_id: "EXT-77".to_string(),
            status: String::new(),
            beneficiary_name: "Mario Rossi".to_string(),
            transfer_type: "SEPA".to_string(),
        }
    }

    #[test]
    fn test_only_created_transfers_offer_actions() {
        assert_eq!(
            available_actions(&transfer(1, TransferStatus::Created)),
            &[TransferAction::Execute, TransferAction::Revoke]
        );
        assert!(available_actions(&transfer(2, TransferStatus::Completed)).is_empty());
    }

    #[test]
    fn test_check_action_against_cache() {
        let done = transfer(2, TransferStatus::Completed);
        assert!(matches!(
            check_action(Some(&done), TransferAction::Execute),
            Err(ConsoleError::Validation(_))
        ));
        assert!(check_action(Some(&transfer(1, TransferStatus::Created)), TransferAction::Revoke).is_ok());
        assert!(check_action(None, TransferAction::Execute).is_ok());
    }

    #[test]
    fn test_build_request_from_form() {
        let request = build_create_request(&valid_form()).unwrap();
        assert_eq!(request.amount, Decimal::new(25000, 2));
        assert_eq!(request.direction, Direction::Debit);
        assert_eq!(request.status, TransferStatus::Created);
        assert_eq!(request.beneficiary_name, "Mario Rossi");
    }

    #[test]
    fn test_non_positive_amount_is_rejected() {
        for amount in ["0", "-5", "abc", ""] {
            let form = TransferForm {
                amount: amount.to_string(),
                ..valid_form()
            };
            assert!(
                matches!(build_create_request(&form), Err(ConsoleError::Validation(_))),
                "amount {:?} should be rejected",
                amount
            );
        }
    }

    #[test]
    fn test_missing_account_is_rejected() {
        let form = TransferForm {
            account_id: "  ".to_string(),
            ..valid_form()
        };
        assert!(matches!(build_create_request(&form), Err(ConsoleError::Validation(_))));
    }

    #[tokio::test]
    async fn test_invalid_form_issues_no_call() {
        // Nothing listens here; a validation error proves no request was sent
        let client = BackofficeClient::with_base_url("http://127.0.0.1:9");
        let form = TransferForm {
            amount: "0".to_string(),
            ..valid_form()
        };
        assert!(matches!(
            create_transfer(&client, &form).await,
            Err(ConsoleError::Validation(_))
        ));
    }

    #[test]
    fn test_table_cells() {
        let cells = transfer(1, TransferStatus::Created).cells();
        assert_eq!(cells.len(), Transfer::headers().len());
        assert_eq!(cells[0], "#1");
        assert_eq!(cells[1], "Unknown");
        assert_eq!(cells[4], "1,234.50 EUR");
        assert_eq!(cells[5], "02/05/2024 09:30");
        assert_eq!(cells[6], "execute/revoke");

        let cells = transfer(2, TransferStatus::Revoked).cells();
        assert_eq!(cells[3], "REVOKED");
        assert_eq!(cells[6], "-");
    }
}
