use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::api::backoffice::{BackofficeClient, LedgerEntry};
use crate::error::{ConsoleError, Result};
use crate::paging::{Page, PageSource, RecordKey, RefreshTarget};
use crate::utils::format::{format_signed, format_timestamp, humanize_code, or_placeholder};
use crate::utils::TableRow;

/// A reversal reloads the ledger from the first page
pub const LEDGER_REFRESH: RefreshTarget = RefreshTarget::FirstPage;

pub struct LedgerSource {
    client: Arc<BackofficeClient>,
}

impl LedgerSource {
    pub fn new(client: Arc<BackofficeClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageSource<LedgerEntry> for LedgerSource {
    async fn fetch_page(&self, page: u32, size: u32) -> Result<Page<LedgerEntry>> {
        self.client.list_ledger_entries(page, size).await
    }
}

pub fn confirm_prompt(id: &RecordKey) -> String {
    format!("Reverse ledger entry #{}?", id)
}

/// A cached entry that is itself a reversal cannot be reversed again
pub fn check_reversal(cached: Option<&LedgerEntry>) -> Result<()> {
    match cached {
        Some(entry) if entry.reversal => Err(ConsoleError::Validation(format!(
            "Entry #{} is a reversal and cannot be reversed",
            entry
                .transaction_id
                .as_ref()
                .map_or_else(|| "-".to_string(), |id| id.to_string())
        ))),
        _ => Ok(()),
    }
}

/// POST the reversal for `id`
pub async fn reverse(client: &BackofficeClient, id: &RecordKey) -> Result<()> {
    client.reverse_ledger_entry(id).await?;
    info!("Ledger entry {} reversed", id);
    Ok(())
}

impl TableRow for LedgerEntry {
    fn headers() -> &'static [&'static str] {
        &["ID", "Booked", "Type", "Reference", "Description", "Amount", "Reversal"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.transaction_id
                .as_ref()
                .map_or_else(|| "-".to_string(), |id| format!("#{}", id)),
            format_timestamp(self.booking_date.as_deref()),
            self.entry_type
                .as_deref()
                .map_or_else(|| "-".to_string(), humanize_code),
            or_placeholder(self.external_reference.as_deref(), "-"),
            or_placeholder(self.description.as_deref(), ""),
            format_signed(self.amount, self.direction, self.currency.as_deref().unwrap_or("")),
            if self.reversal { "yes".to_string() } else { "no".to_string() },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::backoffice::Direction;
    use rust_decimal::Decimal;

    fn entry(id: i64, reversal: bool) -> LedgerEntry {
        LedgerEntry {
            transaction_id: Some(RecordKey::Number(id)),
            booking_date: Some("2024-05-02T09:30:00Z".to_string()),
            entry_type: Some("CARD_PAYMENT".to_string()),
            external_reference: None,
            description: Some("Coffee".to_string()),
            amount: Decimal::new(250, 2),
            currency: Some("EUR".to_string()),
            direction: Some(Direction::Debit),
            reversal,
        }
    }

    #[test]
    fn test_reversal_entries_are_rejected() {
        assert!(matches!(
            check_reversal(Some(&entry(3, true))),
            Err(ConsoleError::Validation(msg)) if msg.contains("#3")
        ));
        assert!(check_reversal(Some(&entry(4, false))).is_ok());
        assert!(check_reversal(None).is_ok());
    }

    #[test]
    fn test_table_cells() {
        let cells = entry(12, false).cells();
        assert_eq!(cells.len(), LedgerEntry::headers().len());
        assert_eq!(cells[0], "#12");
        assert_eq!(cells[1], "02/05/2024 09:30");
        assert_eq!(cells[2], "CARD PAYMENT");
        assert_eq!(cells[3], "-");
        assert_eq!(cells[5], "- 2.50 EUR");
        assert_eq!(cells[6], "no");
    }

    #[test]
    fn test_refreshes_first_page() {
        assert_eq!(LEDGER_REFRESH, RefreshTarget::FirstPage);
    }
}
