use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::paging::{Identified, RecordKey};
use crate::utils::nullable::null_as_default;

/// Booking direction of a ledger entry or payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Debit,
    Credit,
}

impl Direction {
    /// Sign shown in front of amounts
    pub fn sign(&self) -> char {
        match self {
            Direction::Debit => '-',
            Direction::Credit => '+',
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEBIT" => Ok(Direction::Debit),
            "CREDIT" => Ok(Direction::Credit),
            other => Err(format!("Unknown direction '{}' (expected DEBIT or CREDIT)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferStatus {
    Created,
    Pending,
    Completed,
    Failed,
    Revoked,
    #[serde(other)]
    Unknown,
}

impl TransferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Created => "CREATED",
            TransferStatus::Pending => "PENDING",
            TransferStatus::Completed => "COMPLETED",
            TransferStatus::Failed => "FAILED",
            TransferStatus::Revoked => "REVOKED",
            TransferStatus::Unknown => "UNKNOWN",
        }
    }
}

impl Default for TransferStatus {
    fn default() -> Self {
        TransferStatus::Unknown
    }
}

impl FromStr for TransferStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CREATED" => Ok(TransferStatus::Created),
            "PENDING" => Ok(TransferStatus::Pending),
            "COMPLETED" => Ok(TransferStatus::Completed),
            "FAILED" => Ok(TransferStatus::Failed),
            "REVOKED" => Ok(TransferStatus::Revoked),
            other => Err(format!(
                "Unknown transfer status '{}' (expected CREATED, PENDING, COMPLETED, FAILED or REVOKED)",
                other
            )),
        }
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Created,
    Pending,
    Executed,
    Failed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Created => "CREATED",
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Executed => "EXECUTED",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::Cancelled => "CANCELLED",
            PaymentStatus::Unknown => "UNKNOWN",
        }
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Unknown
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CREATED" => Ok(PaymentStatus::Created),
            "PENDING" => Ok(PaymentStatus::Pending),
            "EXECUTED" => Ok(PaymentStatus::Executed),
            "FAILED" => Ok(PaymentStatus::Failed),
            "CANCELLED" => Ok(PaymentStatus::Cancelled),
            other => Err(format!(
                "Unknown payment status '{}' (expected CREATED, PENDING, EXECUTED, FAILED or CANCELLED)",
                other
            )),
        }
    }
}

/// Row of `GET /transfers`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub transfer_id: Option<RecordKey>,
    pub created_at: Option<String>,
    pub beneficiary_name: Option<String>,
    #[serde(rename = "type")]
    pub transfer_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: Decimal,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: TransferStatus,
}

impl Identified for Transfer {
    fn record_key(&self) -> Option<RecordKey> {
        self.transfer_id.clone()
    }
}

/// Row of `GET /ledger/accounts/entries`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub transaction_id: Option<RecordKey>,
    pub booking_date: Option<String>,
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
    pub external_reference: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: Decimal,
    pub currency: Option<String>,
    pub direction: Option<Direction>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reversal: bool,
}

impl Identified for LedgerEntry {
    fn record_key(&self) -> Option<RecordKey> {
        self.transaction_id.clone()
    }
}

/// Row of the system-payment endpoints.
///
/// The backend has exposed the identifier under different names, so all
/// three are kept and resolved in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemPayment {
    pub payment_id: Option<RecordKey>,
    pub id: Option<RecordKey>,
    pub transaction_id: Option<RecordKey>,
    pub account_id: Option<RecordKey>,
    pub created_at: Option<String>,
    pub external_reference_id: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: Decimal,
    pub direction: Option<Direction>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: PaymentStatus,
}

impl SystemPayment {
    /// First present of `paymentId`, `id`, `transactionId`
    pub fn resolved_id(&self) -> Option<RecordKey> {
        [&self.payment_id, &self.id, &self.transaction_id]
            .into_iter()
            .flatten()
            .find(|key| key.is_present())
            .cloned()
    }
}

impl Identified for SystemPayment {
    fn record_key(&self) -> Option<RecordKey> {
        self.resolved_id()
    }
}

/// Body of `POST /transfers/create`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransferRequest {
    pub account_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub direction: Direction,
    pub description: String,
    pub external_reference_id: String,
    pub status: TransferStatus,
    pub beneficiary_name: String,
    #[serde(rename = "type")]
    pub transfer_type: String,
}

/// Body of `POST /system-payments`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub account_id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub direction: Direction,
    pub description: String,
    pub external_reference_id: String,
    pub status: PaymentStatus,
}

/// Error body returned by the backend on failures
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub message: Option<String>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paging::Page;

    #[test]
    fn test_transfer_from_json() {
        let json = r#"{
            "transferId": 1,
            "createdAt": "2024-05-02T09:30:00",
            "beneficiaryName": "Mario Rossi",
            "type": "SEPA",
            "amount": 100,
            "status": "CREATED"
        }"#;
        let transfer: Transfer = serde_json::from_str(json).unwrap();
        assert_eq!(transfer.record_key(), Some(RecordKey::Number(1)));
        assert_eq!(transfer.amount, Decimal::from(100));
        assert_eq!(transfer.status, TransferStatus::Created);
        assert_eq!(transfer.transfer_type.as_deref(), Some("SEPA"));
    }

    #[test]
    fn test_unknown_status_is_tolerated() {
        let transfer: Transfer =
            serde_json::from_str(r#"{"transferId": "T-9", "status": "ON_HOLD"}"#).unwrap();
        assert_eq!(transfer.status, TransferStatus::Unknown);
        assert_eq!(transfer.beneficiary_name, None);
    }

    #[test]
    fn test_ledger_entry_from_json() {
        let json = r#"{
            "transactionId": 77,
            "bookingDate": "2024-05-02T09:30:00Z",
            "type": "CARD_PAYMENT",
            "externalReference": null,
            "description": "Coffee",
            "amount": 2.5,
            "currency": "EUR",
            "direction": "DEBIT",
            "reversal": true
        }"#;
        let entry: LedgerEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.record_key(), Some(RecordKey::Number(77)));
        assert_eq!(entry.amount, Decimal::new(25, 1));
        assert_eq!(entry.direction, Some(Direction::Debit));
        assert!(entry.reversal);
    }

    #[test]
    fn test_payment_id_resolution_order() {
        let payment: SystemPayment =
            serde_json::from_str(r#"{"id": 4, "transactionId": 9, "amount": "10.00"}"#).unwrap();
        assert_eq!(payment.resolved_id(), Some(RecordKey::Number(4)));

        let payment: SystemPayment =
            serde_json::from_str(r#"{"paymentId": 0, "transactionId": "abc"}"#).unwrap();
        assert_eq!(payment.resolved_id(), Some(RecordKey::from("abc")));

        let payment: SystemPayment = serde_json::from_str(r#"{"accountId": 12}"#).unwrap();
        assert_eq!(payment.resolved_id(), None);
    }

    #[test]
    fn test_create_request_serializes_amount_as_number() {
        let request = CreatePaymentRequest {
            account_id: 12,
            amount: Decimal::new(1050, 2),
            direction: Direction::Credit,
            description: "Refund".to_string(),
            external_reference_id: "EXT-1".to_string(),
            status: PaymentStatus::Created,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["accountId"], 12);
        assert_eq!(value["amount"], 10.5);
        assert_eq!(value["direction"], "CREDIT");
        assert_eq!(value["externalReferenceId"], "EXT-1");
        assert_eq!(value["status"], "CREATED");
    }

    #[test]
    fn test_parse_status_case_insensitive() {
        assert_eq!("executed".parse::<PaymentStatus>(), Ok(PaymentStatus::Executed));
        assert!("done".parse::<PaymentStatus>().is_err());
        assert_eq!(" credit ".parse::<Direction>(), Ok(Direction::Credit));
    }

    #[test]
    fn test_null_fields_fall_back_to_defaults() {
        let payments: Vec<SystemPayment> = serde_json::from_str(
            r#"[
                {"paymentId": 1, "amount": "10.00", "status": "EXECUTED"},
                {"paymentId": 2, "amount": null, "status": null, "direction": null}
            ]"#,
        )
        .unwrap();
        assert_eq!(payments.len(), 2);
        assert_eq!(payments[0].status, PaymentStatus::Executed);
        assert_eq!(payments[1].status, PaymentStatus::Unknown);
        assert_eq!(payments[1].amount, Decimal::ZERO);

        let entry: LedgerEntry =
            serde_json::from_str(r#"{"transactionId": 5, "reversal": null, "amount": null}"#).unwrap();
        assert!(!entry.reversal);
        assert_eq!(entry.amount, Decimal::ZERO);

        let transfer: Transfer =
            serde_json::from_str(r#"{"transferId": 3, "status": null, "amount": null}"#).unwrap();
        assert_eq!(transfer.status, TransferStatus::Unknown);

        let page: Page<Transfer> =
            serde_json::from_str(r#"{"content": null, "number": 0, "totalPages": 0}"#).unwrap();
        assert!(page.content.is_empty());
    }
}
