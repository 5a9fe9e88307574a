pub mod client;
pub mod models;

pub use client::BackofficeClient;
pub use models::{
    CreatePaymentRequest, CreateTransferRequest, Direction, LedgerEntry, PaymentStatus,
    SystemPayment, Transfer, TransferStatus,
};
