//! Per-screen adapters: page sources, actions and create forms

pub mod transfer_service;
pub mod ledger_service;
pub mod payment_service;
