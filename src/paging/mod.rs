//! Paged list view-model shared by the transfer, ledger and payment screens

pub mod key;
pub mod page;
pub mod view_model;

pub use key::{Identified, RecordKey};
pub use page::Page;
pub use view_model::{
    ListView, LoadOutcome, LoadPolicy, PageSource, PagedListViewModel, RefreshTarget,
};
