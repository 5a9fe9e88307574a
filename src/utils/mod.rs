pub mod table;
pub mod errors;
pub mod format;
pub mod nullable;

pub use table::{Table, TableRow};
pub use errors::extract_error_message;
