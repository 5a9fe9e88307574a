pub mod prompt;
pub mod view;

pub use prompt::{DialoguerPrompter, Prompter};
pub use view::ConsoleView;
