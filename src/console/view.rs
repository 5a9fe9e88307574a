use std::marker::PhantomData;

use crate::paging::{ListView, Page};
use crate::utils::{Table, TableRow};

/// Prints a list screen to stdout
pub struct ConsoleView<T> {
    /// Plural noun used in messages, e.g. "transfers"
    noun: &'static str,
    _rows: PhantomData<fn(T)>,
}

impl<T> ConsoleView<T> {
    pub fn new(noun: &'static str) -> Self {
        Self {
            noun,
            _rows: PhantomData,
        }
    }
}

impl<T: TableRow> ConsoleView<T> {
    pub fn render_items(&self, items: &[T]) -> String {
        if items.is_empty() {
            return format!("No {} found.\n", self.noun);
        }
        Table::from_rows(items).render()
    }
}

/// `‹ prev | Page 2 of 3 (total: 45) | next ›`, with `·` marking a disabled side
pub fn pagination_line<T>(page: &Page<T>) -> String {
    let prev = if page.first { "·" } else { "‹ prev" };
    let next = if page.last { "·" } else { "next ›" };
    let shown = if page.total_pages == 0 { 0 } else { page.number + 1 };
    format!(
        "{} | Page {} of {} (total: {}) | {}",
        prev, shown, page.total_pages, page.total_elements, next
    )
}

impl<T: TableRow> ListView<T> for ConsoleView<T> {
    fn show_loading(&self) {
        println!("⏳ Loading {}...", self.noun);
    }

    fn show_items(&self, items: &[T]) {
        print!("{}", self.render_items(items));
    }

    fn show_pagination(&self, page: &Page<T>) {
        println!("{}", pagination_line(page));
    }

    fn show_error(&self, message: &str) {
        println!("❌ Error: {}", message);
    }

    fn report_failure(&self, message: &str) {
        println!("❌ {}", message);
    }
}
