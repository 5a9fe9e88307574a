use serde::{Deserialize, Serialize};

use crate::utils::nullable::null_as_default;

/// Page envelope returned by the paged endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(
        default = "Vec::new",
        deserialize_with = "null_as_default",
        bound(deserialize = "T: Deserialize<'de>")
    )]
    pub content: Vec<T>,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default = "default_true")]
    pub first: bool,
    #[serde(default = "default_true")]
    pub last: bool,
}

fn default_true() -> bool {
    true
}

impl<T> Page<T> {
    /// Build an envelope with `first`/`last` derived from the position
    pub fn new(content: Vec<T>, number: u32, total_pages: u32, total_elements: u64) -> Self {
        let first = number == 0;
        let last = total_pages == 0 || number + 1 >= total_pages;
        Page {
            content,
            number,
            total_pages,
            total_elements,
            first,
            last,
        }
    }

    /// Slice a complete list into the requested page.
    ///
    /// Pages past the end come back empty but keep the real totals.
    pub fn from_items(mut all: Vec<T>, page: u32, size: u32) -> Self {
        let size = size.max(1) as usize;
        let total_elements = all.len() as u64;
        let total_pages = ((all.len() + size - 1) / size) as u32;

        let start = (page as usize).saturating_mul(size).min(all.len());
        let end = (start + size).min(all.len());
        let content: Vec<T> = all.drain(start..end).collect();

        Page::new(content, page, total_pages, total_elements)
    }

    /// Check the `first`/`last` flags against `number`/`totalPages`
    pub fn is_consistent(&self) -> bool {
        if self.total_pages == 0 {
            return self.first && self.last;
        }
        self.first == (self.number == 0) && self.last == (self.number + 1 == self.total_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_content_is_empty() {
        let page: Page<u32> =
            serde_json::from_str(r#"{"content": null, "number": 0, "totalPages": 0}"#).unwrap();
        assert!(page.content.is_empty());
        assert!(page.first && page.last);
    }

    #[test]
    fn test_deserialize_spring_page() {
        let json = r#"{
            "content": [1, 2, 3],
            "number": 1,
            "totalPages": 3,
            "totalElements": 25,
            "first": false,
            "last": false,
            "size": 20,
            "empty": false
        }"#;
        let page: Page<i32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.content, vec![1, 2, 3]);
        assert_eq!(page.number, 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_elements, 25);
        assert!(page.is_consistent());
    }

    #[test]
    fn test_missing_content_is_empty() {
        let page: Page<i32> = serde_json::from_str(r#"{"number":0,"totalPages":0}"#).unwrap();
        assert!(page.content.is_empty());
        assert!(page.first && page.last);
    }

    #[test]
    fn test_from_items_slices() {
        let page = Page::from_items((1..=25).collect::<Vec<_>>(), 1, 10);
        assert_eq!(page.content, (11..=20).collect::<Vec<_>>());
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_elements, 25);
        assert!(!page.first);
        assert!(!page.last);

        let tail = Page::from_items((1..=25).collect::<Vec<_>>(), 2, 10);
        assert_eq!(tail.content, (21..=25).collect::<Vec<_>>());
        assert!(tail.last);
    }

    #[test]
    fn test_empty_list_is_first_and_last() {
        let page: Page<i32> = Page::from_items(Vec::new(), 0, 20);
        assert_eq!(page.total_pages, 0);
        assert!(page.first && page.last);
        assert!(page.is_consistent());
    }

    #[test]
    fn test_past_the_end_is_empty() {
        let page = Page::from_items(vec![1, 2, 3], 5, 2);
        assert!(page.content.is_empty());
        assert_eq!(page.total_pages, 2);
    }
}
