//! Search, sort and pagination parameters

use serde::{Deserialize, Serialize};

/// Rows per page
pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column_id: String,
    pub direction: SortDirection,
}

/// Current view parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub search_text: String,
    pub sort: Option<SortSpec>,
    /// 0-based
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            sort: None,
            page_index: 0,
            page_size: PAGE_SIZE,
        }
    }
}

impl Query {
    /// Set the search text; the page always goes back to the first one
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.page_index = 0;
    }

    /// Sort on `column_id`: ascending first, then flipping on each repeat
    pub fn toggle_sort(&mut self, column_id: &str) {
        let direction = match &self.sort {
            Some(current) if current.column_id == column_id => current.direction.toggled(),
            _ => SortDirection::Asc,
        };
        self.sort = Some(SortSpec {
            column_id: column_id.to_string(),
            direction,
        });
    }

    /// Number of pages for `total` filtered rows; never less than one
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.page_size.max(1)).max(1)
    }

    /// Clamp the page index into `[0, total_pages - 1]`
    pub fn clamp_page(&mut self, total: usize) {
        let last = self.total_pages(total) - 1;
        self.page_index = self.page_index.min(last);
    }
}
