//! View derivation: filter → sort → paginate
//!
//! Everything here is a pure function of `(rows, columns, query)`. The
//! pipeline order is fixed: the search filter runs first, then the stable
//! sort, then the page slice.

use std::cmp::Ordering;

use crate::model::{ColumnRegistry, ColumnType, Query, Row, SortDirection, SortSpec};

/// The visible page and its pagination info
#[derive(Debug, Clone, PartialEq)]
pub struct View<'a> {
    /// Rows on the current page, in display order
    pub page_rows: Vec<&'a Row>,
    /// Rows matching the search, across all pages
    pub total_filtered: usize,
    /// At least 1, even when nothing matches
    pub total_pages: usize,
    /// 0-based page the slice was taken from
    pub page_index: usize,
}

impl View<'_> {
    /// Ids of the rows on this page
    pub fn row_ids(&self) -> Vec<&str> {
        self.page_rows.iter().map(|row| row.id()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.page_rows.is_empty()
    }

    pub fn is_first_page(&self) -> bool {
        self.page_index == 0
    }

    pub fn is_last_page(&self) -> bool {
        self.page_index + 1 >= self.total_pages
    }
}

/// Run the full pipeline
pub fn derive<'a>(rows: &'a [Row], columns: &ColumnRegistry, query: &Query) -> View<'a> {
    let mut filtered = filter_rows(rows, &query.search_text);
    if let Some(sort) = &query.sort {
        sort_rows(&mut filtered, columns, sort);
    }
    let total_filtered = filtered.len();
    let total_pages = query.total_pages(total_filtered);
    let page_rows = paginate(&filtered, query.page_index, query.page_size).to_vec();

    View {
        page_rows,
        total_filtered,
        total_pages,
        page_index: query.page_index,
    }
}

/// Keep rows whose id or any field's display text contains `search`,
/// case-insensitively. An empty search keeps everything in order.
pub fn filter_rows<'a>(rows: &'a [Row], search: &str) -> Vec<&'a Row> {
    if search.is_empty() {
        return rows.iter().collect();
    }
    let needle = search.to_lowercase();
    rows.iter()
        .filter(|row| {
            row.id().to_lowercase().contains(&needle)
                || row
                    .fields()
                    .any(|(_, value)| value.to_string().to_lowercase().contains(&needle))
        })
        .collect()
}

/// Stable, type-aware sort on one column.
///
/// Number columns compare numerically; values that are absent or not
/// numeric order before all numbers. Text and email columns compare the raw
/// display strings byte-wise (case-sensitive). Unknown columns leave the
/// order untouched.
pub fn sort_rows(rows: &mut [&Row], columns: &ColumnRegistry, sort: &SortSpec) {
    let Some(column) = columns.get(&sort.column_id) else {
        tracing::debug!(column = %sort.column_id, "sort on unknown column skipped");
        return;
    };
    let (id, kind) = (column.id.as_str(), column.kind);

    match sort.direction {
        SortDirection::Asc => rows.sort_by(|a, b| compare_field(kind, id, a, b)),
        SortDirection::Desc => rows.sort_by(|a, b| compare_field(kind, id, b, a)),
    }
}

fn compare_field(kind: ColumnType, column_id: &str, a: &Row, b: &Row) -> Ordering {
    match kind {
        ColumnType::Number => {
            let a = a.get(column_id).and_then(|v| v.as_number());
            let b = b.get(column_id).and_then(|v| v.as_number());
            match (a, b) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }
        ColumnType::Text | ColumnType::Email => a.display(column_id).cmp(&b.display(column_id)),
    }
}

/// Slice `[page * size, (page + 1) * size)`, empty past the end
pub fn paginate<'s, 'a>(rows: &'s [&'a Row], page_index: usize, page_size: usize) -> &'s [&'a Row] {
    let start = page_index.saturating_mul(page_size).min(rows.len());
    let end = start.saturating_add(page_size).min(rows.len());
    &rows[start..end]
}
