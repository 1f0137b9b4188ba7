//! Property-based tests for view derivation and the column registry.

mod common;

use common::model_with_people;
use proptest::prelude::*;
use tabula::model::{ColumnRegistry, Query, SortDirection, SortSpec, PAGE_SIZE};
use tabula::view::{derive, filter_rows, paginate, sort_rows};
use tabula::{Row, Value};

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn cell_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-cA-C0-9 ]{0,6}").unwrap()
}

fn rows_strategy() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(
        (cell_strategy(), prop::option::of(-50i64..50)),
        0..40,
    )
    .prop_map(|cells| {
        cells
            .into_iter()
            .enumerate()
            .map(|(i, (name, age))| {
                let row = Row::new(i.to_string()).with("name", name);
                match age {
                    Some(age) => row.with("age", age),
                    None => row,
                }
            })
            .collect()
    })
}

fn column_ids() -> Vec<String> {
    tabula::model::default_columns()
        .list()
        .iter()
        .map(|c| c.id.clone())
        .collect()
}

// =============================================================================
// VIEW PROPERTIES
// =============================================================================

proptest! {
    /// An empty search keeps every row in its original order
    #[test]
    fn empty_search_is_identity(rows in rows_strategy()) {
        let filtered = filter_rows(&rows, "");
        let ids: Vec<&str> = filtered.iter().map(|r| r.id()).collect();
        let expected: Vec<&str> = rows.iter().map(|r| r.id()).collect();
        prop_assert_eq!(ids, expected);
    }

    /// Every filtered row contains the needle in its id or a field, and no
    /// dropped row does
    #[test]
    fn filter_is_exact(rows in rows_strategy(), needle in "[a-c0-9]{1,2}") {
        let kept = filter_rows(&rows, &needle);
        let lowered = needle.to_lowercase();
        for row in &rows {
            let matches = row.id().to_lowercase().contains(&lowered)
                || row.fields().any(|(_, v)| v.to_string().to_lowercase().contains(&lowered));
            let is_kept = kept.iter().any(|r| r.id() == row.id());
            prop_assert_eq!(matches, is_kept);
        }
    }

    /// Pages partition the filtered rows with the expected sizes
    #[test]
    fn pages_partition_rows(n in 0usize..120) {
        let model = model_with_people(n);
        let mut query = Query::default();
        let total_pages = derive(model.rows.rows(), &model.columns, &query).total_pages;
        prop_assert_eq!(total_pages, n.div_ceil(PAGE_SIZE).max(1));

        let mut seen = 0;
        for page in 0..total_pages {
            query.page_index = page;
            let view = derive(model.rows.rows(), &model.columns, &query);
            if page + 1 < total_pages {
                prop_assert_eq!(view.page_rows.len(), PAGE_SIZE);
            }
            seen += view.page_rows.len();
        }
        prop_assert_eq!(seen, n);
    }

    /// Out-of-range pages are empty rather than panicking
    #[test]
    fn paginate_past_end_is_empty(n in 0usize..30, page in 0usize..usize::MAX) {
        let rows: Vec<Row> = (0..n).map(|i| Row::new(i.to_string())).collect();
        let refs: Vec<&Row> = rows.iter().collect();
        let slice = paginate(&refs, page, PAGE_SIZE);
        prop_assert!(slice.len() <= PAGE_SIZE);
        if page.saturating_mul(PAGE_SIZE) >= n {
            prop_assert!(slice.is_empty());
        }
    }

    /// Ascending number sort never places a number before a missing value
    /// and keeps numbers non-decreasing
    #[test]
    fn number_sort_is_ordered(rows in rows_strategy()) {
        let columns = tabula::model::default_columns();
        let mut refs: Vec<&Row> = rows.iter().collect();
        sort_rows(&mut refs, &columns, &SortSpec {
            column_id: "age".to_string(),
            direction: SortDirection::Asc,
        });

        let ages: Vec<Option<f64>> = refs.iter().map(|r| r.get("age").and_then(Value::as_number)).collect();
        for pair in ages.windows(2) {
            match (pair[0], pair[1]) {
                (Some(a), Some(b)) => prop_assert!(a <= b),
                (Some(_), None) => prop_assert!(false, "number sorted before a missing value"),
                _ => {}
            }
        }
    }

    /// Descending is the reverse of ascending when all keys are distinct
    #[test]
    fn desc_reverses_asc_for_distinct_names(names in prop::collection::hash_set("[a-z]{1,5}", 0..20)) {
        let rows: Vec<Row> = names.iter().enumerate().map(|(i, n)| Row::new(i.to_string()).with("name", n.as_str())).collect();
        let columns = tabula::model::default_columns();

        let mut asc: Vec<&Row> = rows.iter().collect();
        sort_rows(&mut asc, &columns, &SortSpec { column_id: "name".to_string(), direction: SortDirection::Asc });
        let mut desc: Vec<&Row> = rows.iter().collect();
        sort_rows(&mut desc, &columns, &SortSpec { column_id: "name".to_string(), direction: SortDirection::Desc });

        desc.reverse();
        let asc_ids: Vec<&str> = asc.iter().map(|r| r.id()).collect();
        let desc_ids: Vec<&str> = desc.iter().map(|r| r.id()).collect();
        prop_assert_eq!(asc_ids, desc_ids);
    }
}

// =============================================================================
// COLUMN REGISTRY PROPERTIES
// =============================================================================

proptest! {
    /// reorder(A, B) lands A at B's prior index and keeps the rest in order
    #[test]
    fn reorder_places_at_target_index(from in 0usize..6, to in 0usize..6) {
        let ids = column_ids();
        let mut registry: ColumnRegistry = tabula::model::default_columns();
        prop_assert!(registry.reorder(&ids[from], &ids[to]));

        prop_assert_eq!(registry.position(&ids[from]), Some(to));

        let rest_before: Vec<&String> = ids.iter().filter(|id| **id != ids[from]).collect();
        let rest_after: Vec<&String> = registry.list().iter().map(|c| &c.id).filter(|id| **id != ids[from]).collect();
        prop_assert_eq!(rest_before, rest_after);
    }

    /// Reordering back with swapped arguments keeps the other columns'
    /// relative order
    #[test]
    fn reorder_swapped_keeps_unaffected_order(from in 0usize..6, to in 0usize..6) {
        let ids = column_ids();
        let mut registry = tabula::model::default_columns();
        registry.reorder(&ids[from], &ids[to]);
        registry.reorder(&ids[to], &ids[from]);

        let moved = [&ids[from], &ids[to]];
        let unaffected_before: Vec<&String> = ids.iter().filter(|id| !moved.contains(id)).collect();
        let unaffected_after: Vec<&String> = registry.list().iter().map(|c| &c.id).filter(|id| !moved.contains(id)).collect();
        prop_assert_eq!(unaffected_before, unaffected_after);
        prop_assert_eq!(registry.len(), ids.len());
    }
}
