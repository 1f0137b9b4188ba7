//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use tabula::model::{default_columns, RowStore, TableModel};
use tabula::{Row, TableEngine, Value};

/// A row shaped like the sample people
pub fn person(id: &str, name: &str, age: i64, role: &str) -> Row {
    let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
    Row::new(id)
        .with("name", name)
        .with("email", Value::email(email))
        .with("age", age)
        .with("role", role)
        .with("department", "Engineering")
        .with("location", "Remote")
}

/// `n` rows with ids "1".."n" and ages 20.., alternating roles
pub fn people(n: usize) -> Vec<Row> {
    (1..=n)
        .map(|i| {
            let role = if i % 2 == 0 { "Designer" } else { "Developer" };
            person(&i.to_string(), &format!("Person {}", i), 20 + i as i64, role)
        })
        .collect()
}

/// Model with the default columns and `n` generated people
pub fn model_with_people(n: usize) -> TableModel {
    TableModel::new(RowStore::from_rows(people(n)), default_columns())
}

/// Engine with the default columns and `n` generated people
pub fn engine_with_people(n: usize) -> TableEngine {
    TableEngine::new(model_with_people(n))
}

/// Visible-column display strings for every row of the current page
pub fn page_cells(engine: &TableEngine) -> Vec<Vec<String>> {
    let model = engine.model();
    let view = model.view();
    view.page_rows
        .iter()
        .map(|row| {
            model
                .columns
                .visible()
                .map(|c| row.display(&c.id))
                .collect()
        })
        .collect()
}
