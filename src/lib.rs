//! Tabula - Elm-style table engine
//!
//! This crate provides the core types and logic for an in-memory table with
//! search, type-aware sorting, pagination, inline editing, a runtime column
//! schema and CSV import/export, implementing the Elm Architecture pattern.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod csv;
pub mod engine;
pub mod error;
pub mod messages;
pub mod model;
pub mod snapshot;
pub mod tracing;
pub mod update;
pub mod view;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EngineConfig;
pub use engine::TableEngine;
pub use error::{Result, TableError};
pub use messages::Msg;
pub use model::{Column, ColumnType, Row, TableModel, Value};
pub use snapshot::Snapshot;
pub use view::View;
