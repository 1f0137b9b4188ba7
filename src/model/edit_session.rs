//! Inline edit session state
//!
//! Each row is either viewing or editing. The editing set is gated by a
//! global edit-mode flag and is always empty while the flag is off. Rows
//! under edit may hold a local buffer of uncommitted cell text.

use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct EditSession {
    enabled: bool,
    editing: HashSet<String>,
    /// Uncommitted cell text keyed by row id, then column id
    buffers: HashMap<String, BTreeMap<String, String>>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Switch edit mode. Turning it off drops every row back to viewing and
    /// discards all uncommitted buffers.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            if !self.editing.is_empty() {
                tracing::debug!(
                    rows = self.editing.len(),
                    "edit mode off, discarding open edits"
                );
            }
            self.editing.clear();
            self.buffers.clear();
        }
    }

    /// Put a row into editing state. Only allowed while edit mode is on.
    pub fn begin(&mut self, row_id: &str) -> bool {
        if !self.enabled {
            return false;
        }
        self.editing.insert(row_id.to_string());
        true
    }

    pub fn is_editing(&self, row_id: &str) -> bool {
        self.editing.contains(row_id)
    }

    pub fn editing_count(&self) -> usize {
        self.editing.len()
    }

    /// Row ids currently under edit, sorted for stable output
    pub fn editing_rows(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.editing.iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Record uncommitted text for a cell. Ignored unless the row is editing.
    pub fn set_buffer(&mut self, row_id: &str, column_id: &str, text: impl Into<String>) -> bool {
        if !self.is_editing(row_id) {
            return false;
        }
        self.buffers
            .entry(row_id.to_string())
            .or_default()
            .insert(column_id.to_string(), text.into());
        true
    }

    pub fn buffer(&self, row_id: &str) -> Option<&BTreeMap<String, String>> {
        self.buffers.get(row_id)
    }

    /// Leave editing state, returning whatever was buffered for the row
    pub fn finish(&mut self, row_id: &str) -> BTreeMap<String, String> {
        self.editing.remove(row_id);
        self.buffers.remove(row_id).unwrap_or_default()
    }

    /// Forget a row entirely (e.g. it was deleted)
    pub fn forget(&mut self, row_id: &str) {
        self.finish(row_id);
    }

    /// Drop edit state for rows that no longer exist
    pub fn retain_rows(&mut self, mut exists: impl FnMut(&str) -> bool) {
        self.editing.retain(|id| exists(id));
        let editing = &self.editing;
        self.buffers.retain(|id, _| editing.contains(id));
    }

    /// Invariant check used in debug builds
    pub fn assert_invariants(&self) {
        debug_assert!(
            self.enabled || self.editing.is_empty(),
            "editing set must be empty while edit mode is off"
        );
        debug_assert!(
            self.buffers.keys().all(|id| self.editing.contains(id)),
            "buffers must belong to editing rows"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_requires_edit_mode() {
        let mut session = EditSession::new();
        assert!(!session.begin("1"));
        assert!(!session.is_editing("1"));

        session.set_enabled(true);
        assert!(session.begin("1"));
        assert!(session.is_editing("1"));
    }

    #[test]
    fn test_begin_twice_is_single_entry() {
        let mut session = EditSession::new();
        session.set_enabled(true);
        session.begin("1");
        session.begin("1");
        assert_eq!(session.editing_count(), 1);
    }

    #[test]
    fn test_disable_clears_editing_and_buffers() {
        let mut session = EditSession::new();
        session.set_enabled(true);
        session.begin("1");
        session.begin("2");
        session.set_buffer("1", "name", "Zed");

        session.set_enabled(false);
        assert_eq!(session.editing_count(), 0);
        assert!(session.buffer("1").is_none());
        session.assert_invariants();
    }

    #[test]
    fn test_buffer_ignored_when_not_editing() {
        let mut session = EditSession::new();
        session.set_enabled(true);
        assert!(!session.set_buffer("1", "name", "Zed"));
        assert!(session.buffer("1").is_none());
    }

    #[test]
    fn test_finish_returns_buffer() {
        let mut session = EditSession::new();
        session.set_enabled(true);
        session.begin("1");
        session.set_buffer("1", "name", "Zed");

        let buffer = session.finish("1");
        assert_eq!(buffer.get("name").map(String::as_str), Some("Zed"));
        assert!(!session.is_editing("1"));
    }
}
