//! Board id to display name resolution

use crate::types::BoardRef;
use std::collections::BTreeMap;

/// Lookup table from board id to board name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardDirectory {
    names: BTreeMap<String, String>,
}

impl BoardDirectory {
    /// Build a directory from the configured table
    #[must_use]
    pub fn new(names: BTreeMap<String, String>) -> Self {
        Self { names }
    }

    /// Name for a board id, or `#id` when the id is unknown
    #[must_use]
    pub fn name_of(&self, board: &BoardRef) -> String {
        let key = board.as_key();
        self.names
            .get(&key)
            .cloned()
            .unwrap_or_else(|| format!("#{key}"))
    }

    /// Name for an optional board reference
    #[must_use]
    pub fn resolve(&self, board: Option<&BoardRef>) -> Option<String> {
        board.map(|b| self.name_of(b))
    }

    /// Name only when the id is known
    #[must_use]
    pub fn lookup(&self, board: &BoardRef) -> Option<&str> {
        self.names.get(&board.as_key()).map(String::as_str)
    }

    /// Number of known boards
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no boards are configured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl From<&crate::Config> for BoardDirectory {
    fn from(config: &crate::Config) -> Self {
        Self::new(config.boards.clone())
    }
}
