//! Search term and category input

use ballpark_core::{SearchField, SearchQuery};
use std::marker::PhantomData;

/// Free-text term plus a category chosen from the screen's closed set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBar<F> {
    term: String,
    category: String,
    field: PhantomData<F>,
}

impl<F: SearchField> Default for SearchBar<F> {
    fn default() -> Self {
        Self {
            term: String::new(),
            category: F::default().key().to_string(),
            field: PhantomData,
        }
    }
}

impl<F: SearchField> SearchBar<F> {
    /// Empty term on the default category
    pub fn new() -> Self {
        Self::default()
    }

    /// Current term
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Current category key, as entered
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Replace the term
    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    /// Pick a category by key; unknown keys are kept and match nothing
    pub fn set_category(&mut self, key: impl Into<String>) {
        self.category = key.into();
    }

    /// Categories offered, as `(key, label)`
    pub fn options() -> Vec<(&'static str, &'static str)> {
        F::ALL.iter().map(|f| (f.key(), f.label())).collect()
    }

    /// Report the term and category together
    pub fn submit(&self) -> SearchQuery<F> {
        SearchQuery::from_parts(self.term.clone(), &self.category)
    }

    /// One-line description of the active search
    pub fn render(&self) -> String {
        let label = F::from_key(&self.category).map_or("unknown category", |f| f.label());
        if self.term.is_empty() {
            format!("Search [{label}]: (all)")
        } else {
            format!("Search [{label}]: {}", self.term)
        }
    }
}
