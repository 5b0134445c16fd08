//! Search categories and queries

use std::fmt;

/// Closed set of searchable columns for one screen
///
/// The `Default` variant is the category selected when a screen opens.
pub trait SearchField: Copy + Eq + Default + fmt::Debug + Send + Sync + 'static {
    /// Every category, in the order the search bar offers them
    const ALL: &'static [Self];

    /// Stable key used on the command line and in logs
    fn key(self) -> &'static str;

    /// Human label
    fn label(self) -> &'static str;

    /// Resolve a category key, case-insensitively
    fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.key().eq_ignore_ascii_case(key))
    }
}

/// Search term plus the category it applies to
///
/// `field` is `None` when the requested category does not exist on the screen;
/// such a query matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery<F> {
    term: String,
    field: Option<F>,
}

impl<F: SearchField> Default for SearchQuery<F> {
    fn default() -> Self {
        Self {
            term: String::new(),
            field: Some(F::default()),
        }
    }
}

impl<F: SearchField> SearchQuery<F> {
    /// Query on a known category
    #[must_use]
    pub fn new<S: Into<String>>(term: S, field: F) -> Self {
        Self {
            term: term.into(),
            field: Some(field),
        }
    }

    /// Query on a category given by key; unknown keys produce an empty result
    #[must_use]
    pub fn from_parts<S: Into<String>>(term: S, category: &str) -> Self {
        Self {
            term: term.into(),
            field: F::from_key(category),
        }
    }

    /// Raw term
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Resolved category
    #[must_use]
    pub const fn field(&self) -> Option<F> {
        self.field
    }

    /// Lower-cased term used for matching
    #[must_use]
    pub fn needle(&self) -> String {
        self.term.to_lowercase()
    }

    /// Whether the query keeps every row
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.field.is_some() && self.term.is_empty()
    }
}

impl<F: SearchField> fmt::Display for SearchQuery<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field {
            Some(field) => write!(f, "{}:{:?}", field.key(), self.term),
            None => write!(f, "<unknown>:{:?}", self.term),
        }
    }
}

/// Case-insensitive substring test; a missing value only matches the empty needle
#[must_use]
pub fn contains_ci(haystack: Option<&str>, needle_lower: &str) -> bool {
    haystack.map_or(needle_lower.is_empty(), |value| {
        value.to_lowercase().contains(needle_lower)
    })
}
