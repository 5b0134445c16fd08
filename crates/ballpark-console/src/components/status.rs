//! Loading, error and empty placeholders

use ballpark_core::LoadState;
use std::fmt;

/// Message shown instead of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    /// Fetch in flight
    Loading,
    /// Fetch failed
    Error(String),
    /// Nothing to show
    Empty,
}

impl StatusMessage {
    /// Placeholder for a list, or `None` when rows should be shown
    pub fn for_list(load: &LoadState, visible_rows: usize) -> Option<Self> {
        match load {
            LoadState::Loading => Some(Self::Loading),
            LoadState::Failed(message) => Some(Self::Error(message.clone())),
            LoadState::Ready if visible_rows == 0 => Some(Self::Empty),
            LoadState::Ready => None,
        }
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => f.write_str("Loading..."),
            Self::Error(message) => write!(f, "Failed to load data: {message}"),
            Self::Empty => f.write_str("No data to display."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(LoadState::Loading, 3, Some(StatusMessage::Loading))]
    #[case(LoadState::Ready, 0, Some(StatusMessage::Empty))]
    #[case(LoadState::Ready, 4, None)]
    #[case(
        LoadState::Failed("timeout".to_string()),
        0,
        Some(StatusMessage::Error("timeout".to_string()))
    )]
    fn test_for_list(
        #[case] load: LoadState,
        #[case] rows: usize,
        #[case] expected: Option<StatusMessage>,
    ) {
        assert_eq!(StatusMessage::for_list(&load, rows), expected);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            StatusMessage::Error("connection refused".to_string()).to_string(),
            "Failed to load data: connection refused"
        );
        assert_eq!(StatusMessage::Empty.to_string(), "No data to display.");
    }
}
