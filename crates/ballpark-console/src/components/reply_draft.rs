//! Single-field reply form

/// Text being written in reply to one record
///
/// The draft never talks to the backend. Submitting hands the target and the
/// text to the caller and leaves the field empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyDraft<K> {
    target: K,
    text: String,
}

impl<K> ReplyDraft<K> {
    /// Empty draft for a target
    pub const fn new(target: K) -> Self {
        Self {
            target,
            text: String::new(),
        }
    }

    /// Record being replied to
    pub const fn target(&self) -> &K {
        &self.target
    }

    /// Current text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Whether there is nothing but whitespace to send
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Empty the field
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Pass `(target, text)` to `handler` and clear the field
    pub fn submit_with<F, T>(&mut self, handler: F) -> T
    where
        F: FnOnce(&K, String) -> T,
    {
        let text = std::mem::take(&mut self.text);
        handler(&self.target, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_submit_forwards_and_clears() {
        let mut draft = ReplyDraft::new(42_i64);
        draft.set_text("Refund issued");

        let sent = draft.submit_with(|id, text| (*id, text));

        assert_eq!(sent, (42, "Refund issued".to_string()));
        assert_eq!(draft.text(), "");
        assert_eq!(*draft.target(), 42);
    }

    #[test]
    fn test_blank_detection() {
        let mut draft = ReplyDraft::new("12_3".to_string());
        assert!(draft.is_blank());
        draft.set_text("  \n ");
        assert!(draft.is_blank());
        draft.set_text("ok");
        assert!(!draft.is_blank());
        draft.clear();
        assert!(draft.is_blank());
    }
}
