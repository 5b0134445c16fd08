//! Management screens
//!
//! Each screen owns one [`ListView`] over a backend resource and exposes the
//! administrator's actions as `async fn`s on `&mut self`. A screen is only ever
//! driven by one caller at a time, so a response always lands on the screen that
//! asked for it.

pub mod comments;
pub mod community;
pub mod inquiries;
pub mod users;

pub use comments::CommentsScreen;
pub use community::CommunityScreen;
pub use inquiries::InquiriesScreen;
pub use users::UsersScreen;

use crate::components::pagination::{choose_page_size, render_page_links, render_summary};
use crate::components::{SearchBar, StatusMessage, Table};
use crate::dialog::Dialog;
use crate::state::AppState;
use async_trait::async_trait;
use ballpark_client::{BulkOutcome, ClientError, ClientResult};
use ballpark_core::{ListState, Record, ResyncPolicy};
use std::fmt::{self, Write as _};
use tracing::{debug, error, info, warn};

/// Shown after any failed request
pub const RETRY_NOTICE: &str = "The request failed. Please try again later.";

/// Shown when a bulk action runs without a selection
pub const SELECT_FIRST_NOTICE: &str = "Select at least one row first.";

/// Shown when a record lacks the id its endpoint needs
pub const INVALID_ID_NOTICE: &str = "This record has no valid id; nothing was sent.";

/// What an action ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Completed
    Done,
    /// Declined at the confirmation prompt, or nothing to do
    Cancelled,
    /// Rejected locally or by the backend; local state unchanged
    Failed,
    /// Bulk action where some keys failed
    Partial {
        /// Keys that succeeded
        succeeded: usize,
        /// Keys that failed
        failed: usize,
    },
}

impl Outcome {
    /// Whether the action fully succeeded
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

/// List, search bar and shared state behind one screen
#[derive(Debug)]
pub struct ListView<R: Record> {
    app: AppState,
    list: ListState<R>,
    search: SearchBar<R::Field>,
}

impl<R: Record> ListView<R> {
    /// Empty view using the configured page size
    ///
    /// # Errors
    ///
    /// Returns an error when the configured page size is zero.
    pub fn new(app: AppState) -> crate::Result<Self> {
        let list = ListState::new(app.display().page_size, app.filter_context().clone())?;
        Ok(Self {
            app,
            list,
            search: SearchBar::new(),
        })
    }

    /// Shared state
    pub const fn app(&self) -> &AppState {
        &self.app
    }

    /// Loaded records and their view state
    pub const fn list(&self) -> &ListState<R> {
        &self.list
    }

    /// Mutable list state
    pub const fn list_mut(&mut self) -> &mut ListState<R> {
        &mut self.list
    }

    /// Search input
    pub const fn search_bar(&self) -> &SearchBar<R::Field> {
        &self.search
    }
}

/// Behaviour shared by every management screen
#[async_trait]
pub trait Screen: Send + Sync {
    /// Row type
    type Row: Record + 'static;

    /// Heading shown above the table
    const TITLE: &'static str;

    /// Underlying view
    fn view(&self) -> &ListView<Self::Row>;

    /// Underlying view, mutably
    fn view_mut(&mut self) -> &mut ListView<Self::Row>;

    /// Fetch the full list from the backend
    async fn fetch(&self) -> ClientResult<Vec<Self::Row>>;

    /// Column layout
    fn table(&self) -> Table<'_, Self::Row>;

    /// Order freshly fetched rows before display
    fn arrange(_rows: &mut [Self::Row]) {}

    /// Fetch and store the list; on failure fall back to an empty list
    async fn load(&mut self) -> bool {
        self.view_mut().list.begin_loading();
        match self.fetch().await {
            Ok(mut rows) => {
                Self::arrange(&mut rows);
                info!(screen = Self::TITLE, count = rows.len(), "list loaded");
                self.view_mut().list.replace(rows);
                true
            }
            Err(e) => {
                error!(screen = Self::TITLE, error = %e, "failed to load list");
                self.view_mut().list.fail(e.to_string());
                false
            }
        }
    }

    /// Reconcile with the backend after a successful mutation
    ///
    /// Under the refetch policy the list is fetched again; if that fails the
    /// locally patched rows stay in place.
    async fn resync(&mut self) {
        if self.view().app.resync() == ResyncPolicy::Patch {
            return;
        }
        match self.fetch().await {
            Ok(mut rows) => {
                Self::arrange(&mut rows);
                debug!(screen = Self::TITLE, count = rows.len(), "list refetched");
                self.view_mut().list.replace(rows);
            }
            Err(e) => {
                warn!(screen = Self::TITLE, error = %e, "refetch after mutation failed, keeping local changes");
            }
        }
    }

    /// Apply a search; `None` keeps the current category
    fn search(&mut self, term: &str, category: Option<&str>) {
        let view = self.view_mut();
        view.search.set_term(term);
        if let Some(category) = category {
            view.search.set_category(category);
        }
        let query = view.search.submit();
        debug!(screen = Self::TITLE, query = %query, "search applied");
        view.list.set_query(query);
    }

    /// Move to a page, clamped to the valid range
    fn go_to_page(&mut self, page: usize) {
        self.view_mut().list.go_to_page(page);
    }

    /// Switch to one of the configured page sizes
    ///
    /// # Errors
    ///
    /// Returns an error when the size is not offered.
    fn set_page_size(&mut self, page_size: usize) -> crate::Result<()> {
        let size = choose_page_size(&self.view().app.display().page_size_options, page_size)?;
        self.view_mut().list.set_page_size(size)?;
        Ok(())
    }

    /// Toggle one row's checkbox
    fn toggle_row(&mut self, key: <Self::Row as Record>::Key) -> bool {
        self.view_mut().list.toggle_selected(key)
    }

    /// Toggle the header checkbox for the current page
    fn toggle_page(&mut self) {
        self.view_mut().list.toggle_all_visible();
    }

    /// Replace the selection with exactly these rows
    fn select_rows(&mut self, keys: Vec<<Self::Row as Record>::Key>) {
        self.view_mut().list.select_only(keys);
    }

    /// Text rendering of the current page
    fn render(&self) -> String {
        let view = self.view();
        let list = &view.list;
        let mut out = String::new();
        let _ = writeln!(out, "{}", Self::TITLE);
        let _ = writeln!(out, "{}", view.search.render());
        let _ = writeln!(out);

        let page = list.page();
        if let Some(status) = StatusMessage::for_list(list.load_state(), page.len()) {
            let _ = writeln!(out, "{status}");
            return out;
        }

        let selection = list.selection();
        out.push_str(&self.table().render(&page, list.page_offset() + 1, |row| {
            selection.contains(&row.key())
        }));

        let total = list.filtered_len();
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}",
            render_page_links(list.pager(), total, view.app.display().page_group_size)
        );
        let _ = writeln!(out, "{}", render_summary(list.pager(), total));
        if !selection.is_empty() {
            let _ = writeln!(out, "{} selected", selection.len());
        }
        out
    }
}

/// Log a failed request and show the generic notice
pub(crate) fn report_failure(
    dialog: &mut dyn Dialog,
    action: &str,
    key: &dyn fmt::Display,
    err: &ClientError,
) -> Outcome {
    error!(action, key = %key, error = %err, "request failed");
    dialog.notify(RETRY_NOTICE);
    Outcome::Failed
}

/// Record keys rejected before sending as failures of a bulk outcome
pub(crate) fn reject_locally<K>(outcome: &mut BulkOutcome<K>, rejected: Vec<K>, what: &str) {
    outcome.failed.extend(
        rejected
            .into_iter()
            .map(|key| (key, ClientError::missing_id(what))),
    );
}

/// Apply a bulk delete to the list and tell the administrator how it went
///
/// Succeeded keys leave the list. On full success the selection is cleared;
/// otherwise exactly the failed keys stay selected.
pub(crate) fn settle_bulk_delete<R: Record>(
    list: &mut ListState<R>,
    outcome: &BulkOutcome<R::Key>,
    dialog: &mut dyn Dialog,
    noun: &str,
) -> Outcome {
    list.remove_keys(&outcome.succeeded);

    for (key, err) in &outcome.failed {
        error!(key = %key, error = %err, "bulk delete failed for key");
    }

    if outcome.is_complete_success() {
        list.clear_selection();
        info!(count = outcome.succeeded.len(), noun, "bulk delete completed");
        dialog.notify(&format!("Deleted {} {noun}.", outcome.succeeded.len()));
        return Outcome::Done;
    }

    list.select_only(outcome.failed_keys().cloned());
    let failed = outcome.failed.len();
    dialog.notify(&format!(
        "{failed} of {} {noun} could not be deleted. They are still selected; please try again.",
        outcome.attempted()
    ));
    if outcome.succeeded.is_empty() {
        Outcome::Failed
    } else {
        Outcome::Partial {
            succeeded: outcome.succeeded.len(),
            failed,
        }
    }
}
