//! Comment moderation

use super::{
    INVALID_ID_NOTICE, ListView, Outcome, SELECT_FIRST_NOTICE, Screen, reject_locally,
    report_failure, settle_bulk_delete,
};
use crate::components::{DetailView, Modal, Table};
use crate::dialog::Dialog;
use crate::state::AppState;
use async_trait::async_trait;
use ballpark_client::{ClientResult, fan_out_keys};
use ballpark_core::Record;
use ballpark_core::types::{Comment, CommentKey};
use ballpark_core::utils::{format_date_time, or_placeholder, sort_newest_first, truncate};
use std::sync::Arc;
use tracing::info;

/// Comment list with single and bulk delete
#[derive(Debug)]
pub struct CommentsScreen {
    view: ListView<Comment>,
    modal: Option<Modal<CommentKey>>,
}

impl CommentsScreen {
    /// Screen in the loading state
    ///
    /// # Errors
    ///
    /// Returns an error when the configured page size is zero.
    pub fn new(app: AppState) -> crate::Result<Self> {
        Ok(Self {
            view: ListView::new(app)?,
            modal: None,
        })
    }

    /// Open modal, if any
    pub const fn modal(&self) -> Option<&Modal<CommentKey>> {
        self.modal.as_ref()
    }

    /// Close the modal
    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Open the detail modal from the loaded list
    pub fn open_detail(&mut self, key: CommentKey, dialog: &mut dyn Dialog) -> Outcome {
        match self.view.list().find(&key) {
            Some(comment) => {
                self.modal = Some(self.detail_for(comment));
                Outcome::Done
            }
            None => {
                dialog.notify(&format!("Comment {key} is not in the list."));
                Outcome::Failed
            }
        }
    }

    fn detail_for(&self, comment: &Comment) -> Modal<CommentKey> {
        let app = self.view.app();
        let display = app.display();
        let board = app
            .boards()
            .resolve(comment.category_name.as_ref())
            .unwrap_or_else(|| display.none.clone());

        let mut body = DetailView::default()
            .field("Board", board)
            .field("Post", or_placeholder(comment.post_title.as_deref(), &display.no_title))
            .field("Author", or_placeholder(comment.author.as_deref(), &display.no_author))
            .field("Date", format_date_time(comment.date.as_deref().unwrap_or_default()))
            .field("Views", comment.post_view.to_string());
        if comment.is_reply() {
            body = body.field("Reply to", format!("comment #{}", comment.post_comment_num));
        }
        body = body.field(
            "Comment",
            or_placeholder(comment.content.as_deref(), &display.no_content),
        );

        Modal::new(comment.comment_key(), format!("Comment {}", comment.comment_key()), body)
            .with_confirm("Delete")
    }

    fn close_modal_for(&mut self, keys: &[CommentKey]) {
        if self.modal.as_ref().is_some_and(|m| keys.contains(m.key())) {
            self.modal = None;
        }
    }

    /// Delete one comment or reply through its resource path
    pub async fn delete(&mut self, key: CommentKey, dialog: &mut dyn Dialog) -> Outcome {
        if !key.is_complete() {
            dialog.notify(INVALID_ID_NOTICE);
            return Outcome::Failed;
        }
        if !dialog.confirm(&format!("Delete comment {key}?")) {
            return Outcome::Cancelled;
        }

        if let Err(e) = self.view.app().api().delete_comment(&key).await {
            return report_failure(dialog, "delete-comment", &key, &e);
        }

        info!(key = %key, "comment deleted");
        self.view.list_mut().remove_keys(&[key]);
        self.close_modal_for(&[key]);
        dialog.notify("The comment has been deleted.");

        self.resync().await;
        Outcome::Done
    }

    /// Delete the comment shown in the modal
    pub async fn confirm_modal(&mut self, dialog: &mut dyn Dialog) -> Outcome {
        match self.modal.as_ref().map(|m| *m.key()) {
            Some(key) => self.delete(key, dialog).await,
            None => Outcome::Cancelled,
        }
    }

    /// Delete every selected comment
    ///
    /// Top-level comments go through the query-parameter endpoint and replies
    /// through their resource path. Keys with a zero id fail without a request.
    pub async fn delete_selected(&mut self, dialog: &mut dyn Dialog) -> Outcome {
        let selected = self.view.list().selection().to_vec();
        if selected.is_empty() {
            dialog.notify(SELECT_FIRST_NOTICE);
            return Outcome::Cancelled;
        }
        if !dialog.confirm(&format!("Delete {} selected comments?", selected.len())) {
            return Outcome::Cancelled;
        }

        let (valid, invalid): (Vec<CommentKey>, Vec<CommentKey>) =
            selected.into_iter().partition(CommentKey::is_complete);

        let api = Arc::clone(self.view.app().api());
        let mut outcome = fan_out_keys(valid, self.view.app().max_concurrency(), |key| {
            let api = Arc::clone(&api);
            async move {
                match key.reply_id {
                    Some(_) => api.delete_comment(&key).await,
                    None => api.delete_comment_by_query(key.post_id, key.comment_num).await,
                }
            }
        })
        .await;
        reject_locally(&mut outcome, invalid, "comment id");

        self.close_modal_for(&outcome.succeeded);
        let result = settle_bulk_delete(self.view.list_mut(), &outcome, dialog, "comments");
        if !outcome.succeeded.is_empty() {
            self.resync().await;
        }
        result
    }
}

#[async_trait]
impl Screen for CommentsScreen {
    type Row = Comment;

    const TITLE: &'static str = "Comment management";

    fn view(&self) -> &ListView<Comment> {
        &self.view
    }

    fn view_mut(&mut self) -> &mut ListView<Comment> {
        &mut self.view
    }

    async fn fetch(&self) -> ClientResult<Vec<Comment>> {
        self.view.app().api().list_comments().await
    }

    fn table(&self) -> Table<'_, Comment> {
        let app = self.view.app();
        let display = app.display();
        let boards = app.boards();
        Table::new()
            .with_checkbox()
            .numbered()
            .column("Board", move |c: &Comment| {
                boards
                    .resolve(c.category_name.as_ref())
                    .unwrap_or_else(|| display.none.clone())
            })
            .column("Comment", move |c: &Comment| {
                truncate(c.content.as_deref(), display.truncate_length, &display.no_content)
            })
            .column("Author", move |c: &Comment| {
                or_placeholder(c.author.as_deref(), &display.no_author)
            })
            .column("Date", |c: &Comment| {
                format_date_time(c.date.as_deref().unwrap_or_default())
            })
            .column("Views", |c: &Comment| c.post_view.to_string())
            .column("Key", |c: &Comment| c.key().to_string())
    }

    fn arrange(rows: &mut [Comment]) {
        sort_newest_first(rows, |c| c.date.as_deref());
    }
}
