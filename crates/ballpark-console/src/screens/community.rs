//! Community post moderation

use super::{
    INVALID_ID_NOTICE, ListView, Outcome, SELECT_FIRST_NOTICE, Screen, reject_locally,
    report_failure, settle_bulk_delete,
};
use crate::components::{Attachment, AttachmentSource, DetailView, Modal, Table};
use crate::dialog::Dialog;
use crate::state::AppState;
use async_trait::async_trait;
use ballpark_client::{ClientResult, fan_out_keys};
use ballpark_core::types::{CommunityPost, PostId};
use ballpark_core::utils::{format_date, format_date_time, or_placeholder};
use std::sync::Arc;
use tracing::info;

/// Post list whose detail modal is fetched fresh on open
#[derive(Debug)]
pub struct CommunityScreen {
    view: ListView<CommunityPost>,
    modal: Option<Modal<PostId>>,
}

impl CommunityScreen {
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
    pub const fn modal(&self) -> Option<&Modal<PostId>> {
        self.modal.as_ref()
    }

    /// Close the modal
    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Fetch the post by id and open it
    pub async fn open_detail(&mut self, post_id: PostId, dialog: &mut dyn Dialog) -> Outcome {
        if post_id == 0 {
            dialog.notify(INVALID_ID_NOTICE);
            return Outcome::Failed;
        }
        let fetched = self.view.app().api().post_detail(post_id).await;
        match fetched {
            Ok(post) => {
                self.modal = Some(self.detail_for(&post));
                Outcome::Done
            }
            Err(e) => report_failure(dialog, "post-detail", &post_id, &e),
        }
    }

    fn detail_for(&self, post: &CommunityPost) -> Modal<PostId> {
        let app = self.view.app();
        let display = app.display();
        let board = app
            .boards()
            .resolve(post.category_name.as_ref())
            .unwrap_or_else(|| display.none.clone());

        let mut body = DetailView::default()
            .field("Board", board)
            .field("Author", or_placeholder(post.community_id.as_deref(), &display.no_author))
            .field("Date", format_date_time(post.community_date.as_deref().unwrap_or_default()))
            .field("Views", post.post_view.to_string())
            .field("Comments", post.comment_count.to_string());
        body.content = post.post_content.clone();
        body.attachment = post
            .post_img_path
            .as_deref()
            .filter(|path| !path.trim().is_empty())
            .map(|path| {
                Attachment::from_path(
                    path,
                    AttachmentSource::Community,
                    &app.endpoints(),
                    &display.fallback_image,
                )
            });

        let title = or_placeholder(post.post_title.as_deref(), &display.no_title);
        Modal::new(post.post_id, title, body).with_confirm("Delete")
    }

    fn close_modal_for(&mut self, ids: &[PostId]) {
        if self.modal.as_ref().is_some_and(|m| ids.contains(m.key())) {
            self.modal = None;
        }
    }

    /// Delete one post
    pub async fn delete(&mut self, post_id: PostId, dialog: &mut dyn Dialog) -> Outcome {
        if post_id == 0 {
            dialog.notify(INVALID_ID_NOTICE);
            return Outcome::Failed;
        }
        if !dialog.confirm(&format!("Delete post {post_id}?")) {
            return Outcome::Cancelled;
        }

        if let Err(e) = self.view.app().api().delete_post(post_id).await {
            return report_failure(dialog, "delete-post", &post_id, &e);
        }

        info!(post = post_id, "post deleted");
        self.view.list_mut().remove_keys(&[post_id]);
        self.close_modal_for(&[post_id]);
        dialog.notify("The post has been deleted.");

        self.resync().await;
        Outcome::Done
    }

    /// Delete the post shown in the modal
    pub async fn confirm_modal(&mut self, dialog: &mut dyn Dialog) -> Outcome {
        match self.modal.as_ref().map(|m| *m.key()) {
            Some(post_id) => self.delete(post_id, dialog).await,
            None => Outcome::Cancelled,
        }
    }

    /// Delete every selected post
    pub async fn delete_selected(&mut self, dialog: &mut dyn Dialog) -> Outcome {
        let selected = self.view.list().selection().to_vec();
        if selected.is_empty() {
            dialog.notify(SELECT_FIRST_NOTICE);
            return Outcome::Cancelled;
        }
        if !dialog.confirm(&format!("Delete {} selected posts?", selected.len())) {
            return Outcome::Cancelled;
        }

        let (valid, invalid): (Vec<PostId>, Vec<PostId>) =
            selected.into_iter().partition(|id| *id != 0);

        let api = Arc::clone(self.view.app().api());
        let mut outcome = fan_out_keys(valid, self.view.app().max_concurrency(), |post_id| {
            let api = Arc::clone(&api);
            async move { api.delete_post(post_id).await }
        })
        .await;
        reject_locally(&mut outcome, invalid, "post id");

        self.close_modal_for(&outcome.succeeded);
        let result = settle_bulk_delete(self.view.list_mut(), &outcome, dialog, "posts");
        if !outcome.succeeded.is_empty() {
            self.resync().await;
        }
        result
    }
}

#[async_trait]
impl Screen for CommunityScreen {
    type Row = CommunityPost;

    const TITLE: &'static str = "Community management";

    fn view(&self) -> &ListView<CommunityPost> {
        &self.view
    }

    fn view_mut(&mut self) -> &mut ListView<CommunityPost> {
        &mut self.view
    }

    async fn fetch(&self) -> ClientResult<Vec<CommunityPost>> {
        self.view.app().api().list_posts().await
    }

    fn table(&self) -> Table<'_, CommunityPost> {
        let app = self.view.app();
        let display = app.display();
        let boards = app.boards();
        Table::new()
            .with_checkbox()
            .numbered()
            .column("Board", move |p: &CommunityPost| {
                boards
                    .resolve(p.category_name.as_ref())
                    .unwrap_or_else(|| display.none.clone())
            })
            .column("Title", move |p: &CommunityPost| {
                or_placeholder(p.post_title.as_deref(), &display.no_title)
            })
            .column("Author", move |p: &CommunityPost| {
                or_placeholder(p.community_id.as_deref(), &display.no_author)
            })
            .column("Date", |p: &CommunityPost| {
                format_date(p.community_date.as_deref().unwrap_or_default())
            })
            .column("Views", |p: &CommunityPost| p.post_view.to_string())
            .column("Comments", |p: &CommunityPost| p.comment_count.to_string())
            .column("Id", |p: &CommunityPost| p.post_id.to_string())
    }
}
