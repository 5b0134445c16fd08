//! Community management screen against the in-memory backend

#![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]

mod common;

use ballpark_client::{ApiCall, MockAdminApi};
use ballpark_console::components::Attachment;
use ballpark_console::screens::{INVALID_ID_NOTICE, RETRY_NOTICE};
use ballpark_console::{CommunityScreen, Outcome, Screen, ScriptedDialog};
use ballpark_core::{CommunityPost, LoadState, ResyncPolicy};
use common::{app, post};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn backend() -> Arc<MockAdminApi> {
    Arc::new(MockAdminApi::new().with_posts(vec![
        post(1, "Opening day lineup", "tigers_fan", 1),
        post(2, "Trade rumours", "lions_fan", 2),
        CommunityPost {
            post_img_path: Some("/uploads/3_photo.png".to_string()),
            ..post(3, "Stadium photo", "twins_fan", 3)
        },
        CommunityPost {
            post_img_path: Some("/uploads/1700000000_season_notes.pdf".to_string()),
            ..post(4, "Season notes", "bears_fan", 4)
        },
    ]))
}

async fn loaded(api: &Arc<MockAdminApi>, resync: ResyncPolicy) -> CommunityScreen {
    let mut screen = CommunityScreen::new(app(api, resync)).unwrap();
    assert!(screen.load().await);
    api.clear_calls();
    screen
}

#[tokio::test]
async fn test_detail_is_fetched_with_image_attachment() {
    let api = backend();
    let mut screen = loaded(&api, ResyncPolicy::Refetch).await;
    let mut dialog = ScriptedDialog::always(true);

    assert_eq!(screen.open_detail(3, &mut dialog).await, Outcome::Done);

    assert_eq!(api.calls(), vec![ApiCall::PostDetail(3)]);
    let modal = screen.modal().unwrap();
    assert_eq!(modal.title(), "Stadium photo");
    assert_eq!(modal.body().value("Board"), Some("LG Twins"));
    assert_eq!(
        modal.body().attachment,
        Some(Attachment::Image {
            url: "mock://ballpark/api/community/images/3_photo.png".to_string(),
            fallback: "/path_to_default_image/default.png".to_string(),
        })
    );
    assert!(modal.render().contains("Stadium photo"));
}

#[tokio::test]
async fn test_detail_with_document_offers_download() {
    let api = backend();
    let mut screen = loaded(&api, ResyncPolicy::Refetch).await;
    let mut dialog = ScriptedDialog::always(true);

    assert_eq!(screen.open_detail(4, &mut dialog).await, Outcome::Done);

    match &screen.modal().unwrap().body().attachment {
        Some(Attachment::Download { url, file_name }) => {
            assert_eq!(file_name, "season_notes.pdf");
            assert!(url.starts_with("mock://ballpark/api/community/downloadFile/"));
        }
        other => panic!("expected a download, got {other:?}"),
    }
}

#[tokio::test]
async fn test_detail_without_attachment() {
    let api = backend();
    let mut screen = loaded(&api, ResyncPolicy::Refetch).await;
    let mut dialog = ScriptedDialog::always(true);

    screen.open_detail(1, &mut dialog).await;

    let body = screen.modal().unwrap().body();
    assert!(body.attachment.is_none());
    assert_eq!(body.content.as_ref().unwrap().to_plain_text(), "Opening day lineup");
}

#[tokio::test]
async fn test_failed_detail_fetch_opens_nothing() {
    let api = backend();
    let mut screen = loaded(&api, ResyncPolicy::Refetch).await;
    let mut dialog = ScriptedDialog::always(true);

    assert_eq!(screen.open_detail(99, &mut dialog).await, Outcome::Failed);
    assert!(screen.modal().is_none());
    assert_eq!(dialog.last_notice(), Some(RETRY_NOTICE));

    assert_eq!(screen.open_detail(0, &mut dialog).await, Outcome::Failed);
    assert_eq!(dialog.last_notice(), Some(INVALID_ID_NOTICE));
    assert_eq!(api.calls(), vec![ApiCall::PostDetail(99)]);
}

#[tokio::test]
async fn test_delete_from_modal_removes_post_and_refetches() {
    let api = backend();
    let mut screen = loaded(&api, ResyncPolicy::Refetch).await;
    let mut dialog = ScriptedDialog::always(true);
    screen.open_detail(2, &mut dialog).await;
    api.clear_calls();

    assert_eq!(screen.confirm_modal(&mut dialog).await, Outcome::Done);

    assert_eq!(api.calls(), vec![ApiCall::DeletePost(2), ApiCall::ListPosts]);
    assert!(screen.modal().is_none());
    assert!(screen.view().list().find(&2).is_none());
    assert_eq!(dialog.last_notice(), Some("The post has been deleted."));
}

#[tokio::test]
async fn test_bulk_delete_with_zero_id_fails_that_key_only() {
    let api = Arc::new(MockAdminApi::new().with_posts(vec![
        post(0, "Broken row", "ghost", 1),
        post(5, "Valid row", "fan", 1),
    ]));
    let mut screen = loaded(&api, ResyncPolicy::Patch).await;
    let mut dialog = ScriptedDialog::always(true);
    screen.toggle_page();

    let outcome = screen.delete_selected(&mut dialog).await;

    assert_eq!(
        outcome,
        Outcome::Partial {
            succeeded: 1,
            failed: 1
        }
    );
    assert_eq!(api.mutations(), vec![ApiCall::DeletePost(5)]);
    assert_eq!(screen.view().list().selection().to_vec(), vec![0]);
}

#[tokio::test]
async fn test_failed_list_renders_error_status() {
    let api = Arc::new(
        MockAdminApi::new()
            .with_posts(vec![post(1, "Opening day lineup", "tigers_fan", 1)])
            .with_failure(|call| matches!(call, ApiCall::ListPosts)),
    );
    let mut screen = CommunityScreen::new(app(&api, ResyncPolicy::Refetch)).unwrap();

    assert!(!screen.load().await);

    assert!(matches!(screen.view().list().load_state(), LoadState::Failed(_)));
    let rendered = screen.render();
    assert!(rendered.starts_with("Community management\n"));
    assert!(rendered.contains("Failed to load data: "));
    assert!(!rendered.contains("Page 1 of"));
}

#[tokio::test]
async fn test_empty_board_search_shows_empty_status() {
    let api = backend();
    let mut screen = loaded(&api, ResyncPolicy::Refetch).await;

    screen.search("Giants", Some("board"));

    assert_eq!(screen.view().list().filtered_len(), 0);
    assert!(screen.render().contains("No data to display."));
}
