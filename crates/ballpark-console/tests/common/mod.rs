//! Shared fixtures for console integration tests

#![allow(dead_code)]

use ballpark_client::MockAdminApi;
use ballpark_console::AppState;
use ballpark_client::AdminApi;
use ballpark_core::{
    BoardRef, Comment, CommunityPost, Config, HtmlFragment, Inquiry, PostId, QuestionNum,
    ResyncPolicy, User, UserNumber,
};
use std::sync::Arc;

/// Console state over a shared mock backend
pub fn app(api: &Arc<MockAdminApi>, resync: ResyncPolicy) -> AppState {
    let mut config = Config::default();
    config.console.resync = resync;
    AppState::new(config, Arc::clone(api) as Arc<dyn AdminApi>)
}

pub fn user(number: UserNumber, name: &str, created: &str, suspended: bool) -> User {
    User {
        user_unique_number: number,
        user_id: Some(format!("{}{number}", name.to_lowercase())),
        user_name: Some(name.to_string()),
        user_email: Some(format!("{}@example.com", name.to_lowercase())),
        user_create_date: Some(created.to_string()),
        user_stop: suspended,
        user_favorite_team: Some(BoardRef::Id(3)),
        ..User::default()
    }
}

pub fn comment(post_id: PostId, comment_num: i64, author: Option<&str>, date: &str) -> Comment {
    Comment {
        post_id,
        post_comment_num: comment_num,
        author: author.map(str::to_string),
        content: Some(format!("comment {comment_num} on post {post_id}")),
        category_name: Some(BoardRef::Id(1)),
        date: Some(date.to_string()),
        post_view: 12,
        post_title: Some(format!("Post {post_id}")),
        ..Comment::default()
    }
}

pub fn reply(post_id: PostId, comment_num: i64, reply_id: i64, date: &str) -> Comment {
    Comment {
        reply_id: Some(reply_id),
        ..comment(post_id, comment_num, Some("replier"), date)
    }
}

pub fn post(post_id: PostId, title: &str, author: &str, board: i64) -> CommunityPost {
    CommunityPost {
        post_id,
        post_title: Some(title.to_string()),
        community_id: Some(author.to_string()),
        category_name: Some(BoardRef::Id(board)),
        post_content: Some(HtmlFragment::from_trusted(format!("<p>{title}</p>"))),
        community_date: Some("2024-03-01T10:00:00".to_string()),
        post_view: 40,
        comment_count: 2,
        ..CommunityPost::default()
    }
}

pub fn inquiry(question: QuestionNum, title: &str, answer: Option<&str>) -> Inquiry {
    Inquiry {
        question_num: question,
        question_title: Some(title.to_string()),
        question_id: Some("asker".to_string()),
        question_date: Some("2024-04-02T09:30:00".to_string()),
        question_content: Some(HtmlFragment::from_trusted("<p>Why was my post removed?</p>")),
        question_answer: answer.map(str::to_string),
        question_post_view: 3,
        ..Inquiry::default()
    }
}
