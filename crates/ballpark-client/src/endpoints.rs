//! URL construction for every admin API route

use ballpark_core::types::{CommentKey, PostId, QuestionNum, UserNumber};

/// Builds absolute URLs against a configured origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    /// Create endpoints for an origin such as `http://localhost:8090`
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Origin without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET /api/admin/users`
    pub fn users(&self) -> String {
        self.url("/api/admin/users")
    }

    /// `GET /api/admin/{userUniqueNumber}/stats`
    pub fn user_stats(&self, user: UserNumber) -> String {
        self.url(&format!("/api/admin/{user}/stats"))
    }

    /// `POST /api/admin/update-user`
    pub fn update_user(&self) -> String {
        self.url("/api/admin/update-user")
    }

    /// `POST /api/admin/release-user`
    pub fn release_user(&self) -> String {
        self.url("/api/admin/release-user")
    }

    /// `GET /api/comments/all`
    pub fn comments(&self) -> String {
        self.url("/api/comments/all")
    }

    /// `DELETE /api/comments/post/{postId}/comment/{num}[/reply/{replyId}]`
    pub fn comment(&self, key: &CommentKey) -> String {
        match key.reply_id {
            Some(reply) => self.url(&format!(
                "/api/comments/post/{}/comment/{}/reply/{reply}",
                key.post_id, key.comment_num
            )),
            None => self.url(&format!(
                "/api/comments/post/{}/comment/{}",
                key.post_id, key.comment_num
            )),
        }
    }

    /// `DELETE /api/comments/{postId}/delete`; the comment number goes in the query
    pub fn comment_delete_by_query(&self, post_id: PostId) -> String {
        self.url(&format!("/api/comments/{post_id}/delete"))
    }

    /// `GET /api/community/admin/posts`
    pub fn posts(&self) -> String {
        self.url("/api/community/admin/posts")
    }

    /// `GET` / `DELETE /api/community/post/{postId}`
    pub fn post(&self, post_id: PostId) -> String {
        self.url(&format!("/api/community/post/{post_id}"))
    }

    /// Inline image for a community attachment path
    pub fn post_image(&self, stored_path: &str) -> String {
        self.url(&format!(
            "/api/community/images/{}",
            urlencoding::encode(ballpark_core::utils::last_segment(stored_path))
        ))
    }

    /// Download link for a community attachment path
    pub fn post_file(&self, stored_path: &str) -> String {
        self.url(&format!(
            "/api/community/downloadFile/{}",
            urlencoding::encode(&ballpark_core::utils::display_file_name(stored_path))
        ))
    }

    /// `GET /api/question/list`
    pub fn inquiries(&self) -> String {
        self.url("/api/question/list")
    }

    /// `GET` / `DELETE /api/question/{id}`
    pub fn inquiry(&self, question: QuestionNum) -> String {
        self.url(&format!("/api/question/{question}"))
    }

    /// `PUT /api/question/{id}/answer`; the answer goes in the query
    pub fn inquiry_answer(&self, question: QuestionNum) -> String {
        self.url(&format!("/api/question/{question}/answer"))
    }

    /// Inline image for an inquiry attachment path
    pub fn inquiry_image(&self, stored_path: &str) -> String {
        self.url(&format!(
            "/api/question/images/{}",
            urlencoding::encode(ballpark_core::utils::last_segment(stored_path))
        ))
    }

    /// Download link for an inquiry attachment path
    pub fn inquiry_file(&self, stored_path: &str) -> String {
        self.url(&format!(
            "/api/question/files/{}",
            urlencoding::encode(&ballpark_core::utils::display_file_name(stored_path))
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn endpoints() -> Endpoints {
        Endpoints::new("http://localhost:8090/")
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        assert_eq!(endpoints().base_url(), "http://localhost:8090");
        assert_eq!(endpoints().users(), "http://localhost:8090/api/admin/users");
    }

    #[rstest]
    #[case(CommentKey::comment(12, 3), "http://localhost:8090/api/comments/post/12/comment/3")]
    #[case(
        CommentKey::reply(12, 3, 7),
        "http://localhost:8090/api/comments/post/12/comment/3/reply/7"
    )]
    fn test_comment_paths(#[case] key: CommentKey, #[case] expected: &str) {
        assert_eq!(endpoints().comment(&key), expected);
    }

    #[test]
    fn test_resource_paths() {
        let e = endpoints();
        assert_eq!(e.user_stats(5), "http://localhost:8090/api/admin/5/stats");
        assert_eq!(e.comment_delete_by_query(12), "http://localhost:8090/api/comments/12/delete");
        assert_eq!(e.post(8), "http://localhost:8090/api/community/post/8");
        assert_eq!(e.inquiry(42), "http://localhost:8090/api/question/42");
        assert_eq!(e.inquiry_answer(42), "http://localhost:8090/api/question/42/answer");
    }

    #[test]
    fn test_attachment_urls() {
        let e = endpoints();
        assert_eq!(
            e.post_image("/uploads/3_photo.png"),
            "http://localhost:8090/api/community/images/3_photo.png"
        );
        assert_eq!(
            e.post_file("/uploads/3_game notes.pdf"),
            "http://localhost:8090/api/community/downloadFile/game%20notes.pdf"
        );
        assert_eq!(
            e.inquiry_image("/uploads/9_경기.jpg"),
            "http://localhost:8090/api/question/images/9_%EA%B2%BD%EA%B8%B0.jpg"
        );
        assert_eq!(
            e.inquiry_file("/uploads/9_receipt.pdf"),
            "http://localhost:8090/api/question/files/receipt.pdf"
        );
    }
}
