//! Admin API abstraction

use crate::error::ClientResult;
use async_trait::async_trait;
use ballpark_core::types::{
    Comment, CommentKey, CommunityPost, Inquiry, PostId, QuestionNum, SuspensionUpdate, User,
    UserNumber, UserStats,
};

/// Operations the management screens need from the backend
///
/// Every method maps to exactly one HTTP call. Implementations must treat anything
/// other than a 200 response as an error and must not retry.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// Backend origin, for diagnostics and attachment links
    fn base_url(&self) -> &str;

    /// List every user
    async fn list_users(&self) -> ClientResult<Vec<User>>;

    /// Post and comment counts for one user
    async fn user_stats(&self, user: UserNumber) -> ClientResult<UserStats>;

    /// Set a user's suspension flag
    async fn update_user_suspension(&self, update: SuspensionUpdate) -> ClientResult<()>;

    /// Lift a suspension; the backend expects the full user record
    async fn release_user(&self, user: &User) -> ClientResult<()>;

    /// List every comment and reply
    async fn list_comments(&self) -> ClientResult<Vec<Comment>>;

    /// Delete a comment or reply through its resource path
    async fn delete_comment(&self, key: &CommentKey) -> ClientResult<()>;

    /// Delete a top-level comment through the query-parameter endpoint
    async fn delete_comment_by_query(&self, post_id: PostId, comment_num: i64) -> ClientResult<()>;

    /// List every community post
    async fn list_posts(&self) -> ClientResult<Vec<CommunityPost>>;

    /// Full post including its HTML body
    async fn post_detail(&self, post_id: PostId) -> ClientResult<CommunityPost>;

    /// Delete a community post
    async fn delete_post(&self, post_id: PostId) -> ClientResult<()>;

    /// List every inquiry
    async fn list_inquiries(&self) -> ClientResult<Vec<Inquiry>>;

    /// Full inquiry including its HTML body
    async fn inquiry_detail(&self, question: QuestionNum) -> ClientResult<Inquiry>;

    /// Delete an inquiry
    async fn delete_inquiry(&self, question: QuestionNum) -> ClientResult<()>;

    /// Store an administrator answer
    async fn answer_inquiry(&self, question: QuestionNum, answer: &str) -> ClientResult<()>;
}
