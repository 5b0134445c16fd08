//! In-memory admin backend for tests and offline runs

use crate::api::AdminApi;
use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use ballpark_core::types::{
    Comment, CommentKey, CommunityPost, Inquiry, PostId, QuestionNum, SuspensionUpdate, User,
    UserNumber, UserStats,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;

/// One call received by the mock, with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    /// `GET /api/admin/users`
    ListUsers,
    /// `GET /api/admin/{id}/stats`
    UserStats(UserNumber),
    /// `POST /api/admin/update-user`
    UpdateUserSuspension(SuspensionUpdate),
    /// `POST /api/admin/release-user`
    ReleaseUser(UserNumber),
    /// `GET /api/comments/all`
    ListComments,
    /// `DELETE /api/comments/post/..`
    DeleteComment(CommentKey),
    /// `DELETE /api/comments/{postId}/delete?type=comment&postCommentNum=..`
    DeleteCommentByQuery {
        /// Parent post
        post_id: PostId,
        /// Comment number
        comment_num: i64,
    },
    /// `GET /api/community/admin/posts`
    ListPosts,
    /// `GET /api/community/post/{id}`
    PostDetail(PostId),
    /// `DELETE /api/community/post/{id}`
    DeletePost(PostId),
    /// `GET /api/question/list`
    ListInquiries,
    /// `GET /api/question/{id}`
    InquiryDetail(QuestionNum),
    /// `DELETE /api/question/{id}`
    DeleteInquiry(QuestionNum),
    /// `PUT /api/question/{id}/answer`
    AnswerInquiry {
        /// Target inquiry
        question: QuestionNum,
        /// Submitted text
        answer: String,
    },
}

impl ApiCall {
    /// Whether the call changes backend state
    pub const fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::UpdateUserSuspension(_)
                | Self::ReleaseUser(_)
                | Self::DeleteComment(_)
                | Self::DeleteCommentByQuery { .. }
                | Self::DeletePost(_)
                | Self::DeleteInquiry(_)
                | Self::AnswerInquiry { .. }
        )
    }
}

type FailureRule = Box<dyn Fn(&ApiCall) -> bool + Send + Sync>;

#[derive(Debug, Default)]
struct Backend {
    users: Vec<User>,
    stats: HashMap<UserNumber, UserStats>,
    comments: Vec<Comment>,
    posts: Vec<CommunityPost>,
    inquiries: Vec<Inquiry>,
    calls: Vec<ApiCall>,
}

/// Admin API backed by in-memory collections
///
/// Every call is recorded. Mutations change the stored collections so that a
/// refetch observes them, mirroring the real backend.
pub struct MockAdminApi {
    backend: Mutex<Backend>,
    failures: Mutex<Vec<FailureRule>>,
}

impl fmt::Debug for MockAdminApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockAdminApi")
            .field("backend", &*self.backend.lock())
            .field("failure_rules", &self.failures.lock().len())
            .finish()
    }
}

impl Default for MockAdminApi {
    fn default() -> Self {
        Self::new()
    }
}

const MOCK_ORIGIN: &str = "mock://ballpark";

impl MockAdminApi {
    /// Create an empty backend
    pub fn new() -> Self {
        Self {
            backend: Mutex::new(Backend::default()),
            failures: Mutex::new(Vec::new()),
        }
    }

    /// Seed users
    #[must_use]
    pub fn with_users(self, users: Vec<User>) -> Self {
        self.backend.lock().users = users;
        self
    }

    /// Seed per-user stats; users without an entry report zero counts
    #[must_use]
    pub fn with_stats(self, stats: impl IntoIterator<Item = (UserNumber, UserStats)>) -> Self {
        self.backend.lock().stats = stats.into_iter().collect();
        self
    }

    /// Seed comments
    #[must_use]
    pub fn with_comments(self, comments: Vec<Comment>) -> Self {
        self.backend.lock().comments = comments;
        self
    }

    /// Seed community posts
    #[must_use]
    pub fn with_posts(self, posts: Vec<CommunityPost>) -> Self {
        self.backend.lock().posts = posts;
        self
    }

    /// Seed inquiries
    #[must_use]
    pub fn with_inquiries(self, inquiries: Vec<Inquiry>) -> Self {
        self.backend.lock().inquiries = inquiries;
        self
    }

    /// Reject every call matching the predicate with a 500
    #[must_use]
    pub fn with_failure<P>(self, predicate: P) -> Self
    where
        P: Fn(&ApiCall) -> bool + Send + Sync + 'static,
    {
        self.fail_when(predicate);
        self
    }

    /// Add a failure rule to a running mock
    pub fn fail_when<P>(&self, predicate: P)
    where
        P: Fn(&ApiCall) -> bool + Send + Sync + 'static,
    {
        self.failures.lock().push(Box::new(predicate));
    }

    /// Remove every failure rule
    pub fn clear_failures(&self) {
        self.failures.lock().clear();
    }

    /// Calls received so far, in order
    pub fn calls(&self) -> Vec<ApiCall> {
        self.backend.lock().calls.clone()
    }

    /// State-changing calls received so far
    pub fn mutations(&self) -> Vec<ApiCall> {
        self.backend
            .lock()
            .calls
            .iter()
            .filter(|call| call.is_mutation())
            .cloned()
            .collect()
    }

    /// Forget recorded calls
    pub fn clear_calls(&self) {
        self.backend.lock().calls.clear();
    }

    /// Current users
    pub fn users(&self) -> Vec<User> {
        self.backend.lock().users.clone()
    }

    /// Current comments
    pub fn comments(&self) -> Vec<Comment> {
        self.backend.lock().comments.clone()
    }

    /// Current posts
    pub fn posts(&self) -> Vec<CommunityPost> {
        self.backend.lock().posts.clone()
    }

    /// Current inquiries
    pub fn inquiries(&self) -> Vec<Inquiry> {
        self.backend.lock().inquiries.clone()
    }

    /// Record the call and apply failure rules
    fn receive(&self, call: ApiCall) -> ClientResult<()> {
        let rejected = self.failures.lock().iter().any(|rule| rule(&call));
        self.backend.lock().calls.push(call.clone());

        if rejected {
            Err(ClientError::unexpected_status(500, format!("{MOCK_ORIGIN}/{call:?}")))
        } else {
            Ok(())
        }
    }

    fn not_found(what: impl fmt::Display) -> ClientError {
        ClientError::unexpected_status(404, format!("{MOCK_ORIGIN}/{what}"))
    }
}

#[async_trait]
impl AdminApi for MockAdminApi {
    fn base_url(&self) -> &str {
        MOCK_ORIGIN
    }

    async fn list_users(&self) -> ClientResult<Vec<User>> {
        self.receive(ApiCall::ListUsers)?;
        Ok(self.users())
    }

    async fn user_stats(&self, user: UserNumber) -> ClientResult<UserStats> {
        self.receive(ApiCall::UserStats(user))?;
        Ok(self
            .backend
            .lock()
            .stats
            .get(&user)
            .copied()
            .unwrap_or_default())
    }

    async fn update_user_suspension(&self, update: SuspensionUpdate) -> ClientResult<()> {
        self.receive(ApiCall::UpdateUserSuspension(update))?;
        let mut backend = self.backend.lock();
        let user = backend
            .users
            .iter_mut()
            .find(|u| u.user_unique_number == update.user_unique_number)
            .ok_or_else(|| Self::not_found(format!("user/{}", update.user_unique_number)))?;
        user.set_suspended(update.user_stop);
        Ok(())
    }

    async fn release_user(&self, user: &User) -> ClientResult<()> {
        let number = user.user_unique_number;
        self.receive(ApiCall::ReleaseUser(number))?;
        let mut backend = self.backend.lock();
        let stored = backend
            .users
            .iter_mut()
            .find(|u| u.user_unique_number == number)
            .ok_or_else(|| Self::not_found(format!("user/{number}")))?;
        stored.set_suspended(false);
        Ok(())
    }

    async fn list_comments(&self) -> ClientResult<Vec<Comment>> {
        self.receive(ApiCall::ListComments)?;
        Ok(self.comments())
    }

    async fn delete_comment(&self, key: &CommentKey) -> ClientResult<()> {
        self.receive(ApiCall::DeleteComment(*key))?;
        let mut backend = self.backend.lock();
        let before = backend.comments.len();
        backend.comments.retain(|c| c.comment_key() != *key);
        if backend.comments.len() == before {
            return Err(Self::not_found(format!("comment/{key}")));
        }
        Ok(())
    }

    async fn delete_comment_by_query(&self, post_id: PostId, comment_num: i64) -> ClientResult<()> {
        self.receive(ApiCall::DeleteCommentByQuery {
            post_id,
            comment_num,
        })?;
        let key = CommentKey::comment(post_id, comment_num);
        let mut backend = self.backend.lock();
        let before = backend.comments.len();
        backend.comments.retain(|c| c.comment_key() != key);
        if backend.comments.len() == before {
            return Err(Self::not_found(format!("comment/{key}")));
        }
        Ok(())
    }

    async fn list_posts(&self) -> ClientResult<Vec<CommunityPost>> {
        self.receive(ApiCall::ListPosts)?;
        Ok(self.posts())
    }

    async fn post_detail(&self, post_id: PostId) -> ClientResult<CommunityPost> {
        self.receive(ApiCall::PostDetail(post_id))?;
        self.backend
            .lock()
            .posts
            .iter()
            .find(|p| p.post_id == post_id)
            .cloned()
            .ok_or_else(|| Self::not_found(format!("post/{post_id}")))
    }

    async fn delete_post(&self, post_id: PostId) -> ClientResult<()> {
        self.receive(ApiCall::DeletePost(post_id))?;
        let mut backend = self.backend.lock();
        let before = backend.posts.len();
        backend.posts.retain(|p| p.post_id != post_id);
        if backend.posts.len() == before {
            return Err(Self::not_found(format!("post/{post_id}")));
        }
        Ok(())
    }

    async fn list_inquiries(&self) -> ClientResult<Vec<Inquiry>> {
        self.receive(ApiCall::ListInquiries)?;
        Ok(self.inquiries())
    }

    async fn inquiry_detail(&self, question: QuestionNum) -> ClientResult<Inquiry> {
        self.receive(ApiCall::InquiryDetail(question))?;
        self.backend
            .lock()
            .inquiries
            .iter()
            .find(|i| i.question_num == question)
            .cloned()
            .ok_or_else(|| Self::not_found(format!("question/{question}")))
    }

    async fn delete_inquiry(&self, question: QuestionNum) -> ClientResult<()> {
        self.receive(ApiCall::DeleteInquiry(question))?;
        let mut backend = self.backend.lock();
        let before = backend.inquiries.len();
        backend.inquiries.retain(|i| i.question_num != question);
        if backend.inquiries.len() == before {
            return Err(Self::not_found(format!("question/{question}")));
        }
        Ok(())
    }

    async fn answer_inquiry(&self, question: QuestionNum, answer: &str) -> ClientResult<()> {
        self.receive(ApiCall::AnswerInquiry {
            question,
            answer: answer.to_string(),
        })?;
        let mut backend = self.backend.lock();
        let inquiry = backend
            .inquiries
            .iter_mut()
            .find(|i| i.question_num == question)
            .ok_or_else(|| Self::not_found(format!("question/{question}")))?;
        inquiry.question_answer = Some(answer.to_string());
        Ok(())
    }
}
