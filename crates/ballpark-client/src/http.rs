//! reqwest-backed implementation of [`AdminApi`]

use crate::api::AdminApi;
use crate::endpoints::Endpoints;
use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use ballpark_core::config::ApiConfig;
use ballpark_core::types::{
    Comment, CommentKey, CommunityPost, Inquiry, PostId, QuestionNum, SuspensionUpdate, User,
    UserNumber, UserStats,
};
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Admin API client talking to the real backend
///
/// Session credentials travel as cookies: the client keeps a cookie store and,
/// when configured, sends a fixed session cookie with every request.
#[derive(Debug, Clone)]
pub struct HttpAdminApi {
    client: Client,
    endpoints: Endpoints,
}

impl HttpAdminApi {
    /// Build a client from the `[api]` configuration section
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the session cookie is not a valid
    /// header value or the TLS backend cannot be initialised.
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = &config.session_cookie {
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| ClientError::configuration(format!("invalid session cookie: {e}")))?;
            headers.insert(COOKIE, value);
        }

        let client = Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("ballpark-admin/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoints: Endpoints::new(config.base_url.clone()),
        })
    }

    /// URL builder in use
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn expect_ok(response: Response, url: &str) -> ClientResult<Response> {
        let status = response.status();
        if status == StatusCode::OK {
            Ok(response)
        } else {
            Err(ClientError::unexpected_status(status.as_u16(), url))
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> ClientResult<T> {
        debug!(url = %url, "GET");
        let response = self.client.get(&url).send().await?;
        let response = Self::expect_ok(response, &url)?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ClientError::decode(url, e))
    }

    async fn execute(&self, request: RequestBuilder, method: &str, url: &str) -> ClientResult<()> {
        debug!(url = %url, method, "request");
        let response = request.send().await?;
        Self::expect_ok(response, url)?;
        Ok(())
    }
}

#[async_trait]
impl AdminApi for HttpAdminApi {
    fn base_url(&self) -> &str {
        self.endpoints.base_url()
    }

    async fn list_users(&self) -> ClientResult<Vec<User>> {
        self.get_json(self.endpoints.users()).await
    }

    async fn user_stats(&self, user: UserNumber) -> ClientResult<UserStats> {
        self.get_json(self.endpoints.user_stats(user)).await
    }

    async fn update_user_suspension(&self, update: SuspensionUpdate) -> ClientResult<()> {
        let url = self.endpoints.update_user();
        self.execute(self.client.post(&url).json(&update), "POST", &url)
            .await
    }

    async fn release_user(&self, user: &User) -> ClientResult<()> {
        let url = self.endpoints.release_user();
        self.execute(self.client.post(&url).json(user), "POST", &url)
            .await
    }

    async fn list_comments(&self) -> ClientResult<Vec<Comment>> {
        self.get_json(self.endpoints.comments()).await
    }

    async fn delete_comment(&self, key: &CommentKey) -> ClientResult<()> {
        let url = self.endpoints.comment(key);
        self.execute(self.client.delete(&url), "DELETE", &url).await
    }

    async fn delete_comment_by_query(&self, post_id: PostId, comment_num: i64) -> ClientResult<()> {
        let url = self.endpoints.comment_delete_by_query(post_id);
        let request = self.client.delete(&url).query(&[
            ("type", "comment".to_string()),
            ("postCommentNum", comment_num.to_string()),
        ]);
        self.execute(request, "DELETE", &url).await
    }

    async fn list_posts(&self) -> ClientResult<Vec<CommunityPost>> {
        self.get_json(self.endpoints.posts()).await
    }

    async fn post_detail(&self, post_id: PostId) -> ClientResult<CommunityPost> {
        self.get_json(self.endpoints.post(post_id)).await
    }

    async fn delete_post(&self, post_id: PostId) -> ClientResult<()> {
        let url = self.endpoints.post(post_id);
        self.execute(self.client.delete(&url), "DELETE", &url).await
    }

    async fn list_inquiries(&self) -> ClientResult<Vec<Inquiry>> {
        self.get_json(self.endpoints.inquiries()).await
    }

    async fn inquiry_detail(&self, question: QuestionNum) -> ClientResult<Inquiry> {
        self.get_json(self.endpoints.inquiry(question)).await
    }

    async fn delete_inquiry(&self, question: QuestionNum) -> ClientResult<()> {
        let url = self.endpoints.inquiry(question);
        self.execute(self.client.delete(&url), "DELETE", &url).await
    }

    async fn answer_inquiry(&self, question: QuestionNum, answer: &str) -> ClientResult<()> {
        let url = self.endpoints.inquiry_answer(question);
        let request = self.client.put(&url).query(&[("answer", answer)]);
        self.execute(request, "PUT", &url).await
    }
}
