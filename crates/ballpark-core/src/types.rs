//! Backend records mirrored by the admin console

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// User identifier (`userUniqueNumber`)
pub type UserNumber = i64;

/// Community post identifier (`postId`)
pub type PostId = i64;

/// Inquiry identifier (`questionNum`)
pub type QuestionNum = i64;

/// Treat an explicit JSON `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept a numeric code sent either as a number or as a numeric string
fn flexible_code<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Number(i64),
        Text(String),
    }

    Ok(match Option::<Code>::deserialize(deserializer)? {
        Some(Code::Number(n)) => Some(n),
        Some(Code::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

/// Board (team or topic channel) reference as the backend sends it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoardRef {
    /// Numeric board id
    Id(i64),
    /// Board id or name sent as a string
    Name(String),
}

impl BoardRef {
    /// Lookup key used by the board directory
    #[must_use]
    pub fn as_key(&self) -> String {
        match self {
            Self::Id(id) => id.to_string(),
            Self::Name(name) => name.trim().to_string(),
        }
    }
}

impl fmt::Display for BoardRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => write!(f, "{name}"),
        }
    }
}

impl From<i64> for BoardRef {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

/// HTML produced by the backend, already sanitised by its producer
///
/// The console never builds markup itself; it either passes the fragment through
/// untouched or renders it as plain text for the terminal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HtmlFragment(String);

#[allow(clippy::expect_used)]
static BREAK_TAG: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?i)<br\s*/?>|</p\s*>|</div\s*>|</li\s*>").expect("valid regex")
});

#[allow(clippy::expect_used)]
static ANY_TAG: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"<[^>]*>").expect("valid regex"));

#[allow(clippy::expect_used)]
static BLANK_LINES: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"\n{3,}").expect("valid regex"));

impl HtmlFragment {
    /// Wrap markup that the producing service has sanitised
    #[must_use]
    pub fn from_trusted<S: Into<String>>(html: S) -> Self {
        Self(html.into())
    }

    /// Raw markup
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the fragment has no visible text
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.to_plain_text().trim().is_empty()
    }

    /// Strip tags and decode the common entities for terminal display
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        let with_breaks = BREAK_TAG.replace_all(&self.0, "\n");
        let stripped = ANY_TAG.replace_all(&with_breaks, "");
        let decoded = stripped
            .replace("&nbsp;", " ")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&");
        BLANK_LINES.replace_all(decoded.trim(), "\n\n").into_owned()
    }
}

impl fmt::Display for HtmlFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registered member
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique key
    #[serde(default)]
    pub user_unique_number: UserNumber,

    /// Login id
    pub user_id: Option<String>,

    /// Display name
    pub user_name: Option<String>,

    /// Nickname
    pub user_nickname: Option<String>,

    /// E-mail address
    pub user_email: Option<String>,

    /// Sign-up timestamp
    pub user_create_date: Option<String>,

    /// Last profile update timestamp
    pub user_update_date: Option<String>,

    /// `"R"` active, `"S"` suspended
    pub user_state: Option<String>,

    /// Suspension flag
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_stop: bool,

    /// Number of past suspensions
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_stop_count: u32,

    /// When the current suspension started
    pub user_stop_date: Option<String>,

    /// 1 male, 2 female, anything else unspecified
    #[serde(default, deserialize_with = "flexible_code")]
    pub user_gender: Option<i64>,

    /// Birth date
    pub user_birth_day: Option<String>,

    /// Favourite team board id
    pub user_favorite_team: Option<BoardRef>,

    /// Service terms consent (`"Y"` = agreed)
    pub user_svc_use_pcy_agmt_yn: Option<String>,

    /// Personal data processing consent (`"Y"` = agreed)
    pub user_ps_info_proc_agmt_yn: Option<String>,

    /// Sign-up channel
    pub user_social_login_sep: Option<String>,

    /// Set for administrator accounts
    pub admin_unique_number: Option<i64>,

    /// Posts written, filled in from the stats endpoint
    #[serde(default, deserialize_with = "null_as_default")]
    pub post_count: u64,

    /// Comments written, filled in from the stats endpoint
    #[serde(default, deserialize_with = "null_as_default")]
    pub comment_count: u64,
}

impl User {
    /// Whether the account is currently suspended
    ///
    /// `userState` wins when present; the flag is the fallback.
    #[must_use]
    pub fn is_suspended(&self) -> bool {
        match self.user_state.as_deref() {
            Some("S") => true,
            Some("R") => false,
            _ => self.user_stop,
        }
    }

    /// Apply a suspension change to both the flag and the state code
    pub fn set_suspended(&mut self, suspended: bool) {
        self.user_stop = suspended;
        self.user_state = Some(if suspended { "S" } else { "R" }.to_string());
    }

    /// Copy post and comment counts onto the record
    pub fn apply_stats(&mut self, stats: UserStats) {
        self.post_count = stats.post_count;
        self.comment_count = stats.comment_count;
    }
}

/// Post and comment counts for one user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    /// Posts written
    #[serde(default, deserialize_with = "null_as_default")]
    pub post_count: u64,
    /// Comments written
    #[serde(default, deserialize_with = "null_as_default")]
    pub comment_count: u64,
}

/// Body of the suspension toggle call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspensionUpdate {
    /// Target user
    pub user_unique_number: UserNumber,
    /// New suspension flag
    pub user_stop: bool,
}

/// Comment or reply on a community post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Post the comment belongs to
    #[serde(default)]
    pub post_id: PostId,

    /// Comment sequence number within the post
    #[serde(default)]
    pub post_comment_num: i64,

    /// Set when this row is a reply
    pub reply_id: Option<i64>,

    /// Author, may be null
    pub author: Option<String>,

    /// Comment text
    pub content: Option<String>,

    /// Board id of the parent post
    pub category_name: Option<BoardRef>,

    /// Creation timestamp
    pub date: Option<String>,

    /// View count of the parent post
    #[serde(default, deserialize_with = "null_as_default")]
    pub post_view: u64,

    /// Title of the parent post
    pub post_title: Option<String>,
}

impl Comment {
    /// Row identity
    #[must_use]
    pub const fn comment_key(&self) -> CommentKey {
        CommentKey {
            post_id: self.post_id,
            comment_num: self.post_comment_num,
            reply_id: self.reply_id,
        }
    }

    /// Whether this row is a reply to another comment
    #[must_use]
    pub const fn is_reply(&self) -> bool {
        self.reply_id.is_some()
    }
}

/// Identity of a comment: `postId_commentNum[_replyId]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommentKey {
    /// Parent post
    pub post_id: PostId,
    /// Comment sequence number
    pub comment_num: i64,
    /// Reply id for replies
    pub reply_id: Option<i64>,
}

impl CommentKey {
    /// Key of a top-level comment
    #[must_use]
    pub const fn comment(post_id: PostId, comment_num: i64) -> Self {
        Self {
            post_id,
            comment_num,
            reply_id: None,
        }
    }

    /// Key of a reply
    #[must_use]
    pub const fn reply(post_id: PostId, comment_num: i64, reply_id: i64) -> Self {
        Self {
            post_id,
            comment_num,
            reply_id: Some(reply_id),
        }
    }

    /// Zero ids mark a record the backend sent without identity
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.post_id != 0
            && self.comment_num != 0
            && !matches!(self.reply_id, Some(0))
    }
}

impl fmt::Display for CommentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reply_id {
            Some(reply) => write!(f, "{}_{}_{reply}", self.post_id, self.comment_num),
            None => write!(f, "{}_{}", self.post_id, self.comment_num),
        }
    }
}

impl FromStr for CommentKey {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || crate::Error::InvalidKey {
            input: s.to_string(),
        };
        let parts = s
            .split('_')
            .map(|part| part.trim().parse::<i64>().map_err(|_| invalid()))
            .collect::<crate::Result<Vec<_>>>()?;

        match parts.as_slice() {
            [post_id, comment_num] => Ok(Self::comment(*post_id, *comment_num)),
            [post_id, comment_num, reply_id] => Ok(Self::reply(*post_id, *comment_num, *reply_id)),
            _ => Err(invalid()),
        }
    }
}

/// Community board post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityPost {
    /// Unique key
    #[serde(default)]
    pub post_id: PostId,

    /// Title
    pub post_title: Option<String>,

    /// Author id
    pub community_id: Option<String>,

    /// Board id
    pub category_name: Option<BoardRef>,

    /// Body, only present in the detail payload
    pub post_content: Option<HtmlFragment>,

    /// Creation timestamp
    pub community_date: Option<String>,

    /// View count
    #[serde(default, deserialize_with = "null_as_default")]
    pub post_view: u64,

    /// Number of comments
    #[serde(default, deserialize_with = "null_as_default")]
    pub comment_count: u64,

    /// Stored attachment path
    pub post_img_path: Option<String>,
}

/// Question submitted to the administrators
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "InquiryWire")]
pub struct Inquiry {
    /// Unique key
    pub question_num: QuestionNum,

    /// Title
    pub question_title: Option<String>,

    /// Author id
    pub question_id: Option<String>,

    /// Creation timestamp
    pub question_date: Option<String>,

    /// Body
    pub question_content: Option<HtmlFragment>,

    /// Administrator answer, null until answered
    pub question_answer: Option<String>,

    /// Stored attachment path
    pub question_img_path: Option<String>,

    /// View count
    pub question_post_view: u64,
}

/// Inquiry as the backend sends it
///
/// The list endpoint spells the author `questionId` and the detail endpoint
/// `questionID`; some payloads carry both.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InquiryWire {
    #[serde(default)]
    question_num: QuestionNum,
    question_title: Option<String>,
    question_id: Option<String>,
    #[serde(rename = "questionID")]
    question_id_upper: Option<String>,
    question_date: Option<String>,
    question_content: Option<HtmlFragment>,
    question_answer: Option<String>,
    question_img_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    question_post_view: u64,
}

impl From<InquiryWire> for Inquiry {
    fn from(wire: InquiryWire) -> Self {
        Self {
            question_num: wire.question_num,
            question_title: wire.question_title,
            question_id: wire.question_id.or(wire.question_id_upper),
            question_date: wire.question_date,
            question_content: wire.question_content,
            question_answer: wire.question_answer,
            question_img_path: wire.question_img_path,
            question_post_view: wire.question_post_view,
        }
    }
}

impl Inquiry {
    /// An inquiry counts as answered once it carries non-blank answer text
    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.question_answer
            .as_deref()
            .is_some_and(|answer| !answer.trim().is_empty())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::uninlined_format_args)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_user_deserialization_tolerates_nulls() {
        let user: User = serde_json::from_value(serde_json::json!({
            "userUniqueNumber": 7,
            "userId": "slugger",
            "userName": "Kim",
            "userState": "R",
            "userStop": null,
            "userGender": "2",
            "userFavoriteTeam": 3,
            "postCount": null
        }))
        .unwrap();

        assert_eq!(user.user_unique_number, 7);
        assert_eq!(user.user_id.as_deref(), Some("slugger"));
        assert!(!user.user_stop);
        assert_eq!(user.user_gender, Some(2));
        assert_eq!(user.user_favorite_team, Some(BoardRef::Id(3)));
        assert_eq!(user.post_count, 0);
        assert!(user.user_email.is_none());
    }

    #[rstest]
    #[case(Some("S"), false, true)]
    #[case(Some("R"), true, false)]
    #[case(None, true, true)]
    #[case(None, false, false)]
    #[case(Some("X"), true, true)]
    fn test_user_is_suspended(
        #[case] state: Option<&str>,
        #[case] stop: bool,
        #[case] expected: bool,
    ) {
        let user = User {
            user_state: state.map(str::to_string),
            user_stop: stop,
            ..User::default()
        };
        assert_eq!(user.is_suspended(), expected);
    }

    #[test]
    fn test_set_suspended_updates_flag_and_state() {
        let mut user = User {
            user_state: Some("R".to_string()),
            ..User::default()
        };

        user.set_suspended(true);
        assert!(user.user_stop);
        assert_eq!(user.user_state.as_deref(), Some("S"));
        assert!(user.is_suspended());

        user.set_suspended(false);
        assert!(!user.user_stop);
        assert_eq!(user.user_state.as_deref(), Some("R"));
    }

    #[test]
    fn test_user_stats_missing_fields_default_to_zero() {
        let stats: UserStats = serde_json::from_str(r#"{"postCount": 4}"#).unwrap();
        assert_eq!(
            stats,
            UserStats {
                post_count: 4,
                comment_count: 0
            }
        );
    }

    #[test]
    fn test_suspension_update_wire_format() {
        let body = serde_json::to_value(SuspensionUpdate {
            user_unique_number: 12,
            user_stop: true,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"userUniqueNumber": 12, "userStop": true})
        );
    }

    #[rstest]
    #[case("12_3", CommentKey::comment(12, 3))]
    #[case("12_3_9", CommentKey::reply(12, 3, 9))]
    #[case(" 5_1 ", CommentKey::comment(5, 1))]
    fn test_comment_key_parse(#[case] input: &str, #[case] expected: CommentKey) {
        assert_eq!(input.trim().parse::<CommentKey>().unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("12")]
    #[case("12_x")]
    #[case("1_2_3_4")]
    fn test_comment_key_parse_rejects_malformed(#[case] input: &str) {
        let err = input.parse::<CommentKey>().unwrap_err();
        assert!(matches!(err, crate::Error::InvalidKey { .. }));
    }

    #[test]
    fn test_comment_key_display() {
        assert_eq!(CommentKey::comment(12, 3).to_string(), "12_3");
        assert_eq!(CommentKey::reply(12, 3, 9).to_string(), "12_3_9");
    }

    #[test]
    fn test_comment_key_completeness() {
        assert!(CommentKey::comment(1, 1).is_complete());
        assert!(!CommentKey::comment(0, 1).is_complete());
        assert!(!CommentKey::comment(1, 0).is_complete());
        assert!(!CommentKey::reply(1, 1, 0).is_complete());
    }

    #[test]
    fn test_comment_from_backend_payload() {
        let comment: Comment = serde_json::from_value(serde_json::json!({
            "postId": 31,
            "postCommentNum": 2,
            "replyId": 5,
            "author": null,
            "content": "Great game",
            "categoryName": "4",
            "date": "2024-02-01T10:00:00",
            "postView": 120
        }))
        .unwrap();

        assert_eq!(comment.comment_key(), CommentKey::reply(31, 2, 5));
        assert!(comment.is_reply());
        assert!(comment.author.is_none());
        assert_eq!(comment.category_name, Some(BoardRef::Name("4".to_string())));
        assert_eq!(comment.category_name.unwrap().as_key(), "4");
    }

    #[test]
    fn test_inquiry_accepts_detail_spelling_of_author() {
        let inquiry: Inquiry = serde_json::from_value(serde_json::json!({
            "questionNum": 42,
            "questionTitle": "Ticket refund",
            "questionID": "fan01",
            "questionContent": "<p>Hello</p>",
            "questionAnswer": null
        }))
        .unwrap();

        assert_eq!(inquiry.question_id.as_deref(), Some("fan01"));
        assert_eq!(inquiry.question_content.unwrap().as_str(), "<p>Hello</p>");
        assert!(inquiry.question_answer.is_none());
    }

    #[test]
    fn test_inquiry_with_both_author_spellings() {
        let inquiry: Inquiry = serde_json::from_value(serde_json::json!({
            "questionNum": 42,
            "questionId": "fan01",
            "questionID": "fan01",
            "questionPostView": null
        }))
        .unwrap();

        assert_eq!(inquiry.question_id.as_deref(), Some("fan01"));
        assert_eq!(inquiry.question_post_view, 0);

        let split: Inquiry = serde_json::from_value(serde_json::json!({
            "questionNum": 43,
            "questionId": null,
            "questionID": "bears_fan"
        }))
        .unwrap();
        assert_eq!(split.question_id.as_deref(), Some("bears_fan"));
    }

    #[rstest]
    #[case(None, false)]
    #[case(Some(""), false)]
    #[case(Some("   "), false)]
    #[case(Some("Refund issued"), true)]
    fn test_inquiry_is_answered(#[case] answer: Option<&str>, #[case] expected: bool) {
        let inquiry = Inquiry {
            question_answer: answer.map(str::to_string),
            ..Inquiry::default()
        };
        assert_eq!(inquiry.is_answered(), expected);
    }

    #[test]
    fn test_html_fragment_plain_text() {
        let html = HtmlFragment::from_trusted(
            "<p>Hello <b>fans</b></p><p>Tom &amp; Jerry&nbsp;say &lt;hi&gt;</p><br/>",
        );
        assert_eq!(html.to_plain_text(), "Hello fans\nTom & Jerry say <hi>");
        assert!(!html.is_blank());
        assert!(HtmlFragment::from_trusted("<p> </p>").is_blank());
    }

    #[test]
    fn test_html_fragment_is_transparent_on_the_wire() {
        let html: HtmlFragment = serde_json::from_str(r#""<i>x</i>""#).unwrap();
        assert_eq!(html.as_str(), "<i>x</i>");
        assert_eq!(serde_json::to_string(&html).unwrap(), r#""<i>x</i>""#);
    }
}
