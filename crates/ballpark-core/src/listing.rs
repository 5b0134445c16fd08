//! Filtering, paging and selection state for a loaded list
//!
//! Every management screen keeps one [`ListState`] over its records. The state is
//! purely local; the backend stays the source of truth and screens replace the
//! records wholesale on every fetch.

use crate::boards::BoardDirectory;
use crate::pagination::Pager;
use crate::search::{SearchField, SearchQuery, contains_ci};
use crate::selection::Selection;
use crate::types::{Comment, CommentKey, CommunityPost, Inquiry, PostId, QuestionNum, User, UserNumber};
use std::fmt;
use std::hash::Hash;

/// Terms that select answered inquiries
pub const ANSWERED_TERMS: [&str; 3] = ["answered", "yes", "답변 완료"];

/// Terms that select unanswered inquiries
pub const UNANSWERED_TERMS: [&str; 3] = ["unanswered", "no", "미답변"];

/// Lookups a record needs to evaluate a search
#[derive(Debug, Clone, Default)]
pub struct FilterContext {
    boards: BoardDirectory,
    no_author: String,
}

impl FilterContext {
    /// Build a context from a board directory and the no-author placeholder
    #[must_use]
    pub fn new<S: Into<String>>(boards: BoardDirectory, no_author: S) -> Self {
        Self {
            boards,
            no_author: no_author.into(),
        }
    }

    /// Board names
    #[must_use]
    pub const fn boards(&self) -> &BoardDirectory {
        &self.boards
    }

    /// Placeholder shown for a missing author
    #[must_use]
    pub fn no_author(&self) -> &str {
        &self.no_author
    }
}

impl From<&crate::Config> for FilterContext {
    fn from(config: &crate::Config) -> Self {
        Self::new(BoardDirectory::from(config), config.display.no_author.clone())
    }
}

/// A row of a management screen
pub trait Record: Clone + fmt::Debug + Send + Sync {
    /// Stable row identity
    type Key: Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync;

    /// Searchable categories
    type Field: SearchField;

    /// Row identity
    fn key(&self) -> Self::Key;

    /// Whether the record matches an already lower-cased term on one category
    fn matches(&self, field: Self::Field, needle: &str, ctx: &FilterContext) -> bool;
}

/// Records matching the query, in their original order
///
/// A query whose category is unknown matches nothing.
pub fn filter_records<'r, R: Record>(
    records: &'r [R],
    query: &SearchQuery<R::Field>,
    ctx: &FilterContext,
) -> Vec<&'r R> {
    let Some(field) = query.field() else {
        return Vec::new();
    };
    let needle = query.needle();
    records
        .iter()
        .filter(|record| record.matches(field, &needle, ctx))
        .collect()
}

/// User search categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserField {
    /// Display name
    #[default]
    Name,
    /// Login id
    Id,
    /// E-mail
    Email,
}

impl SearchField for UserField {
    const ALL: &'static [Self] = &[Self::Name, Self::Id, Self::Email];

    fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Id => "id",
            Self::Email => "email",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Id => "Login id",
            Self::Email => "Email",
        }
    }
}

impl Record for User {
    type Key = UserNumber;
    type Field = UserField;

    fn key(&self) -> UserNumber {
        self.user_unique_number
    }

    fn matches(&self, field: UserField, needle: &str, _ctx: &FilterContext) -> bool {
        let value = match field {
            UserField::Name => self.user_name.as_deref(),
            UserField::Id => self.user_id.as_deref(),
            UserField::Email => self.user_email.as_deref(),
        };
        contains_ci(value, needle)
    }
}

/// Comment search categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentField {
    /// Comment text
    #[default]
    Content,
    /// Author, with the placeholder standing in for a missing one
    Author,
    /// Board name
    Board,
}

impl SearchField for CommentField {
    const ALL: &'static [Self] = &[Self::Content, Self::Author, Self::Board];

    fn key(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Author => "author",
            Self::Board => "board",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Content => "Comment",
            Self::Author => "Author",
            Self::Board => "Board",
        }
    }
}

impl Record for Comment {
    type Key = CommentKey;
    type Field = CommentField;

    fn key(&self) -> CommentKey {
        self.comment_key()
    }

    fn matches(&self, field: CommentField, needle: &str, ctx: &FilterContext) -> bool {
        match field {
            CommentField::Content => contains_ci(Some(self.content.as_deref().unwrap_or("")), needle),
            CommentField::Author => contains_ci(
                Some(self.author.as_deref().unwrap_or(ctx.no_author())),
                needle,
            ),
            CommentField::Board => contains_ci(
                ctx.boards().resolve(self.category_name.as_ref()).as_deref(),
                needle,
            ),
        }
    }
}

/// Community post search categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostField {
    /// Title
    #[default]
    Title,
    /// Author id
    Author,
    /// Board name
    Board,
}

impl SearchField for PostField {
    const ALL: &'static [Self] = &[Self::Title, Self::Author, Self::Board];

    fn key(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Board => "board",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Author => "Author",
            Self::Board => "Board",
        }
    }
}

impl Record for CommunityPost {
    type Key = PostId;
    type Field = PostField;

    fn key(&self) -> PostId {
        self.post_id
    }

    fn matches(&self, field: PostField, needle: &str, ctx: &FilterContext) -> bool {
        match field {
            PostField::Title => contains_ci(self.post_title.as_deref(), needle),
            PostField::Author => contains_ci(self.community_id.as_deref(), needle),
            PostField::Board => contains_ci(
                ctx.boards().resolve(self.category_name.as_ref()).as_deref(),
                needle,
            ),
        }
    }
}

/// Inquiry search categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InquiryField {
    /// Title
    #[default]
    Title,
    /// Author id
    Author,
    /// Answer presence
    Answered,
}

impl SearchField for InquiryField {
    const ALL: &'static [Self] = &[Self::Title, Self::Author, Self::Answered];

    fn key(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Answered => "answered",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Author => "Author",
            Self::Answered => "Answer status",
        }
    }
}

/// Which answer state a term on the `answered` category asks for
///
/// A blank or unrecognised term places no constraint.
fn answered_filter(needle: &str) -> Option<bool> {
    let needle = needle.trim();
    if ANSWERED_TERMS.contains(&needle) {
        Some(true)
    } else if UNANSWERED_TERMS.contains(&needle) {
        Some(false)
    } else {
        None
    }
}

impl Record for Inquiry {
    type Key = QuestionNum;
    type Field = InquiryField;

    fn key(&self) -> QuestionNum {
        self.question_num
    }

    fn matches(&self, field: InquiryField, needle: &str, _ctx: &FilterContext) -> bool {
        match field {
            InquiryField::Title => contains_ci(self.question_title.as_deref(), needle),
            InquiryField::Author => contains_ci(self.question_id.as_deref(), needle),
            InquiryField::Answered => {
                answered_filter(needle).is_none_or(|wanted| self.is_answered() == wanted)
            }
        }
    }
}

/// Progress of the list fetch
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Fetch in flight
    #[default]
    Loading,
    /// Records are available
    Ready,
    /// Fetch failed; the list is empty
    Failed(String),
}

/// Records plus the search, page and selection applied to them
#[derive(Debug, Clone)]
pub struct ListState<R: Record> {
    records: Vec<R>,
    load: LoadState,
    query: SearchQuery<R::Field>,
    pager: Pager,
    selection: Selection<R::Key>,
    ctx: FilterContext,
}

impl<R: Record> ListState<R> {
    /// Empty list in the loading state
    ///
    /// # Errors
    ///
    /// Returns a validation error when `page_size` is zero.
    pub fn new(page_size: usize, ctx: FilterContext) -> crate::Result<Self> {
        Ok(Self {
            records: Vec::new(),
            load: LoadState::Loading,
            query: SearchQuery::default(),
            pager: Pager::new(page_size)?,
            selection: Selection::new(),
            ctx,
        })
    }

    /// Current load state
    #[must_use]
    pub const fn load_state(&self) -> &LoadState {
        &self.load
    }

    /// Mark a fetch as started
    pub fn begin_loading(&mut self) {
        self.load = LoadState::Loading;
    }

    /// Replace the records after a successful fetch
    ///
    /// Selected keys that no longer exist are dropped.
    pub fn replace(&mut self, records: Vec<R>) {
        self.records = records;
        self.load = LoadState::Ready;
        let present: std::collections::HashSet<R::Key> =
            self.records.iter().map(Record::key).collect();
        self.selection.retain(|key| present.contains(key));
        self.clamp();
    }

    /// Fall back to an empty list after a failed fetch
    pub fn fail<S: Into<String>>(&mut self, message: S) {
        self.records.clear();
        self.selection.clear();
        self.load = LoadState::Failed(message.into());
        self.clamp();
    }

    /// All loaded records
    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Filter context in use
    #[must_use]
    pub const fn context(&self) -> &FilterContext {
        &self.ctx
    }

    /// Records matching the current query
    #[must_use]
    pub fn filtered(&self) -> Vec<&R> {
        filter_records(&self.records, &self.query, &self.ctx)
    }

    /// Number of records matching the current query
    #[must_use]
    pub fn filtered_len(&self) -> usize {
        self.filtered().len()
    }

    /// Records on the current page
    #[must_use]
    pub fn page(&self) -> Vec<&R> {
        let filtered = self.filtered();
        self.pager.slice(&filtered).to_vec()
    }

    /// Keys of the records on the current page
    #[must_use]
    pub fn visible_keys(&self) -> Vec<R::Key> {
        self.page().into_iter().map(Record::key).collect()
    }

    /// Index of the first row of the current page within the filtered list
    #[must_use]
    pub fn page_offset(&self) -> usize {
        self.pager.window(self.filtered_len()).start
    }

    /// Current query
    #[must_use]
    pub const fn query(&self) -> &SearchQuery<R::Field> {
        &self.query
    }

    /// Apply a new query and clamp the page
    pub fn set_query(&mut self, query: SearchQuery<R::Field>) {
        self.query = query;
        self.clamp();
    }

    /// Pager state
    #[must_use]
    pub const fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Change the page size and clamp the page
    ///
    /// # Errors
    ///
    /// Returns a validation error when `page_size` is zero.
    pub fn set_page_size(&mut self, page_size: usize) -> crate::Result<()> {
        let total = self.filtered_len();
        self.pager.set_page_size(page_size, total)
    }

    /// Move to a page, clamped to the valid range
    pub fn go_to_page(&mut self, page: usize) {
        let total = self.filtered_len();
        self.pager.go_to(page, total);
    }

    /// Selected keys
    #[must_use]
    pub const fn selection(&self) -> &Selection<R::Key> {
        &self.selection
    }

    /// Toggle one row
    pub fn toggle_selected(&mut self, key: R::Key) -> bool {
        self.selection.toggle(key)
    }

    /// Select or clear every row on the current page
    pub fn toggle_all_visible(&mut self) {
        let visible = self.visible_keys();
        self.selection.toggle_all(visible);
    }

    /// Replace the selection with exactly these keys
    pub fn select_only<I: IntoIterator<Item = R::Key>>(&mut self, keys: I) {
        self.selection.replace(keys);
    }

    /// Clear the selection
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Record with the given key
    #[must_use]
    pub fn find(&self, key: &R::Key) -> Option<&R> {
        self.records.iter().find(|record| &record.key() == key)
    }

    /// Apply an in-place change to the record with the given key
    pub fn update<F: FnOnce(&mut R)>(&mut self, key: &R::Key, change: F) -> bool {
        match self.records.iter_mut().find(|record| &record.key() == key) {
            Some(record) => {
                change(record);
                true
            }
            None => false,
        }
    }

    /// Remove records by key, deselecting them; returns how many were removed
    pub fn remove_keys(&mut self, keys: &[R::Key]) -> usize {
        let before = self.records.len();
        self.records.retain(|record| !keys.contains(&record.key()));
        self.selection.retain(|key| !keys.contains(key));
        self.clamp();
        before - self.records.len()
    }

    fn clamp(&mut self) {
        let total = self.filtered_len();
        self.pager.clamp(total);
    }
}
