//! Reusable text UI primitives

pub mod modal;
pub mod pagination;
pub mod reply_draft;
pub mod search_bar;
pub mod status;
pub mod table;

pub use modal::{Attachment, AttachmentSource, DetailView, Modal};
pub use reply_draft::ReplyDraft;
pub use search_bar::SearchBar;
pub use status::StatusMessage;
pub use table::{Column, Table};
