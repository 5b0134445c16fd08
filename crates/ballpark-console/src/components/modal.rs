//! Detail overlay with optional confirm and cancel actions

use ballpark_client::Endpoints;
use ballpark_core::HtmlFragment;
use ballpark_core::utils::{AttachmentKind, classify_attachment, display_file_name};
use std::fmt::Write as _;
use unicode_width::UnicodeWidthStr;

/// Attachment rendered under the detail content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attachment {
    /// Shown inline
    Image {
        /// Image URL
        url: String,
        /// Shown when the image fails to load
        fallback: String,
    },
    /// Offered as a download link
    Download {
        /// Download URL
        url: String,
        /// Human file name
        file_name: String,
    },
}

/// Which resource family an attachment belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentSource {
    /// Community post upload
    Community,
    /// Inquiry upload
    Inquiry,
}

impl Attachment {
    /// Derive the attachment from a stored upload path
    pub fn from_path(
        path: &str,
        source: AttachmentSource,
        endpoints: &Endpoints,
        fallback: &str,
    ) -> Self {
        match classify_attachment(path) {
            AttachmentKind::Image(_) => Self::Image {
                url: match source {
                    AttachmentSource::Community => endpoints.post_image(path),
                    AttachmentSource::Inquiry => endpoints.inquiry_image(path),
                },
                fallback: fallback.to_string(),
            },
            AttachmentKind::File => Self::Download {
                url: match source {
                    AttachmentSource::Community => endpoints.post_file(path),
                    AttachmentSource::Inquiry => endpoints.inquiry_file(path),
                },
                file_name: display_file_name(path),
            },
        }
    }

    fn render(&self) -> String {
        match self {
            Self::Image { url, fallback } => format!("Image: {url} (fallback {fallback})"),
            Self::Download { url, file_name } => format!("Download: {file_name} <{url}>"),
        }
    }
}

/// Body of a detail modal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailView {
    /// Labelled header fields, in display order
    pub fields: Vec<(String, String)>,
    /// Trusted HTML body
    pub content: Option<HtmlFragment>,
    /// Optional attachment
    pub attachment: Option<Attachment>,
}

impl DetailView {
    /// Add a labelled field
    #[must_use]
    pub fn field(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((label.into(), value.into()));
        self
    }

    /// Value of a field by label
    pub fn value(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }
}

/// Overlay showing one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal<K> {
    key: K,
    title: String,
    body: DetailView,
    confirm_label: Option<String>,
    cancel_label: String,
}

impl<K> Modal<K> {
    /// Modal for the record `key` with only a close action
    pub fn new(key: K, title: impl Into<String>, body: DetailView) -> Self {
        Self {
            key,
            title: title.into(),
            body,
            confirm_label: None,
            cancel_label: "Close".to_string(),
        }
    }

    /// Add a confirm action
    #[must_use]
    pub fn with_confirm(mut self, label: impl Into<String>) -> Self {
        self.confirm_label = Some(label.into());
        self
    }

    /// Record shown
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Title line
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Body
    pub const fn body(&self) -> &DetailView {
        &self.body
    }

    /// Confirm button label, if the modal has one
    pub fn confirm_label(&self) -> Option<&str> {
        self.confirm_label.as_deref()
    }

    /// Plain-text rendering
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "== {} ==", self.title);

        let width = self
            .body
            .fields
            .iter()
            .map(|(label, _)| label.width())
            .max()
            .unwrap_or(0);
        for (label, value) in &self.body.fields {
            let pad = width.saturating_sub(label.width());
            let _ = writeln!(out, "{label}{}  {value}", " ".repeat(pad));
        }

        if let Some(content) = &self.body.content {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", content.to_plain_text());
        }
        if let Some(attachment) = &self.body.attachment {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", attachment.render());
        }

        let _ = writeln!(out);
        match &self.confirm_label {
            Some(confirm) => {
                let _ = writeln!(out, "[{confirm}] [{}]", self.cancel_label);
            }
            None => {
                let _ = writeln!(out, "[{}]", self.cancel_label);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn endpoints() -> Endpoints {
        Endpoints::new("http://localhost:8090")
    }

    #[rstest]
    #[case(
        "/uploads/3_photo.png",
        AttachmentSource::Community,
        Attachment::Image {
            url: "http://localhost:8090/api/community/images/3_photo.png".to_string(),
            fallback: "/fallback.png".to_string(),
        }
    )]
    #[case(
        "/uploads/3_Lineup.JPEG",
        AttachmentSource::Inquiry,
        Attachment::Image {
            url: "http://localhost:8090/api/question/images/3_Lineup.JPEG".to_string(),
            fallback: "/fallback.png".to_string(),
        }
    )]
    #[case(
        "/uploads/8_schedule.pdf",
        AttachmentSource::Community,
        Attachment::Download {
            url: "http://localhost:8090/api/community/downloadFile/schedule.pdf".to_string(),
            file_name: "schedule.pdf".to_string(),
        }
    )]
    #[case(
        "/uploads/9_refund form.hwp",
        AttachmentSource::Inquiry,
        Attachment::Download {
            url: "http://localhost:8090/api/question/files/refund%20form.hwp".to_string(),
            file_name: "refund form.hwp".to_string(),
        }
    )]
    fn test_attachment_from_path(
        #[case] path: &str,
        #[case] source: AttachmentSource,
        #[case] expected: Attachment,
    ) {
        assert_eq!(
            Attachment::from_path(path, source, &endpoints(), "/fallback.png"),
            expected
        );
    }

    #[test]
    fn test_render_modal() {
        let body = DetailView::default()
            .field("Title", "Opening day")
            .field("Views", "12");
        let modal = Modal::new(5_i64, "Post #5", DetailView {
            content: Some(HtmlFragment::from_trusted("<p>See you <b>there</b></p>")),
            ..body
        })
        .with_confirm("Delete");

        assert_eq!(
            modal.render(),
            "== Post #5 ==\nTitle  Opening day\nViews  12\n\nSee you there\n\n[Delete] [Close]\n"
        );
        assert_eq!(modal.body().value("Views"), Some("12"));
        assert_eq!(modal.confirm_label(), Some("Delete"));
    }

    #[test]
    fn test_modal_without_confirm() {
        let modal = Modal::new(1_i64, "User", DetailView::default());
        assert!(modal.render().ends_with("[Close]\n"));
        assert_eq!(modal.confirm_label(), None);
    }
}
