//! Inquiry handling: answers and deletion

use super::{
    INVALID_ID_NOTICE, ListView, Outcome, SELECT_FIRST_NOTICE, Screen, reject_locally,
    report_failure, settle_bulk_delete,
};
use crate::components::{Attachment, AttachmentSource, DetailView, Modal, ReplyDraft, Table};
use crate::dialog::Dialog;
use crate::state::AppState;
use async_trait::async_trait;
use ballpark_client::{ClientResult, fan_out_keys};
use ballpark_core::types::{Inquiry, QuestionNum};
use ballpark_core::utils::{format_date, format_date_time, or_placeholder};
use std::sync::Arc;
use tracing::info;

const fn answer_label(answered: bool) -> &'static str {
    if answered { "Answered" } else { "Unanswered" }
}

/// Inquiry list with a detail modal that holds an answer draft
#[derive(Debug)]
pub struct InquiriesScreen {
    view: ListView<Inquiry>,
    modal: Option<Modal<QuestionNum>>,
    draft: Option<ReplyDraft<QuestionNum>>,
}

impl InquiriesScreen {
    /// Screen in the loading state
    ///
    /// # Errors
    ///
    /// Returns an error when the configured page size is zero.
    pub fn new(app: AppState) -> crate::Result<Self> {
        Ok(Self {
            view: ListView::new(app)?,
            modal: None,
            draft: None,
        })
    }

    /// Open modal, if any
    pub const fn modal(&self) -> Option<&Modal<QuestionNum>> {
        self.modal.as_ref()
    }

    /// Answer being written in the open modal
    pub const fn draft(&self) -> Option<&ReplyDraft<QuestionNum>> {
        self.draft.as_ref()
    }

    /// Replace the answer text; returns `false` when no inquiry is open
    pub fn set_answer(&mut self, text: impl Into<String>) -> bool {
        match self.draft.as_mut() {
            Some(draft) => {
                draft.set_text(text);
                true
            }
            None => false,
        }
    }

    /// Close the modal and discard the draft
    pub fn close_modal(&mut self) {
        self.modal = None;
        self.draft = None;
    }

    /// Fetch the inquiry by id and open it with an empty answer draft
    pub async fn open_detail(&mut self, question: QuestionNum, dialog: &mut dyn Dialog) -> Outcome {
        if question == 0 {
            dialog.notify(INVALID_ID_NOTICE);
            return Outcome::Failed;
        }
        let fetched = self.view.app().api().inquiry_detail(question).await;
        match fetched {
            Ok(inquiry) => {
                self.modal = Some(self.detail_for(&inquiry));
                self.draft = Some(ReplyDraft::new(question));
                Outcome::Done
            }
            Err(e) => report_failure(dialog, "inquiry-detail", &question, &e),
        }
    }

    fn detail_for(&self, inquiry: &Inquiry) -> Modal<QuestionNum> {
        let app = self.view.app();
        let display = app.display();

        let mut body = DetailView::default()
            .field("Author", or_placeholder(inquiry.question_id.as_deref(), &display.no_author))
            .field(
                "Date",
                format_date_time(inquiry.question_date.as_deref().unwrap_or_default()),
            )
            .field("Views", inquiry.question_post_view.to_string())
            .field("Status", answer_label(inquiry.is_answered()))
            .field(
                "Answer",
                or_placeholder(inquiry.question_answer.as_deref(), &display.none),
            );
        body.content = inquiry.question_content.clone();
        body.attachment = inquiry
            .question_img_path
            .as_deref()
            .filter(|path| !path.trim().is_empty())
            .map(|path| {
                Attachment::from_path(
                    path,
                    AttachmentSource::Inquiry,
                    &app.endpoints(),
                    &display.fallback_image,
                )
            });

        let title = or_placeholder(inquiry.question_title.as_deref(), &display.no_title);
        Modal::new(inquiry.question_num, title, body).with_confirm("Submit answer")
    }

    fn close_modal_for(&mut self, ids: &[QuestionNum]) {
        if self.modal.as_ref().is_some_and(|m| ids.contains(m.key())) {
            self.close_modal();
        }
    }

    /// Send the draft as the inquiry's answer
    ///
    /// A blank draft is rejected before any request. On success the local row
    /// carries the submitted text and the modal closes; on failure the draft is
    /// restored.
    pub async fn submit_answer(&mut self, dialog: &mut dyn Dialog) -> Outcome {
        let Some(draft) = self.draft.as_mut() else {
            dialog.notify("Open an inquiry before answering.");
            return Outcome::Failed;
        };
        if draft.is_blank() {
            dialog.notify("Enter an answer before submitting.");
            return Outcome::Failed;
        }
        let question = *draft.target();
        if !dialog.confirm(&format!("Send this answer to inquiry {question}?")) {
            return Outcome::Cancelled;
        }
        let (question, answer) = draft.submit_with(|id, text| (*id, text));

        let sent = self.view.app().api().answer_inquiry(question, &answer).await;
        if let Err(e) = sent {
            if let Some(draft) = self.draft.as_mut() {
                draft.set_text(answer);
            }
            return report_failure(dialog, "answer-inquiry", &question, &e);
        }

        info!(question, "inquiry answered");
        self.view
            .list_mut()
            .update(&question, |inquiry| inquiry.question_answer = Some(answer));
        self.close_modal();
        dialog.notify("The answer has been saved.");

        self.resync().await;
        Outcome::Done
    }

    /// Run the modal's confirm action
    pub async fn confirm_modal(&mut self, dialog: &mut dyn Dialog) -> Outcome {
        self.submit_answer(dialog).await
    }

    /// Delete one inquiry
    pub async fn delete(&mut self, question: QuestionNum, dialog: &mut dyn Dialog) -> Outcome {
        if question == 0 {
            dialog.notify(INVALID_ID_NOTICE);
            return Outcome::Failed;
        }
        if !dialog.confirm(&format!("Delete inquiry {question}?")) {
            return Outcome::Cancelled;
        }

        if let Err(e) = self.view.app().api().delete_inquiry(question).await {
            return report_failure(dialog, "delete-inquiry", &question, &e);
        }

        info!(question, "inquiry deleted");
        self.view.list_mut().remove_keys(&[question]);
        self.close_modal_for(&[question]);
        dialog.notify("The inquiry has been deleted.");

        self.resync().await;
        Outcome::Done
    }

    /// Delete every selected inquiry
    pub async fn delete_selected(&mut self, dialog: &mut dyn Dialog) -> Outcome {
        let selected = self.view.list().selection().to_vec();
        if selected.is_empty() {
            dialog.notify(SELECT_FIRST_NOTICE);
            return Outcome::Cancelled;
        }
        if !dialog.confirm(&format!("Delete {} selected inquiries?", selected.len())) {
            return Outcome::Cancelled;
        }

        let (valid, invalid): (Vec<QuestionNum>, Vec<QuestionNum>) =
            selected.into_iter().partition(|id| *id != 0);

        let api = Arc::clone(self.view.app().api());
        let mut outcome = fan_out_keys(valid, self.view.app().max_concurrency(), |question| {
            let api = Arc::clone(&api);
            async move { api.delete_inquiry(question).await }
        })
        .await;
        reject_locally(&mut outcome, invalid, "inquiry id");

        self.close_modal_for(&outcome.succeeded);
        let result = settle_bulk_delete(self.view.list_mut(), &outcome, dialog, "inquiries");
        if !outcome.succeeded.is_empty() {
            self.resync().await;
        }
        result
    }
}

#[async_trait]
impl Screen for InquiriesScreen {
    type Row = Inquiry;

    const TITLE: &'static str = "Inquiry management";

    fn view(&self) -> &ListView<Inquiry> {
        &self.view
    }

    fn view_mut(&mut self) -> &mut ListView<Inquiry> {
        &mut self.view
    }

    async fn fetch(&self) -> ClientResult<Vec<Inquiry>> {
        self.view.app().api().list_inquiries().await
    }

    fn table(&self) -> Table<'_, Inquiry> {
        let display = self.view.app().display();
        Table::new()
            .with_checkbox()
            .numbered()
            .column("Title", move |i: &Inquiry| {
                or_placeholder(i.question_title.as_deref(), &display.no_title)
            })
            .column("Author", move |i: &Inquiry| {
                or_placeholder(i.question_id.as_deref(), &display.no_author)
            })
            .column("Date", |i: &Inquiry| {
                format_date(i.question_date.as_deref().unwrap_or_default())
            })
            .column("Views", |i: &Inquiry| i.question_post_view.to_string())
            .column("Status", |i: &Inquiry| answer_label(i.is_answered()).to_string())
            .column("Id", |i: &Inquiry| i.question_num.to_string())
    }
}
