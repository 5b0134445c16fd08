//! User management: listing with activity counts, suspension and release

use super::{INVALID_ID_NOTICE, ListView, Outcome, Screen, report_failure};
use crate::components::{DetailView, Modal, Table};
use crate::dialog::Dialog;
use crate::state::AppState;
use async_trait::async_trait;
use ballpark_client::{ClientResult, fan_out};
use ballpark_core::types::{SuspensionUpdate, User, UserNumber, UserStats};
use ballpark_core::utils::{
    consent_label, format_optional_date, gender_label, or_placeholder, sort_newest_first,
    suspension_label,
};
use std::sync::Arc;
use tracing::{info, warn};

/// User list with a detail modal
#[derive(Debug)]
pub struct UsersScreen {
    view: ListView<User>,
    modal: Option<Modal<UserNumber>>,
}

impl UsersScreen {
    /// Screen in the loading state
    ///
    /// # Errors
    ///
    /// Returns an error when the configured page size is zero.
    pub fn new(app: AppState) -> crate::Result<Self> {
        Ok(Self {
            view: ListView::new(app)?,
            modal: None,
        })
    }

    /// Open modal, if any
    pub const fn modal(&self) -> Option<&Modal<UserNumber>> {
        self.modal.as_ref()
    }

    /// Close the modal
    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Open the detail modal from the loaded list
    pub fn open_detail(&mut self, number: UserNumber, dialog: &mut dyn Dialog) -> Outcome {
        match self.view.list().find(&number) {
            Some(user) => {
                self.modal = Some(self.detail_for(user));
                Outcome::Done
            }
            None => {
                dialog.notify(&format!("User {number} is not in the list."));
                Outcome::Failed
            }
        }
    }

    fn display_name(&self, user: &User) -> String {
        let none = &self.view.app().display().none;
        or_placeholder(user.user_name.as_deref(), none)
    }

    fn detail_for(&self, user: &User) -> Modal<UserNumber> {
        let display = self.view.app().display();
        let none = display.none.as_str();
        let team = user
            .user_favorite_team
            .as_ref()
            .and_then(|board| self.view.app().boards().lookup(board))
            .unwrap_or(none);

        let body = DetailView::default()
            .field("Name", self.display_name(user))
            .field("Login id", or_placeholder(user.user_id.as_deref(), none))
            .field("Email", or_placeholder(user.user_email.as_deref(), none))
            .field("Nickname", or_placeholder(user.user_nickname.as_deref(), none))
            .field("Birth date", format_optional_date(user.user_birth_day.as_deref()))
            .field("Gender", gender_label(user.user_gender))
            .field("Favourite team", team)
            .field("Joined", format_optional_date(user.user_create_date.as_deref()))
            .field("Updated", format_optional_date(user.user_update_date.as_deref()))
            .field("Signed up via", or_placeholder(user.user_social_login_sep.as_deref(), none))
            .field("Service terms", consent_label(user.user_svc_use_pcy_agmt_yn.as_deref()))
            .field("Privacy terms", consent_label(user.user_ps_info_proc_agmt_yn.as_deref()))
            .field("Status", suspension_label(user.is_suspended()))
            .field("Posts", user.post_count.to_string())
            .field("Comments", user.comment_count.to_string());

        let confirm = if user.is_suspended() { "Release" } else { "Suspend" };
        Modal::new(user.user_unique_number, self.display_name(user), body).with_confirm(confirm)
    }

    fn refresh_modal(&mut self, number: UserNumber) {
        if self.modal.as_ref().is_some_and(|m| *m.key() == number) {
            if let Some(user) = self.view.list().find(&number) {
                self.modal = Some(self.detail_for(user));
            }
        }
    }

    fn loaded_user(&self, number: UserNumber, dialog: &mut dyn Dialog) -> Option<User> {
        if number == 0 {
            dialog.notify(INVALID_ID_NOTICE);
            return None;
        }
        let user = self.view.list().find(&number).cloned();
        if user.is_none() {
            dialog.notify(&format!("User {number} is not in the list."));
        }
        user
    }

    /// Flip the suspension flag of a user
    pub async fn toggle_suspension(&mut self, number: UserNumber, dialog: &mut dyn Dialog) -> Outcome {
        let Some(user) = self.loaded_user(number, dialog) else {
            return Outcome::Failed;
        };
        let suspend = !user.is_suspended();
        let name = self.display_name(&user);
        let prompt = if suspend {
            format!("Suspend {name}?")
        } else {
            format!("Lift the suspension of {name}?")
        };
        if !dialog.confirm(&prompt) {
            return Outcome::Cancelled;
        }

        let update = SuspensionUpdate {
            user_unique_number: number,
            user_stop: suspend,
        };
        if let Err(e) = self.view.app().api().update_user_suspension(update).await {
            return report_failure(dialog, "update-user", &number, &e);
        }

        info!(user = number, suspended = suspend, "suspension updated");
        self.view
            .list_mut()
            .update(&number, |u| u.set_suspended(suspend));
        self.refresh_modal(number);
        dialog.notify(if suspend {
            "The user has been suspended."
        } else {
            "The user has been reactivated."
        });

        self.resync().await;
        self.refresh_modal(number);
        Outcome::Done
    }

    /// Lift a suspension through the release endpoint and close the modal
    pub async fn release(&mut self, number: UserNumber, dialog: &mut dyn Dialog) -> Outcome {
        let Some(user) = self.loaded_user(number, dialog) else {
            return Outcome::Failed;
        };
        let name = self.display_name(&user);
        if !dialog.confirm(&format!("Release the suspension of {name}?")) {
            return Outcome::Cancelled;
        }

        if let Err(e) = self.view.app().api().release_user(&user).await {
            return report_failure(dialog, "release-user", &number, &e);
        }

        info!(user = number, "suspension released");
        self.view
            .list_mut()
            .update(&number, |u| u.set_suspended(false));
        if self.modal.as_ref().is_some_and(|m| *m.key() == number) {
            self.modal = None;
        }
        dialog.notify("The suspension has been released.");

        self.resync().await;
        Outcome::Done
    }

    /// Run the modal's confirm action: release a suspended user, suspend otherwise
    pub async fn confirm_modal(&mut self, dialog: &mut dyn Dialog) -> Outcome {
        let Some(number) = self.modal.as_ref().map(|m| *m.key()) else {
            return Outcome::Cancelled;
        };
        let suspended = self
            .view
            .list()
            .find(&number)
            .is_some_and(User::is_suspended);
        if suspended {
            self.release(number, dialog).await
        } else {
            self.toggle_suspension(number, dialog).await
        }
    }
}

#[async_trait]
impl Screen for UsersScreen {
    type Row = User;

    const TITLE: &'static str = "User management";

    fn view(&self) -> &ListView<User> {
        &self.view
    }

    fn view_mut(&mut self) -> &mut ListView<User> {
        &mut self.view
    }

    /// Users plus one stats request per user, joined before display
    ///
    /// A failed stats request shows zero counts for that user.
    async fn fetch(&self) -> ClientResult<Vec<User>> {
        let api = Arc::clone(self.view.app().api());
        let mut users = api.list_users().await?;

        let numbers: Vec<UserNumber> = users.iter().map(|u| u.user_unique_number).collect();
        let stats = fan_out(numbers, self.view.app().max_concurrency(), |number| {
            let api = Arc::clone(&api);
            async move { api.user_stats(number).await }
        })
        .await;

        for (user, (number, result)) in users.iter_mut().zip(stats) {
            match result {
                Ok(stats) => user.apply_stats(stats),
                Err(e) => {
                    warn!(user = number, error = %e, "stats unavailable, showing zero counts");
                    user.apply_stats(UserStats::default());
                }
            }
        }
        Ok(users)
    }

    fn table(&self) -> Table<'_, User> {
        let none = self.view.app().display().none.as_str();
        Table::new()
            .numbered()
            .column("Name", move |u: &User| or_placeholder(u.user_name.as_deref(), none))
            .column("Login id", move |u: &User| or_placeholder(u.user_id.as_deref(), none))
            .column("Email", move |u: &User| or_placeholder(u.user_email.as_deref(), none))
            .column("Joined", |u: &User| format_optional_date(u.user_create_date.as_deref()))
            .column("Posts", |u: &User| u.post_count.to_string())
            .column("Comments", |u: &User| u.comment_count.to_string())
            .column("Signed up via", move |u: &User| {
                or_placeholder(u.user_social_login_sep.as_deref(), none)
            })
            .column("Status", |u: &User| suspension_label(u.is_suspended()).to_string())
    }

    fn arrange(rows: &mut [User]) {
        sort_newest_first(rows, |u| u.user_create_date.as_deref());
    }
}
