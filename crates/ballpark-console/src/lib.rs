//! Terminal admin console for the Ballpark fan community
//!
//! The management screens in [`screens`] are headless controllers: they load a
//! resource through [`ballpark_client::AdminApi`], keep search, paging and
//! selection state in a [`ballpark_core::ListState`], ask for confirmation through
//! a [`dialog::Dialog`] and render themselves as plain text. The
//! `ballpark-admin` binary drives them from the command line.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::return_self_not_must_use
)]

pub mod cli;
pub mod commands;
pub mod components;
pub mod dialog;
pub mod error;
pub mod screens;
pub mod state;

pub use dialog::{Dialog, ScriptedDialog, TerminalDialog};
pub use error::{ConsoleError, Result};
pub use screens::{
    CommentsScreen, CommunityScreen, InquiriesScreen, Outcome, Screen, UsersScreen,
};
pub use state::AppState;
