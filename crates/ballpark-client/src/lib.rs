//! REST client for the Ballpark community admin API
//!
//! The [`AdminApi`] trait is the seam between the management screens and the
//! backend. [`HttpAdminApi`] talks to the real service over reqwest with cookie
//! credentials; [`MockAdminApi`] keeps everything in memory for tests. Bulk actions
//! go through [`fanout`], which caps concurrency and reports per-key outcomes.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::return_self_not_must_use
)]

pub mod api;
pub mod endpoints;
pub mod error;
pub mod fanout;
pub mod http;
pub mod mock;

pub use api::AdminApi;
pub use endpoints::Endpoints;
pub use error::{ClientError, ClientResult};
pub use fanout::{BulkOutcome, fan_out, fan_out_keys};
pub use http::HttpAdminApi;
pub use mock::{ApiCall, MockAdminApi};
