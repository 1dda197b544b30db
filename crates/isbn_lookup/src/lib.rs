#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]

//! # isbn_lookup
//!
//! isbn_lookup fetches book records by ISBN from the book service and turns them into something
//! that can be shown to a user without further checks.
//!
//! The [`LookupController`] drives a lookup from [`LookupViewState::Pending`] to either
//! [`LookupViewState::Failed`] or [`LookupViewState::Succeeded`], while the
//! [`normalize`](normalize::normalize) function fills in placeholders for everything the service
//! did not return.

mod api;
mod controller;
mod endpoint;
mod error;
pub mod isbn;
pub mod normalize;
pub mod payload;

pub use api::Client;
pub use controller::{
    fetch, LookupController, LookupRequest, LookupViewState, Ticket, BOOK_NOT_FOUND,
};
pub use endpoint::{Endpoint, Environment};
pub use error::{Error, ErrorKind};
pub use normalize::{DisplayBookRecord, Rating};

use log::trace;

/// The HTTP client used by [`lookup`].
pub type HttpClient = reqwest::blocking::Client;

/// Looks up `isbn` at `endpoint` using the default client.
///
/// Surrounding whitespace is trimmed, the identifier is otherwise forwarded unvalidated. Returns
/// `None` when `isbn` is blank, otherwise the final [`LookupViewState`], which is never
/// [`LookupViewState::Pending`].
#[inline]
#[must_use]
pub fn lookup(endpoint: Endpoint, isbn: &str) -> Option<LookupViewState> {
    trace!("Look up ISBN '{isbn}' at {}", endpoint.base());
    let mut controller = LookupController::new(endpoint);
    controller.lookup::<HttpClient>(isbn);
    controller.into_state()
}
