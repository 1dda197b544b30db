//! The lookup state machine.
//!
//! A [`LookupController`] follows one identifier at a time. Observing a new identifier moves the
//! view state to [`LookupViewState::Pending`] and hands back a [`LookupRequest`]; whoever runs
//! the request reports the outcome through [`LookupController::resolve`]. Each request carries a
//! [`Ticket`] so that an outcome arriving after the identifier has changed is dropped instead of
//! overwriting the newer state.

use log::{debug, error, info, trace, warn};
use serde::Serialize;

use crate::{
    api::Client,
    normalize::{normalize, DisplayBookRecord},
    payload::ApiResponse,
    Endpoint, Error,
};

/// Message used when the service does not say why a lookup failed.
pub const BOOK_NOT_FOUND: &str = "Book not found";

/// What the renderer gets to see.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LookupViewState {
    /// A request is in flight.
    Pending,
    /// The lookup failed, `message` is meant for the user.
    Failed {
        /// Short description of the failure.
        message: String,
    },
    /// The record was found.
    Succeeded {
        /// The normalized record.
        record: DisplayBookRecord,
    },
}

impl LookupViewState {
    /// Whether the lookup is finished, either way.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    fn failed<S: Into<String>>(message: S) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }
}

/// Tags a request with the generation of the controller that issued it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// A request the controller wants executed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupRequest {
    /// Must be handed back with the outcome.
    pub ticket: Ticket,
    /// The identifier being looked up.
    pub identifier: String,
    /// URL to `GET`.
    pub url: String,
}

/// Owns the lookup lifecycle for the current identifier.
#[derive(Debug, Default)]
pub struct LookupController {
    endpoint: Endpoint,
    generation: u64,
    identifier: Option<String>,
    state: Option<LookupViewState>,
}

impl LookupController {
    /// Creates a controller requesting records from `endpoint`.
    #[must_use]
    pub const fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            generation: 0,
            identifier: None,
            state: None,
        }
    }

    /// The current view state, `None` until the first identifier is observed.
    #[must_use]
    pub const fn state(&self) -> Option<&LookupViewState> {
        self.state.as_ref()
    }

    /// Consumes the controller returning the current view state.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // can't be const
    pub fn into_state(self) -> Option<LookupViewState> {
        self.state
    }

    /// The identifier the current state belongs to.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Follows `identifier` with surrounding whitespace trimmed.
    ///
    /// Returns the request to run when the identifier is non-empty and differs from the current
    /// one; the state is then [`LookupViewState::Pending`] and any request still in flight is
    /// superseded. An empty identifier leaves the state as it is.
    pub fn observe(&mut self, identifier: &str) -> Option<LookupRequest> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            trace!("No identifier given - keeping the current state");
            return None;
        }

        if self.identifier.as_deref() == Some(identifier) {
            trace!("Identifier '{identifier}' is already being followed");
            return None;
        }

        Some(self.start(identifier.to_owned()))
    }

    /// Starts the lookup for the current identifier again.
    ///
    /// Returns `None` when no identifier has been observed yet.
    pub fn refresh(&mut self) -> Option<LookupRequest> {
        let identifier = self.identifier.take()?;
        Some(self.start(identifier))
    }

    fn start(&mut self, identifier: String) -> LookupRequest {
        self.generation += 1;
        let ticket = Ticket(self.generation);
        let url = self.endpoint.book_url(&identifier);

        info!("Looking up '{identifier}'");
        self.identifier = Some(identifier.clone());
        self.state = Some(LookupViewState::Pending);

        LookupRequest {
            ticket,
            identifier,
            url,
        }
    }

    /// Applies the outcome of the request tagged with `ticket`.
    ///
    /// Returns `false`, leaving the state untouched, when the ticket belongs to a superseded
    /// request.
    pub fn resolve(&mut self, ticket: Ticket, outcome: Result<ApiResponse, Error>) -> bool {
        if ticket != Ticket(self.generation) {
            debug!("Discarding stale response for request {ticket:?}");
            return false;
        }

        let identifier = self.identifier.as_deref().unwrap_or_default();
        let state = match outcome {
            Err(err) => {
                error!("Lookup of '{identifier}' failed: {err}");
                LookupViewState::failed(err.to_string())
            }
            Ok(resp) if !resp.is_success() => {
                let message = resp.message().unwrap_or(BOOK_NOT_FOUND).to_owned();
                warn!("Lookup of '{identifier}' was rejected: {message}");
                LookupViewState::failed(message)
            }
            Ok(resp) => match resp.into_data() {
                Some(payload) => {
                    trace!("Lookup of '{identifier}' succeeded");
                    LookupViewState::Succeeded {
                        record: normalize(&payload),
                    }
                }
                None => {
                    warn!("Lookup of '{identifier}' succeeded without a record");
                    LookupViewState::failed(BOOK_NOT_FOUND)
                }
            },
        };

        self.state = Some(state);
        true
    }

    /// Observes `identifier` and runs the request with `C` straight away.
    ///
    /// Returns the resulting state, or the unchanged state when no request was needed.
    pub fn lookup<C: Client>(&mut self, identifier: &str) -> Option<&LookupViewState> {
        if let Some(request) = self.observe(identifier) {
            let outcome = fetch::<C>(&request);
            self.resolve(request.ticket, outcome);
        }
        self.state()
    }
}

/// Runs `request` with a new `C` client.
///
/// # Errors
///
/// See [`Client::get_json`].
pub fn fetch<C: Client>(request: &LookupRequest) -> Result<ApiResponse, Error> {
    trace!("GET {}", request.url);
    C::default().get_json(&request.url)
}
