use std::io;

use crate::{app, render::Renderer};

use isbn_lookup::{fetch, isbn, Endpoint, HttpClient, LookupController, LookupViewState};

use clap::Subcommand;
use eyre::eyre;
use log::trace;

#[derive(Subcommand)]
#[non_exhaustive]
pub enum Commands {
    /// Look up a single ISBN and print the book record
    #[clap(arg_required_else_help = true)]
    Get {
        /// The ISBN to look up, it is sent to the book service as is
        isbn: String,
    },

    /// Read ISBNs from stdin, one per line, and print each record as it arrives
    ///
    /// A new line replaces the lookup in progress, a lookup that finishes after it has been
    /// replaced is not shown. Entering the current ISBN again retries it and empty lines are
    /// ignored. Stops once stdin is closed and the last lookup has finished.
    Watch,

    /// Check the checksum of an ISBN-10 or ISBN-13 without contacting the book service
    #[clap(arg_required_else_help = true)]
    Check {
        /// The ISBN to check, hyphens and spaces are ignored
        isbn: String,
    },
}

/// Whether a command ended the way the user hoped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl From<&LookupViewState> for Outcome {
    fn from(state: &LookupViewState) -> Self {
        match state {
            LookupViewState::Failed { .. } => Self::Failure,
            _ => Self::Success,
        }
    }
}

impl Commands {
    pub fn execute(self, endpoint: Endpoint, renderer: &Renderer) -> eyre::Result<Outcome> {
        match self {
            Commands::Get { isbn } => {
                let mut controller = LookupController::new(endpoint);
                let request = controller
                    .observe(&isbn)
                    .ok_or_else(|| eyre!("An ISBN is required, got '{isbn}'"))?;

                if !renderer.json() {
                    renderer.render(&request.identifier, &LookupViewState::Pending)?;
                }

                let outcome = fetch::<HttpClient>(&request);
                controller.resolve(request.ticket, outcome);

                let state = controller.into_state().ok_or_else(|| {
                    eyre!("Internal error: a resolved lookup should always have a state")
                })?;
                renderer.render(&request.identifier, &state)?;
                Ok(Outcome::from(&state))
            }
            Commands::Watch => {
                trace!("Watching stdin for ISBNs..");
                let controller = app::watch::<HttpClient, _>(
                    LookupController::new(endpoint),
                    renderer,
                    io::stdin(),
                )?;
                Ok(controller.state().map_or(Outcome::Success, Outcome::from))
            }
            Commands::Check { isbn } => {
                let normalized = isbn::normalize(&isbn);
                let kind = isbn::validate(&isbn);

                if renderer.json() {
                    let value = serde_json::json!({
                        "isbn": normalized,
                        "valid": kind.is_some(),
                        "kind": kind.as_ref().map(ToString::to_string),
                    });
                    renderer.line(&value.to_string());
                } else if let Some(kind) = kind {
                    renderer.line(&format!("'{normalized}' is a valid {kind}"));
                } else {
                    renderer.line(&format!("'{isbn}' is not a valid ISBN-10 or ISBN-13"));
                }

                Ok(kind.map_or(Outcome::Failure, |_| Outcome::Success))
            }
        }
    }
}
