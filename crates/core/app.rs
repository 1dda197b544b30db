use std::{
    io::{self, BufRead, BufReader, Read},
    sync::mpsc::{self, Sender},
    thread,
};

use eyre::{eyre, Context};
use isbn_lookup::{
    fetch, payload::ApiResponse, Client, Error, LookupController, LookupRequest, LookupViewState,
    Ticket,
};
use log::{debug, trace};

use crate::render::Renderer;

enum Event {
    Identifier(String),
    Resolved(Ticket, Result<ApiResponse, Error>),
    InputClosed(Option<io::Error>),
}

/// Follows the identifiers read from `input`, one per line, until `input` is exhausted and no
/// request is left in flight.
///
/// Identifiers and request outcomes are funnelled through a single channel so the controller is
/// only ever touched from this loop. Returns the controller holding the last state.
pub fn watch<C, R>(
    mut controller: LookupController,
    renderer: &Renderer,
    input: R,
) -> eyre::Result<LookupController>
where
    C: Client + 'static,
    R: Read + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    spawn_reader(input, tx.clone());

    let mut in_flight = 0_usize;
    let mut reading = true;

    while reading || in_flight > 0 {
        let event = rx
            .recv()
            .map_err(|_| eyre!("Internal error: event channel closed while still in use"))?;

        match event {
            Event::Identifier(line) => {
                let request = if controller.identifier() == Some(line.trim()) {
                    trace!("Same ISBN entered again - retrying");
                    controller.refresh()
                } else {
                    controller.observe(&line)
                };

                if let Some(request) = request {
                    renderer.render(&request.identifier, &LookupViewState::Pending)?;
                    in_flight += 1;
                    spawn_request::<C>(request, tx.clone());
                }
            }
            Event::Resolved(ticket, outcome) => {
                in_flight -= 1;
                if !controller.resolve(ticket, outcome) {
                    continue;
                }
                let identifier = controller.identifier().unwrap_or_default();
                if let Some(state) = controller.state() {
                    renderer.render(identifier, state)?;
                }
            }
            Event::InputClosed(err) => {
                debug!("Input closed with {in_flight} lookup(s) in flight");
                reading = false;
                if let Some(err) = err {
                    return Err(err).wrap_err("Failed to read ISBNs from input");
                }
            }
        }
    }

    Ok(controller)
}

// Lines that are not valid UTF-8 are decoded lossily, any identifier is worth a lookup.
fn spawn_reader<R: Read + Send + 'static>(input: R, tx: Sender<Event>) {
    thread::spawn(move || {
        let mut reader = BufReader::new(input);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let event = match reader.read_until(b'\n', &mut buf) {
                Ok(0) => Event::InputClosed(None),
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    Event::Identifier(line.trim_end_matches(['\n', '\r']).to_owned())
                }
                Err(err) => Event::InputClosed(Some(err)),
            };
            let stop = matches!(event, Event::InputClosed(_));
            // the receiver only goes away once the watch loop has returned
            if tx.send(event).is_err() || stop {
                return;
            }
        }
    });
}

fn spawn_request<C: Client + 'static>(request: LookupRequest, tx: Sender<Event>) {
    thread::spawn(move || {
        let outcome = fetch::<C>(&request);
        tx.send(Event::Resolved(request.ticket, outcome)).ok();
    });
}
