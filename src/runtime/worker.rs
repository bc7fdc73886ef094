//! Per-session worker task.
//!
//! One tokio task owns the `Broadcaster` and drains an unbounded command
//! queue. Requests from every connection funnel into that queue, so they
//! are applied strictly in arrival order and never interleave.
//!
//! Each connection gets its own event channel; the worker routes every
//! outbound event to the channels it reaches.

use rustc_hash::FxHashMap;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, trace};

use super::directory::RoomTicket;
use crate::core::config::SessionConfig;
use crate::core::error::{Rejection, SessionError};
use crate::core::rng::SessionRng;
use crate::core::seat::{ConnectionId, SeatIndex};
use crate::sync::{Broadcaster, Command, Delivery, Inbound, Outbox, ServerEvent};

type EventSender = mpsc::UnboundedSender<ServerEvent>;

enum Request {
    Admit {
        connection: ConnectionId,
        events: EventSender,
        reply: oneshot::Sender<Result<SeatIndex, Rejection>>,
    },
    Command {
        from: ConnectionId,
        command: Command,
    },
    Release {
        connection: ConnectionId,
        reply: Option<oneshot::Sender<usize>>,
    },
}

/// Cloneable handle to a running session worker.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<Request>,
}

impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Request::Admit { connection, .. } => write!(f, "Admit({connection})"),
            Request::Command { from, command } => write!(f, "Command({from}, {})", command.name()),
            Request::Release { connection, .. } => write!(f, "Release({connection})"),
        }
    }
}

impl SessionHandle {
    /// Spawn a worker over a fresh session.
    ///
    /// Must be called from within a tokio runtime. The worker stops once
    /// every handle and connection has been dropped.
    #[must_use]
    pub fn spawn(config: SessionConfig, rng: SessionRng) -> Self {
        Self::spawn_with(Broadcaster::new(config, rng))
    }

    /// Spawn a worker over an existing broadcaster.
    #[must_use]
    pub fn spawn_with(broadcaster: Broadcaster) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(broadcaster, rx));
        Self { tx }
    }

    /// Ask for a seat.
    ///
    /// Always yields a `Connection` while the worker runs. A refused
    /// connection has no seat. When the room is full its stream holds
    /// `room-full` and then ends; an id that is already connected gets a
    /// closed stream and leaves the live connection untouched.
    pub async fn connect(&self, connection: ConnectionId) -> Result<Connection, SessionError> {
        let (events_tx, events) = mpsc::unbounded_channel();
        let (reply, seat) = oneshot::channel();
        self.tx
            .send(Request::Admit {
                connection,
                events: events_tx,
                reply,
            })
            .map_err(|_| SessionError::Closed)?;
        let admission = seat.await.map_err(|_| SessionError::Closed)?;

        Ok(Connection {
            id: connection,
            seat: admission.ok(),
            refusal: admission.err(),
            handle: self.clone(),
            events,
            released: admission.is_err(),
            ticket: None,
        })
    }

    /// Like `connect`, but a refused admission is an error.
    pub async fn connect_seated(&self, connection: ConnectionId) -> Result<Connection, SessionError> {
        let connection = self.connect(connection).await?;
        match connection.refusal {
            Some(rejection) => Err(SessionError::Rejected(rejection)),
            None => Ok(connection),
        }
    }

    fn send(&self, request: Request) -> Result<(), SessionError> {
        self.tx.send(request).map_err(|_| SessionError::Closed)
    }

    /// Whether the worker is still accepting requests.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.tx.is_closed()
    }
}

/// One participant's link to a session.
///
/// Dropping a seated connection releases its seat.
#[derive(Debug)]
pub struct Connection {
    id: ConnectionId,
    seat: Option<SeatIndex>,
    refusal: Option<Rejection>,
    handle: SessionHandle,
    events: mpsc::UnboundedReceiver<ServerEvent>,
    released: bool,
    ticket: Option<RoomTicket>,
}

impl Connection {
    /// Connection id.
    #[must_use]
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Seat, or `None` if admission was refused.
    #[must_use]
    pub fn seat(&self) -> Option<SeatIndex> {
        self.seat
    }

    /// Whether this connection holds a seat.
    #[must_use]
    pub fn is_seated(&self) -> bool {
        self.seat.is_some() && !self.released
    }

    /// Queue a command. Commands from unseated connections are ignored by
    /// the engine.
    pub fn send(&self, command: Command) -> Result<(), SessionError> {
        self.handle.send(Request::Command {
            from: self.id,
            command,
        })
    }

    /// Next event; `None` once the stream has ended.
    pub async fn recv(&mut self) -> Option<ServerEvent> {
        self.events.recv().await
    }

    /// Next event if one is already queued.
    pub fn try_recv(&mut self) -> Option<ServerEvent> {
        self.events.try_recv().ok()
    }

    /// Why admission was refused, if it was.
    #[must_use]
    pub fn refusal(&self) -> Option<Rejection> {
        self.refusal
    }

    /// Give up the seat. Returns how many participants remain.
    ///
    /// A refused connection never held a seat and gets its refusal back.
    pub async fn leave(mut self) -> Result<usize, SessionError> {
        if let Some(rejection) = self.refusal {
            return Err(SessionError::Rejected(rejection));
        }
        if self.released {
            return Err(SessionError::Closed);
        }
        self.released = true;
        let (reply, remaining) = oneshot::channel();
        self.handle.send(Request::Release {
            connection: self.id,
            reply: Some(reply),
        })?;
        remaining.await.map_err(|_| SessionError::Closed)
    }

    pub(crate) fn attach_ticket(&mut self, ticket: RoomTicket) {
        self.ticket = Some(ticket);
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        if !self.released {
            let _ = self.handle.send(Request::Release {
                connection: self.id,
                reply: None,
            });
        }
    }
}

async fn run(mut broadcaster: Broadcaster, mut rx: mpsc::UnboundedReceiver<Request>) {
    let mut routes: FxHashMap<ConnectionId, EventSender> = FxHashMap::default();

    while let Some(request) = rx.recv().await {
        trace!(?request, "dequeued");
        match request {
            Request::Admit {
                connection,
                events,
                reply,
            } => {
                if routes.contains_key(&connection) {
                    // Dropping `events` closes the newcomer's stream; the
                    // live connection keeps its route and seat.
                    debug!(%connection, "duplicate connection refused");
                    let _ = reply.send(Err(Rejection::AlreadyConnected));
                    continue;
                }

                routes.insert(connection, events);
                let outcome = broadcaster.apply(Inbound::Admit(connection));
                deliver(&broadcaster, &routes, &outcome.outbox);

                let admission = match broadcaster.seat_of(connection) {
                    Some(seat) => Ok(seat),
                    None => {
                        // Closes the refused connection's stream after room-full.
                        routes.remove(&connection);
                        Err(outcome.rejection.unwrap_or(Rejection::RoomFull))
                    }
                };
                let _ = reply.send(admission);
            }
            Request::Command { from, command } => {
                let outcome = broadcaster.apply(Inbound::Command { from, command });
                deliver(&broadcaster, &routes, &outcome.outbox);
            }
            Request::Release { connection, reply } => {
                let outcome = broadcaster.apply(Inbound::Release(connection));
                routes.remove(&connection);
                deliver(&broadcaster, &routes, &outcome.outbox);
                if let Some(reply) = reply {
                    let _ = reply.send(broadcaster.session().registry().len());
                }
            }
        }
    }

    info!("session worker stopped");
}

fn deliver(broadcaster: &Broadcaster, routes: &FxHashMap<ConnectionId, EventSender>, outbox: &Outbox) {
    for out in outbox {
        match out.delivery {
            Delivery::To(target) => send_to(routes, target, &out.event),
            Delivery::Room => {
                for connection in broadcaster.session().registry().connections() {
                    send_to(routes, connection, &out.event);
                }
            }
        }
    }
}

fn send_to(routes: &FxHashMap<ConnectionId, EventSender>, connection: ConnectionId, event: &ServerEvent) {
    if let Some(tx) = routes.get(&connection) {
        if tx.send(event.clone()).is_err() {
            trace!(%connection, event = event.name(), "receiver gone, event dropped");
        }
    }
}
