//! Session actor.
//!
//! One tokio task owns the `RemixController` and applies messages strictly in
//! arrival order. Accepted remixes run the generator on a separate task whose
//! completion is posted back into the same queue, so the actor never blocks
//! on the network. Presentation code talks to the actor through a cloneable
//! [`SessionHandle`] and reads state from a watch channel.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};

use crate::generator::{GenerationError, TextGenerator};
use crate::locale::Locale;
use crate::remix::{RemixController, RemixTicket, SessionSnapshot};
use crate::style::StyleId;

/// Actions presentation code may request
#[derive(Debug)]
pub enum SessionCommand {
    SetInput(String),
    SetStyle(StyleId),
    /// Start a remix. The optional sender is told how the request ended.
    PerformRemix(Option<oneshot::Sender<RemixOutcome>>),
}

/// How a waited-on remix request ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemixOutcome {
    /// The guard refused the request (empty input or already pending)
    Rejected(SessionSnapshot),
    /// The request ran; the snapshot holds either output or the error message
    Completed(SessionSnapshot),
}

impl RemixOutcome {
    pub fn snapshot(&self) -> &SessionSnapshot {
        match self {
            RemixOutcome::Rejected(snapshot) | RemixOutcome::Completed(snapshot) => snapshot,
        }
    }
}

enum Message {
    Command(SessionCommand),
    Completed {
        ticket: RemixTicket,
        outcome: Result<String, GenerationError>,
    },
}

/// Cloneable handle to a running session.
///
/// The session ends when the last handle is dropped.
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<Message>,
    snapshot_rx: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    pub fn set_input_text(&self, text: impl Into<String>) {
        self.send(SessionCommand::SetInput(text.into()));
    }

    pub fn set_selected_style(&self, style: StyleId) {
        self.send(SessionCommand::SetStyle(style));
    }

    /// Request a remix without waiting for it
    pub fn perform_remix(&self) {
        self.send(SessionCommand::PerformRemix(None));
    }

    /// Request a remix and wait until it is rejected or completes.
    ///
    /// Returns `None` if the session has ended.
    pub async fn remix(&self) -> Option<RemixOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(SessionCommand::PerformRemix(Some(reply_tx)));
        reply_rx.await.ok()
    }

    /// Latest published state
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    fn send(&self, command: SessionCommand) {
        if let Err(e) = self.tx.send(Message::Command(command)) {
            tracing::warn!("Session has ended; dropping {}", e.0.command_name());
        }
    }
}

impl Message {
    fn command_name(&self) -> &'static str {
        match self {
            Message::Command(SessionCommand::SetInput(_)) => "SetInput",
            Message::Command(SessionCommand::SetStyle(_)) => "SetStyle",
            Message::Command(SessionCommand::PerformRemix(_)) => "PerformRemix",
            Message::Completed { .. } => "Completed",
        }
    }
}

struct SessionActor {
    controller: RemixController,
    generator: Arc<dyn TextGenerator>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
    /// Completion messages re-enter the queue through this; it does not keep
    /// the session alive on its own.
    completion_tx: mpsc::WeakUnboundedSender<Message>,
    waiter: Option<oneshot::Sender<RemixOutcome>>,
}

/// Start a session on the current tokio runtime
pub fn spawn(generator: Arc<dyn TextGenerator>, locale: Locale) -> SessionHandle {
    let (tx, rx) = mpsc::unbounded_channel();
    let controller = RemixController::new(locale);
    let (snapshot_tx, snapshot_rx) = watch::channel(controller.snapshot());

    tracing::info!(
        "Starting session with {} generator, locale {}",
        generator.name(),
        locale
    );

    let actor = SessionActor {
        controller,
        generator,
        snapshot_tx,
        completion_tx: tx.downgrade(),
        waiter: None,
    };
    tokio::spawn(actor.run(rx));

    SessionHandle { tx, snapshot_rx }
}

impl SessionActor {
    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<Message>) {
        while let Some(message) = rx.recv().await {
            match message {
                Message::Command(command) => self.handle_command(command),
                Message::Completed { ticket, outcome } => {
                    self.controller.finish_remix(&ticket, outcome);
                    // Waiters must observe the published state
                    self.publish();
                    if let Some(waiter) = self.waiter.take() {
                        let _ = waiter.send(RemixOutcome::Completed(self.controller.snapshot()));
                    }
                    continue;
                }
            }
            self.publish();
        }
        tracing::info!("Session ended");
    }

    fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::SetInput(text) => self.controller.set_input_text(text),
            SessionCommand::SetStyle(style) => self.controller.set_selected_style(style),
            SessionCommand::PerformRemix(reply) => {
                let Some((ticket, request)) = self.controller.begin_remix() else {
                    if let Some(reply) = reply {
                        let _ = reply.send(RemixOutcome::Rejected(self.controller.snapshot()));
                    }
                    return;
                };

                self.waiter = reply;
                let generator = Arc::clone(&self.generator);
                let completion_tx = self.completion_tx.clone();
                tokio::spawn(async move {
                    // A panicking generator must still settle the ticket
                    let generation =
                        tokio::spawn(async move { generator.generate(&request).await });
                    let outcome = match generation.await {
                        Ok(outcome) => outcome,
                        Err(e) => {
                            tracing::error!("Generation task for remix #{} failed: {}", ticket.id, e);
                            Err(GenerationError::TaskFailed(e.to_string()))
                        }
                    };
                    match completion_tx.upgrade() {
                        Some(tx) => {
                            let _ = tx.send(Message::Completed { ticket, outcome });
                        }
                        None => tracing::debug!("Session ended before remix #{} finished", ticket.id),
                    }
                });
            }
        }
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.controller.snapshot());
    }
}
