//! Remix request lifecycle.
//!
//! `RemixController` owns the session state and is the only thing that
//! mutates it. A remix is split in two halves so the network call can run
//! elsewhere: [`RemixController::begin_remix`] applies the guard, enters
//! `Pending` and hands back the request to send; [`RemixController::finish_remix`]
//! commits exactly one of success or failure and always leaves `Pending`.

use serde::Serialize;

use crate::generator::{GenerationError, GenerationRequest};
use crate::locale::Locale;
use crate::style::{StyleId, prompt_template_of};

/// Lifecycle phase of the most recent remix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RemixPhase {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl RemixPhase {
    /// Get a human-readable description of the phase
    pub fn description(&self) -> &'static str {
        match self {
            RemixPhase::Idle => "Ready",
            RemixPhase::Pending => "Remixing...",
            RemixPhase::Succeeded => "Remix complete",
            RemixPhase::Failed => "Remix failed",
        }
    }
}

/// The user-editable and result fields of a session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub input_text: String,
    pub selected_style: StyleId,
    pub is_pending: bool,
    pub output_text: Option<String>,
    pub error_message: Option<String>,
}

/// Input and style a request was built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemixOrigin {
    pub style: StyleId,
    pub input_text: String,
}

/// Identifies one accepted remix until it is finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemixTicket {
    pub id: u64,
    pub origin: RemixOrigin,
}

/// Read-only projection handed to presentation code
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    #[serde(flatten)]
    pub state: SessionState,
    pub phase: RemixPhase,
    /// Number of remixes that have finished, successfully or not
    pub completed_requests: u64,
    /// Output was produced from input or a style other than the current one
    pub output_stale: bool,
}

/// Build the prompt for a style: instruction, blank line, subject.
pub fn compose_prompt(style: StyleId, input_text: &str) -> String {
    format!("{}\n\n{}", prompt_template_of(style), input_text)
}

/// Owns `SessionState` and enforces the remix state machine
#[derive(Debug)]
pub struct RemixController {
    state: SessionState,
    phase: RemixPhase,
    locale: Locale,
    next_ticket: u64,
    in_flight: Option<u64>,
    output_origin: Option<RemixOrigin>,
    completed_requests: u64,
}

impl RemixController {
    pub fn new(locale: Locale) -> Self {
        Self {
            state: SessionState::default(),
            phase: RemixPhase::Idle,
            locale,
            next_ticket: 1,
            in_flight: None,
            output_origin: None,
            completed_requests: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> RemixPhase {
        self.phase
    }

    pub fn set_input_text(&mut self, text: impl Into<String>) {
        self.state.input_text = text.into();
    }

    pub fn set_selected_style(&mut self, style: StyleId) {
        self.state.selected_style = style;
    }

    /// Whether `begin_remix` would accept a request right now
    pub fn can_remix(&self) -> bool {
        !self.state.is_pending && !self.state.input_text.is_empty()
    }

    /// True when the displayed output no longer matches the current input or style
    pub fn is_output_stale(&self) -> bool {
        self.output_origin.as_ref().is_some_and(|origin| {
            origin.input_text != self.state.input_text || origin.style != self.state.selected_style
        })
    }

    /// Enter `Pending` and return the request to send.
    ///
    /// Returns `None` without touching any state when the input is empty or
    /// a remix is already outstanding.
    pub fn begin_remix(&mut self) -> Option<(RemixTicket, GenerationRequest)> {
        if !self.can_remix() {
            let reason = if self.state.is_pending {
                "a request is already pending"
            } else {
                "input text is empty"
            };
            tracing::debug!("Remix rejected: {}", reason);
            return None;
        }

        self.state.is_pending = true;
        self.state.error_message = None;
        self.phase = RemixPhase::Pending;

        let style = self.state.selected_style;
        let subject = self.state.input_text.clone();
        let ticket = RemixTicket {
            id: self.next_ticket,
            origin: RemixOrigin {
                style,
                input_text: subject.clone(),
            },
        };
        self.next_ticket += 1;
        self.in_flight = Some(ticket.id);

        let prompt = compose_prompt(style, &subject);
        tracing::info!(
            "Remix #{} started: style={}, {} input chars",
            ticket.id,
            style,
            subject.chars().count()
        );

        Some((ticket, GenerationRequest::new(prompt, style, subject)))
    }

    /// Commit the outcome of an outstanding remix.
    ///
    /// Results for tickets that are not in flight are dropped.
    pub fn finish_remix(
        &mut self,
        ticket: &RemixTicket,
        outcome: Result<String, GenerationError>,
    ) {
        if self.in_flight != Some(ticket.id) {
            tracing::warn!("Ignoring result for remix #{} which is not in flight", ticket.id);
            return;
        }

        match outcome {
            Ok(text) => {
                if text.is_empty() {
                    tracing::warn!("Remix #{} produced an empty result", ticket.id);
                }
                if ticket.origin.input_text != self.state.input_text
                    || ticket.origin.style != self.state.selected_style
                {
                    tracing::debug!("Remix #{} finished after its input was edited", ticket.id);
                }
                self.state.output_text = Some(text);
                self.state.error_message = None;
                self.output_origin = Some(ticket.origin.clone());
                self.phase = RemixPhase::Succeeded;
                tracing::info!("Remix #{} succeeded", ticket.id);
            }
            Err(e) => {
                tracing::warn!("Remix #{} failed: {}", ticket.id, e);
                self.state.error_message = Some(self.locale.error_message().to_string());
                self.phase = RemixPhase::Failed;
            }
        }

        self.in_flight = None;
        self.completed_requests += 1;
        self.state.is_pending = false;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state().clone(),
            phase: self.phase(),
            completed_requests: self.completed_requests,
            output_stale: self.is_output_stale(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ERROR: &str = "There was an error processing your request. Please try again.";

    fn malformed() -> GenerationError {
        GenerationError::MalformedResponse("bad".to_string())
    }

    fn with_input(text: &str) -> RemixController {
        let mut controller = RemixController::new(Locale::En);
        controller.set_input_text(text);
        controller
    }

    #[test]
    fn test_initial_state() {
        let controller = RemixController::new(Locale::En);
        assert_eq!(controller.phase(), RemixPhase::Idle);
        assert_eq!(controller.state(), &SessionState::default());
        assert_eq!(controller.state().selected_style, StyleId::Tweet);
        assert!(!controller.can_remix());
        assert!(!controller.is_output_stale());
    }

    #[test]
    fn test_empty_input_is_rejected_without_change() {
        let mut controller = RemixController::new(Locale::En);
        controller.set_selected_style(StyleId::Blog);
        let before = controller.snapshot();

        assert!(controller.begin_remix().is_none());
        assert_eq!(controller.snapshot(), before);
    }

    #[test]
    fn test_begin_enters_pending_and_clears_error() {
        let mut controller = with_input("hello");
        let (ticket, _) = controller.begin_remix().unwrap();
        controller.finish_remix(&ticket, Err(malformed()));
        assert_eq!(controller.state().error_message.as_deref(), Some(ERROR));

        controller.begin_remix().unwrap();
        assert!(controller.state().is_pending);
        assert_eq!(controller.phase(), RemixPhase::Pending);
        assert!(controller.state().error_message.is_none());
    }

    #[test]
    fn test_reentrant_begin_is_rejected() {
        let mut controller = with_input("hello");
        assert!(controller.begin_remix().is_some());
        let pending = controller.snapshot();

        assert!(controller.begin_remix().is_none());
        assert_eq!(controller.snapshot(), pending);
        assert!(!controller.can_remix());
    }

    #[test]
    fn test_prompt_is_template_then_blank_line_then_input() {
        let mut controller = with_input("hey whats up");
        controller.set_selected_style(StyleId::Formal);
        let (_, request) = controller.begin_remix().unwrap();

        assert_eq!(
            request.prompt,
            format!("{}\n\nhey whats up", prompt_template_of(StyleId::Formal))
        );
        assert!(request.prompt.starts_with(prompt_template_of(StyleId::Formal)));
        assert_eq!(request.max_tokens, 500);
        assert_eq!(request.temperature, 0.7);
        assert_eq!(request.style, StyleId::Formal);
        assert_eq!(request.subject, "hey whats up");
    }

    #[test]
    fn test_prompt_for_every_style() {
        for style in StyleId::ALL {
            for input in ["x", "two\nlines", "  padded  "] {
                assert_eq!(
                    compose_prompt(style, input),
                    format!("{}\n\n{}", prompt_template_of(style), input)
                );
            }
        }
    }

    #[test]
    fn test_success_commits_output() {
        let mut controller = with_input("hello");
        let (ticket, _) = controller.begin_remix().unwrap();
        controller.finish_remix(&ticket, Ok("X".to_string()));

        let state = controller.state();
        assert_eq!(state.output_text.as_deref(), Some("X"));
        assert!(state.error_message.is_none());
        assert!(!state.is_pending);
        assert_eq!(controller.phase(), RemixPhase::Succeeded);
        assert_eq!(controller.snapshot().completed_requests, 1);
    }

    #[test]
    fn test_empty_result_is_success() {
        let mut controller = with_input("hello");
        let (ticket, _) = controller.begin_remix().unwrap();
        controller.finish_remix(&ticket, Ok(String::new()));

        assert_eq!(controller.phase(), RemixPhase::Succeeded);
        assert_eq!(controller.state().output_text.as_deref(), Some(""));
    }

    #[test]
    fn test_failure_preserves_prior_output() {
        let mut controller = with_input("hello");
        let (ticket, _) = controller.begin_remix().unwrap();
        controller.finish_remix(&ticket, Ok("first".to_string()));

        let (ticket, _) = controller.begin_remix().unwrap();
        controller.finish_remix(&ticket, Err(malformed()));

        let state = controller.state();
        assert_eq!(state.output_text.as_deref(), Some("first"));
        assert_eq!(state.error_message.as_deref(), Some(ERROR));
        assert!(!state.is_pending);
        assert_eq!(controller.phase(), RemixPhase::Failed);
    }

    #[test]
    fn test_error_message_follows_locale() {
        let mut controller = RemixController::new(Locale::Es);
        controller.set_input_text("hola");
        let (ticket, _) = controller.begin_remix().unwrap();
        controller.finish_remix(&ticket, Err(malformed()));

        assert_eq!(
            controller.state().error_message.as_deref(),
            Some(Locale::Es.error_message())
        );
    }

    #[test]
    fn test_result_for_unknown_ticket_is_ignored() {
        let mut controller = with_input("hello");
        let (ticket, _) = controller.begin_remix().unwrap();
        let bogus = RemixTicket {
            id: ticket.id + 100,
            origin: ticket.origin.clone(),
        };

        controller.finish_remix(&bogus, Ok("nope".to_string()));
        assert!(controller.state().is_pending);
        assert!(controller.state().output_text.is_none());

        controller.finish_remix(&ticket, Ok("yes".to_string()));
        controller.finish_remix(&ticket, Ok("again".to_string()));
        assert_eq!(controller.state().output_text.as_deref(), Some("yes"));
        assert_eq!(controller.snapshot().completed_requests, 1);
    }

    #[test]
    fn test_late_result_is_applied_and_marked_stale() {
        let mut controller = with_input("original");
        let (ticket, _) = controller.begin_remix().unwrap();

        controller.set_input_text("edited while pending");
        controller.finish_remix(&ticket, Ok("remix of original".to_string()));

        assert_eq!(
            controller.state().output_text.as_deref(),
            Some("remix of original")
        );
        assert!(controller.is_output_stale());
        assert!(controller.snapshot().output_stale);

        controller.set_input_text("original");
        assert!(!controller.is_output_stale());
        controller.set_selected_style(StyleId::Casual);
        assert!(controller.is_output_stale());
    }

    #[test]
    fn test_sequential_identical_remixes_are_idempotent() {
        let mut controller = with_input("same");
        let mut outputs = Vec::new();
        for _ in 0..2 {
            let (ticket, request) = controller.begin_remix().unwrap();
            assert_eq!(request.prompt, compose_prompt(StyleId::Tweet, "same"));
            controller.finish_remix(&ticket, Ok("same result".to_string()));
            outputs.push(controller.state().output_text.clone());
        }
        assert_eq!(outputs[0], outputs[1]);
    }

    #[test]
    fn test_phase_description() {
        assert_eq!(RemixPhase::Idle.description(), "Ready");
        assert_eq!(RemixPhase::Pending.description(), "Remixing...");
        assert_eq!(RemixPhase::Succeeded.description(), "Remix complete");
        assert_eq!(RemixPhase::Failed.description(), "Remix failed");
    }
}
