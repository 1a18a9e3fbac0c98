// Card view - the business card's state and workflows
//
// The card owns two pieces of ephemeral state and nothing else:
// - Copy feedback: the email was just copied (reverts after a window)
// - Form status: idle / submitting / success / error
//
// Rendering lives in `tui`; this module is UI-agnostic so the workflows can
// be driven from the TUI, the headless CLI commands, or tests alike.
//
// Timing is explicit: every method that can start or end a timed state takes
// `now`, and the event loop asks `next_deadline()` when to call `tick()`.
// The relay post is the only async work; it runs on a spawned task and
// reports back over the outcome channel.

pub mod clipboard;
pub mod copy;
pub mod form;
pub mod links;
pub mod relay;
pub mod timer;

use crate::config::Config;
use clipboard::ClipboardWriter;
use copy::CopyFeedback;
use form::{ContactForm, Field, FieldError, FormMachine, FormStatus, SubmitRejected};
use links::LinkButton;
use relay::{RelayClient, SubmitOutcome};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Why a submit action did not start a relay post
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// Field constraints failed; the relay was not contacted
    #[error("{} field(s) need attention", .0.len())]
    Invalid(Vec<(Field, FieldError)>),

    /// The submit control isn't accepting input right now
    #[error(transparent)]
    Rejected(#[from] SubmitRejected),
}

/// The business card
pub struct CardView {
    config: Arc<Config>,
    links: Vec<LinkButton>,
    copy: CopyFeedback,
    form: FormMachine,
    fields: ContactForm,
    field_errors: Vec<(Field, FieldError)>,
    clipboard: Box<dyn ClipboardWriter>,
    relay: RelayClient,
    outcome_tx: mpsc::Sender<SubmitOutcome>,
    in_flight: Option<JoinHandle<()>>,
    torn_down: bool,
}

impl CardView {
    /// Create the card and the channel its relay outcomes arrive on
    pub fn new(
        config: Arc<Config>,
        clipboard: Box<dyn ClipboardWriter>,
        relay: RelayClient,
    ) -> (Self, mpsc::Receiver<SubmitOutcome>) {
        // One post can be outstanding at a time; a small buffer is plenty
        let (outcome_tx, outcome_rx) = mpsc::channel(4);

        let view = Self {
            links: links::card_links(&config.links),
            copy: CopyFeedback::new(config.timing.copy_feedback()),
            form: FormMachine::new(config.timing.success_reset()),
            fields: ContactForm::default(),
            field_errors: Vec::new(),
            clipboard,
            relay,
            outcome_tx,
            in_flight: None,
            torn_down: false,
            config,
        };

        (view, outcome_rx)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn links(&self) -> &[LinkButton] {
        &self.links
    }

    // ─────────────────────────────────────────────────────────────────────
    // Copy-email action
    // ─────────────────────────────────────────────────────────────────────

    /// Write the contact email to the clipboard
    ///
    /// A failed write leaves the copy state alone and is only logged.
    pub fn copy_email(&mut self, now: Instant) -> bool {
        if self.torn_down {
            return false;
        }
        match self.clipboard.write_text(&self.config.contact.email) {
            Ok(()) => {
                self.copy.on_copied(now);
                tracing::debug!("Copied {} to clipboard", self.config.contact.email);
                true
            }
            Err(e) => {
                tracing::warn!("Failed to copy email: {:#}", e);
                false
            }
        }
    }

    pub fn is_copied(&self) -> bool {
        self.copy.is_copied()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Contact form
    // ─────────────────────────────────────────────────────────────────────

    pub fn form_status(&self) -> FormStatus {
        self.form.status()
    }

    pub fn submit_disabled(&self) -> bool {
        self.form.submit_disabled()
    }

    pub fn field(&self, field: Field) -> &str {
        self.fields.get(field)
    }

    /// Mutable access for editing; editing a field clears its inline error
    pub fn field_mut(&mut self, field: Field) -> &mut String {
        self.field_errors.retain(|(f, _)| *f != field);
        self.fields.get_mut(field)
    }

    pub fn field_error(&self, field: Field) -> Option<FieldError> {
        self.field_errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, err)| *err)
    }

    /// Submit the contact form
    ///
    /// On success the post is running in the background and the form is
    /// `Submitting`; the outcome arrives on the channel returned by
    /// [`CardView::new`] and must be handed to [`CardView::on_submit_outcome`].
    pub fn submit(&mut self) -> Result<(), SubmitError> {
        if self.torn_down {
            return Err(SubmitRejected::Closed.into());
        }
        self.form.can_begin()?;

        let submission = match self.fields.validate() {
            Ok(submission) => submission,
            Err(violations) => {
                tracing::debug!("Form blocked by {} field constraint(s)", violations.len());
                self.field_errors = violations.clone();
                return Err(SubmitError::Invalid(violations));
            }
        };
        self.field_errors.clear();
        self.form.begin()?;
        tracing::debug!("Form status -> {}", self.form.status().as_str());

        let relay = self.relay.clone();
        let tx = self.outcome_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let outcome = relay.submit(&submission).await;
            // Receiver gone means the card was torn down
            let _ = tx.send(outcome).await;
        }));

        Ok(())
    }

    /// Apply the result of the outstanding relay post
    pub fn on_submit_outcome(&mut self, outcome: SubmitOutcome, now: Instant) {
        if self.torn_down {
            return;
        }
        self.in_flight = None;

        if let Err(e) = &outcome {
            tracing::warn!("Contact form submission failed: {}", e);
        }
        if self.form.finish(outcome.is_ok(), now) {
            if outcome.is_ok() {
                self.fields.clear();
            }
            tracing::debug!("Form status -> {}", self.form.status().as_str());
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Timers and lifecycle
    // ─────────────────────────────────────────────────────────────────────

    /// Apply any deadlines that have passed. Returns true if state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let copy_changed = self.copy.tick(now);
        let form_changed = self.form.tick(now);
        if form_changed {
            tracing::debug!("Form status -> {}", self.form.status().as_str());
        }
        copy_changed || form_changed
    }

    /// Earliest pending deadline, for the event loop to sleep until
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.copy.next_deadline(), self.form.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Cancel pending deadlines and the in-flight post. No state changes
    /// after this point.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.copy.cancel();
        self.form.cancel();
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}

impl Drop for CardView {
    fn drop(&mut self) {
        self.teardown();
    }
}
