// Application state for the TUI
//
// App wraps the UI-agnostic CardView with everything that only matters on
// screen: keyboard focus, text cursors, the theme, toasts and overlays.
// Card state (copy feedback, form status, field values) is never duplicated
// here; render code reads it straight from `card`.

use super::components::Toast;
use super::focus::Focus;
use super::text_input::{self, Edit};
use super::theme::{Theme, ThemeKind};
use crate::card::form::{Field, FormStatus};
use crate::card::links::{self, LinkOutcome};
use crate::card::relay::SubmitOutcome;
use crate::card::{CardView, SubmitError};
use crate::logging::LogBuffer;
use std::time::Instant;

const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];

pub struct App {
    pub card: CardView,
    pub focus: Focus,
    /// Char-index cursor per form field, in `Field::ALL` order
    cursors: [usize; 3],
    pub theme: Theme,
    pub toast: Option<Toast>,
    pub show_help: bool,
    pub show_logs: bool,
    pub log_buffer: LogBuffer,
    /// Animation frame counter (for the send spinner)
    pub animation_frame: usize,
    pub should_quit: bool,
}

fn slot(field: Field) -> usize {
    match field {
        Field::Name => 0,
        Field::Email => 1,
        Field::Message => 2,
    }
}

impl App {
    pub fn new(card: CardView, log_buffer: LogBuffer) -> Self {
        let theme = ThemeKind::by_name(&card.config().theme).theme();
        Self {
            card,
            focus: Focus::Link(0),
            cursors: [0; 3],
            theme,
            toast: None,
            show_help: false,
            show_logs: false,
            log_buffer,
            animation_frame: 0,
            should_quit: false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Focus
    // ─────────────────────────────────────────────────────────────────────

    /// The form is hidden behind the confirmation panel while in Success
    pub fn form_visible(&self) -> bool {
        self.card.form_status() != FormStatus::Success
    }

    fn ring(&self) -> Vec<Focus> {
        Focus::ring(self.card.links().len(), self.form_visible())
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next_in(&self.ring());
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev_in(&self.ring());
    }

    pub fn is_focused(&self, focus: Focus) -> bool {
        self.focus == focus
    }

    /// Keep focus on something visible after the form hides
    fn sync_focus(&mut self) {
        if !self.ring().contains(&self.focus) {
            self.focus = Focus::CopyEmail;
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Text editing
    // ─────────────────────────────────────────────────────────────────────

    /// Cursor for a field, clamped in case the field was cleared
    pub fn cursor(&self, field: Field) -> usize {
        text_input::clamp(self.card.field(field), self.cursors[slot(field)])
    }

    /// Apply an edit to a field. Motions leave the field's error alone.
    pub fn edit(&mut self, field: Field, edit: Edit) {
        let cursor = self.cursor(field);
        let moved = if edit.is_motion() {
            text_input::move_cursor(self.card.field(field), cursor, edit)
        } else {
            text_input::apply(self.card.field_mut(field), cursor, edit)
        };
        self.cursors[slot(field)] = moved;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Actions
    // ─────────────────────────────────────────────────────────────────────

    /// Enter on the focused item
    pub fn activate(&mut self, now: Instant) {
        match self.focus {
            Focus::Link(index) => self.activate_link(index, now),
            Focus::CopyEmail => {
                self.card.copy_email(now);
            }
            Focus::Field(Field::Message) => self.edit(Field::Message, Edit::Insert('\n')),
            Focus::Field(_) => self.focus_next(),
            Focus::Send => self.submit(),
        }
    }

    fn activate_link(&mut self, index: usize, now: Instant) {
        let Some(button) = self.card.links().get(index) else {
            return;
        };
        let result = links::activate(button, &self.card.config().assets_dir);
        let label = button.label;

        self.toast = Some(match result {
            Ok(LinkOutcome::Opened(url)) => {
                tracing::info!("Opened {} ({})", label, url);
                Toast::info(format!("Opened {}", label), now)
            }
            Ok(LinkOutcome::Saved(path)) => {
                Toast::info(format!("Saved {}", path.display()), now)
            }
            Err(e) => {
                tracing::warn!("{} failed: {}", label, e);
                Toast::error(format!("{}: {}", label, e), now)
            }
        });
    }

    /// Submit the contact form, moving focus to the first invalid field
    pub fn submit(&mut self) {
        match self.card.submit() {
            Ok(()) => {}
            Err(SubmitError::Invalid(violations)) => {
                if let Some((field, _)) = violations.first() {
                    self.focus = Focus::Field(*field);
                }
            }
            Err(SubmitError::Rejected(reason)) => {
                tracing::debug!("Submit ignored: {}", reason);
            }
        }
    }

    pub fn open_photo(&mut self, now: Instant) {
        let config = self.card.config();
        match links::open_asset(&config.assets_dir, &config.profile.photo) {
            Ok(path) => tracing::debug!("Opened photo {}", path.display()),
            Err(e) => {
                tracing::warn!("Photo unavailable: {}", e);
                self.toast = Some(Toast::error(e.to_string(), now));
            }
        }
    }

    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.kind.next().theme();
        tracing::debug!("Theme -> {}", self.theme.kind.name());
    }

    pub fn spinner_char(&self) -> char {
        SPINNER[self.animation_frame % SPINNER.len()]
    }

    // ─────────────────────────────────────────────────────────────────────
    // Time
    // ─────────────────────────────────────────────────────────────────────

    /// Periodic tick: animation, toast expiry and card deadlines
    pub fn on_tick(&mut self, now: Instant) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
        self.on_deadline(now);
    }

    /// Apply due card deadlines without advancing the animation
    pub fn on_deadline(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.toast = None;
        }
        self.card.tick(now);
        self.sync_focus();
    }

    /// Apply a relay outcome delivered by the event loop
    pub fn on_submit_outcome(&mut self, outcome: SubmitOutcome, now: Instant) {
        self.card.on_submit_outcome(outcome, now);
        self.sync_focus();
    }

    pub fn quit(&mut self) {
        self.card.teardown();
        self.should_quit = true;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::card::clipboard::tests::FakeClipboard;
    use crate::card::relay;
    use crate::config::Config;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    pub(crate) fn app_with(relay_url: &str) -> (App, mpsc::Receiver<SubmitOutcome>) {
        let mut config = Config::default();
        config.contact.relay_url = relay_url.to_string();
        let relay = relay::tests::client_for(relay_url);
        let (card, rx) = CardView::new(
            Arc::new(config),
            Box::new(FakeClipboard::default()),
            relay,
        );
        (App::new(card, LogBuffer::new()), rx)
    }

    fn type_into(app: &mut App, field: Field, text: &str) {
        for c in text.chars() {
            app.edit(field, Edit::Insert(c));
        }
    }

    #[tokio::test]
    async fn test_invalid_submit_focuses_first_bad_field() {
        let (mut app, _rx) = app_with("http://127.0.0.1:9/f");
        type_into(&mut app, Field::Name, "Ada");
        type_into(&mut app, Field::Email, "nope");

        app.focus = Focus::Send;
        app.activate(Instant::now());

        assert_eq!(app.focus, Focus::Field(Field::Email));
        assert_eq!(app.card.form_status(), FormStatus::Idle);
    }

    #[tokio::test]
    async fn test_enter_in_message_inserts_newline() {
        let (mut app, _rx) = app_with("http://127.0.0.1:9/f");
        app.focus = Focus::Field(Field::Message);
        type_into(&mut app, Field::Message, "Hi");
        app.activate(Instant::now());
        type_into(&mut app, Field::Message, "there");

        assert_eq!(app.card.field(Field::Message), "Hi\nthere");
        assert_eq!(app.focus, Focus::Field(Field::Message));
    }

    #[tokio::test]
    async fn test_enter_in_single_line_field_advances() {
        let (mut app, _rx) = app_with("http://127.0.0.1:9/f");
        app.focus = Focus::Field(Field::Name);
        app.activate(Instant::now());
        assert_eq!(app.focus, Focus::Field(Field::Email));
    }

    #[tokio::test]
    async fn test_cursor_motion_keeps_field_error() {
        let (mut app, _rx) = app_with("http://127.0.0.1:9/f");
        app.submit();
        assert!(app.card.field_error(Field::Name).is_some());

        app.edit(Field::Name, Edit::End);
        assert!(app.card.field_error(Field::Name).is_some());

        app.edit(Field::Name, Edit::Insert('A'));
        assert!(app.card.field_error(Field::Name).is_none());
    }

    #[tokio::test]
    async fn test_success_hides_form_and_moves_focus() {
        let (url, _) = relay::tests::spawn_relay(200).await;
        let (mut app, mut rx) = app_with(&url);
        type_into(&mut app, Field::Name, "Ada");
        type_into(&mut app, Field::Email, "ada@example.com");
        type_into(&mut app, Field::Message, "Hello");

        app.focus = Focus::Send;
        app.activate(Instant::now());
        assert!(app.card.submit_disabled());

        let outcome = rx.recv().await.unwrap();
        app.on_submit_outcome(outcome, Instant::now());

        assert!(!app.form_visible());
        assert_eq!(app.focus, Focus::CopyEmail);
        assert_eq!(app.cursor(Field::Message), 0);
    }

    #[tokio::test]
    async fn test_copy_email_from_focus() {
        let (mut app, _rx) = app_with("http://127.0.0.1:9/f");
        let t0 = Instant::now();
        app.focus = Focus::CopyEmail;
        app.activate(t0);
        assert!(app.card.is_copied());

        app.on_tick(t0 + app.card.config().timing.copy_feedback());
        assert!(!app.card.is_copied());
    }

    #[tokio::test]
    async fn test_quit_tears_down_card() {
        let (mut app, _rx) = app_with("http://127.0.0.1:9/f");
        app.quit();
        assert!(app.should_quit);
        assert!(!app.card.copy_email(Instant::now()));
    }
}
