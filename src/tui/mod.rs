// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, card deadlines, relay outcomes)
// - Rendering the card

pub mod app;
pub mod components;
pub mod focus;
pub mod layout;
pub mod text_input;
pub mod theme;
pub mod ui;

use crate::card::clipboard::SystemClipboard;
use crate::card::relay::{RelayClient, SubmitOutcome};
use crate::card::CardView;
use crate::config::Config;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use focus::Focus;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use text_input::Edit;
use tokio::sync::mpsc;

/// Run the TUI
///
/// This function sets up the terminal, runs the event loop, and cleans up
/// when done. The card is torn down before the terminal is restored.
pub async fn run_tui(config: Arc<Config>, log_buffer: LogBuffer) -> Result<()> {
    let relay = RelayClient::new(&config.contact).context("Failed to build relay client")?;
    tracing::debug!("Contact form relay: {}", relay.url());
    let (card, mut outcome_rx) = CardView::new(config, Box::new(SystemClipboard::default()), relay);
    let mut app = App::new(card, log_buffer);

    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut app, &mut outcome_rx).await;
    app.card.teardown();

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Sleep until the card's next deadline, or forever if none is armed
async fn until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
        None => std::future::pending().await,
    }
}

/// Main event loop
///
/// This loop handles four types of events:
/// 1. Keyboard input
/// 2. Timer ticks (spinner animation, toast expiry)
/// 3. Card deadlines (copy feedback revert, success reset)
/// 4. Relay outcomes from the in-flight submission
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    outcome_rx: &mut mpsc::Receiver<SubmitOutcome>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(120));

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        let deadline = app.card.next_deadline();

        tokio::select! {
            // Keyboard input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event, Instant::now());
                    }
                }
            } => {}

            // Periodic tick for animation
            _ = tick_interval.tick() => {
                app.on_tick(Instant::now());
            }

            // Card deadline reached
            _ = until_deadline(deadline) => {
                app.on_deadline(Instant::now());
            }

            // Relay finished
            Some(outcome) = outcome_rx.recv() => {
                app.on_submit_outcome(outcome, Instant::now());
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Help overlay → Global → Focused item
fn handle_key_event(app: &mut App, key: KeyEvent, now: Instant) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Layer 1: help overlay captures all input when open
    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }

    // Layer 2: global keys
    if handle_global_keys(app, &key) {
        return;
    }

    // Layer 3: focused item
    match app.focus.field() {
        Some(field) => {
            if key.code == KeyCode::Enter {
                app.activate(now);
            } else if let Some(edit) = Edit::from_key(&key) {
                app.edit(field, edit);
            }
        }
        None => handle_card_keys(app, &key, now),
    }
}

/// Keys that work no matter what is focused. Returns true if handled.
fn handle_global_keys(app: &mut App, key: &KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => app.quit(),
        KeyCode::Char('s') if ctrl => app.submit(),
        KeyCode::Tab | KeyCode::Down => app.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.focus_prev(),
        KeyCode::Esc if app.show_logs => app.show_logs = false,
        // Leave a text field without moving through the rest of the form
        KeyCode::Esc if app.focus.in_form() => app.focus = Focus::CopyEmail,
        _ => return false,
    }
    true
}

/// Single-letter shortcuts, only when not typing into a field
fn handle_card_keys(app: &mut App, key: &KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Enter => app.activate(now),
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('y') => {
            app.card.copy_email(now);
        }
        KeyCode::Char('p') => app.open_photo(now),
        KeyCode::Char('t') => app.cycle_theme(),
        KeyCode::Char('L') => app.show_logs = !app.show_logs,
        KeyCode::Char('j') => app.focus_next(),
        KeyCode::Char('k') => app.focus_prev(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::form::{Field, FormStatus};
    use app::tests::app_with;
    use theme::ThemeKind;

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE), Instant::now());
    }

    fn ctrl(app: &mut App, c: char) {
        handle_key_event(
            app,
            KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL),
            Instant::now(),
        );
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[tokio::test]
    async fn test_letters_type_into_focused_field() {
        let (mut app, _rx) = app_with("http://127.0.0.1:9/f");
        app.focus = Focus::Field(Field::Name);

        // 'q' and 't' are shortcuts elsewhere but text here
        type_str(&mut app, "qt");
        assert_eq!(app.card.field(Field::Name), "qt");
        assert!(!app.should_quit);
        assert_eq!(app.theme.kind, ThemeKind::Ember);
    }

    #[tokio::test]
    async fn test_shortcuts_outside_fields() {
        let (mut app, _rx) = app_with("http://127.0.0.1:9/f");

        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.theme.kind, ThemeKind::Midnight);

        press(&mut app, KeyCode::Char('L'));
        assert!(app.show_logs);
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_logs);

        press(&mut app, KeyCode::Char('y'));
        assert!(app.card.is_copied());

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_help_overlay_swallows_keys() {
        let (mut app, _rx) = app_with("http://127.0.0.1:9/f");
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);

        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.theme.kind, ThemeKind::Ember);

        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
    }

    #[tokio::test]
    async fn test_tab_walks_into_form_and_back() {
        let (mut app, _rx) = app_with("http://127.0.0.1:9/f");
        for _ in 0..5 {
            press(&mut app, KeyCode::Tab);
        }
        assert_eq!(app.focus, Focus::Field(Field::Name));

        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, Focus::CopyEmail);

        app.focus = Focus::Field(Field::Message);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.focus, Focus::CopyEmail);
    }

    #[tokio::test]
    async fn test_ctrl_s_submits_from_any_field() {
        let (url, received) = crate::card::relay::tests::spawn_relay(200).await;
        let (mut app, mut rx) = app_with(&url);

        app.focus = Focus::Field(Field::Name);
        type_str(&mut app, "Ada");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "ada@example.com");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "Hello");
        ctrl(&mut app, 's');

        assert_eq!(app.card.form_status(), FormStatus::Submitting);

        // Still disabled: a second press must not start another post
        ctrl(&mut app, 's');

        let outcome = rx.recv().await.unwrap();
        app.on_submit_outcome(outcome, Instant::now());
        assert_eq!(app.card.form_status(), FormStatus::Success);
        assert_eq!(received.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_even_in_field() {
        let (mut app, _rx) = app_with("http://127.0.0.1:9/f");
        app.focus = Focus::Field(Field::Message);
        ctrl(&mut app, 'c');
        assert!(app.should_quit);
        assert_eq!(app.card.field(Field::Message), "");
    }
}
