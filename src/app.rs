use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::info;

use invaders::config::Config;
use invaders::engine::input::{InputEvent, Intent};
use invaders::engine::{Command, Engine};

/// Maps a terminal key to a game intent.
pub fn intent_for(code: KeyCode) -> Option<Intent> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Intent::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Intent::MoveRight),
        KeyCode::Char(' ') => Some(Intent::Fire),
        KeyCode::Enter => Some(Intent::Confirm),
        _ => None,
    }
}

pub struct App {
    pub should_quit: bool,
    pub engine: Engine,
    /// Whether the terminal reports key releases.
    release_events: bool,
    hold_window: Duration,
    // Last press or repeat of each movement intent, for the hold fallback.
    left_seen: Option<Instant>,
    right_seen: Option<Instant>,
}

impl App {
    pub fn new(config: &Config, release_events: bool) -> Self {
        Self {
            should_quit: false,
            engine: Engine::from_entropy(),
            release_events,
            hold_window: Duration::from_millis(config.hold_window_ms),
            left_seen: None,
            right_seen: None,
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        if !self.release_events {
            self.expire_held(now);
        }
        self.engine.tick(now);
    }

    pub fn on_key(&mut self, key: KeyEvent, now: Instant) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if key.kind == KeyEventKind::Press
            && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        {
            info!("quit requested");
            self.should_quit = true;
            return;
        }

        let Some(intent) = intent_for(key.code) else { return };
        let event = match key.kind {
            KeyEventKind::Press => InputEvent::Down(intent),
            KeyEventKind::Repeat => match intent {
                // Start is edge-triggered; holding Enter must not restart twice.
                Intent::Confirm => return,
                _ => InputEvent::Down(intent),
            },
            KeyEventKind::Release => InputEvent::Up(intent),
        };

        if let InputEvent::Down(held) = event {
            match held {
                Intent::MoveLeft => self.left_seen = Some(now),
                Intent::MoveRight => self.right_seen = Some(now),
                _ => {}
            }
        }

        self.engine.dispatch(Command::Input(event), now);
    }

    fn expire_held(&mut self, now: Instant) {
        let window = self.hold_window;
        let stale = |seen: Option<Instant>| {
            seen.is_some_and(|t| now.saturating_duration_since(t) > window)
        };
        if stale(self.left_seen) {
            self.left_seen = None;
            self.engine
                .dispatch(Command::Input(InputEvent::Up(Intent::MoveLeft)), now);
        }
        if stale(self.right_seen) {
            self.right_seen = None;
            self.engine
                .dispatch(Command::Input(InputEvent::Up(Intent::MoveRight)), now);
        }
    }
}
