mod app;
mod event;
mod ui;

use std::io;
use std::time::Instant;

use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};

use invaders::config::{Config, CONFIG_ENV};
use invaders::error::AppResult;
use invaders::logging;

use app::App;
use event::{Event, EventHandler};

fn main() -> AppResult<()> {
    let config_path = Config::path();
    let (config, config_err) = match Config::load_from(&config_path) {
        Ok(config) => (config, None),
        // An explicitly chosen file must be usable.
        Err(e) if std::env::var_os(CONFIG_ENV).is_some() => return Err(e.into()),
        Err(e) => (Config::default(), Some(e)),
    };
    logging::init(&config)?;
    if let Some(e) = config_err {
        warn!("{e}; using defaults");
    }
    info!(path = %config_path.display(), ?config, "starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Key releases are only reported by terminals speaking the kitty protocol.
    let release_events = supports_keyboard_enhancement().unwrap_or(false)
        && execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .is_ok();
    info!(release_events, "keyboard mode");

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run(&mut terminal, &config, release_events);

    // Restore terminal
    if release_events {
        let _ = execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags);
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("exited");
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &Config,
    release_events: bool,
) -> AppResult<()> {
    let mut app = App::new(config, release_events);
    let event_handler = EventHandler::new(config.tick_rate_ms);

    // Main loop
    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        match event_handler.next()? {
            Event::Tick => app.on_tick(Instant::now()),
            Event::Key(key) => app.on_key(key, Instant::now()),
            // draw() picks up the new size on the next pass
            Event::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
