use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyEvent};

pub enum Event {
    /// Press, repeat and release alike; the app decides what each means.
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Reads the terminal on a helper thread and funnels everything, frame
/// ticks included, into one channel so the game loop handles a single
/// ordered stream.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        let tick_rate = Duration::from_millis(tick_rate_ms);

        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate.saturating_sub(last_tick.elapsed());
                if event::poll(timeout).unwrap_or(false) {
                    let sent = match event::read() {
                        Ok(crossterm::event::Event::Key(key)) => tx.send(Event::Key(key)),
                        Ok(crossterm::event::Event::Resize(_, _)) => tx.send(Event::Resize),
                        Ok(_) => Ok(()),
                        Err(_) => return,
                    };
                    if sent.is_err() {
                        return;
                    }
                }
                // Held keys repeat faster than the frame rate; ticks must not starve.
                if last_tick.elapsed() >= tick_rate {
                    if tx.send(Event::Tick).is_err() {
                        return;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> io::Result<Event> {
        self.rx
            .recv()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}
