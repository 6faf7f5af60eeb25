//! Fixed-clock Space Invaders simulation.
//!
//! [`Engine`] owns the whole game aggregate. Every trigger (input edges, the
//! visual frame, the formation cadence and the enemy fire cadence) arrives as
//! a [`Command`] through [`Engine::dispatch`], so mutations are applied one at
//! a time and a collision pass always sees a fully updated board.

pub mod collision;
pub mod enemy_fire;
pub mod entities;
pub mod formation;
pub mod input;
pub mod motion;
pub mod snapshot;
pub mod timer;

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use collision::Verdict;
use entities::{spawn_formation, EntityStore, Player, STARTING_LIVES};
use formation::Direction;
use input::{InputEvent, InputLatch, Intent};
use motion::Trigger;
use snapshot::{BulletView, EnemyView, Snapshot};
use timer::RoundTimers;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Playing,
    GameOver,
}

/// Why the last session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ending {
    LivesExhausted,
    Invaded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Input(InputEvent),
    /// One visual frame: motion, then collisions.
    Frame,
    FormationStep,
    EnemyFire,
}

pub struct Engine<R: Rng = StdRng> {
    phase: Phase,
    ending: Option<Ending>,
    store: EntityStore,
    score: u32,
    lives: u32,
    level: u32,
    direction: Direction,
    latch: InputLatch,
    trigger: Trigger,
    timers: Option<RoundTimers>,
    next_bullet_id: u64,
    next_enemy_bullet_id: u64,
    rng: R,
}

impl Engine<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> Engine<R> {
    pub fn new(rng: R) -> Self {
        Self {
            phase: Phase::Menu,
            ending: None,
            store: EntityStore::new(),
            score: 0,
            lives: STARTING_LIVES,
            level: 1,
            direction: Direction::Right,
            latch: InputLatch::new(),
            trigger: Trigger::new(),
            timers: None,
            next_bullet_id: 0,
            next_enemy_bullet_id: 0,
            rng,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn ending(&self) -> Option<Ending> {
        self.ending
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn latch(&self) -> &InputLatch {
        &self.latch
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Direct board access for scripted scenarios and tests.
    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    /// True while the round's controller cadences are running.
    pub fn timers_armed(&self) -> bool {
        self.timers.is_some()
    }

    /// Advances the clock to `now`: due controller steps first, then one
    /// frame. Does nothing outside of play.
    pub fn tick(&mut self, now: Instant) {
        if self.phase != Phase::Playing {
            return;
        }
        if self.timers.as_mut().is_some_and(|t| t.formation.poll(now)) {
            self.dispatch(Command::FormationStep, now);
        }
        if self.timers.as_mut().is_some_and(|t| t.fire.poll(now)) {
            self.dispatch(Command::EnemyFire, now);
        }
        self.dispatch(Command::Frame, now);
    }

    pub fn dispatch(&mut self, command: Command, now: Instant) {
        match command {
            Command::Input(event) => self.on_input(event, now),
            Command::Frame => {
                if self.phase != Phase::Playing {
                    return;
                }
                motion::update(&mut self.store, &self.latch);
                self.resolve(now);
            }
            Command::FormationStep => {
                if self.phase != Phase::Playing {
                    return;
                }
                let step = formation::step(&mut self.store.enemies, &mut self.direction);
                trace!(?step, direction = ?self.direction, "formation step");
                self.resolve(now);
            }
            Command::EnemyFire => {
                if self.phase != Phase::Playing {
                    return;
                }
                let id = self.next_enemy_bullet_id;
                if let Some(shooter) = enemy_fire::fire(&mut self.store, &mut self.rng, id) {
                    self.next_enemy_bullet_id += 1;
                    trace!(shooter, bullet = id, "enemy fired");
                }
                self.resolve(now);
            }
        }
    }

    fn on_input(&mut self, event: InputEvent, now: Instant) {
        match event {
            InputEvent::Down(Intent::Fire) => {
                if self.phase == Phase::Playing {
                    let id = self.next_bullet_id;
                    if motion::fire(&mut self.store, &mut self.trigger, id, now) {
                        self.next_bullet_id += 1;
                    }
                }
            }
            InputEvent::Down(Intent::Confirm) => {
                if self.phase != Phase::Playing {
                    self.start(now);
                }
            }
            InputEvent::Down(intent) => self.latch.press(intent),
            InputEvent::Up(intent) => self.latch.release(intent),
        }
    }

    /// Begins a fresh session. Safe to call from any phase.
    pub fn start(&mut self, now: Instant) {
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.level = 1;
        self.direction = Direction::Right;
        self.store.clear_bullets();
        self.store.enemies = spawn_formation();
        self.store.player = Player::centered();
        self.ending = None;
        self.phase = Phase::Playing;
        self.timers = Some(RoundTimers::arm(self.level, now));
        info!("session started");
    }

    fn resolve(&mut self, now: Instant) {
        let report = collision::resolve(&mut self.store, &mut self.score, &mut self.lives);
        if !report.kills.is_empty() {
            debug!(kills = ?report.kills, points = report.points, score = self.score, "enemies destroyed");
        }
        if report.player_hit {
            debug!(lives = self.lives, "player hit");
        }
        match report.verdict {
            Verdict::Continue => {}
            Verdict::Cleared => self.advance_level(now),
            Verdict::LivesExhausted => self.end(Ending::LivesExhausted),
            Verdict::Invaded => self.end(Ending::Invaded),
        }
    }

    fn advance_level(&mut self, now: Instant) {
        self.level += 1;
        self.store.enemy_bullets.clear();
        self.store.enemies = spawn_formation();
        self.timers = Some(RoundTimers::arm(self.level, now));
        info!(level = self.level, score = self.score, "formation cleared");
    }

    fn end(&mut self, ending: Ending) {
        self.phase = Phase::GameOver;
        self.ending = Some(ending);
        self.timers = None;
        info!(?ending, score = self.score, level = self.level, "game over");
    }

    pub fn snapshot(&self) -> Snapshot {
        let bullet_view = |b: &entities::Bullet| BulletView {
            id: b.id,
            x: b.x,
            y: b.y,
        };
        Snapshot {
            phase: self.phase,
            player_x: self.store.player.x,
            player_y: self.store.player.y(),
            enemies: self
                .store
                .live_enemies()
                .map(|e| EnemyView {
                    id: e.id,
                    x: e.x,
                    y: e.y,
                    rank: e.rank,
                })
                .collect(),
            bullets: self.store.bullets.iter().map(bullet_view).collect(),
            enemy_bullets: self.store.enemy_bullets.iter().map(bullet_view).collect(),
            score: self.score,
            lives: self.lives,
            level: self.level,
        }
    }
}
