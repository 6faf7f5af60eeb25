use std::time::{Duration, Instant};

use invaders::engine::entities::{
    grid_position, Bullet, Player, ENEMY_COLS, ENEMY_ROWS, FIELD_WIDTH, PLAYER_WIDTH,
};
use invaders::engine::formation::Direction;
use invaders::engine::input::{InputEvent, Intent};
use invaders::engine::{Command, Ending, Engine, Phase};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn engine() -> Engine<StdRng> {
    Engine::new(StdRng::seed_from_u64(42))
}

fn playing() -> (Engine<StdRng>, Instant) {
    let mut e = engine();
    let t0 = Instant::now();
    e.dispatch(Command::Input(InputEvent::Down(Intent::Confirm)), t0);
    (e, t0)
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn frames(e: &mut Engine<StdRng>, n: usize, now: Instant) {
    for _ in 0..n {
        e.dispatch(Command::Frame, now);
    }
}

fn hold(e: &mut Engine<StdRng>, intent: Intent, now: Instant) {
    e.dispatch(Command::Input(InputEvent::Down(intent)), now);
}

fn assert_canonical_grid(e: &Engine<StdRng>) {
    let enemies = &e.store().enemies;
    assert_eq!(enemies.len(), ENEMY_ROWS * ENEMY_COLS);
    for (i, enemy) in enemies.iter().enumerate() {
        let (row, col) = (i / ENEMY_COLS, i % ENEMY_COLS);
        assert_eq!(enemy.id, i as u32);
        assert!(enemy.alive);
        assert_eq!((enemy.x, enemy.y), grid_position(row, col));
        assert_eq!(enemy.rank.index(), (row % 3) as u32);
    }
}

// ── lifecycle ────────────────────────────────────────────────────────────────

#[test]
fn starts_in_menu_and_ignores_play_commands() {
    let mut e = engine();
    let t0 = Instant::now();
    assert_eq!(e.phase(), Phase::Menu);
    let before = e.snapshot();
    hold(&mut e, Intent::Fire, t0);
    e.dispatch(Command::Frame, t0);
    e.dispatch(Command::FormationStep, t0);
    e.dispatch(Command::EnemyFire, t0);
    e.tick(t0 + ms(5_000));
    assert_eq!(e.snapshot(), before);
    assert!(!e.timers_armed());
}

#[test]
fn confirm_starts_a_fresh_session() {
    let (e, _) = playing();
    assert_eq!(e.phase(), Phase::Playing);
    assert_eq!(e.score(), 0);
    assert_eq!(e.lives(), 3);
    assert_eq!(e.level(), 1);
    assert_eq!(e.direction(), Direction::Right);
    assert_eq!(e.store().player, Player::centered());
    assert!(e.store().bullets.is_empty());
    assert!(e.store().enemy_bullets.is_empty());
    assert!(e.timers_armed());
    assert_canonical_grid(&e);
}

#[test]
fn confirm_is_ignored_while_playing() {
    let (mut e, t0) = playing();
    e.store_mut().enemies[0].alive = false;
    hold(&mut e, Intent::Confirm, t0);
    assert!(!e.store().enemies[0].alive);
}

#[test]
fn restart_is_idempotent_regardless_of_prior_state() {
    let (mut e, t0) = playing();
    for _ in 0..3 {
        e.store_mut().enemy_bullets.push(Bullet { id: 0, x: 290.0, y: 460.0 });
        e.dispatch(Command::Frame, t0);
    }
    assert_eq!(e.phase(), Phase::GameOver);
    e.store_mut().player.x = 0.0;
    e.store_mut().bullets.push(Bullet { id: 7, x: 5.0, y: 300.0 });

    hold(&mut e, Intent::Confirm, t0 + ms(10));
    let first = e.snapshot();
    e.start(t0 + ms(20));
    assert_eq!(e.snapshot(), first);
    assert_eq!(first.phase, Phase::Playing);
    assert_eq!((first.score, first.lives, first.level), (0, 3, 1));
    assert_eq!(e.direction(), Direction::Right);
    assert_eq!(e.ending(), None);
    assert_canonical_grid(&e);
}

// ── motion ───────────────────────────────────────────────────────────────────

#[test]
fn player_stays_inside_the_field() {
    let (mut e, t0) = playing();
    hold(&mut e, Intent::MoveLeft, t0);
    for _ in 0..100 {
        e.dispatch(Command::Frame, t0);
        assert!(e.store().player.x >= 0.0);
    }
    assert_eq!(e.store().player.x, 0.0);

    e.dispatch(Command::Input(InputEvent::Up(Intent::MoveLeft)), t0);
    hold(&mut e, Intent::MoveRight, t0);
    for _ in 0..200 {
        e.dispatch(Command::Frame, t0);
        assert!(e.store().player.x <= FIELD_WIDTH - PLAYER_WIDTH);
    }
    assert_eq!(e.store().player.x, FIELD_WIDTH - PLAYER_WIDTH);
}

#[test]
fn opposite_intents_cancel() {
    let (mut e, t0) = playing();
    hold(&mut e, Intent::MoveLeft, t0);
    hold(&mut e, Intent::MoveRight, t0);
    frames(&mut e, 10, t0);
    assert_eq!(e.store().player, Player::centered());
}

#[test]
fn movement_step_is_five_units() {
    let (mut e, t0) = playing();
    let x0 = e.store().player.x;
    hold(&mut e, Intent::MoveRight, t0);
    frames(&mut e, 3, t0);
    assert_eq!(e.store().player.x, x0 + 15.0);
}

#[test]
fn player_bullet_leaves_through_the_top() {
    let (mut e, t0) = playing();
    // Fire from the right edge, clear of the formation's columns.
    e.store_mut().player.x = FIELD_WIDTH - PLAYER_WIDTH;
    hold(&mut e, Intent::Fire, t0);
    let b = &e.store().bullets[0];
    assert_eq!((b.x, b.y), (578.0, 450.0));

    frames(&mut e, 57, t0);
    assert_eq!(e.store().bullets.len(), 1);
    assert_eq!(e.store().bullets[0].y, -6.0);
    frames(&mut e, 1, t0);
    assert!(e.store().bullets.is_empty());
}

#[test]
fn enemy_bullet_leaves_through_the_bottom() {
    let (mut e, t0) = playing();
    e.store_mut().enemy_bullets.push(Bullet { id: 0, x: 10.0, y: 490.0 });
    frames(&mut e, 2, t0);
    assert_eq!(e.store().enemy_bullets[0].y, 498.0);
    frames(&mut e, 1, t0);
    assert!(e.store().enemy_bullets.is_empty());
    assert_eq!(e.lives(), 3);
}

#[test]
fn fire_is_rate_limited() {
    let (mut e, t0) = playing();
    e.store_mut().player.x = FIELD_WIDTH - PLAYER_WIDTH;
    hold(&mut e, Intent::Fire, t0);
    hold(&mut e, Intent::Fire, t0 + ms(100));
    hold(&mut e, Intent::Fire, t0 + ms(299));
    assert_eq!(e.store().bullets.len(), 1);

    hold(&mut e, Intent::Fire, t0 + ms(300));
    let ids: Vec<u64> = e.store().bullets.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![0, 1]);
}

#[test]
fn fire_is_ignored_outside_play() {
    let mut e = engine();
    hold(&mut e, Intent::Fire, Instant::now());
    assert!(e.store().bullets.is_empty());
}

// ── collisions & scoring ─────────────────────────────────────────────────────

#[test]
fn hits_score_by_rank() {
    let (mut e, t0) = playing();
    // One bullet inside enemy 0 (rank 0), 8 (rank 1) and 16 (rank 2).
    // The frame moves each up 8 units before the collision pass.
    for (id, y) in [(0u64, 68.0), (1, 108.0), (2, 148.0)] {
        e.store_mut().bullets.push(Bullet { id, x: 60.0, y });
    }
    e.dispatch(Command::Frame, t0);

    assert_eq!(e.score(), 30 + 20 + 10);
    assert!(e.store().bullets.is_empty());
    for id in [0usize, 8, 16] {
        assert!(!e.store().enemies[id].alive);
    }
    assert_eq!(e.store().live_enemy_count(), 29);
}

#[test]
fn one_bullet_per_enemy_per_pass() {
    let (mut e, t0) = playing();
    e.store_mut().bullets.push(Bullet { id: 0, x: 60.0, y: 68.0 });
    e.store_mut().bullets.push(Bullet { id: 1, x: 62.0, y: 68.0 });
    e.dispatch(Command::Frame, t0);

    assert_eq!(e.score(), 30);
    let left: Vec<u64> = e.store().bullets.iter().map(|b| b.id).collect();
    assert_eq!(left, vec![1]);
}

#[test]
fn snapshot_hides_dead_enemies() {
    let (mut e, t0) = playing();
    e.store_mut().bullets.push(Bullet { id: 0, x: 60.0, y: 68.0 });
    e.dispatch(Command::Frame, t0);
    let snap = e.snapshot();
    assert_eq!(snap.enemies.len(), 31);
    assert!(snap.enemies.iter().all(|v| v.id != 0));
    // Dead enemies stay in the store until the round ends.
    assert_eq!(e.store().enemies.len(), 32);
}

#[test]
fn clearing_the_formation_advances_the_level() {
    let (mut e, t0) = playing();
    for enemy in e.store_mut().enemies.iter_mut().skip(1) {
        enemy.alive = false;
    }
    e.store_mut().enemy_bullets.push(Bullet { id: 0, x: 10.0, y: 300.0 });
    e.store_mut().bullets.push(Bullet { id: 0, x: 60.0, y: 68.0 });
    e.dispatch(Command::Frame, t0);

    assert_eq!(e.phase(), Phase::Playing);
    assert_eq!(e.level(), 2);
    assert_eq!(e.score(), 30);
    assert_eq!(e.lives(), 3);
    assert!(e.store().enemy_bullets.is_empty());
    assert_canonical_grid(&e);
    assert!(e.timers_armed());
}

#[test]
fn score_and_level_carry_across_rounds() {
    let (mut e, t0) = playing();
    for round in 1..=2u32 {
        for enemy in e.store_mut().enemies.iter_mut().skip(1) {
            enemy.alive = false;
        }
        e.store_mut().bullets.push(Bullet { id: 0, x: 60.0, y: 68.0 });
        e.dispatch(Command::Frame, t0);
        assert_eq!(e.level(), round + 1);
    }
    assert_eq!(e.score(), 60);
}

#[test]
fn enemy_bullet_costs_a_life() {
    let (mut e, t0) = playing();
    e.store_mut().enemy_bullets.push(Bullet { id: 0, x: 290.0, y: 460.0 });
    e.store_mut().enemy_bullets.push(Bullet { id: 1, x: 295.0, y: 460.0 });
    e.dispatch(Command::Frame, t0);

    assert_eq!(e.lives(), 2);
    let left: Vec<u64> = e.store().enemy_bullets.iter().map(|b| b.id).collect();
    assert_eq!(left, vec![1]);
    assert_eq!(e.phase(), Phase::Playing);
}

#[test]
fn bullet_outside_the_hit_band_misses() {
    let (mut e, t0) = playing();
    // Horizontally clear of the ship.
    e.store_mut().enemy_bullets.push(Bullet { id: 0, x: 100.0, y: 460.0 });
    // Still above the band after moving.
    e.store_mut().enemy_bullets.push(Bullet { id: 1, x: 290.0, y: 440.0 });
    e.dispatch(Command::Frame, t0);
    assert_eq!(e.lives(), 3);
    assert_eq!(e.store().enemy_bullets.len(), 2);
}

#[test]
fn last_life_ends_the_game_and_freezes_the_board() {
    let (mut e, t0) = playing();
    for expected in [2, 1, 0] {
        e.store_mut().enemy_bullets.push(Bullet { id: 0, x: 290.0, y: 460.0 });
        e.dispatch(Command::Frame, t0);
        assert_eq!(e.lives(), expected);
    }
    assert_eq!(e.phase(), Phase::GameOver);
    assert_eq!(e.ending(), Some(Ending::LivesExhausted));
    assert!(!e.timers_armed());

    let frozen = e.snapshot();
    hold(&mut e, Intent::MoveLeft, t0);
    hold(&mut e, Intent::Fire, t0 + ms(1_000));
    e.dispatch(Command::Frame, t0);
    e.dispatch(Command::FormationStep, t0);
    e.dispatch(Command::EnemyFire, t0);
    e.tick(t0 + ms(10_000));
    assert_eq!(e.snapshot(), frozen);
}

#[test]
fn invaders_reaching_the_bottom_end_the_game() {
    let (mut e, t0) = playing();
    e.store_mut().enemies[31].y = 420.0;
    e.dispatch(Command::Frame, t0);
    assert_eq!(e.phase(), Phase::GameOver);
    assert_eq!(e.ending(), Some(Ending::Invaded));
    assert_eq!(e.lives(), 3);
}

#[test]
fn dead_invaders_at_the_bottom_are_harmless() {
    let (mut e, t0) = playing();
    e.store_mut().enemies[31].alive = false;
    e.store_mut().enemies[31].y = 460.0;
    e.dispatch(Command::Frame, t0);
    assert_eq!(e.phase(), Phase::Playing);
}

// ── timers ───────────────────────────────────────────────────────────────────

#[test]
fn tick_runs_controllers_on_their_cadence() {
    let (mut e, t0) = playing();
    e.tick(t0 + ms(100));
    assert_eq!(e.store().enemies[0].x, 50.0);

    e.tick(t0 + ms(450));
    assert_eq!(e.store().enemies[0].x, 60.0);
    assert!(e.store().enemy_bullets.is_empty());

    e.tick(t0 + ms(1_400));
    assert_eq!(e.store().enemies[0].x, 70.0);
    assert_eq!(e.store().enemy_bullets.len(), 1);
}

#[test]
fn game_over_cancels_timers_and_restart_rearms_them() {
    let (mut e, t0) = playing();
    e.store_mut().enemies[0].y = 420.0;
    e.tick(t0 + ms(16));
    assert_eq!(e.phase(), Phase::GameOver);
    assert!(!e.timers_armed());

    let t1 = t0 + ms(5_000);
    hold(&mut e, Intent::Confirm, t1);
    assert!(e.timers_armed());
    e.tick(t1 + ms(449));
    assert_eq!(e.store().enemies[0].x, 50.0);
    e.tick(t1 + ms(450));
    assert_eq!(e.store().enemies[0].x, 60.0);
}
