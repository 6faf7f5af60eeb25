use std::time::{Duration, Instant};

use super::entities::{
    Bullet, EntityStore, Player, BULLET_HEIGHT, BULLET_WIDTH, ENEMY_BULLET_SPEED, FIELD_HEIGHT,
    PLAYER_BULLET_SPEED, PLAYER_HEIGHT, PLAYER_SPEED, PLAYER_WIDTH,
};
use super::input::InputLatch;

pub const FIRE_COOLDOWN: Duration = Duration::from_millis(300);

/// One visual frame of movement: ship from the latch, then both bullet
/// populations, then culling of anything that left the field.
pub fn update(store: &mut EntityStore, latch: &InputLatch) {
    move_player(&mut store.player, latch);
    advance_bullets(store);
}

/// Both intents may be held at once; each step is clamped on its own.
pub fn move_player(player: &mut Player, latch: &InputLatch) {
    if latch.left() {
        player.x = (player.x - PLAYER_SPEED).max(0.0);
    }
    if latch.right() {
        player.x = (player.x + PLAYER_SPEED).min(Player::max_x());
    }
}

pub fn advance_bullets(store: &mut EntityStore) {
    for b in &mut store.bullets {
        b.y -= PLAYER_BULLET_SPEED;
    }
    store.bullets.retain(|b| b.y > -BULLET_HEIGHT);

    for b in &mut store.enemy_bullets {
        b.y += ENEMY_BULLET_SPEED;
    }
    store.enemy_bullets.retain(|b| b.y < FIELD_HEIGHT);
}

/// Where a fresh player bullet appears: centred on the ship, just above it.
pub fn muzzle(player: &Player) -> (f32, f32) {
    (
        player.x + PLAYER_WIDTH / 2.0 - BULLET_WIDTH / 2.0,
        FIELD_HEIGHT - PLAYER_HEIGHT - 30.0,
    )
}

/// Rate limiter for the fire action. Requests inside the cooldown are
/// dropped, not queued.
#[derive(Clone, Copy, Debug, Default)]
pub struct Trigger {
    last_shot: Option<Instant>,
}

impl Trigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true and records the shot if the cooldown has elapsed.
    pub fn pull(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_shot {
            if now.saturating_duration_since(last) < FIRE_COOLDOWN {
                return false;
            }
        }
        self.last_shot = Some(now);
        true
    }
}

/// Spawns a player bullet if the trigger allows it.
pub fn fire(store: &mut EntityStore, trigger: &mut Trigger, id: u64, now: Instant) -> bool {
    if !trigger.pull(now) {
        return false;
    }
    let (x, y) = muzzle(&store.player);
    store.bullets.push(Bullet { id, x, y });
    true
}
