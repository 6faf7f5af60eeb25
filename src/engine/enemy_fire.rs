use rand::Rng;

use super::entities::{Bullet, EntityStore, BULLET_WIDTH, ENEMY_HEIGHT, ENEMY_WIDTH};

/// Picks one live enemy uniformly at random and drops a bullet from its
/// underside. Returns the shooter's id, or `None` when nobody is alive.
pub fn fire<R: Rng + ?Sized>(store: &mut EntityStore, rng: &mut R, id: u64) -> Option<u32> {
    let live = store.live_enemy_count();
    if live == 0 {
        return None;
    }
    let pick = rng.gen_range(0..live);
    let shooter = store.live_enemies().nth(pick)?;
    let bullet = Bullet {
        id,
        x: shooter.x + ENEMY_WIDTH / 2.0 - BULLET_WIDTH / 2.0,
        y: shooter.y + ENEMY_HEIGHT,
    };
    let shooter_id = shooter.id;
    store.enemy_bullets.push(bullet);
    Some(shooter_id)
}
