use super::entities::{EntityStore, ENEMY_HEIGHT, FIELD_HEIGHT, PLAYER_HEIGHT};

/// A live enemy whose bottom edge reaches this line ends the session.
pub const INVASION_LINE: f32 = FIELD_HEIGHT - PLAYER_HEIGHT - 40.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Continue,
    /// Every enemy is dead; the next level should be dealt.
    Cleared,
    LivesExhausted,
    Invaded,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    /// Ids of enemies killed in this pass, in formation order.
    pub kills: Vec<u32>,
    pub points: u32,
    pub player_hit: bool,
    pub verdict: Verdict,
}

/// Runs bullet/enemy and bullet/player tests, applies score and lives, and
/// judges the round. Phase changes are left to the caller.
pub fn resolve(store: &mut EntityStore, score: &mut u32, lives: &mut u32) -> Report {
    let mut kills = Vec::new();
    let mut points = 0;

    // At most one bullet per enemy; a consumed bullet cannot hit again.
    for enemy in store.enemies.iter_mut().filter(|e| e.alive) {
        let target = enemy.rect();
        if let Some(i) = store.bullets.iter().position(|b| b.rect().overlaps(&target)) {
            store.bullets.remove(i);
            enemy.alive = false;
            points += enemy.rank.points();
            kills.push(enemy.id);
        }
    }
    *score += points;

    let band = store.player.hit_band();
    let mut player_hit = false;
    if let Some(i) = store.enemy_bullets.iter().position(|b| b.rect().overlaps(&band)) {
        store.enemy_bullets.remove(i);
        *lives = lives.saturating_sub(1);
        player_hit = true;
    }

    let verdict = if *lives == 0 {
        Verdict::LivesExhausted
    } else if store.formation_cleared() {
        Verdict::Cleared
    } else if store
        .live_enemies()
        .any(|e| e.y + ENEMY_HEIGHT >= INVASION_LINE)
    {
        Verdict::Invaded
    } else {
        Verdict::Continue
    };

    Report {
        kills,
        points,
        player_hit,
        verdict,
    }
}
