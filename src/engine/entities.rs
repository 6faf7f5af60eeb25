//! Entity store: the player, both bullet populations and the enemy formation.
//!
//! Plain data only. Every rule that moves or removes these lives in the
//! sibling controller modules.

pub const FIELD_WIDTH: f32 = 600.0;
pub const FIELD_HEIGHT: f32 = 500.0;

pub const PLAYER_WIDTH: f32 = 40.0;
pub const PLAYER_HEIGHT: f32 = 20.0;
pub const PLAYER_SPEED: f32 = 5.0;
/// Gap between the bottom of the ship and the bottom of the playfield.
pub const PLAYER_BOTTOM_GAP: f32 = 10.0;

pub const ENEMY_WIDTH: f32 = 30.0;
pub const ENEMY_HEIGHT: f32 = 20.0;
pub const ENEMY_ROWS: usize = 4;
pub const ENEMY_COLS: usize = 8;
pub const ENEMY_H_SPACING: f32 = 50.0;
pub const ENEMY_V_SPACING: f32 = 40.0;
pub const FORMATION_OFFSET: f32 = 50.0;

pub const BULLET_WIDTH: f32 = 4.0;
pub const BULLET_HEIGHT: f32 = 12.0;
pub const PLAYER_BULLET_SPEED: f32 = 8.0;
pub const ENEMY_BULLET_SPEED: f32 = 4.0;

pub const STARTING_LIVES: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rank {
    Top,    // 30 pts
    Mid,    // 20 pts
    Bottom, // 10 pts
}

impl Rank {
    /// Ranks cycle every three rows.
    pub fn from_row(row: usize) -> Self {
        match row % 3 {
            0 => Rank::Top,
            1 => Rank::Mid,
            _ => Rank::Bottom,
        }
    }

    pub fn index(&self) -> u32 {
        match self {
            Rank::Top => 0,
            Rank::Mid => 1,
            Rank::Bottom => 2,
        }
    }

    pub fn points(&self) -> u32 {
        (3 - self.index()) * 10
    }
}

/// Axis-aligned rectangle in playfield units, origin at the top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict overlap: touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
}

impl Player {
    pub fn centered() -> Self {
        Self {
            x: FIELD_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
        }
    }

    /// Top edge of the ship; the ship never leaves this row.
    pub fn y(&self) -> f32 {
        FIELD_HEIGHT - PLAYER_HEIGHT - PLAYER_BOTTOM_GAP
    }

    pub fn max_x() -> f32 {
        FIELD_WIDTH - PLAYER_WIDTH
    }

    /// Band enemy bullets are tested against. It is anchored to the baseline
    /// rather than the ship's drawn rectangle.
    pub fn hit_band(&self) -> Rect {
        let top = FIELD_HEIGHT - PLAYER_HEIGHT - 20.0;
        let bottom = FIELD_HEIGHT - PLAYER_BOTTOM_GAP;
        Rect::new(self.x, top, PLAYER_WIDTH, bottom - top)
    }
}

/// A projectile; player and enemy bullets share the shape and differ only in
/// which collection holds them.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub id: u64,
    pub x: f32,
    pub y: f32,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, BULLET_WIDTH, BULLET_HEIGHT)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub rank: Rank,
    pub alive: bool,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, ENEMY_WIDTH, ENEMY_HEIGHT)
    }
}

/// Canonical grid position of the enemy at `row`, `col`.
pub fn grid_position(row: usize, col: usize) -> (f32, f32) {
    (
        col as f32 * ENEMY_H_SPACING + FORMATION_OFFSET,
        row as f32 * ENEMY_V_SPACING + FORMATION_OFFSET,
    )
}

/// Fresh formation, row-major, ids from 0.
pub fn spawn_formation() -> Vec<Enemy> {
    let mut enemies = Vec::with_capacity(ENEMY_ROWS * ENEMY_COLS);
    let mut id = 0;
    for row in 0..ENEMY_ROWS {
        for col in 0..ENEMY_COLS {
            let (x, y) = grid_position(row, col);
            enemies.push(Enemy {
                id,
                x,
                y,
                rank: Rank::from_row(row),
                alive: true,
            });
            id += 1;
        }
    }
    enemies
}

/// Mutable board contents for one session.
#[derive(Clone, Debug)]
pub struct EntityStore {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            player: Player::centered(),
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            enemies: Vec::new(),
        }
    }

    pub fn live_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.alive)
    }

    pub fn live_enemy_count(&self) -> usize {
        self.live_enemies().count()
    }

    /// True only for a populated formation with nobody left standing.
    pub fn formation_cleared(&self) -> bool {
        !self.enemies.is_empty() && self.enemies.iter().all(|e| !e.alive)
    }

    pub fn clear_bullets(&mut self) {
        self.bullets.clear();
        self.enemy_bullets.clear();
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}
