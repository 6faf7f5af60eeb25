use super::entities::Rank;
use super::Phase;

#[derive(Clone, Debug, PartialEq)]
pub struct EnemyView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub rank: Rank,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BulletView {
    pub id: u64,
    pub x: f32,
    pub y: f32,
}

/// Everything a renderer needs for one frame. Dead enemies are already
/// filtered out.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub phase: Phase,
    pub player_x: f32,
    pub player_y: f32,
    pub enemies: Vec<EnemyView>,
    pub bullets: Vec<BulletView>,
    pub enemy_bullets: Vec<BulletView>,
    pub score: u32,
    pub lives: u32,
    pub level: u32,
}
