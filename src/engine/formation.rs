use super::entities::{Enemy, ENEMY_WIDTH, FIELD_WIDTH};

pub const STEP_X: f32 = 10.0;
pub const DROP_Y: f32 = 15.0;
pub const EDGE_MARGIN: f32 = 10.0;

/// Horizontal sweep direction of the whole formation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn sign(&self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn reversed(&self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// No live enemies; nothing moved.
    Idle,
    Sweep,
    /// Edge contact: direction reversed and the block dropped a row.
    Drop,
}

/// One formation tick. Edge detection uses live enemies only, but every
/// enemy (dead ones included) is shifted so the grid stays rigid.
pub fn step(enemies: &mut [Enemy], direction: &mut Direction) -> Step {
    let mut live = enemies.iter().filter(|e| e.alive).map(|e| e.x);
    let Some(first) = live.next() else {
        return Step::Idle;
    };
    let (min_x, max_x) = live.fold((first, first), |(lo, hi), x| (lo.min(x), hi.max(x)));

    let at_edge = match direction {
        Direction::Right => max_x + ENEMY_WIDTH >= FIELD_WIDTH - EDGE_MARGIN,
        Direction::Left => min_x <= EDGE_MARGIN,
    };
    if at_edge {
        *direction = direction.reversed();
    }

    let dx = direction.sign() * STEP_X;
    for enemy in enemies.iter_mut() {
        enemy.x += dx;
        if at_edge {
            enemy.y += DROP_Y;
        }
    }

    if at_edge {
        Step::Drop
    } else {
        Step::Sweep
    }
}
