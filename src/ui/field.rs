//! Braille-resolution playfield. Each terminal cell holds a 2x4 dot grid, and
//! the 600x500 world is scaled onto however many dots the area offers.

use std::collections::HashMap;

use ratatui::prelude::*;

use invaders::engine::entities::{
    Rank, BULLET_HEIGHT, BULLET_WIDTH, ENEMY_HEIGHT, ENEMY_WIDTH, FIELD_HEIGHT, FIELD_WIDTH,
    PLAYER_HEIGHT, PLAYER_WIDTH,
};
use invaders::engine::formation::STEP_X;
use invaders::engine::snapshot::Snapshot;

type DotMap = HashMap<(usize, usize), u8>;

const BG: Color = Color::Rgb(0, 0, 5);

fn braille_bit(sub_x: usize, sub_y: usize) -> u8 {
    match (sub_x, sub_y) {
        (0, 0) => 0x01,
        (0, 1) => 0x02,
        (0, 2) => 0x04,
        (0, 3) => 0x40,
        (1, 0) => 0x08,
        (1, 1) => 0x10,
        (1, 2) => 0x20,
        (1, 3) => 0x80,
        _ => 0,
    }
}

/// Dot canvas for one frame.
struct Canvas {
    w: usize,
    h: usize,
    bw: i32,
    bh: i32,
    sx: f32,
    sy: f32,
    grid: Vec<Vec<(char, Style)>>,
}

impl Canvas {
    fn new(w: usize, h: usize) -> Self {
        let bw = (w * 2) as i32;
        let bh = (h * 4) as i32;
        Self {
            w,
            h,
            bw,
            bh,
            sx: bw as f32 / FIELD_WIDTH,
            sy: bh as f32 / FIELD_HEIGHT,
            grid: vec![vec![(' ', Style::default().bg(BG)); w]; h],
        }
    }

    /// World point to dot coordinates.
    fn to_dots(&self, x: f32, y: f32) -> (i32, i32) {
        ((x * self.sx) as i32, (y * self.sy) as i32)
    }

    fn set_dot(&self, map: &mut DotMap, bx: i32, by: i32) {
        if bx < 0 || by < 0 || bx >= self.bw || by >= self.bh {
            return;
        }
        let cx = bx as usize / 2;
        let cy = by as usize / 4;
        *map.entry((cx, cy)).or_insert(0) |= braille_bit(bx as usize % 2, by as usize % 4);
    }

    fn stamp(&self, map: &mut DotMap, cx: i32, cy: i32, pixels: &[(i32, i32)]) {
        for &(dx, dy) in pixels {
            self.set_dot(map, cx + dx, cy + dy);
        }
    }

    fn write_layer(&mut self, map: &DotMap, color: Color, bold: bool) {
        for (&(cx, cy), &bits) in map {
            if cx < self.w && cy < self.h && bits != 0 {
                let ch = char::from_u32(0x2800 + bits as u32).unwrap_or(' ');
                let mut style = Style::default().fg(color).bg(BG);
                if bold {
                    style = style.add_modifier(Modifier::BOLD);
                }
                self.grid[cy][cx] = (ch, style);
            }
        }
    }

    fn into_lines(self) -> Vec<Line<'static>> {
        self.grid
            .into_iter()
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .into_iter()
                    .map(|(ch, style)| Span::styled(String::from(ch), style))
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

fn enemy_sprite(rank: Rank, frame: bool) -> &'static [(i32, i32)] {
    match (rank, frame) {
        // Squid
        (Rank::Top, true) => &[
            (0, -2),
            (-1, -1), (0, -1), (1, -1),
            (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0),
            (-2, 1), (0, 1), (2, 1),
            (-1, 2), (1, 2),
        ],
        (Rank::Top, false) => &[
            (0, -2),
            (-1, -1), (0, -1), (1, -1),
            (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0),
            (-2, 1), (0, 1), (2, 1),
            (-3, 2), (3, 2),
        ],
        // Crab
        (Rank::Mid, true) => &[
            (-1, -2), (1, -2),
            (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1),
            (-3, 0), (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0), (3, 0),
            (-3, 1), (-1, 1), (0, 1), (1, 1), (3, 1),
            (-3, 2), (-2, 2), (2, 2), (3, 2),
        ],
        (Rank::Mid, false) => &[
            (-1, -2), (1, -2),
            (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1),
            (-3, 0), (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0), (3, 0),
            (-3, 1), (-1, 1), (0, 1), (1, 1), (3, 1),
            (-2, 2), (-1, 2), (1, 2), (2, 2),
        ],
        // Octopus
        (Rank::Bottom, true) => &[
            (-2, -2), (-1, -2), (0, -2), (1, -2), (2, -2),
            (-3, -1), (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1), (3, -1),
            (-3, 0), (-2, 0), (0, 0), (2, 0), (3, 0),
            (-3, 1), (-1, 1), (0, 1), (1, 1), (3, 1),
            (-2, 2), (2, 2),
        ],
        (Rank::Bottom, false) => &[
            (-2, -2), (-1, -2), (0, -2), (1, -2), (2, -2),
            (-3, -1), (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1), (3, -1),
            (-3, 0), (-2, 0), (0, 0), (2, 0), (3, 0),
            (-3, 1), (-1, 1), (0, 1), (1, 1), (3, 1),
            (-3, 2), (3, 2),
        ],
    }
}

const SHIP: &[(i32, i32)] = &[
    (0, -3),
    (-1, -2), (0, -2), (1, -2),
    (-1, -1), (0, -1), (1, -1),
    (-3, 0), (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0), (3, 0),
    (-4, 1), (-3, 1), (-2, 1), (-1, 1), (0, 1), (1, 1), (2, 1), (3, 1), (4, 1),
    (-4, 2), (-3, 2), (-2, 2), (-1, 2), (0, 2), (1, 2), (2, 2), (3, 2), (4, 2),
];

pub fn rank_color(rank: Rank) -> Color {
    match rank {
        Rank::Top => Color::Rgb(80, 255, 120),
        Rank::Mid => Color::Rgb(255, 220, 80),
        Rank::Bottom => Color::Rgb(255, 80, 80),
    }
}

pub fn render_field(snap: &Snapshot, width: usize, height: usize) -> Vec<Line<'static>> {
    let mut canvas = Canvas::new(width, height);

    // ── Enemies ───────────────────────────────────────────────────────
    for enemy in &snap.enemies {
        let mut map = DotMap::new();
        // Legs flip on every formation step.
        let frame = ((enemy.x / STEP_X) as i32) % 2 == 0;
        let (cx, cy) = canvas.to_dots(enemy.x + ENEMY_WIDTH / 2.0, enemy.y + ENEMY_HEIGHT / 2.0);
        canvas.stamp(&mut map, cx, cy, enemy_sprite(enemy.rank, frame));
        canvas.write_layer(&map, rank_color(enemy.rank), false);
    }

    // ── Player bullets ────────────────────────────────────────────────
    let mut map = DotMap::new();
    for bullet in &snap.bullets {
        let (bx, top) = canvas.to_dots(bullet.x + BULLET_WIDTH / 2.0, bullet.y);
        let (_, bottom) = canvas.to_dots(bullet.x, bullet.y + BULLET_HEIGHT);
        for by in top..=bottom.max(top) {
            canvas.set_dot(&mut map, bx, by);
        }
    }
    canvas.write_layer(&map, Color::Rgb(255, 255, 200), true);

    // ── Enemy bullets ─────────────────────────────────────────────────
    let mut map = DotMap::new();
    for bullet in &snap.enemy_bullets {
        let (bx, by) = canvas.to_dots(bullet.x + BULLET_WIDTH / 2.0, bullet.y);
        // Zigzag bolt, wiggling as it falls
        let zigzag = if ((bullet.y / 16.0) as i32) % 2 == 0 {
            [(0, 0), (1, 1), (0, 2), (-1, 3)]
        } else {
            [(0, 0), (-1, 1), (0, 2), (1, 3)]
        };
        canvas.stamp(&mut map, bx, by, &zigzag);
    }
    canvas.write_layer(&map, Color::Rgb(255, 100, 100), true);

    // ── Player ship ───────────────────────────────────────────────────
    let mut map = DotMap::new();
    let (px, py) = canvas.to_dots(snap.player_x + PLAYER_WIDTH / 2.0, snap.player_y + PLAYER_HEIGHT / 2.0);
    canvas.stamp(&mut map, px, py, SHIP);
    canvas.write_layer(&map, Color::Rgb(80, 200, 255), true);

    // ── Ground line ───────────────────────────────────────────────────
    if let Some(ground) = canvas.grid.last_mut() {
        for cell in ground.iter_mut() {
            if cell.0 == ' ' {
                *cell = ('\u{2500}', Style::default().fg(Color::Rgb(40, 80, 40)).bg(BG));
            }
        }
    }

    canvas.into_lines()
}
