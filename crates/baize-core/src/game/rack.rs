//! Ball identity, colors, and the opening rack layout.

use glam::Vec2;

use crate::game::config::{BALL_RADIUS, TABLE_H, TABLE_W};

pub const CUE_ID: u8 = 0;
pub const EIGHT_ID: u8 = 8;

/// Which group a ball belongs to for scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallGroup {
    Cue,
    Solid,
    Eight,
    Stripe,
}

impl BallGroup {
    pub fn from_id(id: u8) -> Self {
        match id {
            0 => BallGroup::Cue,
            8 => BallGroup::Eight,
            1..=7 => BallGroup::Solid,
            _ => BallGroup::Stripe,
        }
    }
}

/// Base colors for balls 0..=8; stripes reuse the solid palette.
pub const BALL_COLORS: [[f32; 3]; 9] = [
    [1.0, 1.0, 1.0],    // 0 cue
    [0.92, 0.70, 0.03], // 1 yellow
    [0.23, 0.51, 0.96], // 2 blue
    [0.94, 0.27, 0.27], // 3 red
    [0.66, 0.33, 0.97], // 4 purple
    [0.98, 0.45, 0.09], // 5 orange
    [0.13, 0.77, 0.37], // 6 green
    [0.50, 0.11, 0.11], // 7 maroon
    [0.0, 0.0, 0.0],    // 8 black
];

/// Render color for any ball id. Stripes (9..=15) take the color of the
/// solid with the matching number.
pub fn ball_color(id: u8) -> [f32; 3] {
    let idx = if id > EIGHT_ID { id - 8 } else { id };
    BALL_COLORS[idx as usize]
}

/// Where the cue ball spawns at the break and after a scratch.
pub fn break_spot() -> Vec2 {
    Vec2::new(TABLE_W / 4.0, TABLE_H / 2.0)
}

/// The fifteen object balls in a triangle, apex toward the cue ball.
/// Row i holds i+1 balls; the 8-ball sits in the middle of the third row.
/// Remaining ids are assigned in ascending order, skipping 8.
pub fn rack_layout() -> [(u8, Vec2); 15] {
    let apex = Vec2::new(TABLE_W * 0.75, TABLE_H / 2.0);
    let spacing = BALL_RADIUS * 2.0;

    let mut out = [(0u8, Vec2::ZERO); 15];
    let mut slot = 0;
    let mut next_id = 1u8;
    for i in 0..5u32 {
        for j in 0..=i {
            let id = if i == 2 && j == 1 {
                EIGHT_ID
            } else {
                let id = next_id;
                next_id += 1;
                if next_id == EIGHT_ID {
                    next_id += 1;
                }
                id
            };
            let pos = Vec2::new(
                apex.x + i as f32 * spacing * 0.866,
                apex.y - i as f32 * BALL_RADIUS + j as f32 * spacing,
            );
            out[slot] = (id, pos);
            slot += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rack_has_fifteen_unique_ids() {
        let rack = rack_layout();
        let mut seen = [false; 16];
        for (id, _) in rack {
            assert!(id >= 1 && id <= 15);
            assert!(!seen[id as usize], "duplicate id {}", id);
            seen[id as usize] = true;
        }
    }

    #[test]
    fn eight_ball_centered_in_third_row() {
        let rack = rack_layout();
        // slots: row0 = 0, row1 = 1..=2, row2 = 3..=5; middle of row2 is slot 4
        assert_eq!(rack[4].0, EIGHT_ID);
        let apex = Vec2::new(TABLE_W * 0.75, TABLE_H / 2.0);
        assert!((rack[4].1.y - apex.y).abs() < 1e-4);
    }

    #[test]
    fn balls_do_not_overlap() {
        let rack = rack_layout();
        for a in 0..rack.len() {
            for b in (a + 1)..rack.len() {
                let d = rack[a].1.distance(rack[b].1);
                assert!(d > BALL_RADIUS * 2.0 - 0.5, "balls {} and {} overlap", a, b);
            }
        }
    }

    #[test]
    fn stripe_colors_mirror_solids() {
        for id in 9u8..=15 {
            assert_eq!(ball_color(id), ball_color(id - 8));
        }
        assert_eq!(ball_color(8), [0.0, 0.0, 0.0]);
    }
}
