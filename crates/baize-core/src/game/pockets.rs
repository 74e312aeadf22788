//! Pocket placement and the per-tick pocket scan.

use glam::Vec2;

use crate::game::config::{POCKET_RADIUS, TABLE_H, TABLE_W};
use crate::game::context::GameContext;

/// Six pocket centers: four corners plus two side pockets nudged slightly
/// off the rail line.
pub fn pocket_centers() -> [Vec2; 6] {
    [
        Vec2::new(0.0, 0.0),
        Vec2::new(TABLE_W / 2.0, -5.0),
        Vec2::new(TABLE_W, 0.0),
        Vec2::new(0.0, TABLE_H),
        Vec2::new(TABLE_W / 2.0, TABLE_H + 5.0),
        Vec2::new(TABLE_W, TABLE_H),
    ]
}

/// Ids of balls whose centers are inside a pocket's capture radius.
/// Each ball appears at most once even if it overlaps two pockets.
pub fn scan(ctx: &GameContext) -> Vec<u8> {
    let pockets = pocket_centers();
    let capture_sq = POCKET_RADIUS * POCKET_RADIUS;

    let mut potted = Vec::new();
    for ball in &ctx.balls {
        let (pos, _) = ctx.physics.body_position(&ball.body);
        for pocket in &pockets {
            if pos.distance_squared(*pocket) < capture_sq {
                potted.push(ball.id);
                break;
            }
        }
    }
    potted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ball_in_corner_pocket_detected_once() {
        let mut ctx = GameContext::new();
        ctx.spawn_ball(3, Vec2::new(5.0, 5.0), Vec2::ZERO);
        let potted = scan(&ctx);
        assert_eq!(potted, vec![3]);
    }

    #[test]
    fn ball_mid_table_not_detected() {
        let mut ctx = GameContext::new();
        ctx.spawn_ball(3, Vec2::new(TABLE_W / 2.0, TABLE_H / 2.0), Vec2::ZERO);
        assert!(scan(&ctx).is_empty());
    }

    #[test]
    fn capture_boundary_is_exclusive() {
        let mut ctx = GameContext::new();
        ctx.spawn_ball(1, Vec2::new(POCKET_RADIUS + 0.1, 0.0), Vec2::ZERO);
        ctx.spawn_ball(2, Vec2::new(POCKET_RADIUS - 0.1, 0.0), Vec2::ZERO);
        let potted = scan(&ctx);
        assert_eq!(potted, vec![2]);
    }

    #[test]
    fn scan_reports_each_ball_at_most_once() {
        let mut ctx = GameContext::new();
        // deep in the corner, on the axis shared by both adjoining rails
        ctx.spawn_ball(7, Vec2::new(1.0, 1.0), Vec2::ZERO);
        ctx.spawn_ball(9, Vec2::new(TABLE_W / 2.0, -4.0), Vec2::ZERO);
        let potted = scan(&ctx);
        assert_eq!(potted.len(), 2);
        for id in [7u8, 9] {
            assert_eq!(potted.iter().filter(|&&p| p == id).count(), 1);
        }
    }

    #[test]
    fn side_pockets_reach_over_the_rail_line() {
        let mut ctx = GameContext::new();
        ctx.spawn_ball(5, Vec2::new(TABLE_W / 2.0, 2.0), Vec2::ZERO);
        assert_eq!(scan(&ctx), vec![5]);
    }
}
