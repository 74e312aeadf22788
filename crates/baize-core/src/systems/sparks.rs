//! Spark particles spawned on hard ball-ball impacts.
//!
//! Purely cosmetic — never feeds back into physics or game state, safe to
//! run every frame unconditionally.

use glam::Vec2;

use crate::systems::rng::Rng;

/// Life lost per tick; 1.0 / 0.05 = 20 ticks on screen.
pub const SPARK_LIFE_DECAY: f32 = 0.05;
/// Launch speed range in units/frame.
pub const SPARK_MIN_SPEED: f32 = 1.0;
pub const SPARK_MAX_SPEED: f32 = 4.0;

/// The two accent colors sparks flicker between.
pub const SPARK_AMBER: [f32; 3] = [0.98, 0.80, 0.08];
pub const SPARK_WHITE: [f32; 3] = [1.0, 1.0, 1.0];

/// A single spark: position, per-frame velocity, remaining life 1.0 → 0.0.
#[derive(Debug, Clone, Copy)]
pub struct Spark {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub color: [f32; 3],
}

/// Owner of all live sparks.
pub struct SparkSystem {
    sparks: Vec<Spark>,
    rng: Rng,
}

impl SparkSystem {
    pub fn new(seed: u64) -> Self {
        Self {
            sparks: Vec::with_capacity(64),
            rng: Rng::new(seed),
        }
    }

    /// Spawn `count` sparks at a point, each with a random direction,
    /// random speed, and one of the two accent colors.
    pub fn spawn(&mut self, at: Vec2, count: usize) {
        for _ in 0..count {
            let angle = self.rng.next_f32() * std::f32::consts::TAU;
            let speed = self.rng.next_range(SPARK_MIN_SPEED, SPARK_MAX_SPEED);
            let color = if self.rng.next_f32() > 0.5 {
                SPARK_AMBER
            } else {
                SPARK_WHITE
            };
            self.sparks.push(Spark {
                pos: at,
                vel: Vec2::from_angle(angle) * speed,
                life: 1.0,
                color,
            });
        }
    }

    /// Advance all sparks one tick and drop the expired ones.
    pub fn advance(&mut self) {
        self.sparks.retain_mut(|s| {
            s.pos += s.vel;
            s.life -= SPARK_LIFE_DECAY;
            s.life > 0.0
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Spark> {
        self.sparks.iter()
    }

    pub fn len(&self) -> usize {
        self.sparks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sparks.is_empty()
    }

    pub fn clear(&mut self) {
        self.sparks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_creates_requested_count() {
        let mut sparks = SparkSystem::new(42);
        sparks.spawn(Vec2::new(10.0, 20.0), 8);
        assert_eq!(sparks.len(), 8);
        for s in sparks.iter() {
            assert_eq!(s.pos, Vec2::new(10.0, 20.0));
            assert!((s.life - 1.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn spawn_speed_within_range() {
        let mut sparks = SparkSystem::new(42);
        sparks.spawn(Vec2::ZERO, 100);
        for s in sparks.iter() {
            let speed = s.vel.length();
            assert!(
                speed > SPARK_MIN_SPEED - 1e-3 && speed < SPARK_MAX_SPEED + 1e-3,
                "speed out of range: {}",
                speed
            );
        }
    }

    #[test]
    fn spawn_uses_only_accent_colors() {
        let mut sparks = SparkSystem::new(42);
        sparks.spawn(Vec2::ZERO, 100);
        for s in sparks.iter() {
            assert!(s.color == SPARK_AMBER || s.color == SPARK_WHITE);
        }
    }

    #[test]
    fn spark_expires_after_twenty_ticks() {
        let mut sparks = SparkSystem::new(42);
        sparks.spawn(Vec2::ZERO, 1);
        for _ in 0..19 {
            sparks.advance();
        }
        assert_eq!(sparks.len(), 1, "spark should survive 19 ticks");
        sparks.advance();
        assert!(sparks.is_empty(), "spark should expire on tick 20");
    }

    #[test]
    fn advance_integrates_position() {
        let mut sparks = SparkSystem::new(42);
        sparks.spawn(Vec2::ZERO, 1);
        let vel = sparks.iter().next().unwrap().vel;
        sparks.advance();
        let pos = sparks.iter().next().unwrap().pos;
        assert!((pos - vel).length() < 1e-6);
    }

    #[test]
    fn clear_removes_everything() {
        let mut sparks = SparkSystem::new(42);
        sparks.spawn(Vec2::ZERO, 8);
        sparks.clear();
        assert!(sparks.is_empty());
    }
}
