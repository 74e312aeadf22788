//! Table geometry and physics tuning constants.
//!
//! World units are pixels; dynamic quantities use rapier's per-second
//! convention. Constants that model per-frame behavior (damping, motion
//! threshold) are converted at the 60 Hz tick rate.

/// Fixed simulation timestep (60 Hz).
pub const TICK_DT: f32 = 1.0 / 60.0;

/// Playfield dimensions. The playable area spans (0,0)..(TABLE_W, TABLE_H).
pub const TABLE_W: f32 = 800.0;
pub const TABLE_H: f32 = 400.0;

pub const BALL_RADIUS: f32 = 10.0;
pub const POCKET_RADIUS: f32 = 22.0;
/// Thickness of the rail cushions surrounding the playfield.
pub const CUSHION_WIDTH: f32 = 30.0;

/// Ball material.
pub const BALL_RESTITUTION: f32 = 0.75;
pub const BALL_FRICTION: f32 = 0.01;
pub const BALL_DENSITY: f32 = 0.05;

/// Cloth drag, expressed as per-frame velocity loss.
pub const AIR_FRICTION: f32 = 0.01;
/// Equivalent continuous linear damping at the fixed tick rate.
pub const LINEAR_DAMPING: f32 = AIR_FRICTION * 60.0;

/// Rails are perfectly bouncy so balls keep their energy off the cushion.
pub const RAIL_RESTITUTION: f32 = 1.0;

/// A ball slower than this (units per frame) counts as stationary.
pub const MOTION_THRESHOLD: f32 = 0.05;

/// Minimum relative impact speed (units per frame) for a collision to
/// throw sparks.
pub const SPARK_SPEED_THRESHOLD: f32 = 0.5;
/// Sparks emitted per qualifying impact.
pub const SPARK_COUNT: usize = 8;

/// Power meter range and the firing contract.
pub const MAX_POWER: f32 = 100.0;
/// Releases at or below this power are treated as accidental taps.
pub const MIN_SHOT_POWER: f32 = 5.0;
pub const FORCE_MULTIPLIER: f32 = 2.5;
/// Converts the abstract shot impulse into a rapier impulse for a ball
/// of standard mass (density 0.05, radius 10).
pub const SHOT_IMPULSE_SCALE: f32 = 16_000.0;
