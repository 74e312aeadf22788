//! baize-core: a headless two-player 8-ball pool simulation.
//!
//! The crate owns physics, rules, input handling, and effects. It renders
//! nothing and talks to no platform: hosts queue [`InputEvent`]s, tick the
//! game at a fixed rate, and read flat [`SnapshotBuffers`] plus a JSON
//! scoreboard back out.

pub mod bridge;
pub mod core;
pub mod game;
pub mod input;
pub mod systems;

pub use crate::bridge::snapshot::{
    phase_code, BallInstance, ScoreRecord, SnapshotBuffers, SparkInstance, BALL_FLOATS,
    SPARK_FLOATS,
};
pub use crate::core::physics::{
    BodyDesc, BodyType, ColliderDesc, ColliderMaterial, ContactEvent, PhysicsBody, PhysicsWorld,
};
pub use crate::core::time::FixedTimestep;
pub use crate::game::context::{
    AimState, Ball, GameContext, Phase, Player, PowerState, ScoreState, StatusKind,
};
pub use crate::game::{events, PoolGame};
pub use crate::input::queue::{InputEvent, InputQueue};
pub use crate::systems::rng::Rng;
pub use crate::systems::sparks::{Spark, SparkSystem};
