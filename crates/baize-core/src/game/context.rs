//! Shared game state: the physics world, the ball registry, the turn and
//! score bookkeeping, and the per-shot counters the rules read at settle.

use glam::Vec2;
use serde::Serialize;

use crate::core::physics::{
    BodyDesc, ColliderDesc, ColliderMaterial, ContactEvent, PhysicsBody, PhysicsWorld,
};
use crate::game::config::{
    BALL_DENSITY, BALL_FRICTION, BALL_RADIUS, BALL_RESTITUTION, LINEAR_DAMPING, MOTION_THRESHOLD,
    TICK_DT,
};
use crate::systems::sparks::SparkSystem;

/// Tag used for rail bodies so contacts can be told apart from balls.
pub const RAIL_TAG: u32 = u32::MAX;

/// Coarse game phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Table is still; aiming and shooting are allowed.
    Idle,
    /// Balls are in motion; input is ignored until they settle.
    Moving,
    /// The 8-ball went down. Terminal until a reset.
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn label(self) -> &'static str {
        match self {
            Player::One => "Player 1",
            Player::Two => "Player 2",
        }
    }

    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

/// Machine-readable classification of the current status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusKind {
    Info,
    Scratch,
    Potted,
    Miss,
    GameOver,
}

/// Per-player score and the status line shown to both players.
#[derive(Debug, Clone)]
pub struct ScoreState {
    pub player1_balls: Vec<u8>,
    pub player2_balls: Vec<u8>,
    pub current_turn: Player,
    pub message: String,
    pub status: StatusKind,
}

impl ScoreState {
    pub fn new() -> Self {
        Self {
            player1_balls: Vec::new(),
            player2_balls: Vec::new(),
            current_turn: Player::One,
            message: "Aim with Mouse, Click to LOCK".to_string(),
            status: StatusKind::Info,
        }
    }
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new()
    }
}

/// A ball on the table: its id (0 = cue, 8 = eight) and its physics handles.
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub id: u8,
    pub body: PhysicsBody,
}

/// Current aim direction and whether it is locked against pointer motion.
#[derive(Debug, Clone, Copy)]
pub struct AimState {
    pub angle: f32,
    pub locked: bool,
}

/// Power meter state while the player drags the side bar.
#[derive(Debug, Clone, Copy)]
pub struct PowerState {
    pub level: f32,
    pub dragging: bool,
}

/// Everything the rules, input handlers, and bridge read and mutate.
pub struct GameContext {
    pub physics: PhysicsWorld,
    pub balls: Vec<Ball>,
    pub phase: Phase,
    pub score: ScoreState,
    pub aim: AimState,
    pub power: PowerState,
    pub pointer: Vec2,
    /// Object balls pocketed since the current shot began.
    pub potted_this_shot: u32,
    /// Whether the cue ball went down during the current shot.
    pub scratched: bool,
    pub sparks: SparkSystem,
    /// Contacts from the most recent physics step.
    pub contacts: Vec<ContactEvent>,
}

impl GameContext {
    pub fn new() -> Self {
        let mut physics = PhysicsWorld::new();
        physics.set_dt(TICK_DT);
        Self {
            physics,
            balls: Vec::with_capacity(16),
            phase: Phase::Idle,
            score: ScoreState::new(),
            aim: AimState {
                angle: 0.0,
                locked: false,
            },
            power: PowerState {
                level: 0.0,
                dragging: false,
            },
            pointer: Vec2::ZERO,
            potted_this_shot: 0,
            scratched: false,
            sparks: SparkSystem::new(0x5eed_ba11),
            contacts: Vec::new(),
        }
    }

    pub fn ball(&self, id: u8) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    pub fn cue_ball(&self) -> Option<&Ball> {
        self.ball(crate::game::rack::CUE_ID)
    }

    pub fn cue_position(&self) -> Option<Vec2> {
        self.cue_ball()
            .map(|b| self.physics.body_position(&b.body).0)
    }

    /// Create a ball body and register it. The ball id doubles as the
    /// physics tag so contact events identify balls directly.
    pub fn spawn_ball(&mut self, id: u8, pos: Vec2, vel: Vec2) {
        let desc = BodyDesc::dynamic(ColliderDesc::Ball {
            radius: BALL_RADIUS,
        })
        .with_position(pos)
        .with_velocity(vel)
        .with_ccd(true)
        .with_linear_damping(LINEAR_DAMPING);

        let material = ColliderMaterial {
            restitution: BALL_RESTITUTION,
            friction: BALL_FRICTION,
            density: BALL_DENSITY,
        };

        let body = self.physics.create_body(id as u32, &desc, material);
        self.balls.push(Ball { id, body });
    }

    /// Remove a ball from the physics world and the registry.
    pub fn remove_ball(&mut self, id: u8) {
        if let Some(idx) = self.balls.iter().position(|b| b.id == id) {
            let ball = self.balls.swap_remove(idx);
            self.physics.remove_body(&ball.body);
        }
    }

    /// True if any ball still moves faster than the settle threshold.
    pub fn any_ball_moving(&self) -> bool {
        self.balls.iter().any(|b| {
            self.physics.velocity(&b.body).length() * TICK_DT > MOTION_THRESHOLD
        })
    }

    pub fn set_message(&mut self, kind: StatusKind, message: impl Into<String>) {
        self.score.status = kind;
        self.score.message = message.into();
    }

    /// Transition to Moving and reset the per-shot counters.
    pub fn begin_shot(&mut self) {
        self.phase = Phase::Moving;
        self.potted_this_shot = 0;
        self.scratched = false;
        self.set_message(StatusKind::Info, "...");
    }

    /// Step the physics world one tick, replacing the contact list.
    pub fn step_physics(&mut self) {
        self.contacts.clear();
        self.physics.step_into(&mut self.contacts);
    }
}

impl Default for GameContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_and_remove_ball() {
        let mut ctx = GameContext::new();
        ctx.spawn_ball(0, Vec2::new(100.0, 100.0), Vec2::ZERO);
        ctx.spawn_ball(8, Vec2::new(300.0, 100.0), Vec2::ZERO);
        assert_eq!(ctx.balls.len(), 2);
        assert_eq!(ctx.physics.body_count(), 2);

        ctx.remove_ball(8);
        assert_eq!(ctx.balls.len(), 1);
        assert_eq!(ctx.physics.body_count(), 1);
        assert!(ctx.ball(8).is_none());
        assert!(ctx.cue_ball().is_some());
    }

    #[test]
    fn motion_detection_uses_threshold() {
        let mut ctx = GameContext::new();
        ctx.spawn_ball(0, Vec2::new(100.0, 100.0), Vec2::ZERO);
        assert!(!ctx.any_ball_moving());

        let body = ctx.cue_ball().unwrap().body;
        // 0.05 units/frame at 60 Hz is 3 units/second
        ctx.physics.set_velocity(&body, Vec2::new(2.0, 0.0));
        assert!(!ctx.any_ball_moving());
        ctx.physics.set_velocity(&body, Vec2::new(10.0, 0.0));
        assert!(ctx.any_ball_moving());
    }

    #[test]
    fn begin_shot_resets_counters() {
        let mut ctx = GameContext::new();
        ctx.potted_this_shot = 3;
        ctx.scratched = true;
        ctx.begin_shot();
        assert_eq!(ctx.phase, Phase::Moving);
        assert_eq!(ctx.potted_this_shot, 0);
        assert!(!ctx.scratched);
        assert_eq!(ctx.score.message, "...");
    }

    #[test]
    fn player_other_toggles() {
        assert_eq!(Player::One.other(), Player::Two);
        assert_eq!(Player::Two.other(), Player::One);
        assert_eq!(Player::One.label(), "Player 1");
    }
}
