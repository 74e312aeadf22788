//! Flat render snapshots for the host.
//!
//! The host reads balls and sparks as contiguous f32 arrays straight out of
//! linear memory, so the instance structs are `#[repr(C)]` Pod layouts with
//! a fixed float count each. Score and status travel as JSON since they
//! change rarely and carry strings.

use bytemuck::{Pod, Zeroable};
use serde::Serialize;

use crate::game::context::{GameContext, Phase};

pub const BALL_FLOATS: usize = 4;
pub const SPARK_FLOATS: usize = 6;

/// One ball, as the renderer sees it.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct BallInstance {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub id: f32,
}

/// One spark, as the renderer sees it.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct SparkInstance {
    pub x: f32,
    pub y: f32,
    pub life: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// Scoreboard snapshot, serialized for the UI layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub player1_balls: Vec<u8>,
    pub player2_balls: Vec<u8>,
    pub current_turn: String,
    pub message: String,
}

impl ScoreRecord {
    pub fn capture(ctx: &GameContext) -> Self {
        Self {
            player1_balls: ctx.score.player1_balls.clone(),
            player2_balls: ctx.score.player2_balls.clone(),
            current_turn: ctx.score.current_turn.label().to_string(),
            message: ctx.score.message.clone(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Numeric phase code for the wire.
pub fn phase_code(phase: Phase) -> u32 {
    match phase {
        Phase::Idle => 0,
        Phase::Moving => 1,
        Phase::GameOver => 2,
    }
}

/// Reusable flat buffers rebuilt once per frame.
pub struct SnapshotBuffers {
    balls: Vec<f32>,
    sparks: Vec<f32>,
}

impl SnapshotBuffers {
    pub fn new() -> Self {
        Self {
            balls: Vec::with_capacity(16 * BALL_FLOATS),
            sparks: Vec::with_capacity(64 * SPARK_FLOATS),
        }
    }

    /// Repopulate both buffers from the current game state.
    pub fn rebuild(&mut self, ctx: &GameContext) {
        self.balls.clear();
        for ball in &ctx.balls {
            let (pos, rotation) = ctx.physics.body_position(&ball.body);
            let instance = BallInstance {
                x: pos.x,
                y: pos.y,
                rotation,
                id: ball.id as f32,
            };
            self.balls
                .extend_from_slice(&bytemuck::cast::<_, [f32; BALL_FLOATS]>(instance));
        }

        self.sparks.clear();
        for spark in ctx.sparks.iter() {
            let instance = SparkInstance {
                x: spark.pos.x,
                y: spark.pos.y,
                life: spark.life,
                r: spark.color[0],
                g: spark.color[1],
                b: spark.color[2],
            };
            self.sparks
                .extend_from_slice(&bytemuck::cast::<_, [f32; SPARK_FLOATS]>(instance));
        }
    }

    pub fn ball_count(&self) -> usize {
        self.balls.len() / BALL_FLOATS
    }

    pub fn spark_count(&self) -> usize {
        self.sparks.len() / SPARK_FLOATS
    }

    pub fn balls_ptr(&self) -> *const f32 {
        self.balls.as_ptr()
    }

    pub fn sparks_ptr(&self) -> *const f32 {
        self.sparks.as_ptr()
    }
}

impl Default for SnapshotBuffers {
    fn default() -> Self {
        Self::new()
    }
}
