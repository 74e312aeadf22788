//! Two-player 8-ball pool simulation.
//!
//! [`PoolGame`] owns the whole game: the physics table, the ball registry,
//! the turn state machine, input handling, and the spark effects. The host
//! queues input events and calls [`PoolGame::update`] once per fixed tick.

pub mod config;
pub mod context;
pub mod input;
pub mod pockets;
pub mod rack;
pub mod rules;

use glam::Vec2;

use crate::core::physics::{BodyDesc, ColliderDesc, ColliderMaterial};
use crate::game::config::{CUSHION_WIDTH, RAIL_RESTITUTION, TABLE_H, TABLE_W};
use crate::game::context::{GameContext, Phase, ScoreState, RAIL_TAG};
use crate::input::queue::{InputEvent, InputQueue};

/// Custom event kinds understood by [`PoolGame::update`].
pub mod events {
    /// Tear down the current game and start a fresh one.
    pub const RESET: u32 = 1;
}

pub struct PoolGame {
    pub ctx: GameContext,
}

impl PoolGame {
    pub fn new() -> Self {
        Self {
            ctx: GameContext::new(),
        }
    }

    /// Build the table and rack the balls. Call once before the first tick.
    pub fn init(&mut self) {
        self.build_rails();
        self.rack_balls();
        log::info!(
            "table ready: {} bodies, {}x{}",
            self.ctx.physics.body_count(),
            TABLE_W,
            TABLE_H
        );
    }

    /// Start a fresh game on the existing table. Rails persist; balls,
    /// scores, and shot state are rebuilt from scratch.
    pub fn reset(&mut self) {
        let ids: Vec<u8> = self.ctx.balls.iter().map(|b| b.id).collect();
        for id in ids {
            self.ctx.remove_ball(id);
        }
        self.ctx.sparks.clear();
        self.ctx.contacts.clear();

        self.ctx.score = ScoreState::new();
        self.ctx.set_message(context::StatusKind::Info, "New Game Started");
        self.ctx.phase = Phase::Idle;
        self.ctx.potted_this_shot = 0;
        self.ctx.scratched = false;
        self.ctx.aim.locked = false;
        self.ctx.power.level = 0.0;
        self.ctx.power.dragging = false;

        self.rack_balls();
        log::info!("game reset");
    }

    /// Advance the simulation one fixed tick, applying any queued input
    /// first. The caller drains the queue between ticks.
    pub fn update(&mut self, input: &InputQueue) {
        for event in input.iter() {
            if let InputEvent::Custom { kind, .. } = event {
                if *kind == events::RESET {
                    self.reset();
                    return;
                }
            }
            input::apply(&mut self.ctx, event);
        }

        self.ctx.step_physics();
        rules::tick(&mut self.ctx);
        self.ctx.sparks.advance();
    }

    /// Four fixed cushions boxing in the playfield. Rails overhang the
    /// table corners so balls cannot escape diagonally.
    fn build_rails(&mut self) {
        let t = CUSHION_WIDTH;
        let (w, h) = (TABLE_W, TABLE_H);
        let material = ColliderMaterial {
            restitution: RAIL_RESTITUTION,
            friction: 0.0,
            density: 1.0,
        };

        let rails = [
            // top, bottom
            (Vec2::new(w / 2.0, -t / 2.0), w / 2.0 + t, t / 2.0),
            (Vec2::new(w / 2.0, h + t / 2.0), w / 2.0 + t, t / 2.0),
            // left, right
            (Vec2::new(-t / 2.0, h / 2.0), t / 2.0, h / 2.0 + t),
            (Vec2::new(w + t / 2.0, h / 2.0), t / 2.0, h / 2.0 + t),
        ];

        for (pos, half_width, half_height) in rails {
            let desc = BodyDesc::fixed(ColliderDesc::Cuboid {
                half_width,
                half_height,
            })
            .with_position(pos);
            self.ctx.physics.create_body(RAIL_TAG, &desc, material);
        }
    }

    fn rack_balls(&mut self) {
        self.ctx
            .spawn_ball(rack::CUE_ID, rack::break_spot(), Vec2::ZERO);
        for (id, pos) in rack::rack_layout() {
            self.ctx.spawn_ball(id, pos, Vec2::ZERO);
        }
    }
}

impl Default for PoolGame {
    fn default() -> Self {
        Self::new()
    }
}
