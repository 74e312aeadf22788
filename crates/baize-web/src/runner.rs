use baize_core::game::config::{TABLE_H, TABLE_W, TICK_DT};
use baize_core::{phase_code, FixedTimestep, InputEvent, InputQueue, PoolGame, ScoreRecord, SnapshotBuffers};

/// Drives the game loop from the browser's requestAnimationFrame.
///
/// The runner owns the fixed timestep accumulator, the input queue, and the
/// snapshot buffers the host reads out of linear memory each frame.
pub struct GameRunner {
    game: PoolGame,
    input: InputQueue,
    timestep: FixedTimestep,
    buffers: SnapshotBuffers,
    score_json: String,
}

impl GameRunner {
    pub fn new() -> Self {
        let mut game = PoolGame::new();
        game.init();
        Self {
            game,
            input: InputQueue::new(),
            timestep: FixedTimestep::new(TICK_DT),
            buffers: SnapshotBuffers::new(),
            score_json: String::new(),
        }
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run as many fixed steps as the elapsed time owes, then rebuild the
    /// snapshots. Input is consumed by the first step of a frame only.
    pub fn tick(&mut self, dt: f32) {
        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.game.update(&self.input);
            self.input.drain();
        }

        self.buffers.rebuild(&self.game.ctx);
        self.score_json = ScoreRecord::capture(&self.game.ctx).to_json();
    }

    // ---- Accessors for linear-memory reads ----

    pub fn balls_ptr(&self) -> *const f32 {
        self.buffers.balls_ptr()
    }

    pub fn ball_count(&self) -> u32 {
        self.buffers.ball_count() as u32
    }

    pub fn sparks_ptr(&self) -> *const f32 {
        self.buffers.sparks_ptr()
    }

    pub fn spark_count(&self) -> u32 {
        self.buffers.spark_count() as u32
    }

    pub fn phase(&self) -> u32 {
        phase_code(self.game.ctx.phase)
    }

    pub fn aim_angle(&self) -> f32 {
        self.game.ctx.aim.angle
    }

    pub fn aim_locked(&self) -> bool {
        self.game.ctx.aim.locked
    }

    pub fn power(&self) -> f32 {
        self.game.ctx.power.level
    }

    pub fn score_json(&self) -> String {
        self.score_json.clone()
    }

    pub fn world_width(&self) -> f32 {
        TABLE_W
    }

    pub fn world_height(&self) -> f32 {
        TABLE_H
    }
}

impl Default for GameRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_consumes_queued_input_once() {
        let mut runner = GameRunner::new();
        runner.push_input(InputEvent::TableTap { x: 700.0, y: 200.0 });
        // two fixed steps owed; the tap must not toggle the lock twice
        runner.tick(2.5 * TICK_DT);
        assert!(runner.aim_locked());
    }

    #[test]
    fn snapshots_refresh_after_tick() {
        let mut runner = GameRunner::new();
        runner.tick(TICK_DT);
        assert_eq!(runner.ball_count(), 16);
        assert_eq!(runner.phase(), 0);
        assert!(runner.score_json().contains("player1Balls"));
    }
}
