//! wasm-bindgen exports for the pool game.
//!
//! The runner lives in a `thread_local!` because wasm-bindgen exports free
//! functions, not stateful objects. Pointer accessors hand the host raw
//! offsets into linear memory for zero-copy snapshot reads.

pub mod runner;

pub use runner::GameRunner;

use std::cell::RefCell;

use baize_core::{events, InputEvent};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<GameRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut GameRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("Game not initialized. Call game_init() first.");
        f(runner)
    })
}

#[wasm_bindgen]
pub fn game_init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(GameRunner::new());
    });
    log::info!("pool-game: initialized");
}

#[wasm_bindgen]
pub fn game_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

// ---- Input ----

#[wasm_bindgen]
pub fn game_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn game_table_tap(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::TableTap { x, y }));
}

#[wasm_bindgen]
pub fn game_power_start(t: f32) {
    with_runner(|r| r.push_input(InputEvent::PowerStart { t }));
}

#[wasm_bindgen]
pub fn game_power_drag(t: f32) {
    with_runner(|r| r.push_input(InputEvent::PowerDrag { t }));
}

#[wasm_bindgen]
pub fn game_power_end() {
    with_runner(|r| r.push_input(InputEvent::PowerEnd));
}

#[wasm_bindgen]
pub fn game_power_cancel() {
    with_runner(|r| r.push_input(InputEvent::PowerCancel));
}

#[wasm_bindgen]
pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
    with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
}

#[wasm_bindgen]
pub fn game_reset() {
    with_runner(|r| {
        r.push_input(InputEvent::Custom {
            kind: events::RESET,
            a: 0.0,
            b: 0.0,
            c: 0.0,
        })
    });
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_balls_ptr() -> *const f32 {
    with_runner(|r| r.balls_ptr())
}

#[wasm_bindgen]
pub fn get_ball_count() -> u32 {
    with_runner(|r| r.ball_count())
}

#[wasm_bindgen]
pub fn get_sparks_ptr() -> *const f32 {
    with_runner(|r| r.sparks_ptr())
}

#[wasm_bindgen]
pub fn get_spark_count() -> u32 {
    with_runner(|r| r.spark_count())
}

#[wasm_bindgen]
pub fn get_phase() -> u32 {
    with_runner(|r| r.phase())
}

#[wasm_bindgen]
pub fn get_aim_angle() -> f32 {
    with_runner(|r| r.aim_angle())
}

#[wasm_bindgen]
pub fn get_aim_locked() -> bool {
    with_runner(|r| r.aim_locked())
}

#[wasm_bindgen]
pub fn get_power() -> f32 {
    with_runner(|r| r.power())
}

#[wasm_bindgen]
pub fn get_score_json() -> String {
    with_runner(|r| r.score_json())
}

#[wasm_bindgen]
pub fn world_width() -> f32 {
    with_runner(|r| r.world_width())
}

#[wasm_bindgen]
pub fn world_height() -> f32 {
    with_runner(|r| r.world_height())
}
