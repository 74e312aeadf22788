//! Input handling: aiming, the aim lock, and the power bar gesture.
//!
//! All handlers are no-ops outside the Idle phase so a shot in flight can
//! never be disturbed.

use glam::Vec2;

use crate::game::config::{FORCE_MULTIPLIER, MAX_POWER, MIN_SHOT_POWER, SHOT_IMPULSE_SCALE};
use crate::game::context::{GameContext, Phase, StatusKind};
use crate::input::queue::InputEvent;

/// Dispatch one input event against the game state.
/// `Custom` events are routed by the caller, not here.
pub fn apply(ctx: &mut GameContext, event: &InputEvent) {
    match *event {
        InputEvent::PointerMove { x, y } => pointer_moved(ctx, x, y),
        InputEvent::TableTap { x, y } => table_tapped(ctx, x, y),
        InputEvent::PowerStart { t } => power_started(ctx, t),
        InputEvent::PowerDrag { t } => power_dragged(ctx, t),
        InputEvent::PowerEnd => power_released(ctx),
        InputEvent::PowerCancel => power_cancelled(ctx),
        InputEvent::Custom { .. } => {}
    }
}

/// Abstract impulse for a given power level. At full power this is
/// FORCE_MULTIPLIER; the caller scales it for the actual ball mass.
pub fn shot_impulse(power: f32) -> f32 {
    (power / MAX_POWER) * FORCE_MULTIPLIER
}

fn pointer_moved(ctx: &mut GameContext, x: f32, y: f32) {
    if ctx.phase != Phase::Idle {
        return;
    }
    if !x.is_finite() || !y.is_finite() {
        log::warn!("ignoring non-finite pointer position ({}, {})", x, y);
        return;
    }
    ctx.pointer = Vec2::new(x, y);
    if !ctx.aim.locked {
        retarget(ctx);
    }
}

fn table_tapped(ctx: &mut GameContext, x: f32, y: f32) {
    if ctx.phase != Phase::Idle {
        return;
    }
    if !x.is_finite() || !y.is_finite() {
        log::warn!("ignoring non-finite tap position ({}, {})", x, y);
        return;
    }
    ctx.pointer = Vec2::new(x, y);
    if ctx.aim.locked {
        ctx.aim.locked = false;
        retarget(ctx);
        ctx.set_message(StatusKind::Info, "Aim Unlocked.");
    } else {
        // locking freezes the angle as-is; only unlocking recomputes it
        ctx.aim.locked = true;
        ctx.set_message(StatusKind::Info, "Aim LOCKED. Use side bar to shoot!");
    }
}

/// Point the aim from the cue ball toward the pointer.
fn retarget(ctx: &mut GameContext) {
    if let Some(cue) = ctx.cue_position() {
        let d = ctx.pointer - cue;
        if d.length_squared() > 0.0 {
            ctx.aim.angle = d.y.atan2(d.x);
        }
    }
}

fn power_started(ctx: &mut GameContext, t: f32) {
    if ctx.phase != Phase::Idle {
        return;
    }
    ctx.power.dragging = true;
    power_dragged(ctx, t);
}

fn power_dragged(ctx: &mut GameContext, t: f32) {
    if !ctx.power.dragging {
        return;
    }
    if !t.is_finite() {
        log::warn!("ignoring non-finite power position {}", t);
        return;
    }
    ctx.power.level = t.clamp(0.0, 1.0) * MAX_POWER;
}

fn power_released(ctx: &mut GameContext) {
    if !ctx.power.dragging {
        return;
    }
    ctx.power.dragging = false;
    fire(ctx);
}

fn power_cancelled(ctx: &mut GameContext) {
    ctx.power.dragging = false;
    ctx.power.level = 0.0;
}

/// Fire the shot: apply the impulse to the cue ball and hand control to the
/// physics until the table settles. Always consumes the drawn power.
///
/// The drag may outlive the Idle phase: a stray nudge can flip the table to
/// Moving between gesture start and release, so the phase is re-checked here
/// and a late release discards the power without touching the shot in flight.
fn fire(ctx: &mut GameContext) {
    let power = ctx.power.level;
    ctx.power.level = 0.0;

    if ctx.phase != Phase::Idle {
        return;
    }
    if power <= MIN_SHOT_POWER {
        return;
    }
    let Some(cue) = ctx.cue_ball() else {
        log::warn!("fire with no cue ball on the table");
        return;
    };
    let body = cue.body;

    let impulse = Vec2::from_angle(ctx.aim.angle) * shot_impulse(power) * SHOT_IMPULSE_SCALE;
    ctx.physics.apply_impulse(&body, impulse);
    log::info!(
        "{} shoots: power {:.1}, angle {:.3}",
        ctx.score.current_turn.label(),
        power,
        ctx.aim.angle
    );

    ctx.aim.locked = false;
    ctx.begin_shot();
}
