//! Per-tick game rules: impact sparks, pocket resolution, and the
//! shot/turn state machine.

use glam::Vec2;

use crate::game::config::{SPARK_COUNT, SPARK_SPEED_THRESHOLD, TICK_DT};
use crate::game::context::{GameContext, Phase, Player, StatusKind};
use crate::game::pockets;
use crate::game::rack::{self, BallGroup};

/// Run one tick of game rules after the physics step.
///
/// Pockets resolve before the settle check so a ball dropping on the very
/// tick the table stops is still counted against this shot.
pub fn tick(ctx: &mut GameContext) {
    spawn_impact_sparks(ctx);
    resolve_pockets(ctx);
    settle(ctx);
}

/// Throw sparks at hard ball-ball impacts. Rail contacts and soft taps
/// stay silent.
fn spawn_impact_sparks(ctx: &mut GameContext) {
    let mut spawn_points: Vec<Vec2> = Vec::new();
    for contact in &ctx.contacts {
        let (Ok(a), Ok(b)) = (u8::try_from(contact.a), u8::try_from(contact.b)) else {
            continue;
        };
        let (Some(ball_a), Some(ball_b)) = (ctx.ball(a), ctx.ball(b)) else {
            continue;
        };
        if contact.impact_speed * TICK_DT <= SPARK_SPEED_THRESHOLD {
            continue;
        }
        let point = contact.point.unwrap_or_else(|| {
            let pa = ctx.physics.body_position(&ball_a.body).0;
            let pb = ctx.physics.body_position(&ball_b.body).0;
            (pa + pb) * 0.5
        });
        spawn_points.push(point);
    }
    for point in spawn_points {
        ctx.sparks.spawn(point, SPARK_COUNT);
    }
}

/// Drive the Idle/Moving transitions. GameOver ignores table motion.
fn settle(ctx: &mut GameContext) {
    match ctx.phase {
        Phase::Idle => {
            // A ball nudged into motion outside a shot (e.g. a respawned cue
            // ball clipping a neighbor) still counts as a shot in progress.
            if ctx.any_ball_moving() {
                ctx.begin_shot();
            }
        }
        Phase::Moving => {
            if !ctx.any_ball_moving() {
                finish_shot(ctx);
            }
        }
        Phase::GameOver => {}
    }
}

/// All balls stopped: judge the shot. Scratch outranks a pot, a pot
/// outranks a plain miss.
fn finish_shot(ctx: &mut GameContext) {
    ctx.phase = Phase::Idle;
    ctx.aim.locked = false;

    if ctx.scratched {
        let spot = rack::break_spot();
        ctx.spawn_ball(rack::CUE_ID, spot, Vec2::ZERO);
        log::info!("cue ball respawned at {:?}", spot);
        switch_turn(ctx, StatusKind::Scratch, "Scratch! Ball in hand.");
    } else if ctx.potted_this_shot > 0 {
        let player = ctx.score.current_turn;
        ctx.set_message(
            StatusKind::Potted,
            format!("{}: Ball potted! Go again.", player.label()),
        );
    } else {
        switch_turn(ctx, StatusKind::Miss, "No ball potted.");
    }

    ctx.potted_this_shot = 0;
    ctx.scratched = false;
}

fn switch_turn(ctx: &mut GameContext, kind: StatusKind, reason: &str) {
    let next = ctx.score.current_turn.other();
    ctx.score.current_turn = next;
    ctx.set_message(kind, format!("{} {}'s Turn", reason, next.label()));
}

/// Remove pocketed balls and apply their consequences immediately.
fn resolve_pockets(ctx: &mut GameContext) {
    if ctx.phase == Phase::GameOver {
        return;
    }
    let potted = pockets::scan(ctx);
    for id in potted {
        ctx.remove_ball(id);
        match BallGroup::from_id(id) {
            BallGroup::Cue => {
                log::info!("cue ball pocketed");
                ctx.scratched = true;
            }
            BallGroup::Eight => {
                let winner = ctx.score.current_turn;
                log::info!("8-ball pocketed, {} wins", winner.label());
                ctx.set_message(StatusKind::GameOver, format!("{} Wins!", winner.label()));
                ctx.phase = Phase::GameOver;
            }
            BallGroup::Solid | BallGroup::Stripe => {
                log::info!("ball {} pocketed", id);
                ctx.potted_this_shot += 1;
                match ctx.score.current_turn {
                    Player::One => ctx.score.player1_balls.push(id),
                    Player::Two => ctx.score.player2_balls.push(id),
                }
            }
        }
    }
}
