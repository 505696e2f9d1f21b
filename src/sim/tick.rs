//! Variable timestep frame update
//!
//! One call advances the whole game by the time elapsed since the previous
//! animation frame. Movement and timers scale with `dt`, so a long frame
//! (backgrounded tab) produces a jump but never an invalid state.

use super::collision::{boss_is_hit, player_is_hit};
use super::state::{Direction, GamePhase, GameState};
use crate::consts::*;
use crate::stages::ProjectileKind;

/// Directional input sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
}

/// Notable things that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEvent {
    /// Boss shots landed on the player this frame
    PlayerHit { hits: u32, health: u32 },
    /// Player shots landed on the boss this frame
    BossHit { hits: u32, health: u32 },
    /// Boss defeated with stages remaining
    StageCleared { from: usize, to: usize },
    GameOver,
    GameWon,
}

/// Advance the game state in place by `dt` milliseconds
///
/// Returns the events the frame produced. Terminal phases are frozen until a
/// restart.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<FrameEvent> {
    let mut events = Vec::new();

    if state.phase.is_terminal() {
        return events;
    }

    state.clock_ms += dt as f64;

    state.player.move_vertical(input.up, input.down, dt);
    state.boss.patrol(dt);

    // Fire-rate gates
    if fire_ready(state.last_player_fire_ms, state.clock_ms, PLAYER_FIRE_RATE_MS) {
        state.last_player_fire_ms = Some(state.clock_ms);
        let muzzle = state.player.muzzle();
        state.spawn_projectile(muzzle, ProjectileKind::Trophy, Direction::Right);
    }
    let stage = state.stage();
    if fire_ready(state.last_boss_fire_ms, state.clock_ms, stage.boss_fire_rate_ms) {
        state.last_boss_fire_ms = Some(state.clock_ms);
        let muzzle = state.boss.muzzle();
        state.spawn_projectile(muzzle, stage.projectile, Direction::Left);
    }

    // Resolve every hit against this frame's positions, then apply damage once
    let player_y = state.player.y;
    let boss_y = state.boss.y;
    let mut player_hits = 0u32;
    let mut boss_hits = 0u32;
    state.projectiles.retain(|p| {
        let hit = match p.direction {
            Direction::Left => player_is_hit(p, player_y),
            Direction::Right => boss_is_hit(p, boss_y),
        };
        if hit {
            match p.direction {
                Direction::Left => player_hits += 1,
                Direction::Right => boss_hits += 1,
            }
        }
        !hit
    });

    if player_hits > 0 {
        let damage = player_hits.saturating_mul(BOSS_PROJECTILE_DAMAGE);
        state.player.health = state.player.health.saturating_sub(damage);
        log::trace!("player hit x{player_hits}, health {}", state.player.health);
        events.push(FrameEvent::PlayerHit {
            hits: player_hits,
            health: state.player.health,
        });
    }
    if boss_hits > 0 {
        let damage = boss_hits.saturating_mul(PLAYER_PROJECTILE_DAMAGE);
        state.boss.health = state.boss.health.saturating_sub(damage);
        log::trace!("boss hit x{boss_hits}, health {}", state.boss.health);
        events.push(FrameEvent::BossHit {
            hits: boss_hits,
            health: state.boss.health,
        });
    }

    // Player death wins ties: a simultaneous knockout is a loss
    if state.player.is_dead() {
        state.phase = GamePhase::GameOver;
        events.push(FrameEvent::GameOver);
    } else if boss_hits > 0 && state.boss.is_dead() {
        if state.is_final_stage() {
            state.phase = GamePhase::GameWon;
            events.push(FrameEvent::GameWon);
        } else {
            let from = state.stage_index;
            state.advance_stage();
            events.push(FrameEvent::StageCleared {
                from,
                to: state.stage_index,
            });
        }
    }

    for projectile in &mut state.projectiles {
        projectile.advance(dt);
    }
    state.projectiles.retain(|p| p.in_bounds());

    events
}

/// Pure form of [`tick`]: the next state from the previous one
pub fn step(prev: &GameState, input: &TickInput, dt: f32) -> (GameState, Vec<FrameEvent>) {
    let mut next = prev.clone();
    let events = tick(&mut next, input, dt);
    (next, events)
}

/// Has at least `interval` elapsed since the last shot?
fn fire_ready(last: Option<f64>, now: f64, interval: f64) -> bool {
    last.is_none_or(|last| now - last >= interval)
}
