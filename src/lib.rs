//! Boss Rush - a side-scrolling boss rush arcade game
//!
//! Core modules:
//! - `sim`: Frame simulation (movement, firing, collisions, stage progression)
//! - `stages`: Compiled-in stage table
//! - `platform`: Input capture and animation-frame timing
//! - `game`: A running session tying state, input and logging together
//! - `settings`: Presentation preferences

pub mod game;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod stages;

pub use game::Game;
pub use settings::{Settings, TouchControls};
pub use stages::{ConfigError, ProjectileKind, STAGES, StageConfig, validate_stages};

/// Game configuration constants
///
/// Distances are in arena pixels, times in milliseconds, speeds in pixels
/// per millisecond.
pub mod consts {
    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 900.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Entity sizes (all entities are square)
    pub const PLAYER_SIZE: f32 = 64.0;
    pub const BOSS_SIZE: f32 = 80.0;
    pub const PROJECTILE_SIZE: f32 = 32.0;

    /// Distance of the player from the left wall and the boss from the right wall
    pub const SIDE_MARGIN: f32 = 50.0;
    /// Gap the boss keeps from the top and bottom walls while patrolling
    pub const BOSS_PATROL_MARGIN: f32 = 20.0;

    /// Fixed horizontal positions
    pub const PLAYER_X: f32 = SIDE_MARGIN;
    pub const BOSS_X: f32 = ARENA_WIDTH - SIDE_MARGIN - BOSS_SIZE;

    /// Movement speeds
    pub const PLAYER_SPEED: f32 = 0.4;
    pub const BOSS_MOVE_SPEED: f32 = 0.15;
    pub const PLAYER_PROJECTILE_SPEED: f32 = 0.3;
    pub const BOSS_PROJECTILE_SPEED: f32 = 0.2;

    /// Player weapon
    pub const PLAYER_FIRE_RATE_MS: f64 = 600.0;
    pub const PLAYER_PROJECTILE_DAMAGE: u32 = 15;

    /// Health
    pub const PLAYER_MAX_HEALTH: u32 = 100;
    pub const BOSS_PROJECTILE_DAMAGE: u32 = 10;
}

/// Top edge that vertically centers an entity of `size` in the arena
#[inline]
pub fn centered_y(size: f32) -> f32 {
    consts::ARENA_HEIGHT / 2.0 - size / 2.0
}
