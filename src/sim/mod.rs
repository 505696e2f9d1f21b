//! Frame simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time enters only through the `dt` passed to `tick`
//! - Input is sampled once per frame
//! - No rendering or platform dependencies

pub mod collision;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Rect, boss_is_hit, overlaps, player_is_hit};
pub use snapshot::Snapshot;
pub use state::{Boss, Direction, GamePhase, GameState, Heading, Player, Projectile};
pub use tick::{FrameEvent, TickInput, step, tick};
