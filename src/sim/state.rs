//! Game state and core simulation types
//!
//! Everything the frame update reads or writes lives in [`GameState`],
//! including the fire timers, so a frame is a function of the previous state,
//! the sampled input and the elapsed time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::stages::{ProjectileKind, STAGES, StageConfig};
use crate::centered_y;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Fighting the current stage's boss
    Playing,
    /// Player health ran out
    GameOver,
    /// Final boss defeated
    GameWon,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Horizontal travel direction of a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Boss shot, flying toward the player
    Left,
    /// Player shot, flying toward the boss
    Right,
}

impl Direction {
    /// Sign of the x velocity
    pub fn sign(&self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    /// Speed for shots travelling this way
    pub fn speed(&self) -> f32 {
        match self {
            Direction::Left => BOSS_PROJECTILE_SPEED,
            Direction::Right => PLAYER_PROJECTILE_SPEED,
        }
    }
}

/// Vertical patrol heading of the boss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    Up,
    Down,
}

impl Heading {
    /// Sign of the y velocity (screen y grows downward)
    pub fn sign(&self) -> f32 {
        match self {
            Heading::Up => -1.0,
            Heading::Down => 1.0,
        }
    }
}

/// The player character, pinned to the left side of the arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top edge, within [0, ARENA_HEIGHT - PLAYER_SIZE]
    pub y: f32,
    pub health: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            y: centered_y(PLAYER_SIZE),
            health: PLAYER_MAX_HEALTH,
        }
    }
}

impl Player {
    /// Highest allowed top edge
    pub const MAX_Y: f32 = ARENA_HEIGHT - PLAYER_SIZE;

    /// Integrate vertical movement for `dt` milliseconds
    ///
    /// Holding both directions cancels out.
    pub fn move_vertical(&mut self, up: bool, down: bool, dt: f32) {
        let axis = (down as i8 - up as i8) as f32;
        self.y = (self.y + axis * PLAYER_SPEED * dt).clamp(0.0, Self::MAX_Y);
    }

    /// Where a freshly fired shot appears
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(
            PLAYER_X + PLAYER_SIZE,
            self.y + PLAYER_SIZE / 2.0 - PROJECTILE_SIZE / 2.0,
        )
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }
}

/// The stage boss, pinned to the right side of the arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boss {
    /// Top edge, within the patrol band
    pub y: f32,
    pub health: u32,
    pub heading: Heading,
}

impl Boss {
    /// Top of the patrol band
    pub const MIN_Y: f32 = BOSS_PATROL_MARGIN;
    /// Bottom of the patrol band
    pub const MAX_Y: f32 = ARENA_HEIGHT - BOSS_SIZE - BOSS_PATROL_MARGIN;

    /// Fresh boss for a stage: centered, full health, descending
    pub fn for_stage(stage: &StageConfig) -> Self {
        Self {
            y: centered_y(BOSS_SIZE),
            health: stage.boss_health,
            heading: Heading::Down,
        }
    }

    /// Advance the ping-pong patrol by `dt` milliseconds
    ///
    /// Reaching either end of the band clamps the position there and turns
    /// the boss around.
    pub fn patrol(&mut self, dt: f32) {
        let y = self.y + self.heading.sign() * BOSS_MOVE_SPEED * dt;
        if y <= Self::MIN_Y {
            self.y = Self::MIN_Y;
            self.heading = Heading::Down;
        } else if y >= Self::MAX_Y {
            self.y = Self::MAX_Y;
            self.heading = Heading::Up;
        } else {
            self.y = y;
        }
    }

    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(BOSS_X, self.y + BOSS_SIZE / 2.0 - PROJECTILE_SIZE / 2.0)
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }
}

/// A projectile in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Unique for the session, never reused
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub kind: ProjectileKind,
    pub direction: Direction,
}

impl Projectile {
    /// Move horizontally for `dt` milliseconds
    pub fn advance(&mut self, dt: f32) {
        self.pos.x += self.direction.sign() * self.direction.speed() * dt;
    }

    /// Still inside the arena, allowing one projectile width of overhang
    pub fn in_bounds(&self) -> bool {
        self.pos.x > -PROJECTILE_SIZE && self.pos.x < ARENA_WIDTH + PROJECTILE_SIZE
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Index into [`STAGES`]
    pub stage_index: usize,
    pub phase: GamePhase,
    /// Set once the player proceeds past the victory message
    pub victory_video_shown: bool,
    pub player: Player,
    pub boss: Boss,
    /// Live projectiles, in spawn order
    pub projectiles: Vec<Projectile>,
    /// Simulation clock (sum of all frame deltas), ms
    pub clock_ms: f64,
    /// Clock reading at the player's last shot; `None` fires immediately
    pub last_player_fire_ms: Option<f64>,
    /// Clock reading at the boss's last shot; `None` fires immediately
    pub last_boss_fire_ms: Option<f64>,
    /// Next projectile ID
    next_id: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Create the initial state: stage 0, everyone centered, nothing in flight
    pub fn new() -> Self {
        Self {
            stage_index: 0,
            phase: GamePhase::Playing,
            victory_video_shown: false,
            player: Player::default(),
            boss: Boss::for_stage(&STAGES[0]),
            projectiles: Vec::new(),
            clock_ms: 0.0,
            last_player_fire_ms: None,
            last_boss_fire_ms: None,
            next_id: 0,
        }
    }

    /// Reset everything to the initial state, from any phase
    ///
    /// The projectile ID counter keeps counting so IDs stay unique for the
    /// whole page session.
    pub fn restart(&mut self) {
        let next_id = self.next_id;
        *self = Self::new();
        self.next_id = next_id;
    }

    /// Config for the stage being fought
    pub fn stage(&self) -> &'static StageConfig {
        &STAGES[self.stage_index]
    }

    pub fn is_final_stage(&self) -> bool {
        self.stage_index + 1 >= STAGES.len()
    }

    /// Allocate a new projectile ID
    pub fn next_projectile_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a projectile and return its ID
    pub fn spawn_projectile(
        &mut self,
        pos: Vec2,
        kind: ProjectileKind,
        direction: Direction,
    ) -> u32 {
        let id = self.next_projectile_id();
        self.projectiles.push(Projectile {
            id,
            pos,
            kind,
            direction,
        });
        id
    }

    /// Move on to the next stage: fresh boss, empty sky
    ///
    /// The player and the fire timers carry over.
    pub fn advance_stage(&mut self) {
        debug_assert!(!self.is_final_stage());
        self.stage_index += 1;
        self.boss = Boss::for_stage(self.stage());
        self.projectiles.clear();
    }

    /// Acknowledge the victory message; only meaningful once the game is won
    pub fn proceed_to_victory(&mut self) {
        if self.phase == GamePhase::GameWon {
            self.victory_video_shown = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_initial_state() {
        let state = GameState::new();
        assert_eq!(state.stage_index, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.y, 268.0);
        assert_eq!(state.player.health, PLAYER_MAX_HEALTH);
        assert_eq!(state.boss.y, 260.0);
        assert_eq!(state.boss.health, 50);
        assert_eq!(state.boss.heading, Heading::Down);
        assert!(state.projectiles.is_empty());
        assert!(state.last_player_fire_ms.is_none());
        assert!(!state.victory_video_shown);
    }

    #[test]
    fn test_projectile_ids_monotonic() {
        let mut state = GameState::new();
        let a = state.spawn_projectile(Vec2::ZERO, ProjectileKind::Trophy, Direction::Right);
        let b = state.spawn_projectile(Vec2::ZERO, ProjectileKind::Resume, Direction::Left);
        state.projectiles.clear();
        let c = state.spawn_projectile(Vec2::ZERO, ProjectileKind::Trophy, Direction::Right);
        assert!(a < b && b < c);
    }

    #[test]
    fn test_advance_stage_resets_boss_only() {
        let mut state = GameState::new();
        state.player.y = 10.0;
        state.player.health = 40;
        state.boss.y = 30.0;
        state.boss.heading = Heading::Up;
        state.boss.health = 0;
        state.spawn_projectile(Vec2::new(400.0, 100.0), ProjectileKind::Resume, Direction::Left);

        state.advance_stage();

        assert_eq!(state.stage_index, 1);
        assert_eq!(state.boss, Boss::for_stage(&STAGES[1]));
        assert!(state.projectiles.is_empty());
        assert_eq!(state.player, Player { y: 10.0, health: 40 });
    }

    #[test]
    fn test_boss_patrol_flips_at_bounds() {
        let mut boss = Boss::for_stage(&STAGES[0]);
        boss.y = Boss::MAX_Y - 1.0;
        boss.patrol(100.0);
        assert_eq!(boss.y, Boss::MAX_Y);
        assert_eq!(boss.heading, Heading::Up);

        boss.y = Boss::MIN_Y + 1.0;
        boss.patrol(100.0);
        assert_eq!(boss.y, Boss::MIN_Y);
        assert_eq!(boss.heading, Heading::Down);

        // Next step leaves the bound in the new direction
        boss.patrol(10.0);
        assert!(boss.y > Boss::MIN_Y);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut player = Player::default();
        let y = player.y;
        player.move_vertical(true, true, 500.0);
        assert_eq!(player.y, y);
    }

    #[test]
    fn test_restart_never_reuses_projectile_ids() {
        let mut state = GameState::new();
        let before = state.spawn_projectile(Vec2::ZERO, ProjectileKind::Trophy, Direction::Right);
        state.restart();
        assert!(state.projectiles.is_empty());
        let after = state.spawn_projectile(Vec2::ZERO, ProjectileKind::Trophy, Direction::Right);
        assert!(after > before);
    }

    #[test]
    fn test_proceed_to_victory_only_when_won() {
        let mut state = GameState::new();
        state.proceed_to_victory();
        assert!(!state.victory_video_shown);
        state.phase = GamePhase::GameWon;
        state.proceed_to_victory();
        assert!(state.victory_video_shown);
    }

    #[test]
    fn test_projectile_culling() {
        let mut p = Projectile {
            id: 0,
            pos: Vec2::new(ARENA_WIDTH, 0.0),
            kind: ProjectileKind::Trophy,
            direction: Direction::Right,
        };
        assert!(p.in_bounds());
        p.advance(1000.0);
        assert!(!p.in_bounds());

        p.pos.x = -PROJECTILE_SIZE;
        assert!(!p.in_bounds());
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_arena(
            start in 0.0f32..=Player::MAX_Y,
            up in any::<bool>(),
            down in any::<bool>(),
            dt in 0.0f32..100_000.0,
        ) {
            let mut player = Player { y: start, health: PLAYER_MAX_HEALTH };
            player.move_vertical(up, down, dt);
            prop_assert!(player.y >= 0.0 && player.y <= Player::MAX_Y);
        }

        #[test]
        fn prop_boss_stays_in_band(
            start in Boss::MIN_Y..=Boss::MAX_Y,
            descending in any::<bool>(),
            steps in proptest::collection::vec(0.0f32..10_000.0, 1..50),
        ) {
            let mut boss = Boss {
                y: start,
                health: 1,
                heading: if descending { Heading::Down } else { Heading::Up },
            };
            for dt in steps {
                let before = boss.heading;
                boss.patrol(dt);
                prop_assert!(boss.y >= Boss::MIN_Y && boss.y <= Boss::MAX_Y);
                // A flip only ever happens on a band boundary
                if boss.heading != before {
                    prop_assert!(boss.y == Boss::MIN_Y || boss.y == Boss::MAX_Y);
                }
            }
        }
    }
}
