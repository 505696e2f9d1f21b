//! A running game session
//!
//! Ties the simulation state to the live input capture and reports frame
//! events through the logger. Both entry points drive a `Game` once per
//! animation frame.

use crate::platform::InputCapture;
use crate::sim::{FrameEvent, GamePhase, GameState, Snapshot, tick};
use crate::stages::STAGES;

#[derive(Debug, Clone, Default)]
pub struct Game {
    pub state: GameState,
    pub input: InputCapture,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one animation frame of `dt` milliseconds
    pub fn frame(&mut self, dt: f32) -> Vec<FrameEvent> {
        let input = self.input.tick_input();
        let events = tick(&mut self.state, &input, dt);
        for event in &events {
            match *event {
                FrameEvent::StageCleared { from, to } => log::info!(
                    "{} defeated! Stage {}: {}",
                    STAGES[from].boss_name,
                    STAGES[to].id,
                    STAGES[to].name
                ),
                FrameEvent::GameOver => log::info!(
                    "Game over on stage {} ({} hp left on boss)",
                    self.state.stage().id,
                    self.state.boss.health
                ),
                FrameEvent::GameWon => log::info!(
                    "All {} bosses defeated with {} hp left",
                    STAGES.len(),
                    self.state.player.health
                ),
                FrameEvent::PlayerHit { .. } | FrameEvent::BossHit { .. } => {}
            }
        }
        events
    }

    /// Start over from stage 1, from any phase
    pub fn restart(&mut self) {
        self.state.restart();
        log::info!("Game restarted");
    }

    /// The player moved past the victory message
    pub fn proceed_to_victory(&mut self) {
        self.state.proceed_to_victory();
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::KeyDir;

    #[test]
    fn test_frame_samples_input() {
        let mut game = Game::new();
        let y = game.state.player.y;
        game.input.key("ArrowUp", true);
        game.frame(50.0);
        assert!(game.state.player.y < y);

        let y = game.state.player.y;
        game.input.key("ArrowUp", false);
        game.input.touch(KeyDir::Down, true);
        game.frame(50.0);
        assert!(game.state.player.y > y);
    }

    #[test]
    fn test_restart_keeps_input() {
        let mut game = Game::new();
        game.input.key("s", true);
        game.frame(100.0);
        game.state.phase = GamePhase::GameOver;
        game.restart();
        assert_eq!(game.state, GameState::new());
        assert_eq!(game.phase(), GamePhase::Playing);
        // Key is still physically held
        assert!(game.input.tick_input().down);
    }

    #[test]
    fn test_idle_session_reaches_terminal_phase() {
        // Standing still in the middle of the arena: the boss's first shot is
        // already lined up, so the session has to end one way or the other.
        let mut game = Game::new();
        let mut frames = 0;
        while game.phase() == GamePhase::Playing && frames < 100_000 {
            game.frame(16.0);
            frames += 1;
        }
        assert_ne!(game.phase(), GamePhase::Playing);
        let snap = game.snapshot();
        assert!(snap.game_over || snap.game_won);
    }
}
