//! Read-only view of the game for the presentation layer
//!
//! Serialized as camelCase JSON so a JavaScript renderer can consume it
//! directly.

use serde::Serialize;

use super::state::{Direction, GamePhase, GameState};
use crate::consts::*;
use crate::stages::ProjectileKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageView {
    /// 1-based ordinal
    pub id: u32,
    pub name: &'static str,
    pub background: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub health: u32,
    pub max_health: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BossView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub health: u32,
    pub max_health: u32,
    pub name: &'static str,
    pub sprite: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectileView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub kind: ProjectileKind,
    pub direction: Direction,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub stage: StageView,
    pub player: PlayerView,
    pub boss: BossView,
    pub projectiles: Vec<ProjectileView>,
    pub game_over: bool,
    pub game_won: bool,
    pub victory_video_shown: bool,
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        let stage = self.stage();
        Snapshot {
            stage: StageView {
                id: stage.id,
                name: stage.name,
                background: stage.background,
            },
            player: PlayerView {
                x: PLAYER_X,
                y: self.player.y,
                size: PLAYER_SIZE,
                health: self.player.health,
                max_health: PLAYER_MAX_HEALTH,
            },
            boss: BossView {
                x: BOSS_X,
                y: self.boss.y,
                size: BOSS_SIZE,
                health: self.boss.health,
                max_health: stage.boss_health,
                name: stage.boss_name,
                sprite: stage.boss_sprite,
            },
            projectiles: self
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    id: p.id,
                    x: p.pos.x,
                    y: p.pos.y,
                    kind: p.kind,
                    direction: p.direction,
                })
                .collect(),
            game_over: self.phase == GamePhase::GameOver,
            game_won: self.phase == GamePhase::GameWon,
            victory_video_shown: self.victory_video_shown,
        }
    }
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{TickInput, tick};

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = GameState::new();
        tick(&mut state, &TickInput::default(), 16.0);
        let snap = state.snapshot();

        assert_eq!(snap.stage.id, 1);
        assert_eq!(snap.stage.name, "School Days");
        assert_eq!(snap.player.health, 100);
        assert_eq!(snap.boss.max_health, 50);
        assert_eq!(snap.boss.name, "Dilushani Miss");
        assert_eq!(snap.projectiles.len(), 2);
        // Spawn order is preserved
        assert!(snap.projectiles[0].id < snap.projectiles[1].id);
        assert!(!snap.game_over && !snap.game_won);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let mut state = GameState::new();
        state.phase = GamePhase::GameOver;
        let json: serde_json::Value =
            serde_json::from_str(&state.snapshot().to_json().unwrap()).unwrap();

        assert_eq!(json["gameOver"], true);
        assert_eq!(json["gameWon"], false);
        assert_eq!(json["player"]["maxHealth"], 100);
        assert_eq!(json["boss"]["sprite"], "/images/characters/dilushaniMiss.png");
        assert!(json["projectiles"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_projectile_tags_serialize_lowercase() {
        let mut state = GameState::new();
        tick(&mut state, &TickInput::default(), 0.0);
        let json: serde_json::Value =
            serde_json::from_str(&state.snapshot().to_json().unwrap()).unwrap();
        let shots = json["projectiles"].as_array().unwrap();
        assert_eq!(shots[0]["kind"], "trophy");
        assert_eq!(shots[0]["direction"], "right");
        assert_eq!(shots[1]["kind"], "resume");
        assert_eq!(shots[1]["direction"], "left");
    }
}
