//! Compiled-in stage table
//!
//! Stages are fought strictly in order. Each one brings its own boss, health
//! pool, fire rate and projectile art.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Projectile art/behaviour tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectileKind {
    /// The player's weapon
    Trophy,
    Resume,
    Fart,
    Boot,
}

impl ProjectileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectileKind::Trophy => "trophy",
            ProjectileKind::Resume => "resume",
            ProjectileKind::Fart => "fart",
            ProjectileKind::Boot => "boot",
        }
    }

    /// Sprite used by the presentation layer
    pub fn sprite(&self) -> &'static str {
        match self {
            ProjectileKind::Trophy => "/images/weapons/anjaliWeapon.png",
            ProjectileKind::Resume => "/images/weapons/dilushaniMissWeapon.png",
            ProjectileKind::Fart => "/images/weapons/houloudWeapon.png",
            ProjectileKind::Boot => "/images/weapons/pamporiyaWeapon.png",
        }
    }
}

/// One boss encounter
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageConfig {
    /// 1-based ordinal shown in the stage banner
    pub id: u32,
    pub name: &'static str,
    pub boss_name: &'static str,
    pub boss_sprite: &'static str,
    pub background: &'static str,
    pub projectile: ProjectileKind,
    pub boss_health: u32,
    /// Milliseconds between boss shots
    pub boss_fire_rate_ms: f64,
}

pub static STAGES: &[StageConfig] = &[
    StageConfig {
        id: 1,
        name: "School Days",
        boss_name: "Dilushani Miss",
        boss_sprite: "/images/characters/dilushaniMiss.png",
        background: "/images/backgrounds/dilushaniMissBackground.png",
        projectile: ProjectileKind::Resume,
        boss_health: 50,
        boss_fire_rate_ms: 2000.0,
    },
    StageConfig {
        id: 2,
        name: "College Life",
        boss_name: "Houloud",
        boss_sprite: "/images/characters/houloud.png",
        background: "/images/backgrounds/houloudBackground.png",
        projectile: ProjectileKind::Fart,
        boss_health: 70,
        boss_fire_rate_ms: 1800.0,
    },
    StageConfig {
        id: 3,
        name: "Town Showdown",
        boss_name: "Pamporiya",
        boss_sprite: "/images/characters/pamporiya.png",
        background: "/images/backgrounds/pamporiyaBackground.png",
        projectile: ProjectileKind::Boot,
        boss_health: 90,
        boss_fire_rate_ms: 1500.0,
    },
];

/// A malformed stage table
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("stage table is empty")]
    NoStages,
    #[error("stage {index} has a boss with zero health")]
    ZeroBossHealth { index: usize },
    #[error("stage {index} has a non-positive fire rate ({rate_ms} ms)")]
    InvalidFireRate { index: usize, rate_ms: f64 },
    #[error("stage {index} has id {found}, expected {expected}")]
    OutOfOrder {
        index: usize,
        expected: u32,
        found: u32,
    },
}

/// Check a stage table before starting a session
///
/// Stages must be non-empty, numbered 1, 2, 3... and have positive health
/// and fire rates.
pub fn validate_stages(stages: &[StageConfig]) -> Result<(), ConfigError> {
    if stages.is_empty() {
        return Err(ConfigError::NoStages);
    }
    for (index, stage) in stages.iter().enumerate() {
        let expected = index as u32 + 1;
        if stage.id != expected {
            return Err(ConfigError::OutOfOrder {
                index,
                expected,
                found: stage.id,
            });
        }
        if stage.boss_health == 0 {
            return Err(ConfigError::ZeroBossHealth { index });
        }
        if stage.boss_fire_rate_ms.is_nan() || stage.boss_fire_rate_ms <= 0.0 {
            return Err(ConfigError::InvalidFireRate {
                index,
                rate_ms: stage.boss_fire_rate_ms,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_stages_are_valid() {
        assert_eq!(validate_stages(STAGES), Ok(()));
        assert_eq!(STAGES.len(), 3);
        assert_eq!(STAGES[0].boss_health, 50);
        assert_eq!(STAGES[1].boss_health, 70);
    }

    #[test]
    fn test_empty_table_rejected() {
        assert_eq!(validate_stages(&[]), Err(ConfigError::NoStages));
    }

    #[test]
    fn test_bad_stage_rejected() {
        let mut stages = STAGES.to_vec();
        stages[1].boss_health = 0;
        assert_eq!(
            validate_stages(&stages),
            Err(ConfigError::ZeroBossHealth { index: 1 })
        );

        let mut stages = STAGES.to_vec();
        stages[2].boss_fire_rate_ms = 0.0;
        assert!(matches!(
            validate_stages(&stages),
            Err(ConfigError::InvalidFireRate { index: 2, .. })
        ));

        let mut stages = STAGES.to_vec();
        stages.swap(0, 1);
        assert_eq!(
            validate_stages(&stages),
            Err(ConfigError::OutOfOrder {
                index: 0,
                expected: 1,
                found: 2
            })
        );
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::ZeroBossHealth { index: 2 };
        assert_eq!(err.to_string(), "stage 2 has a boss with zero health");
    }
}
