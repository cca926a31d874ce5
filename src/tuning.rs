//! Data-driven game balance
//!
//! Every number the run depends on lives here so a JSON override can retune
//! the game without a rebuild.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while loading a tuning override
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectSpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Playable area (pixels)
    pub world_width: f32,
    pub world_height: f32,
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,

    /// Horizontal speed while an arrow key is held (pixels/s)
    pub player_speed: f32,
    /// Upward velocity applied by a jump (pixels/s)
    pub jump_velocity: f32,
    /// Player spawn point (body center)
    pub player_start: Vec2,

    /// Leftward speed of every hazard (pixels/s)
    pub hazard_speed: f32,
    /// Time between hazard spawns (ms)
    pub spawn_interval_ms: f64,
    /// Bottom-left corner of a freshly spawned hazard. An anchor below the
    /// top of the ground makes every hazard break on it at once.
    pub hazard_anchor: Vec2,

    /// Delay between the fatal contact and the game-over screen (ms)
    pub game_over_delay_ms: f64,
    /// Background scroll per tick (pixels)
    pub scroll_step: f32,

    /// Static ground slab
    pub ground: RectSpec,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: 1200.0,
            world_height: 650.0,
            gravity: 2000.0,

            player_speed: 500.0,
            jump_velocity: 900.0,
            player_start: Vec2::new(100.0, 450.0),

            hazard_speed: 300.0,
            spawn_interval_ms: 1500.0,
            hazard_anchor: Vec2::new(1200.0, 520.0),

            game_over_delay_ms: 10.0,
            scroll_step: 0.8,

            ground: RectSpec {
                x: 0.0,
                y: 540.0,
                width: 1200.0,
                height: 100.0,
            },
        }
    }
}

impl Tuning {
    /// LocalStorage key for an optional override
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "meowlympics_tuning";

    /// Parse and validate a JSON override. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would stall or break the run
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f64) -> Result<(), TuningError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        positive("world_width", self.world_width as f64)?;
        positive("world_height", self.world_height as f64)?;
        positive("hazard_speed", self.hazard_speed as f64)?;
        positive("spawn_interval_ms", self.spawn_interval_ms)?;
        positive("ground.width", self.ground.width as f64)?;
        positive("ground.height", self.ground.height as f64)?;

        if !self.game_over_delay_ms.is_finite() || self.game_over_delay_ms < 0.0 {
            return Err(TuningError::Invalid {
                field: "game_over_delay_ms",
                reason: "must be zero or positive",
            });
        }
        Ok(())
    }

    /// Load the override from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning override from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring tuning override: {}", e),
                }
            }
        }

        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "hazard_speed": 450.0 }"#).unwrap();
        assert_eq!(tuning.hazard_speed, 450.0);
        assert_eq!(tuning.spawn_interval_ms, 1500.0);
        assert_eq!(tuning.player_start, Vec2::new(100.0, 450.0));
    }

    #[test]
    fn test_rejects_zero_interval() {
        let err = Tuning::from_json(r#"{ "spawn_interval_ms": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "spawn_interval_ms",
                ..
            }
        ));
    }

    #[test]
    fn test_accepts_anchor_inside_ground() {
        let tuning = Tuning::from_json(r#"{ "hazard_anchor": [1200.0, 560.0] }"#).unwrap();
        assert_eq!(tuning.hazard_anchor, Vec2::new(1200.0, 560.0));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ nope"),
            Err(TuningError::Parse(_))
        ));
    }
}
