//! Run state and entity types

use glam::Vec2;

use super::arcade::Body;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// Start screen, waiting for the Start button
    #[default]
    Idle,
    /// Timer running, hazards spawning
    Running,
    /// Run ended, physics frozen, waiting for Restart
    Over,
}

/// Arrow-key state, polled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Hazard artwork variants, picked uniformly at random
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HazardVariant {
    Pebble,
    Stump,
    Log,
}

impl HazardVariant {
    pub const ALL: [HazardVariant; 3] = [
        HazardVariant::Pebble,
        HazardVariant::Stump,
        HazardVariant::Log,
    ];

    /// Body size in pixels
    pub fn size(&self) -> Vec2 {
        match self {
            HazardVariant::Pebble => Vec2::new(50.0, 40.0),
            HazardVariant::Stump => Vec2::new(60.0, 70.0),
            HazardVariant::Log => Vec2::new(110.0, 45.0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HazardVariant::Pebble => "pebble",
            HazardVariant::Stump => "stump",
            HazardVariant::Log => "log",
        }
    }
}

/// An obstacle sliding left across the screen
#[derive(Debug, Clone)]
pub struct Hazard {
    pub id: u32,
    pub variant: HazardVariant,
    pub body: Body,
}

/// The cat
#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    /// Resting on the ground or the floor of the world after the last step
    pub touching_down: bool,
}

/// Notifications for the platform layer (audio, logging), drained each frame
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Background track should (re)start from the top
    MusicRestart,
    RunStarted,
    HazardSpawned { id: u32, variant: HazardVariant },
    PlayerHit,
    GameOver { elapsed_ms: f64, new_best: bool },
    SceneReset,
}
