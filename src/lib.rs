//! Meowlympics - a side-scrolling dodge game
//!
//! Core modules:
//! - `sim`: Run controller, arcade physics, scheduler and HUD model
//! - `persistence`: Key-value storage and the best-time record
//! - `platform`: Browser input plumbing
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (audio)
//! - `renderer` / `audio`: Canvas 2D drawing and Web Audio (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod persistence;
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use persistence::{BestTime, KeyValueStore, MemoryStore, StorageError};
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed physics timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame; one clamped frame needs 12 at 120 Hz
    pub const MAX_SUBSTEPS: u32 = 12;
    /// Longest frame a tick will count (ms); anything longer is clamped
    pub const MAX_FRAME_MS: f64 = 100.0;
    /// `MAX_FRAME_MS` in seconds, for the physics
    pub const MAX_FRAME_DT: f32 = (MAX_FRAME_MS / 1000.0) as f32;

    /// Spritesheet frame size of the cat, also its body size
    pub const PLAYER_WIDTH: f32 = 120.0;
    pub const PLAYER_HEIGHT: f32 = 99.0;

    /// Storage key holding the best time in milliseconds
    pub const BEST_TIME_KEY: &str = "highScore";
}
