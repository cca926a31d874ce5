//! Simulation module
//!
//! All gameplay logic lives here, free of browser dependencies:
//! - `controller`: run state machine, spawning, game over, restart
//! - `arcade`: gravity + AABB physics for the player, ground and hazards
//! - `schedule`: tick-driven timers (spawn interval, delayed game over)
//! - `hud`: text fields, overlays and their display formats
//! - `anim`: player spritesheet clips

pub mod anim;
pub mod arcade;
pub mod controller;
pub mod hud;
pub mod schedule;
pub mod state;

pub use anim::{Animator, Clip, PlayerAnim};
pub use arcade::{Aabb, ArcadeWorld, Body, Contact};
pub use controller::{RunController, Scene};
pub use hud::{Button, ButtonAction, Hud, Overlay, TextField, format_best, format_time};
pub use schedule::{Scheduler, Task, TaskId};
pub use state::{GameEvent, Hazard, HazardVariant, InputState, Player, RunState};
