//! Platform abstraction layer
//!
//! Browser-facing plumbing that can still be tested natively:
//! - Keyboard tracking into polled arrow-key state
//! - Screen to world coordinate mapping

pub mod input;

pub use input::{KeyTracker, KeyCommand, to_world};
