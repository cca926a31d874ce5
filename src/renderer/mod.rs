//! Canvas 2D rendering module
//!
//! Draws a `Scene` snapshot: parallax background, ground, hazards, the cat and
//! the HUD. Shapes stand in for sprites since the game ships no image assets.

pub mod canvas;

pub use canvas::CanvasRenderer;
