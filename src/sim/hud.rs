//! HUD model: text fields, overlays and buttons
//!
//! The renderer draws whatever this says; the controller is the only writer.

use glam::Vec2;

use super::arcade::Aabb;
use crate::persistence::BestTime;

pub const TITLE: &str = "Meowlympics";
pub const PRESS_START: &str = "Press Start";
pub const GAME_OVER: &str = "Game Over";

/// Elapsed-time display, e.g. `Time: 12s`
pub fn format_time(elapsed_ms: f64) -> String {
    format!("Time: {}s", whole_seconds(elapsed_ms))
}

/// Best-time display, e.g. `High Score: 7s`
pub fn format_best(best_ms: f64) -> String {
    format!("High Score: {}s", whole_seconds(best_ms))
}

fn whole_seconds(ms: f64) -> u64 {
    if ms.is_finite() && ms > 0.0 {
        (ms / 1000.0).floor() as u64
    } else {
        0
    }
}

/// A line of text that can be hidden
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    pub text: String,
    pub visible: bool,
}

/// What a button does when pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Start,
    Restart,
}

/// A clickable label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Button {
    pub label: &'static str,
    pub action: ButtonAction,
    pub rect: Aabb,
}

impl Button {
    pub fn contains(&self, point: Vec2) -> bool {
        self.rect.contains(point)
    }
}

/// Full-screen layer above the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    /// Title, prompt and Start button
    StartScreen,
    /// Game over text and Restart button
    GameOver,
    Hidden,
}

impl Overlay {
    /// The overlay's button, if it has one
    pub fn button(&self) -> Option<Button> {
        match self {
            Overlay::StartScreen => Some(Button {
                label: "Start",
                action: ButtonAction::Start,
                rect: Aabb::from_center(Vec2::new(600.0, 315.0), Vec2::new(150.0, 36.0)),
            }),
            Overlay::GameOver => Some(Button {
                label: "Restart",
                action: ButtonAction::Restart,
                rect: Aabb::from_center(Vec2::new(600.0, 340.0), Vec2::new(170.0, 34.0)),
            }),
            Overlay::Hidden => None,
        }
    }
}

/// Everything drawn on top of the playfield
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    /// Top right, hidden until a run starts
    pub time: TextField,
    /// Top left, always shown
    pub best: TextField,
    pub overlay: Overlay,
}

impl Hud {
    pub fn new(best: BestTime) -> Self {
        Self {
            time: TextField {
                text: format_time(0.0),
                visible: false,
            },
            best: TextField {
                text: format_best(best.ms()),
                visible: true,
            },
            overlay: Overlay::StartScreen,
        }
    }

    pub fn set_elapsed(&mut self, elapsed_ms: f64) {
        self.time.text = format_time(elapsed_ms);
    }

    pub fn set_best(&mut self, best: BestTime) {
        self.best.text = format_best(best.ms());
    }
}
