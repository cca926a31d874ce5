//! Run controller
//!
//! Owns the run state machine (Idle → Running → Over → Idle) and everything a
//! run touches: the scene, the spawn timer, the best-time record. The
//! platform layer calls `on_tick` once per frame and forwards button presses;
//! timers come back through the scene scheduler as `Task`s, so nothing runs
//! outside a tick.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::anim::{Animator, PlayerAnim};
use super::arcade::{ArcadeWorld, Contact};
use super::hud::{ButtonAction, Hud, Overlay};
use super::schedule::{Scheduler, Task, TaskId};
use super::state::{GameEvent, HazardVariant, InputState, RunState};
use crate::consts::MAX_FRAME_MS;
use crate::persistence::{BestTime, KeyValueStore};
use crate::tuning::Tuning;

/// Everything rebuilt from scratch on restart
#[derive(Debug, Clone)]
pub struct Scene {
    pub state: RunState,
    /// Run timer (ms), frozen once the run is over
    pub elapsed_ms: f64,
    pub world: ArcadeWorld,
    pub scheduler: Scheduler,
    pub hud: Hud,
    pub animator: Animator,
    /// Background tile offset (pixels)
    pub scroll_x: f32,
    spawn_task: Option<TaskId>,
    game_over_task: Option<TaskId>,
}

impl Scene {
    fn build(tuning: &Tuning, best: BestTime) -> Self {
        Self {
            state: RunState::Idle,
            elapsed_ms: 0.0,
            world: ArcadeWorld::new(tuning),
            scheduler: Scheduler::new(),
            hud: Hud::new(best),
            animator: Animator::new(),
            scroll_x: 0.0,
            spawn_task: None,
            game_over_task: None,
        }
    }

    /// A fatal contact happened and game over is waiting on its delay
    pub fn game_over_pending(&self) -> bool {
        self.game_over_task.is_some()
    }
}

/// Drives one game session across any number of runs
pub struct RunController {
    tuning: Tuning,
    store: Box<dyn KeyValueStore>,
    rng: Pcg32,
    best: BestTime,
    scene: Scene,
    events: Vec<GameEvent>,
}

impl RunController {
    pub fn new(tuning: Tuning, store: Box<dyn KeyValueStore>, seed: u64) -> Self {
        let best = BestTime::load_or_default(store.as_ref());
        log::info!("Best time on record: {:.0} ms", best.ms());

        Self {
            scene: Scene::build(&tuning, best),
            tuning,
            store,
            rng: Pcg32::seed_from_u64(seed),
            best,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> RunState {
        self.scene.state
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.scene.elapsed_ms
    }

    pub fn best(&self) -> BestTime {
        self.best
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn hud(&self) -> &Hud {
        &self.scene.hud
    }

    pub fn world(&self) -> &ArcadeWorld {
        &self.scene.world
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start button. Only acts on the start screen.
    pub fn on_start_pressed(&mut self) {
        if self.scene.state != RunState::Idle {
            log::debug!("Start ignored in {:?}", self.scene.state);
            return;
        }

        let scene = &mut self.scene;
        scene.hud.overlay = Overlay::Hidden;
        scene.elapsed_ms = 0.0;
        scene.state = RunState::Running;
        scene.spawn_task = Some(
            scene
                .scheduler
                .schedule_repeating(self.tuning.spawn_interval_ms, Task::SpawnHazard),
        );
        scene.hud.set_elapsed(0.0);
        scene.hud.time.visible = true;

        self.events.push(GameEvent::MusicRestart);
        self.events.push(GameEvent::RunStarted);
        log::info!("Run started");
    }

    /// Advance one frame of `delta_ms` milliseconds. Long frames are clamped
    /// once here so the run timer, the scheduler and the physics share a clock.
    pub fn on_tick(&mut self, delta_ms: f64, input: &InputState) {
        let delta_ms = if delta_ms.is_finite() {
            delta_ms.clamp(0.0, MAX_FRAME_MS)
        } else {
            0.0
        };

        // Timers armed on earlier ticks
        for (_, task) in self.scene.scheduler.advance(delta_ms) {
            match task {
                Task::SpawnHazard => self.spawn_hazard(),
                Task::GameOver => {
                    self.scene.game_over_task = None;
                    self.game_over();
                }
            }
        }

        if self.scene.state == RunState::Running {
            self.scene.elapsed_ms += delta_ms;
            let elapsed = self.scene.elapsed_ms;
            self.scene.hud.set_elapsed(elapsed);
        }

        self.apply_input(input);
        self.scene.scroll_x += self.tuning.scroll_step;

        let dt = (delta_ms / 1000.0) as f32;
        self.scene.animator.advance(dt);
        for contact in self.scene.world.step(dt) {
            match contact {
                Contact::PlayerHazard(id) => {
                    log::debug!("Player collided with hazard {}", id);
                    self.on_player_hazard_collision();
                }
                Contact::HazardGround(id) => log::debug!("Hazard {} hit the ground", id),
                Contact::HazardOffscreen(id) => log::debug!("Hazard {} left the screen", id),
            }
        }
    }

    /// Velocity and animation straight from the arrow keys. Jumping applies
    /// on every tick up is held while grounded, not only on the press.
    fn apply_input(&mut self, input: &InputState) {
        let speed = self.tuning.player_speed;
        let (vx, anim) = if input.left {
            (-speed, PlayerAnim::Left)
        } else if input.right {
            (speed, PlayerAnim::Right)
        } else {
            (0.0, PlayerAnim::Turn)
        };

        let world = &mut self.scene.world;
        world.set_player_velocity_x(vx);
        self.scene.animator.play(anim);

        if input.up && world.player().touching_down {
            world.set_player_velocity_y(-self.tuning.jump_velocity);
        }
    }

    /// Spawn timer callback. Does nothing unless a run is in progress.
    pub fn spawn_hazard(&mut self) {
        if self.scene.state != RunState::Running {
            log::debug!("Spawn skipped in {:?}", self.scene.state);
            return;
        }

        let variant = HazardVariant::ALL[self.rng.random_range(0..HazardVariant::ALL.len())];
        let id = self.scene.world.spawn_hazard(
            variant,
            self.tuning.hazard_anchor,
            self.tuning.hazard_speed,
        );
        self.events.push(GameEvent::HazardSpawned { id, variant });
        log::debug!("Spawned {} hazard {}", variant.as_str(), id);
    }

    /// Player touched a hazard. Game over follows after a short delay so the
    /// current physics step finishes first; repeat contacts are ignored.
    pub fn on_player_hazard_collision(&mut self) {
        if self.scene.state != RunState::Running || self.scene.game_over_pending() {
            return;
        }

        let task = self
            .scene
            .scheduler
            .schedule_once(self.tuning.game_over_delay_ms, Task::GameOver);
        self.scene.game_over_task = Some(task);
        self.events.push(GameEvent::PlayerHit);
    }

    /// End the run: freeze physics, stop spawning, show the restart screen and
    /// record a new best time if this run beat it.
    pub fn game_over(&mut self) {
        if self.scene.state != RunState::Running {
            return;
        }

        let scene = &mut self.scene;
        scene.state = RunState::Over;
        scene.world.pause();
        if let Some(task) = scene.spawn_task.take() {
            scene.scheduler.cancel(task);
        }
        if let Some(task) = scene.game_over_task.take() {
            scene.scheduler.cancel(task);
        }
        scene.hud.overlay = Overlay::GameOver;

        let elapsed_ms = scene.elapsed_ms;
        let new_best = self.best.offer(elapsed_ms);
        if new_best {
            if let Err(e) = self.best.save(self.store.as_mut()) {
                log::warn!("Could not save best time: {}", e);
            }
            self.scene.hud.set_best(self.best);
            log::info!("New best time: {:.0} ms", elapsed_ms);
        }

        self.events.push(GameEvent::GameOver {
            elapsed_ms,
            new_best,
        });
        log::info!("Game over after {:.0} ms", elapsed_ms);
    }

    /// Restart button. Tears down the scene and shows the start screen again.
    pub fn on_restart_pressed(&mut self) {
        if self.scene.state != RunState::Over {
            log::debug!("Restart ignored in {:?}", self.scene.state);
            return;
        }

        // A failed save leaves the store behind the in-memory record
        let stored = BestTime::load_or_default(self.store.as_ref());
        if stored.ms() > self.best.ms() {
            self.best = stored;
        }

        self.scene = Scene::build(&self.tuning, self.best);
        self.events.push(GameEvent::SceneReset);
        log::info!("Scene reset");
    }

    /// Pointer press in world coordinates; presses the visible button if hit
    pub fn on_pointer_down(&mut self, pos: Vec2) {
        if let Some(button) = self.scene.hud.overlay.button() {
            if button.contains(pos) {
                self.press(button.action);
            }
        }
    }

    /// Keyboard confirm (Enter/Space) presses whichever button is showing
    pub fn on_confirm(&mut self) {
        if let Some(button) = self.scene.hud.overlay.button() {
            self.press(button.action);
        }
    }

    fn press(&mut self, action: ButtonAction) {
        match action {
            ButtonAction::Start => self.on_start_pressed(),
            ButtonAction::Restart => self.on_restart_pressed(),
        }
    }
}
