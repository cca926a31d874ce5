//! Meowlympics entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use meowlympics::audio::{AudioManager, SoundEffect};
    use meowlympics::persistence::LocalStorageStore;
    use meowlympics::platform::{KeyCommand, KeyTracker, to_world};
    use meowlympics::renderer::CanvasRenderer;
    use meowlympics::sim::{GameEvent, RunController};
    use meowlympics::{Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        controller: RunController,
        renderer: Option<CanvasRenderer>,
        audio: AudioManager,
        keys: KeyTracker,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            Self {
                controller: RunController::new(Tuning::load(), Box::new(LocalStorageStore), seed),
                renderer: None,
                audio: AudioManager::new(settings),
                keys: KeyTracker::new(),
                last_time: 0.0,
            }
        }

        /// Run one frame of game logic
        fn update(&mut self, delta_ms: f64) {
            let input = self.keys.state();
            self.controller.on_tick(delta_ms, &input);

            for event in self.controller.drain_events() {
                match event {
                    GameEvent::MusicRestart => self.audio.restart_music(),
                    GameEvent::GameOver { new_best, .. } => {
                        self.audio.play(SoundEffect::GameOver);
                        if new_best {
                            self.audio.play(SoundEffect::NewBest);
                        }
                    }
                    _ => {}
                }
            }
            self.audio.update();
        }

        /// Render the current frame
        fn render(&self) {
            if let Some(renderer) = &self.renderer {
                let tuning = self.controller.tuning();
                if let Err(e) =
                    renderer.render(self.controller.scene(), tuning.world_width, tuning.world_height)
                {
                    log::warn!("Render error: {:?}", e);
                }
            }
        }

        fn world_size(&self) -> Vec2 {
            let tuning = self.controller.tuning();
            Vec2::new(tuning.world_width, tuning.world_height)
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Meowlympics starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        match CanvasRenderer::new(canvas.clone()) {
            Ok(renderer) => {
                fit_canvas(&canvas, &renderer);
                game.borrow_mut().renderer = Some(renderer);
            }
            Err(e) => log::error!("Canvas 2D unavailable: {:?}", e),
        }

        setup_keyboard(game.clone());
        setup_pointer(&canvas, game.clone());
        setup_focus(game.clone());
        setup_resize(&canvas, game.clone());

        request_animation_frame(game);

        log::info!("Meowlympics running!");
    }

    /// Size the backing store to the element's CSS size times device pixel ratio
    fn fit_canvas(canvas: &HtmlCanvasElement, renderer: &CanvasRenderer) {
        let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        renderer.resize(width.max(1), height.max(1));
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if KeyTracker::is_arrow(&key) || key == " " {
                    event.prevent_default();
                }
                let mut g = game.borrow_mut();
                g.audio.resume();
                if let Some(KeyCommand::Confirm) = g.keys.key_down(&key) {
                    g.controller.on_confirm();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.key_up(&event.key());
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_pointer(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            let rect = canvas_clone.get_bounding_client_rect();
            let client_pos = Vec2::new(
                (event.client_x() as f64 - rect.left()) as f32,
                (event.client_y() as f64 - rect.top()) as f32,
            );
            let client_size = Vec2::new(rect.width() as f32, rect.height() as f32);

            let mut g = game.borrow_mut();
            g.audio.resume();
            let pos = to_world(client_pos, client_size, g.world_size());
            g.controller.on_pointer_down(pos);
        });
        let _ = canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_focus(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Window blur (click outside): keyup events will be lost
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.keys.release_all();
                g.audio.set_blurred(true);
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().audio.set_blurred(false);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(renderer) = &game.borrow().renderer {
                fit_canvas(&canvas_clone, renderer);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time (ms)
            let delta_ms = if g.last_time > 0.0 {
                time - g.last_time
            } else {
                1000.0 / 60.0
            };
            g.last_time = time;

            g.update(delta_ms);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Meowlympics (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    println!("\nRunning headless demo...");
    demo_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one run with a simple autopilot that jumps when a hazard gets close
#[cfg(not(target_arch = "wasm32"))]
fn demo_run() {
    use meowlympics::sim::{GameEvent, InputState, RunController, RunState};
    use meowlympics::{MemoryStore, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 60;

    let mut controller = RunController::new(Tuning::default(), Box::new(MemoryStore::new()), 42);
    controller.on_start_pressed();

    let mut spawned = 0;
    for _ in 0..MAX_FRAMES {
        let player = controller.world().player().body.aabb();
        let danger = controller.world().hazards().iter().any(|h| {
            let gap = h.body.aabb().min.x - player.max.x;
            (0.0..90.0).contains(&gap)
        });
        let input = InputState {
            up: danger,
            ..Default::default()
        };
        controller.on_tick(FRAME_MS, &input);

        for event in controller.drain_events() {
            match event {
                GameEvent::HazardSpawned { .. } => spawned += 1,
                GameEvent::GameOver { elapsed_ms, new_best } => {
                    println!(
                        "Game over after {:.1}s ({} hazards, new best: {})",
                        elapsed_ms / 1000.0,
                        spawned,
                        new_best
                    );
                }
                _ => {}
            }
        }

        if controller.state() == RunState::Over {
            break;
        }
    }

    if controller.state() == RunState::Running {
        println!("Autopilot survived {} hazards in a minute", spawned);
    }
    println!("{}", controller.hud().best.text);
}
