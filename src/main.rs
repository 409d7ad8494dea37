//! Pixel Blaster entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::convert::FromWasmAbi;
    use wasm_bindgen::prelude::*;
    use web_sys::{EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use pixel_blaster::audio::{AudioManager, Cue};
    use pixel_blaster::consts::*;
    use pixel_blaster::persistence::{KeyValueStore, LocalStore, MemoryStore};
    use pixel_blaster::platform::{Key, apply_key};
    use pixel_blaster::renderer::{RenderState, VertexBatch, draw_scene};
    use pixel_blaster::sim::{GameEvent, GameState, TickInput, tick};
    use pixel_blaster::{HighScore, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        batch: VertexBatch,
        audio: AudioManager,
        store: Box<dyn KeyValueStore>,
        settings: Settings,
        high_score: HighScore,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(width: u32, height: u32, seed: u64) -> Self {
            let mut store: Box<dyn KeyValueStore> = match LocalStore::open() {
                Ok(store) => Box::new(store),
                Err(e) => {
                    log::warn!("{}, scores won't persist", e);
                    Box::new(MemoryStore::new())
                }
            };
            let high_score = HighScore::load(&mut store);
            let settings = Settings::load(&store);

            let mut audio = AudioManager::new();
            audio.set_volume(settings.volume);
            audio.set_muted(settings.muted);

            Self {
                state: GameState::new(width as f32, height as f32, seed, high_score.best),
                render_state: None,
                batch: VertexBatch::new(width as f32, height as f32),
                audio,
                store,
                settings,
                high_score,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, &self.input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.fire = false;
            }
            self.accumulator = self.accumulator.min(SIM_DT * MAX_SUBSTEPS as f32);

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Calculate FPS from oldest to newest frame
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }

            self.handle_events();
        }

        /// Route simulation events to audio, persistence and the modal
        fn handle_events(&mut self) {
            for event in self.state.drain_events() {
                if let Some(cue) = Cue::for_event(&event) {
                    self.audio.play(cue);
                }
                if let GameEvent::GameOver { score, .. } = event {
                    if self.high_score.record(score) {
                        self.high_score.save(&mut self.store);
                    }
                    set_text("modalScoreEl", &score.to_string());
                    show("modalEl", true);
                }
            }
        }

        /// Render the current frame; a finished run keeps its last frame on screen
        fn render(&mut self) {
            if !self.state.is_running() {
                return;
            }
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };

            self.batch.clear();
            draw_scene(&mut self.batch, &self.state);

            match render_state.render(self.batch.vertices()) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            set_text("scoreEl", &self.state.score.to_string());
            set_text("highScoreEl", &self.high_score.best.to_string());

            if self.settings.show_fps {
                set_text("fpsEl", &format!("{} FPS", self.fps));
            }
            show("fpsEl", self.settings.show_fps);
        }

        /// Start (or restart) a run from the start screen or game-over modal
        fn begin_run(&mut self) {
            self.audio.play(Cue::Select);
            self.state.high_score = self.high_score.best;
            self.state.restart();
            self.input = TickInput {
                autopilot: self.input.autopilot,
                ..Default::default()
            };
            self.accumulator = 0.0;
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.clear();
            }
            show("modalEl", false);
            show("startModalEl", false);
        }

        fn resize(&mut self, width: u32, height: u32) {
            if width == 0 || height == 0 {
                return;
            }
            self.state.resize(width as f32, height as f32);
            self.batch.resize(width as f32, height as f32);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(width, height);
            }
        }

        fn change_volume(&mut self, steps: i32) {
            let volume = self.settings.adjust_volume(steps);
            self.audio.set_volume(volume);
            self.settings.save(&mut self.store);
            log::info!("Volume: {:.1}", volume);
        }

        fn toggle_mute(&mut self) {
            let muted = self.settings.toggle_mute();
            self.audio.set_muted(muted);
            self.settings.save(&mut self.store);
            show_volume_icon(muted);
        }
    }

    fn document() -> Option<web_sys::Document> {
        web_sys::window()?.document()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    /// Toggle the `hidden` class, leaving other classes alone
    fn show(id: &str, visible: bool) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    fn show_volume_icon(muted: bool) {
        show("volumeUpEl", !muted);
        show("volumeOffEl", muted);
    }

    /// Viewport size in CSS pixels
    fn viewport_size(window: &web_sys::Window) -> (u32, u32) {
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        (width as u32, height as u32)
    }

    /// Register a listener that lives for the rest of the page
    fn listen<E, F>(target: &EventTarget, name: &str, handler: F)
    where
        E: FromWasmAbi + 'static,
        F: FnMut(E) + 'static,
    {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        let _ = target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Pixel Blaster starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (width, height) = viewport_size(&window);
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(width, height, seed)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU (WebGL2 fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => {
                log::info!("Using adapter: {:?}", adapter.get_info().name);
                match RenderState::new(surface, &adapter, width, height).await {
                    Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
                    Err(e) => log::error!("Failed to create device: {}", e),
                }
            }
            Err(e) => log::error!("No graphics adapter, rendering disabled: {}", e),
        }

        {
            let g = game.borrow();
            set_text("highScoreEl", &g.high_score.best.to_string());
            show_volume_icon(g.settings.muted);
        }

        setup_input_handlers(&window, game.clone());
        setup_buttons(&document, game.clone());
        setup_window_events(&window, &document, &canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Pixel Blaster running!");
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // First click anywhere starts the background loop
        {
            let game = game.clone();
            listen(window, "click", move |_event: MouseEvent| {
                game.borrow_mut().audio.unlock();
            });
        }

        // Touch: unlock audio and fire
        {
            let game = game.clone();
            listen(window, "touchstart", move |_event: TouchEvent| {
                let mut g = game.borrow_mut();
                g.audio.unlock();
                if g.state.is_running() {
                    g.input.fire = true;
                }
            });
        }

        // Keyboard
        {
            let game = game.clone();
            listen(window, "keydown", move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let name = event.key();
                if name == "i" || name == "I" {
                    g.input.autopilot = !g.input.autopilot;
                    log::info!("Autopilot: {}", g.input.autopilot);
                    return;
                }
                match name.as_str() {
                    "-" | "_" => return g.change_volume(-1),
                    "=" | "+" => return g.change_volume(1),
                    _ => {}
                }
                if let Some(key) = Key::from_dom(&name) {
                    event.prevent_default();
                    if key == Key::Fire && !g.state.is_running() {
                        return;
                    }
                    apply_key(&mut g.input, key, true);
                }
            });
        }

        listen(window, "keyup", move |event: KeyboardEvent| {
            if let Some(key) = Key::from_dom(&event.key()) {
                apply_key(&mut game.borrow_mut().input, key, false);
            }
        });
    }

    fn setup_buttons(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        for id in ["startButtonEl", "buttonEl"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                listen(&btn, "click", move |_event: MouseEvent| {
                    game.borrow_mut().begin_run();
                });
            }
        }

        for id in ["volumeUpEl", "volumeOffEl"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                listen(&btn, "click", move |_event: MouseEvent| {
                    game.borrow_mut().toggle_mute();
                });
            }
        }
    }

    fn setup_window_events(
        window: &web_sys::Window,
        document: &web_sys::Document,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        // Resize re-initializes an active run at the new size
        {
            let game = game.clone();
            let canvas = canvas.clone();
            listen(window, "resize", move |_event: web_sys::Event| {
                let Some(window) = web_sys::window() else { return };
                let (width, height) = viewport_size(&window);
                canvas.set_width(width);
                canvas.set_height(height);
                game.borrow_mut().resize(width, height);
            });
        }

        // Spawn timers pause while the tab is hidden
        let document_clone = document.clone();
        listen(document, "visibilitychange", move |_event: web_sys::Event| {
            let visible = document_clone.visibility_state() != web_sys::VisibilityState::Hidden;
            game.borrow_mut().state.set_visible(visible);
        });
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Headless attract-mode session: `pixel-blaster [seed] [frames]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use pixel_blaster::HighScore;
    use pixel_blaster::persistence::MemoryStore;
    use pixel_blaster::sim::{GameEvent, GameState, TickInput, difficulty_config, tick};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Pixel Blaster (native) starting...");
    log::info!("Native mode runs the autopilot headless - use `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let max_frames: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 60 * 5);

    let mut store = MemoryStore::new();
    let mut high_score = HighScore::load(&mut store);

    let mut state = GameState::new(800.0, 600.0, seed, high_score.best);
    state.start();
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    let mut kills = 0u32;
    for _ in 0..max_frames {
        tick(&mut state, &input);
        for event in state.drain_events() {
            match event {
                GameEvent::EnemyDestroyed { .. } => kills += 1,
                GameEvent::GameOver { score, .. } => {
                    if high_score.record(score) {
                        high_score.save(&mut store);
                    }
                }
                _ => {}
            }
        }
        if !state.is_running() {
            break;
        }
    }

    let seconds = state.time_ms / 1000.0;
    println!(
        "seed {}: score {} ({} kills) after {:.1}s, stage {}, {}",
        seed,
        state.score,
        kills,
        seconds,
        difficulty_config(state.score).stage.as_str(),
        if state.is_running() {
            "still alive"
        } else {
            "game over"
        }
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
