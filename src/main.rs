//! Flappy Web entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

    use flappy_web::platform::{Action, LocalStorage, TickScheduler, action_for_key};
    use flappy_web::platform::input::action_for_pointer;
    use flappy_web::renderer::{RenderState, shapes};
    use flappy_web::sim::{GameEvent, GamePhase};
    use flappy_web::{BirdSkin, GameLoop, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        game: GameLoop<LocalStorage>,
        settings: Settings,
        render_state: Option<RenderState>,
        scheduler: TickScheduler,
    }

    impl Game {
        fn new(store: LocalStorage, tuning: Tuning, seed: u64) -> Self {
            let settings = Settings::load(&store);
            Self {
                game: GameLoop::new(store, tuning, seed),
                settings,
                render_state: None,
                scheduler: TickScheduler::default(),
            }
        }

        fn apply(&mut self, action: Action) {
            match action {
                Action::Jump => self.game.jump(),
                Action::Restart => {
                    if self.game.state().is_over() {
                        self.game.restart();
                        self.scheduler.reset();
                    }
                }
            }
        }

        fn select_skin(&mut self, skin: BirdSkin) {
            self.settings.skin = skin;
            self.settings.save(self.game.store_mut());
            log::info!("Bird skin: {}", skin.as_str());
        }

        /// Run simulation ticks
        fn update(&mut self, time: f64) {
            let ticks = self.scheduler.advance(time, self.game.is_running());
            for _ in 0..ticks {
                self.game.tick();
            }

            for event in self.game.drain_events() {
                match event {
                    GameEvent::Started => log::info!("Run started"),
                    GameEvent::GameOver { score, cause } => {
                        log::info!("Game over: score {} ({:?})", score, cause)
                    }
                    GameEvent::NewHighScore { score } => log::info!("New high score: {}", score),
                    GameEvent::ObstacleSpawned { id, gap } => {
                        log::debug!("Obstacle {} spawned, gap {}", id, gap)
                    }
                    GameEvent::ObstacleCleared { id } => log::debug!("Obstacle {} cleared", id),
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = shapes::scene(self.game.state(), self.game.tuning());
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
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
        }

        /// Update HUD elements and the bird sprite in the DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let state = self.game.state();

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&state.score.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-high .hud-value").ok().flatten() {
                el.set_text_content(Some(&state.high_score.to_string()));
            }

            // Bird sprite
            if let Some(bird) = document
                .get_element_by_id("bird")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let sprite = shapes::bird_sprite(&state.bird, self.game.tuning());
                let style = bird.style();
                let _ = style.set_property("left", &format!("{}px", sprite.min.x));
                let _ = style.set_property("top", &format!("{}px", sprite.min.y));
                let _ = style.set_property("width", &format!("{}px", sprite.size.x));
                let _ = style.set_property("height", &format!("{}px", sprite.size.y));
                let _ = style.set_property("filter", self.settings.skin.css_filter());
            }

            // Selected skin marker
            for skin in BirdSkin::ALL {
                if let Some(el) = document.get_element_by_id(&format!("skin-{}", skin.as_str())) {
                    let class = if skin == self.settings.skin {
                        "skin-option selected"
                    } else {
                        "skin-option"
                    };
                    let _ = el.set_attribute("class", class);
                }
            }

            // Show/hide start prompt
            if let Some(el) = document.get_element_by_id("start-prompt") {
                let class = if state.phase == GamePhase::Ready { "overlay" } else { "overlay hidden" };
                let _ = el.set_attribute("class", class);
            }

            // Show/hide game over
            if let Some(el) = document.get_element_by_id("game-over") {
                if state.is_over() {
                    let _ = el.set_attribute("class", "overlay");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&state.score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "overlay hidden");
                }
            }
        }
    }

    /// Optional data-driven tuning embedded in the page
    fn load_tuning(document: &web_sys::Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning override");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring invalid tuning: {}", e);
                Tuning::default()
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flappy Web starting...");

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

        let tuning = load_tuning(&document);
        let playfield = tuning.playfield_size();

        // One CSS pixel per playfield unit, so DOM sprites line up with the canvas
        for id in ["playfield", "canvas"] {
            if let Some(el) = document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let style = el.style();
                let _ = style.set_property("width", &format!("{}px", playfield.x));
                let _ = style.set_property("height", &format!("{}px", playfield.y));
            }
        }

        // Backing store at device resolution, CSS size stays logical
        let dpr = window.device_pixel_ratio();
        let width = (playfield.x as f64 * dpr) as u32;
        let height = (playfield.y as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(LocalStorage::open(), tuning, seed)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => {
                log::info!("Using adapter: {:?}", adapter.get_info().name);
                match RenderState::new(surface, &adapter, width, height, playfield).await {
                    Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
                    Err(e) => log::error!("Failed to create device: {}", e),
                }
            }
            Err(e) => log::error!("No GPU adapter, running without canvas rendering: {}", e),
        }

        setup_input_handlers(&canvas, game.clone());
        setup_restart_button(game.clone());
        setup_skin_buttons(game.clone());
        setup_visibility(game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Flappy Web running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse click on the play surface
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().apply(action_for_pointer());
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().apply(action_for_pointer());
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                if let Some(action) = action_for_key(&event.code()) {
                    // Keep Space from scrolling the page
                    event.prevent_default();
                    game.borrow_mut().apply(action);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().apply(Action::Restart);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_skin_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for skin in BirdSkin::ALL {
            let Some(btn) = document.get_element_by_id(&format!("skin-{}", skin.as_str())) else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.stop_propagation();
                game.borrow_mut().select_skin(skin);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_visibility(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        // Hidden tabs stop receiving frames; don't replay the gap as a burst
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                game.borrow_mut().scheduler.reset();
                log::info!("Tab hidden, tick clock reset");
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flappy_web::autopilot;
    use flappy_web::platform::MemoryStorage;
    use flappy_web::{GameLoop, Tuning};

    /// Longest single run the headless demo will simulate (~10 minutes)
    const MAX_TICKS: u32 = 30_000;
    const RUNS: u32 = 5;

    env_logger::init();
    log::info!("Flappy Web (native) starting...");
    log::info!("Native mode runs the autopilot headless - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(1);

    let mut game = GameLoop::new(MemoryStorage::new(), Tuning::default(), seed);
    for run in 1..=RUNS {
        game.jump();
        let mut ticks = 0;
        while game.is_running() && ticks < MAX_TICKS {
            if autopilot::should_jump(game.state(), game.tuning()) {
                game.jump();
            }
            game.tick();
            ticks += 1;
        }
        for event in game.drain_events() {
            log::debug!("{:?}", event);
        }
        println!(
            "run {}: score {} ({} obstacles on screen)",
            run,
            game.state().score,
            game.state().obstacles.len()
        );
        game.restart();
    }
    println!("seed {}: best {}", game.seed(), game.high_score());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
