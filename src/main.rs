//! Neon Dino entry point
//!
//! On the web this wires the canvas, DOM shell and input to a [`Game`].
//! Natively it plays a scripted headless run and logs a summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent, Window};

    use neon_dino::Game;
    use neon_dino::consts::*;
    use neon_dino::persistence::LocalStorage;
    use neon_dino::platform::{FrameHandle, FrameHost, InputEvent, map_input};
    use neon_dino::renderer::{Canvas2d, SpriteSheet, WebCanvas};
    use neon_dino::sim::RunPhase;

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// `requestAnimationFrame` behind the frame loop
    struct RafHost {
        window: Window,
        callback: FrameCallback,
    }

    impl FrameHost for RafHost {
        fn request_frame(&mut self) -> Option<FrameHandle> {
            let callback = self.callback.borrow();
            let callback = callback.as_ref()?;
            match self
                .window
                .request_animation_frame(callback.as_ref().unchecked_ref())
            {
                Ok(id) => Some(FrameHandle(id)),
                Err(e) => {
                    log::warn!("requestAnimationFrame failed: {:?}", e);
                    None
                }
            }
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            if let Err(e) = self.window.cancel_animation_frame(handle.0) {
                log::warn!("cancelAnimationFrame failed: {:?}", e);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Neon Dino starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);

        let surface = WebCanvas::new(&document, canvas.clone(), SpriteSheet::load());
        if surface.is_none() {
            log::warn!("Canvas has no 2D context; frames will be skipped");
        }

        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let host = RafHost {
            window: window.clone(),
            callback: callback.clone(),
        };

        let game = Game::new(
            Box::new(host),
            Box::new(LocalStorage::new()),
            CANVAS_WIDTH,
            CANVAS_HEIGHT,
        )
        .on_game_over(|score| {
            let document = web_sys::window().and_then(|w| w.document());
            if let Some(el) = document.and_then(|d| d.get_element_by_id("final-score")) {
                el.set_text_content(Some(&score.to_string()));
            }
        });
        let game = Rc::new(RefCell::new(game));

        // Frame callback
        {
            let game = game.clone();
            let mut surface = surface;
            let document = document.clone();
            *callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
                let mut g = game.borrow_mut();
                g.frame(surface.as_mut().map(|s| s as &mut dyn Canvas2d));
                sync_overlays(&document, &g);
            }));
        }

        setup_input_handlers(&window, &canvas, game.clone());
        setup_buttons(&document, game.clone());
        setup_auto_pause(&window, &document, game.clone());
        setup_teardown(&window, game.clone());

        {
            let mut g = game.borrow_mut();
            g.mount();
            sync_overlays(&document, &g);
        }

        log::info!("Neon Dino running!");
    }

    /// Show the overlay matching the run phase
    fn sync_overlays(document: &Document, game: &Game) {
        let phase = game.phase();
        for (id, visible) in [
            ("start-screen", phase == RunPhase::Start),
            ("pause-menu", phase == RunPhase::Paused),
            ("game-over", phase == RunPhase::GameOver),
            ("pause-btn", phase == RunPhase::Playing),
        ] {
            if let Some(el) = document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
            }
        }
        if phase == RunPhase::GameOver {
            if let Some(el) = document.get_element_by_id("high-score") {
                el.set_text_content(Some(&game.high_score().to_string()));
            }
        }
    }

    fn setup_input_handlers(window: &Window, canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                if let Some(intent) = map_input(InputEvent::Key(&code)) {
                    // Keep space/up from scrolling the page
                    event.prevent_default();
                    game.borrow_mut().handle_intent(intent);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                if let Some(intent) = map_input(InputEvent::PointerDown) {
                    game.borrow_mut().handle_intent(intent);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                if let Some(intent) = map_input(InputEvent::TouchStart) {
                    game.borrow_mut().handle_intent(intent);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        let buttons: [(&str, fn(&mut Game)); 4] = [
            ("start-btn", |g| {
                g.start();
            }),
            ("pause-btn", |g| {
                g.pause();
            }),
            ("resume-btn", |g| {
                g.resume();
            }),
            ("restart-btn", Game::restart),
        ];

        for (id, action) in buttons {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing shell button #{}", id);
                continue;
            };
            let game = game.clone();
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                action(&mut g);
                sync_overlays(&document, &g);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(window: &Window, document: &Document, game: Rc<RefCell<Game>>) {
        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.pause() {
                        log::info!("Auto-paused (tab hidden)");
                        sync_overlays(&document_clone, &g);
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.pause() {
                    log::info!("Auto-paused (window blur)");
                    sync_overlays(&document, &g);
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_teardown(window: &Window, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().unmount();
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::Cell;
    use std::rc::Rc;

    use neon_dino::Game;
    use neon_dino::consts::*;
    use neon_dino::persistence::MemoryStore;
    use neon_dino::platform::{Intent, LoopState, ManualHost};
    use neon_dino::renderer::{Canvas2d, DrawList};
    use neon_dino::sim::{EntityKind, RunPhase, World};

    /// Five minutes of play at 60 Hz
    const MAX_FRAMES: u64 = 5 * 60 * 60;

    /// Jump when a ground hazard is about to reach the player
    fn should_jump(world: &World) -> bool {
        let player = world.player.rect;
        let reach = world.speed * 10.0;
        world.entities.iter().any(|e| {
            let ground = matches!(e.kind, EntityKind::Cactus { .. } | EntityKind::Shooter { .. });
            let gap = e.rect.x - player.right();
            ground && gap > 0.0 && gap < reach
        })
    }

    pub fn run(seed: u64) {
        let final_score = Rc::new(Cell::new(None));
        let sink = final_score.clone();

        let mut game = Game::new(
            Box::new(ManualHost::new()),
            Box::new(MemoryStore::new()),
            CANVAS_WIDTH,
            CANVAS_HEIGHT,
        )
        .with_seed(seed)
        .on_game_over(move |score| sink.set(Some(score)));

        let mut canvas = DrawList::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        game.mount();
        game.start();

        let mut frames = 0;
        let mut commands = 0;
        while frames < MAX_FRAMES
            && game.loop_state() == LoopState::Running
            && game.phase() != RunPhase::GameOver
        {
            if should_jump(game.world()) {
                game.handle_intent(Intent::Jump);
            }
            canvas.clear();
            game.frame(Some(&mut canvas as &mut dyn Canvas2d));
            commands += canvas.commands.len();
            frames += 1;
        }

        let world = game.world();
        log::info!(
            "Headless run finished after {} frames: score {}, lives {}, speed {:.2}, {} draw calls",
            frames,
            world.floored_score(),
            world.lives,
            world.speed,
            commands
        );
        match final_score.get() {
            Some(score) => log::info!("Game over reported with score {}", score),
            None => log::info!("Survived the whole run"),
        }
        log::info!("High score: {}", game.high_score());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Neon Dino (native) starting headless run...");
    log::info!("The playable build targets wasm32; this binary only runs a scripted smoke test");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(rand::random);
    log::info!("Seed: {}", seed);
    headless::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
