//! Laser Bricks entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, MouseEvent, TouchEvent};

    use laser_bricks::audio::AudioManager;
    use laser_bricks::platform::with_class;
    use laser_bricks::renderer::RenderState;
    use laser_bricks::sim::GamePhase;
    use laser_bricks::{Game, Settings};

    type WebGame = Game<RenderState, AudioManager>;

    /// Canvas size in CSS pixels and device pixels
    fn canvas_size(canvas: &HtmlCanvasElement) -> (f32, f32, u32, u32) {
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        (
            client_w as f32,
            client_h as f32,
            (client_w as f64 * dpr) as u32,
            (client_h as f64 * dpr) as u32,
        )
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = with_class(&el.class_name(), "hidden", !visible);
            el.set_class_name(&classes);
        }
    }

    /// Update HUD elements in DOM
    fn update_hud(game: &WebGame) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let state = game.state();

        set_text(&document, "#hud-score .hud-value", &state.score.to_string());
        set_text(&document, "#hud-level .hud-value", &state.level.to_string());

        let show_fps = game.settings().show_fps;
        set_visible(&document, "hud-fps", show_fps);
        if show_fps {
            set_text(&document, "#hud-fps .hud-value", &game.fps().to_string());
        }

        set_visible(&document, "pause-menu", state.phase == GamePhase::Paused);
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Laser Bricks starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        set_visible(&document, "loading", false);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let (css_w, css_h, width, height) = canvas_size(&canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let audio = AudioManager::from_settings(&settings);
        let game = Rc::new(RefCell::new(Game::new(
            seed,
            css_w,
            css_h,
            settings,
            render_state,
            audio,
        )));

        setup_input_handlers(&canvas, game.clone());
        setup_resize_handler(&canvas, game.clone());
        setup_restart_button(game.clone());
        setup_auto_pause(game.clone());

        set_visible(&document, "hud", true);

        // Start game loop
        request_animation_frame(game);

        log::info!("Laser Bricks running!");
        Ok(())
    }

    /// Pointer x relative to the canvas (CSS pixels)
    fn touch_x(event: &TouchEvent, canvas: &HtmlCanvasElement) -> Option<f32> {
        let touch = event.touches().get(0)?;
        let rect = canvas.get_bounding_client_rect();
        Some(touch.client_x() as f32 - rect.left() as f32)
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<WebGame>>) {
        // Mouse move steers the ship
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .input_mut()
                    .pointer_moved(event.offset_x() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click fires; first gesture also unlocks audio
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.sound_mut().resume();
                g.input_mut().fire();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(x) = touch_x(&event, &canvas_clone) {
                    game.borrow_mut().input_mut().pointer_moved(x);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start moves and fires
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.sound_mut().resume();
                if let Some(x) = touch_x(&event, &canvas_clone) {
                    g.input_mut().pointer_moved(x);
                }
                g.input_mut().fire();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                if g.input_mut().key_pressed(&event.key()) {
                    event.prevent_default();
                    g.sound_mut().resume();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, game: Rc<RefCell<WebGame>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (css_w, css_h, width, height) = canvas_size(&canvas);
            canvas.set_width(width);
            canvas.set_height(height);
            game.borrow_mut().resize(css_w, css_h, width, height);
            log::debug!("Resized to {}x{} ({}x{} px)", css_w, css_h, width, height);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<WebGame>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<WebGame>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.frame(time);
            update_hud(&g);
        }

        request_animation_frame(game);
    }

    fn setup_restart_button(game: Rc<RefCell<WebGame>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().restart(seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<WebGame>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden
                    && game.borrow_mut().auto_pause()
                {
                    log::info!("Auto-paused (tab hidden)");
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
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                if game.borrow_mut().auto_pause() {
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

/// Native: play a headless autopilot session and report the outcome.
///
/// Usage: `laser-bricks [seed] [seconds]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use laser_bricks::audio::SilentSink;
    use laser_bricks::consts::{DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH};
    use laser_bricks::renderer::HeadlessRenderer;
    use laser_bricks::{Game, Settings};

    env_logger::init();
    log::info!("Laser Bricks (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let settings = Settings::load();
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .or(settings.seed)
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map_or(0, |d| d.as_secs())
        });
    let seconds = args
        .next()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(60);

    let mut game = Game::new(
        seed,
        DEFAULT_FIELD_WIDTH,
        DEFAULT_FIELD_HEIGHT,
        settings,
        HeadlessRenderer::new(DEFAULT_FIELD_WIDTH as u32, DEFAULT_FIELD_HEIGHT as u32),
        SilentSink,
    );
    game.input_mut().toggle_idle();

    let frame_ms = 1000.0 / 60.0;
    for frame in 0..(seconds as u64 * 60) {
        game.frame(frame as f64 * frame_ms);
    }

    let state = game.state();
    log::info!(
        "Session over: score {} | level {} | {} bricks from {} shots ({:.0}% accuracy) | {} frames",
        state.score,
        state.level,
        state.bricks_destroyed,
        state.shots_fired,
        state.accuracy() * 100.0,
        game.renderer().frames,
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
