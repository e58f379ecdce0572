//! Pixel Cow entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use pixel_cow::sim::GamePhase;
    use pixel_cow::snapshot::{HealthBand, HudSnapshot};
    use pixel_cow::{GameRunner, Settings};

    type Shared = Rc<RefCell<GameRunner>>;

    /// Update HUD elements in DOM
    fn update_hud(hud: &HudSnapshot) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let set_text = |id: &str, text: &str| {
            if let Some(el) = document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        };
        set_text("healthText", &hud.health.to_string());
        set_text("ammoText", &hud.ammo.to_string());
        set_text("scoreText", &hud.score.to_string());
        set_text("weaponName", hud.weapon_name);

        if let Some(fill) = document.get_element_by_id("healthFill") {
            let percent = hud.health as f32 / hud.max_health as f32 * 100.0;
            let _ = fill.set_attribute("style", &format!("width: {percent}%"));
            let class = match hud.health_band {
                HealthBand::High => "pixel-health-fill",
                HealthBand::Medium => "pixel-health-fill medium",
                HealthBand::Low => "pixel-health-fill low",
            };
            let _ = fill.set_attribute("class", class);
        }

        if let Some(overlay) = document.get_element_by_id("gameOverlay") {
            match &hud.overlay {
                Some(content) => {
                    let _ = overlay.class_list().remove_1("hidden");
                    set_text("overlayTitle", &content.title);
                    set_text("overlayMessage", &content.message);
                }
                None => {
                    let _ = overlay.class_list().add_1("hidden");
                }
            }
        }
    }

    /// Hand the frame to the page's renderer, if it registered one
    fn render(runner: &GameRunner) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(hook) = js_sys::Reflect::get(&window, &JsValue::from_str("renderFrame")) else {
            return;
        };
        let Some(hook) = hook.dyn_ref::<js_sys::Function>() else {
            return;
        };
        match runner.render_snapshot().to_json() {
            Ok(json) => {
                let _ = hook.call1(&JsValue::NULL, &JsValue::from_str(&json));
            }
            Err(e) => log::warn!("Render snapshot failed: {e}"),
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Pixel Cow starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let runner = Rc::new(RefCell::new(GameRunner::new(settings, seed)));
        {
            let r = runner.borrow();
            canvas.set_width(r.state.width as u32);
            canvas.set_height(r.state.height as u32);
            update_hud(&r.hud());
        }

        setup_keyboard(runner.clone());
        setup_pointer(&canvas, runner.clone());
        setup_buttons(runner.clone());
        setup_auto_pause(runner.clone());

        request_animation_frame(runner);

        log::info!("Pixel Cow running!");
    }

    fn setup_keyboard(runner: Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };
        {
            let runner = runner.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut r = runner.borrow_mut();
                r.resume_audio();
                if event.code() == "KeyI" {
                    r.demo = !r.demo;
                    log::info!("Demo mode: {}", r.demo);
                } else if r.input.key_down(&event.code()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if runner.borrow_mut().input.key_up(&event.code()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_pointer(canvas: &HtmlCanvasElement, runner: Shared) {
        {
            let runner = runner.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                // Scale from CSS pixels to playfield pixels
                let rect = canvas_clone.get_bounding_client_rect();
                let mut r = runner.borrow_mut();
                let scale_x = r.state.width / rect.width().max(1.0) as f32;
                let scale_y = r.state.height / rect.height().max(1.0) as f32;
                let x = (event.client_x() as f32 - rect.left() as f32) * scale_x;
                let y = (event.client_y() as f32 - rect.top() as f32) * scale_y;
                r.input.pointer_move(x, y);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let runner = runner.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut r = runner.borrow_mut();
                r.resume_audio();
                r.input.pointer_down(event.button());
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                runner.borrow_mut().input.pointer_up(event.button());
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
            });
            let _ = canvas
                .add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(runner: Shared) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("resumeBtn") {
            let runner = runner.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut r = runner.borrow_mut();
                // The overlay button only resumes; it never pauses
                if r.state.phase == GamePhase::Paused {
                    r.toggle_pause();
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restartBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                runner.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(runner: Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let runner = runner.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    runner.borrow_mut().auto_pause();
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
                runner.borrow_mut().auto_pause();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(runner: Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(runner);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(runner: Shared) {
        {
            let mut r = runner.borrow_mut();
            let hud = r.frame();
            render(&r);
            update_hud(&hud);
        }

        request_animation_frame(runner);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use pixel_cow::sim::{GameEvent, GamePhase};
    use pixel_cow::{GameRunner, Settings};

    env_logger::init();
    log::info!("Pixel Cow (native) starting...");
    log::info!("Native mode runs the autopilot headless - serve the wasm build to play");

    // Optional frame budget as the first argument (default: two minutes of play)
    let frames: u64 = match std::env::args().nth(1) {
        Some(arg) => match arg.parse() {
            Ok(n) => n,
            Err(e) => {
                log::warn!("Ignoring frame count {arg:?}: {e}");
                7200
            }
        },
        None => 7200,
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    let mut runner = GameRunner::new(Settings::load(), seed);
    runner.demo = true;

    let mut hud = runner.hud();
    for _ in 0..frames {
        hud = runner.frame();
        for event in runner.last_events() {
            if let GameEvent::WaveAdvanced { wave } = event {
                log::info!(
                    "Wave {wave}: score {}, health {}, {} enemies",
                    hud.score,
                    hud.health,
                    hud.enemy_count
                );
            }
        }
        if hud.phase == GamePhase::GameOver {
            break;
        }
    }

    match serde_json::to_string_pretty(&hud) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize final HUD: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
