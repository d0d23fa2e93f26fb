//! Mountain Climber entry point
//!
//! Handles platform-specific initialization and wires the session to the host.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlInputElement, HtmlSelectElement,
    };

    use mountain_climber::consts::{VIEW_HEIGHT, WORLD_WIDTH};
    use mountain_climber::platform::WebScheduler;
    use mountain_climber::renderer::frame::format_time;
    use mountain_climber::sim::{Action, SessionPhase};
    use mountain_climber::settings::FramePacing;
    use mountain_climber::{GameSession, Settings, Tuning};

    type Session = GameSession<WebScheduler, CanvasRenderingContext2d>;

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Mountain Climber starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        canvas.set_width(WORLD_WIDTH as u32);
        canvas.set_height(VIEW_HEIGHT as u32);

        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let session = Rc::new(RefCell::new(GameSession::new(
            seed,
            Tuning::load(),
            Settings::load(),
            WebScheduler::new(window.clone()),
            context,
        )));
        log::info!("Session created with seed: {}", seed);

        bind_scheduler(&session);
        setup_keyboard(&window, session.clone())?;
        setup_buttons(&document, session.clone())?;
        setup_settings(&document, session.clone())?;
        update_hud(&document, &session.borrow());

        log::info!("Mountain Climber ready");
        Ok(())
    }

    /// Frame and countdown callbacks hold weak references; the event
    /// listeners below keep the session alive.
    fn bind_scheduler(session: &Rc<RefCell<Session>>) {
        let on_frame = {
            let weak: Weak<RefCell<Session>> = Rc::downgrade(session);
            Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                if let Some(session) = weak.upgrade() {
                    session.borrow_mut().on_frame(time);
                    refresh_hud(&session.borrow());
                }
            })
        };
        let on_second = {
            let weak: Weak<RefCell<Session>> = Rc::downgrade(session);
            Closure::<dyn FnMut()>::new(move || {
                if let Some(session) = weak.upgrade() {
                    session.borrow_mut().on_second();
                    refresh_hud(&session.borrow());
                }
            })
        };
        session
            .borrow_mut()
            .scheduler_mut()
            .bind(on_frame, on_second);
    }

    fn setup_keyboard(window: &web_sys::Window, session: Rc<RefCell<Session>>) -> Result<(), JsValue> {
        {
            let session = session.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let Some(action) = Action::from_key(&event.key()) else {
                    return;
                };
                let mut s = session.borrow_mut();
                if s.phase() == SessionPhase::Running {
                    // Keep arrows/space from scrolling the page mid-game
                    event.prevent_default();
                    s.key_down(action);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if let Some(action) = Action::from_key(&event.key()) {
                    session.borrow_mut().key_up(action);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_buttons(document: &Document, session: Rc<RefCell<Session>>) -> Result<(), JsValue> {
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let session = session.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                    return;
                };
                let name = input_value(&document, "player-name");
                let contact = input_value(&document, "player-contact");

                let outcome = session.borrow_mut().start(&name, &contact);
                set_text(
                    &document,
                    "start-error",
                    &outcome.err().map(|e| e.to_string()).unwrap_or_default(),
                );
                update_hud(&document, &session.borrow());
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("reset-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                session.borrow_mut().reset();
                refresh_hud(&session.borrow());
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    /// Settings panel: populate from the loaded settings, then apply and
    /// persist every change
    fn setup_settings(document: &Document, session: Rc<RefCell<Session>>) -> Result<(), JsValue> {
        let Some(form) = document.get_element_by_id("settings-form") else {
            return Ok(());
        };

        let current = session.borrow().settings().clone();
        if let Some(select) = select_element(document, "opt-pacing") {
            for pacing in FramePacing::ALL {
                let option = document.create_element("option")?;
                option.set_attribute("value", pacing.key())?;
                option.set_text_content(Some(pacing.as_str()));
                select.append_child(&option)?;
            }
            select.set_value(current.frame_pacing.key());
        }
        set_checked(document, "opt-parallax", current.parallax);
        set_checked(document, "opt-contrast", current.high_contrast);
        set_checked(document, "opt-debug", current.show_debug);

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let mut settings = session.borrow().settings().clone();
            if let Some(select) = select_element(&document, "opt-pacing") {
                match FramePacing::from_str(&select.value()) {
                    Some(pacing) => settings.frame_pacing = pacing,
                    None => log::warn!("Unknown frame pacing: {}", select.value()),
                }
            }
            settings.parallax = is_checked(&document, "opt-parallax", settings.parallax);
            settings.high_contrast = is_checked(&document, "opt-contrast", settings.high_contrast);
            settings.show_debug = is_checked(&document, "opt-debug", settings.show_debug);

            settings.save();
            session.borrow_mut().set_settings(settings);
        });
        form.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())?;
        closure.forget();

        Ok(())
    }

    fn refresh_hud(session: &Session) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            update_hud(&document, session);
        }
    }

    /// Update HUD elements in DOM
    fn update_hud(document: &Document, session: &Session) {
        set_text(document, "hud-score", &session.score().to_string());
        set_text(document, "hud-time", &format_time(session.seconds_remaining()));

        let phase = match session.phase() {
            SessionPhase::NotStarted => "Ready",
            SessionPhase::Running => "Climbing",
            SessionPhase::Ended => "Time's up",
        };
        set_text(document, "hud-phase", phase);

        // Identity form only while waiting to start
        if let Some(el) = document.get_element_by_id("identity-form") {
            let class = if session.phase() == SessionPhase::NotStarted {
                ""
            } else {
                "hidden"
            };
            let _ = el.set_attribute("class", class);
        }

        if let Some(result) = session.result() {
            if let Ok(json) = serde_json::to_string(&result) {
                if let Some(el) = document.get_element_by_id("game-over") {
                    let _ = el.set_attribute("data-result", &json);
                }
            }
        }
    }

    fn input_value(document: &Document, id: &str) -> String {
        document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .unwrap_or_default()
    }

    fn select_element(document: &Document, id: &str) -> Option<HtmlSelectElement> {
        document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
    }

    fn checkbox(document: &Document, id: &str) -> Option<HtmlInputElement> {
        document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    }

    fn is_checked(document: &Document, id: &str, fallback: bool) -> bool {
        checkbox(document, id).map_or(fallback, |input| input.checked())
    }

    fn set_checked(document: &Document, id: &str, checked: bool) {
        if let Some(input) = checkbox(document, id) {
            input.set_checked(checked);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Mountain Climber (native) starting...");
    log::info!("Native mode runs a headless demo climb - run with `trunk serve` for the web version");

    headless::run_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted climb against the manual scheduler
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use mountain_climber::platform::ManualScheduler;
    use mountain_climber::renderer::Recorder;
    use mountain_climber::sim::{Action, GameState};
    use mountain_climber::{GameSession, Settings, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    pub fn run_demo() {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        let mut session = GameSession::new(
            seed,
            Tuning::default(),
            Settings::default(),
            ManualScheduler::new(),
            Recorder::new(),
        );

        if let Err(e) = session.start("Demo", "demo@example.com") {
            log::error!("Demo failed to start: {}", e);
            return;
        }

        let mut frame = 0u64;
        loop {
            steer(&mut session);
            let now = frame as f64 * FRAME_MS;
            let delivered = session.pump_frame(now);
            frame += 1;
            if frame % 60 == 0 {
                session.pump_second();
            }
            if !delivered && !session.scheduler().interval_active() {
                break;
            }
        }

        match session.result() {
            Some(result) => match serde_json::to_string_pretty(&result) {
                Ok(json) => println!("{}", json),
                Err(e) => log::error!("Failed to serialize result: {}", e),
            },
            None => log::warn!("Demo ended without a result"),
        }
        log::info!(
            "{} frames drawn, {} platforms generated",
            session.surface().frames,
            session.state().platforms.len()
        );
    }

    /// Hold jump and walk toward the nearest ledge above
    fn steer(session: &mut GameSession<ManualScheduler, Recorder>) {
        let target = next_ledge_center(session.state());
        let player = session.state().player;
        let center = player.pos.x + player.size.x / 2.0;

        session.key_down(Action::Jump);
        session.key_up(Action::Left);
        session.key_up(Action::Right);
        match target {
            Some(x) if x < center - 20.0 => session.key_down(Action::Left),
            Some(x) if x > center + 20.0 => session.key_down(Action::Right),
            _ => {}
        }
    }

    fn next_ledge_center(state: &GameState) -> Option<f32> {
        let feet = state.player.bottom();
        state
            .platforms
            .iter()
            .filter(|p| p.top() < feet - 1.0)
            .max_by(|a, b| a.top().total_cmp(&b.top()))
            .map(|p| p.pos.x + p.size.x / 2.0)
    }
}
