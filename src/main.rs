//! No Screens entry point
//!
//! Browser build: wires the canvas, buttons, labels and pointer input to the
//! simulation and drives the animation loop and round countdown.
//! Native build: plays one headless round with an autoplaying tapper.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::DVec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlButtonElement, HtmlCanvasElement, HtmlImageElement, PointerEvent};

    use no_screens::Settings;
    use no_screens::assets::{self, AssetSet};
    use no_screens::audio::{AudioManager, SoundEffect};
    use no_screens::consts::COUNTDOWN_INTERVAL_MS;
    use no_screens::renderer::canvas2d::CanvasPainter;
    use no_screens::renderer::{draw_frame, draw_splash};
    use no_screens::sim::{
        GameEvent, RoundSummary, RoundToken, Session, TickOutcome, Viewport, frame, pointer_down,
    };

    /// Delay before the end-of-round summary pops up (lets the splash paint first)
    const SUMMARY_DELAY_MS: i32 = 50;

    /// Game instance holding all state
    struct Game {
        session: Session,
        painter: CanvasPainter,
        canvas: HtmlCanvasElement,
        assets: AssetSet<HtmlImageElement>,
        audio: AudioManager,
        settings: Settings,
        /// Pending countdown timeout, cleared on restart
        countdown_handle: Option<i32>,
    }

    impl Game {
        /// Resize the canvas backing store to the window and tell the session
        fn resize(&mut self) {
            let Some(window) = web_sys::window() else { return };
            let css_w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let css_h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let viewport = Viewport::from_css(css_w, css_h, window.device_pixel_ratio());

            self.canvas.set_width(viewport.width as u32);
            self.canvas.set_height(viewport.height as u32);
            let style = self.canvas.style();
            let _ = style.set_property("width", &format!("{css_w}px"));
            let _ = style.set_property("height", &format!("{css_h}px"));

            self.session.set_viewport(viewport);
            log::debug!(
                "Canvas resized to {}x{} (dpr {})",
                viewport.width,
                viewport.height,
                viewport.dpr
            );
            if !self.session.is_running() {
                self.draw_splash();
            }
        }

        fn draw_splash(&mut self) {
            let viewport = self.session.viewport;
            draw_splash(&mut self.painter, &viewport);
        }

        fn render(&mut self, now: f64) {
            let animate = self.settings.animate_entities();
            draw_frame(&mut self.painter, &self.session, &self.assets, now, animate);
        }

        /// Forward queued simulation events to audio and the DOM labels
        fn flush_events(&mut self) {
            for event in self.session.drain_events() {
                match event {
                    GameEvent::RoundStarted => {
                        set_button_disabled("playBtn", true);
                        set_button_disabled("replayBtn", false);
                    }
                    GameEvent::TimeChanged { remaining } => set_label("time", remaining),
                    GameEvent::ScoreChanged { good, bad } => {
                        set_label("good", good);
                        set_label("bad", bad);
                    }
                    GameEvent::GoodTap => self.audio.play(SoundEffect::Good),
                    GameEvent::BadTap => self.audio.play(SoundEffect::Bad),
                    GameEvent::RoundOver(summary) => {
                        self.draw_splash();
                        set_button_disabled("playBtn", false);
                        show_summary(summary);
                    }
                }
            }
        }

        /// Flip mute, persist it and relabel the button
        fn toggle_mute(&mut self) {
            let muted = self.settings.toggle_muted();
            self.audio.apply_settings(&self.settings);
            self.settings.save();
            set_mute_label(muted);
            log::info!("Sound {}", if muted { "muted" } else { "on" });
        }

        fn cancel_countdown(&mut self) {
            if let Some(handle) = self.countdown_handle.take() {
                if let Some(window) = web_sys::window() {
                    window.clear_timeout_with_handle(handle);
                }
            }
        }
    }

    fn set_label(id: &str, value: u32) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else { return };
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(&value.to_string()));
        }
    }

    fn set_button_disabled(id: &str, disabled: bool) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else { return };
        if let Some(btn) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
        {
            btn.set_disabled(disabled);
        }
    }

    fn set_mute_label(muted: bool) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else { return };
        if let Some(el) = document.get_element_by_id("muteBtn") {
            el.set_text_content(Some(if muted { "Son : off" } else { "Son : on" }));
        }
    }

    fn show_summary(summary: RoundSummary) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once_into_js(move || {
            if let Some(window) = web_sys::window() {
                let message = format!(
                    "Temps écoulé !\nBons coups: {}\nOups: {}",
                    summary.good, summary.bad
                );
                let _ = window.alert_with_message(&message);
            }
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.unchecked_ref(),
            SUMMARY_DELAY_MS,
        );
    }

    fn now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("No Screens starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .ok_or("no canvas")?
            .dyn_into()?;
        let painter = CanvasPainter::new(&canvas)?;

        let settings = Settings::load();
        let mut audio = AudioManager::new();
        audio.apply_settings(&settings);

        // Gameplay waits until every image has either loaded or failed
        let assets = assets::web::load().await;

        let seed = js_sys::Date::now() as u64;
        log::info!("Session seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            session: Session::new(seed, Viewport::default()),
            painter,
            canvas: canvas.clone(),
            assets,
            audio,
            settings,
            countdown_handle: None,
        }));
        game.borrow_mut().resize();

        setup_resize(game.clone())?;
        setup_pointer(&canvas, game.clone())?;
        setup_buttons(game)?;

        log::info!("No Screens ready");
        Ok(())
    }

    fn setup_resize(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize();
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_pointer(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            let mut g = game.borrow_mut();
            if !g.session.is_running() {
                return;
            }
            let rect = canvas_clone.get_bounding_client_rect();
            let point = g.session.viewport.client_to_canvas(
                DVec2::new(event.client_x() as f64, event.client_y() as f64),
                DVec2::new(rect.left(), rect.top()),
            );
            pointer_down(&mut g.session, point, now());
            g.flush_events();
        });
        canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document")?;

        if let Some(btn) = document.get_element_by_id("playBtn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                start_round(game.clone(), false);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("muteBtn") {
            set_mute_label(game.borrow().settings.muted);
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().toggle_mute();
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("replayBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                start_round(game.clone(), true);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    /// Start (or restart) a round and arm its loop and countdown
    ///
    /// The previous round's timer is cleared and its token invalidated before
    /// anything new is scheduled, so two rounds never tick at once.
    fn start_round(game: Rc<RefCell<Game>>, restart: bool) {
        let token = {
            let mut g = game.borrow_mut();
            g.audio.resume();
            g.cancel_countdown();
            let token = if restart {
                g.session.restart()
            } else {
                g.session.start()
            };
            let viewport = g.session.viewport;
            g.painter.clear(viewport.width, viewport.height);
            g.flush_events();
            token
        };
        schedule_countdown(game.clone(), token);
        request_animation_frame(game, token);
    }

    fn schedule_countdown(game: Rc<RefCell<Game>>, token: RoundToken) {
        let Some(window) = web_sys::window() else { return };
        let game_clone = game.clone();
        let closure = Closure::once_into_js(move || countdown_fired(game_clone, token));
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.unchecked_ref(),
            COUNTDOWN_INTERVAL_MS,
        ) {
            Ok(handle) => game.borrow_mut().countdown_handle = Some(handle),
            Err(e) => log::error!("Failed to arm countdown: {:?}", e),
        }
    }

    fn countdown_fired(game: Rc<RefCell<Game>>, token: RoundToken) {
        let outcome = {
            let mut g = game.borrow_mut();
            g.countdown_handle = None;
            let outcome = g.session.countdown_tick(token);
            g.flush_events();
            outcome
        };
        match outcome {
            TickOutcome::Continue { .. } => schedule_countdown(game, token),
            TickOutcome::Ended => {}
            TickOutcome::Stale => log::debug!("Dropped stale countdown tick"),
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>, token: RoundToken) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, token, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, token: RoundToken, time: f64) {
        {
            let mut g = game.borrow_mut();
            if !frame(&mut g.session, token, time) {
                // Round over or superseded: stop without rescheduling
                return;
            }
            g.render(time);
            g.flush_events();
        }

        request_animation_frame(game, token);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(12345);
    log::info!("No Screens (native) starting headless round with seed {}", seed);

    let (summary, ticks) = headless::play_round(seed, headless::REACTION_MS);
    log::info!("Round ran {} countdown ticks", ticks);
    println!("Temps écoulé ! Bons coups: {}  Oups: {}", summary.good, summary.bad);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use no_screens::sim::{RoundSummary, Session, TickOutcome, Viewport, frame, pointer_down};

    /// Simulated frame time (60 fps)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// How long the autoplayer takes to react to a new target
    pub const REACTION_MS: f64 = 350.0;

    /// Play one full round, tapping every unauthorized kid after `reaction_ms`
    ///
    /// Returns the summary and how many countdown ticks the round took.
    pub fn play_round(seed: u64, reaction_ms: f64) -> (RoundSummary, u32) {
        let mut session = Session::new(seed, Viewport::new(1920.0, 1080.0, 1.0));
        let token = session.start();

        let mut now = 0.0;
        let mut next_tick = 1000.0;
        let mut ticks = 0;
        loop {
            now += FRAME_MS;
            if now >= next_tick {
                next_tick += 1000.0;
                ticks += 1;
                if session.countdown_tick(token) == TickOutcome::Ended {
                    break;
                }
            }
            if !frame(&mut session, token, now) {
                break;
            }

            let target = session
                .entities
                .iter()
                .rev()
                .find(|e| e.is_target() && e.is_visible(now) && e.age(now) >= reaction_ms)
                .map(|e| e.pos);
            if let Some(pos) = target {
                pointer_down(&mut session, pos, now);
            }
            session.drain_events();
        }

        let summary = RoundSummary {
            good: session.round.good,
            bad: session.round.bad,
        };
        (summary, ticks)
    }

}
