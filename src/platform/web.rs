//! Browser host
//!
//! Owns the game, the optional render surface and the animation frame loop.
//! One frame callback per display refresh: input snapshot, tick, effects,
//! draw, DOM text. The loop keeps rescheduling itself until `stop`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, Window};

use super::input::{Action, InputAdapter};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::error::GameError;
use crate::renderer::{RenderState, build_scene, overlay};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, advance_frame, tick};

type FrameCallback = Closure<dyn FnMut(f64)>;
type KeyCallback = Closure<dyn FnMut(KeyboardEvent)>;

/// Game instance holding all state
struct Game {
    state: GameState,
    settings: Settings,
    input: InputAdapter,
    /// `None` when there is nothing to draw on
    render_state: Option<RenderState>,
    document: Document,
}

impl Game {
    fn frame(&mut self) {
        let input = self.input.snapshot();
        tick(&mut self.state, &input);
        advance_frame(&mut self.state);

        for event in self.state.drain_events() {
            match event {
                GameEvent::LifeLost { lives_left } => log::info!("Life lost ({} left)", lives_left),
                other => log::trace!("{:?}", other),
            }
        }

        self.render();
        self.update_dom();
    }

    fn render(&mut self) {
        let Some(render_state) = self.render_state.as_mut() else {
            return;
        };

        let vertices = build_scene(&self.state, &self.settings);
        match render_state.render(&vertices) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (w, h) = render_state.size;
                render_state.resize(w, h);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }

    /// Update HUD and overlay elements in the page
    fn update_dom(&self) {
        let hud = overlay::hud(&self.state);
        set_text(&self.document, "hud-score", &hud.score);
        set_text(&self.document, "hud-lives", &hud.hearts);
        set_text(&self.document, "hud-lives-count", &hud.lives);

        match overlay::overlay(&self.state, self.settings.overlay_pulse()) {
            Some(o) => {
                set_visible(&self.document, "overlay", true);
                set_text(&self.document, "overlay-title", o.title);
                set_text(&self.document, "overlay-details", &o.details.join("\n"));
                set_text(&self.document, "overlay-prompt", o.prompt);
                set_opacity(&self.document, "overlay-prompt", o.prompt_alpha);
            }
            None => set_visible(&self.document, "overlay", false),
        }
    }
}

fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        if el.text_content().as_deref() != Some(text) {
            el.set_text_content(Some(text));
        }
    }
}

fn set_visible(document: &Document, id: &str, visible: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
    }
}

fn set_opacity(document: &Document, id: &str, alpha: f32) {
    if let Some(el) = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    {
        let _ = el.style().set_property("opacity", &format!("{:.3}", alpha));
    }
}

/// Running game, exposed to the page for reading score/lives/phase and teardown
#[wasm_bindgen]
pub struct GameHandle {
    game: Rc<RefCell<Game>>,
    window: Window,
    frame_id: Rc<Cell<Option<i32>>>,
    frame_callback: Rc<RefCell<Option<FrameCallback>>>,
    key_listeners: Vec<(&'static str, KeyCallback)>,
    blur_listener: Option<Closure<dyn FnMut(web_sys::Event)>>,
}

#[wasm_bindgen]
impl GameHandle {
    pub fn score(&self) -> u32 {
        self.game.borrow().state.score
    }

    pub fn lives(&self) -> u32 {
        self.game.borrow().state.lives
    }

    pub fn phase(&self) -> String {
        self.game.borrow().state.phase.as_str().to_string()
    }

    /// Cancel the pending frame, detach listeners and release the surface
    pub fn stop(&mut self) {
        if let Some(id) = self.frame_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        // Breaks the callback's self-reference
        if self.frame_callback.borrow_mut().take().is_none() {
            return;
        }

        for (event, listener) in self.key_listeners.drain(..) {
            let _ = self
                .window
                .remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref());
        }
        if let Some(listener) = self.blur_listener.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("blur", listener.as_ref().unchecked_ref());
        }

        self.game.borrow_mut().render_state = None;
        log::info!("Game loop stopped");
    }
}

impl GameHandle {
    fn attach_input(&mut self) {
        {
            let game = self.game.clone();
            let keydown = KeyCallback::new(move |event: KeyboardEvent| {
                let action = game
                    .borrow_mut()
                    .input
                    .key_down(&event.key(), event.repeat());
                if action.is_some_and(|a| a.suppress_default()) {
                    event.prevent_default();
                }
            });
            self.add_key_listener("keydown", keydown);
        }

        {
            let game = self.game.clone();
            let keyup = KeyCallback::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            self.add_key_listener("keyup", keyup);
        }

        // Window blur: held keys never get their key-up, so release them and pause
        {
            let game = self.game.clone();
            let blur = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                g.input.release_all();
                if g.state.phase == GamePhase::Playing {
                    g.input.press(Action::Toggle);
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = self
                .window
                .add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref());
            self.blur_listener = Some(blur);
        }
    }

    fn add_key_listener(&mut self, event: &'static str, listener: KeyCallback) {
        let _ = self
            .window
            .add_event_listener_with_callback(event, listener.as_ref().unchecked_ref());
        self.key_listeners.push((event, listener));
    }

    fn start_loop(&mut self) {
        let game = self.game.clone();
        let window = self.window.clone();
        let frame_id = self.frame_id.clone();
        let callback = self.frame_callback.clone();

        *self.frame_callback.borrow_mut() = Some(FrameCallback::new(move |_time: f64| {
            game.borrow_mut().frame();
            if let Some(cb) = callback.borrow().as_ref() {
                frame_id.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
            }
        }));

        if let Some(cb) = self.frame_callback.borrow().as_ref() {
            self.frame_id
                .set(self.window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
        }
    }
}

impl Drop for GameHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Size the canvas backing store and bring up a wgpu surface on it
async fn init_surface(
    window: &Window,
    document: &Document,
    canvas_id: &str,
) -> Result<RenderState, GameError> {
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .and_then(|el| el.dyn_into().ok())
        .ok_or_else(|| GameError::CanvasNotFound(canvas_id.to_string()))?;

    let dpr = window.device_pixel_ratio();
    let client_w = match canvas.client_width() {
        0 => CANVAS_WIDTH as i32,
        w => w,
    };
    let client_h = match canvas.client_height() {
        0 => CANVAS_HEIGHT as i32,
        h => h,
    };
    let width = (client_w as f64 * dpr) as u32;
    let height = (client_h as f64 * dpr) as u32;
    canvas.set_width(width);
    canvas.set_height(height);

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
        ..Default::default()
    });

    let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas))?;

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await?;

    log::info!("Using adapter: {:?}", adapter.get_info().name);

    RenderState::new(surface, &adapter, width, height).await
}

/// Start a game on the canvas with the given element id
///
/// A missing canvas or GPU is logged and the game runs without drawing.
pub async fn run(canvas_id: &str) -> Result<GameHandle, GameError> {
    let window = web_sys::window().ok_or(GameError::NoWindow)?;
    let document = window.document().ok_or(GameError::NoWindow)?;

    let settings = Settings::from_query(&window.location().search().unwrap_or_default());
    let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
    log::info!(
        "Game initialized with seed: {} ({} quality)",
        seed,
        settings.quality.as_str()
    );

    let render_state = match init_surface(&window, &document, canvas_id).await {
        Ok(render_state) => Some(render_state),
        Err(e) => {
            log::error!("Rendering disabled: {}", e);
            None
        }
    };

    let game = Rc::new(RefCell::new(Game {
        state: GameState::from_settings(seed, &settings),
        settings,
        input: InputAdapter::new(),
        render_state,
        document,
    }));

    let mut handle = GameHandle {
        game,
        window,
        frame_id: Rc::new(Cell::new(None)),
        frame_callback: Rc::new(RefCell::new(None)),
        key_listeners: Vec::new(),
        blur_listener: None,
    };
    handle.attach_input();
    handle.start_loop();

    Ok(handle)
}

/// JS entry point for pages that manage the game themselves
#[wasm_bindgen(js_name = startGame)]
pub async fn start_game(canvas_id: String) -> Result<GameHandle, JsValue> {
    run(&canvas_id)
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
