//! JavaScript bindings
//!
//! The page owns the canvas and the animation frame loop; it calls
//! `update()` once per frame, forwards pointer moves, then draws from
//! `snapshot_json()`. Nothing here touches the DOM.

use wasm_bindgen::prelude::*;

use crate::calendar::ContributionCalendar;
use crate::error::{SceneError, check_dimensions};
use crate::settings::SceneConfig;
use crate::sim::{AutoFire, Engine};

fn to_js(err: SceneError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Install logging and the panic hook once the module loads
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) just keeps the existing logger
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("contrib-shooter wasm loaded");
}

/// Engine handle exposed to the page
#[wasm_bindgen]
pub struct WasmEngine {
    engine: Engine,
    autofire: AutoFire,
}

#[wasm_bindgen]
impl WasmEngine {
    /// Build from a calendar JSON; the config comes from LocalStorage
    #[wasm_bindgen(constructor)]
    pub fn new(calendar_json: &str, width: f32, height: f32) -> Result<WasmEngine, JsValue> {
        check_dimensions(width, height).map_err(to_js)?;
        let calendar = ContributionCalendar::from_json(calendar_json).map_err(to_js)?;
        let config = SceneConfig::load();
        // Seed ambient fire from the clock; it only decides when shots happen
        let seed = js_sys::Date::now() as u64;
        Ok(WasmEngine {
            engine: Engine::with_config(calendar, width, height, config),
            autofire: AutoFire::new(seed),
        })
    }

    /// Same, with the calendar synthesized from the username
    pub fn mock(username: &str, width: f32, height: f32) -> Result<WasmEngine, JsValue> {
        check_dimensions(width, height).map_err(to_js)?;
        let calendar = ContributionCalendar::mock(username, super::today_epoch_day());
        Ok(WasmEngine {
            engine: Engine::with_config(calendar, width, height, SceneConfig::load()),
            autofire: AutoFire::new(js_sys::Date::now() as u64),
        })
    }

    /// Advance one frame, then roll for an ambient shot
    pub fn update(&mut self) {
        self.engine.update();
        self.autofire.on_frame(&mut self.engine);
    }

    pub fn set_player_y(&mut self, y: f32) {
        self.engine.set_player_y(y);
    }

    /// Move the ship to the pointer with a chance of firing
    pub fn pointer_moved(&mut self, y: f32) {
        self.autofire.on_pointer_move(&mut self.engine, y);
    }

    pub fn shoot(&mut self) {
        self.engine.shoot();
    }

    pub fn end(&mut self) {
        self.engine.end();
    }

    pub fn score(&self) -> f64 {
        self.engine.state().score as f64
    }

    pub fn score_label(&self) -> String {
        self.engine.snapshot().score_label()
    }

    /// Render-ready state: `{ player, enemies, projectiles, score, width, height, terminal }`
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.engine.snapshot())
            .map_err(|e| to_js(SceneError::from(e)))
    }
}

/// Render a calendar JSON to the static SVG; decoding failures yield the
/// fallback error image instead of throwing
#[wasm_bindgen]
pub fn render_svg(calendar_json: &str, username: &str, width: f32, height: f32) -> String {
    let result = check_dimensions(width, height)
        .and_then(|_| ContributionCalendar::from_json(calendar_json));
    match result {
        Ok(calendar) => {
            crate::svg::render_svg_with(&calendar, username, width, height, &SceneConfig::load())
        }
        Err(e) => {
            log::warn!("SVG render failed for {}: {}", username, e);
            crate::svg::error_svg(&e.to_string())
        }
    }
}

/// Validate and persist a scene config for later sessions
#[wasm_bindgen]
pub fn save_config(config_json: &str) -> Result<(), JsValue> {
    let config = SceneConfig::from_json(config_json).map_err(to_js)?;
    config.save();
    Ok(())
}
