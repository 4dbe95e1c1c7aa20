mod console;

use std::sync::{Mutex, MutexGuard};

use log::LevelFilter;
use thiserror::Error;
use wasm_bindgen::prelude::*;
use zoomy_core::{ConfigError, Options, WidgetSet};
use zoomy_protocol::{Targeted, WidgetHandle};

static WIDGETS: Mutex<WidgetSet> = Mutex::new(WidgetSet::new());

#[derive(Debug, Error)]
enum BridgeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("widget registry is poisoned")]
    Poisoned,
    #[error("timestamp {0} is not a finite number")]
    InvalidTimestamp(f64),
    #[error("unknown log level: {0}")]
    InvalidLogLevel(String),
}

fn widgets() -> Result<MutexGuard<'static, WidgetSet>, BridgeError> {
    WIDGETS.lock().map_err(|_| BridgeError::Poisoned)
}

fn to_json(commands: &[Targeted]) -> Result<String, BridgeError> {
    Ok(serde_json::to_string(commands)?)
}

/// JS numbers to whole Unix seconds.
fn to_seconds(value: f64) -> Result<i64, BridgeError> {
    if value.is_finite() {
        Ok(value.round() as i64)
    } else {
        Err(BridgeError::InvalidTimestamp(value))
    }
}

fn parse_options(options_json: Option<&str>) -> Result<Options, BridgeError> {
    match options_json {
        Some(json) if !json.trim().is_empty() => Ok(Options::from_json(json)?),
        _ => Ok(Options::default()),
    }
}

fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[wasm_bindgen(start)]
pub fn start() {
    console::init(LevelFilter::Info);
}

/// Change console verbosity: "off", "error", "warn", "info", "debug", "trace".
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsError> {
    let filter = level
        .parse::<LevelFilter>()
        .map_err(|_| BridgeError::InvalidLogLevel(level.to_string()))?;
    console::init(filter);
    Ok(())
}

/// Register a widget for an `<img>` currently showing `src`. Returns the
/// handle every other call takes. The host should call `on_load` once the
/// image is complete.
#[wasm_bindgen]
pub fn init(src: &str, options_json: Option<String>) -> Result<usize, JsError> {
    let options = parse_options(options_json.as_deref())?;
    let handle = widgets()?.init(src, options)?;
    Ok(handle.0)
}

#[wasm_bindgen]
pub fn destroy(handle: usize) -> Result<(), JsError> {
    widgets()?.destroy(WidgetHandle(handle))?;
    Ok(())
}

/// Link widgets so that zooming or dragging one moves all of them.
#[wasm_bindgen]
pub fn sync(handles: &[u32]) -> Result<(), JsError> {
    let handles: Vec<WidgetHandle> = handles
        .iter()
        .map(|&h| WidgetHandle(h as usize))
        .collect();
    widgets()?.sync(&handles)?;
    Ok(())
}

/// The image finished loading. Returns the displayed timespan as JSON.
#[wasm_bindgen]
pub fn on_load(handle: usize, width: f64) -> Result<String, JsError> {
    let now = to_seconds(now_ms() / 1000.0)?;
    let span = widgets()?.on_load(WidgetHandle(handle), now, width)?;
    Ok(serde_json::to_string(&span)?)
}

/// The image changed size without reloading.
#[wasm_bindgen]
pub fn resize(handle: usize, width: f64) -> Result<(), JsError> {
    widgets()?.resize(WidgetHandle(handle), width)?;
    Ok(())
}

/// The image failed to load. Returns commands as JSON.
#[wasm_bindgen]
pub fn on_error(handle: usize) -> Result<String, JsError> {
    let commands = widgets()?.on_error(WidgetHandle(handle))?;
    Ok(to_json(&commands)?)
}

/// A wheel event at image x-coordinate `x`. `delta` is in notches,
/// positive when the wheel turns away from the user (zoom in).
#[wasm_bindgen]
pub fn on_wheel(handle: usize, x: f64, delta: i32) -> Result<String, JsError> {
    let commands = widgets()?.on_wheel(WidgetHandle(handle), now_ms(), x, delta)?;
    Ok(to_json(&commands)?)
}

/// Timer callback for a `schedule_wheel_flush` command.
#[wasm_bindgen]
pub fn flush_wheel(handle: usize) -> Result<String, JsError> {
    let commands = widgets()?.flush_wheel(WidgetHandle(handle), now_ms())?;
    Ok(to_json(&commands)?)
}

#[wasm_bindgen]
pub fn on_mouse_down(handle: usize, x: f64) -> Result<(), JsError> {
    widgets()?.on_mouse_down(WidgetHandle(handle), x)?;
    Ok(())
}

#[wasm_bindgen]
pub fn on_mouse_up(handle: usize, x: f64) -> Result<String, JsError> {
    let commands = widgets()?.on_mouse_up(WidgetHandle(handle), x)?;
    Ok(to_json(&commands)?)
}

/// Move a widget (and its synced peers) to `[start, end]`, in Unix seconds.
#[wasm_bindgen]
pub fn update(handle: usize, start: f64, end: f64) -> Result<String, JsError> {
    let (start, end) = (to_seconds(start)?, to_seconds(end)?);
    let commands = widgets()?.update(WidgetHandle(handle), start, end)?;
    Ok(to_json(&commands)?)
}

/// Unix time under image x-coordinate `x`.
#[wasm_bindgen]
pub fn timestamp_at(handle: usize, x: f64) -> Result<f64, JsError> {
    let set = widgets()?;
    let widget = set.get(WidgetHandle(handle))?;
    let t = widget.timestamp_at(x)?;
    Ok(t as f64)
}

/// Current timespan as JSON, `null` before the first successful load.
#[wasm_bindgen]
pub fn get_timespan(handle: usize) -> Result<String, JsError> {
    let set = widgets()?;
    let widget = set.get(WidgetHandle(handle))?;
    Ok(serde_json::to_string(&widget.timespan())?)
}
