//! Host services backed by JS callbacks.

use floorplan::geometry::tolerance::{DEFAULT_WALL_HEIGHT_MM, DEFAULT_WALL_THICKNESS_MM};
use floorplan::HostServices;
use js_sys::Function;
use wasm_bindgen::JsValue;

/// Each callback is optional. Missing number callbacks report the default
/// wall settings; missing notification callbacks log to the console.
#[derive(Default)]
pub struct JsHost {
    pub(crate) wall_thickness: Option<Function>,
    pub(crate) wall_height: Option<Function>,
    pub(crate) show_error: Option<Function>,
    pub(crate) show_success: Option<Function>,
}

fn read_number(f: Option<&Function>, fallback: f64) -> f64 {
    match f {
        // a throwing or non-numeric callback yields NaN, which the editor replaces
        Some(f) => f.call0(&JsValue::NULL).ok().and_then(|v| v.as_f64()).unwrap_or(f64::NAN),
        None => fallback,
    }
}

fn notify(f: Option<&Function>, message: &str, console: fn(&JsValue)) {
    let msg = JsValue::from_str(message);
    match f {
        Some(f) => {
            if f.call1(&JsValue::NULL, &msg).is_err() {
                console(&msg);
            }
        }
        None => console(&msg),
    }
}

impl HostServices for JsHost {
    fn wall_thickness(&self) -> f64 {
        read_number(self.wall_thickness.as_ref(), DEFAULT_WALL_THICKNESS_MM)
    }
    fn wall_height(&self) -> f64 {
        read_number(self.wall_height.as_ref(), DEFAULT_WALL_HEIGHT_MM)
    }
    fn show_error(&self, message: &str) {
        notify(self.show_error.as_ref(), message, web_sys::console::warn_1);
    }
    fn show_success(&self, message: &str) {
        notify(self.show_success.as_ref(), message, web_sys::console::log_1);
    }
}
