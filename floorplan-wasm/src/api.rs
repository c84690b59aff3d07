use crate::FloorPlan;
use floorplan::algorithms::split::SplitResult;
use floorplan::model::Unit;
use floorplan::{EditorConfig, PointerEvent, Tool};
use js_sys::{Float64Array, Function};
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;
use crate::error;
use crate::interop::{new_obj, points_from_flat, points_to_flat, set_kv, to_js};

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn pointer(ev: JsValue) -> Option<PointerEvent> {
    serde_wasm_bindgen::from_value(ev).ok()
}

#[wasm_bindgen]
impl FloorPlan {
    #[wasm_bindgen(constructor)]
    pub fn new() -> FloorPlan {
        crate::FloorPlan::rs_new()
    }
    /// Editor with tunables from a partial config object.
    pub fn with_config_res(config: JsValue) -> JsValue {
        match serde_wasm_bindgen::from_value::<EditorConfig>(config) {
            Ok(c) => error::ok(crate::FloorPlan::rs_with_config(c).into()),
            Err(e) => error::err("invalid_config", format!("{}", e), None),
        }
    }
    pub fn geom_version(&self) -> u64 {
        self.rs_geom_version()
    }

    // Host wiring
    pub fn set_host(&mut self, wall_thickness: Option<Function>, wall_height: Option<Function>) {
        let h = self.inner.host_mut();
        h.wall_thickness = wall_thickness;
        h.wall_height = wall_height;
    }
    pub fn set_notifier(&mut self, show_error: Option<Function>, show_success: Option<Function>) {
        let h = self.inner.host_mut();
        h.show_error = show_error;
        h.show_success = show_success;
    }
    pub fn set_viewport(&mut self, left: f64, top: f64, width: f64, height: f64) {
        self.inner.set_viewport(left, top, width, height);
    }

    // Tools + pointer pipeline
    pub fn set_tool(&mut self, tool: JsValue) -> bool {
        match serde_wasm_bindgen::from_value::<Tool>(tool) {
            Ok(t) => {
                self.inner.set_tool(t);
                true
            }
            Err(_) => false,
        }
    }
    pub fn set_tool_res(&mut self, tool: JsValue) -> JsValue {
        match serde_wasm_bindgen::from_value::<Tool>(tool) {
            Ok(t) => {
                self.inner.set_tool(t);
                error::ok(JsValue::TRUE)
            }
            Err(e) => error::err("invalid_tool", format!("{}", e), None),
        }
    }
    pub fn tool(&self) -> JsValue {
        to_js(&self.inner.tool())
    }
    pub fn pointer_down(&mut self, ev: JsValue) -> bool {
        pointer(ev).map_or(false, |e| self.inner.pointer_down(&e))
    }
    pub fn pointer_move(&mut self, ev: JsValue) -> bool {
        pointer(ev).map_or(false, |e| self.inner.pointer_move(&e))
    }
    pub fn pointer_up(&mut self, ev: JsValue) -> bool {
        pointer(ev).map_or(false, |e| self.inner.pointer_up(&e))
    }
    pub fn wheel(&mut self, delta_y: f64, client_x: f64, client_y: f64) -> f64 {
        self.inner.wheel(delta_y, client_x, client_y)
    }
    pub fn cancel(&mut self) {
        self.inner.cancel();
    }
    pub fn cursor(&self) -> Float64Array {
        points_to_flat(&[self.inner.cursor()])
    }
    pub fn draw_start(&self) -> JsValue {
        match self.inner.draw_start() {
            Some(p) => points_to_flat(&[p]).into(),
            None => JsValue::NULL,
        }
    }
    pub fn is_dragging(&self) -> bool {
        self.inner.is_dragging()
    }
    pub fn fixture_preview(&self) -> JsValue {
        self.inner.preview().map_or(JsValue::NULL, to_js)
    }

    // Split menu
    pub fn split_menu(&self) -> JsValue {
        self.inner.split_menu().map_or(JsValue::NULL, to_js)
    }
    pub fn dismiss_split_menu(&mut self) {
        self.inner.dismiss_split_menu();
    }
    pub fn split_at_menu_res(&mut self) -> JsValue {
        if self.inner.split_menu().is_none() {
            return error::err("no_split_menu", "no split menu is open", None);
        }
        let obj = new_obj();
        match self.inner.split_at_menu() {
            Some(SplitResult::Corner(id)) => {
                set_kv(&obj, "kind", &JsValue::from_str("corner"));
                set_kv(&obj, "corner", &JsValue::from_f64(id as f64));
            }
            Some(SplitResult::Walls(wall, rest)) => {
                set_kv(&obj, "kind", &JsValue::from_str("walls"));
                set_kv(&obj, "wall", &JsValue::from_f64(wall as f64));
                set_kv(&obj, "newWall", &JsValue::from_f64(rest as f64));
            }
            None => return error::err("split_refused", "the wall cannot be split at this point", None),
        }
        error::ok(obj.into())
    }

    // Outline
    pub fn set_outline(&mut self, points: &Float64Array) -> bool {
        match points_from_flat(points) {
            Some(pts) => {
                self.inner.set_outline(&pts);
                true
            }
            None => false,
        }
    }
    pub fn set_outline_res(&mut self, points: &Float64Array) -> JsValue {
        let Some(pts) = points_from_flat(points) else {
            return error::invalid_points(points.length());
        };
        if pts.iter().any(|p| !p.is_finite()) {
            return error::non_finite("points");
        }
        self.inner.set_outline(&pts);
        error::ok(JsValue::from_f64(self.inner.plan().outline().len() as f64))
    }
    pub fn outline_points(&self) -> Float64Array {
        points_to_flat(&self.inner.plan().outline().points())
    }

    // Walls / rooms / fixtures
    pub fn add_wall_res(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, thickness_mm: f64, height_mm: f64) -> JsValue {
        let start = floorplan::model::Point::new(x0, y0);
        let end = floorplan::model::Point::new(x1, y1);
        match self.inner.plan_mut().add_wall(start, end, thickness_mm, height_mm) {
            Ok(id) => {
                self.inner.refresh_rooms();
                error::ok(JsValue::from_f64(id as f64))
            }
            Err(e) => error::from_plan(&e),
        }
    }
    pub fn remove_wall_res(&mut self, id: u32) -> JsValue {
        match self.inner.remove_wall(id) {
            Ok(()) => error::ok(JsValue::TRUE),
            Err(e) => error::from_plan(&e),
        }
    }
    pub fn get_wall_res(&self, id: u32) -> JsValue {
        match self.inner.plan().get_wall(id) {
            Some(w) => error::ok(to_js(w)),
            None => error::invalid_id("wall", id),
        }
    }
    pub fn wall_count(&self) -> u32 {
        self.inner.plan().wall_count() as u32
    }
    pub fn walls(&self) -> JsValue {
        to_js(&self.inner.plan().walls().collect::<Vec<_>>())
    }
    pub fn rooms(&self) -> JsValue {
        to_js(&self.inner.plan().rooms().collect::<Vec<_>>())
    }
    pub fn refresh_rooms(&mut self) {
        self.inner.refresh_rooms();
    }
    pub fn fixtures(&self) -> JsValue {
        to_js(&self.inner.plan().fixtures().collect::<Vec<_>>())
    }
    pub fn fixture_count(&self) -> u32 {
        self.inner.plan().fixture_count() as u32
    }
    pub fn remove_fixture_res(&mut self, id: u32) -> JsValue {
        match self.inner.remove_fixture(id) {
            Ok(()) => error::ok(JsValue::TRUE),
            Err(e) => error::from_plan(&e),
        }
    }

    // Units
    pub fn unit(&self) -> String {
        self.inner.plan().unit().suffix().to_string()
    }
    pub fn set_unit_res(&mut self, unit: &str) -> JsValue {
        match serde_json::from_value::<Unit>(serde_json::Value::from(unit)) {
            Ok(u) => {
                self.inner.plan_mut().set_unit(u);
                error::ok(JsValue::TRUE)
            }
            Err(_) => error::err("invalid_unit", format!("unknown unit '{}'", unit), None),
        }
    }
    pub fn wall_height(&self) -> f64 {
        self.inner.plan().wall_height()
    }
    pub fn set_wall_height_res(&mut self, mm: f64) -> JsValue {
        match self.inner.plan_mut().set_wall_height(mm) {
            Ok(()) => error::ok(JsValue::TRUE),
            Err(e) => error::from_plan(&e),
        }
    }

    // View
    pub fn view(&self) -> JsValue {
        to_js(self.inner.view())
    }
    pub fn client_to_world(&self, client_x: f64, client_y: f64) -> Float64Array {
        points_to_flat(&[self.inner.client_to_world(client_x, client_y)])
    }
    pub fn fit_to_content(&mut self) -> bool {
        self.inner.fit_to_content()
    }
    pub fn center_content(&mut self) -> bool {
        self.inner.center_content()
    }

    // JSON + SVG
    pub fn to_json(&self) -> JsValue {
        to_js(&self.inner.plan().to_json_value())
    }
    pub fn from_json(&mut self, v: JsValue) -> bool {
        match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(val) => self.inner.import_project_value(val),
            Err(_) => false,
        }
    }
    pub fn from_json_res(&mut self, v: JsValue) -> JsValue {
        match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(val) => match self.inner.load_project_value(val) {
                Ok(()) => error::ok(JsValue::TRUE),
                Err(e) => error::from_plan(&e),
            },
            Err(e) => error::err("json_parse", format!("{}", e), None),
        }
    }
    pub fn load_project_res(&mut self, json: &str) -> JsValue {
        match self.inner.load_project(json) {
            Ok(()) => error::ok(JsValue::TRUE),
            Err(e) => error::from_plan(&e),
        }
    }
    pub fn save_project_res(&self) -> JsValue {
        match self.inner.save_project() {
            Ok(s) => error::ok(JsValue::from_str(&s)),
            Err(e) => error::from_plan(&e),
        }
    }
    pub fn to_svg_paths(&self) -> JsValue {
        to_js(&self.inner.plan().to_svg_paths())
    }
    /// `{paths: [{class, d}], texts: [{class, x, y, rotation, text}]}`
    pub fn render_paths(&self) -> JsValue {
        let (paths, texts) = self.inner.render_paths();
        let obj = new_obj();
        set_kv(&obj, "paths", &to_js(&paths));
        set_kv(&obj, "texts", &to_js(&texts));
        obj.into()
    }
    pub fn render_svg(&self) -> String {
        self.inner.render_svg()
    }
    pub fn clear(&mut self) {
        self.inner.cancel();
        self.inner.plan_mut().clear();
        self.inner.refresh_rooms();
    }
}

impl Default for FloorPlan {
    fn default() -> Self {
        FloorPlan::new()
    }
}
