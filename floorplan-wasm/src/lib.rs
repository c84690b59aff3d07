use wasm_bindgen::prelude::*;
mod api;
mod error;
mod host;
mod interop;

pub use host::JsHost;

#[wasm_bindgen]
pub struct FloorPlan { pub(crate) inner: floorplan::Editor<JsHost> }

impl FloorPlan {
    pub fn rs_new() -> FloorPlan { FloorPlan { inner: floorplan::Editor::new(JsHost::default()) } }
    pub fn rs_with_config(config: floorplan::EditorConfig) -> FloorPlan {
        FloorPlan { inner: floorplan::Editor::with_config(JsHost::default(), config) }
    }
    pub fn rs_geom_version(&self) -> u64 { self.inner.plan().geom_version() }
}
