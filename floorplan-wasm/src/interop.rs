use floorplan::model::Point;
use js_sys::{Float64Array, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::JsValue;

pub fn new_obj() -> Object { Object::new() }
pub fn set_kv(obj: &Object, k: &str, v: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(k), v);
}
pub fn arr_f64(slice: &[f64]) -> Float64Array {
    let arr = Float64Array::new_with_length(slice.len() as u32);
    arr.copy_from(slice); arr
}

/// Flat `[x0, y0, x1, y1, ...]` to points; `None` on an odd length.
pub fn points_from_flat(arr: &Float64Array) -> Option<Vec<Point>> {
    let flat = arr.to_vec();
    if flat.len() % 2 != 0 { return None; }
    Some(flat.chunks_exact(2).map(|c| Point::new(c[0], c[1])).collect())
}

pub fn points_to_flat(points: &[Point]) -> Float64Array {
    let flat: Vec<f64> = points.iter().flat_map(|p| [p.x, p.y]).collect();
    arr_f64(&flat)
}

// Plain objects rather than Maps so hosts can JSON.stringify the result.
pub fn to_js<T: Serialize + ?Sized>(v: &T) -> JsValue {
    v.serialize(&serde_wasm_bindgen::Serializer::json_compatible()).unwrap_or(JsValue::NULL)
}
