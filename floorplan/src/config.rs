use serde::{Deserialize, Serialize};

use crate::geometry::tolerance::{
    DEFAULT_WALL_HEIGHT_MM, DEFAULT_WALL_THICKNESS_MM, EDGE_BOUNDARY_BAND, MIN_ROOM_AREA_M2,
    ROOM_TRACE_STEPS,
};

/// Runtime tunables for one editor session. Every field has a default, so a
/// host may supply a partial JSON object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Snap radius in screen pixels; divided by the view scale before use.
    pub snap_distance_px: f64,
    /// Radial distance of angle labels from their corner (world units).
    pub angle_label_radius: f64,
    /// Radius of the arc drawn for angle markers (world units).
    pub angle_marker_radius: f64,
    pub room_trace_steps: usize,
    pub min_room_area_m2: f64,
    pub edge_boundary_band: f64,
    /// Corner grab radius in screen pixels.
    pub handle_radius_px: f64,
    /// Extra wall hit slack in screen pixels beyond half the thickness.
    pub wall_hit_px: f64,
    /// Padding used by fit-to-content, screen pixels.
    pub fit_padding_px: f64,
    /// Fallbacks when the host reports a non-positive thickness/height (mm).
    pub default_wall_thickness_mm: f64,
    pub default_wall_height_mm: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            snap_distance_px: 20.0,
            angle_label_radius: 25.0,
            angle_marker_radius: 20.0,
            room_trace_steps: ROOM_TRACE_STEPS,
            min_room_area_m2: MIN_ROOM_AREA_M2,
            edge_boundary_band: EDGE_BOUNDARY_BAND,
            handle_radius_px: 8.0,
            wall_hit_px: 6.0,
            fit_padding_px: 40.0,
            default_wall_thickness_mm: DEFAULT_WALL_THICKNESS_MM,
            default_wall_height_mm: DEFAULT_WALL_HEIGHT_MM,
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(s: &str) -> Result<Self, crate::error::PlanError> {
        Ok(serde_json::from_str(s)?)
    }

    pub(crate) fn room_settings(&self) -> crate::algorithms::rooms::RoomSettings {
        crate::algorithms::rooms::RoomSettings {
            max_steps: self.room_trace_steps,
            min_area_m2: self.min_room_area_m2,
        }
    }
}
