// Centralized tolerances and unit constants for plan geometry (world unit = cm)

pub const EPS_POS: f64 = 1e-6;            // point coincidence threshold (cm)
pub const EPS_LEN: f64 = 1e-9;            // zero-length vector threshold
pub const EPS_DENOM: f64 = 1e-12;         // denominator guard for projections/intersections

pub const MM_PER_CM: f64 = 10.0;
pub const CM2_PER_M2: f64 = 10_000.0;

// Room noise filter (m^2) and boundary trace budget per start edge
pub const MIN_ROOM_AREA_M2: f64 = 0.1;
pub const ROOM_TRACE_STEPS: usize = 50;

// Fraction of an edge, measured from either end, that counts as "near the boundary"
pub const EDGE_BOUNDARY_BAND: f64 = 0.1;

// New-wall defaults (mm) when the host has nothing usable
pub const DEFAULT_WALL_THICKNESS_MM: f64 = 100.0;
pub const DEFAULT_WALL_HEIGHT_MM: f64 = 2700.0;

#[inline] pub fn clamp01(x: f64) -> f64 { x.max(0.0).min(1.0) }

/// Wall thickness and height are persisted in millimeters; geometry runs in centimeters.
#[inline] pub fn mm_to_world(mm: f64) -> f64 { mm / MM_PER_CM }

#[inline] pub fn round_to(x: f64, decimals: i32) -> f64 {
    let f = 10f64.powi(decimals);
    (x * f).round() / f
}
