// Ingestion limits to harden project loading against untrusted input (JSON)

// Scene size caps
pub const MAX_WALLS: usize = 50_000;
pub const MAX_ROOMS: usize = 10_000;
pub const MAX_FIXTURES: usize = 50_000;
pub const MAX_ROOM_POINTS: usize = 4_096;

// Ids are arena slots; a sparse id past this would allocate an absurd arena
pub const MAX_ID: u32 = 1_000_000;

// Numeric bounds
pub const COORD_MIN: f64 = -10_000_000.0;
pub const COORD_MAX: f64 = 10_000_000.0;
pub const THICKNESS_MAX_MM: f64 = 10_000.0;
pub const HEIGHT_MAX_MM: f64 = 100_000.0;

#[inline]
pub fn in_coord_bounds(x: f64) -> bool { x.is_finite() && (COORD_MIN..=COORD_MAX).contains(&x) }

#[inline]
pub fn in_thickness_bounds(mm: f64) -> bool { mm.is_finite() && mm > 0.0 && mm <= THICKNESS_MAX_MM }

#[inline]
pub fn in_height_bounds(mm: f64) -> bool { mm.is_finite() && mm > 0.0 && mm <= HEIGHT_MAX_MM }
