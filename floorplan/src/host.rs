//! Services the embedding application provides to the editor.

use tracing::{info, warn};

use crate::geometry::tolerance::{DEFAULT_WALL_HEIGHT_MM, DEFAULT_WALL_THICKNESS_MM};

/// Host collaborator consumed by the editor: current wall defaults and a
/// notification sink. The editor calls these; it never implements UI.
pub trait HostServices {
    /// Thickness for newly drawn walls, millimeters.
    fn wall_thickness(&self) -> f64;
    /// Height for newly drawn walls, millimeters.
    fn wall_height(&self) -> f64;
    fn show_error(&self, message: &str);
    fn show_success(&self, message: &str);
}

/// Fixed defaults; notifications go to the log.
#[derive(Clone, Debug)]
pub struct LogHost {
    pub thickness_mm: f64,
    pub height_mm: f64,
}

impl Default for LogHost {
    fn default() -> Self {
        LogHost { thickness_mm: DEFAULT_WALL_THICKNESS_MM, height_mm: DEFAULT_WALL_HEIGHT_MM }
    }
}

impl HostServices for LogHost {
    fn wall_thickness(&self) -> f64 {
        self.thickness_mm
    }
    fn wall_height(&self) -> f64 {
        self.height_mm
    }
    fn show_error(&self, message: &str) {
        warn!(target: "floorplan::host", "{message}");
    }
    fn show_success(&self, message: &str) {
        info!(target: "floorplan::host", "{message}");
    }
}
