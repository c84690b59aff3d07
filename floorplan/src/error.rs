use thiserror::Error;

/// Errors surfaced at the editor's API boundary. Geometry helpers never fail;
/// they return neutral results instead.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid {kind} id {id}")]
    InvalidId { kind: &'static str, id: u32 },

    #[error("parameter '{0}' must be finite")]
    NonFinite(&'static str),

    #[error("parameter '{param}' out of range [{min}, {max}], got {got}")]
    OutOfRange { param: &'static str, min: f64, max: f64, got: f64 },

    #[error("wall {0} would be degenerate (zero length or non-positive thickness)")]
    DegenerateWall(u32),

    #[error("{what} exceeds limit of {limit}")]
    TooLarge { what: &'static str, limit: usize },

    #[error("invalid project json: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlanError {
    /// Stable machine-readable code for host bindings.
    pub fn code(&self) -> &'static str {
        match self {
            PlanError::InvalidId { .. } => "invalid_id",
            PlanError::NonFinite(_) => "non_finite",
            PlanError::OutOfRange { .. } => "out_of_range",
            PlanError::DegenerateWall(_) => "degenerate_wall",
            PlanError::TooLarge { .. } => "too_large",
            PlanError::Json(_) => "invalid_json",
        }
    }
}

pub(crate) fn ensure_finite(name: &'static str, v: f64) -> Result<(), PlanError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(PlanError::NonFinite(name))
    }
}
