use serde::Serialize;
use tracing::{debug, warn};

use crate::model::{CornerId, Point, WallId};
use crate::Plan;

/// Axis along which a dragged wall is allowed to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// Something that can be grabbed as a wall: a persisted wall, or an outline
/// segment named by its bounding corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WallTarget {
    Wall { id: WallId },
    Segment { start: CornerId, end: CornerId },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum DragState {
    #[default]
    Idle,
    DraggingCorner { corner: CornerId, grab: Point, origin: Point },
    DraggingWall { target: WallTarget, axis: Axis, grab: Point, start: Point, end: Point },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragUpdate {
    /// No gesture in progress.
    Idle,
    Moved,
    /// Target vanished; the gesture was dropped without touching the plan.
    Aborted,
}

/// A wall whose dominant direction is horizontal moves vertically, and vice versa.
pub fn move_axis(start: Point, end: Point) -> Axis {
    let d = end - start;
    if d.x.abs() > d.y.abs() {
        Axis::Y
    } else {
        Axis::X
    }
}

/// Snap `p` to the closer of the two positions that make right angles with
/// both neighbours: `(next.x, prev.y)` and `(prev.x, next.y)`.
pub fn ortho_snap(p: Point, prev: Point, next: Point) -> Point {
    let a = Point::new(next.x, prev.y);
    let b = Point::new(prev.x, next.y);
    if p.distance(a) <= p.distance(b) {
        a
    } else {
        b
    }
}

fn shift_on_axis(p: Point, axis: Axis, delta: Point) -> Point {
    match axis {
        Axis::X => Point::new(p.x + delta.x, p.y),
        Axis::Y => Point::new(p.x, p.y + delta.y),
    }
}

#[derive(Clone, Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        DragController::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != DragState::Idle
    }

    /// Grab an outline corner at world point `grab`.
    pub fn begin_corner(&mut self, plan: &Plan, corner: CornerId, grab: Point) -> bool {
        let Some(origin) = plan.outline.get(corner) else {
            return false;
        };
        self.state = DragState::DraggingCorner { corner, grab, origin };
        debug!(corner, "corner drag started");
        true
    }

    /// Grab a wall at world point `grab`; the move axis is fixed for the gesture.
    pub fn begin_wall(&mut self, plan: &Plan, target: WallTarget, grab: Point) -> bool {
        let Some((start, end)) = plan.target_endpoints(target) else {
            return false;
        };
        let axis = move_axis(start, end);
        self.state = DragState::DraggingWall { target, axis, grab, start, end };
        debug!(?target, ?axis, "wall drag started");
        true
    }

    /// Apply the cursor position to the active gesture. `ortho` is the
    /// right-angle modifier for corner drags.
    pub fn update(&mut self, plan: &mut Plan, cursor: Point, ortho: bool) -> DragUpdate {
        if !cursor.is_finite() {
            return DragUpdate::Idle;
        }
        match self.state {
            DragState::Idle => DragUpdate::Idle,
            DragState::DraggingCorner { corner, grab, origin } => {
                let mut p = origin + (cursor - grab);
                if ortho {
                    if let Some((prev, next)) = plan.outline.neighbors(corner) {
                        p = ortho_snap(p, prev, next);
                    }
                }
                if !plan.move_outline_corner(corner, p) {
                    return self.abort("corner");
                }
                DragUpdate::Moved
            }
            DragState::DraggingWall { target, axis, grab, start, end } => {
                let delta = cursor - grab;
                let ns = shift_on_axis(start, axis, delta);
                let ne = shift_on_axis(end, axis, delta);
                let ok = match target {
                    WallTarget::Wall { id } => plan.move_wall(id, ns, ne),
                    WallTarget::Segment { start: a, end: b } => {
                        plan.outline.get(a).is_some()
                            && plan.outline.get(b).is_some()
                            && plan.move_outline_corner(a, ns)
                            && plan.move_outline_corner(b, ne)
                    }
                };
                if !ok {
                    return self.abort("wall");
                }
                DragUpdate::Moved
            }
        }
    }

    /// End the gesture. Returns whether one was in progress.
    pub fn end(&mut self) -> bool {
        let was = self.is_active();
        self.state = DragState::Idle;
        was
    }

    fn abort(&mut self, what: &str) -> DragUpdate {
        warn!(state = ?self.state, "{what} drag target no longer exists; gesture dropped");
        self.state = DragState::Idle;
        DragUpdate::Aborted
    }
}
