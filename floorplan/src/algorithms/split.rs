//! Click-to-split: a press on a wall that is released without any pointer
//! movement opens a split menu at the nearest point of that wall.

use serde::Serialize;
use tracing::debug;

use super::drag::WallTarget;
use crate::model::{CornerId, Point, WallId};
use crate::Plan;

/// Context affordance opened by a click on a wall.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SplitMenu {
    pub target: WallTarget,
    /// Nearest point on the wall to the click, world units.
    pub anchor: Point,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitResult {
    /// New outline corner.
    Corner(CornerId),
    /// The original wall (now ending at the cut) and the new remainder.
    Walls(WallId, WallId),
}

#[derive(Clone, Debug, Default)]
pub struct SplitGesture {
    pressed: Option<WallTarget>,
    was_dragged: bool,
}

impl SplitGesture {
    pub fn press(&mut self, target: WallTarget) {
        self.pressed = Some(target);
        self.was_dragged = false;
    }

    /// Any movement during a press turns the gesture into a drag.
    pub fn moved(&mut self) {
        if self.pressed.is_some() {
            self.was_dragged = true;
        }
    }

    pub fn was_dragged(&self) -> bool {
        self.was_dragged
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed.is_some()
    }

    /// Finish the press. A click without drag yields a menu anchored on the wall.
    pub fn release(&mut self, plan: &Plan, cursor: Point) -> Option<SplitMenu> {
        let target = self.pressed.take()?;
        let dragged = std::mem::take(&mut self.was_dragged);
        if dragged {
            return None;
        }
        let anchor = nearest_point_on_target(plan, target, cursor)?;
        debug!(?target, x = anchor.x, y = anchor.y, "split menu opened");
        Some(SplitMenu { target, anchor })
    }

    pub fn cancel(&mut self) {
        self.pressed = None;
        self.was_dragged = false;
    }
}

pub fn nearest_point_on_target(plan: &Plan, target: WallTarget, cursor: Point) -> Option<Point> {
    match target {
        WallTarget::Wall { .. } => {
            let (a, b) = plan.target_endpoints(target)?;
            Some(crate::geometry::math::closest_point_on_segment(cursor, a, b).0)
        }
        WallTarget::Segment { .. } => {
            let index = segment_index(plan, target)?;
            plan.outline.closest_point_on_segment(index, cursor)
        }
    }
}

/// Loop position of an outline segment, if its corners are still adjacent.
pub(crate) fn segment_index(plan: &Plan, target: WallTarget) -> Option<usize> {
    match target {
        WallTarget::Segment { start, end } => plan.outline_segment_index(start, end),
        WallTarget::Wall { .. } => None,
    }
}

/// Perform the split the menu was opened for.
pub fn apply_split(plan: &mut Plan, menu: &SplitMenu) -> Option<SplitResult> {
    match menu.target {
        WallTarget::Wall { id } => plan.split_wall(id, menu.anchor).map(|(a, b)| SplitResult::Walls(a, b)),
        WallTarget::Segment { .. } => {
            let index = segment_index(plan, menu.target)?;
            plan.split_outline_segment(index, menu.anchor).map(SplitResult::Corner)
        }
    }
}
