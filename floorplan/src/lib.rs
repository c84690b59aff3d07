pub mod config;
pub mod editor;
pub mod error;
pub mod host;
pub mod model;
pub mod topology;
pub mod view;
pub mod geometry {
    pub mod limits;
    pub mod math;
    pub mod polygon;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod drag;
    pub mod rooms;
    pub mod snapping;
    pub mod split;
}
mod json;
mod svg;

pub use config::EditorConfig;
pub use editor::{Editor, PointerEvent, Tool};
pub use error::PlanError;
pub use host::{HostServices, LogHost};
pub use svg::{RenderOptions, SvgPath, SvgText};

use algorithms::drag::WallTarget;
use algorithms::rooms::{detect_room, RoomSettings};
use algorithms::snapping::{find_nearest_endpoint, find_nearest_snap_point, find_nearest_snap_point_with_band};
use error::ensure_finite;
use geometry::limits;
use geometry::math::{closest_point_on_segment, dist_point_to_seg};
use geometry::tolerance::{mm_to_world, DEFAULT_WALL_HEIGHT_MM, EPS_POS};
use model::{
    CornerId, Fixture, FixtureId, FixtureKind, Point, Room, RoomId, SnapPoint, Unit, Wall,
    WallId, ROOM_COLORS,
};
use topology::CornerLoop;
use tracing::{debug, warn};

/// The document being edited: persisted walls, detected rooms, placed
/// fixtures and the outline polygon whose segments generate walls.
#[derive(Clone, Debug)]
pub struct Plan {
    pub(crate) walls: Vec<Option<Wall>>,       // id is index
    pub(crate) rooms: Vec<Option<Room>>,       // id is index
    pub(crate) fixtures: Vec<Option<Fixture>>, // id is index
    pub(crate) outline: CornerLoop,
    // (segment start corner, segment end corner, generated wall)
    pub(crate) outline_walls: Vec<(CornerId, CornerId, WallId)>,
    pub(crate) outline_thickness_mm: f64,
    pub(crate) outline_height_mm: f64,
    pub(crate) unit: Unit,
    // project default wall height, mm
    pub(crate) wall_height: f64,
    pub(crate) geom_ver: u64,
}

impl Default for Plan {
    fn default() -> Self {
        Plan::new()
    }
}

impl Plan {
    pub fn new() -> Self {
        Plan {
            walls: Vec::new(),
            rooms: Vec::new(),
            fixtures: Vec::new(),
            outline: CornerLoop::new(),
            outline_walls: Vec::new(),
            outline_thickness_mm: 0.0,
            outline_height_mm: 0.0,
            unit: Unit::Cm,
            wall_height: DEFAULT_WALL_HEIGHT_MM,
            geom_ver: 1,
        }
    }

    /// Bumped on every geometry change; hosts use it to skip redundant redraws.
    pub fn geom_version(&self) -> u64 {
        self.geom_ver
    }

    fn bump(&mut self) {
        self.geom_ver = self.geom_ver.wrapping_add(1);
    }

    pub fn clear(&mut self) {
        self.walls.clear();
        self.rooms.clear();
        self.fixtures.clear();
        self.outline.clear();
        self.outline_walls.clear();
        self.bump();
    }

    // Walls
    pub fn add_wall(&mut self, start: Point, end: Point, thickness_mm: f64, height_mm: f64) -> Result<WallId, PlanError> {
        check_point("start", start)?;
        check_point("end", end)?;
        ensure_finite("thickness", thickness_mm)?;
        ensure_finite("height", height_mm)?;
        if !limits::in_thickness_bounds(thickness_mm) {
            return Err(PlanError::OutOfRange {
                param: "thickness",
                min: 0.0,
                max: limits::THICKNESS_MAX_MM,
                got: thickness_mm,
            });
        }
        if !limits::in_height_bounds(height_mm) {
            return Err(PlanError::OutOfRange { param: "height", min: 0.0, max: limits::HEIGHT_MAX_MM, got: height_mm });
        }
        if self.wall_count() >= limits::MAX_WALLS {
            return Err(PlanError::TooLarge { what: "walls", limit: limits::MAX_WALLS });
        }
        let id = self.walls.len() as WallId;
        if start.coincident(end) {
            return Err(PlanError::DegenerateWall(id));
        }
        self.walls.push(Some(Wall { id, start, end, thickness: thickness_mm, height: height_mm }));
        self.bump();
        Ok(id)
    }

    pub fn get_wall(&self, id: WallId) -> Option<&Wall> {
        self.walls.get(id as usize).and_then(|w| w.as_ref())
    }

    /// Replace both endpoints. Refuses non-finite or coincident endpoints.
    pub fn move_wall(&mut self, id: WallId, start: Point, end: Point) -> bool {
        if !start.is_finite() || !end.is_finite() || start.coincident(end) {
            return false;
        }
        match self.walls.get_mut(id as usize) {
            Some(Some(w)) => {
                w.start = start;
                w.end = end;
            }
            _ => return false,
        }
        self.bump();
        true
    }

    /// Remove a wall; fixtures mounted on it stay in place, unattached.
    pub fn remove_wall(&mut self, id: WallId) -> bool {
        if !self.drop_wall(id) {
            return false;
        }
        self.outline_walls.retain(|(_, _, w)| *w != id);
        self.bump();
        true
    }

    /// Empty the slot of wall `id` and detach fixtures mounted on it.
    fn drop_wall(&mut self, id: WallId) -> bool {
        if self.walls.get_mut(id as usize).and_then(Option::take).is_none() {
            return false;
        }
        for f in self.fixtures.iter_mut().flatten() {
            if f.wall == Some(id) {
                f.wall = None;
            }
        }
        true
    }

    /// Re-point fixtures on `from` whose projection onto `a..b` lies past `t`.
    fn move_fixtures_past(&mut self, from: WallId, to: WallId, a: Point, b: Point, t: f64) {
        for f in self.fixtures.iter_mut().flatten() {
            if f.wall == Some(from) && closest_point_on_segment(f.position, a, b).1 > t {
                f.wall = Some(to);
            }
        }
    }

    pub fn walls(&self) -> impl Iterator<Item = &Wall> {
        self.walls.iter().flatten()
    }

    pub fn wall_count(&self) -> usize {
        self.walls().count()
    }

    /// Whether the wall is generated from the outline rather than drawn.
    pub fn is_outline_wall(&self, id: WallId) -> bool {
        self.outline_walls.iter().any(|(_, _, w)| *w == id)
    }

    /// Cut wall `id` at the projection of `cursor`. The original wall keeps its
    /// id and ends at the cut; the remainder becomes a new wall. Refused when
    /// the cut would leave a zero-length piece or the wall belongs to the outline.
    pub fn split_wall(&mut self, id: WallId, cursor: Point) -> Option<(WallId, WallId)> {
        if !cursor.is_finite() || self.is_outline_wall(id) || self.wall_count() >= limits::MAX_WALLS {
            return None;
        }
        let w = self.get_wall(id)?.clone();
        let (p, t) = closest_point_on_segment(cursor, w.start, w.end);
        if p.coincident(w.start) || p.coincident(w.end) {
            debug!(wall = id, "split refused at wall endpoint");
            return None;
        }
        let new_id = self.walls.len() as WallId;
        self.walls.push(Some(Wall { id: new_id, start: p, end: w.end, thickness: w.thickness, height: w.height }));
        if let Some(Some(orig)) = self.walls.get_mut(id as usize) {
            orig.end = p;
        }
        // fixtures past the cut follow the remainder
        self.move_fixtures_past(id, new_id, w.start, w.end, t);
        self.bump();
        debug!(wall = id, new_wall = new_id, x = p.x, y = p.y, "wall split");
        Some((id, new_id))
    }

    /// Nearest drawn (non-outline) wall whose body, widened by `slack`, contains `p`.
    pub fn hit_wall(&self, p: Point, slack: f64) -> Option<WallId> {
        let mut best: Option<(WallId, f64)> = None;
        for w in self.walls() {
            if self.is_outline_wall(w.id) {
                continue;
            }
            let d = dist_point_to_seg(p, w.start, w.end);
            if d <= w.thickness_world() * 0.5 + slack && best.map_or(true, |(_, bd)| d < bd) {
                best = Some((w.id, d));
            }
        }
        best.map(|(id, _)| id)
    }

    // Rooms
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter().flatten()
    }

    pub fn get_room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id as usize).and_then(|r| r.as_ref())
    }

    pub fn clear_rooms(&mut self) {
        self.rooms.clear();
    }

    /// Re-run room detection over all walls and replace the stored rooms with
    /// the result. Returns the detected room's id.
    pub fn recompute_rooms(&mut self, settings: RoomSettings) -> Option<RoomId> {
        let walls: Vec<Wall> = self.walls().cloned().collect();
        self.rooms.clear();
        let boundary = detect_room(&walls, settings)?;
        let id = self.rooms.len() as RoomId;
        let color = ROOM_COLORS[id as usize % ROOM_COLORS.len()].to_string();
        self.rooms.push(Some(Room { id, points: boundary.points, area: boundary.area, color }));
        Some(id)
    }

    // Fixtures
    /// Place a fixture centred at `position`; `width` runs along its local x
    /// axis before `rotation` (degrees) is applied.
    pub fn add_fixture(
        &mut self,
        kind: FixtureKind,
        position: Point,
        width: f64,
        depth: f64,
        rotation: f64,
        wall: Option<WallId>,
    ) -> Result<FixtureId, PlanError> {
        check_point("position", position)?;
        ensure_finite("rotation", rotation)?;
        for (name, v) in [("width", width), ("depth", depth)] {
            ensure_finite(name, v)?;
            if v <= 0.0 || v > limits::COORD_MAX {
                return Err(PlanError::OutOfRange { param: name, min: 0.0, max: limits::COORD_MAX, got: v });
            }
        }
        if let Some(w) = wall {
            if self.get_wall(w).is_none() {
                return Err(PlanError::InvalidId { kind: "wall", id: w });
            }
        }
        if self.fixture_count() >= limits::MAX_FIXTURES {
            return Err(PlanError::TooLarge { what: "fixtures", limit: limits::MAX_FIXTURES });
        }
        let id = self.fixtures.len() as FixtureId;
        self.fixtures.push(Some(Fixture { id, kind, position, rotation, width, depth, wall }));
        self.bump();
        Ok(id)
    }

    pub fn get_fixture(&self, id: FixtureId) -> Option<&Fixture> {
        self.fixtures.get(id as usize).and_then(|f| f.as_ref())
    }

    pub fn remove_fixture(&mut self, id: FixtureId) -> bool {
        if self.fixtures.get_mut(id as usize).and_then(Option::take).is_none() {
            return false;
        }
        self.bump();
        true
    }

    pub fn fixtures(&self) -> impl Iterator<Item = &Fixture> {
        self.fixtures.iter().flatten()
    }

    pub fn fixture_count(&self) -> usize {
        self.fixtures().count()
    }

    // Outline
    /// Replace the outline polygon. Its segments generate walls of the given
    /// thickness and height (mm); walls from a previous outline are dropped.
    pub fn set_outline(&mut self, points: &[Point], thickness_mm: f64, height_mm: f64) {
        let kept: Vec<Point> = points.iter().copied().filter(|p| p.is_finite()).collect();
        if kept.len() != points.len() {
            warn!(dropped = points.len() - kept.len(), "non-finite outline corners ignored");
        }
        for (_, _, w) in std::mem::take(&mut self.outline_walls) {
            self.drop_wall(w);
        }
        self.outline = CornerLoop::from_points(&kept);
        self.outline_thickness_mm = thickness_mm;
        self.outline_height_mm = height_mm;
        self.sync_outline_walls();
        self.bump();
    }

    pub fn outline(&self) -> &CornerLoop {
        &self.outline
    }

    /// Outline wall thickness in world units.
    pub fn outline_thickness(&self) -> f64 {
        mm_to_world(self.outline_thickness_mm)
    }

    pub fn move_outline_corner(&mut self, id: CornerId, p: Point) -> bool {
        if !self.outline.move_corner(id, p) {
            return false;
        }
        self.sync_outline_walls();
        self.bump();
        true
    }

    /// Insert a corner on outline segment `index` at the projection of `cursor`.
    /// Fixtures mounted past the cut move to the wall of the second half.
    pub fn split_outline_segment(&mut self, index: usize, cursor: Point) -> Option<CornerId> {
        if !cursor.is_finite() {
            return None;
        }
        let (sc, ec) = self.outline.segment_corners(index)?;
        let (a, b) = (self.outline.get(sc)?, self.outline.get(ec)?);
        let wall = self.outline_walls.iter().find(|(s, e, _)| *s == sc && *e == ec).map(|(_, _, w)| *w);
        let id = self.outline.split(index, cursor)?;
        self.sync_outline_walls();
        let rest = self.outline_walls.iter().find(|(s, e, _)| *s == id && *e == ec).map(|(_, _, w)| *w);
        if let (Some(wall), Some(rest)) = (wall, rest) {
            let t = closest_point_on_segment(cursor, a, b).1;
            self.move_fixtures_past(wall, rest, a, b, t);
        }
        self.bump();
        debug!(segment = index, corner = id, "outline segment split");
        Some(id)
    }

    /// Loop position of the segment running from corner `start` to `end`.
    pub fn outline_segment_index(&self, start: CornerId, end: CornerId) -> Option<usize> {
        let ids = self.outline.ids();
        let pos = self.outline.position_of(start)?;
        (ids.get((pos + 1) % ids.len()) == Some(&end)).then_some(pos)
    }

    /// Outline segment under `p` within half the wall thickness plus `slack`.
    pub fn hit_outline_segment(&self, p: Point, slack: f64) -> Option<WallTarget> {
        let (index, d) = self.outline.nearest_segment(p)?;
        if d > self.outline_thickness() * 0.5 + slack {
            return None;
        }
        let (start, end) = self.outline.segment_corners(index)?;
        Some(WallTarget::Segment { start, end })
    }

    /// Rewrite the generated walls from the current outline. A segment keeps
    /// its wall when its corner pair is unchanged, else inherits the wall of
    /// the segment that started at the same corner (the first half of a split).
    fn sync_outline_walls(&mut self) {
        let segs = self.outline.segments(self.outline_thickness());
        let mut old = std::mem::take(&mut self.outline_walls);
        let mut assigned: Vec<Option<WallId>> = vec![None; segs.len()];
        for (slot, s) in assigned.iter_mut().zip(&segs) {
            if let Some(pos) = old.iter().position(|(a, b, _)| *a == s.start_corner && *b == s.end_corner) {
                *slot = Some(old.swap_remove(pos).2);
            }
        }
        for (slot, s) in assigned.iter_mut().zip(&segs) {
            if slot.is_none() {
                if let Some(pos) = old.iter().position(|(a, _, _)| *a == s.start_corner) {
                    *slot = Some(old.swap_remove(pos).2);
                }
            }
        }
        for (_, _, w) in old {
            self.drop_wall(w);
        }
        let mut next = Vec::with_capacity(segs.len());
        for (s, reuse) in segs.iter().zip(assigned) {
            let live = reuse.filter(|id| self.get_wall(*id).is_some());
            if s.length <= EPS_POS {
                if let Some(id) = live {
                    self.drop_wall(id);
                }
                continue;
            }
            let id = live.unwrap_or(self.walls.len() as WallId);
            let wall = Wall {
                id,
                start: s.start,
                end: s.end,
                thickness: self.outline_thickness_mm,
                height: self.outline_height_mm,
            };
            match live {
                Some(id) => self.walls[id as usize] = Some(wall),
                None => self.walls.push(Some(wall)),
            }
            next.push((s.start_corner, s.end_corner, id));
        }
        self.outline_walls = next;
    }

    /// Current endpoints of a drag target, `None` once it no longer exists.
    pub fn target_endpoints(&self, target: WallTarget) -> Option<(Point, Point)> {
        match target {
            WallTarget::Wall { id } => self.get_wall(id).map(|w| (w.start, w.end)),
            WallTarget::Segment { start, end } => {
                self.outline_segment_index(start, end)?;
                Some((self.outline.get(start)?, self.outline.get(end)?))
            }
        }
    }

    // Snapping
    pub fn snap(&self, cursor: Point, snap_distance: f64) -> Option<SnapPoint> {
        find_nearest_snap_point(cursor, self.walls(), snap_distance)
    }

    pub fn snap_endpoint(&self, cursor: Point, snap_distance: f64) -> Option<SnapPoint> {
        find_nearest_endpoint(cursor, self.walls(), snap_distance)
    }

    pub fn snap_with_band(&self, cursor: Point, snap_distance: f64, band: f64) -> Option<SnapPoint> {
        find_nearest_snap_point_with_band(cursor, self.walls(), snap_distance, band)
    }

    /// Every point that contributes to the drawing's extent.
    pub fn all_points(&self) -> Vec<Point> {
        let mut pts: Vec<Point> = Vec::new();
        for w in self.walls() {
            pts.push(w.start);
            pts.push(w.end);
        }
        pts.extend(self.outline.points());
        for r in self.rooms() {
            pts.extend(r.points.iter().copied());
        }
        pts.extend(self.fixtures().map(|f| f.position));
        pts
    }

    // Units
    pub fn unit(&self) -> Unit {
        self.unit
    }
    pub fn set_unit(&mut self, unit: Unit) {
        self.unit = unit;
    }
    pub fn wall_height(&self) -> f64 {
        self.wall_height
    }
    pub fn set_wall_height(&mut self, mm: f64) -> Result<(), PlanError> {
        ensure_finite("wallHeight", mm)?;
        if !limits::in_height_bounds(mm) {
            return Err(PlanError::OutOfRange { param: "wallHeight", min: 0.0, max: limits::HEIGHT_MAX_MM, got: mm });
        }
        self.wall_height = mm;
        Ok(())
    }

    // JSON
    pub fn to_json_value(&self) -> serde_json::Value {
        json::to_json_impl(self)
    }
    /// Lenient load: invalid entries are skipped; `false` when the document
    /// is unreadable or over the size caps.
    pub fn from_json_value(&mut self, v: serde_json::Value) -> bool {
        json::from_json_impl(self, v)
    }
    /// Strict load: any invalid entry rejects the document and leaves the plan untouched.
    pub fn from_json_value_strict(&mut self, v: serde_json::Value) -> Result<(), PlanError> {
        json::from_json_impl_strict(self, v)
    }

    // SVG
    /// Wall bodies as closed SVG path strings.
    pub fn to_svg_paths(&self) -> Vec<String> {
        svg::to_svg_paths_impl(self)
    }
    pub fn render_paths(&self, opts: &RenderOptions) -> (Vec<SvgPath>, Vec<SvgText>) {
        svg::render_impl(self, opts)
    }
    pub fn to_svg_document(&self, opts: &RenderOptions) -> String {
        svg::to_svg_document_impl(self, opts)
    }
}

fn check_point(name: &'static str, p: Point) -> Result<(), PlanError> {
    ensure_finite(name, p.x)?;
    ensure_finite(name, p.y)?;
    for v in [p.x, p.y] {
        if !limits::in_coord_bounds(v) {
            return Err(PlanError::OutOfRange { param: name, min: limits::COORD_MIN, max: limits::COORD_MAX, got: v });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> [Point; 4] {
        [Point::new(0.0, 0.0), Point::new(300.0, 0.0), Point::new(300.0, 200.0), Point::new(0.0, 200.0)]
    }

    #[test]
    fn add_wall_validates() {
        let mut p = Plan::new();
        let a = Point::new(0.0, 0.0);
        assert_eq!(p.add_wall(a, a, 100.0, 2500.0).unwrap_err().code(), "degenerate_wall");
        assert_eq!(p.add_wall(a, Point::new(f64::NAN, 0.0), 100.0, 2500.0).unwrap_err().code(), "non_finite");
        assert_eq!(p.add_wall(a, Point::new(1.0, 0.0), 0.0, 2500.0).unwrap_err().code(), "out_of_range");
        assert_eq!(p.wall_count(), 0);
        let v = p.geom_version();
        assert_eq!(p.add_wall(a, Point::new(1.0, 0.0), 100.0, 2500.0).unwrap(), 0);
        assert!(p.geom_version() > v);
    }

    #[test]
    fn outline_generates_and_tracks_walls() {
        let mut p = Plan::new();
        p.set_outline(&square(), 100.0, 2500.0);
        assert_eq!(p.wall_count(), 4);
        let ids: Vec<WallId> = p.walls().map(|w| w.id).collect();
        let c = p.outline().ids()[2];
        assert!(p.move_outline_corner(c, Point::new(320.0, 220.0)));
        // same walls, new geometry
        assert_eq!(p.walls().map(|w| w.id).collect::<Vec<_>>(), ids);
        assert!(p.walls().any(|w| w.end == Point::new(320.0, 220.0)));
        assert!(p.walls().all(|w| p.is_outline_wall(w.id)));
        // replacing the outline drops the old walls
        p.set_outline(&square()[..3], 100.0, 2500.0);
        assert_eq!(p.wall_count(), 3);
    }

    #[test]
    fn outline_split_keeps_first_half_wall() {
        let mut p = Plan::new();
        p.set_outline(&square(), 100.0, 2500.0);
        let first = p.outline_walls[0].2;
        let c = p.split_outline_segment(0, Point::new(100.0, 5.0)).unwrap();
        assert_eq!(p.outline().get(c), Some(Point::new(100.0, 0.0)));
        assert_eq!(p.get_wall(first).unwrap().end, Point::new(100.0, 0.0));
        assert_eq!(p.wall_count(), 5);
    }

    #[test]
    fn rooms_follow_walls() {
        let mut p = Plan::new();
        p.set_outline(&square(), 100.0, 2500.0);
        let id = p.recompute_rooms(RoomSettings::default()).unwrap();
        let room = p.get_room(id).unwrap();
        assert_eq!(room.area, 6.0);
        assert_eq!(room.color, ROOM_COLORS[0]);
        let w = p.walls().next().map(|w| w.id).unwrap();
        p.remove_wall(w);
        assert!(p.recompute_rooms(RoomSettings::default()).is_none());
        assert_eq!(p.rooms().count(), 0);
    }

    #[test]
    fn removing_wall_detaches_fixtures() {
        let mut p = Plan::new();
        let w = p.add_wall(Point::new(0.0, 0.0), Point::new(200.0, 0.0), 100.0, 2500.0).unwrap();
        let f = p.add_fixture(FixtureKind::Door, Point::new(50.0, 10.0), 90.0, 10.0, 0.0, Some(w)).unwrap();
        let err = p.add_fixture(FixtureKind::Lamp, Point::ZERO, 30.0, 30.0, 0.0, Some(99)).unwrap_err();
        assert_eq!(err.code(), "invalid_id");
        assert_eq!(p.add_fixture(FixtureKind::Lamp, Point::ZERO, -1.0, 30.0, 0.0, None).unwrap_err().code(), "out_of_range");
        assert!(p.remove_wall(w));
        assert!(!p.remove_wall(w));
        assert_eq!(p.get_fixture(f).unwrap().wall, None);
    }

    #[test]
    fn split_moves_far_fixtures_to_remainder() {
        let mut p = Plan::new();
        let w = p.add_wall(Point::new(0.0, 0.0), Point::new(400.0, 0.0), 100.0, 2500.0).unwrap();
        let near = p.add_fixture(FixtureKind::Socket, Point::new(50.0, 9.0), 8.0, 8.0, 0.0, Some(w)).unwrap();
        let far = p.add_fixture(FixtureKind::Socket, Point::new(350.0, 9.0), 8.0, 8.0, 0.0, Some(w)).unwrap();
        let (_, rest) = p.split_wall(w, Point::new(200.0, 30.0)).unwrap();
        assert_eq!(p.get_fixture(near).unwrap().wall, Some(w));
        assert_eq!(p.get_fixture(far).unwrap().wall, Some(rest));
    }

    #[test]
    fn outline_split_moves_far_fixtures_to_second_half() {
        let mut p = Plan::new();
        p.set_outline(&square(), 100.0, 2500.0);
        let first = p.outline_walls[0].2;
        let near = p.add_fixture(FixtureKind::Window, Point::new(50.0, 5.0), 60.0, 10.0, 0.0, Some(first)).unwrap();
        let far = p.add_fixture(FixtureKind::Window, Point::new(250.0, 5.0), 60.0, 10.0, 0.0, Some(first)).unwrap();
        let c = p.split_outline_segment(0, Point::new(100.0, 5.0)).unwrap();
        let rest = p.outline_walls.iter().find(|(s, _, _)| *s == c).map(|(_, _, w)| *w).unwrap();
        assert_ne!(rest, first);
        assert_eq!(p.get_fixture(near).unwrap().wall, Some(first));
        assert_eq!(p.get_fixture(far).unwrap().wall, Some(rest));
    }

    #[test]
    fn replacing_outline_detaches_its_fixtures() {
        let mut p = Plan::new();
        p.set_outline(&square(), 100.0, 2500.0);
        let w = p.outline_walls[1].2;
        let f = p.add_fixture(FixtureKind::Door, Point::new(295.0, 100.0), 90.0, 10.0, 90.0, Some(w)).unwrap();
        p.set_outline(&square()[..3], 100.0, 2500.0);
        assert_eq!(p.get_fixture(f).unwrap().wall, None);
        // a saved plan with a dropped outline still loads strictly
        let mut back = Plan::new();
        assert!(back.from_json_value_strict(p.to_json_value()).is_ok());
        assert_eq!(back.fixture_count(), 1);
        assert_eq!(back.wall_count(), 3);
    }

    #[test]
    fn collapsed_outline_segment_detaches_its_fixtures() {
        let mut p = Plan::new();
        p.set_outline(&square(), 100.0, 2500.0);
        let (c1, c2) = (p.outline().ids()[1], p.outline().ids()[2]);
        let w = p.outline_walls[1].2;
        let f = p.add_fixture(FixtureKind::Socket, Point::new(295.0, 100.0), 8.0, 8.0, 0.0, Some(w)).unwrap();
        let onto = p.outline().get(c1).unwrap();
        assert!(p.move_outline_corner(c2, onto));
        assert!(p.get_wall(w).is_none());
        assert_eq!(p.get_fixture(f).unwrap().wall, None);
    }

    #[test]
    fn hit_tests() {
        let mut p = Plan::new();
        p.set_outline(&square(), 100.0, 2500.0);
        let inner = p.add_wall(Point::new(150.0, 0.0), Point::new(150.0, 200.0), 100.0, 2500.0).unwrap();
        assert_eq!(p.hit_wall(Point::new(157.0, 100.0), 3.0), Some(inner));
        assert_eq!(p.hit_wall(Point::new(160.0, 100.0), 3.0), None);
        // outline walls are hit as segments, never as drawn walls
        assert_eq!(p.hit_wall(Point::new(50.0, 2.0), 3.0), None);
        let ids = p.outline().ids().to_vec();
        assert_eq!(
            p.hit_outline_segment(Point::new(50.0, 2.0), 3.0),
            Some(WallTarget::Segment { start: ids[0], end: ids[1] })
        );
    }
}
