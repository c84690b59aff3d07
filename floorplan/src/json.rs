use crate::geometry::limits;
use crate::geometry::polygon::calculate_area;
use crate::model::{Fixture, FixtureKind, Point, Room, Unit, Wall, ROOM_COLORS};
use crate::{Plan, PlanError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

pub fn to_json_impl(p: &Plan) -> Value {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Doc<'a> {
        walls: Vec<&'a Wall>,
        rooms: Vec<&'a Room>,
        unit: Unit,
        wall_height: f64,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        fixtures: Vec<&'a Fixture>,
    }
    let doc = Doc {
        walls: p.walls().collect(),
        rooms: p.rooms().collect(),
        unit: p.unit,
        wall_height: p.wall_height,
        fixtures: p.fixtures().collect(),
    };
    match serde_json::to_value(doc) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "project serialization failed");
            Value::Null
        }
    }
}

#[derive(Deserialize)]
struct RoomDe {
    id: u32,
    points: Vec<Point>,
    area: Option<f64>,
    color: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixtureDe {
    id: u32,
    kind: FixtureKind,
    position: Point,
    #[serde(default)]
    rotation: f64,
    width: Option<f64>,
    depth: Option<f64>,
    wall: Option<u32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocDe {
    walls: Vec<Wall>,
    #[serde(default)]
    rooms: Vec<RoomDe>,
    #[serde(default)]
    unit: Unit,
    wall_height: Option<f64>,
    #[serde(default)]
    fixtures: Vec<FixtureDe>,
}

fn out_of_range(param: &'static str, min: f64, max: f64, got: f64) -> PlanError {
    PlanError::OutOfRange { param, min, max, got }
}

fn check_id(kind: &'static str, id: u32) -> Result<(), PlanError> {
    if id > limits::MAX_ID {
        return Err(PlanError::InvalidId { kind, id });
    }
    Ok(())
}

fn check_coords(param: &'static str, p: Point) -> Result<(), PlanError> {
    for v in [p.x, p.y] {
        if !v.is_finite() {
            return Err(PlanError::NonFinite(param));
        }
        if !limits::in_coord_bounds(v) {
            return Err(out_of_range(param, limits::COORD_MIN, limits::COORD_MAX, v));
        }
    }
    Ok(())
}

fn check_wall(w: &Wall) -> Result<(), PlanError> {
    check_id("wall", w.id)?;
    check_coords("wall.start", w.start)?;
    check_coords("wall.end", w.end)?;
    if !limits::in_thickness_bounds(w.thickness) {
        return Err(out_of_range("wall.thickness", 0.0, limits::THICKNESS_MAX_MM, w.thickness));
    }
    if !limits::in_height_bounds(w.height) {
        return Err(out_of_range("wall.height", 0.0, limits::HEIGHT_MAX_MM, w.height));
    }
    if w.start.coincident(w.end) {
        return Err(PlanError::DegenerateWall(w.id));
    }
    Ok(())
}

fn build_room(r: RoomDe) -> Result<Room, PlanError> {
    check_id("room", r.id)?;
    if r.points.len() > limits::MAX_ROOM_POINTS {
        return Err(PlanError::TooLarge { what: "room points", limit: limits::MAX_ROOM_POINTS });
    }
    for p in &r.points {
        check_coords("room.points", *p)?;
    }
    let area = match r.area {
        Some(a) if a.is_finite() && a >= 0.0 => a,
        _ => calculate_area(&r.points),
    };
    let color = r.color.unwrap_or_else(|| ROOM_COLORS[r.id as usize % ROOM_COLORS.len()].to_string());
    Ok(Room { id: r.id, points: r.points, area, color })
}

fn build_fixture(f: FixtureDe) -> Result<Fixture, PlanError> {
    check_id("fixture", f.id)?;
    check_coords("fixture.position", f.position)?;
    if !f.rotation.is_finite() {
        return Err(PlanError::NonFinite("fixture.rotation"));
    }
    let (dw, dd) = f.kind.default_size();
    let width = f.width.unwrap_or(dw);
    let depth = f.depth.unwrap_or(dd);
    for (name, v) in [("fixture.width", width), ("fixture.depth", depth)] {
        if !(v.is_finite() && v > 0.0 && v <= limits::COORD_MAX) {
            return Err(out_of_range(name, 0.0, limits::COORD_MAX, v));
        }
    }
    Ok(Fixture { id: f.id, kind: f.kind, position: f.position, rotation: f.rotation, width, depth, wall: f.wall })
}

/// Arena with one slot per id up to the largest valid id present.
fn sized_arena<T>(ids: impl Iterator<Item = u32>) -> Vec<Option<T>> {
    let max = ids.filter(|id| *id <= limits::MAX_ID).max();
    let mut v = Vec::new();
    if let Some(m) = max {
        v.resize_with(m as usize + 1, || None);
    }
    v
}

fn place<T>(arena: &mut [Option<T>], kind: &'static str, id: u32, item: T, strict: bool) -> Result<(), PlanError> {
    let Some(slot) = arena.get_mut(id as usize) else {
        return Err(PlanError::InvalidId { kind, id });
    };
    if slot.is_some() {
        if strict {
            return Err(PlanError::InvalidId { kind, id });
        }
        warn!(kind, id, "duplicate id in project; last entry wins");
    }
    *slot = Some(item);
    Ok(())
}

// Shared loader. Lenient mode skips invalid entries; strict mode fails on the first.
fn load(doc: DocDe, strict: bool) -> Result<Plan, PlanError> {
    if doc.walls.len() > limits::MAX_WALLS {
        return Err(PlanError::TooLarge { what: "walls", limit: limits::MAX_WALLS });
    }
    if doc.rooms.len() > limits::MAX_ROOMS {
        return Err(PlanError::TooLarge { what: "rooms", limit: limits::MAX_ROOMS });
    }
    if doc.fixtures.len() > limits::MAX_FIXTURES {
        return Err(PlanError::TooLarge { what: "fixtures", limit: limits::MAX_FIXTURES });
    }
    let mut plan = Plan::new();
    plan.unit = doc.unit;
    if let Some(h) = doc.wall_height {
        if limits::in_height_bounds(h) {
            plan.wall_height = h;
        } else if strict {
            return Err(out_of_range("wallHeight", 0.0, limits::HEIGHT_MAX_MM, h));
        } else {
            warn!(wall_height = h, "ignoring out-of-range wallHeight");
        }
    }

    let mut skipped = 0usize;
    plan.walls = sized_arena(doc.walls.iter().map(|w| w.id));
    for w in doc.walls {
        let id = w.id;
        match check_wall(&w) {
            Ok(()) => place(&mut plan.walls, "wall", id, w, strict)?,
            Err(e) if strict => return Err(e),
            Err(e) => {
                warn!(wall = id, error = %e, "skipping invalid wall");
                skipped += 1;
            }
        }
    }

    plan.rooms = sized_arena(doc.rooms.iter().map(|r| r.id));
    for r in doc.rooms {
        let id = r.id;
        match build_room(r) {
            Ok(room) => place(&mut plan.rooms, "room", id, room, strict)?,
            Err(e) if strict => return Err(e),
            Err(e) => {
                warn!(room = id, error = %e, "skipping invalid room");
                skipped += 1;
            }
        }
    }

    plan.fixtures = sized_arena(doc.fixtures.iter().map(|f| f.id));
    for f in doc.fixtures {
        let id = f.id;
        let mut fixture = match build_fixture(f) {
            Ok(fx) => fx,
            Err(e) if strict => return Err(e),
            Err(e) => {
                warn!(fixture = id, error = %e, "skipping invalid fixture");
                skipped += 1;
                continue;
            }
        };
        if let Some(w) = fixture.wall {
            if plan.get_wall(w).is_none() {
                if strict {
                    return Err(PlanError::InvalidId { kind: "wall", id: w });
                }
                warn!(fixture = id, wall = w, "fixture references a missing wall; detached");
                fixture.wall = None;
            }
        }
        place(&mut plan.fixtures, "fixture", id, fixture, strict)?;
    }

    debug!(
        walls = plan.wall_count(),
        rooms = plan.rooms().count(),
        fixtures = plan.fixture_count(),
        skipped,
        "project loaded"
    );
    Ok(plan)
}

fn install(p: &mut Plan, mut loaded: Plan) {
    loaded.geom_ver = p.geom_ver.wrapping_add(1);
    *p = loaded;
}

pub fn from_json_impl(p: &mut Plan, v: Value) -> bool {
    let doc: DocDe = match serde_json::from_value(v) {
        Ok(d) => d,
        Err(e) => {
            warn!(error = %e, "unreadable project json");
            return false;
        }
    };
    match load(doc, false) {
        Ok(loaded) => {
            install(p, loaded);
            true
        }
        Err(e) => {
            warn!(error = %e, "project rejected");
            false
        }
    }
}

pub fn from_json_impl_strict(p: &mut Plan, v: Value) -> Result<(), PlanError> {
    let doc: DocDe = serde_json::from_value(v)?;
    let loaded = load(doc, true)?;
    install(p, loaded);
    Ok(())
}
