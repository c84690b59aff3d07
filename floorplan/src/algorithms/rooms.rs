//! Room detection: trace closed wall boundaries and keep the largest one.
//!
//! Endpoints are merged on an integer grid (`round(x), round(y)`), then every
//! wall is tried as the first edge of a boundary, in both directions. Each
//! trace is a depth-first walk that never reuses a wall already on its path,
//! closes when it gets back to its start with at least three points, and is
//! abandoned once it has taken `max_steps` steps.
//!
//! This is a greedy search, not a planar face decomposition: with several
//! enclosed regions sharing walls it returns the largest traced boundary, which
//! is not necessarily a minimal face.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::geometry::polygon::{area_m2, calculate_area};
use crate::geometry::tolerance::{MIN_ROOM_AREA_M2, ROOM_TRACE_STEPS};
use crate::model::{Point, Wall};

type Key = (i64, i64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoomSettings {
    pub max_steps: usize,
    pub min_area_m2: f64,
}

impl Default for RoomSettings {
    fn default() -> Self {
        RoomSettings { max_steps: ROOM_TRACE_STEPS, min_area_m2: MIN_ROOM_AREA_M2 }
    }
}

/// A closed boundary found by the tracer. `area` is m² rounded to two decimals.
#[derive(Clone, Debug, PartialEq)]
pub struct Boundary {
    pub points: Vec<Point>,
    pub area: f64,
}

#[inline]
fn key_of(p: Point) -> Key {
    (p.x.round() as i64, p.y.round() as i64)
}

struct WallGraph {
    // key -> [(wall index, far end key)]
    adjacency: HashMap<Key, Vec<(usize, Key)>>,
    // first point seen for each key
    points: HashMap<Key, Point>,
}

impl WallGraph {
    fn build(walls: &[Wall]) -> Self {
        let mut adjacency: HashMap<Key, Vec<(usize, Key)>> = HashMap::new();
        let mut points: HashMap<Key, Point> = HashMap::new();
        for (i, w) in walls.iter().enumerate() {
            let ka = key_of(w.start);
            let kb = key_of(w.end);
            points.entry(ka).or_insert(w.start);
            points.entry(kb).or_insert(w.end);
            adjacency.entry(ka).or_default().push((i, kb));
            adjacency.entry(kb).or_default().push((i, ka));
        }
        WallGraph { adjacency, points }
    }

    fn neighbors(&self, k: Key) -> &[(usize, Key)] {
        self.adjacency.get(&k).map(Vec::as_slice).unwrap_or(&[])
    }
}

struct Frame {
    node: Key,
    next: usize,
    // wall used to reach `node`
    via: usize,
}

/// Iterative DFS from `start` whose first step is `first_wall` towards `first`.
fn trace_boundary(g: &WallGraph, start: Key, first_wall: usize, first: Key, max_steps: usize) -> Option<Vec<Key>> {
    if first == start {
        return None;
    }
    let mut path: Vec<Key> = vec![start, first];
    let mut used: Vec<usize> = vec![first_wall];
    let mut stack: Vec<Frame> = vec![Frame { node: first, next: 0, via: first_wall }];
    let mut steps = 1usize;

    while let Some(top) = stack.last_mut() {
        let nbrs = g.neighbors(top.node);
        let mut advanced: Option<(usize, Key)> = None;
        while top.next < nbrs.len() {
            let (w, other) = nbrs[top.next];
            top.next += 1;
            if used.contains(&w) {
                continue;
            }
            if other == start {
                if path.len() >= 3 {
                    return Some(path);
                }
                continue;
            }
            advanced = Some((w, other));
            break;
        }
        match advanced {
            Some((w, other)) => {
                steps += 1;
                if steps > max_steps {
                    trace!(steps, "boundary trace exhausted its budget");
                    return None;
                }
                used.push(w);
                path.push(other);
                stack.push(Frame { node: other, next: 0, via: w });
            }
            None => {
                if let Some(done) = stack.pop() {
                    path.pop();
                    if let Some(pos) = used.iter().rposition(|u| *u == done.via) {
                        used.remove(pos);
                    }
                }
            }
        }
    }
    None
}

/// All closed boundaries reachable from each wall in both directions,
/// area-filtered but not deduplicated.
pub fn trace_boundaries(walls: &[Wall], settings: RoomSettings) -> Vec<Boundary> {
    let g = WallGraph::build(walls);
    let mut out = Vec::new();
    for (i, w) in walls.iter().enumerate() {
        let ka = key_of(w.start);
        let kb = key_of(w.end);
        for (s, f) in [(ka, kb), (kb, ka)] {
            let Some(keys) = trace_boundary(&g, s, i, f, settings.max_steps) else {
                continue;
            };
            let points: Vec<Point> = keys.iter().filter_map(|k| g.points.get(k).copied()).collect();
            let raw = area_m2(&points);
            if raw > settings.min_area_m2 {
                out.push(Boundary { area: calculate_area(&points), points });
            }
        }
    }
    out
}

/// Largest closed boundary enclosed by `walls`, or `None` with fewer than
/// three walls or when nothing closes above the area threshold.
pub fn detect_room(walls: &[Wall], settings: RoomSettings) -> Option<Boundary> {
    if walls.len() < 3 {
        debug!(walls = walls.len(), "room detection needs at least three walls");
        return None;
    }
    let mut best: Option<Boundary> = None;
    for b in trace_boundaries(walls, settings) {
        if best.as_ref().map_or(true, |cur| area_m2(&b.points) > area_m2(&cur.points)) {
            best = Some(b);
        }
    }
    match &best {
        Some(b) => debug!(points = b.points.len(), area = b.area, "room boundary found"),
        None => debug!(walls = walls.len(), "no closed room boundary"),
    }
    best
}
