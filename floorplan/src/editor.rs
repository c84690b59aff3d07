//! Pointer-driven editing session. Client coordinates come in, the editor
//! converts them to world space, dispatches on the active tool and reports
//! outcomes through the host.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::algorithms::drag::{DragController, DragUpdate, WallTarget};
use crate::algorithms::snapping::place_preview;
use crate::algorithms::split::{apply_split, SplitGesture, SplitMenu, SplitResult};
use crate::config::EditorConfig;
use crate::geometry::limits;
use crate::host::HostServices;
use crate::model::{FixtureId, FixtureKind, Point, Rect, SnapPoint, WallId};
use crate::svg::{RenderOptions, SvgPath, SvgText};
use crate::view::{ViewTransform, Viewport};
use crate::{Plan, PlanError};

pub const BUTTON_PRIMARY: i16 = 0;
pub const BUTTON_MIDDLE: i16 = 1;

/// Mouse/pointer event as the host receives it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
    #[serde(default)]
    pub shift_key: bool,
    #[serde(default)]
    pub button: i16,
}

impl PointerEvent {
    pub fn primary(client_x: f64, client_y: f64) -> Self {
        PointerEvent { client_x, client_y, shift_key: false, button: BUTTON_PRIMARY }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tool", content = "kind", rename_all = "camelCase")]
pub enum Tool {
    #[default]
    Select,
    DrawWall,
    PlaceFixture(FixtureKind),
}

/// Magnetised footprint of the fixture about to be placed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FixturePreview {
    pub kind: FixtureKind,
    /// Axis-aligned footprint after snapping.
    pub footprint: Rect,
    /// 90 when mounted on a vertical wall.
    pub rotation: f64,
    pub snap: Option<SnapPoint>,
}

/// Lock `p` to the dominant axis through `from`.
fn axis_lock(from: Point, p: Point) -> Point {
    let d = p - from;
    if d.x.abs() >= d.y.abs() {
        Point::new(p.x, from.y)
    } else {
        Point::new(from.x, p.y)
    }
}

pub struct Editor<H: HostServices> {
    plan: Plan,
    view: ViewTransform,
    viewport: Viewport,
    // canvas top-left in client coordinates
    origin: Point,
    config: EditorConfig,
    host: H,
    tool: Tool,
    drag: DragController,
    split: SplitGesture,
    split_menu: Option<SplitMenu>,
    press_screen: Option<Point>,
    press_ver: u64,
    pan_last: Option<Point>,
    draw_start: Option<Point>,
    cursor: Point,
    preview: Option<FixturePreview>,
    last_room_area: Option<f64>,
}

impl<H: HostServices> Editor<H> {
    pub fn new(host: H) -> Self {
        Editor::with_config(host, EditorConfig::default())
    }

    pub fn with_config(host: H, config: EditorConfig) -> Self {
        Editor {
            plan: Plan::new(),
            view: ViewTransform::default(),
            viewport: Viewport { width: 0.0, height: 0.0 },
            origin: Point::ZERO,
            config,
            host,
            tool: Tool::Select,
            drag: DragController::new(),
            split: SplitGesture::default(),
            split_menu: None,
            press_screen: None,
            press_ver: 0,
            pan_last: None,
            draw_start: None,
            cursor: Point::ZERO,
            preview: None,
            last_room_area: None,
        }
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }
    /// Direct plan access; call [`Editor::refresh_rooms`] after wall edits.
    pub fn plan_mut(&mut self) -> &mut Plan {
        &mut self.plan
    }
    pub fn view(&self) -> &ViewTransform {
        &self.view
    }
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }
    pub fn host(&self) -> &H {
        &self.host
    }
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
    pub fn tool(&self) -> Tool {
        self.tool
    }
    /// Last pointer position in world units.
    pub fn cursor(&self) -> Point {
        self.cursor
    }
    pub fn split_menu(&self) -> Option<&SplitMenu> {
        self.split_menu.as_ref()
    }
    pub fn preview(&self) -> Option<&FixturePreview> {
        self.preview.as_ref()
    }
    /// Start of the wall being drawn.
    pub fn draw_start(&self) -> Option<Point> {
        self.draw_start
    }
    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.cancel();
        self.tool = tool;
        debug!(?tool, "tool changed");
    }

    /// Canvas placement within the client area, in pixels.
    pub fn set_viewport(&mut self, left: f64, top: f64, width: f64, height: f64) {
        if [left, top, width, height].iter().all(|v| v.is_finite()) {
            self.origin = Point::new(left, top);
            self.viewport = Viewport { width: width.max(0.0), height: height.max(0.0) };
        }
    }

    pub fn client_to_world(&self, client_x: f64, client_y: f64) -> Point {
        self.view.to_world(Point::new(client_x - self.origin.x, client_y - self.origin.y))
    }

    fn screen_of(&self, ev: &PointerEvent) -> Option<Point> {
        let s = Point::new(ev.client_x - self.origin.x, ev.client_y - self.origin.y);
        s.is_finite().then_some(s)
    }

    fn snap_distance(&self) -> f64 {
        self.view.screen_dist_to_world(self.config.snap_distance_px)
    }

    fn new_wall_thickness(&self) -> f64 {
        let t = self.host.wall_thickness();
        if limits::in_thickness_bounds(t) {
            t
        } else {
            warn!(thickness = t, "host wall thickness unusable; using default");
            self.config.default_wall_thickness_mm
        }
    }

    fn new_wall_height(&self) -> f64 {
        let h = self.host.wall_height();
        if limits::in_height_bounds(h) {
            h
        } else {
            warn!(height = h, "host wall height unusable; using default");
            self.config.default_wall_height_mm
        }
    }

    /// Returns whether the scene needs a redraw.
    pub fn pointer_down(&mut self, ev: &PointerEvent) -> bool {
        let Some(screen) = self.screen_of(ev) else {
            return false;
        };
        let world = self.view.to_world(screen);
        self.cursor = world;
        self.split_menu = None;
        if ev.button == BUTTON_MIDDLE {
            self.pan_last = Some(screen);
            return true;
        }
        if ev.button != BUTTON_PRIMARY {
            return false;
        }
        match self.tool {
            Tool::Select => self.select_down(screen, world),
            Tool::DrawWall => self.draw_click(world, ev.shift_key),
            Tool::PlaceFixture(kind) => self.place_fixture(kind, world),
        }
    }

    fn select_down(&mut self, screen: Point, world: Point) -> bool {
        self.press_ver = self.plan.geom_version();
        let handle = self.view.screen_dist_to_world(self.config.handle_radius_px);
        if let Some(c) = self.plan.outline().hit_corner(world, handle) {
            return self.drag.begin_corner(&self.plan, c, world);
        }
        let slack = self.view.screen_dist_to_world(self.config.wall_hit_px);
        let target = self
            .plan
            .hit_outline_segment(world, slack)
            .or_else(|| self.plan.hit_wall(world, slack).map(|id| WallTarget::Wall { id }));
        if let Some(t) = target {
            if self.drag.begin_wall(&self.plan, t, world) {
                self.split.press(t);
                self.press_screen = Some(screen);
                return true;
            }
        }
        self.pan_last = Some(screen);
        true
    }

    fn draw_click(&mut self, world: Point, shift: bool) -> bool {
        let mut p = self.plan.snap_endpoint(world, self.snap_distance()).map_or(world, |s| s.point());
        let Some(start) = self.draw_start else {
            self.draw_start = Some(p);
            debug!(x = p.x, y = p.y, "wall chain started");
            return true;
        };
        if shift {
            p = axis_lock(start, p);
        }
        match self.plan.add_wall(start, p, self.new_wall_thickness(), self.new_wall_height()) {
            Ok(id) => {
                debug!(wall = id, "wall drawn");
                self.draw_start = Some(p);
                self.refresh_rooms();
                true
            }
            Err(PlanError::DegenerateWall(_)) => {
                // clicking the chain end again finishes the chain
                self.draw_start = None;
                true
            }
            Err(e) => {
                self.host.show_error(&e.to_string());
                false
            }
        }
    }

    fn compute_preview(&self, kind: FixtureKind, world: Point) -> FixturePreview {
        let (w, d) = kind.default_size();
        let snap = self.plan.snap_with_band(world, self.snap_distance(), self.config.edge_boundary_band);
        let vertical = snap.and_then(|s| self.plan.get_wall(s.wall)).map_or(false, |wall| !wall.is_horizontal());
        let (fw, fh, rotation) = if vertical { (d, w, 90.0) } else { (w, d, 0.0) };
        FixturePreview { kind, footprint: place_preview(world, snap.as_ref(), fw, fh), rotation, snap }
    }

    fn place_fixture(&mut self, kind: FixtureKind, world: Point) -> bool {
        let preview = self.compute_preview(kind, world);
        let (w, d) = kind.default_size();
        let center = preview.footprint.center();
        match self.plan.add_fixture(kind, center, w, d, preview.rotation, preview.snap.map(|s| s.wall)) {
            Ok(id) => {
                debug!(fixture = id, kind = kind.as_str(), "fixture placed");
                self.preview = Some(preview);
                true
            }
            Err(e) => {
                self.host.show_error(&e.to_string());
                false
            }
        }
    }

    pub fn pointer_move(&mut self, ev: &PointerEvent) -> bool {
        let Some(screen) = self.screen_of(ev) else {
            return false;
        };
        let world = self.view.to_world(screen);
        self.cursor = world;
        if let Some(last) = self.pan_last {
            self.view.pan_by(screen.x - last.x, screen.y - last.y);
            self.pan_last = Some(screen);
            return true;
        }
        if self.drag.is_active() {
            if self.press_screen.is_some_and(|p| p != screen) {
                self.split.moved();
            }
            return match self.drag.update(&mut self.plan, world, ev.shift_key) {
                DragUpdate::Moved => true,
                DragUpdate::Aborted => {
                    self.split.cancel();
                    self.press_screen = None;
                    true
                }
                DragUpdate::Idle => false,
            };
        }
        match self.tool {
            Tool::PlaceFixture(kind) => {
                self.preview = Some(self.compute_preview(kind, world));
                true
            }
            Tool::DrawWall => self.draw_start.is_some(),
            Tool::Select => false,
        }
    }

    pub fn pointer_up(&mut self, ev: &PointerEvent) -> bool {
        let world = self.screen_of(ev).map_or(self.cursor, |s| self.view.to_world(s));
        self.cursor = world;
        if self.pan_last.take().is_some() {
            return true;
        }
        if !self.drag.end() {
            return false;
        }
        self.press_screen = None;
        self.split_menu = self.split.release(&self.plan, world);
        if self.plan.geom_version() != self.press_ver {
            self.refresh_rooms();
        }
        true
    }

    /// Wheel zoom; returns the new scale.
    pub fn wheel(&mut self, delta_y: f64, client_x: f64, client_y: f64) -> f64 {
        let anchor = Point::new(client_x - self.origin.x, client_y - self.origin.y);
        self.view.zoom(delta_y, anchor)
    }

    /// Drop any in-progress gesture, wall chain, preview and open menu.
    pub fn cancel(&mut self) {
        self.drag.end();
        self.split.cancel();
        self.split_menu = None;
        self.press_screen = None;
        self.pan_last = None;
        self.draw_start = None;
        self.preview = None;
    }

    pub fn dismiss_split_menu(&mut self) {
        self.split_menu = None;
    }

    /// Split the wall the open menu points at.
    pub fn split_at_menu(&mut self) -> Option<SplitResult> {
        let menu = self.split_menu.take()?;
        match apply_split(&mut self.plan, &menu) {
            Some(r) => {
                self.host.show_success("Wall split");
                self.refresh_rooms();
                Some(r)
            }
            None => {
                self.host.show_error("The wall cannot be split at this point");
                None
            }
        }
    }

    /// Replace the outline, using the host's current wall settings.
    pub fn set_outline(&mut self, points: &[Point]) {
        let (t, h) = (self.new_wall_thickness(), self.new_wall_height());
        self.cancel();
        self.plan.set_outline(points, t, h);
        self.refresh_rooms();
    }

    pub fn remove_wall(&mut self, id: WallId) -> Result<(), PlanError> {
        if !self.plan.remove_wall(id) {
            return Err(PlanError::InvalidId { kind: "wall", id });
        }
        self.refresh_rooms();
        Ok(())
    }

    pub fn remove_fixture(&mut self, id: FixtureId) -> Result<(), PlanError> {
        if !self.plan.remove_fixture(id) {
            return Err(PlanError::InvalidId { kind: "fixture", id });
        }
        Ok(())
    }

    /// Re-detect rooms and announce a newly found or changed room.
    pub fn refresh_rooms(&mut self) {
        let area = self
            .plan
            .recompute_rooms(self.config.room_settings())
            .and_then(|id| self.plan.get_room(id))
            .map(|r| r.area);
        if let Some(a) = area {
            if self.last_room_area != Some(a) {
                self.host.show_success(&format!("Room detected: {a:.2} m²"));
            }
        }
        self.last_room_area = area;
    }

    pub fn fit_to_content(&mut self) -> bool {
        let pts = self.plan.all_points();
        self.view.fit_to(&pts, self.viewport, self.config.fit_padding_px)
    }

    pub fn center_content(&mut self) -> bool {
        let pts = self.plan.all_points();
        self.view.center_on(&pts, self.viewport)
    }

    /// Strict project load. On failure the plan is untouched and the host is told why.
    pub fn load_project(&mut self, json: &str) -> Result<(), PlanError> {
        let loaded = serde_json::from_str::<serde_json::Value>(json)
            .map_err(PlanError::from)
            .and_then(|v| self.load_project_value(v));
        if let Err(e) = &loaded {
            self.host.show_error(&format!("Could not load project: {e}"));
        }
        loaded
    }

    /// Strict load of an already parsed document.
    pub fn load_project_value(&mut self, v: serde_json::Value) -> Result<(), PlanError> {
        self.plan.from_json_value_strict(v)?;
        self.after_load();
        Ok(())
    }

    /// Lenient load of an already parsed document; invalid entries are skipped.
    pub fn import_project_value(&mut self, v: serde_json::Value) -> bool {
        if !self.plan.from_json_value(v) {
            return false;
        }
        self.after_load();
        true
    }

    fn after_load(&mut self) {
        self.cancel();
        // the loaded room is already known; only later changes are announced
        self.last_room_area = self.plan.rooms().next().map(|r| r.area);
        self.fit_to_content();
    }

    pub fn save_project(&self) -> Result<String, PlanError> {
        serde_json::to_string(&self.plan.to_json_value()).map_err(|e| {
            let e = PlanError::from(e);
            self.host.show_error(&format!("Could not save project: {e}"));
            e
        })
    }

    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            angle_label_radius: self.config.angle_label_radius,
            angle_marker_radius: self.config.angle_marker_radius,
            preview: self.preview.map(|p| p.footprint),
            ..RenderOptions::default()
        }
    }

    pub fn render_paths(&self) -> (Vec<SvgPath>, Vec<SvgText>) {
        self.plan.render_paths(&self.render_options())
    }

    pub fn render_svg(&self) -> String {
        self.plan.to_svg_document(&self.render_options())
    }
}
