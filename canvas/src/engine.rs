//! DESIGN
//! ======
//!
//! The engine turns raw pointer/wheel/key events into document mutations and
//! a list of `Action`s for the host to process. Every gesture runs through an
//! explicit state machine (`GestureState`) so a pointer-up can never be
//! misread: the gesture that started on pointer-down decides what the move
//! and release mean.
//!
//! `EngineCore` holds all logic that doesn't depend on the canvas element so
//! the whole state machine is testable natively. `Engine` wraps it together
//! with the browser canvas and the renderer.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use web_sys::HtmlCanvasElement;

use crate::camera::{Camera, Point};
use crate::consts::{
    CLICK_THRESHOLD_PX, DRAG_SMOOTHING_FULL_DIST, DRAG_SMOOTHING_MIN_ALPHA, DRAW_SAMPLE_DIST,
    PATH_DEFAULT_WIDTH, WHEEL_ZOOM_STEP,
};
use crate::doc::{
    BoardDoc, CanvasHeader, DrawingPath, EntityId, Folder, PartialFolder, PartialHeader,
};
use crate::hit::{hit_test, Hit, HitKind};
use crate::input::{Button, GestureState, Key, Modifiers, Tool, UiState, WheelDelta};
use uuid::Uuid;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone)]
pub enum Action {
    /// A folder finished moving; persist the new position and stacking order.
    FolderMoved { id: EntityId, fields: PartialFolder },
    /// A header finished moving; persist the new position.
    HeaderMoved { id: EntityId, fields: PartialHeader },
    /// A new header was placed on the canvas.
    HeaderCreated(CanvasHeader),
    /// A freehand stroke was completed.
    PathDrawn(DrawingPath),
    /// An entity was removed from the document.
    EntityDeleted { id: EntityId, kind: HitKind },
    /// A folder was clicked without dragging; the host should open it.
    FolderOpenRequested { id: EntityId },
    /// The selection set changed.
    SelectionChanged,
    /// The host should change the CSS cursor.
    SetCursor(String),
    /// The host should repaint the canvas.
    RenderNeeded,
}

/// Core engine state — all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser
/// dependencies.
pub struct EngineCore {
    pub doc: BoardDoc,
    pub camera: Camera,
    pub ui: UiState,
    pub gesture: GestureState,
    pub board_id: EntityId,
    pub stroke_color: String,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            doc: BoardDoc::new(),
            camera: Camera::default(),
            ui: UiState::default(),
            gesture: GestureState::Idle,
            board_id: Uuid::nil(),
            stroke_color: "#1F1A17".to_owned(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Bind the engine to a board and hydrate the document from a snapshot.
    pub fn load_board(
        &mut self,
        board_id: EntityId,
        folders: Vec<Folder>,
        headers: Vec<CanvasHeader>,
        paths: Vec<DrawingPath>,
    ) {
        self.board_id = board_id;
        self.doc.load_snapshot(folders, headers, paths);
        self.ui.selection.clear();
        self.gesture = GestureState::Idle;
    }

    /// Set the active tool. Cancels any in-flight gesture.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.gesture.is_active() {
            self.cancel_gesture();
        }
        self.ui.tool = tool;
    }

    /// Set the stroke color used for new drawing paths.
    pub fn set_stroke_color(&mut self, color: impl Into<String>) {
        self.stroke_color = color.into();
    }

    /// Update viewport dimensions and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = dpr;
    }

    // --- Queries ---

    /// Ids of the currently selected entities.
    #[must_use]
    pub fn selection(&self) -> &std::collections::HashSet<EntityId> {
        &self.ui.selection
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// The marquee rectangle as `(min, max)` world corners, while one is
    /// being swept.
    #[must_use]
    pub fn marquee(&self) -> Option<(Point, Point)> {
        if let GestureState::Selecting { anchor_world, current_world, .. } = &self.gesture {
            Some(rect_corners(*anchor_world, *current_world))
        } else {
            None
        }
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        match button {
            Button::Secondary => Vec::new(),
            Button::Middle => {
                self.gesture = GestureState::Panning { last_screen: screen_pt };
                vec![Action::SetCursor("grabbing".into())]
            }
            Button::Primary => self.primary_down(screen_pt, modifiers),
        }
    }

    fn primary_down(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        let world_pt = self.camera.screen_to_world(screen_pt);
        match self.ui.tool {
            Tool::Pan => {
                self.gesture = GestureState::Panning { last_screen: screen_pt };
                vec![Action::SetCursor("grabbing".into())]
            }
            Tool::Draw => {
                let path = DrawingPath {
                    id: Uuid::new_v4(),
                    board_id: self.board_id,
                    color: self.stroke_color.clone(),
                    width: PATH_DEFAULT_WIDTH,
                    points: vec![world_pt],
                };
                let id = path.id;
                self.doc.insert_path(path);
                self.gesture = GestureState::Drawing { id };
                vec![Action::RenderNeeded]
            }
            Tool::Header => {
                let header = CanvasHeader {
                    id: Uuid::new_v4(),
                    board_id: self.board_id,
                    text: "Header".to_owned(),
                    x: world_pt.x,
                    y: world_pt.y,
                };
                let id = header.id;
                self.doc.insert_header(header.clone());
                self.ui.selection.clear();
                self.ui.selection.insert(id);
                // One placement per activation; back to select for editing.
                self.ui.tool = Tool::Select;
                vec![Action::HeaderCreated(header), Action::SelectionChanged, Action::RenderNeeded]
            }
            Tool::Select => self.select_down(screen_pt, world_pt, modifiers),
        }
    }

    fn select_down(&mut self, screen_pt: Point, world_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        match hit_test(world_pt, &self.doc, &self.camera) {
            Some(Hit { id, kind: HitKind::Folder }) => {
                let changed = self.apply_click_selection(id, modifiers);
                // Still selected after a shift-toggle means the drag proceeds.
                if self.ui.selection.contains(&id) {
                    let folder = self.doc.folder(&id).map(|f| (f.x, f.y, f.z_index));
                    if let Some((orig_x, orig_y, orig_z)) = folder {
                        self.doc.bring_folder_to_front(&id);
                        self.gesture = GestureState::DraggingFolder {
                            id,
                            last_world: world_pt,
                            down_screen: screen_pt,
                            orig_x,
                            orig_y,
                            orig_z,
                        };
                    }
                }
                let mut actions = vec![Action::RenderNeeded];
                if changed {
                    actions.insert(0, Action::SelectionChanged);
                }
                actions
            }
            Some(Hit { id, kind: HitKind::Header }) => {
                let changed = self.apply_click_selection(id, modifiers);
                if self.ui.selection.contains(&id) {
                    let header = self.doc.header(&id).map(|h| (h.x, h.y));
                    if let Some((orig_x, orig_y)) = header {
                        self.gesture = GestureState::DraggingHeader {
                            id,
                            last_world: world_pt,
                            down_screen: screen_pt,
                            orig_x,
                            orig_y,
                        };
                    }
                }
                let mut actions = vec![Action::RenderNeeded];
                if changed {
                    actions.insert(0, Action::SelectionChanged);
                }
                actions
            }
            Some(Hit { id, kind: HitKind::Path }) => {
                let changed = self.apply_click_selection(id, modifiers);
                if changed {
                    vec![Action::SelectionChanged, Action::RenderNeeded]
                } else {
                    Vec::new()
                }
            }
            None => {
                let had_selection = !self.ui.selection.is_empty();
                if !modifiers.shift {
                    self.ui.selection.clear();
                }
                self.gesture = GestureState::Selecting {
                    anchor_world: world_pt,
                    current_world: world_pt,
                    base: self.ui.selection.clone(),
                };
                if had_selection && self.ui.selection.is_empty() {
                    vec![Action::SelectionChanged, Action::RenderNeeded]
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// Click selection semantics: plain click selects exactly the target,
    /// shift-click toggles it within the set. Returns whether the set changed.
    fn apply_click_selection(&mut self, id: EntityId, modifiers: Modifiers) -> bool {
        if modifiers.shift {
            if !self.ui.selection.remove(&id) {
                self.ui.selection.insert(id);
            }
            true
        } else if self.ui.selection.contains(&id) && self.ui.selection.len() == 1 {
            false
        } else {
            self.ui.selection.clear();
            self.ui.selection.insert(id);
            true
        }
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        let world_pt = self.camera.screen_to_world(screen_pt);
        match self.gesture.clone() {
            GestureState::Idle => Vec::new(),
            GestureState::Panning { last_screen } => {
                self.camera.pan_by(screen_pt.x - last_screen.x, screen_pt.y - last_screen.y);
                self.gesture = GestureState::Panning { last_screen: screen_pt };
                vec![Action::RenderNeeded]
            }
            GestureState::Selecting { anchor_world, base, .. } => {
                let (min, max) = rect_corners(anchor_world, world_pt);
                let mut new_selection = base.clone();
                new_selection.extend(
                    self.doc
                        .folders
                        .iter()
                        .filter(|f| f.x <= max.x && f.x + f.width >= min.x && f.y <= max.y && f.y + f.height >= min.y)
                        .map(|f| f.id),
                );
                self.gesture = GestureState::Selecting { anchor_world, current_world: world_pt, base };
                let changed = new_selection != self.ui.selection;
                self.ui.selection = new_selection;
                if changed {
                    vec![Action::SelectionChanged, Action::RenderNeeded]
                } else {
                    vec![Action::RenderNeeded]
                }
            }
            GestureState::DraggingFolder { id, last_world, down_screen, orig_x, orig_y, orig_z } => {
                let (dx, dy) = self.smoothed_delta(last_world, world_pt);
                if let Some(folder) = self.doc.folder_mut(&id) {
                    folder.x += dx;
                    folder.y += dy;
                }
                self.gesture = GestureState::DraggingFolder {
                    id,
                    last_world: world_pt,
                    down_screen,
                    orig_x,
                    orig_y,
                    orig_z,
                };
                vec![Action::RenderNeeded]
            }
            GestureState::DraggingHeader { id, last_world, down_screen, orig_x, orig_y } => {
                let (dx, dy) = self.smoothed_delta(last_world, world_pt);
                if let Some(header) = self.doc.header_mut(&id) {
                    header.x += dx;
                    header.y += dy;
                }
                self.gesture = GestureState::DraggingHeader {
                    id,
                    last_world: world_pt,
                    down_screen,
                    orig_x,
                    orig_y,
                };
                vec![Action::RenderNeeded]
            }
            GestureState::Drawing { id } => {
                let sample_dist = self.camera.screen_dist_to_world(DRAW_SAMPLE_DIST);
                if let Some(path) = self.doc.path_mut(&id) {
                    let far_enough = path
                        .points
                        .last()
                        .is_none_or(|last| last.dist(world_pt) >= sample_dist);
                    if far_enough {
                        path.points.push(world_pt);
                        return vec![Action::RenderNeeded];
                    }
                }
                Vec::new()
            }
        }
    }

    /// Damped drag delta: short moves are softened so folders don't jitter
    /// under a shaky pointer, long moves pass through at full strength.
    fn smoothed_delta(&self, last_world: Point, world_pt: Point) -> (f64, f64) {
        let dx = world_pt.x - last_world.x;
        let dy = world_pt.y - last_world.y;
        let screen_dist = last_world.dist(world_pt) * self.camera.zoom;
        let t = (screen_dist / DRAG_SMOOTHING_FULL_DIST).min(1.0);
        let alpha = DRAG_SMOOTHING_MIN_ALPHA + (1.0 - DRAG_SMOOTHING_MIN_ALPHA) * t;
        (dx * alpha, dy * alpha)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let gesture = std::mem::take(&mut self.gesture);
        match gesture {
            GestureState::Idle => Vec::new(),
            GestureState::Panning { .. } => {
                vec![Action::SetCursor("default".into()), Action::RenderNeeded]
            }
            GestureState::Selecting { .. } => vec![Action::RenderNeeded],
            GestureState::DraggingFolder { id, down_screen, orig_x, orig_y, orig_z, .. } => {
                if screen_pt.dist(down_screen) <= CLICK_THRESHOLD_PX {
                    // A click, not a drag: put the folder back (position and
                    // stacking order) and open it.
                    if let Some(folder) = self.doc.folder_mut(&id) {
                        folder.x = orig_x;
                        folder.y = orig_y;
                        folder.z_index = orig_z;
                    }
                    return vec![Action::FolderOpenRequested { id }, Action::RenderNeeded];
                }
                let Some(folder) = self.doc.folder(&id) else {
                    return vec![Action::RenderNeeded];
                };
                let fields = PartialFolder {
                    x: Some(folder.x),
                    y: Some(folder.y),
                    z_index: Some(folder.z_index),
                    ..Default::default()
                };
                vec![Action::FolderMoved { id, fields }, Action::RenderNeeded]
            }
            GestureState::DraggingHeader { id, down_screen, .. } => {
                if screen_pt.dist(down_screen) <= CLICK_THRESHOLD_PX {
                    return vec![Action::RenderNeeded];
                }
                let Some(header) = self.doc.header(&id) else {
                    return vec![Action::RenderNeeded];
                };
                let fields = PartialHeader { x: Some(header.x), y: Some(header.y), ..Default::default() };
                vec![Action::HeaderMoved { id, fields }, Action::RenderNeeded]
            }
            GestureState::Drawing { id } => {
                // A stroke needs at least two samples to be worth keeping.
                let keep = self.doc.path(&id).is_some_and(|p| p.points.len() >= 2);
                if keep {
                    let path = self
                        .doc
                        .path(&id)
                        .cloned()
                        .map(Action::PathDrawn);
                    let mut actions = vec![Action::RenderNeeded];
                    if let Some(action) = path {
                        actions.insert(0, action);
                    }
                    actions
                } else {
                    self.doc.remove_path(&id);
                    vec![Action::RenderNeeded]
                }
            }
        }
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.shift {
            // Shift-scroll pans horizontally (trackpad convention).
            self.camera.pan_by(-delta.dy - delta.dx, 0.0);
        } else if delta.dy != 0.0 {
            let factor = if delta.dy < 0.0 { WHEEL_ZOOM_STEP } else { 1.0 / WHEEL_ZOOM_STEP };
            self.camera.zoom_at(screen_pt, factor);
        } else {
            self.camera.pan_by(-delta.dx, 0.0);
        }
        vec![Action::RenderNeeded]
    }

    pub fn on_key_down(&mut self, key: Key, _modifiers: Modifiers) -> Vec<Action> {
        match key.0.as_str() {
            "Delete" | "Backspace" => self.delete_selection(),
            "Escape" => self.escape(),
            _ => Vec::new(),
        }
    }

    fn delete_selection(&mut self) -> Vec<Action> {
        if self.gesture.is_active() || self.ui.selection.is_empty() {
            return Vec::new();
        }
        let ids: Vec<EntityId> = self.ui.selection.drain().collect();
        let mut actions = Vec::new();
        for id in ids {
            if let Some(kind) = self.remove_entity(&id) {
                actions.push(Action::EntityDeleted { id, kind });
            }
        }
        actions.push(Action::SelectionChanged);
        actions.push(Action::RenderNeeded);
        actions
    }

    fn escape(&mut self) -> Vec<Action> {
        if self.gesture.is_active() {
            self.cancel_gesture();
            return vec![Action::RenderNeeded];
        }
        if self.ui.selection.is_empty() {
            return Vec::new();
        }
        self.ui.selection.clear();
        vec![Action::SelectionChanged, Action::RenderNeeded]
    }

    /// Abort the in-flight gesture and undo its provisional edits.
    fn cancel_gesture(&mut self) {
        match std::mem::take(&mut self.gesture) {
            GestureState::DraggingFolder { id, orig_x, orig_y, orig_z, .. } => {
                if let Some(folder) = self.doc.folder_mut(&id) {
                    folder.x = orig_x;
                    folder.y = orig_y;
                    folder.z_index = orig_z;
                }
            }
            GestureState::DraggingHeader { id, orig_x, orig_y, .. } => {
                if let Some(header) = self.doc.header_mut(&id) {
                    header.x = orig_x;
                    header.y = orig_y;
                }
            }
            GestureState::Drawing { id } => {
                self.doc.remove_path(&id);
            }
            GestureState::Idle
            | GestureState::Panning { .. }
            | GestureState::Selecting { .. } => {}
        }
    }

    fn remove_entity(&mut self, id: &EntityId) -> Option<HitKind> {
        if self.doc.remove_folder(id).is_some() {
            return Some(HitKind::Folder);
        }
        if self.doc.remove_header(id).is_some() {
            return Some(HitKind::Header);
        }
        if self.doc.remove_path(id).is_some() {
            return Some(HitKind::Path);
        }
        None
    }
}

fn rect_corners(a: Point, b: Point) -> (Point, Point) {
    (
        Point::new(a.x.min(b.x), a.y.min(b.y)),
        Point::new(a.x.max(b.x), a.y.max(b.y)),
    )
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas
/// element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, core: EngineCore::new() }
    }

    // --- Delegated data inputs ---

    pub fn load_board(
        &mut self,
        board_id: EntityId,
        folders: Vec<Folder>,
        headers: Vec<CanvasHeader>,
        paths: Vec<DrawingPath>,
    ) {
        self.core.load_board(board_id, folders, headers, paths);
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.core.set_tool(tool);
    }

    pub fn set_stroke_color(&mut self, color: impl Into<String>) {
        self.core.set_stroke_color(color);
    }

    // --- Viewport ---

    /// Update viewport dimensions, resizing the backing store for the
    /// device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.set_viewport(width_css, height_css, dpr);
        self.canvas.set_width(to_device_px(width_css, dpr));
        self.canvas.set_height(to_device_px(height_css, dpr));
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta, modifiers)
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a `Canvas2D` call
    /// fails.
    pub fn render(&self) -> Result<(), wasm_bindgen::JsValue> {
        use wasm_bindgen::JsCast;

        let Some(ctx) = self.canvas.get_context("2d")? else {
            return Ok(());
        };
        let ctx: web_sys::CanvasRenderingContext2d = ctx.dyn_into()?;
        crate::render::draw(
            &ctx,
            &self.core.doc,
            &self.core.camera,
            &self.core.ui,
            self.core.marquee(),
            self.core.viewport_width,
            self.core.viewport_height,
            self.core.dpr,
        )
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> &std::collections::HashSet<EntityId> {
        self.core.selection()
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera()
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_device_px(css: f64, dpr: f64) -> u32 {
    (css * dpr).max(0.0).round() as u32
}
