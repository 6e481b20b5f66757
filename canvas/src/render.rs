//! Rendering: draws the full board scene to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives read-only views of document state and camera state and produces
//! pixels — it does not mutate any application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::{Camera, Point};
use crate::consts::HEADER_HEIGHT;
use crate::doc::{BoardDoc, CanvasHeader, DrawingPath, Folder};
use crate::input::UiState;

/// Folder body fill.
const FOLDER_FILL: &str = "#F7F3EC";
/// Folder border and text.
const INK: &str = "#1F1A17";
/// Folder title band fill.
const TITLE_BAND_FILL: &str = "rgba(31, 26, 23, 0.10)";
/// Selection outline color.
const SELECTION_STROKE: &str = "#1E90FF";
/// Selection dash segment length in screen pixels.
const SELECTION_DASH_PX: f64 = 4.0;
/// Folder title band height in world units.
const TITLE_BAND_HEIGHT: f64 = 28.0;
/// Corner radius of the folder body in world units.
const FOLDER_RADIUS: f64 = 6.0;

/// Draw the full scene: folders, headers, paths, and selection UI.
///
/// `viewport_w` and `viewport_h` are in CSS pixels. `dpr` is the device pixel
/// ratio.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
#[allow(clippy::too_many_arguments)]
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    doc: &BoardDoc,
    camera: &Camera,
    ui: &UiState,
    marquee: Option<(Point, Point)>,
    viewport_w: f64,
    viewport_h: f64,
    dpr: f64,
) -> Result<(), JsValue> {
    // Layer 1: clear and set up transforms.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, viewport_w, viewport_h);
    ctx.translate(camera.pan_x, camera.pan_y)?;
    ctx.scale(camera.zoom, camera.zoom)?;

    // Layer 2: drawing paths sit beneath everything else.
    for path in &doc.paths {
        draw_path(ctx, path);
    }

    // Layer 3: headers, then folders in z-order (bottom first).
    for header in &doc.headers {
        draw_header(ctx, header)?;
    }
    for folder in doc.sorted_folders() {
        draw_folder(ctx, folder)?;
    }

    // Layer 4: selection UI.
    for folder in &doc.folders {
        if ui.selection.contains(&folder.id) {
            draw_selection_box(ctx, folder.x, folder.y, folder.width, folder.height, camera.zoom)?;
        }
    }
    for header in &doc.headers {
        if ui.selection.contains(&header.id) {
            let width = header_width(header);
            draw_selection_box(ctx, header.x, header.y, width, HEADER_HEIGHT, camera.zoom)?;
        }
    }
    for path in &doc.paths {
        if ui.selection.contains(&path.id) {
            if let Some((min, max)) = path_bounds(path) {
                draw_selection_box(ctx, min.x, min.y, max.x - min.x, max.y - min.y, camera.zoom)?;
            }
        }
    }

    if let Some((min, max)) = marquee {
        draw_marquee(ctx, min, max, camera.zoom)?;
    }

    Ok(())
}

// =============================================================
// Entity renderers
// =============================================================

fn draw_folder(ctx: &CanvasRenderingContext2d, folder: &Folder) -> Result<(), JsValue> {
    ctx.save();

    // Body.
    rounded_rect_path(ctx, folder.x, folder.y, folder.width, folder.height, FOLDER_RADIUS);
    ctx.set_fill_style_str(FOLDER_FILL);
    ctx.fill();
    ctx.set_stroke_style_str(INK);
    ctx.set_line_width(1.5);
    ctx.stroke();

    // Title band.
    ctx.set_fill_style_str(TITLE_BAND_FILL);
    ctx.fill_rect(folder.x, folder.y, folder.width, TITLE_BAND_HEIGHT);

    // Title.
    ctx.set_fill_style_str(INK);
    ctx.set_text_align("left");
    ctx.set_text_baseline("middle");
    ctx.set_font("13px sans-serif");
    let title = fit_text_with_ellipsis(ctx, &folder.title, folder.width - 16.0);
    ctx.fill_text(&title, folder.x + 8.0, folder.y + TITLE_BAND_HEIGHT * 0.5)?;

    // Card count, bottom-right.
    if !folder.cards.is_empty() {
        let label = format!("{} cards", folder.cards.len());
        ctx.set_font("11px sans-serif");
        ctx.set_text_align("right");
        ctx.fill_text(&label, folder.x + folder.width - 8.0, folder.y + folder.height - 12.0)?;
    }

    ctx.restore();
    Ok(())
}

fn draw_header(ctx: &CanvasRenderingContext2d, header: &CanvasHeader) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_fill_style_str(INK);
    ctx.set_text_align("left");
    ctx.set_text_baseline("middle");
    ctx.set_font("bold 20px sans-serif");
    ctx.fill_text(&header.text, header.x, header.y + HEADER_HEIGHT * 0.5)?;
    ctx.restore();
    Ok(())
}

fn draw_path(ctx: &CanvasRenderingContext2d, path: &DrawingPath) {
    let Some(first) = path.points.first() else {
        return;
    };
    ctx.save();
    ctx.set_stroke_style_str(&path.color);
    ctx.set_line_width(path.width);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");

    ctx.begin_path();
    ctx.move_to(first.x, first.y);
    for pt in &path.points[1..] {
        ctx.line_to(pt.x, pt.y);
    }
    ctx.stroke();
    ctx.restore();
}

// =============================================================
// Selection UI
// =============================================================

fn draw_selection_box(
    ctx: &CanvasRenderingContext2d,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    zoom: f64,
) -> Result<(), JsValue> {
    ctx.save();
    apply_selection_dash(ctx, zoom)?;
    ctx.stroke_rect(x - 2.0, y - 2.0, w + 4.0, h + 4.0);
    ctx.set_line_dash(&js_sys::Array::new())?;
    ctx.restore();
    Ok(())
}

fn draw_marquee(ctx: &CanvasRenderingContext2d, min: Point, max: Point, zoom: f64) -> Result<(), JsValue> {
    ctx.save();
    apply_selection_dash(ctx, zoom)?;
    ctx.set_fill_style_str("rgba(30, 144, 255, 0.12)");
    ctx.fill_rect(min.x, min.y, max.x - min.x, max.y - min.y);
    ctx.stroke_rect(min.x, min.y, max.x - min.x, max.y - min.y);
    ctx.set_line_dash(&js_sys::Array::new())?;
    ctx.restore();
    Ok(())
}

/// Dashed selection stroke whose dash length is constant in screen pixels.
fn apply_selection_dash(ctx: &CanvasRenderingContext2d, zoom: f64) -> Result<(), JsValue> {
    let dash_world = SELECTION_DASH_PX / zoom;
    let dash_array = js_sys::Array::new();
    dash_array.push(&dash_world.into());
    dash_array.push(&dash_world.into());
    ctx.set_line_dash(&dash_array)?;
    ctx.set_stroke_style_str(SELECTION_STROKE);
    ctx.set_line_width(1.0 / zoom);
    Ok(())
}

// =============================================================
// Helpers
// =============================================================

fn header_width(header: &CanvasHeader) -> f64 {
    (header.text.chars().count() as f64).max(1.0) * crate::consts::HEADER_CHAR_WIDTH
}

fn path_bounds(path: &DrawingPath) -> Option<(Point, Point)> {
    let first = path.points.first()?;
    let mut min = *first;
    let mut max = *first;
    for pt in &path.points[1..] {
        min.x = min.x.min(pt.x);
        min.y = min.y.min(pt.y);
        max.x = max.x.max(pt.x);
        max.y = max.y.max(pt.y);
    }
    Some((min, max))
}

fn rounded_rect_path(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
    let r = r.min(w * 0.5).min(h * 0.5);
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.line_to(x + w - r, y);
    ctx.quadratic_curve_to(x + w, y, x + w, y + r);
    ctx.line_to(x + w, y + h - r);
    ctx.quadratic_curve_to(x + w, y + h, x + w - r, y + h);
    ctx.line_to(x + r, y + h);
    ctx.quadratic_curve_to(x, y + h, x, y + h - r);
    ctx.line_to(x, y + r);
    ctx.quadratic_curve_to(x, y, x + r, y);
    ctx.close_path();
}

fn fit_text_with_ellipsis(ctx: &CanvasRenderingContext2d, text: &str, max_w: f64) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if measured_text_width(ctx, trimmed) <= max_w {
        return trimmed.to_owned();
    }

    let ellipsis = "...";
    let mut chars: Vec<char> = trimmed.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate = format!("{}{}", chars.iter().collect::<String>().trim_end(), ellipsis);
        if measured_text_width(ctx, &candidate) <= max_w {
            return candidate;
        }
    }
    ellipsis.to_owned()
}

fn measured_text_width(ctx: &CanvasRenderingContext2d, text: &str) -> f64 {
    match ctx.measure_text(text) {
        Ok(metrics) => metrics.width(),
        Err(_) => f64::INFINITY,
    }
}
