//! Bridge component between Leptos state and the imperative `canvas::Engine`.
//!
//! ARCHITECTURE
//! ============
//! The canvas crate owns gesture and render logic; this host feeds it DOM
//! events, applies the actions it emits back to the AppState store, and
//! schedules debounced saves through the sync service.

use leptos::prelude::*;

use crate::app::StateContext;
#[cfg(feature = "hydrate")]
use crate::app::SyncContext;
#[cfg(feature = "hydrate")]
use crate::state::app_state::AppState;
use crate::state::ui::{ToolType, UiState};

#[cfg(feature = "hydrate")]
use std::cell::{Cell, RefCell};
#[cfg(feature = "hydrate")]
use std::rc::Rc;

#[cfg(feature = "hydrate")]
use canvas::camera::Point;
#[cfg(feature = "hydrate")]
use canvas::engine::{Action, Engine};
#[cfg(feature = "hydrate")]
use canvas::input::{Button, Key, Modifiers, Tool, WheelDelta};

#[cfg(feature = "hydrate")]
use crate::net::sync::SyncService;
#[cfg(feature = "hydrate")]
use crate::net::types::BoardContent;

#[cfg(feature = "hydrate")]
thread_local! {
    // Set while process_actions writes engine state back to the store, so
    // the store listener does not feed the same content into the engine.
    static APPLYING_LOCAL_EDIT: Cell<bool> = const { Cell::new(false) };
}

#[cfg(feature = "hydrate")]
fn map_tool(tool: ToolType) -> Tool {
    match tool {
        ToolType::Select => Tool::Select,
        ToolType::Pan => Tool::Pan,
        ToolType::Draw => Tool::Draw,
        ToolType::Header => Tool::Header,
    }
}

#[cfg(feature = "hydrate")]
fn map_button(button: i16) -> Button {
    match button {
        1 => Button::Middle,
        2 => Button::Secondary,
        _ => Button::Primary,
    }
}

#[cfg(feature = "hydrate")]
fn map_modifiers(ev_shift: bool, ev_ctrl: bool, ev_alt: bool, ev_meta: bool) -> Modifiers {
    Modifiers { shift: ev_shift, ctrl: ev_ctrl, alt: ev_alt, meta: ev_meta }
}

#[cfg(feature = "hydrate")]
fn pointer_point(ev: &leptos::ev::PointerEvent) -> Point {
    Point::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()))
}

#[cfg(feature = "hydrate")]
fn should_prevent_default_key(key: &str) -> bool {
    matches!(key, "Delete" | "Backspace" | "Escape")
}

#[cfg(feature = "hydrate")]
fn sync_viewport(engine: &mut Engine, canvas_ref: &NodeRef<leptos::html::Canvas>) {
    let Some(canvas) = canvas_ref.get_untracked() else {
        return;
    };
    let rect = canvas.get_bounding_client_rect();
    let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
    engine.set_viewport(rect.width(), rect.height(), dpr);
}

#[cfg(feature = "hydrate")]
fn render(engine: &Engine) {
    if let Err(err) = engine.render() {
        log::warn!("canvas render failed: {err:?}");
    }
}

#[cfg(feature = "hydrate")]
fn content_from_engine(engine: &Engine) -> BoardContent {
    BoardContent {
        folders: engine.core.doc.folders.clone(),
        canvas_headers: engine.core.doc.headers.clone(),
        drawing_paths: engine.core.doc.paths.clone(),
    }
}

#[cfg(feature = "hydrate")]
fn load_content(engine: &mut Engine, state: &AppState) {
    let Some(board_id) = state.current_board_id() else {
        return;
    };
    let content = state.board_content().unwrap_or_default();
    engine.load_board(
        board_id,
        content.folders,
        content.canvas_headers,
        content.drawing_paths,
    );
}

/// Write the engine's document back to the store and schedule a save.
#[cfg(feature = "hydrate")]
fn commit_edit(engine: &Engine, sync: &SyncService, reason: &str) {
    APPLYING_LOCAL_EDIT.with(|flag| flag.set(true));
    sync.state().set_board_content(&content_from_engine(engine));
    APPLYING_LOCAL_EDIT.with(|flag| flag.set(false));
    sync.save_after_action(reason);
}

#[cfg(feature = "hydrate")]
fn process_actions(
    actions: Vec<Action>,
    engine: &mut Engine,
    sync: &SyncService,
    ui: RwSignal<UiState>,
    canvas_ref: &NodeRef<leptos::html::Canvas>,
) {
    let mut needs_render = false;
    for action in actions {
        match action {
            Action::FolderMoved { .. } => commit_edit(engine, sync, "folder moved"),
            Action::HeaderMoved { .. } => commit_edit(engine, sync, "header moved"),
            Action::HeaderCreated(_) => {
                ui.update(|u| u.active_tool = ToolType::Select);
                commit_edit(engine, sync, "header created");
            }
            Action::PathDrawn(_) => commit_edit(engine, sync, "path drawn"),
            Action::EntityDeleted { .. } => commit_edit(engine, sync, "deleted"),
            Action::FolderOpenRequested { id } => {
                ui.update(|u| u.open_folder_id = Some(id));
            }
            Action::SetCursor(cursor) => {
                if let Some(canvas) = canvas_ref.get_untracked() {
                    let _ = canvas.style().set_property("cursor", &cursor);
                }
            }
            Action::SelectionChanged | Action::RenderNeeded => needs_render = true,
        }
    }
    if needs_render {
        render(engine);
    }
}

/// Canvas workspace host.
///
/// On hydration this mounts `canvas::engine::Engine` on the `<canvas>`
/// element, loads the current board's content, and keeps the engine in step
/// with the store and the active tool.
#[component]
pub fn CanvasHost() -> impl IntoView {
    let _app_state = expect_context::<StateContext>();
    let ui = expect_context::<RwSignal<UiState>>();
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    #[cfg(feature = "hydrate")]
    let engine = Rc::new(RefCell::new(None::<Engine>));
    #[cfg(feature = "hydrate")]
    let sync = expect_context::<SyncContext>().get_value();

    // Mount: create the engine once the canvas element exists.
    #[cfg(feature = "hydrate")]
    {
        let engine = Rc::clone(&engine);
        let state = _app_state.get_value();
        let canvas_ref_mount = canvas_ref;
        Effect::new(move || {
            let Some(canvas) = canvas_ref_mount.get() else {
                return;
            };
            if engine.borrow().is_some() {
                return;
            }

            let mut instance = Engine::new(canvas);
            sync_viewport(&mut instance, &canvas_ref_mount);
            instance.set_tool(map_tool(ui.get_untracked().active_tool));
            load_content(&mut instance, &state);
            render(&instance);
            *engine.borrow_mut() = Some(instance);

            // Feed later store updates (board load, extension bookmarks)
            // into the engine.
            let engine_for_store = Rc::clone(&engine);
            let state_for_store = state.clone();
            state.on_change(crate::state::app_state::keys::BOARD_CONTENT, move |_| {
                if APPLYING_LOCAL_EDIT.with(Cell::get) {
                    return;
                }
                if let Some(engine) = engine_for_store.borrow_mut().as_mut() {
                    load_content(engine, &state_for_store);
                    render(engine);
                }
            });
        });
    }

    // Tool and stroke color follow the toolbar.
    #[cfg(feature = "hydrate")]
    {
        let engine = Rc::clone(&engine);
        Effect::new(move || {
            let ui_state = ui.get();
            if let Some(engine) = engine.borrow_mut().as_mut() {
                engine.set_tool(map_tool(ui_state.active_tool));
                if !ui_state.stroke_color.is_empty() {
                    engine.set_stroke_color(ui_state.stroke_color.clone());
                }
                render(engine);
            }
        });
    }

    let on_pointer_down = {
        #[cfg(feature = "hydrate")]
        {
            let engine = Rc::clone(&engine);
            let sync = sync.clone();
            move |ev: leptos::ev::PointerEvent| {
                ev.prevent_default();
                if let Some(canvas) = canvas_ref.get() {
                    let _ = canvas.focus();
                    let _ = canvas.set_pointer_capture(ev.pointer_id());
                }
                if let Some(engine) = engine.borrow_mut().as_mut() {
                    sync_viewport(engine, &canvas_ref);
                    let point = pointer_point(&ev);
                    let button = map_button(ev.button());
                    let modifiers =
                        map_modifiers(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key());
                    let actions = engine.on_pointer_down(point, button, modifiers);
                    process_actions(actions, engine, &sync, ui, &canvas_ref);
                    render(engine);
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_move = {
        #[cfg(feature = "hydrate")]
        {
            let engine = Rc::clone(&engine);
            let sync = sync.clone();
            move |ev: leptos::ev::PointerEvent| {
                if let Some(engine) = engine.borrow_mut().as_mut() {
                    let point = pointer_point(&ev);
                    let modifiers =
                        map_modifiers(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key());
                    let actions = engine.on_pointer_move(point, modifiers);
                    let had_actions = !actions.is_empty();
                    process_actions(actions, engine, &sync, ui, &canvas_ref);
                    if had_actions {
                        render(engine);
                    }
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_up = {
        #[cfg(feature = "hydrate")]
        {
            let engine = Rc::clone(&engine);
            let sync = sync.clone();
            move |ev: leptos::ev::PointerEvent| {
                if let Some(canvas) = canvas_ref.get() {
                    let _ = canvas.release_pointer_capture(ev.pointer_id());
                }
                if let Some(engine) = engine.borrow_mut().as_mut() {
                    let point = pointer_point(&ev);
                    let button = map_button(ev.button());
                    let modifiers =
                        map_modifiers(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key());
                    let actions = engine.on_pointer_up(point, button, modifiers);
                    process_actions(actions, engine, &sync, ui, &canvas_ref);
                    if let Some(canvas) = canvas_ref.get() {
                        let _ = canvas.style().set_property("cursor", "default");
                    }
                    render(engine);
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_wheel = {
        #[cfg(feature = "hydrate")]
        {
            let engine = Rc::clone(&engine);
            let sync = sync.clone();
            move |ev: leptos::ev::WheelEvent| {
                ev.prevent_default();
                if let Some(engine) = engine.borrow_mut().as_mut() {
                    sync_viewport(engine, &canvas_ref);
                    let point = Point::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()));
                    let delta = WheelDelta { dx: ev.delta_x(), dy: ev.delta_y() };
                    let modifiers =
                        map_modifiers(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key());
                    let actions = engine.on_wheel(point, delta, modifiers);
                    process_actions(actions, engine, &sync, ui, &canvas_ref);
                    render(engine);
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::WheelEvent| {}
        }
    };

    let on_key_down = {
        #[cfg(feature = "hydrate")]
        {
            let engine = Rc::clone(&engine);
            let sync = sync.clone();
            move |ev: leptos::ev::KeyboardEvent| {
                let key = ev.key();
                if should_prevent_default_key(&key) {
                    ev.prevent_default();
                }
                if let Some(engine) = engine.borrow_mut().as_mut() {
                    let modifiers =
                        map_modifiers(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key());
                    let actions = engine.on_key_down(Key(key), modifiers);
                    process_actions(actions, engine, &sync, ui, &canvas_ref);
                    render(engine);
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::KeyboardEvent| {}
        }
    };

    view! {
        <canvas
            node_ref=canvas_ref
            class="board-canvas"
            tabindex="0"
            on:pointerdown=on_pointer_down
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_up
            on:wheel=on_wheel
            on:keydown=on_key_down
        ></canvas>
    }
}
