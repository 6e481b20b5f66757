//! Root application component with routing and context providers.
//!
//! DESIGN
//! ======
//! The observable [`AppState`] store is the source of truth; the root
//! component mirrors its well-known keys into `RwSignal`s so views stay
//! reactive, and hands the store and sync service to children through
//! `StoredValue::new_local` contexts (both hold `Rc` internals and live on
//! the browser main thread only).

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::net::sync::SyncService;
use crate::net::types::{BoardContent, BoardSummary};
use crate::pages::{board::BoardPage, dashboard::DashboardPage};
use crate::state::app_state::{AppState, keys};
use crate::state::ui::{SyncStatus, Toast, UiState};

/// Context handle for the shared store.
pub type StateContext = StoredValue<AppState, LocalStorage>;
/// Context handle for the sync service.
pub type SyncContext = StoredValue<SyncService, LocalStorage>;

/// Default ink color for new strokes.
pub const DEFAULT_STROKE_COLOR: &str = "#1F1A17";

/// Root application component.
///
/// Provides all shared contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let app_state = AppState::new();
    let sync = SyncService::new(app_state.clone());

    let ui = RwSignal::new(UiState {
        stroke_color: DEFAULT_STROKE_COLOR.to_owned(),
        ..UiState::default()
    });
    let boards = RwSignal::new(Vec::<BoardSummary>::new());
    let board_content = RwSignal::new(None::<BoardContent>);
    let sync_status = RwSignal::new(SyncStatus::Idle);
    let toast = RwSignal::new(None::<Toast>);

    // Mirror store keys into signals so views re-render on store writes.
    app_state.on_change(keys::BOARDS, move |value| {
        if let Ok(list) = serde_json::from_value::<Vec<BoardSummary>>(value.clone()) {
            boards.set(list);
        }
    });
    app_state.on_change(keys::BOARD_CONTENT, move |value| {
        if let Ok(content) = serde_json::from_value::<BoardContent>(value.clone()) {
            board_content.set(Some(content));
        }
    });
    app_state.on_change(keys::SYNC_STATUS, move |value| {
        if let Ok(status) = serde_json::from_value::<SyncStatus>(value.clone()) {
            sync_status.set(status);
        }
    });
    app_state.on_change(keys::TOAST, move |value| {
        if let Ok(t) = serde_json::from_value::<Toast>(value.clone()) {
            toast.set(Some(t));
        }
    });

    provide_context(ui);
    provide_context(boards);
    provide_context(board_content);
    provide_context(sync_status);
    provide_context(toast);
    provide_context::<StateContext>(StoredValue::new_local(app_state.clone()));
    provide_context::<SyncContext>(StoredValue::new_local(sync.clone()));

    let dark = crate::util::dark_mode::read_preference();
    crate::util::dark_mode::apply(dark);
    ui.update(|u| u.dark_mode = dark);

    // The server settings document carries the dark-mode preference across
    // browsers; localStorage remains the fast path for the first paint.
    #[cfg(feature = "hydrate")]
    {
        app_state.on_change(keys::SETTINGS, move |value| {
            if let Some(dark) = value.get("dark_mode").and_then(serde_json::Value::as_bool) {
                crate::util::dark_mode::apply(dark);
                ui.update(|u| u.dark_mode = dark);
            }
        });

        let settings_loaded = RwSignal::new(false);
        let sync_for_load = sync.clone();
        leptos::task::spawn_local(async move {
            sync_for_load.load_settings().await;
            settings_loaded.set(true);
        });

        let sync_for_save = sync.clone();
        let state_for_save = app_state.clone();
        Effect::new(move || {
            if !settings_loaded.get() {
                return;
            }
            let dark = ui.with(|u| u.dark_mode);
            let stored = state_for_save
                .settings()
                .and_then(|v| v.get("dark_mode").and_then(serde_json::Value::as_bool));
            if stored == Some(dark) {
                return;
            }
            let sync = sync_for_save.clone();
            leptos::task::spawn_local(async move {
                sync.save_settings(serde_json::json!({ "dark_mode": dark })).await;
            });
        });
    }

    crate::bridge::extension::install(&sync);

    view! {
        <Stylesheet id="leptos" href="/pkg/zenban.css"/>
        <Title text="Zenban"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=DashboardPage/>
                <Route path=(StaticSegment("board"), ParamSegment("id")) view=BoardPage/>
            </Routes>
        </Router>
    }
}
