//! Board page — the interactive canvas workspace shell.
//!
//! ARCHITECTURE
//! ============
//! Route-level coordinator between the URL board identity and the store:
//! it resolves the `:id` parameter, asks the sync service to load that
//! board's content, and composes the toolbar, canvas host, folder dialog,
//! and status bar.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use uuid::Uuid;

use crate::app::SyncContext;
use crate::components::canvas_host::CanvasHost;
use crate::components::folder_dialog::FolderDialog;
use crate::components::status_bar::StatusBar;
use crate::components::toolbar::Toolbar;
use crate::net::types::BoardSummary;

/// Board page — composes the workspace around the canvas host. Reads the
/// board ID from the route parameter and loads its content on mount.
#[component]
pub fn BoardPage() -> impl IntoView {
    let boards = expect_context::<RwSignal<Vec<BoardSummary>>>();
    let _sync = expect_context::<SyncContext>();
    let params = use_params_map();

    let board_id = Memo::new(move |_| {
        params
            .read()
            .get("id")
            .and_then(|raw| Uuid::parse_str(&raw).ok())
    });

    #[cfg(feature = "hydrate")]
    {
        let loaded_for = RwSignal::new(None::<Uuid>);
        Effect::new(move || {
            let Some(id) = board_id.get() else {
                return;
            };
            if loaded_for.get_untracked() == Some(id) {
                return;
            }
            loaded_for.set(Some(id));
            let sync = _sync.get_value();
            leptos::task::spawn_local(async move {
                sync.load_board_content(id).await;
                // The dashboard list may be absent after a hard navigation.
                if sync.state().boards().is_empty() {
                    sync.load_boards().await;
                }
            });
        });
    }

    let board_name = Signal::derive(move || {
        let Some(id) = board_id.get() else {
            return String::new();
        };
        boards
            .get()
            .into_iter()
            .find(|b| b.id == id)
            .map_or_else(|| "Untitled".to_owned(), |b| b.name)
    });

    view! {
        <div class="board-page">
            <Toolbar board_name=board_name/>
            <main class="board-page__canvas">
                <CanvasHost/>
            </main>
            <FolderDialog/>
            <StatusBar/>
        </div>
    }
}
