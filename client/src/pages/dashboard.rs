//! Dashboard page listing boards with create, rename, and delete actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the landing route. It loads the board inventory through the sync
//! service on mount and coordinates the create -> navigate flow.

use leptos::prelude::*;
use uuid::Uuid;

#[cfg(feature = "hydrate")]
use crate::app::StateContext;
use crate::app::SyncContext;
use crate::components::board_card::BoardCard;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::status_bar::StatusBar;
use crate::net::types::BoardSummary;
use crate::state::ui::UiState;

/// Dashboard page — shows the board grid and a create-board dialog.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let boards = expect_context::<RwSignal<Vec<BoardSummary>>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let _sync = expect_context::<SyncContext>();

    // Load the board list once on mount.
    #[cfg(feature = "hydrate")]
    {
        let state = expect_context::<StateContext>();
        Effect::new(move || {
            state.get_value().set_current_board_id(None);
            let sync = _sync.get_value();
            leptos::task::spawn_local(async move {
                sync.load_boards().await;
            });
        });
    }

    let show_create = RwSignal::new(false);
    let new_board_name = RwSignal::new(String::new());
    let delete_board_id = RwSignal::new(None::<Uuid>);
    let rename_board_id = RwSignal::new(None::<Uuid>);
    let rename_board_name = RwSignal::new(String::new());

    let on_create_open = move |_| {
        new_board_name.set(String::new());
        show_create.set(true);
    };
    let on_create_cancel = Callback::new(move |()| show_create.set(false));

    let on_create_submit = Callback::new(move |()| {
        let name = new_board_name.get().trim().to_owned();
        if name.is_empty() {
            return;
        }
        show_create.set(false);
        #[cfg(feature = "hydrate")]
        {
            let sync = _sync.get_value();
            leptos::task::spawn_local(async move {
                sync.create_board(&name).await;
                if let Some(id) = sync.state().current_board_id() {
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href(&format!("/board/{id}"));
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = name;
        }
    });

    let on_delete_request = Callback::new(move |id: Uuid| delete_board_id.set(Some(id)));
    let on_delete_cancel = Callback::new(move |()| delete_board_id.set(None));
    let on_delete_confirm = Callback::new(move |()| {
        let Some(id) = delete_board_id.get() else {
            return;
        };
        delete_board_id.set(None);
        #[cfg(feature = "hydrate")]
        {
            let sync = _sync.get_value();
            leptos::task::spawn_local(async move {
                sync.delete_board(id).await;
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = id;
        }
    });

    let on_rename_request = Callback::new(move |id: Uuid| {
        let current = boards
            .get_untracked()
            .into_iter()
            .find(|b| b.id == id)
            .map(|b| b.name)
            .unwrap_or_default();
        rename_board_name.set(current);
        rename_board_id.set(Some(id));
    });
    let on_rename_cancel = Callback::new(move |()| rename_board_id.set(None));
    let on_rename_submit = Callback::new(move |()| {
        let Some(id) = rename_board_id.get() else {
            return;
        };
        let name = rename_board_name.get().trim().to_owned();
        if name.is_empty() {
            return;
        }
        rename_board_id.set(None);
        #[cfg(feature = "hydrate")]
        {
            let sync = _sync.get_value();
            leptos::task::spawn_local(async move {
                sync.update_board_name(id, &name).await;
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (id, name);
        }
    });

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header toolbar">
                <span class="toolbar__board-name">"Boards"</span>
                <span class="toolbar__divider" aria-hidden="true"></span>
                <button class="btn toolbar__new-board" on:click=on_create_open>
                    "+ New Board"
                </button>

                <span class="toolbar__spacer"></span>

                <button
                    class="btn toolbar__dark-toggle"
                    on:click=move |_| {
                        let current = ui.get().dark_mode;
                        let next = crate::util::dark_mode::toggle(current);
                        ui.update(|u| u.dark_mode = next);
                    }
                    title="Toggle dark mode"
                >
                    {move || if ui.get().dark_mode { "☀" } else { "☾" }}
                </button>
            </header>

            <div class="dashboard-page__grid">
                <Show
                    when=move || !boards.get().is_empty()
                    fallback=move || view! { <p class="dashboard-page__empty">"No boards yet."</p> }
                >
                    <div class="dashboard-page__cards">
                        {move || {
                            boards
                                .get()
                                .into_iter()
                                .map(|b| {
                                    view! {
                                        <BoardCard
                                            id=b.id
                                            name=b.name
                                            created_at=b.created_at.unwrap_or_default()
                                            on_delete=on_delete_request
                                            on_rename=on_rename_request
                                        />
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </div>
                </Show>
            </div>

            <Show when=move || show_create.get()>
                <NameDialog
                    title="Create Board"
                    confirm_label="Create"
                    name=new_board_name
                    on_submit=on_create_submit
                    on_cancel=on_create_cancel
                />
            </Show>
            <Show when=move || rename_board_id.get().is_some()>
                <NameDialog
                    title="Rename Board"
                    confirm_label="Rename"
                    name=rename_board_name
                    on_submit=on_rename_submit
                    on_cancel=on_rename_cancel
                />
            </Show>
            <Show when=move || delete_board_id.get().is_some()>
                <ConfirmDialog
                    title="Delete Board"
                    message="This removes the board and everything on it.".to_owned()
                    confirm_label="Delete"
                    on_confirm=on_delete_confirm
                    on_cancel=on_delete_cancel
                />
            </Show>

            <StatusBar/>
        </div>
    }
}

/// Modal dialog asking for a board name.
#[component]
fn NameDialog(
    title: &'static str,
    confirm_label: &'static str,
    name: RwSignal<String>,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>{title}</h2>
                <label class="dialog__label">
                    "Board Name"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| {
                            name.set(event_target_value(&ev));
                        }
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                on_submit.run(());
                            }
                        }
                    />
                </label>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" on:click=move |_| on_submit.run(())>
                        {confirm_label}
                    </button>
                </div>
            </div>
        </div>
    }
}
