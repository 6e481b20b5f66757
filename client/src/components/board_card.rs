//! Reusable card component for board list items on the dashboard.

use leptos::prelude::*;
use uuid::Uuid;

/// A clickable card representing a board.
#[component]
pub fn BoardCard(
    id: Uuid,
    name: String,
    #[prop(optional)] created_at: Option<String>,
    #[prop(optional)] on_delete: Option<Callback<Uuid>>,
    #[prop(optional)] on_rename: Option<Callback<Uuid>>,
) -> impl IntoView {
    let href = format!("/board/{id}");
    let created_label = created_at.unwrap_or_default();
    let has_created = !created_label.is_empty();
    let on_delete_click = Callback::new(move |()| {
        if let Some(on_delete) = on_delete.as_ref() {
            on_delete.run(id);
        }
    });
    let on_rename_click = Callback::new(move |()| {
        if let Some(on_rename) = on_rename.as_ref() {
            on_rename.run(id);
        }
    });

    view! {
        <a class="board-card" href=href>
            <span class="board-card__name">{name}</span>
            <Show when=move || has_created>
                <span class="board-card__created">{created_label.clone()}</span>
            </Show>
            <span class="board-card__actions">
                <button
                    class="board-card__rename"
                    on:click=move |ev: leptos::ev::MouseEvent| {
                        ev.prevent_default();
                        ev.stop_propagation();
                        on_rename_click.run(());
                    }
                    title="Rename board"
                    aria-label="Rename board"
                >
                    "✎"
                </button>
                <button
                    class="board-card__delete"
                    on:click=move |ev: leptos::ev::MouseEvent| {
                        ev.prevent_default();
                        ev.stop_propagation();
                        on_delete_click.run(());
                    }
                    title="Delete board"
                    aria-label="Delete board"
                >
                    "✕"
                </button>
            </span>
        </a>
    }
}
