//! Folder contents dialog: cards, sections, and their bookmarks.

use leptos::prelude::*;
use uuid::Uuid;

use canvas::doc::{Card, Folder};

use crate::app::StateContext;
use crate::net::types::BoardContent;
use crate::state::ui::UiState;

/// Modal dialog for the folder named in `ui.open_folder_id`.
///
/// The "receive here" action marks one card as the target for extension
/// bookmark captures.
#[component]
pub fn FolderDialog() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let board_content = expect_context::<RwSignal<Option<BoardContent>>>();
    let app_state = expect_context::<StateContext>();

    let open_folder = Memo::new(move |_| {
        let folder_id = ui.get().open_folder_id?;
        board_content
            .get()?
            .folders
            .into_iter()
            .find(|f| f.id == folder_id)
    });

    let active_card_id = RwSignal::new(None::<Uuid>);
    Effect::new(move || {
        // Refresh from the store whenever the dialog opens.
        if ui.get().open_folder_id.is_some() {
            active_card_id.set(app_state.get_value().active_card_id());
        }
    });

    let on_close = Callback::new(move |()| {
        ui.update(|u| u.open_folder_id = None);
    });
    let on_pick_card = Callback::new(move |card_id: Uuid| {
        app_state.get_value().set_active_card_id(Some(card_id));
        active_card_id.set(Some(card_id));
    });

    view! {
        <Show when=move || open_folder.get().is_some()>
            <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
                <div class="dialog dialog--folder" on:click=move |ev| ev.stop_propagation()>
                    <h2>{move || open_folder.get().map(|f| f.title).unwrap_or_default()}</h2>
                    {move || {
                        open_folder
                            .get()
                            .map(|folder| folder_body(&folder, active_card_id, on_pick_card))
                    }}
                    <div class="dialog__actions">
                        <button class="btn" on:click=move |_| on_close.run(())>
                            "Close"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

fn folder_body(
    folder: &Folder,
    active_card_id: RwSignal<Option<Uuid>>,
    on_pick_card: Callback<Uuid>,
) -> impl IntoView + use<> {
    if folder.cards.is_empty() {
        return view! { <p class="dialog__empty">"No cards yet."</p> }.into_any();
    }
    folder
        .cards
        .iter()
        .map(|card| card_view(card, active_card_id, on_pick_card))
        .collect::<Vec<_>>()
        .into_any()
}

fn card_view(
    card: &Card,
    active_card_id: RwSignal<Option<Uuid>>,
    on_pick_card: Callback<Uuid>,
) -> impl IntoView + use<> {
    let card_id = card.id;
    let sections = card
        .sections
        .iter()
        .map(|section| {
            let bookmarks = section
                .bookmarks
                .iter()
                .map(|bookmark| {
                    let screenshot = bookmark.screenshot.clone();
                    view! {
                        <li class="card__bookmark">
                            <a href=bookmark.url.clone() target="_blank" rel="noopener">
                                {bookmark.title.clone()}
                            </a>
                            <Show when={
                                let has = screenshot.is_some();
                                move || has
                            }>
                                <img
                                    class="card__bookmark-shot"
                                    src=screenshot.clone().unwrap_or_default()
                                    alt=""
                                />
                            </Show>
                            <p class="card__bookmark-desc">{bookmark.description.clone()}</p>
                        </li>
                    }
                })
                .collect::<Vec<_>>();
            view! {
                <div class="card__section">
                    <h4>{section.name.clone()}</h4>
                    <ul>{bookmarks}</ul>
                </div>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <div class="card" class:card--active=move || active_card_id.get() == Some(card_id)>
            <div class="card__header">
                <h3>{card.title.clone()}</h3>
                <button
                    class="btn card__receive"
                    on:click=move |_| on_pick_card.run(card_id)
                    title="Send extension bookmarks to this card"
                >
                    "Receive here"
                </button>
            </div>
            <p class="card__content">{card.content.clone()}</p>
            {sections}
        </div>
    }
}
