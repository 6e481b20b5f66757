//! Browser-extension bookmark bridge.
//!
//! DESIGN
//! ======
//! The companion extension hands bookmarks to the app two ways: a
//! `postMessage` to the page, and a localStorage write observed via the
//! `storage` event. Both paths carry the same JSON payload and converge on
//! [`insert_bookmark`], which appends to the active card's first section
//! (creating an "Inbox" folder/card/section when the board has none).
//!
//! A short duplicate window absorbs the extension firing both channels for
//! the same capture. Screenshots are run through the byte budget in
//! [`super::image`] before insertion.

#[cfg(test)]
#[path = "extension_test.rs"]
mod extension_test;

use serde::Deserialize;
use uuid::Uuid;

use canvas::doc::{Bookmark, Card, EntityId, Folder, Section};

use crate::net::types::BoardContent;
#[cfg(feature = "hydrate")]
use crate::net::sync::SyncService;
#[cfg(feature = "hydrate")]
use crate::state::ui::Toast;

/// Payloads closer together than this are treated as the same capture
/// arriving on both channels.
const DUPLICATE_WINDOW_MS: f64 = 100.0;

/// The `type` tag the extension stamps on its messages.
const MESSAGE_TYPE: &str = "zenban_bookmark";

/// Bookmark capture as sent by the extension.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BookmarkPayload {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub screenshot: Option<String>,
    pub timestamp: i64,
}

/// Parse an extension message, rejecting anything without the expected
/// `type` tag. Pages receive arbitrary `postMessage` traffic.
#[must_use]
pub fn parse_payload(raw: &serde_json::Value) -> Option<BookmarkPayload> {
    if raw.get("type").and_then(serde_json::Value::as_str) != Some(MESSAGE_TYPE) {
        return None;
    }
    serde_json::from_value(raw.clone()).ok()
}

/// Rejects payloads arriving within [`DUPLICATE_WINDOW_MS`] of the last
/// accepted one.
#[derive(Debug, Default)]
pub struct DuplicateGuard {
    last_accepted_ms: Option<f64>,
}

impl DuplicateGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an arrival at `now_ms`; returns `false` if it falls inside
    /// the duplicate window of the previous accepted arrival.
    pub fn accept(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last_accepted_ms {
            if now_ms - last < DUPLICATE_WINDOW_MS {
                return false;
            }
        }
        self.last_accepted_ms = Some(now_ms);
        true
    }
}

/// Append `payload` as a bookmark to `content`, returning the id of the
/// card that received it.
///
/// Target resolution: the active card's first section when `active_card_id`
/// names a card that still exists; otherwise the first folder's first
/// card's first section; otherwise a fresh "Inbox" folder/card/section.
/// Cards and sections missing a section get one created in place.
pub fn insert_bookmark(
    content: &mut BoardContent,
    board_id: EntityId,
    active_card_id: Option<EntityId>,
    payload: &BookmarkPayload,
) -> EntityId {
    let bookmark = Bookmark {
        id: Uuid::new_v4(),
        title: payload.title.clone(),
        url: payload.url.clone(),
        description: payload.description.clone(),
        screenshot: payload.screenshot.clone(),
        timestamp: payload.timestamp,
    };

    if let Some(card_id) = active_card_id {
        if let Some(card) = find_card_mut(content, card_id) {
            push_to_first_section(card, bookmark);
            return card_id;
        }
    }

    if let Some(card) = content
        .folders
        .iter_mut()
        .find_map(|f| f.cards.first_mut())
    {
        let card_id = card.id;
        push_to_first_section(card, bookmark);
        return card_id;
    }

    // Empty board: create an inbox to land in.
    let mut folder = Folder::new(board_id, "Inbox", 40.0, 40.0);
    let card = Card {
        id: Uuid::new_v4(),
        title: "Inbox".to_owned(),
        content: String::new(),
        sections: vec![Section {
            id: Uuid::new_v4(),
            name: "Bookmarks".to_owned(),
            bookmarks: vec![bookmark],
        }],
    };
    let card_id = card.id;
    folder.cards.push(card);
    content.folders.push(folder);
    card_id
}

fn find_card_mut(content: &mut BoardContent, card_id: EntityId) -> Option<&mut Card> {
    content
        .folders
        .iter_mut()
        .flat_map(|f| f.cards.iter_mut())
        .find(|c| c.id == card_id)
}

fn push_to_first_section(card: &mut Card, bookmark: Bookmark) {
    if card.sections.is_empty() {
        card.sections.push(Section {
            id: Uuid::new_v4(),
            name: "Bookmarks".to_owned(),
            bookmarks: Vec::new(),
        });
    }
    card.sections[0].bookmarks.push(bookmark);
}

/// Handle one accepted payload: budget the screenshot, mutate the current
/// board content in the store, toast, and schedule a save.
#[cfg(feature = "hydrate")]
async fn deliver(sync: SyncService, mut payload: BookmarkPayload) {
    let state = sync.state();
    let Some(board_id) = state.current_board_id() else {
        return;
    };

    if let Some(shot) = payload.screenshot.take() {
        payload.screenshot = super::image::budget_screenshot(&shot).await;
    }

    let Some(mut content) = state.board_content() else {
        return;
    };
    let active_card = state.active_card_id();
    insert_bookmark(&mut content, board_id, active_card, &payload);
    state.set_board_content(&content);
    state.push_toast(Toast::info(format!("Bookmarked: {}", payload.title)));
    sync.save_after_action("bookmark");
}

/// Wire the `message` and `storage` listeners. Browser only.
pub fn install(sync: &crate::net::sync::SyncService) {
    #[cfg(feature = "hydrate")]
    {
        use std::cell::RefCell;
        use std::rc::Rc;

        use wasm_bindgen::JsCast;
        use wasm_bindgen::closure::Closure;

        let Some(window) = web_sys::window() else {
            return;
        };
        let guard = Rc::new(RefCell::new(DuplicateGuard::new()));

        let on_message = {
            let sync = sync.clone();
            let guard = Rc::clone(&guard);
            Closure::<dyn FnMut(web_sys::MessageEvent)>::new(move |ev: web_sys::MessageEvent| {
                let Ok(raw) = serde_wasm_value(&ev.data()) else {
                    return;
                };
                handle_raw(&sync, &guard, &raw);
            })
        };
        let _ = window
            .add_event_listener_with_callback("message", on_message.as_ref().unchecked_ref());
        on_message.forget();

        let on_storage = {
            let sync = sync.clone();
            let guard = Rc::clone(&guard);
            Closure::<dyn FnMut(web_sys::StorageEvent)>::new(move |ev: web_sys::StorageEvent| {
                if ev.key().as_deref() != Some("zenban_pending_bookmark") {
                    return;
                }
                let Some(raw) = ev
                    .new_value()
                    .and_then(|v| serde_json::from_str::<serde_json::Value>(&v).ok())
                else {
                    return;
                };
                handle_raw(&sync, &guard, &raw);
            })
        };
        let _ = window
            .add_event_listener_with_callback("storage", on_storage.as_ref().unchecked_ref());
        on_storage.forget();
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = sync;
    }
}

#[cfg(feature = "hydrate")]
fn handle_raw(
    sync: &SyncService,
    guard: &std::rc::Rc<std::cell::RefCell<DuplicateGuard>>,
    raw: &serde_json::Value,
) {
    let Some(payload) = parse_payload(raw) else {
        return;
    };
    let now = js_sys::Date::now();
    if !guard.borrow_mut().accept(now) {
        log::debug!("duplicate bookmark payload dropped");
        return;
    }
    wasm_bindgen_futures::spawn_local(deliver(sync.clone(), payload));
}

#[cfg(feature = "hydrate")]
fn serde_wasm_value(value: &wasm_bindgen::JsValue) -> Result<serde_json::Value, String> {
    let raw = js_sys::JSON::stringify(value)
        .map_err(|_| "unstringifiable message".to_owned())?;
    let raw: String = raw.into();
    serde_json::from_str(&raw).map_err(|e| e.to_string())
}
