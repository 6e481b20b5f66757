//! Board toolbar: tool selection, stroke color, dark mode.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::ui::{ToolType, UiState};

const TOOLS: [ToolType; 4] = [ToolType::Select, ToolType::Pan, ToolType::Draw, ToolType::Header];

/// Toolbar shown above the canvas workspace.
#[component]
pub fn Toolbar(board_name: Signal<String>) -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let navigate = use_navigate();

    let on_back = move |_| {
        navigate("/", NavigateOptions::default());
    };

    view! {
        <header class="toolbar">
            <button class="btn toolbar__back" on:click=on_back title="Back to boards">
                "←"
            </button>
            <span class="toolbar__board-name">{board_name}</span>
            <span class="toolbar__divider" aria-hidden="true"></span>

            {TOOLS
                .into_iter()
                .map(|tool| {
                    view! {
                        <button
                            class="btn toolbar__tool"
                            class:toolbar__tool--active=move || ui.get().active_tool == tool
                            on:click=move |_| ui.update(|u| u.active_tool = tool)
                        >
                            {tool.label()}
                        </button>
                    }
                })
                .collect::<Vec<_>>()}

            <input
                class="toolbar__color"
                type="color"
                prop:value=move || ui.get().stroke_color.clone()
                on:input=move |ev| {
                    ui.update(|u| u.stroke_color = event_target_value(&ev));
                }
                title="Stroke color"
            />

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
    }
}
