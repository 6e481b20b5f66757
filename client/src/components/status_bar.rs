//! Status bar showing sync state and transient toasts.

use leptos::prelude::*;

use crate::state::ui::{SyncStatus, Toast, ToastKind};

/// Status strip pinned below the canvas.
#[component]
pub fn StatusBar() -> impl IntoView {
    let sync_status = expect_context::<RwSignal<SyncStatus>>();
    let toast = expect_context::<RwSignal<Option<Toast>>>();

    // Toasts expire after a few seconds.
    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        if toast.get().is_some() {
            gloo_timers::callback::Timeout::new(4000, move || {
                toast.set(None);
            })
            .forget();
        }
    });

    view! {
        <footer class="status-bar">
            <span
                class="status-bar__sync"
                class:status-bar__sync--offline=move || sync_status.get() == SyncStatus::Offline
            >
                {move || sync_status.get().label()}
            </span>
            <Show when=move || toast.get().is_some()>
                <span
                    class="status-bar__toast"
                    class:status-bar__toast--error=move || {
                        toast.get().is_some_and(|t| t.kind == ToastKind::Error)
                    }
                >
                    {move || toast.get().map(|t| t.message).unwrap_or_default()}
                </span>
            </Show>
        </footer>
    }
}
