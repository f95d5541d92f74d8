//! Sidebar button that shows or hides the conversation history panel.

use leptos::prelude::*;

use crate::state::ui::UiState;

/// Toggle for the history panel. Visibility is the only state it touches.
#[component]
pub fn HistoryTrigger() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    view! {
        <button
            class="sidebar__button history-trigger"
            class:history-trigger--active=move || ui.with(|u| u.show_history)
            title="Historial de conversaciones"
            aria-label="Historial de conversaciones"
            on:click=move |_| ui.update(UiState::toggle_history)
        >
            "🕘"
        </button>
    }
}
