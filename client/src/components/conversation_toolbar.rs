//! Optional conversation actions: system message, export, clear.

use leptos::prelude::*;

use crate::state::ui::{Capabilities, UiState};

/// Buttons for whichever optional features the screen was built with.
#[component]
pub fn ConversationToolbar(capabilities: Capabilities, on_export: Callback<()>, on_clear: Callback<()>) -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    view! {
        <div class="conversation-toolbar">
            {capabilities
                .system_message
                .then(|| {
                    view! {
                        <button
                            class="btn conversation-toolbar__system"
                            class:btn--active=move || ui.with(|u| u.show_system_message)
                            on:click=move |_| ui.update(UiState::toggle_system_message)
                        >
                            "Mensaje del sistema"
                        </button>
                    }
                })}
            {capabilities
                .export
                .then(|| {
                    view! {
                        <button class="btn conversation-toolbar__export" on:click=move |_| on_export.run(())>
                            "Exportar"
                        </button>
                    }
                })}
            {capabilities
                .clear
                .then(|| {
                    view! {
                        <button class="btn conversation-toolbar__clear" on:click=move |_| on_clear.run(())>
                            "Limpiar conversación"
                        </button>
                    }
                })}
        </div>
    }
}
