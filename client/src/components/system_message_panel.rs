//! Editor for the conversation's system message.

use leptos::prelude::*;

use crate::state::chat::ChatState;
use crate::state::ui::UiState;

/// Inline editor shown while `UiState::show_system_message` is set.
///
/// Saving is delegated to `on_save`; the panel only closes itself on cancel.
#[component]
pub fn SystemMessagePanel(on_save: Callback<()>) -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let ui = expect_context::<RwSignal<UiState>>();

    view! {
        <Show when=move || ui.with(|u| u.show_system_message)>
            <div class="system-message">
                <label class="system-message__label">
                    "Mensaje del sistema"
                    <textarea
                        class="system-message__input"
                        prop:value=move || chat.with(|s| s.system_message.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            chat.update(|s| s.system_message = value);
                        }
                    ></textarea>
                </label>
                <div class="system-message__actions">
                    <button class="btn" on:click=move |_| ui.update(UiState::close_system_message)>
                        "Cancelar"
                    </button>
                    <button class="btn btn--primary" on:click=move |_| on_save.run(())>
                        "Guardar"
                    </button>
                </div>
            </div>
        </Show>
    }
}
