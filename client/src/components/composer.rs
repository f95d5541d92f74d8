//! Message input form, centered on the welcome screen and docked afterwards.

use leptos::prelude::*;

use crate::state::chat::ChatState;

const PLACEHOLDER: &str = "Pregúntame lo que quieras sobre Fermagri...";

/// Textarea + send button. Enter submits, Shift+Enter inserts a newline.
///
/// The text lives in `ChatState::input` so a failed send keeps it for retry.
#[component]
pub fn Composer(on_submit: Callback<String>) -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();

    let welcome = move || chat.with(|s| s.is_first_interaction);
    let can_send = move || chat.with(|s| !s.loading && !s.input.trim().is_empty());
    let submit = move || on_submit.run(chat.with_untracked(|s| s.input.clone()));

    view! {
        <form
            class="composer"
            class:composer--welcome=welcome
            on:submit=move |ev: leptos::ev::SubmitEvent| {
                ev.prevent_default();
                submit();
            }
        >
            <Show when=welcome>
                <h1 class="composer__title">"Orito"</h1>
            </Show>
            <div class="composer__box">
                <textarea
                    class="composer__input"
                    placeholder=PLACEHOLDER
                    autofocus=true
                    prop:value=move || chat.with(|s| s.input.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        chat.update(|s| s.input = value);
                    }
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() == "Enter" && !ev.shift_key() {
                            ev.prevent_default();
                            submit();
                        }
                    }
                ></textarea>
                <button type="submit" class="composer__send" title="Enviar" disabled=move || !can_send()>
                    "➤"
                </button>
            </div>
        </form>
    }
}
