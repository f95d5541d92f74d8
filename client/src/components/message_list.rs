//! Scrollable chat transcript with feedback buttons on assistant replies.

use leptos::prelude::*;

use crate::state::chat::{ChatMessage, ChatState, Feedback, MessageKey, Sender};
use crate::util::markdown::render_reply_html;

/// Message list bound to the chat state context.
///
/// Scrolls to the newest entry whenever messages or the typing indicator
/// change.
#[component]
pub fn MessageList(on_feedback: Callback<(MessageKey, bool)>) -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let list_ref = NodeRef::<leptos::html::Div>::new();

    Effect::new(move || {
        let _ = chat.with(|s| (s.messages.len(), s.loading));

        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = list_ref.get() {
                el.set_scroll_top(el.scroll_height());
            }
        }
    });

    view! {
        <div
            class="message-list"
            class:message-list--welcome=move || chat.with(|s| s.is_first_interaction)
            node_ref=list_ref
        >
            {move || {
                chat.with(|s| {
                    s.messages
                        .iter()
                        .map(|message| view! { <MessageBubble message=message.clone() on_feedback=on_feedback/> })
                        .collect::<Vec<_>>()
                })
            }}
            <Show when=move || chat.with(|s| s.loading)>
                <div class="message-list__typing">"Escribiendo..."</div>
            </Show>
        </div>
    }
}

#[component]
fn MessageBubble(message: ChatMessage, on_feedback: Callback<(MessageKey, bool)>) -> impl IntoView {
    let key = message.key;
    let sender = message.sender;
    let is_user = sender == Sender::User;
    let locked = !message.accepts_feedback();
    let chosen = message.feedback;

    let body = if is_user {
        view! { <div class="message__text">{message.text}</div> }.into_any()
    } else {
        let rendered = render_reply_html(&message.text);
        view! { <div class="message__text message__markdown" inner_html=rendered></div> }.into_any()
    };

    view! {
        <div class="message" class:message--user=is_user class:message--ai=!is_user data-sender=sender.as_str()>
            {body}
            {(!is_user)
                .then(|| {
                    view! {
                        <div class="message__feedback">
                            <button
                                class="message__rate"
                                class:message__rate--chosen=chosen == Some(Feedback::Positive)
                                title="Me gusta esta respuesta"
                                disabled=locked
                                on:click=move |_| on_feedback.run((key, true))
                            >
                                "👍"
                            </button>
                            <button
                                class="message__rate"
                                class:message__rate--chosen=chosen == Some(Feedback::Negative)
                                title="No me gusta esta respuesta"
                                disabled=locked
                                on:click=move |_| on_feedback.run((key, false))
                            >
                                "👎"
                            </button>
                        </div>
                    }
                })}
        </div>
    }
}
