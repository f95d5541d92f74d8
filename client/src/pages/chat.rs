//! Chat screen: conversation lifecycle, sending, feedback, history wiring.
//!
//! SYSTEM CONTEXT
//! ==============
//! This page is the single source of truth for the active conversation. It
//! provides `RwSignal<ChatState>` and `RwSignal<UiState>` to its children and
//! turns their callbacks into the drivers in `chat_actions`, spawned on the
//! browser event loop.

use leptos::prelude::*;

use crate::components::composer::Composer;
use crate::components::conversation_toolbar::ConversationToolbar;
use crate::components::history_panel::HistoryPanel;
use crate::components::message_list::MessageList;
use crate::components::sidebar::Sidebar;
use crate::components::system_message_panel::SystemMessagePanel;
use crate::net::api::ApiClient;
use crate::net::types::ConversationId;
use crate::pages::chat_actions;
use crate::state::chat::{ChatState, MessageKey};
use crate::state::ui::{Capabilities, UiState};
use crate::util::task::spawn;

/// Full chat screen with system message, export and clear.
#[component]
pub fn ChatPage() -> impl IntoView {
    view! { <ChatScreen capabilities=Capabilities::full()/> }
}

/// Plain chat screen without the optional conversation tools.
#[component]
pub fn BasicChatPage() -> impl IntoView {
    view! { <ChatScreen capabilities=Capabilities::basic()/> }
}

/// The chat screen, configured by a capability set.
#[component]
pub fn ChatScreen(#[prop(default = Capabilities::full())] capabilities: Capabilities) -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let chat = RwSignal::new(ChatState::default());
    let ui = RwSignal::new(UiState::default());
    provide_context(chat);
    provide_context(ui);

    // Effects only run in the browser, so SSR markup never carries a
    // server-generated conversation id.
    Effect::new(move || {
        chat.update(|s| {
            s.ensure_conversation_id();
        });
    });

    let on_send = Callback::new({
        let api = api.clone();
        move |text: String| {
            let api = api.clone();
            spawn(async move { chat_actions::send_message(&api, &chat, &text).await });
        }
    });

    let on_load = Callback::new({
        let api = api.clone();
        move |id: ConversationId| {
            let api = api.clone();
            spawn(async move { chat_actions::load_conversation(&api, &chat, id).await });
        }
    });

    let on_feedback = Callback::new({
        let api = api.clone();
        move |(key, is_positive): (MessageKey, bool)| {
            let api = api.clone();
            spawn(async move { chat_actions::send_feedback(&api, &chat, key, is_positive).await });
        }
    });

    let on_clear = Callback::new({
        let api = api.clone();
        move |()| {
            let api = api.clone();
            spawn(async move { chat_actions::clear_conversation(&api, &chat).await });
        }
    });

    let on_save_system_message = Callback::new({
        let api = api.clone();
        move |()| {
            let api = api.clone();
            spawn(async move {
                chat_actions::update_system_message(&api, &chat, &ui).await;
            });
        }
    });

    let on_export = Callback::new(move |()| {
        chat_actions::export_conversation(&api, &chat);
    });

    let on_new = Callback::new(move |()| chat.update(ChatState::start_new_conversation));
    let on_home = Callback::new(move |()| chat.update(ChatState::go_to_home_page));

    let current_id = Signal::derive(move || chat.with(|s| s.conversation_id.clone()));

    view! {
        <div class="chat-screen">
            <Sidebar on_home=on_home on_new=on_new/>
            <HistoryPanel on_select=on_load current_id=current_id/>
            <main class="chat-main" class:chat-main--welcome=move || chat.with(|s| s.is_first_interaction)>
                {capabilities
                    .any()
                    .then(|| {
                        view! {
                            <ConversationToolbar capabilities=capabilities on_export=on_export on_clear=on_clear/>
                        }
                    })}
                {capabilities
                    .system_message
                    .then(|| view! { <SystemMessagePanel on_save=on_save_system_message/> })}
                <MessageList on_feedback=on_feedback/>
                <Composer on_submit=on_send/>
            </main>
        </div>
    }
}
