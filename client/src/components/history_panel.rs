//! Side panel listing saved conversations with load and delete actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! The panel owns its conversation list and refetches it each time it becomes
//! visible. Selecting an entry hands the id back to the chat screen through
//! `on_select`; deleting only edits the panel's own list, so removing the
//! open conversation leaves the chat view as it is.

use leptos::prelude::*;

use crate::net::api::ApiClient;
use crate::net::types::{ConversationId, ConversationSummary};
use crate::pages::chat_actions::{delete_conversation, refresh_history};
use crate::state::history::{DELETE_CONFIRM_MESSAGE, DELETE_ERROR_MESSAGE, HistoryState};
use crate::state::ui::UiState;
use crate::util::browser;
use crate::util::task::spawn;
use crate::util::timestamp::format_timestamp;

const UNTITLED: &str = "Sin título";

/// History panel; renders nothing while hidden.
#[component]
pub fn HistoryPanel(
    on_select: Callback<ConversationId>,
    #[prop(into)] current_id: Signal<Option<ConversationId>>,
) -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let api = expect_context::<ApiClient>();
    let history = RwSignal::new(HistoryState::default());

    let visible = Memo::new(move |_| ui.with(|u| u.show_history));

    let fetch_api = api.clone();
    Effect::new(move || {
        if !visible.get() {
            return;
        }
        history.update(HistoryState::begin_fetch);
        let api = fetch_api.clone();
        spawn(async move { refresh_history(&api, &history).await });
    });

    let select = Callback::new(move |id: ConversationId| {
        on_select.run(id);
        ui.update(UiState::close_history);
    });

    let delete = Callback::new(move |id: ConversationId| {
        if !browser::confirm(DELETE_CONFIRM_MESSAGE) {
            return;
        }
        let api = api.clone();
        spawn(async move {
            if delete_conversation(&api, &history, id).await.is_err() {
                browser::alert(DELETE_ERROR_MESSAGE);
            }
        });
    });

    view! {
        <Show when=move || visible.get()>
            <aside class="history-panel">
                <div class="history-panel__header">
                    <h3 class="history-panel__title">"Historial"</h3>
                    <button
                        class="history-panel__close"
                        title="Cerrar"
                        on:click=move |_| ui.update(UiState::close_history)
                    >
                        "✕"
                    </button>
                </div>
                <div class="history-panel__body">
                    {move || {
                        let state = history.get();
                        if state.loading {
                            return view! { <div class="history-panel__status">"Cargando..."</div> }.into_any();
                        }
                        if let Some(error) = state.error {
                            return view! {
                                <div class="history-panel__status history-panel__status--error">{error}</div>
                            }
                                .into_any();
                        }
                        if state.items.is_empty() {
                            return view! {
                                <div class="history-panel__status">"No hay conversaciones guardadas"</div>
                            }
                                .into_any();
                        }
                        let current = current_id.get();
                        view! {
                            <ul class="history-panel__list">
                                {state
                                    .items
                                    .into_iter()
                                    .map(|item| {
                                        let active = current.as_ref() == Some(&item.conversation_id);
                                        view! {
                                            <HistoryEntry item=item active=active on_select=select on_delete=delete/>
                                        }
                                    })
                                    .collect::<Vec<_>>()}
                            </ul>
                        }
                            .into_any()
                    }}
                </div>
            </aside>
        </Show>
    }
}

/// One saved conversation row.
#[component]
fn HistoryEntry(
    item: ConversationSummary,
    active: bool,
    on_select: Callback<ConversationId>,
    on_delete: Callback<ConversationId>,
) -> impl IntoView {
    let select_id = item.conversation_id.clone();
    let delete_id = item.conversation_id;
    let title = item.title.unwrap_or_else(|| UNTITLED.to_owned());
    let updated = item.updated_at.as_deref().map(format_timestamp).unwrap_or_default();

    view! {
        <li
            class="history-entry"
            class:history-entry--active=active
            on:click=move |_| on_select.run(select_id.clone())
        >
            <div class="history-entry__text">
                <span class="history-entry__title">{title}</span>
                <span class="history-entry__date">{updated}</span>
            </div>
            <div class="history-entry__actions">
                <button
                    class="history-entry__delete"
                    on:click=move |ev: leptos::ev::MouseEvent| {
                        ev.stop_propagation();
                        on_delete.run(delete_id.clone());
                    }
                >
                    "Eliminar"
                </button>
            </div>
        </li>
    }
}
