//! Left navigation rail: home, new conversation, history toggle.

use leptos::prelude::*;

use crate::components::history_trigger::HistoryTrigger;

#[component]
pub fn Sidebar(on_home: Callback<()>, on_new: Callback<()>) -> impl IntoView {
    view! {
        <nav class="sidebar">
            <button class="sidebar__logo" title="Ir al inicio" on:click=move |_| on_home.run(())>
                "Orito"
            </button>
            <button class="sidebar__button" title="Nueva conversación" on:click=move |_| on_new.run(())>
                "+"
            </button>
            <span class="sidebar__spacer"></span>
            <HistoryTrigger/>
        </nav>
    }
}
