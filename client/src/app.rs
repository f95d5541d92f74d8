//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::net::api::ApiClient;
use crate::pages::chat::{BasicChatPage, ChatPage};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="es">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the backend client and sets up client-side routing: `/` is the
/// full chat screen, `/basic` the plain one.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(ApiClient::default());

    view! {
        <Title text="Orito"/>

        <Router>
            <Routes fallback=|| "Página no encontrada.".into_view()>
                <Route path=StaticSegment("") view=ChatPage/>
                <Route path=StaticSegment("basic") view=BasicChatPage/>
            </Routes>
        </Router>
    }
}
