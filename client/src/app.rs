//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};
use session::ApiConfig;

use crate::components::nav_bar::NavBar;
use crate::net::api::build_session_store;
use crate::pages::{dashboard::DashboardPage, login::LoginPage, section::SectionPage};
use crate::state::auth::provide_session;
use crate::util::guard::RouteGuard;

/// Root application component.
///
/// Restores the persisted session, re-verifies it against the backend once
/// at startup, and guards every route.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let store = build_session_store(ApiConfig::from_build_env());
    provide_session(store.clone());

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        store.check_auth().await;
    });
    #[cfg(not(feature = "csr"))]
    let _ = store;

    view! {
        <Title text="FieldOps"/>

        <Router>
            <RouteGuard/>
            <NavBar/>
            <main class="app-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("") view=DashboardPage/>
                    <Route path=StaticSegment("dashboard") view=DashboardPage/>
                    <Route path=StaticSegment("tasks") view=|| view! { <SectionPage path="/tasks"/> }/>
                    <Route path=StaticSegment("submissions") view=|| view! { <SectionPage path="/submissions"/> }/>
                    <Route path=StaticSegment("teams") view=|| view! { <SectionPage path="/teams"/> }/>
                    <Route path=StaticSegment("users") view=|| view! { <SectionPage path="/users"/> }/>
                </Routes>
            </main>
        </Router>
    }
}
