//! Root component for the LIFF mini-app.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::net::driver::LinkDriver;
use crate::pages::link::LinkPage;

/// Root application component.
///
/// Provides the link driver and routes the LIFF endpoint URL to the link page.
#[component]
pub fn App(driver: LinkDriver) -> impl IntoView {
    provide_meta_context();
    provide_context(driver);

    view! {
        <Title text="FieldOps for LINE"/>

        <Router>
            <Routes fallback=|| view! { <LinkPage/> }>
                <Route path=StaticSegment("") view=LinkPage/>
            </Routes>
        </Router>
    }
}
