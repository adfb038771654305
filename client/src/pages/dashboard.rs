//! Dashboard landing page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Authenticated users land here after sign-in. The page greets the user and
//! links to every section their role may open.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use session::guard::{self, RouteRule};
use session::Session;
use wire::Role;

use crate::state::auth::{current_user, display_name};

/// Section shortcuts for `role`, excluding the landing page itself.
fn section_links(role: Role) -> Vec<&'static RouteRule> {
    guard::visible_routes(role).filter(|rule| rule.path != guard::LANDING_PATH).collect()
}

fn greeting(session: &Session) -> String {
    match current_user(session) {
        Some(user) => format!("Welcome back, {}", display_name(user)),
        None => "Welcome".to_owned(),
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();

    let heading = move || session.with(greeting);
    let role_label = move || session.with(|s| s.role().map(Role::label).unwrap_or_default());
    let links = move || session.with(|s| s.role().map(section_links).unwrap_or_default());

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header">
                <h1>{heading}</h1>
                <span class="dashboard-page__role">{role_label}</span>
            </header>
            <ul class="dashboard-page__sections">
                {move || {
                    links()
                        .into_iter()
                        .map(|rule| {
                            view! {
                                <li class="dashboard-card">
                                    <a href=rule.path>{rule.title}</a>
                                </li>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </ul>
        </div>
    }
}
