//! Top navigation bar with role-filtered links and the sign-out action.

#[cfg(test)]
#[path = "nav_bar_test.rs"]
mod nav_bar_test;

use leptos::prelude::*;
use session::guard::{self, RouteRule};
use session::{Session, SessionStore};
use wire::Role;

use crate::state::auth::{current_user, display_name};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Identity {
    name: String,
    role: &'static str,
    initials: String,
}

fn identity(session: &Session) -> Option<Identity> {
    let user = current_user(session)?;
    let name = display_name(user).to_owned();
    Some(Identity { initials: initials(&name), role: user.role.label(), name })
}

fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    if letters.is_empty() { "?".to_owned() } else { letters }
}

fn nav_links(role: Option<Role>) -> Vec<&'static RouteRule> {
    role.map(|role| guard::visible_routes(role).collect()).unwrap_or_default()
}

/// Hidden until a user is signed in.
#[component]
pub fn NavBar() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let store = StoredValue::new(expect_context::<SessionStore>());
    let signing_out = RwSignal::new(false);

    let on_logout = move |_| {
        if signing_out.get() {
            return;
        }
        signing_out.set(true);
        #[cfg(feature = "csr")]
        {
            let store = store.get_value();
            leptos::task::spawn_local(async move {
                store.logout().await;
                signing_out.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = &store;
            signing_out.set(false);
        }
    };

    view! {
        <Show when=move || session.with(|s| s.role().is_some())>
            <nav class="nav-bar">
                <a class="nav-bar__brand" href=guard::LANDING_PATH>"FieldOps"</a>
                <ul class="nav-bar__links">
                    {move || {
                        nav_links(session.with(Session::role))
                            .into_iter()
                            .map(|rule| view! { <li><a href=rule.path>{rule.title}</a></li> })
                            .collect::<Vec<_>>()
                    }}
                </ul>
                {move || {
                    session.with(identity).map(|me| {
                        view! {
                            <div class="nav-bar__identity">
                                <span class="nav-bar__avatar">{me.initials}</span>
                                <span class="nav-bar__name">{me.name}</span>
                                <span class="nav-bar__role">{me.role}</span>
                            </div>
                        }
                    })
                }}
                <button class="nav-bar__logout" on:click=on_logout disabled=move || signing_out.get()>
                    "Sign Out"
                </button>
            </nav>
        </Show>
    }
}
