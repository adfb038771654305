//! Route guard wiring.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route shares one guard: the rules live in `session::guard`, and this
//! module re-runs them whenever the session or the location changes.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};
use session::guard::{self, GuardDecision};
use session::Session;

/// Where `session` must be sent when it asks for `path`, if anywhere.
pub fn redirect_target(path: &str, session: &Session) -> Option<&'static str> {
    match guard::evaluate(path, session) {
        GuardDecision::Render => None,
        GuardDecision::Redirect(target) => Some(target),
    }
}

/// Navigate away whenever the guard rejects the current path.
pub fn install_route_guard<F>(session: RwSignal<Session>, pathname: Memo<String>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let path = pathname.get();
        let target = session.with(|s| redirect_target(&path, s));
        if let Some(target) = target {
            navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}

/// Installs the guard for the enclosing `<Router>`. Renders nothing.
#[component]
pub fn RouteGuard() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let location = use_location();
    install_route_guard(session, location.pathname, use_navigate());
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;
