//! Route table and access rules for the dashboard.
//!
//! Redirects are soft: an unauthenticated visitor goes to the login page, an
//! authenticated user without the required role goes back to the landing
//! page. The guard tracks no in-flight state of its own.

use wire::Role;

use crate::state::Session;

pub const LOGIN_PATH: &str = "/login";
pub const LANDING_PATH: &str = "/dashboard";

const MANAGEMENT: &[Role] = &[Role::Admin, Role::Manager];
const SUPERVISORS: &[Role] = &[Role::Admin, Role::Manager, Role::TeamLeader];

/// A guarded page and the roles allowed to open it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteRule {
    pub path: &'static str,
    pub title: &'static str,
    /// `None` means any authenticated user.
    pub roles: Option<&'static [Role]>,
}

impl RouteRule {
    #[must_use]
    pub fn allows(&self, role: Role) -> bool {
        self.roles.map_or(true, |roles| roles.contains(&role))
    }

    fn matches(&self, path: &str) -> bool {
        path == self.path
            || path
                .strip_prefix(self.path)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Every authenticated page, in navigation order.
pub const ROUTES: &[RouteRule] = &[
    RouteRule { path: LANDING_PATH, title: "Dashboard", roles: None },
    RouteRule { path: "/tasks", title: "Tasks", roles: None },
    RouteRule { path: "/submissions", title: "Submissions", roles: None },
    RouteRule { path: "/teams", title: "Teams", roles: Some(SUPERVISORS) },
    RouteRule { path: "/users", title: "Users", roles: Some(MANAGEMENT) },
];

/// Outcome of evaluating a navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(&'static str),
}

/// Rule governing `path`, including nested paths such as `/tasks/42`.
#[must_use]
pub fn rule_for(path: &str) -> Option<&'static RouteRule> {
    let path = normalize(path);
    ROUTES.iter().find(|rule| rule.matches(path))
}

/// Decide whether `session` may view `path`.
#[must_use]
pub fn evaluate(path: &str, session: &Session) -> GuardDecision {
    let path = normalize(path);
    let Some(role) = session.role() else {
        return if path == LOGIN_PATH { GuardDecision::Render } else { GuardDecision::Redirect(LOGIN_PATH) };
    };

    if path == LOGIN_PATH || path == "/" {
        return GuardDecision::Redirect(LANDING_PATH);
    }
    match rule_for(path) {
        Some(rule) if !rule.allows(role) => GuardDecision::Redirect(LANDING_PATH),
        _ => GuardDecision::Render,
    }
}

/// Routes `role` may open, for building navigation.
pub fn visible_routes(role: Role) -> impl Iterator<Item = &'static RouteRule> {
    ROUTES.iter().filter(move |rule| rule.allows(role))
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;
