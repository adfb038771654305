//! Placeholder screen for guarded sections (tasks, submissions, teams, users).

#[cfg(test)]
#[path = "section_test.rs"]
mod section_test;

use leptos::prelude::*;
use session::guard;

fn section_title(path: &str) -> &'static str {
    guard::rule_for(path).map_or("FieldOps", |rule| rule.title)
}

/// Shell for a section whose content is loaded from the backend.
#[component]
pub fn SectionPage(path: &'static str) -> impl IntoView {
    let title = section_title(path);
    view! {
        <div class="section-page">
            <h1>{title}</h1>
            <p class="section-page__empty">"Nothing to show yet."</p>
        </div>
    }
}
