//! Account-link page shown inside the LINE webview.
//!
//! SYSTEM CONTEXT
//! ==============
//! On mount the page initialises LIFF, tries to sign in with the LINE
//! identity and, if no account is linked yet, offers phone or invitation
//! token linking. All state lives in one `RwSignal<LinkFlow>`.

#[cfg(test)]
#[path = "link_test.rs"]
mod link_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::net::driver::LinkDriver;
use crate::state::flow::{FlowEvent, LinkFlow, LinkMethod, default_method, link_token_from_query};

fn dispatch(flow: RwSignal<LinkFlow>, event: FlowEvent) {
    flow.update(|state| *state = std::mem::take(state).next(event));
}

fn method_value(method: &LinkMethod) -> &str {
    match method {
        LinkMethod::Phone(value) | LinkMethod::Token(value) => value,
    }
}

fn with_value(method: &LinkMethod, value: String) -> LinkMethod {
    match method {
        LinkMethod::Phone(_) => LinkMethod::Phone(value),
        LinkMethod::Token(_) => LinkMethod::Token(value),
    }
}

/// Switch between phone and token entry, starting the new mode empty.
fn toggled(method: &LinkMethod) -> LinkMethod {
    match method {
        LinkMethod::Phone(_) => LinkMethod::Token(String::new()),
        LinkMethod::Token(_) => LinkMethod::Phone(String::new()),
    }
}

fn progress_text(flow: &LinkFlow) -> Option<&'static str> {
    match flow {
        LinkFlow::Initializing => Some("Starting LINE..."),
        LinkFlow::Authenticating => Some("Checking your LINE account..."),
        LinkFlow::Linking { .. } => Some("Linking your account..."),
        _ => None,
    }
}

#[component]
pub fn LinkPage() -> impl IntoView {
    let driver = expect_context::<LinkDriver>();
    let flow = RwSignal::new(LinkFlow::default());
    let location = use_location();
    let method = RwSignal::new(default_method(link_token_from_query(&location.search.get_untracked())));

    #[cfg(feature = "csr")]
    {
        let driver = driver.clone();
        leptos::task::spawn_local(async move {
            dispatch(flow, driver.initialize(crate::net::api::LIFF_ID).await);
            if matches!(flow.get_untracked(), LinkFlow::Authenticating) {
                dispatch(flow, driver.authenticate().await);
            }
        });
    }

    let submit_driver = driver.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if !flow.with_untracked(LinkFlow::accepts_link) {
            return;
        }
        let chosen = method.get_untracked();
        dispatch(flow, FlowEvent::LinkSubmitted(chosen.clone()));

        #[cfg(feature = "csr")]
        {
            let driver = submit_driver.clone();
            leptos::task::spawn_local(async move {
                dispatch(flow, driver.link(&chosen).await);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&submit_driver, chosen);
        }
    };

    let login_driver = driver.clone();
    let close_driver = driver;

    view! {
        <div class="link-page">
            <h1>"Link your FieldOps account"</h1>
            {move || progress_text(&flow.get()).map(|text| view! { <p class="link-page__progress">{text}</p> })}
            {move || match flow.get() {
                LinkFlow::NeedsLogin => {
                    let driver = login_driver.clone();
                    view! {
                        <button class="link-page__login" on:click=move |_| driver.login()>
                            "Log in with LINE"
                        </button>
                    }
                        .into_any()
                }
                LinkFlow::Unlinked { profile, error } => {
                    let greeting = profile
                        .map_or_else(|| "Hello!".to_owned(), |p| format!("Hello, {}!", p.display_name));
                    let is_phone = move || matches!(method.get(), LinkMethod::Phone(_));
                    view! {
                        <p class="link-page__greeting">{greeting}</p>
                        {error.map(|e| view! { <p class="link-page__error">{e}</p> })}
                        <form class="link-form" on:submit=on_submit.clone()>
                            <label>
                                {move || if is_phone() { "Phone number" } else { "Invitation code" }}
                                <input
                                    class="link-input"
                                    type=move || if is_phone() { "tel" } else { "text" }
                                    prop:value=move || method.with(|m| method_value(m).to_owned())
                                    on:input=move |ev| {
                                        let value = event_target_value(&ev);
                                        method.update(|m| *m = with_value(m, value));
                                    }
                                />
                            </label>
                            <button class="link-button" type="submit">"Link account"</button>
                        </form>
                        <button class="link-page__switch" on:click=move |_| method.update(|m| *m = toggled(m))>
                            {move || if is_phone() { "Use an invitation code instead" } else { "Use my phone number instead" }}
                        </button>
                    }
                        .into_any()
                }
                LinkFlow::Linked { user } => {
                    let driver = close_driver.clone();
                    view! {
                        <p class="link-page__done">{format!("Linked as {} ({})", user.name, user.role.label())}</p>
                        <button class="link-page__close" on:click=move |_| driver.close()>"Close"</button>
                    }
                        .into_any()
                }
                LinkFlow::Failed { message } => view! { <p class="link-page__error">{message}</p> }.into_any(),
                LinkFlow::Initializing | LinkFlow::Authenticating | LinkFlow::Linking { .. } => ().into_any(),
            }}
        </div>
    }
}
