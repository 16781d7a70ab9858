//! To-Do Board App
//!
//! Router and role selection. The role is read from the path once per
//! navigation and handed down as a prop.

use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::hooks::use_location;
use leptos_router::path;

use crate::components::TodoBoard;
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::role::Role;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    provide_context(AppContext::new(config));

    view! {
        <Router>
            <div class="app-shell">
                <Routes fallback=|| view! { <Redirect path=Role::default().path() /> }>
                    <Route path=path!("/developer") view=RoleView />
                    <Route path=path!("/manager") view=RoleView />
                </Routes>
            </div>
        </Router>
    }
}

/// Derives the role from the current location
#[component]
fn RoleView() -> impl IntoView {
    let location = use_location();
    let role = Memo::new(move |_| Role::from_path(&location.pathname.get()));

    Effect::new(move |_| {
        log::info!("Active role: {}", role.get());
    });

    view! { <TodoBoard role=role /> }
}
