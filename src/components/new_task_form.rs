//! New Task Form Component

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::mutations::{self, SubmitOutcome};
use crate::store::{flash_message, Flash};

/// Title/description form. Field state is owned by the board.
#[component]
pub fn NewTaskForm(
    title: RwSignal<String>,
    description: RwSignal<String>,
    error: RwSignal<Flash>,
    #[prop(into)] on_created: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();

    let add_task = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = title.get_untracked();
        let details = description.get_untracked();

        spawn_local(async move {
            let api = ctx.api();
            let outcome =
                SubmitOutcome::from_result(mutations::create_task(&api, &text, &details, Utc::now()).await);
            // None: the form was disposed while the request was in flight
            let settled = title.try_update(|t| description.try_update(|d| outcome.settle(t, d)));
            match settled.flatten() {
                Some(None) => {
                    error.try_update(|f| f.dismiss());
                    on_created.run(());
                }
                Some(Some(message)) => {
                    flash_message(&error, message, ctx.error_clear_timer()).await;
                }
                None => {}
            }
        });
    };

    view! {
        <form class="new-task-form" on:submit=add_task>
            <input
                type="text"
                placeholder="Add a new task title"
                prop:value=move || title.get()
                on:input=move |ev| title.set(event_target_value(&ev))
            />
            <textarea
                placeholder="Add a description"
                prop:value=move || description.get()
                on:input=move |ev| description.set(event_target_value(&ev))
            ></textarea>
            <button type="submit">"Add Task"</button>
            {move || error.with(|f| f.message().map(|m| view! { <p class="form-error">{m.to_string()}</p> }))}
        </form>
    }
}
