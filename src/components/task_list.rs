//! Task List Component
//!
//! Owns the list store. Refreshes on mount, whenever `refresh_trigger`
//! changes and on a fixed interval; mirrors confirmed mutations locally
//! between refreshes.

use std::time::Duration;

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api::TaskApi;
use crate::components::TaskRow;
use crate::context::{timeout, use_app_context};
use crate::models::TaskId;
use crate::mutations;
use crate::role::Role;
use crate::store::{flash_message, TaskListState, TaskListStateStoreFields};

const LOAD_FAILED: &str = "Could not load tasks. Please try again later.";
const UPDATE_FAILED: &str = "Could not update the task. Please try again.";
const SAVE_FAILED: &str = "Could not save the task. Please try again.";
const DELETE_FAILED: &str = "Could not delete the task. Please try again.";

/// Grace period before re-reading the list after a delete
const DELETE_SETTLE: Duration = Duration::from_millis(500);

#[component]
pub fn TaskList(
    #[prop(into)] role: Signal<Role>,
    refresh_trigger: ReadSignal<u32>,
) -> impl IntoView {
    let ctx = use_app_context();
    let state = Store::new(TaskListState::default());

    // Writes go through try_update: once the view is disposed, late
    // responses and timers land on nothing.
    let report = move |message: &'static str| {
        spawn_local(async move {
            flash_message(&state, message, ctx.error_clear_timer()).await;
        });
    };

    let refresh = move || {
        let Some(ticket) = state.try_with_untracked(|s| s.begin_fetch()) else {
            return;
        };
        spawn_local(async move {
            match ctx.api().try_list_tasks().await {
                Ok(tasks) => {
                    let count = tasks.len();
                    let now_millis = Utc::now().timestamp_millis();
                    match state.try_update(|s| s.apply_fetch(ticket, tasks, now_millis)) {
                        Some(true) => log::debug!("Loaded {} tasks", count),
                        Some(false) => log::debug!("Dropped stale fetch of {} tasks", count),
                        None => log::debug!("List view disposed; fetch dropped"),
                    }
                }
                Err(e) => {
                    log::error!("Error fetching tasks: {}", e);
                    report(LOAD_FAILED);
                }
            }
        });
    };

    Effect::new(move |_| {
        let trigger = refresh_trigger.get();
        log::debug!("Refreshing tasks, trigger={}", trigger);
        refresh();
    });

    match set_interval_with_handle(refresh, ctx.poll_interval()) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(e) => log::error!("Could not start polling: {:?}", e),
    }

    let on_toggle = Callback::new(move |id: TaskId| {
        let role = role.get_untracked();
        // Current record, so a toggle right after a patch flips the patched state
        let Some(task) = state.try_with_untracked(|s| s.task(&id).cloned()).flatten() else {
            return;
        };
        spawn_local(async move {
            let api = ctx.api();
            match mutations::toggle_status(&api, role, &task, Utc::now()).await {
                Ok(Some(mutation)) => {
                    state.try_update(|s| s.apply(mutation));
                }
                Ok(None) => {}
                Err(_) => report(UPDATE_FAILED),
            }
        });
    });

    let on_save = Callback::new(move |id: TaskId| {
        let role = role.get_untracked();
        let Some(session) = state.with_untracked(|s| s.editing.clone().filter(|e| e.id == id)) else {
            return;
        };
        spawn_local(async move {
            let api = ctx.api();
            let outcome = mutations::save_edit(&api, role, &session).await;
            let failed = outcome.is_err();
            // The editor closes either way; a failure only adds the message
            state.try_update(|s| {
                if let Ok(Some(mutation)) = outcome {
                    s.apply(mutation);
                }
                s.finish_editing(&session.id);
            });
            if failed {
                report(SAVE_FAILED);
            }
        });
    });

    let on_delete = Callback::new(move |id: TaskId| {
        let role = role.get_untracked();
        spawn_local(async move {
            let api = ctx.api();
            match mutations::remove_task(&api, role, &id).await {
                Ok(Some(mutation)) => {
                    state.try_update(|s| s.apply(mutation));
                    timeout(DELETE_SETTLE).await;
                    refresh();
                }
                Ok(None) => {}
                Err(_) => report(DELETE_FAILED),
            }
        });
    });

    view! {
        <div class="task-list">
            {move || state.error().with(|f| f.message().map(|m| view! { <p class="list-error">{m.to_string()}</p> }))}
            <For
                each=move || state.tasks().get()
                key=|task| {
                    // Every rendered field, so a patched task re-renders
                    (
                        task.unique_key.clone(),
                        task.title.clone(),
                        task.description.clone(),
                        task.done,
                        task.completed_date,
                    )
                }
                children=move |task| {
                    view! {
                        <TaskRow
                            task=task
                            role=role
                            state=state
                            on_toggle=on_toggle
                            on_save=on_save
                            on_delete=on_delete
                        />
                    }
                }
            />
        </div>
    }
}
