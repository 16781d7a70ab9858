//! Task Row Component
//!
//! One task, with controls gated by the active role. Swaps to the inline
//! editor while this task's edit session is open.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::TaskEditor;
use crate::models::{Task, TaskId};
use crate::role::Role;
use crate::store::{TaskListState, TaskListStateStoreFields};

#[component]
pub fn TaskRow(
    task: Task,
    #[prop(into)] role: Signal<Role>,
    state: Store<TaskListState>,
    on_toggle: Callback<TaskId>,
    on_save: Callback<TaskId>,
    on_delete: Callback<TaskId>,
) -> impl IntoView {
    let id = task.id.clone();
    let editing_id = id.clone();
    // Memo so buffer keystrokes don't rebuild the editor
    let is_editing = Memo::new(move |_| {
        state
            .editing()
            .with(|e| matches!((e, &editing_id), (Some(s), Some(id)) if &s.id == id))
    });

    move || {
        if is_editing.get() {
            match id.clone() {
                Some(id) => view! { <TaskEditor id=id state=state on_save=on_save /> }.into_any(),
                None => ().into_any(),
            }
        } else {
            task_summary(task.clone(), role, state, on_toggle, on_delete).into_any()
        }
    }
}

fn task_summary(
    task: Task,
    role: Signal<Role>,
    state: Store<TaskListState>,
    on_toggle: Callback<TaskId>,
    on_delete: Callback<TaskId>,
) -> impl IntoView {
    let done = task.done;
    let has_id = task.id.is_some();
    let can_toggle = move || role.get().permissions().toggle;
    let can_edit = move || has_id && role.get().permissions().edit;
    let can_delete = move || has_id && role.get().permissions().delete;

    let status_class = move || {
        if can_toggle() { "task-status clickable" } else { "task-status" }
    };
    let title_class = if done { "task-title done" } else { "task-title" };
    let description_class = if done { "task-description done" } else { "task-description" };

    let toggle_id = task.id.clone();
    let edit_task = task.clone();
    let delete_id = task.id.clone();

    view! {
        <div class="task-row">
            <div
                class=status_class
                on:click=move |_| {
                    if let Some(id) = toggle_id.clone().filter(|_| can_toggle()) {
                        on_toggle.run(id);
                    }
                }
            >
                <span class="status-icon">{if done { "☑" } else { "☐" }}</span>
                <p class=title_class>{task.title.clone()}</p>
            </div>

            <Show when=can_edit>
                <button
                    class="edit-btn"
                    on:click={
                        let edit_task = edit_task.clone();
                        move |_| {
                            state.update(|s| {
                                s.start_editing(&edit_task);
                            });
                        }
                    }
                >
                    "Edit"
                </button>
            </Show>

            <p class=description_class>{task.description.clone()}</p>
            <p class="task-timestamp">{task.timestamp_label()}</p>

            <Show when=can_delete>
                <button
                    class="delete-btn"
                    on:click={
                        let delete_id = delete_id.clone();
                        move |_| {
                            if let Some(id) = delete_id.clone() {
                                on_delete.run(id);
                            }
                        }
                    }
                >
                    "Delete"
                </button>
            </Show>
        </div>
    }
}
