//! Task Editor Component
//!
//! Inline title/description editor bound to the list's edit buffers.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::TaskId;
use crate::store::{TaskListState, TaskListStateStoreFields};

#[component]
pub fn TaskEditor(
    id: TaskId,
    state: Store<TaskListState>,
    on_save: Callback<TaskId>,
) -> impl IntoView {
    let title = move || {
        state
            .editing()
            .with(|e| e.as_ref().map(|s| s.title.clone()).unwrap_or_default())
    };
    let description = move || {
        state
            .editing()
            .with(|e| e.as_ref().map(|s| s.description.clone()).unwrap_or_default())
    };

    view! {
        <div class="task-editor">
            <input
                type="text"
                autofocus=true
                prop:value=title
                on:input=move |ev| state.update(|s| s.set_edit_title(event_target_value(&ev)))
            />
            <textarea
                prop:value=description
                on:input=move |ev| state.update(|s| s.set_edit_description(event_target_value(&ev)))
            ></textarea>
            <div class="editor-actions">
                <button class="save-btn" on:click=move |_| on_save.run(id.clone())>
                    "Save"
                </button>
                <button class="cancel-btn" on:click=move |_| state.update(|s| s.cancel_editing())>
                    "Cancel"
                </button>
            </div>
        </div>
    }
}
