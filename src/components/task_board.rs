//! Todo Board Component
//!
//! Page shell: heading, role switch, creation form and the task list.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::{NewTaskForm, TaskList};
use crate::role::Role;
use crate::store::Flash;

#[component]
pub fn TodoBoard(#[prop(into)] role: Signal<Role>) -> impl IntoView {
    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let error = RwSignal::new(Flash::default());
    let (refresh_trigger, set_refresh_trigger) = signal(0u32);

    let navigate = use_navigate();
    let switch_role = move |_| {
        let next = role.get_untracked().toggled();
        navigate(next.path(), Default::default());
    };

    let on_created = Callback::new(move |_: ()| {
        set_refresh_trigger.update(|v| *v += 1);
    });

    view! {
        <div class="todo-board">
            <div class="board-header">
                <h1>"To-Do List"</h1>
                <button class="role-switch" on:click=switch_role>
                    {move || format!("{} view · switch to {}", role.get().label(), role.get().toggled().label())}
                </button>
            </div>

            <Show when=move || role.get().permissions().create>
                <NewTaskForm
                    title=title
                    description=description
                    error=error
                    on_created=on_created
                />
            </Show>

            <TaskList role=role refresh_trigger=refresh_trigger />
        </div>
    }
}
