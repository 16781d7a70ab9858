//! UI Components
//!
//! Leptos components for the board.

mod new_task_form;
mod task_board;
mod task_editor;
mod task_list;
mod task_row;

pub use new_task_form::NewTaskForm;
pub use task_board::TodoBoard;
pub use task_editor::TaskEditor;
pub use task_list::TaskList;
pub use task_row::TaskRow;
