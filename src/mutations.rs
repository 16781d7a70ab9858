//! Task Mutations
//!
//! Role check, remote call, then the local mutation to mirror. A role that
//! may not perform an action resolves to `Ok(None)` without touching the
//! network. Failures are logged here, at the call site, before the UI turns
//! them into a transient message.

use chrono::{DateTime, Utc};

use crate::api::TaskApi;
use crate::error::{TaskError, TaskResult};
use crate::models::{NewTask, Task, TaskId, TaskPatch};
use crate::role::Role;
use crate::store::{EditSession, Mutation};

pub const MISSING_FIELDS: &str = "Both title and description are required.";
pub const CREATE_FAILED: &str = "Could not add the task. Please try again.";

/// Presence check for the creation form. Whitespace-only counts as
/// missing; accepted text is sent exactly as typed.
pub fn validate_new_task(title: &str, description: &str, now: DateTime<Utc>) -> TaskResult<NewTask> {
    if title.trim().is_empty() || description.trim().is_empty() {
        return Err(TaskError::Validation(MISSING_FIELDS.to_string()));
    }
    Ok(NewTask::new(title, description, now))
}

pub async fn create_task<A: TaskApi + ?Sized>(
    api: &A,
    title: &str,
    description: &str,
    now: DateTime<Utc>,
) -> TaskResult<()> {
    let draft = validate_new_task(title, description, now)?;
    api.create_task(&draft)
        .await
        .inspect(|_| log::info!("Created task {:?}", draft.title))
        .inspect_err(|e| log::error!("Error adding task: {}", e))
}

/// What a create submission means for the form
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created,
    Invalid(String),
    Failed,
}

impl SubmitOutcome {
    pub fn from_result(result: TaskResult<()>) -> Self {
        match result {
            Ok(()) => Self::Created,
            Err(e) if e.is_remote() => Self::Failed,
            Err(e) => Self::Invalid(e.to_string()),
        }
    }

    /// Apply to the form buffers: a created task empties both fields.
    ///
    /// Returns the message to flash, if any.
    pub fn settle(&self, title: &mut String, description: &mut String) -> Option<String> {
        match self {
            Self::Created => {
                title.clear();
                description.clear();
                None
            }
            Self::Invalid(message) => Some(message.clone()),
            Self::Failed => Some(CREATE_FAILED.to_string()),
        }
    }
}

/// Flip `done`, stamping or clearing the completion time
pub async fn toggle_status<A: TaskApi + ?Sized>(
    api: &A,
    role: Role,
    task: &Task,
    now: DateTime<Utc>,
) -> TaskResult<Option<Mutation>> {
    if !role.permissions().toggle {
        return Ok(None);
    }
    let Some(id) = task.id.clone() else {
        return Ok(None);
    };
    let patch = TaskPatch::status(!task.done, now);
    api.update_task(&id, &patch)
        .await
        .inspect_err(|e| log::error!("Error updating task {}: {}", id, e))?;
    Ok(Some(Mutation::Patch { id, patch }))
}

/// Send the edit buffers as a title/description update
pub async fn save_edit<A: TaskApi + ?Sized>(
    api: &A,
    role: Role,
    session: &EditSession,
) -> TaskResult<Option<Mutation>> {
    if !role.permissions().edit {
        return Ok(None);
    }
    let patch = TaskPatch::fields(session.title.clone(), session.description.clone());
    api.update_task(&session.id, &patch)
        .await
        .inspect_err(|e| log::error!("Error saving task {}: {}", session.id, e))?;
    Ok(Some(Mutation::Patch {
        id: session.id.clone(),
        patch,
    }))
}

pub async fn remove_task<A: TaskApi + ?Sized>(
    api: &A,
    role: Role,
    id: &TaskId,
) -> TaskResult<Option<Mutation>> {
    if !role.permissions().delete {
        return Ok(None);
    }
    if !api.delete_task(id).await {
        return Err(TaskError::Rejected(format!("delete of task {}", id)));
    }
    Ok(Some(Mutation::Remove { id: id.clone() }))
}
