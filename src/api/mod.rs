//! Remote Access Layer
//!
//! Bindings to the task store's REST endpoints. One convention throughout:
//!
//! | op     | method | path          |
//! |--------|--------|---------------|
//! | list   | GET    | `/todo`       |
//! | create | POST   | `/todo`       |
//! | update | PATCH  | `/todo/{id}`  |
//! | delete | DELETE | `/todo/{id}`  |

mod http;

use async_trait::async_trait;

use crate::error::TaskResult;
use crate::models::{NewTask, Task, TaskId, TaskPatch};

pub use http::HttpTaskApi;

/// Task store operations.
///
/// `?Send` because browser fetch futures are bound to the UI thread.
#[async_trait(?Send)]
pub trait TaskApi {
    /// Fetch every task, surfacing the failure
    async fn try_list_tasks(&self) -> TaskResult<Vec<Task>>;

    /// Fetch every task; a failure is logged and yields an empty list.
    ///
    /// The sync engine keeps its last collection on failure, so it goes
    /// through `try_list_tasks` instead.
    #[cfg(test)]
    async fn list_tasks(&self) -> Vec<Task> {
        match self.try_list_tasks().await {
            Ok(tasks) => tasks,
            Err(e) => {
                log::error!("Error fetching tasks: {}", e);
                Vec::new()
            }
        }
    }

    /// Store a new task. Any 2xx counts as success; the body is ignored.
    async fn create_task(&self, task: &NewTask) -> TaskResult<()>;

    /// Merge the supplied fields into the stored task. Any 2xx counts as
    /// success, `204 No Content` included.
    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> TaskResult<()>;

    /// Remove a task. Failures are logged and reported as `false`.
    async fn delete_task(&self, id: &TaskId) -> bool;
}
