//! HTTP Task Store Client
//!
//! `reqwest` goes through the browser fetch API on wasm32 and through
//! hyper on native targets (tests).

use async_trait::async_trait;

use super::TaskApi;
use crate::error::TaskResult;
use crate::models::{NewTask, Task, TaskId, TaskPatch};

#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    base_url: String,
    http: reqwest::Client,
}

impl HttpTaskApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/todo", self.base_url)
    }

    fn task_url(&self, id: &TaskId) -> String {
        format!("{}/todo/{}", self.base_url, id)
    }

    async fn try_delete(&self, id: &TaskId) -> TaskResult<()> {
        self.http
            .delete(self.task_url(id))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl TaskApi for HttpTaskApi {
    async fn try_list_tasks(&self) -> TaskResult<Vec<Task>> {
        let tasks = self
            .http
            .get(self.collection_url())
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Task>>()
            .await?;
        Ok(tasks)
    }

    async fn create_task(&self, task: &NewTask) -> TaskResult<()> {
        self.http
            .post(self.collection_url())
            .json(task)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> TaskResult<()> {
        self.http
            .patch(self.task_url(id))
            .json(patch)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn delete_task(&self, id: &TaskId) -> bool {
        match self.try_delete(id).await {
            Ok(()) => true,
            Err(e) => {
                log::error!("Error deleting task {}: {}", id, e);
                false
            }
        }
    }
}
