use serde::{Deserialize, Serialize};

use super::{ClientResult, YougileClient};

/// Deadline block; timestamps are epoch milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deadline {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_time: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub column_id: Option<String>,
    #[serde(default)]
    pub assigned: Vec<String>,
    pub deadline: Option<Deadline>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub archived: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub column_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Deadline>,
}

impl NewTask {
    pub fn new(title: impl Into<String>, column_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            column_id: column_id.into(),
            description: None,
            assigned: None,
            deadline: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedTask {
    pub id: String,
}

impl YougileClient {
    pub async fn create_task(&mut self, task: &NewTask) -> ClientResult<CreatedTask> {
        let created: CreatedTask = self.post_json("tasks", task).await?;
        tracing::info!(task_id = %created.id, column_id = %task.column_id, "created task");
        Ok(created)
    }

    /// Tasks filtered by column and/or project; both filters are optional.
    pub async fn list_tasks(
        &mut self,
        column_id: Option<&str>,
        project_id: Option<&str>,
    ) -> ClientResult<Vec<Task>> {
        let query: Vec<(&str, &str)> = [("columnId", column_id), ("projectId", project_id)]
            .into_iter()
            .filter_map(|(name, value)| value.map(|value| (name, value)))
            .collect();
        self.get_list("task-list", &query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn create_task_omits_unset_fields() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/tasks")
                .header("Authorization", TEST_BEARER)
                .header("Content-Type", "application/json")
                .json_body(json!({ "title": "T", "columnId": "col1" }));
            then.status(201).json_body(json!({ "id": "t1" }));
        });

        let (_dir, _store, mut client) = configured_client(&server);
        let created = client.create_task(&NewTask::new("T", "col1")).await.unwrap();

        mock.assert();
        assert_eq!(created, CreatedTask { id: "t1".into() });
    }

    #[tokio::test]
    async fn create_task_sends_optional_fields() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/tasks").json_body(json!({
                "title": "Ship it",
                "columnId": "col1",
                "description": "before friday",
                "assigned": ["u1", "u2"],
                "deadline": { "deadline": 1735689600000i64, "withTime": false }
            }));
            then.status(201).json_body(json!({ "id": "t2" }));
        });

        let task = NewTask {
            description: Some("before friday".into()),
            assigned: Some(vec!["u1".into(), "u2".into()]),
            deadline: Some(Deadline {
                deadline: Some(1_735_689_600_000),
                start_date: None,
                with_time: Some(false),
            }),
            ..NewTask::new("Ship it", "col1")
        };

        let (_dir, _store, mut client) = configured_client(&server);
        let created = client.create_task(&task).await.unwrap();

        mock.assert();
        assert_eq!(created.id, "t2");
    }

    #[tokio::test]
    async fn list_tasks_by_column() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/task-list").query_param("columnId", "col1");
            then.status(200).json_body(json!({
                "content": [
                    {
                        "id": "t1",
                        "title": "Write docs",
                        "columnId": "col1",
                        "completed": true,
                        "deadline": { "deadline": 1735689600000i64, "withTime": false }
                    },
                    { "id": "t2", "title": "Review", "columnId": "col1", "assigned": ["u1"] }
                ]
            }));
        });

        let (_dir, _store, mut client) = configured_client(&server);
        let tasks = client.list_tasks(Some("col1"), None).await.unwrap();

        mock.assert();
        assert_eq!(tasks.len(), 2);
        assert!(tasks[0].completed);
        assert_eq!(tasks[0].deadline.as_ref().and_then(|d| d.deadline), Some(1_735_689_600_000));
        assert!(!tasks[1].completed);
        assert_eq!(tasks[1].assigned, vec!["u1".to_string()]);
    }

    #[tokio::test]
    async fn list_tasks_by_project() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/task-list")
                .query_param("projectId", "p1");
            then.status(200).json_body(json!({ "content": [] }));
        });

        let (_dir, _store, mut client) = configured_client(&server);
        let tasks = client.list_tasks(None, Some("p1")).await.unwrap();

        mock.assert();
        assert!(tasks.is_empty());
    }
}
