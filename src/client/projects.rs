use serde::Deserialize;

use super::{ClientResult, YougileClient};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub board_id: Option<String>,
    #[serde(default)]
    pub deleted: bool,
    pub color: Option<String>,
}

impl YougileClient {
    pub async fn list_projects(&mut self) -> ClientResult<Vec<Project>> {
        self.get_list("projects", &[]).await
    }

    /// Boards of `project_id`, or every board when `None`.
    pub async fn list_boards(&mut self, project_id: Option<&str>) -> ClientResult<Vec<Board>> {
        match project_id {
            Some(project_id) => self.get_list("boards", &[("projectId", project_id)]).await,
            None => self.get_list("boards", &[]).await,
        }
    }

    pub async fn list_columns(&mut self, board_id: &str) -> ClientResult<Vec<Column>> {
        self.get_list("columns", &[("boardId", board_id)]).await
    }
}
