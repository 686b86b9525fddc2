use anyhow::{bail, Context, Result};

use crate::client::{Column, YougileClient};
use crate::config::{Config, ConfigStore};
use crate::display;
use crate::prompts;

pub mod create;
pub mod init;
pub mod list;
pub mod settings;

/// Loads the config or fails with a hint to run `init`.
pub fn require_config(store: &ConfigStore) -> Result<Config> {
    store
        .load()
        .filter(Config::has_api_key)
        .context("Not configured. Run \"yougile init\" first.")
}

/// Walks project → board → column interactively.
///
/// With `project_id` set, the project prompt is skipped.
pub async fn pick_column(client: &mut YougileClient, project_id: Option<&str>) -> Result<Column> {
    let project_id = match project_id {
        Some(id) => id.to_string(),
        None => {
            let spinner = display::spinner("Loading projects...");
            let projects = match client.list_projects().await {
                Ok(projects) => projects,
                Err(err) => {
                    display::fail(&spinner, "Failed to load projects");
                    return Err(err).context("Failed to load projects");
                }
            };
            spinner.finish_and_clear();

            if projects.is_empty() {
                bail!("No projects found");
            }
            prompts::select("Select project:", &projects, |p| p.title.clone())?
                .id
                .clone()
        }
    };

    let spinner = display::spinner("Loading boards...");
    let boards = match client.list_boards(Some(&project_id)).await {
        Ok(boards) => boards,
        Err(err) => {
            display::fail(&spinner, "Failed to load boards");
            return Err(err).context("Failed to load boards");
        }
    };
    spinner.finish_and_clear();

    if boards.is_empty() {
        bail!("No boards found in this project");
    }
    let board = prompts::select("Select board:", &boards, |b| b.title.clone())?;

    let spinner = display::spinner("Loading columns...");
    let columns = match client.list_columns(&board.id).await {
        Ok(columns) => columns,
        Err(err) => {
            display::fail(&spinner, "Failed to load columns");
            return Err(err).context("Failed to load columns");
        }
    };
    spinner.finish_and_clear();

    if columns.is_empty() {
        bail!("No columns found in this board");
    }
    let column = prompts::select("Select column:", &columns, |c| c.title.clone())?;
    Ok(column.clone())
}
