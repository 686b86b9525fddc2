use anyhow::{Context, Result};
use colored::Colorize;

use super::{pick_column, require_config};
use crate::client::YougileClient;
use crate::config::{Config, ConfigStore};
use crate::display;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Every task, optionally scoped to `project`.
    pub all: bool,
    pub project: Option<String>,
}

/// Which `task-list` filter a listing resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Scope {
    All { project_id: Option<String> },
    DefaultColumn { column_id: String },
    Pick { project_id: Option<String> },
}

fn resolve_scope(config: &Config, options: &ListOptions) -> Scope {
    if options.all {
        return Scope::All {
            project_id: options.project.clone(),
        };
    }
    match (&config.default_column_id, &options.project) {
        (Some(column_id), None) => Scope::DefaultColumn {
            column_id: column_id.clone(),
        },
        _ => Scope::Pick {
            project_id: options.project.clone(),
        },
    }
}

pub async fn run(store: &ConfigStore, client: &mut YougileClient, options: ListOptions) -> Result<()> {
    let config = require_config(store)?;

    println!("{}", "\n📋 Tasks\n".bold().cyan());

    let (column_id, project_id) = match resolve_scope(&config, &options) {
        Scope::All { project_id } => (None, project_id),
        Scope::DefaultColumn { column_id } => {
            println!(
                "{}",
                format!("Column: {}\n", config.default_location()).dimmed()
            );
            (Some(column_id), None)
        }
        Scope::Pick { project_id } => {
            let column = pick_column(client, project_id.as_deref()).await?;
            (Some(column.id), None)
        }
    };

    let spinner = display::spinner("Loading tasks...");
    let tasks = match client
        .list_tasks(column_id.as_deref(), project_id.as_deref())
        .await
    {
        Ok(tasks) => tasks,
        Err(err) => {
            display::fail(&spinner, "Failed to load tasks");
            return Err(err).context("Failed to load tasks");
        }
    };
    spinner.finish_and_clear();

    display::print_tasks(&tasks);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_default() -> Config {
        let mut config = Config::new("key", "https://yougile.com/api-v2/");
        config.default_column_id = Some("col1".into());
        config
    }

    #[test]
    fn all_wins_over_defaults() {
        let options = ListOptions {
            all: true,
            project: Some("p1".into()),
        };
        assert_eq!(
            resolve_scope(&config_with_default(), &options),
            Scope::All {
                project_id: Some("p1".into())
            }
        );
    }

    #[test]
    fn default_column_used_without_project() {
        assert_eq!(
            resolve_scope(&config_with_default(), &ListOptions::default()),
            Scope::DefaultColumn {
                column_id: "col1".into()
            }
        );
    }

    #[test]
    fn project_or_missing_default_prompts() {
        let options = ListOptions {
            all: false,
            project: Some("p1".into()),
        };
        assert_eq!(
            resolve_scope(&config_with_default(), &options),
            Scope::Pick {
                project_id: Some("p1".into())
            }
        );

        let bare = Config::new("key", "https://yougile.com/api-v2/");
        assert_eq!(
            resolve_scope(&bare, &ListOptions::default()),
            Scope::Pick { project_id: None }
        );
    }
}
