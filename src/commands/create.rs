use anyhow::{Context, Result};
use colored::Colorize;

use super::{pick_column, require_config};
use crate::client::{NewTask, YougileClient};
use crate::config::{Config, ConfigStore};
use crate::display;
use crate::prompts;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateOptions {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Use the default column without asking.
    pub quick: bool,
}

struct Target {
    column_id: String,
    column_name: String,
}

impl Target {
    fn default_of(config: &Config) -> Option<Self> {
        let column_id = config.default_column_id.clone()?;
        Some(Self {
            column_id,
            column_name: config
                .default_column_name
                .clone()
                .unwrap_or_else(|| "default".to_string()),
        })
    }
}

pub async fn run(store: &ConfigStore, client: &mut YougileClient, options: CreateOptions) -> Result<()> {
    let config = require_config(store)?;

    println!("{}", "\n📝 Create New Task\n".bold().cyan());

    let target = match Target::default_of(&config) {
        Some(target) if options.quick => {
            println!(
                "{}",
                format!("Using default: {}", config.default_location()).dimmed()
            );
            target
        }
        _ => select_target(&config, client).await?,
    };

    let task = task_details(client, &options, &target.column_id).await?;

    let spinner = display::spinner("Creating task...");
    let created = match client.create_task(&task).await {
        Ok(created) => created,
        Err(err) => {
            display::fail(&spinner, "Failed to create task");
            return Err(err).context("Failed to create task");
        }
    };
    display::succeed(&spinner, "Task created successfully!");

    println!("{}", format!("  ID: {}", created.id).dimmed());
    println!("{}", format!("  Column: {}", target.column_name).dimmed());
    println!("{}", format!("  Title: {}", task.title).white());
    if let Some(description) = &task.description {
        println!(
            "{}",
            format!("  Description: {}", display::truncate(description, 50)).dimmed()
        );
    }
    if let Some(date) = task
        .deadline
        .as_ref()
        .and_then(|d| d.deadline)
        .and_then(display::format_date)
    {
        println!("{}", format!("  Deadline: {}", date).dimmed());
    }

    Ok(())
}

async fn select_target(config: &Config, client: &mut YougileClient) -> Result<Target> {
    if let Some(target) = Target::default_of(config) {
        println!(
            "{}",
            format!("Default: {}\n", config.default_location()).dimmed()
        );
        if prompts::confirm("Use default location?", true)? {
            return Ok(target);
        }
    }

    let column = pick_column(client, None).await?;
    Ok(Target {
        column_id: column.id,
        column_name: column.title,
    })
}

async fn task_details(
    client: &mut YougileClient,
    options: &CreateOptions,
    column_id: &str,
) -> Result<NewTask> {
    let title = match options.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => title.to_string(),
        None => prompts::prompt_title()?,
    };

    let description = match &options.description {
        Some(description) => Some(description.trim().to_string()).filter(|d| !d.is_empty()),
        None => prompts::prompt_description()?,
    };

    let deadline = prompts::prompt_deadline()?;

    let assigned = if prompts::confirm("Assign to someone?", false)? {
        select_assignees(client).await?
    } else {
        None
    };

    Ok(NewTask {
        description,
        assigned,
        deadline,
        ..NewTask::new(title, column_id)
    })
}

/// Assignee ids, or `None` when nobody was picked. User load failures are
/// reported and skipped.
async fn select_assignees(client: &mut YougileClient) -> Result<Option<Vec<String>>> {
    let spinner = display::spinner("Loading users...");
    let users = match client.list_users().await {
        Ok(users) => users,
        Err(err) => {
            tracing::warn!(error = %err, "failed to load users");
            display::fail(&spinner, "Failed to load users");
            return Ok(None);
        }
    };
    spinner.finish_and_clear();

    if users.is_empty() {
        println!("{}", "No users found.".yellow());
        return Ok(None);
    }

    let selected = prompts::multi_select("Select assignees:", &users, |u| {
        if u.email.is_empty() {
            u.display_name()
        } else {
            format!("{} <{}>", u.display_name(), u.email)
        }
    })?;

    let ids: Vec<String> = selected.into_iter().map(|u| u.id.clone()).collect();
    Ok(Some(ids).filter(|ids| !ids.is_empty()))
}
