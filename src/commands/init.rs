use anyhow::Result;
use colored::Colorize;

use crate::client::{Company, YougileClient};
use crate::config::{Config, ConfigStore};
use crate::display;
use crate::prompts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthMethod {
    Login,
    ApiKey,
}

impl AuthMethod {
    const ALL: [AuthMethod; 2] = [AuthMethod::Login, AuthMethod::ApiKey];

    fn label(&self) -> String {
        match self {
            AuthMethod::Login => "Login with email & password (creates new API key)".to_string(),
            AuthMethod::ApiKey => "Enter existing API key".to_string(),
        }
    }
}

fn company_label(company: &Company) -> String {
    if company.is_admin {
        format!("{} (admin)", company.name)
    } else {
        company.name.clone()
    }
}

/// Interactive setup: credentials, connection test, optional defaults.
pub async fn run(store: &ConfigStore, client: &mut YougileClient, api_host: &str) -> Result<()> {
    println!("{}", "\n🚀 Yougile CLI Setup\n".bold().cyan());

    if store.has_valid_config()
        && !prompts::confirm("Configuration already exists. Overwrite?", false)?
    {
        println!("{}", "Setup cancelled.".yellow());
        return Ok(());
    }

    let method = *prompts::select(
        "How would you like to authenticate?",
        &AuthMethod::ALL,
        AuthMethod::label,
    )?;

    let api_key = match method {
        AuthMethod::Login => match login(client).await? {
            Some(key) => key,
            None => return Ok(()),
        },
        AuthMethod::ApiKey => prompts::prompt_api_key()?,
    };

    let mut config = Config::new(api_key, api_host);
    store.save(&config)?;
    client.reset_handle();

    let spinner = display::spinner("Testing connection...");
    if !client.test_connection().await {
        display::fail(&spinner, "Connection failed. Check your API key.");
        return Ok(());
    }
    display::succeed(&spinner, "Connected to Yougile!");

    if prompts::confirm(
        "Setup default project/board/column for quick task creation?",
        true,
    )? {
        setup_defaults(store, client, &mut config).await?;
    }

    println!(
        "{}",
        format!("\n✅ Configuration saved to {}", store.path().display()).green()
    );
    println!("{}", "\nYou can now use:".cyan());
    println!("{}", "  yougile create    - Create a new task".white());
    println!("{}", "  yougile list      - List tasks".white());
    println!("{}", "  yougile config    - View/edit configuration".white());

    Ok(())
}

/// Email/password flow. `None` means the user was already told why it stopped.
async fn login(client: &YougileClient) -> Result<Option<String>> {
    let login = prompts::prompt_email()?;
    let password = prompts::prompt_password()?;

    let spinner = display::spinner("Getting your companies...");
    let companies = match client.list_companies(&login, &password).await {
        Ok(companies) => companies,
        Err(err) => {
            tracing::warn!(error = %err, "company lookup failed");
            display::fail(&spinner, "Authentication failed. Check your credentials.");
            if err.is_unauthorized() {
                println!("{}", "Invalid email or password.".red());
            }
            return Ok(None);
        }
    };
    spinner.finish_and_clear();

    let company = match companies.as_slice() {
        [] => {
            println!("{}", "No companies found for this account.".red());
            return Ok(None);
        }
        [only] => {
            println!("{}", format!("Company: {}", only.name).dimmed());
            only
        }
        _ => prompts::select("Select company:", &companies, company_label)?,
    };

    let spinner = display::spinner("Creating API key...");
    match client.issue_api_key(&login, &password, &company.id).await {
        Ok(key) => {
            display::succeed(&spinner, "API key created!");
            Ok(Some(key))
        }
        Err(err) => {
            display::fail(&spinner, "Failed to create API key.");
            println!("{}", err.to_string().red());
            Ok(None)
        }
    }
}

/// Picks default project, board and column.
///
/// Load failures after the project step keep whatever was chosen so far and
/// end the flow without an error.
async fn setup_defaults(
    store: &ConfigStore,
    client: &mut YougileClient,
    config: &mut Config,
) -> Result<()> {
    let spinner = display::spinner("Loading projects...");
    let projects = match client.list_projects().await {
        Ok(projects) => projects,
        Err(err) => {
            tracing::warn!(error = %err, "failed to load projects for defaults");
            display::fail(&spinner, "Failed to load projects");
            return Ok(());
        }
    };
    spinner.finish_and_clear();

    if projects.is_empty() {
        println!("{}", "No projects found.".yellow());
        return Ok(());
    }

    let project = prompts::select("Select default project:", &projects, |p| p.title.clone())?;
    config.default_project_id = Some(project.id.clone());
    config.default_project_name = Some(project.title.clone());

    let spinner = display::spinner("Loading boards...");
    let boards = match client.list_boards(Some(&project.id)).await {
        Ok(boards) => boards,
        Err(err) => {
            tracing::warn!(error = %err, "failed to load boards; saving partial defaults");
            display::fail(&spinner, "Failed to load boards");
            return store.save(config);
        }
    };
    spinner.finish_and_clear();

    if boards.is_empty() {
        println!("{}", "No boards found in this project.".yellow());
        return store.save(config);
    }

    let board = prompts::select("Select default board:", &boards, |b| b.title.clone())?;
    config.default_board_id = Some(board.id.clone());
    config.default_board_name = Some(board.title.clone());

    let spinner = display::spinner("Loading columns...");
    let columns = match client.list_columns(&board.id).await {
        Ok(columns) => columns,
        Err(err) => {
            tracing::warn!(error = %err, "failed to load columns; saving partial defaults");
            display::fail(&spinner, "Failed to load columns");
            return store.save(config);
        }
    };
    spinner.finish_and_clear();

    if columns.is_empty() {
        println!("{}", "No columns found in this board.".yellow());
        return store.save(config);
    }

    let column = prompts::select(
        "Select default column (where new tasks go):",
        &columns,
        |c| c.title.clone(),
    )?;
    config.default_column_id = Some(column.id.clone());
    config.default_column_name = Some(column.title.clone());

    store.save(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_label_marks_admins() {
        let admin = Company {
            id: "c1".into(),
            name: "Acme".into(),
            is_admin: true,
        };
        let member = Company {
            is_admin: false,
            ..admin.clone()
        };
        assert_eq!(company_label(&admin), "Acme (admin)");
        assert_eq!(company_label(&member), "Acme");
    }

    #[test]
    fn auth_methods_are_listed_login_first() {
        assert_eq!(AuthMethod::ALL[0], AuthMethod::Login);
        assert!(AuthMethod::ApiKey.label().contains("API key"));
    }
}
